//! Tracing bootstrap for the CryptBee bootstrap process.

use cryptbee_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Format comes from settings, the
/// filter from `RUST_LOG` (default `info`). Calling this more than once is
/// tolerated so tests can initialise freely.
pub fn init(settings: &TelemetrySettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match settings.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!(target: "cryptbee-telemetry", "subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_does_not_panic() {
        let settings = TelemetrySettings::default();
        init(&settings);
        init(&settings);
    }
}
