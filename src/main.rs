use anyhow::Context;
use cryptbee_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load CryptBee settings")?;
    cryptbee_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "cryptbee bootstrap starting"
    );

    let pool = cryptbee_db::connect(&settings.database)
        .await
        .with_context(|| "failed to open database handle")?;

    let report = cryptbee_db::seed(&pool, &settings.seed)
        .await
        .with_context(|| "seeding failed")?;

    tracing::info!(
        principal_created = report.principal_created,
        collections_seeded = report.seeded.len(),
        "cryptbee bootstrap complete"
    );
    Ok(())
}
