//! Pool factory and idempotent seeding for the CryptBee database.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use cryptbee_kernel::settings::DatabaseSettings;

mod error;
mod schema;
mod seeder;

pub use error::SeedError;
pub use seeder::{seed, SeedReport};

/// Open a bounded pool against the configured database, creating the file
/// for file-backed URLs on first run.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, SeedError> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .map_err(SeedError::Connectivity)?
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await
        .map_err(SeedError::Connectivity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_rejects_malformed_url() {
        let settings = DatabaseSettings {
            url: "not-a-database-url".to_string(),
            max_connections: 1,
        };
        let err = connect(&settings).await.unwrap_err();
        assert!(matches!(err, SeedError::Connectivity(_)));
    }

    #[tokio::test]
    async fn connect_opens_in_memory_database() {
        let settings = DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        };
        let pool = connect(&settings).await.unwrap();
        let one: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&pool).await.unwrap();
        assert_eq!(one, 1);
    }
}
