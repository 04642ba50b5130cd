//! Idempotent seeding of the principal, collections, and baseline records.
//!
//! The whole run executes inside one transaction: the existence checks and
//! the inserts are a single atomic unit, so a racing second invocation can
//! never duplicate baseline rows, and a failed run leaves the database
//! exactly as it found it.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use cryptbee_kernel::seed::{Collection, PrincipalSpec, RoleGrant, SeedPlan};

use crate::error::SeedError;
use crate::schema;

/// What a seeding run actually did.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub principal_created: bool,
    pub seeded: Vec<Collection>,
}

/// Ensure the configured principal, collections, and baseline records exist.
///
/// Running this any number of times against the same database converges to
/// the same final state. Order matters: principal, then collections, then
/// each collection's records.
pub async fn seed(pool: &SqlitePool, plan: &SeedPlan) -> Result<SeedReport, SeedError> {
    // Probe before mutating anything; an unusable handle is surfaced as
    // connectivity, not as a failure of some later statement.
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(SeedError::Connectivity)?;

    let mut tx = pool.begin().await.map_err(SeedError::Connectivity)?;
    let mut report = SeedReport::default();

    report.principal_created = ensure_principal(&mut *tx, &plan.principal).await?;
    tracing::info!(
        principal = %plan.principal.name,
        created = report.principal_created,
        "principal ensured"
    );

    for collection in Collection::ALL {
        ensure_collection(&mut *tx, collection).await?;
    }

    let stamp = Utc::now().to_rfc3339();
    for collection in Collection::ALL {
        let inserted = seed_collection(&mut *tx, collection, plan, &stamp).await?;
        if inserted > 0 {
            tracing::info!(collection = collection.table(), rows = inserted, "baseline inserted");
            report.seeded.push(collection);
        } else {
            tracing::debug!(collection = collection.table(), "baseline skipped");
        }
    }

    tx.commit().await?;
    Ok(report)
}

/// Create the principal if absent. An existing principal with the same name
/// must match the configured secret and role grants (order-insensitive);
/// anything else is a conflict and is never overwritten.
async fn ensure_principal(
    conn: &mut SqliteConnection,
    spec: &PrincipalSpec,
) -> Result<bool, SeedError> {
    sqlx::query(schema::PRINCIPALS_DDL)
        .execute(&mut *conn)
        .await
        .map_err(|source| SeedError::CollectionCreate {
            collection: "principals",
            source,
        })?;

    let configured = canonical_roles(&spec.roles);
    let existing = sqlx::query_as::<_, (String, String)>(
        "SELECT secret, roles FROM principals WHERE name = ?1",
    )
    .bind(&spec.name)
    .fetch_optional(&mut *conn)
    .await?;

    if let Some((secret, roles_json)) = existing {
        let stored = serde_json::from_str::<Vec<RoleGrant>>(&roles_json)
            .map(|roles| canonical_roles(&roles))
            .ok();
        if secret == spec.secret && stored.as_deref() == Some(&configured) {
            return Ok(false);
        }
        return Err(SeedError::PrincipalConflict {
            name: spec.name.clone(),
        });
    }

    let roles_json = serde_json::to_string(&configured)?;
    sqlx::query("INSERT INTO principals (name, secret, roles) VALUES (?1, ?2, ?3)")
        .bind(&spec.name)
        .bind(&spec.secret)
        .bind(&roles_json)
        .execute(&mut *conn)
        .await?;

    Ok(true)
}

async fn ensure_collection(
    conn: &mut SqliteConnection,
    collection: Collection,
) -> Result<(), SeedError> {
    sqlx::query(schema::ddl_for(collection))
        .execute(conn)
        .await
        .map_err(|source| SeedError::CollectionCreate {
            collection: collection.table(),
            source,
        })?;
    Ok(())
}

/// Insert a collection's baseline records only when it is currently empty;
/// a non-empty collection is left untouched. Returns the number of rows
/// inserted.
async fn seed_collection(
    conn: &mut SqliteConnection,
    collection: Collection,
    plan: &SeedPlan,
    stamp: &str,
) -> Result<usize, SeedError> {
    let count: i64 =
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", collection.table()))
            .fetch_one(&mut *conn)
            .await?;
    if count > 0 {
        return Ok(0);
    }

    let inserted = match collection {
        Collection::Users => {
            for user in &plan.users {
                sqlx::query("INSERT INTO users (name, role, created_at) VALUES (?1, ?2, ?3)")
                    .bind(&user.name)
                    .bind(user.role.as_str())
                    .bind(stamp)
                    .execute(&mut *conn)
                    .await?;
            }
            plan.users.len()
        }
        Collection::Workstations => {
            for workstation in &plan.workstations {
                sqlx::query(
                    "INSERT INTO workstations (name, status, created_at) VALUES (?1, ?2, ?3)",
                )
                .bind(&workstation.name)
                .bind(workstation.status.as_str())
                .bind(stamp)
                .execute(&mut *conn)
                .await?;
            }
            plan.workstations.len()
        }
        Collection::Keys => {
            for key in &plan.keys {
                sqlx::query("INSERT INTO keys (key, owner, created_at) VALUES (?1, ?2, ?3)")
                    .bind(&key.key)
                    .bind(&key.owner)
                    .bind(stamp)
                    .execute(&mut *conn)
                    .await?;
            }
            plan.keys.len()
        }
    };

    Ok(inserted)
}

fn canonical_roles(roles: &[RoleGrant]) -> Vec<RoleGrant> {
    let mut sorted = roles.to_vec();
    sorted.sort();
    sorted
}
