//! Idempotent DDL for the principal registry and the managed collections.
//! Unique keys follow the record shapes: `users.name`, `workstations.name`,
//! `keys.key`, `principals.name`. Timestamps are stored as RFC 3339 text.

use cryptbee_kernel::Collection;

pub(crate) const PRINCIPALS_DDL: &str = r#"CREATE TABLE IF NOT EXISTS principals (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    secret TEXT NOT NULL,
    roles TEXT NOT NULL
);"#;

const USERS_DDL: &str = r#"CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    role TEXT NOT NULL,
    created_at TEXT NOT NULL
);"#;

const WORKSTATIONS_DDL: &str = r#"CREATE TABLE IF NOT EXISTS workstations (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL
);"#;

const KEYS_DDL: &str = r#"CREATE TABLE IF NOT EXISTS keys (
    id INTEGER PRIMARY KEY,
    key TEXT NOT NULL UNIQUE,
    owner TEXT NOT NULL,
    created_at TEXT NOT NULL
);"#;

pub(crate) fn ddl_for(collection: Collection) -> &'static str {
    match collection {
        Collection::Users => USERS_DDL,
        Collection::Workstations => WORKSTATIONS_DDL,
        Collection::Keys => KEYS_DDL,
    }
}
