//! Seed plan: the principal, collections, and baseline records the bootstrap
//! guarantees to exist. Defaults mirror the original `beedb` bootstrap script;
//! every field can be overridden through the layered configuration.

use serde::{Deserialize, Serialize};

/// The collections the bootstrap manages, with their stable table names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Users,
    Workstations,
    Keys,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Users,
        Collection::Workstations,
        Collection::Keys,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Workstations => "workstations",
            Collection::Keys => "keys",
        }
    }
}

/// A (permission role, database scope) pair granted to the principal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleGrant {
    pub role: String,
    pub db: String,
}

/// The administrative principal the bootstrap ensures exists.
#[derive(Debug, Clone, Deserialize)]
pub struct PrincipalSpec {
    #[serde(default = "PrincipalSpec::default_name")]
    pub name: String,
    /// Never defaulted in code; supplied via config file or
    /// `CRYPTBEE_SEED_PRINCIPAL_SECRET`.
    #[serde(default)]
    pub secret: String,
    #[serde(default = "PrincipalSpec::default_roles")]
    pub roles: Vec<RoleGrant>,
}

impl PrincipalSpec {
    fn default_name() -> String {
        "bdd_username_root".to_string()
    }

    fn default_roles() -> Vec<RoleGrant> {
        vec![
            RoleGrant {
                role: "readWrite".to_string(),
                db: "beedb".to_string(),
            },
            RoleGrant {
                role: "dbAdmin".to_string(),
                db: "beedb".to_string(),
            },
        ]
    }
}

impl Default for PrincipalSpec {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            secret: String::new(),
            roles: Self::default_roles(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Administrator,
    User,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Administrator => "administrator",
            UserRole::User => "user",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkstationStatus {
    Active,
    Inactive,
}

impl WorkstationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkstationStatus::Active => "active",
            WorkstationStatus::Inactive => "inactive",
        }
    }
}

/// Baseline `users` record (`created_at` is stamped at insert time).
#[derive(Debug, Clone, Deserialize)]
pub struct UserSeed {
    pub name: String,
    pub role: UserRole,
}

/// Baseline `workstations` record.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkstationSeed {
    pub name: String,
    pub status: WorkstationStatus,
}

/// Baseline `keys` record. `owner` references a user by name; the reference
/// is informational, not enforced as a foreign key.
#[derive(Debug, Clone, Deserialize)]
pub struct KeySeed {
    pub key: String,
    pub owner: String,
}

/// Everything the Seeder needs: who the principal is and which baseline
/// records belong in each collection.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedPlan {
    #[serde(default)]
    pub principal: PrincipalSpec,
    #[serde(default = "SeedPlan::default_users")]
    pub users: Vec<UserSeed>,
    #[serde(default = "SeedPlan::default_workstations")]
    pub workstations: Vec<WorkstationSeed>,
    #[serde(default = "SeedPlan::default_keys")]
    pub keys: Vec<KeySeed>,
}

impl SeedPlan {
    fn default_users() -> Vec<UserSeed> {
        vec![
            UserSeed {
                name: "admin".to_string(),
                role: UserRole::Administrator,
            },
            UserSeed {
                name: "user1".to_string(),
                role: UserRole::User,
            },
        ]
    }

    fn default_workstations() -> Vec<WorkstationSeed> {
        vec![
            WorkstationSeed {
                name: "Workstation1".to_string(),
                status: WorkstationStatus::Active,
            },
            WorkstationSeed {
                name: "Workstation2".to_string(),
                status: WorkstationStatus::Inactive,
            },
        ]
    }

    fn default_keys() -> Vec<KeySeed> {
        vec![
            KeySeed {
                key: "ABC123".to_string(),
                owner: "user1".to_string(),
            },
            KeySeed {
                key: "XYZ789".to_string(),
                owner: "admin".to_string(),
            },
        ]
    }
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            principal: PrincipalSpec::default(),
            users: Self::default_users(),
            workstations: Self::default_workstations(),
            keys: Self::default_keys(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plan_mirrors_original_bootstrap() {
        let plan = SeedPlan::default();
        assert_eq!(plan.principal.name, "bdd_username_root");
        assert_eq!(plan.principal.roles.len(), 2);
        assert_eq!(plan.users.len(), 2);
        assert_eq!(plan.workstations.len(), 2);
        assert_eq!(plan.keys.len(), 2);
        assert_eq!(plan.users[0].role, UserRole::Administrator);
        assert_eq!(plan.keys[0].owner, "user1");
    }

    #[test]
    fn collection_table_names_are_stable() {
        assert_eq!(Collection::Users.table(), "users");
        assert_eq!(Collection::Workstations.table(), "workstations");
        assert_eq!(Collection::Keys.table(), "keys");
    }

    #[test]
    fn role_grants_deserialize_from_config_shape() {
        let grant: RoleGrant =
            serde_json::from_str(r#"{"role": "readWrite", "db": "beedb"}"#).unwrap();
        assert_eq!(grant.role, "readWrite");
        assert_eq!(grant.db, "beedb");
    }
}
