//! Well-known role name constants.
//!
//! These must match the seed rows in `20260301000001_create_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPERVISOR: &str = "supervisor";
pub const ROLE_WORKER: &str = "worker";

/// Role id of the seeded `worker` role, used when a user is created without one.
pub const DEFAULT_ROLE_ID: i64 = 3;

/// Whether the role may manage master data (projects, machines, contracts, ...).
pub fn can_manage(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_SUPERVISOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_and_supervisor_can_manage() {
        assert!(can_manage(ROLE_ADMIN));
        assert!(can_manage(ROLE_SUPERVISOR));
    }

    #[test]
    fn worker_cannot_manage() {
        assert!(!can_manage(ROLE_WORKER));
        assert!(!can_manage("unknown"));
    }
}
