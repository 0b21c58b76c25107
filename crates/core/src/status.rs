//! Accepted values for the enumerated text columns.
//!
//! These must match the CHECK constraints in `db/migrations`.

pub const PROJECT_ACTIVE: &str = "active";
pub const PROJECT_PAUSED: &str = "paused";
pub const PROJECT_CLOSED: &str = "closed";

pub const VALID_PROJECT_STATUSES: &[&str] = &[PROJECT_ACTIVE, PROJECT_PAUSED, PROJECT_CLOSED];

pub const MACHINE_AVAILABLE: &str = "available";
pub const MACHINE_IN_USE: &str = "in_use";
pub const MACHINE_MAINTENANCE: &str = "maintenance";
pub const MACHINE_RETIRED: &str = "retired";

pub const VALID_MACHINE_STATUSES: &[&str] = &[
    MACHINE_AVAILABLE,
    MACHINE_IN_USE,
    MACHINE_MAINTENANCE,
    MACHINE_RETIRED,
];

pub const CONTRACT_DRAFT: &str = "draft";
pub const CONTRACT_ACTIVE: &str = "active";
pub const CONTRACT_FINISHED: &str = "finished";
pub const CONTRACT_CANCELLED: &str = "cancelled";

pub const VALID_CONTRACT_STATUSES: &[&str] = &[
    CONTRACT_DRAFT,
    CONTRACT_ACTIVE,
    CONTRACT_FINISHED,
    CONTRACT_CANCELLED,
];

pub const PAYMENT_TRANSFER: &str = "transfer";
pub const PAYMENT_CHECK: &str = "check";
pub const PAYMENT_CASH: &str = "cash";

pub const VALID_PAYMENT_METHODS: &[&str] = &[PAYMENT_TRANSFER, PAYMENT_CHECK, PAYMENT_CASH];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lists_have_no_duplicates() {
        for list in [
            VALID_PROJECT_STATUSES,
            VALID_MACHINE_STATUSES,
            VALID_CONTRACT_STATUSES,
            VALID_PAYMENT_METHODS,
        ] {
            let mut sorted = list.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), list.len());
        }
    }
}
