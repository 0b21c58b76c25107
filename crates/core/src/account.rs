//! Cuenta corriente: charges billed to a project against payments received.

use rust_decimal::Decimal;
use serde::Serialize;

/// Totals for one project over one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountTotals {
    pub lease_charges: Decimal,
    pub delivery_charges: Decimal,
    pub labor_charges: Decimal,
    pub total_charges: Decimal,
    pub total_payments: Decimal,
    /// Positive when the client still owes money.
    pub balance: Decimal,
}

impl AccountTotals {
    pub fn new(
        lease_charges: Decimal,
        delivery_charges: Decimal,
        labor_charges: Decimal,
        total_payments: Decimal,
    ) -> Self {
        let total_charges = lease_charges + delivery_charges + labor_charges;
        Self {
            lease_charges,
            delivery_charges,
            labor_charges,
            total_charges,
            total_payments,
            balance: total_charges - total_payments,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.balance <= Decimal::ZERO
    }
}
