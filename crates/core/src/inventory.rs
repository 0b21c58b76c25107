//! Inventory movement rules.
//!
//! A movement either adds stock (`in`), removes it (`out`) or overwrites the
//! counted stock (`adjustment`, after a physical count).

use rust_decimal::Decimal;

use crate::error::CoreError;

pub const MOVEMENT_IN: &str = "in";
pub const MOVEMENT_OUT: &str = "out";
pub const MOVEMENT_ADJUSTMENT: &str = "adjustment";

/// All valid `inventory_movements.movement_type` values.
pub const VALID_MOVEMENT_TYPES: &[&str] = &[MOVEMENT_IN, MOVEMENT_OUT, MOVEMENT_ADJUSTMENT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementType {
    In,
    Out,
    Adjustment,
}

impl MovementType {
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            MOVEMENT_IN => Ok(MovementType::In),
            MOVEMENT_OUT => Ok(MovementType::Out),
            MOVEMENT_ADJUSTMENT => Ok(MovementType::Adjustment),
            other => Err(CoreError::Validation(format!(
                "Invalid movement_type '{other}'. Must be one of: {}",
                VALID_MOVEMENT_TYPES.join(", ")
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MovementType::In => MOVEMENT_IN,
            MovementType::Out => MOVEMENT_OUT,
            MovementType::Adjustment => MOVEMENT_ADJUSTMENT,
        }
    }
}

/// Stock level after applying a movement of `quantity` to `current`.
pub fn apply_movement(
    current: Decimal,
    movement: MovementType,
    quantity: Decimal,
) -> Result<Decimal, CoreError> {
    match movement {
        MovementType::Adjustment => {
            if quantity < Decimal::ZERO {
                return Err(CoreError::Validation(
                    "Adjusted stock must not be negative".into(),
                ));
            }
            Ok(quantity)
        }
        MovementType::In | MovementType::Out if quantity <= Decimal::ZERO => Err(
            CoreError::Validation("Movement quantity must be greater than zero".into()),
        ),
        MovementType::In => Ok(current + quantity),
        MovementType::Out => {
            if quantity > current {
                return Err(CoreError::Conflict(format!(
                    "Insufficient stock: {current} available, {quantity} requested"
                )));
            }
            Ok(current - quantity)
        }
    }
}

/// Whether a product has fallen to or below its reorder level.
pub fn is_low_stock(stock: Decimal, min_stock: Decimal) -> bool {
    stock <= min_stock
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_known_types() {
        for t in VALID_MOVEMENT_TYPES {
            assert_eq!(MovementType::parse(t).unwrap().as_str(), *t);
        }
    }

    #[test]
    fn parse_unknown_type_is_validation_error() {
        assert_matches!(MovementType::parse("transfer"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn in_adds_stock() {
        assert_eq!(
            apply_movement(dec!(10), MovementType::In, dec!(2.5)).unwrap(),
            dec!(12.5)
        );
    }

    #[test]
    fn out_removes_stock() {
        assert_eq!(
            apply_movement(dec!(10), MovementType::Out, dec!(10)).unwrap(),
            dec!(0)
        );
    }

    #[test]
    fn out_beyond_stock_conflicts() {
        assert_matches!(
            apply_movement(dec!(3), MovementType::Out, dec!(4)),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn zero_quantity_rejected_for_in_and_out() {
        assert_matches!(
            apply_movement(dec!(3), MovementType::In, dec!(0)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            apply_movement(dec!(3), MovementType::Out, dec!(-1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn adjustment_overwrites_stock() {
        assert_eq!(
            apply_movement(dec!(40), MovementType::Adjustment, dec!(0)).unwrap(),
            dec!(0)
        );
        assert_matches!(
            apply_movement(dec!(40), MovementType::Adjustment, dec!(-1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn low_stock_is_inclusive() {
        assert!(is_low_stock(dec!(5), dec!(5)));
        assert!(!is_low_stock(dec!(6), dec!(5)));
    }
}
