//! Inventory valuation under an item's configured costing method.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::costing::{average_unit_cost, draw_fifo, on_hand_totals, validate_lots, InventoryLot};
use crate::types::{round_cents, with_metadata, ComputationOutput, Money, Units};
use crate::FinanceResult;

/// Costing method recorded on an inventory item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValuationMethod {
    /// Weighted-average cost of all units on hand
    #[default]
    #[serde(alias = "AVG")]
    Average,
    /// Oldest lots are drawn first
    Fifo,
}

/// Lots held for an item plus the method to value them with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryValuationInput {
    #[serde(default)]
    pub method: ValuationMethod,
    /// Lots, oldest first
    pub lots: Vec<InventoryLot>,
    /// Units to value under FIFO; all units on hand when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units_to_value: Option<Units>,
}

/// Outcome of a single costing method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ValuationResult {
    AverageCost { unit_cost: Money },
    FifoValue { total_value: Money, units_valued: Units },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryValuation {
    pub valuation: ValuationResult,
    /// Sum of lot quantities
    pub units_on_hand: Units,
    /// Sum of quantity * unit cost across lots, rounded to cents
    pub on_hand_value: Money,
}

/// Value an item's lots under its costing method.
pub fn value_inventory(
    input: &InventoryValuationInput,
) -> FinanceResult<ComputationOutput<InventoryValuation>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_lots(&input.lots)?;

    let (units_on_hand, raw_value) = on_hand_totals(&input.lots)?;

    let (valuation, methodology) = match input.method {
        ValuationMethod::Average => {
            if units_on_hand.is_zero() {
                warnings.push("No units on hand; average unit cost reported as zero".into());
            }
            let unit_cost = average_unit_cost(raw_value, units_on_hand)?;
            (
                ValuationResult::AverageCost { unit_cost },
                "Weighted-average cost",
            )
        }
        ValuationMethod::Fifo => {
            let requested = input.units_to_value.unwrap_or(units_on_hand);
            let draw = draw_fifo(&input.lots, requested)?;
            if draw.units < requested {
                warnings.push(format!(
                    "Requested {requested} units but only {} on hand; valued available units only",
                    draw.units
                ));
            }
            (
                ValuationResult::FifoValue {
                    total_value: round_cents(draw.cost),
                    units_valued: draw.units,
                },
                "FIFO (oldest lots first)",
            )
        }
    };

    let output = InventoryValuation {
        valuation,
        units_on_hand,
        on_hand_value: round_cents(raw_value),
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(methodology, input, warnings, elapsed, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinanceError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn lots() -> Vec<InventoryLot> {
        vec![
            InventoryLot {
                quantity: dec!(10),
                unit_cost: dec!(5),
            },
            InventoryLot {
                quantity: dec!(30),
                unit_cost: dec!(7),
            },
        ]
    }

    #[test]
    fn test_average_method() {
        let input = InventoryValuationInput {
            method: ValuationMethod::Average,
            lots: lots(),
            units_to_value: None,
        };
        let out = value_inventory(&input).unwrap();
        // (50 + 210) / 40 = 6.5
        assert_eq!(
            out.result.valuation,
            ValuationResult::AverageCost {
                unit_cost: dec!(6.50)
            }
        );
        assert_eq!(out.result.units_on_hand, dec!(40));
        assert_eq!(out.result.on_hand_value, dec!(260));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_average_method_without_stock_warns() {
        let input = InventoryValuationInput {
            method: ValuationMethod::Average,
            lots: vec![],
            units_to_value: None,
        };
        let out = value_inventory(&input).unwrap();
        assert_eq!(
            out.result.valuation,
            ValuationResult::AverageCost {
                unit_cost: Decimal::ZERO
            }
        );
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_fifo_method_defaults_to_all_units() {
        let input = InventoryValuationInput {
            method: ValuationMethod::Fifo,
            lots: lots(),
            units_to_value: None,
        };
        let out = value_inventory(&input).unwrap();
        assert_eq!(
            out.result.valuation,
            ValuationResult::FifoValue {
                total_value: dec!(260),
                units_valued: dec!(40)
            }
        );
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_fifo_method_over_request_warns() {
        let input = InventoryValuationInput {
            method: ValuationMethod::Fifo,
            lots: lots(),
            units_to_value: Some(dec!(45)),
        };
        let out = value_inventory(&input).unwrap();
        assert_eq!(
            out.result.valuation,
            ValuationResult::FifoValue {
                total_value: dec!(260),
                units_valued: dec!(40)
            }
        );
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("45"));
    }

    #[test]
    fn test_negative_lot_rejected() {
        let input = InventoryValuationInput {
            method: ValuationMethod::Average,
            lots: vec![InventoryLot {
                quantity: dec!(1),
                unit_cost: dec!(-2),
            }],
            units_to_value: None,
        };
        assert!(matches!(
            value_inventory(&input),
            Err(FinanceError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_on_hand_overflow_is_an_error_not_a_panic() {
        let huge = |quantity, unit_cost| InventoryLot {
            quantity,
            unit_cost,
        };
        for (lots, field) in [
            (vec![huge(Decimal::MAX, dec!(2))], "lots[0]"),
            (
                vec![huge(Decimal::MAX, Decimal::ZERO), huge(dec!(1), Decimal::ZERO)],
                "lots[1].quantity",
            ),
        ] {
            let input = InventoryValuationInput {
                method: ValuationMethod::Fifo,
                lots,
                units_to_value: None,
            };
            match value_inventory(&input) {
                Err(FinanceError::InvalidInput { field: got, .. }) => assert_eq!(got, field),
                other => panic!("Expected InvalidInput, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_method_parses_stored_names() {
        let avg: ValuationMethod = serde_json::from_str(r#""AVG""#).unwrap();
        let average: ValuationMethod = serde_json::from_str(r#""AVERAGE""#).unwrap();
        let fifo: ValuationMethod = serde_json::from_str(r#""FIFO""#).unwrap();
        assert_eq!(avg, ValuationMethod::Average);
        assert_eq!(average, ValuationMethod::Average);
        assert_eq!(fifo, ValuationMethod::Fifo);
    }
}
