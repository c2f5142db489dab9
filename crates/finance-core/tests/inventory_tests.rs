use finance_core::inventory::costing::{self, InventoryLot};
use finance_core::inventory::valuation::{self, InventoryValuationInput, ValuationMethod, ValuationResult};
use finance_core::FinanceError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn lot(quantity: Decimal, unit_cost: Decimal) -> InventoryLot {
    InventoryLot {
        quantity,
        unit_cost,
    }
}

// ===========================================================================
// Average cost
// ===========================================================================

#[test]
fn test_average_cost_zero_guard() {
    assert_eq!(costing::average_unit_cost(dec!(500), dec!(0)).unwrap(), dec!(0));
}

#[test]
fn test_average_cost_known_answer() {
    // 1,234.56 across 7 units = 176.3657...
    assert_eq!(
        costing::average_unit_cost(dec!(1234.56), dec!(7)).unwrap(),
        dec!(176.37)
    );
}

// ===========================================================================
// FIFO
// ===========================================================================

#[test]
fn test_fifo_partial_exhaustion() {
    let lots = vec![lot(dec!(10), dec!(5))];
    assert_eq!(
        costing::fifo_value(&lots, dec!(15)).unwrap(),
        (dec!(10) * dec!(5)).round_dp(2)
    );
}

#[test]
fn test_fifo_across_purchases() {
    let lots = vec![
        lot(dec!(100), dec!(12.40)),
        lot(dec!(50), dec!(13.10)),
        lot(dec!(80), dec!(12.95)),
    ];
    // 100 * 12.40 + 50 * 13.10 + 10 * 12.95
    assert_eq!(costing::fifo_value(&lots, dec!(160)).unwrap(), dec!(2024.50));
}

#[test]
fn test_fifo_negative_input_rejected() {
    let lots = vec![lot(dec!(10), dec!(-5))];
    assert!(matches!(
        costing::fifo_value(&lots, dec!(1)),
        Err(FinanceError::InvalidInput { .. })
    ));
}

// ===========================================================================
// Item valuation envelope
// ===========================================================================

#[test]
fn test_value_inventory_from_stored_item() {
    let payload = r#"{
        "method": "FIFO",
        "lots": [
            { "quantity": "20", "cost": "3.50" },
            { "quantity": "5", "cost": "4.00" }
        ],
        "units_to_value": "22"
    }"#;
    let input: InventoryValuationInput = serde_json::from_str(payload).unwrap();
    assert_eq!(input.method, ValuationMethod::Fifo);

    let out = valuation::value_inventory(&input).unwrap();
    assert_eq!(
        out.result.valuation,
        ValuationResult::FifoValue {
            total_value: dec!(78.00),
            units_valued: dec!(22),
        }
    );
    assert_eq!(out.result.units_on_hand, dec!(25));
    assert_eq!(out.result.on_hand_value, dec!(90.00));
    assert!(out.warnings.is_empty());
}

#[test]
fn test_value_inventory_average_default_method() {
    let payload = r#"{ "lots": [ { "quantity": "3", "unit_cost": "10" }, { "quantity": "1", "unit_cost": "14" } ] }"#;
    let input: InventoryValuationInput = serde_json::from_str(payload).unwrap();
    let out = valuation::value_inventory(&input).unwrap();
    assert_eq!(
        out.result.valuation,
        ValuationResult::AverageCost {
            unit_cost: dec!(11.00)
        }
    );
    assert_eq!(out.methodology, "Weighted-average cost");
}
