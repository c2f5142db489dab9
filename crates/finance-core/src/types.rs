use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.01 = 1% per period).
pub type Rate = Decimal;

/// Rates expressed as percentages (12.5 = 12.5% per year), as entered by users.
pub type Percent = Decimal;

/// Inventory quantities. Fractional units (kg, litres) are allowed.
pub type Units = Decimal;

/// Number of decimal places every reported money figure is rounded to.
pub const CENT_PLACES: u32 = 2;

/// Round to cents, halves away from zero, always carrying two decimal
/// places so whole amounts serialize as `"50.00"`.
///
/// Reported figures are rounded independently of one another; running
/// balances are never fed back through this function.
pub fn round_cents(value: Decimal) -> Money {
    let mut cents =
        value.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(CENT_PLACES);
    cents
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_cents_midpoint_goes_up() {
        assert_eq!(round_cents(dec!(2.345)), dec!(2.35));
        assert_eq!(round_cents(dec!(2.344999)), dec!(2.34));
        assert_eq!(round_cents(dec!(100)), dec!(100));
    }

    #[test]
    fn test_round_cents_always_two_places() {
        assert_eq!(round_cents(Decimal::ZERO).to_string(), "0.00");
        assert_eq!(round_cents(dec!(50)).to_string(), "50.00");
        assert_eq!(round_cents(dec!(3.1)).to_string(), "3.10");
        assert_eq!(
            serde_json::to_value(round_cents(dec!(336.6649))).unwrap(),
            serde_json::json!("336.66")
        );
    }

    #[test]
    fn test_with_metadata_carries_warnings() {
        let out = with_metadata(
            "test",
            &serde_json::json!({ "x": 1 }),
            vec!["careful".to_string()],
            7,
            dec!(1.5),
        );
        assert_eq!(out.warnings, vec!["careful".to_string()]);
        assert_eq!(out.metadata.computation_time_us, 7);
        assert_eq!(out.assumptions["x"], 1);
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }
}
