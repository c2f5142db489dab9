use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use finance_core::inventory::costing::{self, AverageCostInput, FifoInput, InventoryLot};
use finance_core::inventory::valuation::{self, InventoryValuationInput, ValuationMethod};

use crate::input;

/// Arguments for average unit cost
#[derive(Args)]
pub struct AverageCostArgs {
    /// Total carried value of the stock
    #[arg(long)]
    pub total_value: Option<Decimal>,

    /// Units on hand
    #[arg(long)]
    pub total_units: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for FIFO valuation of a drawdown
#[derive(Args)]
pub struct FifoValueArgs {
    /// Purchase lot as QUANTITY@UNIT_COST, oldest first; repeatable
    #[arg(long = "lot", value_parser = parse_lot)]
    pub lots: Vec<InventoryLot>,

    /// Units to draw and value
    #[arg(long)]
    pub units: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for valuing an item's lots under its costing method
#[derive(Args)]
pub struct InventoryValuationArgs {
    /// Path to JSON/YAML input file with method and lots
    #[arg(long)]
    pub input: Option<String>,

    /// Override the costing method recorded in the input
    #[arg(long)]
    pub method: Option<MethodArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    Average,
    Fifo,
}

impl From<MethodArg> for ValuationMethod {
    fn from(m: MethodArg) -> Self {
        match m {
            MethodArg::Average => ValuationMethod::Average,
            MethodArg::Fifo => ValuationMethod::Fifo,
        }
    }
}

pub fn run_average_cost(args: AverageCostArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let avg_input = match input::load::<AverageCostInput>(args.input.as_deref())? {
        Some(i) => i,
        None => AverageCostInput {
            total_value: args
                .total_value
                .ok_or("--total-value is required (or provide --input)")?,
            total_units: args
                .total_units
                .ok_or("--total-units is required (or provide --input)")?,
        },
    };
    let unit_cost = costing::average_unit_cost(avg_input.total_value, avg_input.total_units)?;
    Ok(json!({ "unit_cost": unit_cost.to_string() }))
}

pub fn run_fifo_value(args: FifoValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fifo_input = match input::load::<FifoInput>(args.input.as_deref())? {
        Some(i) => i,
        None => FifoInput {
            units_to_value: args
                .units
                .ok_or("--units is required (or provide --input)")?,
            lots: args.lots,
        },
    };
    let total_value = costing::fifo_value(&fifo_input.lots, fifo_input.units_to_value)?;
    Ok(json!({
        "total_value": total_value.to_string(),
        "units_to_value": fifo_input.units_to_value.to_string(),
    }))
}

pub fn run_inventory_valuation(
    args: InventoryValuationArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut val_input: InventoryValuationInput =
        input::require(args.input.as_deref(), "inventory valuation")?;
    if let Some(method) = args.method {
        val_input.method = method.into();
    }
    let result = valuation::value_inventory(&val_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Parse `QUANTITY@UNIT_COST`, e.g. `10@5.25`.
fn parse_lot(s: &str) -> Result<InventoryLot, String> {
    let (qty, cost) = s
        .split_once('@')
        .ok_or_else(|| format!("expected QUANTITY@UNIT_COST, got '{s}'"))?;
    let quantity = qty
        .trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid lot quantity '{qty}': {e}"))?;
    let unit_cost = cost
        .trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid lot unit cost '{cost}': {e}"))?;
    Ok(InventoryLot {
        quantity,
        unit_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lot() {
        let lot = parse_lot("10@5.25").unwrap();
        assert_eq!(lot.quantity, Decimal::from(10));
        assert_eq!(lot.unit_cost, "5.25".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_parse_lot_rejects_missing_separator() {
        assert!(parse_lot("10x5").is_err());
        assert!(parse_lot("ten@5").is_err());
    }
}
