//! Inventory costing primitives: blended average unit cost and FIFO
//! valuation of a drawdown against lots held oldest first.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::types::{round_cents, Money, Units};
use crate::FinanceResult;

/// A purchase lot. Sequences of lots are ordered oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLot {
    /// Units acquired in this lot
    pub quantity: Units,
    /// Cost per unit
    #[serde(alias = "cost")]
    pub unit_cost: Money,
}

/// Inputs for [`average_unit_cost`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AverageCostInput {
    pub total_value: Money,
    pub total_units: Units,
}

/// Inputs for [`fifo_value`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FifoInput {
    pub lots: Vec<InventoryLot>,
    pub units_to_value: Units,
}

/// Result of walking lots oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FifoDraw {
    /// Unrounded cost of the units taken
    pub cost: Money,
    /// Units actually taken; below the request when stock runs out
    pub units: Units,
}

/// Blended cost per unit, rounded to cents.
///
/// Zero units yields a unit cost of zero rather than an error.
pub fn average_unit_cost(total_value: Money, total_units: Units) -> FinanceResult<Money> {
    non_negative("total_value", total_value)?;
    non_negative("total_units", total_units)?;

    if total_units.is_zero() {
        return Ok(round_cents(Decimal::ZERO));
    }
    let unit_cost = total_value
        .checked_div(total_units)
        .ok_or_else(|| overflow("total_value"))?;
    Ok(round_cents(unit_cost))
}

/// Cost of `units_to_value` units drawn from the oldest lots first,
/// rounded to cents.
///
/// Requests beyond the units held value only what exists.
pub fn fifo_value(lots: &[InventoryLot], units_to_value: Units) -> FinanceResult<Money> {
    let draw = draw_fifo(lots, units_to_value)?;
    Ok(round_cents(draw.cost))
}

pub(crate) fn draw_fifo(lots: &[InventoryLot], units_to_value: Units) -> FinanceResult<FifoDraw> {
    non_negative("units_to_value", units_to_value)?;
    validate_lots(lots)?;

    let mut remaining = units_to_value;
    let mut cost = Decimal::ZERO;

    for (i, lot) in lots.iter().enumerate() {
        if remaining <= Decimal::ZERO {
            break;
        }
        let take = lot.quantity.min(remaining);
        cost = take
            .checked_mul(lot.unit_cost)
            .and_then(|lot_cost| cost.checked_add(lot_cost))
            .ok_or_else(|| overflow(&format!("lots[{i}]")))?;
        remaining -= take;
    }

    Ok(FifoDraw {
        cost,
        units: units_to_value - remaining,
    })
}

/// Units held and their carried cost (unrounded) across all lots.
pub(crate) fn on_hand_totals(lots: &[InventoryLot]) -> FinanceResult<(Units, Money)> {
    let mut units = Decimal::ZERO;
    let mut value = Decimal::ZERO;
    for (i, lot) in lots.iter().enumerate() {
        units = units
            .checked_add(lot.quantity)
            .ok_or_else(|| overflow(&format!("lots[{i}].quantity")))?;
        value = lot
            .quantity
            .checked_mul(lot.unit_cost)
            .and_then(|lot_cost| value.checked_add(lot_cost))
            .ok_or_else(|| overflow(&format!("lots[{i}]")))?;
    }
    Ok((units, value))
}

pub(crate) fn validate_lots(lots: &[InventoryLot]) -> FinanceResult<()> {
    for (i, lot) in lots.iter().enumerate() {
        non_negative(&format!("lots[{i}].quantity"), lot.quantity)?;
        non_negative(&format!("lots[{i}].unit_cost"), lot.unit_cost)?;
    }
    Ok(())
}

fn overflow(field: &str) -> FinanceError {
    FinanceError::InvalidInput {
        field: field.into(),
        reason: "Value too large to cost without overflow".into(),
    }
}

fn non_negative(field: &str, value: Decimal) -> FinanceResult<()> {
    if value < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: field.into(),
            reason: format!("Must not be negative, got {value}"),
        });
    }
    Ok(())
}
