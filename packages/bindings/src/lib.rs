use napi::Result as NapiResult;
use napi_derive::napi;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Deserialize the JSON argument, run the computation, serialize the result.
fn call_json<I, O, F>(input_json: &str, f: F) -> NapiResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
    F: FnOnce(&I) -> finance_core::FinanceResult<O>,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = f(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Debts
// ---------------------------------------------------------------------------

#[napi]
pub fn build_debt_schedule(input_json: String) -> NapiResult<String> {
    call_json(&input_json, finance_core::amortization::schedule::amortize_debt)
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

#[napi]
pub fn value_inventory(input_json: String) -> NapiResult<String> {
    call_json(&input_json, finance_core::inventory::valuation::value_inventory)
}

#[napi]
pub fn average_unit_cost(input_json: String) -> NapiResult<String> {
    use finance_core::inventory::costing::{self, AverageCostInput};
    call_json(&input_json, |i: &AverageCostInput| {
        costing::average_unit_cost(i.total_value, i.total_units)
    })
}

#[napi]
pub fn fifo_value(input_json: String) -> NapiResult<String> {
    use finance_core::inventory::costing::{self, FifoInput};
    call_json(&input_json, |i: &FifoInput| {
        costing::fifo_value(&i.lots, i.units_to_value)
    })
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[napi]
pub fn profit_and_loss(input_json: String) -> NapiResult<String> {
    call_json(&input_json, finance_core::reports::pnl::profit_and_loss)
}

#[napi]
pub fn cash_flow(input_json: String) -> NapiResult<String> {
    call_json(&input_json, finance_core::reports::cash_flow::cash_flow)
}
