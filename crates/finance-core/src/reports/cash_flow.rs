//! Daily cash-flow series. Income counts positive, every other
//! transaction kind negative.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::{ReportTransaction, TransactionKind};
use crate::error::FinanceError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FinanceResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowInput {
    /// Inclusive lower bound on transaction date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on transaction date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    pub transactions: Vec<ReportTransaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyFlow {
    pub date: NaiveDate,
    pub amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowOutput {
    /// One entry per day with activity, ascending
    pub series: Vec<DailyFlow>,
    pub net_flow: Money,
}

pub fn cash_flow(input: &CashFlowInput) -> FinanceResult<ComputationOutput<CashFlowOutput>> {
    let start = Instant::now();

    if let (Some(from), Some(to)) = (input.from, input.to) {
        if from > to {
            return Err(FinanceError::InvalidInput {
                field: "from / to".into(),
                reason: format!("Window start {from} is after window end {to}"),
            });
        }
    }

    let mut daily: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for (i, tx) in input.transactions.iter().enumerate() {
        if !in_window(tx.date, input) {
            continue;
        }
        let day = daily.entry(tx.date).or_insert(Decimal::ZERO);
        *day = day
            .checked_add(signed_amount(tx))
            .ok_or_else(|| overflow(&format!("transactions[{i}].amount")))?;
    }

    let series: Vec<DailyFlow> = daily
        .into_iter()
        .map(|(date, amount)| DailyFlow { date, amount })
        .collect();
    let net_flow = series
        .iter()
        .try_fold(Decimal::ZERO, |acc, d| acc.checked_add(d.amount))
        .ok_or_else(|| overflow("transactions"))?;

    let output = CashFlowOutput { series, net_flow };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Daily signed cash flow",
        &serde_json::json!({ "from": input.from, "to": input.to }),
        Vec::new(),
        elapsed,
        output,
    ))
}

fn signed_amount(tx: &ReportTransaction) -> Money {
    match tx.kind {
        TransactionKind::Income => tx.amount,
        TransactionKind::Expense | TransactionKind::Transfer => -tx.amount,
    }
}

fn overflow(field: &str) -> FinanceError {
    FinanceError::InvalidInput {
        field: field.into(),
        reason: "Total too large to report without overflow".into(),
    }
}

fn in_window(date: NaiveDate, input: &CashFlowInput) -> bool {
    input.from.map_or(true, |from| date >= from) && input.to.map_or(true, |to| date <= to)
}
