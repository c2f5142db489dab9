//! Profit and loss bucketing.
//!
//! Amounts are summed per category kind exactly as stored, then
//! `net_income = income - cogs - opex - interest - tax`.

use std::time::Instant;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::{CategoryKind, ReportTransaction};
use crate::error::FinanceError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FinanceResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PnlInput {
    /// Month to report on as `YYYY-MM`; every transaction is included when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    pub transactions: Vec<ReportTransaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnlOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    pub income: Money,
    pub cogs: Money,
    pub opex: Money,
    pub interest: Money,
    pub tax: Money,
    pub net_income: Money,
    /// Transactions that fell in the period
    pub transactions_counted: usize,
}

pub fn profit_and_loss(input: &PnlInput) -> FinanceResult<ComputationOutput<PnlOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let month = input.period.as_deref().map(parse_period).transpose()?;

    let mut income = Decimal::ZERO;
    let mut cogs = Decimal::ZERO;
    let mut opex = Decimal::ZERO;
    let mut interest = Decimal::ZERO;
    let mut tax = Decimal::ZERO;
    let mut counted = 0usize;
    let mut uncategorised = 0usize;

    for (i, tx) in input.transactions.iter().enumerate() {
        if let Some(first) = month {
            if !same_month(tx.date, first) {
                continue;
            }
        }
        counted += 1;
        let bucket = match tx.category_kind {
            Some(CategoryKind::Income) => &mut income,
            Some(CategoryKind::Cogs) => &mut cogs,
            Some(CategoryKind::Opex) => &mut opex,
            Some(CategoryKind::Interest) => &mut interest,
            Some(CategoryKind::Tax) => &mut tax,
            None => {
                uncategorised += 1;
                continue;
            }
        };
        *bucket = bucket
            .checked_add(tx.amount)
            .ok_or_else(|| overflow(&format!("transactions[{i}].amount")))?;
    }

    let net_income = [cogs, opex, interest, tax]
        .into_iter()
        .try_fold(income, |acc, cost| acc.checked_sub(cost))
        .ok_or_else(|| overflow("transactions"))?;

    if uncategorised > 0 {
        warnings.push(format!(
            "{uncategorised} transaction(s) without a category kind excluded from P&L"
        ));
    }

    let output = PnlOutput {
        period: input.period.clone(),
        income,
        cogs,
        opex,
        interest,
        tax,
        net_income,
        transactions_counted: counted,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "P&L by category kind",
        &serde_json::json!({ "period": input.period }),
        warnings,
        elapsed,
        output,
    ))
}

/// First day of a `YYYY-MM` period.
fn parse_period(period: &str) -> FinanceResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{period}-01"), "%Y-%m-%d").map_err(|e| {
        FinanceError::InvalidInput {
            field: "period".into(),
            reason: format!("Expected YYYY-MM, got '{period}': {e}"),
        }
    })
}

fn overflow(field: &str) -> FinanceError {
    FinanceError::InvalidInput {
        field: field.into(),
        reason: "Total too large to report without overflow".into(),
    }
}

fn same_month(date: NaiveDate, first: NaiveDate) -> bool {
    date.year() == first.year() && date.month() == first.month()
}
