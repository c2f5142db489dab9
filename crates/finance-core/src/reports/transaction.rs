use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Direction of a transaction as recorded against an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
}

/// Income-statement line a category rolls up into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryKind {
    Income,
    Cogs,
    Opex,
    Interest,
    Tax,
}

/// A transaction already fetched by the caller, reduced to the fields the
/// report rules read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportTransaction {
    pub date: NaiveDate,
    /// Amount as stored; sign conventions are applied by each report
    pub amount: Money,
    #[serde(rename = "type", alias = "kind")]
    pub kind: TransactionKind,
    #[serde(default, alias = "categoryKind", skip_serializing_if = "Option::is_none")]
    pub category_kind: Option<CategoryKind>,
}
