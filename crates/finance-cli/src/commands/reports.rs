use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;

use finance_core::reports::cash_flow::{self, CashFlowInput};
use finance_core::reports::pnl::{self, PnlInput};

use crate::input;

/// Arguments for the profit and loss statement
#[derive(Args)]
pub struct PnlArgs {
    /// Path to JSON/YAML input file with transactions
    #[arg(long)]
    pub input: Option<String>,

    /// Month to report on (YYYY-MM); overrides the input's period
    #[arg(long)]
    pub period: Option<String>,
}

/// Arguments for the daily cash-flow series
#[derive(Args)]
pub struct CashFlowArgs {
    /// Path to JSON/YAML input file with transactions
    #[arg(long)]
    pub input: Option<String>,

    /// First day of the window (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day of the window (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

pub fn run_pnl(args: PnlArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut pnl_input: PnlInput = input::require(args.input.as_deref(), "P&L")?;
    if args.period.is_some() {
        pnl_input.period = args.period;
    }
    let result = pnl::profit_and_loss(&pnl_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_cash_flow(args: CashFlowArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut cf_input: CashFlowInput = input::require(args.input.as_deref(), "cash flow")?;
    if args.from.is_some() {
        cf_input.from = args.from;
    }
    if args.to.is_some() {
        cf_input.to = args.to;
    }
    let result = cash_flow::cash_flow(&cf_input)?;
    Ok(serde_json::to_value(result)?)
}
