use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finance_core::amortization::calendar;
use finance_core::amortization::schedule::{self, DebtInput};

use crate::input;

/// Loan terms shared by every debt subcommand
#[derive(Args)]
pub struct LoanArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate in percent (e.g. 12.5 for 12.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Number of monthly installments
    #[arg(long, alias = "term")]
    pub term_months: Option<u32>,

    /// Disbursement date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Display name of the debt
    #[arg(long)]
    pub name: Option<String>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for building a debt amortization schedule
#[derive(Args)]
pub struct DebtScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Only list installments due on or after this date
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Only list installments due on or before this date
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

/// Arguments for looking up the next installment owed
#[derive(Args)]
pub struct NextInstallmentArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

pub fn run_debt_schedule(args: DebtScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let debt_input = debt_input(&args.loan)?;
    let mut output = schedule::amortize_debt(&debt_input)?;

    if args.from.is_some() || args.to.is_some() {
        let from = args.from.unwrap_or(NaiveDate::MIN);
        let to = args.to.unwrap_or(NaiveDate::MAX);
        output.result.rows = calendar::installments_between(&output.result.rows, from, to)
            .into_iter()
            .cloned()
            .collect();
    }

    Ok(serde_json::to_value(output)?)
}

pub fn run_next_installment(args: NextInstallmentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let debt_input = debt_input(&args.loan)?;
    let as_of = args.as_of.unwrap_or_else(today);
    let sched = schedule::build_schedule(
        debt_input.principal,
        debt_input.annual_rate_percent,
        debt_input.term_months,
        debt_input.start_date,
    )?;

    match calendar::next_installment(&sched.rows, as_of) {
        Some(row) => Ok(serde_json::to_value(row)?),
        None => Err(format!("No installment due on or after {as_of}; debt has matured").into()),
    }
}

fn debt_input(args: &LoanArgs) -> Result<DebtInput, Box<dyn std::error::Error>> {
    if let Some(debt) = input::load::<DebtInput>(args.input.as_deref())? {
        return Ok(debt);
    }
    Ok(DebtInput {
        name: args.name.clone(),
        principal: args
            .principal
            .ok_or("--principal is required (or provide --input)")?,
        annual_rate_percent: args
            .annual_rate
            .ok_or("--annual-rate is required (or provide --input)")?,
        term_months: args
            .term_months
            .ok_or("--term-months is required (or provide --input)")?,
        start_date: args.start_date.unwrap_or_else(today),
    })
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
