mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::debt::{DebtScheduleArgs, NextInstallmentArgs};
use commands::inventory::{AverageCostArgs, FifoValueArgs, InventoryValuationArgs};
use commands::reports::{CashFlowArgs, PnlArgs};

/// Debt schedules, inventory costing and finance reports
#[derive(Parser)]
#[command(
    name = "fin",
    version,
    about = "Debt schedules, inventory costing and finance reports",
    long_about = "A CLI for small-business finance calculations with decimal precision. \
                  Builds fixed-payment loan amortization schedules, values inventory \
                  under average-cost and FIFO policies, and buckets transactions into \
                  P&L and daily cash-flow reports."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a fixed-payment (French) amortization schedule
    DebtSchedule(DebtScheduleArgs),
    /// Show the next installment owed on a debt
    NextInstallment(NextInstallmentArgs),
    /// Blended average cost per unit
    AverageCost(AverageCostArgs),
    /// Value a drawdown from the oldest lots first
    FifoValue(FifoValueArgs),
    /// Value an item's lots under its costing method
    InventoryValuation(InventoryValuationArgs),
    /// Profit and loss by category kind
    Pnl(PnlArgs),
    /// Daily signed cash-flow series
    CashFlow(CashFlowArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::DebtSchedule(args) => commands::debt::run_debt_schedule(args),
        Commands::NextInstallment(args) => commands::debt::run_next_installment(args),
        Commands::AverageCost(args) => commands::inventory::run_average_cost(args),
        Commands::FifoValue(args) => commands::inventory::run_fifo_value(args),
        Commands::InventoryValuation(args) => commands::inventory::run_inventory_valuation(args),
        Commands::Pnl(args) => commands::reports::run_pnl(args),
        Commands::CashFlow(args) => commands::reports::run_cash_flow(args),
        Commands::Version => {
            println!("fin {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
