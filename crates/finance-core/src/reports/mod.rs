pub mod cash_flow;
pub mod pnl;
pub mod transaction;
