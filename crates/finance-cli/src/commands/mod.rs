pub mod debt;
pub mod inventory;
pub mod reports;
