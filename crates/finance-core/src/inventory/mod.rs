pub mod costing;
pub mod valuation;
