pub mod audit;
pub mod costing;
pub mod price_projector;
pub mod rounding_ledger;
pub mod sanitizer;
pub mod triage;
