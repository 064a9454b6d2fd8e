pub mod cost_breakdown;
pub mod page_triage;
pub mod proposal;
pub mod screen;
