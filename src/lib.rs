//! LEDQUOTE Proposal Pricing Library
//!
//! Core components for pricing LED display sales proposals: per-screen
//! cost breakdowns, divisor-model margin projection, an auditable
//! half-to-even rounding ledger, client-safe sanitization, and keyword
//! triage of RFP page text.

pub mod application;
pub mod config;
pub mod domain;
pub mod persistence;
