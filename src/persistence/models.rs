//! Database Models
//!
//! Persistent row shapes for the proposal audit history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Saved proposal audit record.
///
/// Decimal totals are stored as text to keep cents-exact values out of
/// SQLite's float affinity; the full audit payloads live in JSON
/// columns.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProposalAuditRecord {
    pub id: i64,
    pub proposal_name: String,
    pub customer: Option<String>,
    pub screen_count: i64,
    pub total_cost: String,
    pub final_client_total: String,
    pub internal_json: String,
    pub client_summary_json: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serde_round_trip() {
        let record = ProposalAuditRecord {
            id: 1,
            proposal_name: "Arena".to_string(),
            customer: None,
            screen_count: 2,
            total_cost: "251000.00".to_string(),
            final_client_total: "370000.12".to_string(),
            internal_json: "{}".to_string(),
            client_summary_json: "{}".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: ProposalAuditRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.proposal_name, record.proposal_name);
        assert_eq!(back.total_cost, record.total_cost);
    }
}
