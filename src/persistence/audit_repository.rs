//! Proposal Audit Repository
//!
//! Persists finished proposal audits so staff can review pricing
//! history per project.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use tracing::{debug, error};

use super::models::ProposalAuditRecord;
use super::{DatabaseError, DbPool};
use crate::domain::services::audit::ProposalAudit;

/// Audit history repository trait
#[async_trait]
pub trait ProposalAuditRepository: Send + Sync {
    async fn save_audit(&self, audit: &ProposalAudit) -> Result<i64, DatabaseError>;
    async fn get_audit(&self, id: i64) -> Result<Option<ProposalAuditRecord>, DatabaseError>;
    async fn get_recent_audits(&self, limit: u32)
        -> Result<Vec<ProposalAuditRecord>, DatabaseError>;
}

/// SQLite implementation of the audit history repository
pub struct SqliteProposalAuditRepository {
    pool: DbPool,
}

impl SqliteProposalAuditRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProposalAuditRepository for SqliteProposalAuditRepository {
    async fn save_audit(&self, audit: &ProposalAudit) -> Result<i64, DatabaseError> {
        let internal_json = serde_json::to_string(&audit.internal)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;
        let client_summary_json = serde_json::to_string(&audit.client_summary)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

        let result = sqlx::query(
            r#"
            INSERT INTO proposal_audits (
                proposal_name, customer, screen_count, total_cost,
                final_client_total, internal_json, client_summary_json, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&audit.internal.proposal_name)
        .bind(&audit.internal.customer)
        .bind(audit.internal.screens.len() as i64)
        .bind(audit.internal.total_cost.value().to_string())
        .bind(audit.internal.final_client_total.value().to_string())
        .bind(&internal_json)
        .bind(&client_summary_json)
        .bind(audit.internal.generated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to save proposal audit: {}", e);
            DatabaseError::QueryError(format!("Failed to save proposal audit: {}", e))
        })?;

        let id = result.last_insert_rowid();
        debug!(
            audit_id = id,
            proposal = %audit.internal.proposal_name,
            "Saved proposal audit"
        );
        Ok(id)
    }

    async fn get_audit(&self, id: i64) -> Result<Option<ProposalAuditRecord>, DatabaseError> {
        let row = sqlx::query(
            r#"
            SELECT id, proposal_name, customer, screen_count, total_cost,
                   final_client_total, internal_json, client_summary_json, created_at
            FROM proposal_audits
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to get proposal audit {}: {}", id, e);
            DatabaseError::QueryError(format!("Failed to get proposal audit: {}", e))
        })?;

        Ok(row.map(|row| record_from_row(&row)))
    }

    async fn get_recent_audits(
        &self,
        limit: u32,
    ) -> Result<Vec<ProposalAuditRecord>, DatabaseError> {
        let rows = sqlx::query(
            r#"
            SELECT id, proposal_name, customer, screen_count, total_cost,
                   final_client_total, internal_json, client_summary_json, created_at
            FROM proposal_audits
            ORDER BY created_at DESC
            LIMIT ?1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to list proposal audits: {}", e);
            DatabaseError::QueryError(format!("Failed to list proposal audits: {}", e))
        })?;

        Ok(rows.iter().map(record_from_row).collect())
    }
}

fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> ProposalAuditRecord {
    let created_at: DateTime<Utc> = row.get("created_at");
    ProposalAuditRecord {
        id: row.get("id"),
        proposal_name: row.get("proposal_name"),
        customer: row.get("customer"),
        screen_count: row.get("screen_count"),
        total_cost: row.get("total_cost"),
        final_client_total: row.get("final_client_total"),
        internal_json: row.get("internal_json"),
        client_summary_json: row.get("client_summary_json"),
        created_at,
    }
}
