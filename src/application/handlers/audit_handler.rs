use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::ErrorResponse;
use crate::application::AppState;
use crate::domain::entities::proposal::Proposal;
use crate::domain::entities::screen::{Environment, ProductType, ScreenInput, ServiceType};
use crate::domain::services::audit::InternalAudit;
use crate::domain::services::rounding_ledger::DEFAULT_DRIFT_TOLERANCE;
use crate::domain::value_objects::{Margin, ScreenDimensions};

/// One screen line item in an audit request
#[derive(Debug, Serialize, Deserialize)]
pub struct ScreenRequest {
    pub name: String,
    /// video_board | ribbon_board | scoreboard | marquee | digital_signage
    pub product_type: Option<String>,
    pub width_ft: f64,
    pub height_ft: f64,
    pub quantity: u32,
    pub pitch_mm: f64,
    /// indoor | outdoor
    pub environment: Option<String>,
    /// turnkey | supply_only | install_only
    pub service_type: Option<String>,
    /// Profit fraction of sell price, in [0, 1)
    pub desired_margin: f64,
}

/// Request to price a proposal and produce its audit
#[derive(Debug, Serialize, Deserialize)]
pub struct AuditRequest {
    pub proposal_name: String,
    pub customer: Option<String>,
    pub screens: Vec<ScreenRequest>,
}

/// Full audit response: internal view plus the sanitized client view
#[derive(Debug, Serialize, Deserialize)]
pub struct AuditResponse {
    /// History row id; absent when persistence was unavailable
    pub audit_id: Option<i64>,
    pub internal_audit: InternalAudit,
    pub client_summary: Value,
    pub drift_acceptable: bool,
}

/// Query parameters for the audit history endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Results to return (default 10, max 100)
    pub limit: Option<u32>,
}

/// One row of audit history
#[derive(Debug, Serialize, Deserialize)]
pub struct AuditHistoryEntry {
    pub id: i64,
    pub proposal_name: String,
    pub customer: Option<String>,
    pub screen_count: i64,
    pub final_client_total: String,
    pub created_at: DateTime<Utc>,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: String) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: message }),
    )
}

fn unprocessable(message: String) -> HandlerError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse { error: message }),
    )
}

/// Floats are only accepted at this boundary; NaN/infinite input is
/// rejected before any arithmetic instead of being coerced.
fn to_decimal(value: f64, field: &str) -> Result<Decimal, HandlerError> {
    Decimal::from_f64_retain(value)
        .ok_or_else(|| bad_request(format!("{} must be a finite number, got {}", field, value)))
}

fn parse_product_type(value: Option<&str>) -> Result<ProductType, HandlerError> {
    match value.unwrap_or("video_board") {
        "video_board" => Ok(ProductType::VideoBoard),
        "ribbon_board" => Ok(ProductType::RibbonBoard),
        "scoreboard" => Ok(ProductType::Scoreboard),
        "marquee" => Ok(ProductType::Marquee),
        "digital_signage" => Ok(ProductType::DigitalSignage),
        other => Err(bad_request(format!("Unknown product type: {}", other))),
    }
}

fn parse_environment(value: Option<&str>) -> Result<Environment, HandlerError> {
    match value.unwrap_or("indoor") {
        "indoor" => Ok(Environment::Indoor),
        "outdoor" => Ok(Environment::Outdoor),
        other => Err(bad_request(format!("Unknown environment: {}", other))),
    }
}

fn parse_service_type(value: Option<&str>) -> Result<ServiceType, HandlerError> {
    match value.unwrap_or("turnkey") {
        "turnkey" => Ok(ServiceType::Turnkey),
        "supply_only" => Ok(ServiceType::SupplyOnly),
        "install_only" => Ok(ServiceType::InstallOnly),
        other => Err(bad_request(format!("Unknown service type: {}", other))),
    }
}

fn to_screen(request: &ScreenRequest) -> Result<ScreenInput, HandlerError> {
    let dimensions = ScreenDimensions::new(
        to_decimal(request.width_ft, "width_ft")?,
        to_decimal(request.height_ft, "height_ft")?,
        request.quantity,
        to_decimal(request.pitch_mm, "pitch_mm")?,
    )
    .map_err(|e| unprocessable(e.to_string()))?;

    let margin = Margin::new(to_decimal(request.desired_margin, "desired_margin")?)
        .map_err(|e| unprocessable(e.to_string()))?;

    Ok(ScreenInput::new(
        request.name.clone(),
        parse_product_type(request.product_type.as_deref())?,
        dimensions,
        parse_environment(request.environment.as_deref())?,
        parse_service_type(request.service_type.as_deref())?,
        margin,
    ))
}

/// Price a proposal and return its audit
pub async fn audit_proposal(
    State(state): State<AppState>,
    Json(request): Json<AuditRequest>,
) -> Result<Json<AuditResponse>, HandlerError> {
    let mut proposal = Proposal::new(request.proposal_name.clone());
    proposal.customer = request.customer.clone();
    for screen_request in &request.screens {
        proposal.add_screen(to_screen(screen_request)?);
    }

    let audit = state
        .auditor
        .audit(&proposal)
        .map_err(|e| unprocessable(e.to_string()))?;

    // History is best-effort: a storage failure must not lose the
    // audit the caller just computed
    let audit_id = match state.audits.save_audit(&audit).await {
        Ok(id) => Some(id),
        Err(e) => {
            warn!("Failed to persist proposal audit: {}", e);
            None
        }
    };

    let drift_acceptable = audit.internal.rounding.max_abs_drift <= DEFAULT_DRIFT_TOLERANCE;

    Ok(Json(AuditResponse {
        audit_id,
        internal_audit: audit.internal,
        client_summary: audit.client_summary,
        drift_acceptable,
    }))
}

/// List recent audit history
pub async fn list_audits(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<AuditHistoryEntry>>, HandlerError> {
    let limit = params.limit.unwrap_or(10).min(100).max(1);

    let records = state.audits.get_recent_audits(limit).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    Ok(Json(
        records
            .into_iter()
            .map(|record| AuditHistoryEntry {
                id: record.id,
                proposal_name: record.proposal_name,
                customer: record.customer,
                screen_count: record.screen_count,
                final_client_total: record.final_client_total,
                created_at: record.created_at,
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RateConfig;
    use crate::domain::services::audit::ProposalAuditor;
    use crate::domain::services::triage::DocumentTriageService;
    use crate::persistence::audit_repository::SqliteProposalAuditRepository;
    use crate::persistence::init_database;
    use std::sync::Arc;

    async fn test_state() -> AppState {
        let pool = init_database("sqlite::memory:").await.unwrap();
        AppState::new(
            ProposalAuditor::new(RateConfig::default()).unwrap(),
            DocumentTriageService::default(),
            Arc::new(SqliteProposalAuditRepository::new(pool)),
        )
    }

    fn screen_request() -> ScreenRequest {
        ScreenRequest {
            name: "Main Videoboard".to_string(),
            product_type: Some("video_board".to_string()),
            width_ft: 20.0,
            height_ft: 10.0,
            quantity: 1,
            pitch_mm: 4.0,
            environment: Some("indoor".to_string()),
            service_type: Some("turnkey".to_string()),
            desired_margin: 0.25,
        }
    }

    #[tokio::test]
    async fn test_audit_endpoint_success() {
        let state = test_state().await;
        let result = audit_proposal(
            State(state),
            Json(AuditRequest {
                proposal_name: "Arena".to_string(),
                customer: None,
                screens: vec![screen_request()],
            }),
        )
        .await;

        let response = result.unwrap().0;
        assert!(response.audit_id.is_some());
        assert_eq!(response.internal_audit.screens.len(), 1);
        assert!(response.drift_acceptable);
    }

    #[tokio::test]
    async fn test_audit_endpoint_rejects_invalid_margin() {
        let state = test_state().await;
        let mut screen = screen_request();
        screen.desired_margin = 1.0;

        let result = audit_proposal(
            State(state),
            Json(AuditRequest {
                proposal_name: "Arena".to_string(),
                customer: None,
                screens: vec![screen],
            }),
        )
        .await;

        assert_eq!(result.err().unwrap().0, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_audit_endpoint_rejects_non_finite_number() {
        let state = test_state().await;
        let mut screen = screen_request();
        screen.width_ft = f64::NAN;

        let result = audit_proposal(
            State(state),
            Json(AuditRequest {
                proposal_name: "Arena".to_string(),
                customer: None,
                screens: vec![screen],
            }),
        )
        .await;

        assert_eq!(result.err().unwrap().0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_audit_endpoint_rejects_unknown_product_type() {
        let state = test_state().await;
        let mut screen = screen_request();
        screen.product_type = Some("jumbotron".to_string());

        let result = audit_proposal(
            State(state),
            Json(AuditRequest {
                proposal_name: "Arena".to_string(),
                customer: None,
                screens: vec![screen],
            }),
        )
        .await;

        assert_eq!(result.err().unwrap().0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_audit_endpoint_rejects_empty_proposal() {
        let state = test_state().await;
        let result = audit_proposal(
            State(state),
            Json(AuditRequest {
                proposal_name: "Empty".to_string(),
                customer: None,
                screens: vec![],
            }),
        )
        .await;

        assert_eq!(result.err().unwrap().0, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_history_endpoint_pagination_limits() {
        let state = test_state().await;
        let _ = audit_proposal(
            State(state.clone()),
            Json(AuditRequest {
                proposal_name: "Arena".to_string(),
                customer: None,
                screens: vec![screen_request()],
            }),
        )
        .await
        .unwrap();

        let result = list_audits(State(state), Query(HistoryQuery { limit: Some(200) })).await;
        let entries = result.unwrap().0;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].proposal_name, "Arena");
    }
}
