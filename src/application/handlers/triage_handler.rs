use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use super::ErrorResponse;
use crate::application::AppState;
use crate::domain::entities::page_triage::DocumentTriageSummary;
use crate::domain::services::triage::{DocumentTriageService, KeywordBank};

/// Upstream extraction sends one text blob per PDF page
#[derive(Debug, Serialize, Deserialize)]
pub struct TriageRequest {
    pub pages: Vec<String>,
    /// Extra phrases scored as a "custom" category
    pub custom_keywords: Option<Vec<String>>,
    /// Built-in categories to skip (e.g., "manufacturers")
    pub disabled_categories: Option<Vec<String>>,
}

/// Triage RFP page text against the keyword bank
pub async fn triage_document(
    State(state): State<AppState>,
    Json(request): Json<TriageRequest>,
) -> Result<Json<DocumentTriageSummary>, (StatusCode, Json<ErrorResponse>)> {
    if request.pages.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "pages must not be empty".to_string(),
            }),
        ));
    }

    let needs_custom_bank = request.custom_keywords.is_some() || request.disabled_categories.is_some();
    let summary = if needs_custom_bank {
        let disabled: Vec<&str> = request
            .disabled_categories
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(String::as_str)
            .collect();
        let bank = KeywordBank::builtin()
            .without_categories(&disabled)
            .with_custom_keywords(request.custom_keywords.unwrap_or_default());
        DocumentTriageService::new(bank).triage_document(&request.pages)
    } else {
        state.triage.triage_document(&request.pages)
    };

    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RateConfig;
    use crate::domain::entities::page_triage::TriageRecommendation;
    use crate::domain::services::audit::ProposalAuditor;
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

    #[tokio::test]
    async fn test_triage_endpoint_scores_pages() {
        let state = test_state().await;
        let result = triage_document(
            State(state),
            Json(TriageRequest {
                pages: vec![
                    "LED display with 3.9mm pixel pitch, structural steel mounting, \
                     and power distribution per division 26 specifications."
                        .to_string(),
                    "S-201".to_string(),
                ],
                custom_keywords: None,
                disabled_categories: None,
            }),
        )
        .await;

        let summary = result.unwrap().0;
        assert_eq!(summary.total_pages, 2);
        assert_eq!(summary.text_pages, 1);
        assert_eq!(summary.drawing_pages, 1);
        assert_eq!(summary.pages[1].recommendation, TriageRecommendation::Review);
    }

    #[tokio::test]
    async fn test_triage_endpoint_rejects_empty_pages() {
        let state = test_state().await;
        let result = triage_document(
            State(state),
            Json(TriageRequest {
                pages: vec![],
                custom_keywords: None,
                disabled_categories: None,
            }),
        )
        .await;

        assert_eq!(result.err().unwrap().0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_triage_endpoint_disabled_categories() {
        let state = test_state().await;
        let page = "Daktronics and Watchfire were both mentioned in the addendum along \
                    with several other unrelated notes about the milestone schedule."
            .to_string();

        let result = triage_document(
            State(state),
            Json(TriageRequest {
                pages: vec![page],
                custom_keywords: None,
                disabled_categories: Some(vec!["manufacturers".to_string()]),
            }),
        )
        .await;

        let summary = result.unwrap().0;
        assert!(!summary.pages[0]
            .matched_categories
            .iter()
            .any(|c| c == "manufacturers"));
    }
}
