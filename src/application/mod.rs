pub mod handlers;

use std::sync::Arc;

use crate::domain::services::audit::ProposalAuditor;
use crate::domain::services::triage::DocumentTriageService;
use crate::persistence::audit_repository::ProposalAuditRepository;

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub auditor: Arc<ProposalAuditor>,
    pub triage: Arc<DocumentTriageService>,
    pub audits: Arc<dyn ProposalAuditRepository>,
}

impl AppState {
    pub fn new(
        auditor: ProposalAuditor,
        triage: DocumentTriageService,
        audits: Arc<dyn ProposalAuditRepository>,
    ) -> Self {
        AppState {
            auditor: Arc::new(auditor),
            triage: Arc::new(triage),
            audits,
        }
    }
}
