use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledquote::application::handlers::{audit_handler, triage_handler};
use ledquote::application::AppState;
use ledquote::config::RateConfig;
use ledquote::domain::services::audit::ProposalAuditor;
use ledquote::domain::services::triage::DocumentTriageService;
use ledquote::persistence::audit_repository::SqliteProposalAuditRepository;
use ledquote::persistence::{init_database, DatabaseConfig};

/// Triage requests carry whole documents of extracted page text
const MAX_REQUEST_BODY_BYTES: usize = 32 * 1024 * 1024;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Environment first so the filter and config see .env overrides
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ledquote=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("LEDQUOTE proposal pricing server starting...");

    let rates = RateConfig::from_env();
    let auditor = ProposalAuditor::new(rates)?;
    info!("✓ Rate configuration loaded and validated");

    let db_config = DatabaseConfig::from_env();
    let pool = init_database(&db_config.url).await?;
    let audits = Arc::new(SqliteProposalAuditRepository::new(pool));

    let triage = DocumentTriageService::default();
    info!("✓ Keyword bank compiled for RFP triage");

    let state = AppState::new(auditor, triage, audits);

    let app = Router::new()
        .route("/", get(|| async { "LEDQUOTE proposal pricing server is running!" }))
        .route("/health", get(health_check))
        .route("/api/proposals/audit", post(audit_handler::audit_proposal))
        .route("/api/proposals/audits", get(audit_handler::list_audits))
        .route("/api/triage", post(triage_handler::triage_document))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C signal"),
            Err(e) => error!("Failed to install Ctrl+C handler: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received SIGTERM signal");
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
