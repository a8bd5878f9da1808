use std::sync::Arc;
use std::time::Duration;

use conjoint_survey::api::survey_routes;
use conjoint_survey::catalog::Catalog;
use conjoint_survey::config::SurveyConfig;
use conjoint_survey::design::DesignGenerator;
use conjoint_survey::engine::SurveyEngine;
use conjoint_survey::session::{SessionStore, spawn_eviction_task};
use conjoint_survey::sheets::{GoogleSheetsStore, MemorySheet, SheetStore, SheetsConfig};
use conjoint_survey::submit::{SubmissionAdapter, log_headers};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let port: u16 = std::env::var("SURVEY_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let idle_min: u64 = std::env::var("SURVEY_SESSION_IDLE_MIN")
        .unwrap_or_else(|_| "60".to_string())
        .parse()
        .unwrap_or(60);

    let config = SurveyConfig {
        session_idle_timeout: Duration::from_secs(idle_min * 60),
        ..SurveyConfig::default()
    };

    eprintln!("📋 Conjoint Survey v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://0.0.0.0:{}/api/sessions", port);
    eprintln!("   Session idle timeout: {} min", idle_min);

    let catalog = Arc::new(Catalog::motor_insurance());
    let generator = DesignGenerator::new(Arc::clone(&catalog), config.design)?;

    // Google Sheets when credentials are present, in-memory otherwise.
    let store: Arc<dyn SheetStore> = match SheetsConfig::from_env() {
        Some(sheets_config) => {
            eprintln!(
                "   Sheets: enabled (log: {}, aggregates: {})",
                sheets_config.log_sheet, sheets_config.aggregates_sheet
            );
            Arc::new(GoogleSheetsStore::new(sheets_config))
        }
        None => {
            eprintln!("   Sheets: disabled (responses stay in memory)");
            Arc::new(MemorySheet::new(log_headers(&catalog)))
        }
    };
    let adapter = SubmissionAdapter::new(store);

    let sessions = SessionStore::new(config.session_idle_timeout);
    let _eviction_handle =
        spawn_eviction_task(Arc::clone(&sessions), config.eviction_sweep_interval);

    let engine = SurveyEngine::new(sessions, generator, adapter, Arc::clone(&catalog));
    let app = survey_routes(engine, catalog);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!(port, "Survey server started");
    axum::serve(listener, app).await?;

    Ok(())
}
