//! HTTP surface — session lifecycle, events, and the questionnaire
//! option lists.
//!
//! The frontend drives the whole survey through these routes: open a
//! session, render the returned view, post one event per button press.
//! Rejected events come back as 422 with the message to show inline.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::catalog::{self, Catalog};
use crate::engine::{EventOutcome, SurveyEngine};
use crate::error::SessionError;
use crate::flow::Event;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SurveyEngine>,
    pub catalog: Arc<Catalog>,
}

/// Build the Axum router with the survey REST routes.
pub fn survey_routes(engine: Arc<SurveyEngine>, catalog: Arc<Catalog>) -> Router {
    let state = AppState { engine, catalog };

    Router::new()
        .route("/health", get(health))
        .route("/api/questionnaire", get(questionnaire))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session))
        .route("/api/sessions/{id}/events", post(post_event))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "conjoint-survey"
    }))
}

// ── Questionnaire ───────────────────────────────────────────────────────

/// Static option lists the frontend renders as radios and selects.
async fn questionnaire(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "attributes": state.catalog.attributes(),
        "demographics": {
            "genders": catalog::GENDERS,
            "education_levels": catalog::EDUCATION_LEVELS,
            "locations": catalog::LOCATIONS,
            "family_statuses": catalog::FAMILY_STATUSES,
            "income_bands": catalog::INCOME_BANDS,
            "addons": catalog::ADDONS,
        },
        "vehicle": {
            "private": {
                "vehicle_types": catalog::PRIVATE_VEHICLE_TYPES,
                "vehicle_costs": catalog::PRIVATE_VEHICLE_COSTS,
                "usage_levels": catalog::PRIVATE_USAGE_LEVELS,
                "drivers": catalog::PRIVATE_DRIVERS,
                "insurance_plans": catalog::PRIVATE_INSURANCE_PLANS,
                "trust_factors": catalog::PRIVATE_TRUST_FACTORS,
            },
            "commercial": {
                "business_types": catalog::COMMERCIAL_BUSINESS_TYPES,
                "vehicle_types": catalog::COMMERCIAL_VEHICLE_TYPES,
                "drivers": catalog::COMMERCIAL_DRIVERS,
                "insurance_plans": catalog::COMMERCIAL_INSURANCE_PLANS,
                "trust_factors": catalog::COMMERCIAL_TRUST_FACTORS,
            },
        },
    }))
}

// ── Sessions ────────────────────────────────────────────────────────────

async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let (id, view) = state.engine.create_session().await;
    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "respondent_id": id,
            "view": view,
        })),
    )
}

async fn get_session(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    let session_id = match Uuid::parse_str(&id) {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": "Invalid session ID"})),
            );
        }
    };

    match state.engine.current_view(session_id).await {
        Ok(view) => (StatusCode::OK, Json(serde_json::json!({"view": view}))),
        Err(SessionError::NotFound { .. }) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Session not found"})),
        ),
    }
}

async fn post_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(event): Json<Event>,
) -> impl IntoResponse {
    let session_id = match Uuid::parse_str(&id) {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": "Invalid session ID"})),
            );
        }
    };

    match state.engine.handle_event(session_id, event).await {
        Ok(EventOutcome::Advanced(view)) => (
            StatusCode::OK,
            Json(serde_json::json!({"status": "advanced", "view": view})),
        ),
        Ok(EventOutcome::Rejected { message }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({"status": "rejected", "error": message})),
        ),
        Err(SessionError::NotFound { .. }) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Session not found"})),
        ),
    }
}
