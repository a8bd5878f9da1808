//! Integration tests for the survey REST flow.
//!
//! Each test spins up an Axum server on a random port backed by an
//! in-memory sheet store, then walks the real HTTP contract with reqwest.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::net::TcpListener;
use tokio::time::timeout;

use conjoint_survey::api::survey_routes;
use conjoint_survey::catalog::Catalog;
use conjoint_survey::design::{DesignConfig, DesignGenerator};
use conjoint_survey::engine::SurveyEngine;
use conjoint_survey::session::SessionStore;
use conjoint_survey::sheets::MemorySheet;
use conjoint_survey::submit::{SubmissionAdapter, log_headers};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Start an Axum server on a random port, return (port, sheet).
async fn start_server() -> (u16, Arc<MemorySheet>) {
    let catalog = Arc::new(Catalog::motor_insurance());
    let generator = DesignGenerator::new(Arc::clone(&catalog), DesignConfig::default()).unwrap();
    let sheet = Arc::new(MemorySheet::new(log_headers(&catalog)));
    let adapter = SubmissionAdapter::new(sheet.clone());
    let sessions = SessionStore::new(Duration::from_secs(3600));
    let engine = SurveyEngine::new(sessions, generator, adapter, Arc::clone(&catalog));
    let app = survey_routes(engine, catalog);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (port, sheet)
}

/// Open a session, return (respondent_id, first view).
async fn open_session(client: &reqwest::Client, port: u16) -> (String, Value) {
    let resp = client
        .post(format!("http://127.0.0.1:{port}/api/sessions"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    (
        body["respondent_id"].as_str().unwrap().to_string(),
        body["view"].clone(),
    )
}

/// Post one event, return (status, body).
async fn post_event(client: &reqwest::Client, port: u16, id: &str, event: Value) -> (u16, Value) {
    let resp = client
        .post(format!("http://127.0.0.1:{port}/api/sessions/{id}/events"))
        .json(&event)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

/// Post an event that must advance, return the new view.
async fn advance(client: &reqwest::Client, port: u16, id: &str, event: Value) -> Value {
    let (status, body) = post_event(client, port, id, event).await;
    assert_eq!(status, 200, "event was not accepted: {body}");
    assert_eq!(body["status"], "advanced");
    body["view"].clone()
}

/// Fetch the current view of a session.
async fn current_view(client: &reqwest::Client, port: u16, id: &str) -> Value {
    let resp = client
        .get(format!("http://127.0.0.1:{port}/api/sessions/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    body["view"].clone()
}

fn choose_event(label: &str) -> Value {
    serde_json::json!({"type": "choose_profile", "label": label})
}

fn demographics_event() -> Value {
    serde_json::json!({
        "type": "submit_demographics",
        "form": {
            "age": 31,
            "gender": "Female",
            "education": "Graduate",
            "location": "Tier 1 City",
            "family_status": "Married",
            "family_income": "₹10 Lakhs – ₹19.99 Lakhs",
            "addons": ["addon-1", "addon-2", "addon-3"]
        }
    })
}

fn ownership_event(answer: &str) -> Value {
    serde_json::json!({"type": "submit_ownership", "answer": answer})
}

fn commercial_vehicle_event() -> Value {
    serde_json::json!({
        "type": "submit_vehicle",
        "form": {
            "kind": "commercial",
            "business_type": "Goods transport",
            "fleet_size": "3",
            "vehicle_type": "Trucks",
            "driven_by": "Driver",
            "insurance_type": "Comprehensive Plan",
            "trust_factor": "Brand Value"
        }
    })
}

/// Walk a fresh session through consent, instructions, and all eight
/// tasks, always choosing profile A. Leaves it on the demographics page.
async fn walk_to_demographics(client: &reqwest::Client, port: u16, id: &str) {
    let view = advance(client, port, id, serde_json::json!({"type": "consent"})).await;
    assert_eq!(view["page"], "instructions");

    let view = advance(client, port, id, serde_json::json!({"type": "start_survey"})).await;
    assert_eq!(view["page"], "survey");
    assert_eq!(view["task"], 1);
    assert_eq!(view["task_count"], 8);
    let profiles = view["profiles"].as_array().unwrap();
    assert_eq!(profiles.len(), 3);
    assert_eq!(profiles[0]["label"], "A");
    assert_eq!(profiles[2]["label"], "C");
    assert_eq!(profiles[0]["levels"].as_array().unwrap().len(), 5);

    for expected in 2..=8u64 {
        let view = advance(client, port, id, choose_event("A")).await;
        assert_eq!(view["page"], "survey");
        assert_eq!(view["task"], expected);
    }
    let view = advance(client, port, id, choose_event("A")).await;
    assert_eq!(view["page"], "demographics");
}

// ── Endpoint basics ─────────────────────────────────────────────────

#[tokio::test]
async fn rest_health_endpoint() {
    timeout(TEST_TIMEOUT, async {
        let (port, _sheet) = start_server().await;

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/health"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "conjoint-survey");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn rest_questionnaire_serves_option_lists() {
    timeout(TEST_TIMEOUT, async {
        let (port, _sheet) = start_server().await;

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/api/questionnaire"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body: Value = resp.json().await.unwrap();
        let attributes = body["attributes"].as_array().unwrap();
        assert_eq!(attributes.len(), 5);
        assert_eq!(attributes[0]["name"], "Annual Premium Price");
        assert_eq!(attributes[0]["levels"].as_array().unwrap().len(), 4);
        assert_eq!(body["demographics"]["addons"].as_array().unwrap().len(), 12);
        assert!(body["vehicle"]["private"]["vehicle_types"].is_array());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn rest_unknown_session_returns_404() {
    timeout(TEST_TIMEOUT, async {
        let (port, _sheet) = start_server().await;
        let fake_id = uuid::Uuid::new_v4();

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/api/sessions/{fake_id}"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);

        let client = reqwest::Client::new();
        let resp = client
            .post(format!(
                "http://127.0.0.1:{port}/api/sessions/{fake_id}/events"
            ))
            .json(&serde_json::json!({"type": "consent"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn rest_invalid_session_id_returns_400() {
    timeout(TEST_TIMEOUT, async {
        let (port, _sheet) = start_server().await;

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/api/sessions/not-a-uuid"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
    })
    .await
    .expect("test timed out");
}

// ── Survey walks ────────────────────────────────────────────────────

#[tokio::test]
async fn full_no_vehicle_walk_writes_responses() {
    timeout(TEST_TIMEOUT, async {
        let (port, sheet) = start_server().await;
        let client = reqwest::Client::new();

        let (id, view) = open_session(&client, port).await;
        assert_eq!(view["page"], "intro");

        walk_to_demographics(&client, port, &id).await;

        let view = advance(&client, port, &id, demographics_event()).await;
        assert_eq!(view["page"], "vehicle_ownership");

        let view = advance(&client, port, &id, ownership_event("no")).await;
        assert_eq!(view["page"], "thankyou");

        // One row per profile shown, chosen profile flagged.
        let rows = sheet.rows().await;
        assert_eq!(rows.len(), 24);
        for row in &rows {
            assert_eq!(row[0], serde_json::json!(id));
        }
        assert_eq!(rows[0][2], serde_json::json!("A"));
        assert_eq!(rows[0][8], serde_json::json!(1));
        assert_eq!(rows[1][8], serde_json::json!(0));

        assert_eq!(
            sheet.range("A2:D2").await.unwrap(),
            vec![vec![
                serde_json::json!(1),
                serde_json::json!(0),
                serde_json::json!(0),
                serde_json::json!(1)
            ]]
        );

        // The session survives its own submission.
        let view = current_view(&client, port, &id).await;
        assert_eq!(view["page"], "thankyou");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn commercial_vehicle_walk_buckets_aggregates() {
    timeout(TEST_TIMEOUT, async {
        let (port, sheet) = start_server().await;
        let client = reqwest::Client::new();

        let (id, _) = open_session(&client, port).await;
        walk_to_demographics(&client, port, &id).await;
        advance(&client, port, &id, demographics_event()).await;

        let view = advance(&client, port, &id, ownership_event("yes")).await;
        assert_eq!(view["page"], "vehicle_type");
        assert!(sheet.rows().await.is_empty());

        let view = advance(&client, port, &id, commercial_vehicle_event()).await;
        assert_eq!(view["page"], "thankyou");

        assert_eq!(sheet.rows().await.len(), 24);
        assert_eq!(
            sheet.range("A2:D2").await.unwrap(),
            vec![vec![
                serde_json::json!(1),
                serde_json::json!(0),
                serde_json::json!(1),
                serde_json::json!(0)
            ]]
        );
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn guard_rejection_keeps_page_and_shows_message() {
    timeout(TEST_TIMEOUT, async {
        let (port, sheet) = start_server().await;
        let client = reqwest::Client::new();

        let (id, _) = open_session(&client, port).await;
        advance(&client, port, &id, serde_json::json!({"type": "consent"})).await;
        advance(&client, port, &id, serde_json::json!({"type": "start_survey"})).await;

        // No profile selected.
        let (status, body) =
            post_event(&client, port, &id, serde_json::json!({"type": "choose_profile"})).await;
        assert_eq!(status, 422);
        assert_eq!(body["status"], "rejected");
        assert_eq!(body["error"], "Please select an option to proceed.");

        // Still on the first task, nothing written.
        let view = current_view(&client, port, &id).await;
        assert_eq!(view["page"], "survey");
        assert_eq!(view["task"], 1);
        assert!(sheet.rows().await.is_empty());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn replayed_event_after_finish_is_rejected() {
    timeout(TEST_TIMEOUT, async {
        let (port, sheet) = start_server().await;
        let client = reqwest::Client::new();

        let (id, _) = open_session(&client, port).await;
        walk_to_demographics(&client, port, &id).await;
        advance(&client, port, &id, demographics_event()).await;
        advance(&client, port, &id, ownership_event("no")).await;
        assert_eq!(sheet.rows().await.len(), 24);

        // Replaying the final post does not append a second batch.
        let (status, body) = post_event(&client, port, &id, ownership_event("no")).await;
        assert_eq!(status, 422);
        assert_eq!(body["status"], "rejected");
        assert_eq!(sheet.rows().await.len(), 24);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn incomplete_demographics_is_rejected_with_message() {
    timeout(TEST_TIMEOUT, async {
        let (port, _sheet) = start_server().await;
        let client = reqwest::Client::new();

        let (id, _) = open_session(&client, port).await;
        walk_to_demographics(&client, port, &id).await;

        // Only two add-ons picked.
        let event = serde_json::json!({
            "type": "submit_demographics",
            "form": {
                "age": 31,
                "gender": "Female",
                "education": "Graduate",
                "location": "Tier 1 City",
                "family_status": "Married",
                "family_income": "₹10 Lakhs – ₹19.99 Lakhs",
                "addons": ["addon-1", "addon-2"]
            }
        });
        let (status, body) = post_event(&client, port, &id, event).await;
        assert_eq!(status, 422);
        assert_eq!(
            body["error"],
            "Please fill in all the fields and exactly 3 add ons to continue."
        );

        let view = current_view(&client, port, &id).await;
        assert_eq!(view["page"], "demographics");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn sessions_are_isolated() {
    timeout(TEST_TIMEOUT, async {
        let (port, sheet) = start_server().await;
        let client = reqwest::Client::new();

        let (first, _) = open_session(&client, port).await;
        let (second, _) = open_session(&client, port).await;
        assert_ne!(first, second);

        // Finishing the first session leaves the second untouched.
        walk_to_demographics(&client, port, &first).await;
        advance(&client, port, &first, demographics_event()).await;
        advance(&client, port, &first, ownership_event("no")).await;

        let view = current_view(&client, port, &second).await;
        assert_eq!(view["page"], "intro");

        let rows = sheet.rows().await;
        assert_eq!(rows.len(), 24);
        for row in &rows {
            assert_eq!(row[0], serde_json::json!(first));
        }
    })
    .await
    .expect("test timed out");
}
