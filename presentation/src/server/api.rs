//! HTTP routes for step-at-a-time discussions

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use roundtable_application::{
    CreateDiscussionInput, DiscussionSettings, NoTranscriptLogger, ParticipantFactory,
    RegistryError, SessionRegistry, TranscriptLogger, TurnOrchestrator,
};
use roundtable_domain::{DiscussionError, StepOutcome};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Shared server state
pub struct AppState {
    pub registry: SessionRegistry<TurnOrchestrator>,
    pub factory: Arc<dyn ParticipantFactory>,
    pub settings: DiscussionSettings,
    pub logger: Arc<dyn TranscriptLogger>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(
        registry: SessionRegistry<TurnOrchestrator>,
        factory: Arc<dyn ParticipantFactory>,
        settings: DiscussionSettings,
    ) -> Self {
        Self {
            registry,
            factory,
            settings,
            logger: Arc::new(NoTranscriptLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.logger = logger;
        self
    }
}

// ── Errors ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(json!({"error": message}))).into_response()
    }
}

impl From<DiscussionError> for ApiError {
    fn from(e: DiscussionError) -> Self {
        match e {
            DiscussionError::Validation { .. } => ApiError::BadRequest(e.to_string()),
            DiscussionError::IllegalState(_) => ApiError::Conflict(e.to_string()),
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        ApiError::NotFound(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

// ── Payloads ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    #[serde(default)]
    pub topic: String,
    /// Round budget; the configured default when absent
    pub max_turns: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub session_id: String,
    pub models: Vec<String>,
    pub max_turns: u32,
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum NextResponse {
    Contribution {
        model: String,
        response: String,
        turn: u32,
        total_turns: u32,
        done: bool,
        timestamp: String,
    },
    Done {
        done: bool,
        message: String,
    },
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/start", post(start))
        .route("/next", post(next))
        .route("/keepalive", post(keepalive))
        .route("/health", get(health))
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn start(
    State(state): State<SharedState>,
    payload: Result<Json<StartRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let max_rounds = req.max_turns.unwrap_or(state.settings.default_max_rounds);
    let input = CreateDiscussionInput::new(req.topic, max_rounds)
        .with_context_window(state.settings.context_window);

    let orchestrator = TurnOrchestrator::create_with_logger(
        input,
        state.factory.participants(),
        Arc::clone(&state.logger),
    )?;

    let response = StartResponse {
        session_id: String::new(),
        models: orchestrator.participant_names(),
        max_turns: orchestrator.discussion().max_rounds(),
        topic: orchestrator.discussion().topic().content().to_string(),
    };
    let (session_id, _) = state.registry.create(orchestrator);
    info!("Session {} started: {:?}", session_id, response.topic);

    Ok(Json(StartResponse {
        session_id,
        ..response
    }))
}

async fn next(
    State(state): State<SharedState>,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let handle = state.registry.checkout(&req.session_id)?;

    let outcome = {
        let mut orchestrator = handle.lock().await;
        orchestrator.step().await?
    };

    match outcome {
        StepOutcome::Contribution(c) => Ok(Json(NextResponse::Contribution {
            model: c.participant,
            response: c.reply,
            turn: c.round,
            total_turns: c.max_rounds,
            done: false,
            timestamp: chrono::Utc::now().to_rfc3339(),
        })),
        StepOutcome::Done => {
            // Already gone if the reaper or a concurrent request got there first
            let _ = state.registry.expire(&req.session_id);
            debug!("Session {} finished", req.session_id);
            Ok(Json(NextResponse::Done {
                done: true,
                message: "Discussion complete".to_string(),
            }))
        }
    }
}

async fn keepalive(
    State(state): State<SharedState>,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    state.registry.touch(&req.session_id)?;
    Ok(Json(json!({"status": "ok"})))
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::tests::EchoFactory;
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use roundtable_application::ManualClock;
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_state() -> (SharedState, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let registry = SessionRegistry::new(clock.clone(), Duration::from_secs(7200));
        let state = AppState::new(
            registry,
            Arc::new(EchoFactory(vec!["A", "B"])),
            DiscussionSettings::default(),
        );
        (Arc::new(state), clock)
    }

    async fn post_json(state: &SharedState, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(state, req).await
    }

    async fn send(state: &SharedState, req: Request<Body>) -> (StatusCode, Value) {
        let app = api_router().with_state(Arc::clone(state));
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn start_session(state: &SharedState, max_turns: u32) -> String {
        let (status, body) = post_json(
            state,
            "/start",
            json!({"topic": "AI ethics", "max_turns": max_turns}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_start_returns_session() {
        let (state, _) = test_state();
        let (status, body) =
            post_json(&state, "/start", json!({"topic": "  AI ethics ", "max_turns": 2})).await;

        assert_eq!(status, StatusCode::OK);
        assert!(!body["session_id"].as_str().unwrap().is_empty());
        assert_eq!(body["models"], json!(["A", "B"]));
        assert_eq!(body["max_turns"], 2);
        assert_eq!(body["topic"], "AI ethics");
        assert_eq!(state.registry.len(), 1);
    }

    #[tokio::test]
    async fn test_start_uses_default_rounds() {
        let (state, _) = test_state();
        let (_, body) = post_json(&state, "/start", json!({"topic": "t"})).await;
        assert_eq!(body["max_turns"], 5);
    }

    #[tokio::test]
    async fn test_start_rejects_invalid_input() {
        let (state, _) = test_state();

        let (status, body) = post_json(&state, "/start", json!({"topic": ""})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("topic"));

        let (status, _) = post_json(&state, "/start", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) =
            post_json(&state, "/start", json!({"topic": "t", "max_turns": 11})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("max_rounds"));

        assert!(state.registry.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (state, _) = test_state();
        let req = Request::builder()
            .method("POST")
            .uri("/start")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&state, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_next_walks_rounds_then_finishes() {
        let (state, _) = test_state();
        let id = start_session(&state, 2).await;

        let mut seen = Vec::new();
        for _ in 0..4 {
            let (status, body) = post_json(&state, "/next", json!({"session_id": id})).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["done"], false);
            assert_eq!(body["total_turns"], 2);
            assert!(body["timestamp"].is_string());
            seen.push((
                body["model"].as_str().unwrap().to_string(),
                body["turn"].as_u64().unwrap(),
            ));
        }
        assert_eq!(
            seen,
            vec![
                ("A".to_string(), 1),
                ("B".to_string(), 1),
                ("A".to_string(), 2),
                ("B".to_string(), 2)
            ]
        );

        let (status, body) = post_json(&state, "/next", json!({"session_id": id})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["done"], true);
        assert!(body["message"].is_string());

        // Finished sessions are expired
        assert!(state.registry.is_empty());
        let (status, _) = post_json(&state, "/next", json!({"session_id": id})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let (state, _) = test_state();
        for uri in ["/next", "/keepalive"] {
            let (status, body) = post_json(&state, uri, json!({"session_id": "missing"})).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert!(body["error"].as_str().unwrap().contains("missing"));
        }
    }

    #[tokio::test]
    async fn test_keepalive_prevents_reaping() {
        let (state, clock) = test_state();
        let id = start_session(&state, 1).await;

        clock.advance(chrono::Duration::minutes(100));
        let (status, body) = post_json(&state, "/keepalive", json!({"session_id": id})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        clock.advance(chrono::Duration::minutes(100));
        assert!(state.registry.reap().is_empty());

        clock.advance(chrono::Duration::minutes(30));
        assert_eq!(state.registry.reap(), vec![id.clone()]);
        let (status, _) = post_json(&state, "/next", json!({"session_id": id})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = test_state();
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&state, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].is_string());
    }

    #[test]
    fn test_illegal_state_maps_to_conflict() {
        let resp = ApiError::from(DiscussionError::IllegalState("done".into())).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
