//! HTTP handlers for coaching endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::CoachingOrchestrator;
use crate::domain::coaching::{flow_status, score, CoachingError, ProfileCatalog};
use crate::domain::foundation::SessionId;
use crate::domain::session::SessionError;
use crate::ports::{SessionHandle, SessionStore};

use super::dto::{
    AdviceResponse, AnalysisResponse, ErrorResponse, HealthResponse, IcebreakerRequest,
    IcebreakerResponse, MessageResponse, ProfileListResponse, ProfileResponse,
    SelectProfileRequest, SentimentRequest, SessionResponse, UserMessageRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Shared state for the coaching API.
#[derive(Clone)]
pub struct CoachingAppState {
    pub orchestrator: Arc<CoachingOrchestrator>,
    pub sessions: Arc<dyn SessionStore>,
    pub profiles: Arc<ProfileCatalog>,
}

impl CoachingAppState {
    pub fn new(
        orchestrator: Arc<CoachingOrchestrator>,
        sessions: Arc<dyn SessionStore>,
        profiles: Arc<ProfileCatalog>,
    ) -> Self {
        Self {
            orchestrator,
            sessions,
            profiles,
        }
    }

    async fn session(&self, raw_id: &str) -> Result<SessionHandle, CoachingApiError> {
        let id = raw_id
            .parse::<SessionId>()
            .map_err(|_| CoachingApiError::InvalidSessionId(raw_id.to_string()))?;
        Ok(self.sessions.get(id).await?)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness check
pub async fn health(
    State(state): State<CoachingAppState>,
) -> Result<impl IntoResponse, CoachingApiError> {
    let sessions = state.sessions.count().await?;
    Ok(Json(HealthResponse {
        status: "ok",
        sessions,
    }))
}

/// GET /api/profiles - List practice targets
pub async fn list_profiles(State(state): State<CoachingAppState>) -> impl IntoResponse {
    Json(ProfileListResponse {
        profiles: state.profiles.all().iter().map(ProfileResponse::from).collect(),
    })
}

/// POST /api/sentiment - Score a piece of text
pub async fn score_sentiment(Json(req): Json<SentimentRequest>) -> impl IntoResponse {
    Json(score(&req.text))
}

/// POST /api/sessions - Start a new practice session
pub async fn create_session(
    State(state): State<CoachingAppState>,
) -> Result<impl IntoResponse, CoachingApiError> {
    let (_, handle) = state.sessions.create().await?;
    let session = handle.lock().await;
    Ok((StatusCode::CREATED, Json(SessionResponse::from(&*session))))
}

/// GET /api/sessions/:id - Session view
pub async fn get_session(
    State(state): State<CoachingAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, CoachingApiError> {
    let handle = state.session(&session_id).await?;
    let session = handle.lock().await;
    Ok(Json(SessionResponse::from(&*session)))
}

/// DELETE /api/sessions/:id - Discard a session
pub async fn delete_session(
    State(state): State<CoachingAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, CoachingApiError> {
    let id = session_id
        .parse::<SessionId>()
        .map_err(|_| CoachingApiError::InvalidSessionId(session_id.clone()))?;

    if state.sessions.discard(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(SessionError::not_found(id).into())
    }
}

/// POST /api/sessions/:id/reset - Start over
pub async fn reset_session(
    State(state): State<CoachingAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, CoachingApiError> {
    let handle = state.session(&session_id).await?;
    let mut session = handle.lock().await;
    state.orchestrator.reset(&mut session);
    Ok(Json(SessionResponse::from(&*session)))
}

/// PUT /api/sessions/:id/profile - Choose the practice target
pub async fn select_profile(
    State(state): State<CoachingAppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SelectProfileRequest>,
) -> Result<impl IntoResponse, CoachingApiError> {
    let profile = state
        .profiles
        .find(req.profile_id)
        .cloned()
        .ok_or(CoachingError::ProfileNotFound(req.profile_id))?;

    let handle = state.session(&session_id).await?;
    let mut session = handle.lock().await;
    state.orchestrator.select_profile(&mut session, profile);
    Ok(Json(SessionResponse::from(&*session)))
}

/// POST /api/sessions/:id/analysis - Analyze the selected profile
pub async fn analyze_profile(
    State(state): State<CoachingAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, CoachingApiError> {
    let handle = state.session(&session_id).await?;
    let mut session = handle.lock().await;
    let profile = session
        .selected_profile()
        .cloned()
        .ok_or(CoachingError::NoProfileSelected)?;

    let outcome = state.orchestrator.analyze(&mut session, &profile).await?;
    Ok(Json(AnalysisResponse::from(&outcome)))
}

/// POST /api/sessions/:id/icebreaker - Generate an opening line
pub async fn generate_icebreaker(
    State(state): State<CoachingAppState>,
    Path(session_id): Path<String>,
    Json(req): Json<IcebreakerRequest>,
) -> Result<impl IntoResponse, CoachingApiError> {
    let handle = state.session(&session_id).await?;
    let mut session = handle.lock().await;
    let profile = session
        .selected_profile()
        .cloned()
        .ok_or(CoachingError::NoProfileSelected)?;

    let topic = req.topic.as_deref();
    let topics = match session.analysis() {
        Some(outcome) => outcome.value().opening_topics(topic),
        None => topic
            .filter(|t| !t.trim().is_empty())
            .map(|t| vec![t.to_string()])
            .unwrap_or_default(),
    };
    let style = req.style.unwrap_or_default();

    let text = state
        .orchestrator
        .generate_opening(&mut session, &topics, &style, &profile)
        .await;

    Ok(Json(IcebreakerResponse {
        text,
        progress: *session.progress(),
    }))
}

/// POST /api/sessions/:id/messages - Record a user message and get advice
pub async fn submit_message(
    State(state): State<CoachingAppState>,
    Path(session_id): Path<String>,
    Json(req): Json<UserMessageRequest>,
) -> Result<impl IntoResponse, CoachingApiError> {
    let handle = state.session(&session_id).await?;
    let mut session = handle.lock().await;

    let advice = state
        .orchestrator
        .submit_user_message(&mut session, &req.content)
        .await?;

    Ok(Json(MessageResponse {
        advice: AdviceResponse::from(&advice),
        sentiment: score(&req.content),
        flow: flow_status(session.history().turns()),
    }))
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub enum CoachingApiError {
    Coaching(CoachingError),
    Session(SessionError),
    InvalidSessionId(String),
}

impl From<CoachingError> for CoachingApiError {
    fn from(err: CoachingError) -> Self {
        Self::Coaching(err)
    }
}

impl From<SessionError> for CoachingApiError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

impl IntoResponse for CoachingApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            CoachingApiError::Coaching(err) => {
                let (status, code) = match err {
                    CoachingError::Provider(_) => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"),
                    CoachingError::ProfileNotFound(_) => {
                        (StatusCode::NOT_FOUND, "PROFILE_NOT_FOUND")
                    }
                    CoachingError::NoProfileSelected => {
                        (StatusCode::CONFLICT, "NO_PROFILE_SELECTED")
                    }
                    CoachingError::EmptyMessage => (StatusCode::BAD_REQUEST, "EMPTY_MESSAGE"),
                };
                if err.is_provider_failure() {
                    tracing::warn!(error = %err, "Model call failed");
                }
                (status, ErrorResponse::new(code, err.to_string()))
            }
            CoachingApiError::Session(SessionError::NotFound(id)) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::not_found("Session", &id.to_string()),
            ),
            CoachingApiError::Session(err @ SessionError::Infrastructure(_)) => {
                tracing::error!(error = %err, "Session store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", err.message()),
                )
            }
            CoachingApiError::InvalidSessionId(raw) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::bad_request(format!("Invalid session ID: {}", raw)),
            ),
        };

        (status, Json(body)).into_response()
    }
}
