//! Axum router configuration for coaching endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    analyze_profile, create_session, delete_session, generate_icebreaker, get_session, health,
    list_profiles, reset_session, score_sentiment, select_profile, submit_message,
    CoachingAppState,
};

/// Session routes, mounted at `/api/sessions`.
///
/// # Routes
/// - `POST /` - Create a session
/// - `GET /:id` - Session view
/// - `DELETE /:id` - Discard a session
/// - `POST /:id/reset` - Reset a session
/// - `PUT /:id/profile` - Select the practice target
/// - `POST /:id/analysis` - Analyze the selected profile
/// - `POST /:id/icebreaker` - Generate an opening line
/// - `POST /:id/messages` - Submit a message and get advice
pub fn session_routes() -> Router<CoachingAppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/:id", get(get_session).delete(delete_session))
        .route("/:id/reset", post(reset_session))
        .route("/:id/profile", put(select_profile))
        .route("/:id/analysis", post(analyze_profile))
        .route("/:id/icebreaker", post(generate_icebreaker))
        .route("/:id/messages", post(submit_message))
}

/// Create the complete coaching router.
///
/// # Example
///
/// ```ignore
/// let app = coaching_router().with_state(CoachingAppState::new(orchestrator, sessions, profiles));
/// ```
pub fn coaching_router() -> Router<CoachingAppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/profiles", get(list_profiles))
        .route("/api/sentiment", post(score_sentiment))
        .nest("/api/sessions", session_routes())
}
