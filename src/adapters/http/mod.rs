//! HTTP adapters - REST API implementations.
//!
//! `coaching` exposes the coaching endpoints; [`app_router`] wraps them in
//! the middleware stack used by the server binary.

pub mod coaching;

pub use coaching::{coaching_router, CoachingAppState};

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{Environment, ServerConfig};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the complete application router with middleware.
pub fn app_router(state: CoachingAppState, server: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    coaching_router().with_state(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(CompressionLayer::new())
            .layer(TimeoutLayer::new(server.request_timeout()))
            .layer(cors_layer(server)),
    )
}

/// CORS policy: the configured origins, or anything in development when
/// none are configured.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return match server.environment {
            Environment::Development => CorsLayer::permissive(),
            _ => CorsLayer::new(),
        };
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::coaching::LlmCoachingGateway;
    use crate::adapters::session::InMemorySessionStore;
    use crate::application::CoachingOrchestrator;
    use crate::domain::coaching::ProfileCatalog;

    fn state() -> CoachingAppState {
        let gateway = LlmCoachingGateway::new(Arc::new(MockAIProvider::new()));
        CoachingAppState::new(
            Arc::new(CoachingOrchestrator::new(Arc::new(gateway))),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(ProfileCatalog::samples()),
        )
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let app = app_router(state(), &ServerConfig::default());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn incoming_request_id_is_propagated() {
        let app = app_router(state(), &ServerConfig::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(REQUEST_ID_HEADER, "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");
    }

    #[tokio::test]
    async fn configured_origin_is_allowed() {
        let server = ServerConfig {
            cors_origins: Some("http://localhost:8501".to_string()),
            ..Default::default()
        };
        let app = app_router(state(), &server);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/profiles")
                    .header("origin", "http://localhost:8501")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:8501"
        );
    }
}
