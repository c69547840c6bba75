//! HTTP adapter for coaching endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AdviceResponse, AnalysisResponse, ErrorResponse, HealthResponse, IcebreakerRequest,
    IcebreakerResponse, MessageResponse, ProfileListResponse, ProfileResponse,
    SelectProfileRequest, SentimentRequest, SessionResponse, TurnResponse, UserMessageRequest,
};
pub use handlers::{CoachingApiError, CoachingAppState};
pub use routes::{coaching_router, session_routes};
