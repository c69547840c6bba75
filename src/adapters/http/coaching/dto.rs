//! HTTP DTOs for coaching endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::coaching::{
    flow_status, AnalysisResult, ConversationAdvice, ConversationTurn, FlowStatus, ParseOutcome,
    Profile, SentimentScore, TurnKind, TurnRole, DISPLAY_WINDOW,
};
use crate::domain::foundation::ProfileId;
use crate::domain::session::{SessionProgress, SessionState};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to choose the practice target.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectProfileRequest {
    pub profile_id: ProfileId,
}

/// Request for an opening line. Both fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IcebreakerRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

/// A message the user sent to the practice target.
#[derive(Debug, Clone, Deserialize)]
pub struct UserMessageRequest {
    pub content: String,
}

/// Text to score.
#[derive(Debug, Clone, Deserialize)]
pub struct SentimentRequest {
    pub text: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub sessions: usize,
}

/// Public view of a practice target.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: ProfileId,
    pub nickname: String,
    pub age: u32,
    pub tags: Vec<String>,
    pub bio: String,
    pub recent_moments: String,
}

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            nickname: profile.nickname.clone(),
            age: profile.age,
            tags: profile.tags.clone(),
            bio: profile.bio.clone(),
            recent_moments: profile.recent_moments.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileListResponse {
    pub profiles: Vec<ProfileResponse>,
}

/// Analysis as shown to the user: at most five topics, and style options
/// that are never empty.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub analysis: String,
    pub topics: Vec<String>,
    pub conversation_styles: Vec<String>,
    /// True when the model reply was unusable and the fallback was shown.
    pub degraded: bool,
}

impl From<&ParseOutcome<AnalysisResult>> for AnalysisResponse {
    fn from(outcome: &ParseOutcome<AnalysisResult>) -> Self {
        let result = outcome.value();
        Self {
            analysis: result.analysis.clone(),
            topics: result.leading_topics().to_vec(),
            conversation_styles: result.style_options(),
            degraded: outcome.is_degraded(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdviceResponse {
    pub emotion_analysis: String,
    pub suggested_topics: Vec<String>,
    pub improvement_suggestions: Vec<String>,
    pub response_suggestion: String,
    pub degraded: bool,
}

impl From<&ParseOutcome<ConversationAdvice>> for AdviceResponse {
    fn from(outcome: &ParseOutcome<ConversationAdvice>) -> Self {
        let advice = outcome.value();
        Self {
            emotion_analysis: advice.emotion_analysis.clone(),
            suggested_topics: advice.suggested_topics.clone(),
            improvement_suggestions: advice.improvement_suggestions.clone(),
            response_suggestion: advice.response_suggestion.clone(),
            degraded: outcome.is_degraded(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnResponse {
    pub role: TurnRole,
    pub kind: TurnKind,
    pub content: String,
    /// `HH:MM:SS`, as displayed next to the turn.
    pub time: String,
    pub timestamp: String,
}

impl From<&ConversationTurn> for TurnResponse {
    fn from(turn: &ConversationTurn) -> Self {
        Self {
            role: turn.role,
            kind: turn.kind,
            content: turn.content.clone(),
            time: turn.timestamp.clock_time(),
            timestamp: turn.timestamp.to_rfc3339(),
        }
    }
}

/// Full view of a practice session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_advice: Option<AdviceResponse>,
    /// The most recent turns, oldest first.
    pub recent_turns: Vec<TurnResponse>,
    pub total_turns: usize,
    pub progress: SessionProgress,
    pub flow: FlowStatus,
    pub created_at: String,
    pub last_active_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reset_at: Option<String>,
}

impl From<&SessionState> for SessionResponse {
    fn from(state: &SessionState) -> Self {
        let history = state.history();
        Self {
            id: state.id().to_string(),
            profile: state.selected_profile().map(ProfileResponse::from),
            analysis: state.analysis().map(AnalysisResponse::from),
            latest_advice: state.latest_advice().map(AdviceResponse::from),
            recent_turns: history
                .recent(DISPLAY_WINDOW)
                .iter()
                .map(TurnResponse::from)
                .collect(),
            total_turns: history.len(),
            progress: *state.progress(),
            flow: flow_status(history.turns()),
            created_at: state.created_at().to_rfc3339(),
            last_active_at: state.last_active_at().to_rfc3339(),
            last_reset_at: state.last_reset_at().map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IcebreakerResponse {
    /// The opening line, or the failure text when it could not be generated.
    pub text: String,
    pub progress: SessionProgress,
}

/// Advice on the conversation plus local heuristics for the new message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub advice: AdviceResponse,
    pub sentiment: SentimentScore,
    pub flow: FlowStatus,
}

// ════════════════════════════════════════════════════════════════════════════
// Error DTO
// ════════════════════════════════════════════════════════════════════════════

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }
}
