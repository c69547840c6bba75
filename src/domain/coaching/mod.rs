//! Coaching domain - profiles, model-derived records, practice turns and
//! the local sentiment heuristics.

mod analysis;
mod conversation;
mod errors;
mod profile;
mod sentiment;

pub use analysis::{
    AnalysisResult, ConversationAdvice, ParseOutcome, DEFAULT_STYLE, DEFAULT_STYLE_OPTIONS,
    DEFAULT_TOPICS, MAX_TOPICS,
};
pub use conversation::{
    recent, ConversationHistory, ConversationTurn, TurnKind, TurnRole, ADVICE_WINDOW,
    DISPLAY_WINDOW,
};
pub use errors::CoachingError;
pub use profile::{Profile, ProfileCatalog};
pub use sentiment::{flow_status, score, Emotion, FlowState, FlowStatus, SentimentScore};
