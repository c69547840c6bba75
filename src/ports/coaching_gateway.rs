//! CoachingGateway port - the boundary to the language model for coaching.
//!
//! All prompt construction and response parsing lives behind this trait.
//! Implementations follow one error policy:
//!
//! - transport or authentication failures come back as `Err(AIError)`,
//!   unchanged;
//! - replies that do not have the expected structure are replaced by the
//!   record's fixed fallback and tagged [`ParseOutcome::Fallback`].

use async_trait::async_trait;

use crate::domain::coaching::{
    AnalysisResult, ConversationAdvice, ConversationTurn, ParseOutcome, Profile,
};

use super::ai_provider::AIError;

/// Prefix of the text returned in place of an opening line that could not be
/// generated.
pub const ICEBREAKER_FAILURE_PREFIX: &str = "生成失败：";

/// Gateway for the coaching calls made against the language model.
#[async_trait]
pub trait CoachingGateway: Send + Sync {
    /// Extract chat topics and suitable styles from a profile.
    async fn analyze_profile(
        &self,
        profile: &Profile,
    ) -> Result<ParseOutcome<AnalysisResult>, AIError>;

    /// Generate a short opening line.
    async fn try_generate_icebreaker(
        &self,
        topics: &[String],
        style: &str,
        target_name: &str,
    ) -> Result<String, AIError>;

    /// Review the recent conversation and suggest how to continue.
    ///
    /// Only the most recent turns are sent to the model.
    async fn provide_conversation_advice(
        &self,
        history: &[ConversationTurn],
    ) -> Result<ParseOutcome<ConversationAdvice>, AIError>;

    /// Opening line as display text.
    ///
    /// Failures are rendered into the text with [`ICEBREAKER_FAILURE_PREFIX`]
    /// so the display path never branches.
    async fn generate_icebreaker(
        &self,
        topics: &[String],
        style: &str,
        target_name: &str,
    ) -> String {
        icebreaker_text(self.try_generate_icebreaker(topics, style, target_name).await)
    }
}

/// Renders an icebreaker result as display text.
pub fn icebreaker_text(result: Result<String, AIError>) -> String {
    match result {
        Ok(line) => line,
        Err(err) => format!("{}{}", ICEBREAKER_FAILURE_PREFIX, err),
    }
}
