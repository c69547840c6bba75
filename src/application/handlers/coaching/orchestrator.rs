//! CoachingOrchestrator - sequences gateway calls against one session.
//!
//! Every action receives the session state explicitly and performs at most
//! one model call. The caller holds the session lock for the whole action.

use std::sync::Arc;

use crate::domain::coaching::{
    AnalysisResult, CoachingError, ConversationAdvice, ConversationTurn, ParseOutcome, Profile,
    DEFAULT_STYLE, DEFAULT_TOPICS,
};
use crate::domain::session::SessionState;
use crate::ports::{icebreaker_text, CoachingGateway};

/// Handler for the coaching actions of a practice session.
pub struct CoachingOrchestrator {
    gateway: Arc<dyn CoachingGateway>,
}

impl CoachingOrchestrator {
    pub fn new(gateway: Arc<dyn CoachingGateway>) -> Self {
        Self { gateway }
    }

    /// Makes `profile` the practice target, dropping state derived from a
    /// different previous target.
    pub fn select_profile(&self, state: &mut SessionState, profile: Profile) -> bool {
        let changed = state.select_profile(profile);
        if changed {
            tracing::debug!(session_id = %state.id(), "Practice target changed");
        }
        changed
    }

    /// Analyzes `profile` and stores the result on the session.
    ///
    /// # Errors
    ///
    /// `Provider` if the model call fails; the session is left untouched.
    pub async fn analyze(
        &self,
        state: &mut SessionState,
        profile: &Profile,
    ) -> Result<ParseOutcome<AnalysisResult>, CoachingError> {
        let outcome = self.gateway.analyze_profile(profile).await?;

        state.select_profile(profile.clone());
        state.record_analysis(outcome.clone());

        tracing::info!(
            session_id = %state.id(),
            profile_id = %profile.id,
            degraded = outcome.is_degraded(),
            "Profile analyzed"
        );
        Ok(outcome)
    }

    /// Generates an opening line and records it as a coach turn.
    ///
    /// Empty `topics` fall back to the default topic set and a blank `style`
    /// to the default style. Failures are returned as display text, never as
    /// an error.
    pub async fn generate_opening(
        &self,
        state: &mut SessionState,
        topics: &[String],
        style: &str,
        profile: &Profile,
    ) -> String {
        let topics: Vec<String> = if topics.is_empty() {
            DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect()
        } else {
            topics.to_vec()
        };
        let style = if style.trim().is_empty() {
            DEFAULT_STYLE
        } else {
            style
        };

        let result = self
            .gateway
            .try_generate_icebreaker(&topics, style, &profile.nickname)
            .await;
        let succeeded = result.is_ok();
        if let Err(e) = &result {
            tracing::warn!(session_id = %state.id(), error = %e, "Icebreaker generation failed");
        }

        let text = icebreaker_text(result);
        state.append_turn(ConversationTurn::icebreaker(&text));
        if succeeded {
            state.record_successful_icebreaker();
        }
        text
    }

    /// Records a user message and asks for advice on the conversation so far.
    ///
    /// The advice is stored on the session but not added to the history.
    ///
    /// # Errors
    ///
    /// - `EmptyMessage` for blank text
    /// - `Provider` if the model call fails; the message stays recorded
    pub async fn submit_user_message(
        &self,
        state: &mut SessionState,
        text: &str,
    ) -> Result<ParseOutcome<ConversationAdvice>, CoachingError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CoachingError::EmptyMessage);
        }

        state.append_turn(ConversationTurn::user_message(text));

        let advice = self
            .gateway
            .provide_conversation_advice(state.history().turns())
            .await?;
        state.record_advice(advice.clone());

        Ok(advice)
    }

    /// Returns the session to a fresh state.
    pub fn reset(&self, state: &mut SessionState) {
        state.reset();
        tracing::info!(session_id = %state.id(), "Session reset");
    }
}
