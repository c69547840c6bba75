//! Session state aggregate.
//!
//! One `SessionState` exists per client session. It is owned by the session
//! store and handed explicitly to the coaching orchestrator; nothing about it
//! is shared between sessions or persisted.
//!
//! # Invariants
//!
//! - `analysis` and `latest_advice` always belong to `selected_profile`;
//!   selecting a different profile clears them together with the practice
//!   history.
//! - `history` is append-only between resets.

use serde::Serialize;

use crate::domain::coaching::{
    AnalysisResult, ConversationAdvice, ConversationHistory, ConversationTurn, ParseOutcome,
    Profile,
};
use crate::domain::foundation::{SessionId, Timestamp};

/// Simple per-session progress counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub conversations_started: u32,
    pub successful_icebreakers: u32,
}

/// Everything the service remembers about one client session.
#[derive(Debug, Clone)]
pub struct SessionState {
    id: SessionId,
    selected_profile: Option<Profile>,
    analysis: Option<ParseOutcome<AnalysisResult>>,
    latest_advice: Option<ParseOutcome<ConversationAdvice>>,
    history: ConversationHistory,
    progress: SessionProgress,
    created_at: Timestamp,
    last_active_at: Timestamp,
    last_reset_at: Option<Timestamp>,
}

impl SessionState {
    /// Creates an empty session.
    pub fn new(id: SessionId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            selected_profile: None,
            analysis: None,
            latest_advice: None,
            history: ConversationHistory::new(),
            progress: SessionProgress::default(),
            created_at: now,
            last_active_at: now,
            last_reset_at: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn selected_profile(&self) -> Option<&Profile> {
        self.selected_profile.as_ref()
    }

    /// The analysis of the selected profile, if one was made.
    pub fn analysis(&self) -> Option<&ParseOutcome<AnalysisResult>> {
        self.analysis.as_ref()
    }

    pub fn latest_advice(&self) -> Option<&ParseOutcome<ConversationAdvice>> {
        self.latest_advice.as_ref()
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn progress(&self) -> &SessionProgress {
        &self.progress
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn last_active_at(&self) -> &Timestamp {
        &self.last_active_at
    }

    pub fn last_reset_at(&self) -> Option<&Timestamp> {
        self.last_reset_at.as_ref()
    }

    /// True when the session has not been used since `cutoff`.
    pub fn is_idle_since(&self, cutoff: &Timestamp) -> bool {
        self.last_active_at.is_before(cutoff)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Makes `profile` the practice target.
    ///
    /// Returns `false` when it already was; otherwise everything derived from
    /// the previous target is dropped.
    pub fn select_profile(&mut self, profile: Profile) -> bool {
        if self.selected_profile.as_ref() == Some(&profile) {
            return false;
        }

        self.selected_profile = Some(profile);
        self.analysis = None;
        self.latest_advice = None;
        self.history.clear();
        self.touch();
        true
    }

    /// Stores the analysis of the selected profile and counts a new
    /// conversation.
    pub fn record_analysis(&mut self, analysis: ParseOutcome<AnalysisResult>) {
        self.analysis = Some(analysis);
        self.progress.conversations_started += 1;
        self.touch();
    }

    pub fn append_turn(&mut self, turn: ConversationTurn) {
        self.history.push(turn);
        self.touch();
    }

    pub fn record_advice(&mut self, advice: ParseOutcome<ConversationAdvice>) {
        self.latest_advice = Some(advice);
        self.touch();
    }

    pub fn record_successful_icebreaker(&mut self) {
        self.progress.successful_icebreakers += 1;
    }

    /// Returns the session to its freshly created state.
    pub fn reset(&mut self) {
        self.selected_profile = None;
        self.analysis = None;
        self.latest_advice = None;
        self.history.clear();
        self.progress = SessionProgress::default();
        self.touch();
        self.last_reset_at = Some(self.last_active_at);
    }

    /// Marks the session as used now.
    pub fn touch(&mut self) {
        self.last_active_at = Timestamp::now();
    }
}
