//! Practice conversation turns.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

/// Turns included when asking the model for advice.
pub const ADVICE_WINDOW: usize = 6;

/// Turns returned for display.
pub const DISPLAY_WINDOW: usize = 10;

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Coach,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Coach => "coach",
        }
    }
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a turn represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    Icebreaker,
    UserMessage,
    Advice,
}

/// One entry in a practice conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: Timestamp,
    pub kind: TurnKind,
}

impl ConversationTurn {
    pub fn new(role: TurnRole, kind: TurnKind, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Timestamp::now(),
            kind,
        }
    }

    /// A message typed by the user.
    pub fn user_message(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, TurnKind::UserMessage, content)
    }

    /// A coach-suggested opening line.
    pub fn icebreaker(line: &str) -> Self {
        Self::new(
            TurnRole::Coach,
            TurnKind::Icebreaker,
            format!("建议开场白：{}", line),
        )
    }

    /// `role: content`, the line format used in advice prompts.
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.role, self.content)
    }

    /// Only the ASCII `?` counts; the full-width `？` does not.
    pub fn contains_question(&self) -> bool {
        self.content.contains('?')
    }
}

/// Append-only history of a practice conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// The last `n` turns, oldest first.
    pub fn recent(&self, n: usize) -> &[ConversationTurn] {
        recent(&self.turns, n)
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

/// The last `n` entries of a slice.
pub fn recent<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}
