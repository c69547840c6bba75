//! Structured records produced by the language model.
//!
//! Every structured record has a fixed fallback used when the model's reply
//! cannot be read into the expected shape. [`ParseOutcome`] keeps track of
//! which one the caller received.

use serde::{Deserialize, Serialize};

/// Maximum number of topics surfaced from an analysis.
pub const MAX_TOPICS: usize = 5;

/// Topics used when no analysis topics are available.
pub const DEFAULT_TOPICS: [&str; 3] = ["兴趣标签", "最近动态", "个人简介"];

/// Style used when none was chosen.
pub const DEFAULT_STYLE: &str = "友好型";

/// Styles offered when an analysis recommends none.
pub const DEFAULT_STYLE_OPTIONS: [&str; 3] = ["友好型", "好奇型", "幽默型"];

/// Chat entry points and styles derived from one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis: String,
    pub topics: Vec<String>,
    pub conversation_styles: Vec<String>,
}

impl AnalysisResult {
    /// Substitute used when the model reply is not a valid analysis.
    pub fn fallback() -> Self {
        Self {
            analysis: "分析完成".to_string(),
            topics: DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
            conversation_styles: vec!["友好型".to_string(), "好奇型".to_string()],
        }
    }

    /// The first [`MAX_TOPICS`] topics.
    pub fn leading_topics(&self) -> &[String] {
        &self.topics[..self.topics.len().min(MAX_TOPICS)]
    }

    /// Styles to offer, falling back to the default options.
    pub fn style_options(&self) -> Vec<String> {
        if self.conversation_styles.is_empty() {
            DEFAULT_STYLE_OPTIONS.iter().map(|s| s.to_string()).collect()
        } else {
            self.conversation_styles.clone()
        }
    }

    /// Topics to feed an opening line: the selected topic first, then up to
    /// two of the remaining ones.
    ///
    /// Without a selection the first analysis topic leads.
    pub fn opening_topics(&self, selected: Option<&str>) -> Vec<String> {
        let lead = match selected.filter(|s| !s.trim().is_empty()) {
            Some(topic) => topic.to_string(),
            None => match self.topics.first() {
                Some(first) => first.clone(),
                None => return Vec::new(),
            },
        };

        let mut topics = vec![lead.clone()];
        topics.extend(
            self.topics
                .iter()
                .filter(|t| **t != lead)
                .take(2)
                .cloned(),
        );
        topics
    }
}

/// Real-time feedback on an ongoing practice conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationAdvice {
    pub emotion_analysis: String,
    pub suggested_topics: Vec<String>,
    pub improvement_suggestions: Vec<String>,
    pub response_suggestion: String,
}

impl ConversationAdvice {
    /// Substitute used when the model reply is not valid advice.
    pub fn fallback() -> Self {
        Self {
            emotion_analysis: "对话情绪积极".to_string(),
            suggested_topics: vec!["继续当前话题".to_string(), "询问更多细节".to_string()],
            improvement_suggestions: vec!["保持友好态度".to_string()],
            response_suggestion: "听起来很有趣，能多告诉我一些吗？".to_string(),
        }
    }
}

/// A record read from the model, or the fixed substitute for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "record", rename_all = "snake_case")]
pub enum ParseOutcome<T> {
    /// The model replied in the expected shape.
    Parsed(T),
    /// The reply was unusable; this is the fallback record.
    Fallback(T),
}

impl<T> ParseOutcome<T> {
    pub fn value(&self) -> &T {
        match self {
            ParseOutcome::Parsed(v) | ParseOutcome::Fallback(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            ParseOutcome::Parsed(v) | ParseOutcome::Fallback(v) => v,
        }
    }

    /// True when the fallback record was substituted.
    pub fn is_degraded(&self) -> bool {
        matches!(self, ParseOutcome::Fallback(_))
    }
}
