//! Keyword sentiment scoring and conversation flow checks.
//!
//! Both are pure functions over local data; neither calls the model.

use serde::{Deserialize, Serialize};

use super::conversation::{recent, ConversationTurn};

pub(crate) const POSITIVE_WORDS: [&str; 17] = [
    "开心", "高兴", "喜欢", "爱", "棒", "好", "优秀", "完美", "精彩", "有趣", "厉害", "惊喜",
    "幸福", "满意", "赞成", "支持", "感谢",
];

pub(crate) const NEGATIVE_WORDS: [&str; 15] = [
    "讨厌", "烦", "生气", "愤怒", "失望", "伤心", "难过", "糟糕", "差", "烂", "恨", "抱怨",
    "批评", "反对", "拒绝",
];

/// Indicator count at which the score saturates.
const SATURATION: f32 = 10.0;

const NEUTRAL_SCORE: f32 = 0.5;

/// Turns inspected by [`flow_status`].
const FLOW_WINDOW: usize = 4;

/// Overall tone of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Positive,
    Negative,
    Neutral,
}

/// Result of [`score`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub emotion: Emotion,
    /// Strength in `[0, 1]`, two decimals.
    pub score: f32,
    pub positive_indicators: u32,
    pub negative_indicators: u32,
}

/// Scores text by counting marker words and emoji.
///
/// Each marker word counts once if it occurs anywhere in the text; each
/// marker emoji counts per occurrence.
pub fn score(text: &str) -> SentimentScore {
    let lowered = text.to_lowercase();

    let positive = count_words(&lowered, &POSITIVE_WORDS)
        + text.chars().filter(|c| is_positive_emoji(*c)).count() as u32;
    let negative = count_words(&lowered, &NEGATIVE_WORDS)
        + text.chars().filter(|c| is_negative_emoji(*c)).count() as u32;

    let (emotion, raw) = if positive > negative {
        (Emotion::Positive, saturate(positive))
    } else if negative > positive {
        (Emotion::Negative, saturate(negative))
    } else {
        (Emotion::Neutral, NEUTRAL_SCORE)
    };

    SentimentScore {
        emotion,
        score: round2(raw),
        positive_indicators: positive,
        negative_indicators: negative,
    }
}

fn count_words(text: &str, words: &[&str]) -> u32 {
    words.iter().filter(|w| text.contains(*w)).count() as u32
}

/// U+FE0F is a marker of its own, so `❤️` counts twice.
fn is_positive_emoji(c: char) -> bool {
    matches!(
        c,
        '\u{1F600}'..='\u{1F60D}' | '👍' | '❤' | '\u{FE0F}' | '💕' | '🌟' | '🎉'
    )
}

fn is_negative_emoji(c: char) -> bool {
    // 😢 falls inside the angry-face range.
    matches!(c, '\u{1F620}'..='\u{1F629}' | '👎' | '💔')
}

fn saturate(count: u32) -> f32 {
    (count as f32 / SATURATION).min(1.0)
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Where a practice conversation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    /// Fewer than two turns so far.
    Starting,
    /// No questions in the recent turns.
    Stalled,
    /// Two or more recent turns ask questions.
    Engaged,
    /// Exactly one recent question.
    Normal,
}

impl FlowState {
    pub fn label(&self) -> &'static str {
        match self {
            FlowState::Starting => "刚刚开始",
            FlowState::Stalled => "话题可能停滞",
            FlowState::Engaged => "积极交流中",
            FlowState::Normal => "正常交流",
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            FlowState::Starting => "继续当前话题",
            FlowState::Stalled => "尝试提问来延续对话",
            FlowState::Engaged => "保持当前节奏",
            FlowState::Normal => "平衡提问和分享",
        }
    }
}

/// Result of [`flow_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStatus {
    pub state: FlowState,
    pub label: String,
    pub suggestion: String,
}

impl From<FlowState> for FlowStatus {
    fn from(state: FlowState) -> Self {
        Self {
            state,
            label: state.label().to_string(),
            suggestion: state.suggestion().to_string(),
        }
    }
}

/// Classifies the conversation pace from the last four turns.
pub fn flow_status(turns: &[ConversationTurn]) -> FlowStatus {
    if turns.len() < 2 {
        return FlowState::Starting.into();
    }

    let questions = recent(turns, FLOW_WINDOW)
        .iter()
        .filter(|t| t.contains_question())
        .count();

    match questions {
        0 => FlowState::Stalled,
        1 => FlowState::Normal,
        _ => FlowState::Engaged,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn turns(contents: &[&str]) -> Vec<ConversationTurn> {
        contents
            .iter()
            .map(|c| ConversationTurn::user_message(*c))
            .collect()
    }

    #[test]
    fn three_positive_words_score_point_three() {
        let result = score("今天很开心，电影很精彩，剧情有趣");
        assert_eq!(result.emotion, Emotion::Positive);
        assert_eq!(result.positive_indicators, 3);
        assert_eq!(result.negative_indicators, 0);
        assert_eq!(result.score, 0.3);
    }

    #[test]
    fn empty_text_is_neutral_half() {
        let result = score("");
        assert_eq!(result.emotion, Emotion::Neutral);
        assert_eq!(result.score, 0.5);
        assert_eq!(result.positive_indicators, 0);
        assert_eq!(result.negative_indicators, 0);
    }

    #[test]
    fn balanced_text_is_neutral_half() {
        let result = score("开心又难过");
        assert_eq!(result.emotion, Emotion::Neutral);
        assert_eq!(result.score, 0.5);
        assert_eq!(result.positive_indicators, 1);
        assert_eq!(result.negative_indicators, 1);
    }

    #[test]
    fn negative_words_win_when_more_frequent() {
        let result = score("真失望，很生气");
        assert_eq!(result.emotion, Emotion::Negative);
        assert_eq!(result.score, 0.2);
        assert_eq!(result.negative_indicators, 2);
    }

    #[test]
    fn repeated_word_counts_once() {
        let result = score("开心开心开心");
        assert_eq!(result.positive_indicators, 1);
        assert_eq!(result.score, 0.1);
    }

    #[test]
    fn emoji_count_per_occurrence() {
        let result = score("🎉🎉👍");
        assert_eq!(result.emotion, Emotion::Positive);
        assert_eq!(result.positive_indicators, 3);

        let result = score("👎😠");
        assert_eq!(result.emotion, Emotion::Negative);
        assert_eq!(result.negative_indicators, 2);
    }

    #[test]
    fn variation_selector_counts_as_positive_marker() {
        let result = score("❤️");
        assert_eq!(result.positive_indicators, 2);
        assert_eq!(result.score, 0.2);

        let result = score("好的✌️");
        assert_eq!(result.emotion, Emotion::Positive);
        assert_eq!(result.positive_indicators, 2);
        assert_eq!(result.score, 0.2);

        let result = score("❤");
        assert_eq!(result.positive_indicators, 1);
    }

    #[test]
    fn score_saturates_at_one() {
        let text = POSITIVE_WORDS.join("，");
        let result = score(&text);
        assert_eq!(result.positive_indicators, 17);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn single_turn_is_starting() {
        let status = flow_status(&turns(&["你好"]));
        assert_eq!(status.state, FlowState::Starting);
        assert_eq!(status.suggestion, "继续当前话题");
    }

    #[test]
    fn no_questions_is_stalled() {
        let status = flow_status(&turns(&["你好", "嗯", "好的", "哈哈"]));
        assert_eq!(status.state, FlowState::Stalled);
        assert_eq!(status.label, "话题可能停滞");
    }

    #[test]
    fn one_question_is_normal() {
        let status = flow_status(&turns(&["你好", "你喜欢什么?"]));
        assert_eq!(status.state, FlowState::Normal);
    }

    #[test]
    fn two_questions_is_engaged() {
        let status = flow_status(&turns(&["在吗?", "去哪玩了?", "丽江", "好玩"]));
        assert_eq!(status.state, FlowState::Engaged);
    }

    #[test]
    fn full_width_question_mark_is_not_a_question() {
        let status = flow_status(&turns(&["你好", "在干嘛？"]));
        assert_eq!(status.state, FlowState::Stalled);
    }

    #[test]
    fn only_last_four_turns_are_inspected() {
        let status = flow_status(&turns(&["a?", "b?", "c?", "d", "e", "f", "g"]));
        assert_eq!(status.state, FlowState::Stalled);
    }

    proptest! {
        #[test]
        fn positive_only_text_scores_by_count(
            words in proptest::sample::subsequence(
                POSITIVE_WORDS.to_vec(),
                0..=POSITIVE_WORDS.len()
            )
        ) {
            let text = words.join("，");
            let result = score(&text);
            let n = words.len() as u32;

            prop_assert_eq!(result.positive_indicators, n);
            prop_assert_eq!(result.negative_indicators, 0);
            if n == 0 {
                prop_assert_eq!(result.emotion, Emotion::Neutral);
                prop_assert!((result.score - 0.5).abs() < 1e-6);
            } else {
                let expected = (n as f32 / 10.0).min(1.0);
                prop_assert_eq!(result.emotion, Emotion::Positive);
                prop_assert!((result.score - expected).abs() < 1e-6);
            }
        }

        #[test]
        fn score_stays_in_unit_interval(text in "\\PC*") {
            let result = score(&text);
            prop_assert!((0.0..=1.0).contains(&result.score));
        }
    }
}
