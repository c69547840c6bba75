//! LLM-backed CoachingGateway implementation

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::domain::coaching::{
    recent, AnalysisResult, ConversationAdvice, ConversationTurn, ParseOutcome, Profile,
    ADVICE_WINDOW,
};
use crate::ports::{AIError, AIProvider, CoachingGateway, CompletionRequest, MessageRole};

const ANALYSIS_TEMPERATURE: f32 = 0.3;
const ICEBREAKER_TEMPERATURE: f32 = 0.8;
const ADVICE_TEMPERATURE: f32 = 0.5;

/// Coaching gateway that prompts a chat-completion model
pub struct LlmCoachingGateway {
    ai_provider: Arc<dyn AIProvider>,
}

impl LlmCoachingGateway {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }

    /// Create a prompt for extracting chat entry points from a profile
    fn create_analysis_prompt(&self, profile: &Profile) -> String {
        format!(
            r#"你是一个专业的社交破冰教练。请分析以下用户资料，提取3-5个高质量的聊天切入点。

用户资料：
- 昵称：{}
- 年龄：{}
- 标签：{}
- 个人简介：{}
- 最近动态：{}

请返回JSON格式：
{{
    "analysis": "对用户的整体分析",
    "topics": ["话题1", "话题2", "话题3", "话题4", "话题5"],
    "conversation_styles": ["适合的聊天风格1", "风格2"]
}}"#,
            profile.nickname,
            profile.age,
            profile.tags_joined(),
            profile.bio,
            profile.recent_moments
        )
    }

    /// Create a prompt for a short opening line
    fn create_icebreaker_prompt(
        &self,
        topics: &[String],
        style: &str,
        target_name: &str,
    ) -> String {
        format!(
            r#"为用户"{target}"生成一个自然、友好的破冰开场白。

可用话题：{topics}
聊天风格：{style}

要求：
1. 不超过2句话
2. 要自然不生硬
3. 要引发对方回复欲望
4. 体现{style}风格特点

直接返回开场白内容，不要额外说明。"#,
            target = target_name,
            topics = topics.join(", "),
            style = style
        )
    }

    /// Create a prompt reviewing the latest turns
    fn create_advice_prompt(&self, history: &[ConversationTurn]) -> String {
        let transcript = recent(history, ADVICE_WINDOW)
            .iter()
            .map(ConversationTurn::transcript_line)
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"分析以下对话，并提供改进建议：

{}

请返回JSON格式：
{{
    "emotion_analysis": "对当前对话情绪的分析",
    "suggested_topics": ["建议延伸的话题1", "话题2"],
    "improvement_suggestions": ["改进建议1", "建议2"],
    "response_suggestion": "具体的下一句回复建议"
}}"#,
            transcript
        )
    }

    /// Send a single-message prompt and return the reply text
    async fn ask(&self, prompt: String, temperature: f32) -> Result<String, AIError> {
        let request = CompletionRequest::new()
            .with_message(MessageRole::User, prompt)
            .with_temperature(temperature);

        let response = self.ai_provider.complete(request).await?;
        Ok(response.content)
    }

    /// Ask for a JSON record, substituting `fallback` when the reply is unusable.
    ///
    /// Transport failures still propagate.
    async fn ask_structured<T: DeserializeOwned>(
        &self,
        call: &'static str,
        prompt: String,
        temperature: f32,
        fallback: fn() -> T,
    ) -> Result<ParseOutcome<T>, AIError> {
        let content = match self.ask(prompt, temperature).await {
            Ok(content) => content,
            Err(e) if e.is_format_error() => {
                tracing::warn!(call, error = %e, "Malformed completion envelope, using fallback");
                return Ok(ParseOutcome::Fallback(fallback()));
            }
            Err(e) => return Err(e),
        };

        Ok(parse_record(call, &content, fallback))
    }
}

/// Parse a model reply into `T`, or the fallback when it does not fit.
fn parse_record<T: DeserializeOwned>(
    call: &'static str,
    content: &str,
    fallback: fn() -> T,
) -> ParseOutcome<T> {
    match serde_json::from_str::<T>(content.trim()) {
        Ok(record) => ParseOutcome::Parsed(record),
        Err(e) => {
            tracing::warn!(
                call,
                error = %e,
                "Model reply is not the expected JSON, using fallback"
            );
            ParseOutcome::Fallback(fallback())
        }
    }
}

#[async_trait]
impl CoachingGateway for LlmCoachingGateway {
    async fn analyze_profile(
        &self,
        profile: &Profile,
    ) -> Result<ParseOutcome<AnalysisResult>, AIError> {
        tracing::debug!(profile_id = %profile.id, "Analyzing profile");

        self.ask_structured(
            "analyze_profile",
            self.create_analysis_prompt(profile),
            ANALYSIS_TEMPERATURE,
            AnalysisResult::fallback,
        )
        .await
    }

    async fn try_generate_icebreaker(
        &self,
        topics: &[String],
        style: &str,
        target_name: &str,
    ) -> Result<String, AIError> {
        let prompt = self.create_icebreaker_prompt(topics, style, target_name);
        self.ask(prompt, ICEBREAKER_TEMPERATURE).await
    }

    async fn provide_conversation_advice(
        &self,
        history: &[ConversationTurn],
    ) -> Result<ParseOutcome<ConversationAdvice>, AIError> {
        self.ask_structured(
            "provide_conversation_advice",
            self.create_advice_prompt(history),
            ADVICE_TEMPERATURE,
            ConversationAdvice::fallback,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::domain::coaching::ProfileCatalog;
    use crate::domain::foundation::ProfileId;

    const ANALYSIS_JSON: &str = r#"{
        "analysis": "热爱户外和摄影的女生",
        "topics": ["徒步", "摄影", "咖啡"],
        "conversation_styles": ["好奇型", "幽默型"]
    }"#;

    const ADVICE_JSON: &str = r#"{
        "emotion_analysis": "气氛轻松",
        "suggested_topics": ["旅行"],
        "improvement_suggestions": ["多提开放式问题"],
        "response_suggestion": "你最近一次徒步去了哪里？"
    }"#;

    fn test_profile() -> Profile {
        ProfileCatalog::samples()
            .find(ProfileId::new(1))
            .cloned()
            .unwrap()
    }

    fn gateway_with(provider: MockAIProvider) -> (LlmCoachingGateway, MockAIProvider) {
        let gateway = LlmCoachingGateway::new(Arc::new(provider.clone()));
        (gateway, provider)
    }

    fn turns(n: usize) -> Vec<ConversationTurn> {
        (0..n)
            .map(|i| ConversationTurn::user_message(format!("消息{}", i)))
            .collect()
    }

    #[tokio::test]
    async fn analyze_profile_parses_valid_json() {
        let (gateway, _) = gateway_with(MockAIProvider::new().with_response(ANALYSIS_JSON));

        let outcome = gateway.analyze_profile(&test_profile()).await.unwrap();

        assert!(!outcome.is_degraded());
        assert_eq!(outcome.value().topics, vec!["徒步", "摄影", "咖啡"]);
        assert_eq!(outcome.value().conversation_styles, vec!["好奇型", "幽默型"]);
    }

    #[tokio::test]
    async fn analyze_profile_uses_low_temperature_and_profile_fields() {
        let (gateway, provider) = gateway_with(MockAIProvider::new().with_response(ANALYSIS_JSON));
        let profile = test_profile();

        gateway.analyze_profile(&profile).await.unwrap();

        let call = provider.last_call().unwrap();
        assert_eq!(call.temperature, Some(0.3));
        assert_eq!(call.messages.len(), 1);
        assert_eq!(call.messages[0].role, MessageRole::User);
        assert!(call.messages[0].content.contains(&profile.nickname));
        assert!(call.messages[0].content.contains(&profile.tags_joined()));
    }

    #[tokio::test]
    async fn analyze_profile_non_json_yields_fallback() {
        let (gateway, _) =
            gateway_with(MockAIProvider::new().with_response("这位用户很有趣，可以聊摄影。"));

        let outcome = gateway.analyze_profile(&test_profile()).await.unwrap();

        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_inner(), AnalysisResult::fallback());
    }

    #[tokio::test]
    async fn analyze_profile_missing_key_yields_fallback() {
        let (gateway, _) = gateway_with(
            MockAIProvider::new().with_response(r#"{"analysis":"x","topics":["a"]}"#),
        );

        let outcome = gateway.analyze_profile(&test_profile()).await.unwrap();

        assert!(outcome.is_degraded());
    }

    #[tokio::test]
    async fn analyze_profile_malformed_envelope_yields_fallback() {
        let provider = MockAIProvider::new().with_error(AIError::parse("No choices in response"));
        let (gateway, _) = gateway_with(provider);

        let outcome = gateway.analyze_profile(&test_profile()).await.unwrap();

        assert_eq!(outcome, ParseOutcome::Fallback(AnalysisResult::fallback()));
    }

    #[tokio::test]
    async fn analyze_profile_transport_error_passes_through() {
        let (gateway, _) =
            gateway_with(MockAIProvider::new().with_error(AIError::network("connection refused")));

        let err = gateway.analyze_profile(&test_profile()).await.unwrap_err();

        assert_eq!(err, AIError::network("connection refused"));
    }

    #[tokio::test]
    async fn icebreaker_returns_raw_text() {
        let (gateway, provider) =
            gateway_with(MockAIProvider::new().with_response("嗨，看到你也喜欢徒步！"));
        let topics = vec!["徒步".to_string(), "摄影".to_string()];

        let line = gateway
            .generate_icebreaker(&topics, "幽默型", "小雨")
            .await;

        assert_eq!(line, "嗨，看到你也喜欢徒步！");
        let call = provider.last_call().unwrap();
        assert_eq!(call.temperature, Some(0.8));
        assert!(call.messages[0].content.contains("徒步, 摄影"));
        assert!(call.messages[0].content.contains("\"小雨\""));
        assert!(call.messages[0].content.contains("体现幽默型风格特点"));
    }

    #[tokio::test]
    async fn icebreaker_failure_becomes_prefixed_text() {
        let (gateway, _) = gateway_with(MockAIProvider::new().with_error(AIError::Timeout {
            timeout_secs: 30,
        }));

        let line = gateway.generate_icebreaker(&[], "友好型", "小雨").await;

        assert!(line.starts_with("生成失败："));
        assert!(line.contains("timed out"));
    }

    #[tokio::test]
    async fn advice_parses_valid_json() {
        let (gateway, provider) = gateway_with(MockAIProvider::new().with_response(ADVICE_JSON));

        let outcome = gateway.provide_conversation_advice(&turns(1)).await.unwrap();

        assert!(!outcome.is_degraded());
        assert_eq!(outcome.value().response_suggestion, "你最近一次徒步去了哪里？");
        assert_eq!(provider.last_call().unwrap().temperature, Some(0.5));
    }

    #[tokio::test]
    async fn advice_prompt_includes_only_last_six_turns() {
        let (gateway, provider) = gateway_with(MockAIProvider::new().with_response(ADVICE_JSON));

        gateway.provide_conversation_advice(&turns(9)).await.unwrap();

        let prompt = provider.last_call().unwrap().messages[0].content.clone();
        assert!(!prompt.contains("user: 消息2"));
        for i in 3..9 {
            assert!(prompt.contains(&format!("user: 消息{}", i)));
        }
    }

    #[tokio::test]
    async fn advice_garbage_yields_fallback() {
        let (gateway, _) = gateway_with(MockAIProvider::new().with_response("```json\n{}\n```"));

        let outcome = gateway.provide_conversation_advice(&turns(2)).await.unwrap();

        assert_eq!(outcome, ParseOutcome::Fallback(ConversationAdvice::fallback()));
    }

    #[tokio::test]
    async fn advice_auth_error_passes_through() {
        let (gateway, _) =
            gateway_with(MockAIProvider::new().with_error(AIError::AuthenticationFailed));

        let err = gateway
            .provide_conversation_advice(&turns(2))
            .await
            .unwrap_err();

        assert_eq!(err, AIError::AuthenticationFailed);
    }
}
