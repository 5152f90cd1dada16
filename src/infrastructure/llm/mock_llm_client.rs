use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{ChatMessage, MessageRole};

const MOCK_COMPLETION: &str =
    r#"{"score": 7.5, "feedback": "Scaffold feedback: clear answer with minor grammar slips."}"#;

pub struct MockLlmClient {
    delay: Duration,
}

impl MockLlmClient {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmClientError> {
        self.simulate_latency().await;

        let last_user_turn = messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.trim())
            .unwrap_or_default();

        Ok(format!("Scaffold reply to: {}", last_user_turn))
    }

    async fn complete(
        &self,
        _system_prompt: &str,
        _user_message: &str,
    ) -> Result<String, LlmClientError> {
        self.simulate_latency().await;
        Ok(MOCK_COMPLETION.to_string())
    }

    fn model_name(&self) -> &str {
        "scaffold"
    }
}
