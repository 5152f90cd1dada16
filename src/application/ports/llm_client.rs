use async_trait::async_trait;

use crate::domain::ChatMessage;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends the whole conversation and returns the assistant's reply.
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmClientError>;

    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmClientError> {
        self.chat(&[
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_message),
        ])
        .await
    }

    fn model_name(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
