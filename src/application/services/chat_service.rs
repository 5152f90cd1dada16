use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::ChatMessage;

/// Free-form conversation with the scoring model, passed through unchanged.
pub struct ChatService {
    llm_client: Arc<dyn LlmClient>,
}

impl ChatService {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }

    #[tracing::instrument(skip_all, fields(turns = messages.len()))]
    pub async fn reply(&self, messages: &[ChatMessage]) -> Result<String, ChatError> {
        if messages.is_empty() {
            return Err(ChatError::NoMessages);
        }

        let reply = self.llm_client.chat(messages).await?;
        tracing::info!(chars = reply.len(), "Chat reply generated");

        Ok(reply)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("No messages provided")]
    NoMessages,
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
}
