use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::presentation::config::{ScaffoldConfig, ScoringProvider, ScoringSettings};

use super::mock_llm_client::MockLlmClient;
use super::openai_client::OpenAiClient;

pub fn create_llm_client(
    settings: &ScoringSettings,
    scaffold: &ScaffoldConfig,
) -> Result<Arc<dyn LlmClient>, LlmClientError> {
    if scaffold.enabled || settings.provider == ScoringProvider::Mock {
        return Ok(Arc::new(MockLlmClient::new(scaffold.mock_delay())));
    }

    let base_url = settings.base_url.trim();
    if base_url.is_empty() {
        return Err(LlmClientError::InvalidResponse(
            "scoring.base_url required for openai provider".to_string(),
        ));
    }

    let client = OpenAiClient::new(
        base_url,
        &settings.api_key,
        &settings.model,
        settings.max_tokens,
        settings.temperature,
        settings.top_p,
    )?;

    Ok(Arc::new(client))
}
