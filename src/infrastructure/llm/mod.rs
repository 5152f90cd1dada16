mod llm_client_factory;
mod mock_llm_client;
mod openai_client;

pub use llm_client_factory::create_llm_client;
pub use mock_llm_client::MockLlmClient;
pub use openai_client::OpenAiClient;
