mod azure_openai_client;
mod mock_llm_client;

pub use azure_openai_client::{API_VERSION, AzureOpenAiClient};
pub use mock_llm_client::MockLlmClient;
