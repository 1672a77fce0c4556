//! src/llm/mod.rs

use anyhow::Result;
use async_trait::async_trait;

use crate::config::{LLMConfig, Provider};

pub mod gemini;
pub mod openai;

pub use gemini::GeminiClient;
pub use openai::OpenClient;

/// The `LLMClient` trait defines the interface for a Large Language Model client.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Returns the name of the LLM client.
    fn name(&self) -> &str;
    /// Calls the LLM with a system prompt and a user prompt and returns the generated text.
    async fn call(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

pub enum LLM {
    Gemini(GeminiClient),
    OpenAI(OpenClient),
}

impl LLM {
    pub fn as_client(&self) -> &dyn LLMClient {
        match self {
            LLM::Gemini(c) => c,
            LLM::OpenAI(c) => c,
        }
    }
}

/// 根据配置创建客户端。没有可用的 API key 时返回 `None`，调用方直接走本地兜底。
pub fn create_llm_client(config: &LLMConfig) -> Result<Option<LLM>> {
    let api_key = match config.resolved_api_key() {
        Some(key) => key,
        None => {
            log::info!("no API key configured for {:?}, using local replies", config.provider);
            return Ok(None);
        }
    };

    let client = match config.provider {
        Provider::Gemini => LLM::Gemini(GeminiClient::new(config, api_key)),
        Provider::OpenRouter | Provider::OpenAI => LLM::OpenAI(OpenClient::new(config, api_key)?),
        Provider::Local => return Ok(None),
    };
    Ok(Some(client))
}
