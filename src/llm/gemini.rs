//! src/llm/gemini.rs
use super::LLMClient; // 从父模块导入 trait
use crate::config::LLMConfig;
use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

// --- 数据结构定义 ---
#[derive(Serialize)]
struct GeminiRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}
#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}
#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}
#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}
#[derive(Deserialize, Debug)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidates>,
}
#[derive(Deserialize, Debug)]
struct Candidates {
    content: Option<ContentResponse>,
}
#[derive(Deserialize, Debug)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}
#[derive(Deserialize, Debug)]
struct PartResponse {
    text: String,
}

// --- 客户端实现 ---
pub struct GeminiClient {
    api_key: String,
    model_name: String,
    api_base: String,
    temperature: f32,
    max_tokens: u32,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: &LLMConfig, api_key: String) -> Self {
        Self {
            api_key,
            model_name: config.model_name(),
            api_base: config.api_base_url(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl LLMClient for GeminiClient {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn call(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let api_url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, self.model_name, self.api_key
        );
        let request_payload = GeminiRequest {
            system_instruction: Content {
                parts: vec![Part {
                    text: system_prompt,
                }],
            },
            contents: vec![Content {
                parts: vec![Part { text: user_prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_tokens,
            },
        };
        let res = self.client.post(&api_url).json(&request_payload).send().await?;

        let res_status = res.status();

        if res_status.is_success() {
            let response = res.json::<GeminiResponse>().await?;
            let text = response
                .candidates
                .first()
                .and_then(|c| c.content.as_ref())
                .map(|c| {
                    c.parts
                        .iter()
                        .map(|p| p.text.as_str())
                        .collect::<Vec<_>>()
                        .join("")
                })
                .ok_or_else(|| anyhow!("Could not extract text from Gemini API response"))?;
            Ok(text.trim().to_string())
        } else {
            let error_body = res.text().await?;
            Err(anyhow!(
                "Failed to call Gemini API: {} {}\nResponse body: {}",
                res_status,
                res_status.canonical_reason().unwrap_or(""),
                error_body
            ))
        }
    }
}
