//! src/llm/openai.rs
use super::LLMClient;
use crate::config::LLMConfig;
use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;

// --- 数据结构定义 (适配 OpenAI / OpenRouter) ---
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

const APP_TITLE: &str = "AI-Home-Assistant";
const DEFAULT_SITE_URL: &str = "http://localhost:3000";

// --- 客户端实现 ---
pub struct OpenClient {
    api_key: String,
    model_name: String,
    api_base: String,
    site_url: String,
    temperature: f32,
    max_tokens: u32,
    client: Client,
}

impl OpenClient {
    pub fn new(config: &LLMConfig, api_key: String) -> Result<Self> {
        // 从环境变量构建代理
        let proxy_url = env::var("ALL_PROXY").or_else(|_| env::var("HTTPS_PROXY")).ok();
        let client = match proxy_url {
            Some(url) => {
                let proxy = reqwest::Proxy::all(&url)?;
                Client::builder().proxy(proxy).build()?
            }
            None => Client::builder().build()?,
        };

        Ok(Self {
            api_key,
            model_name: config.model_name(),
            api_base: config.api_base_url(),
            site_url: config
                .site_url
                .clone()
                .unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client,
        })
    }
}

#[async_trait::async_trait]
impl LLMClient for OpenClient {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn call(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request_payload = OpenAIRequest {
            model: &self.model_name,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let res = self
            .client
            .post(&self.api_base)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.site_url)
            .header("X-Title", APP_TITLE)
            .json(&request_payload)
            .send()
            .await?;

        let res_status = res.status();

        if res_status.is_success() {
            let response = res.json::<OpenAIResponse>().await?;
            response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .map(|content| content.trim().to_string())
                .ok_or_else(|| anyhow!("API 调用成功，但返回的 'choices' 为空"))
        } else {
            let error_body = res.text().await?;
            if res_status == reqwest::StatusCode::UNAUTHORIZED {
                log::error!("API key 无效或已过期，请检查配置中的 api_key 或对应的环境变量");
            }

            Err(anyhow!(
                "调用 OpenAI 兼容 API 失败: {}\n响应体: {}",
                res_status,
                error_body
            ))
        }
    }
}
