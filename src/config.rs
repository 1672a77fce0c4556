//! src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::llm::{create_llm_client, LLM};

/// Returns the configuration directory path (~/.config/homemate).
pub async fn get_config_dir() -> Result<PathBuf> {
    let config_dir = if cfg!(windows) {
        // Windows: %APPDATA%\homemate
        dirs::data_dir()
            .map(|p| p.join("homemate"))
            .context("Could not get data directory")?
    } else {
        // Linux/macOS: ~/.config/homemate
        dirs::config_dir()
            .map(|p| p.join("homemate"))
            .context("Could not get config directory")?
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .await
            .context("Could not create config directory")?;
    }
    Ok(config_dir)
}

/// Represents the main configuration for the application.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// LLM provider settings.
    pub llm: LLMConfig,
    /// Mock WeChat Pay merchant settings.
    pub payment: PaymentConfig,
    /// Where video records are stored.
    pub storage: StorageConfig,
}

/// 模型服务提供方
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenRouter，OpenAI 兼容协议
    #[default]
    OpenRouter,
    OpenAI,
    Gemini,
    /// 不调用外部服务，只用本地兜底回复
    Local,
}

impl Provider {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "openrouter" => Some(Provider::OpenRouter),
            "openai" => Some(Provider::OpenAI),
            "gemini" => Some(Provider::Gemini),
            "local" | "none" => Some(Provider::Local),
            _ => None,
        }
    }

    fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Provider::OpenRouter => Some("OPENROUTER_API_KEY"),
            Provider::OpenAI => Some("OPENAI_API_KEY"),
            Provider::Gemini => Some("GEMINI_API_KEY"),
            Provider::Local => None,
        }
    }
}

/// Defines the LLM provider and model to use.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    pub provider: Provider,
    /// The specific model name; falls back to the provider default.
    pub model: Option<String>,
    /// Full chat-completions URL (OpenAI-compatible) or API root (Gemini).
    pub api_base: Option<String>,
    /// Overrides the provider's API key environment variable.
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Sent as `HTTP-Referer` to OpenRouter.
    pub site_url: Option<String>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: Provider::OpenRouter,
            model: None,
            api_base: None,
            api_key: None,
            temperature: 0.7,
            max_tokens: 2000,
            site_url: None,
        }
    }
}

impl LLMConfig {
    pub fn model_name(&self) -> String {
        if let Some(model) = self.model.as_deref().filter(|m| !m.trim().is_empty()) {
            return model.to_string();
        }
        match self.provider {
            Provider::OpenRouter | Provider::Local => "deepseek/deepseek-r1-0528:free",
            Provider::OpenAI => "gpt-4o-mini",
            Provider::Gemini => "gemini-1.5-flash",
        }
        .to_string()
    }

    pub fn api_base_url(&self) -> String {
        if let Some(base) = self.api_base.as_deref().filter(|b| !b.trim().is_empty()) {
            return base.trim_end_matches('/').to_string();
        }
        match self.provider {
            Provider::OpenRouter | Provider::Local => "https://openrouter.ai/api/v1/chat/completions",
            Provider::OpenAI => "https://api.openai.com/v1/chat/completions",
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
        .to_string()
    }

    /// 配置文件中的 key 优先，其次是对应的环境变量
    pub fn resolved_api_key(&self) -> Option<String> {
        if self.provider == Provider::Local {
            return None;
        }
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                self.provider
                    .api_key_env()
                    .and_then(|name| env::var(name).ok())
                    .filter(|k| !k.trim().is_empty())
            })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PaymentConfig {
    pub appid: String,
    pub mch_id: String,
    pub notify_url: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            appid: "your_wechat_appid".to_string(),
            mch_id: "your_mch_id".to_string(),
            notify_url: "https://your-domain.com/api/wechat-pay/notify".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Defaults to `<config_dir>/videos.json`.
    pub data_file: Option<PathBuf>,
}

/// Creates a default configuration file, overwriting any existing one.
pub async fn create_default_config() -> Result<PathBuf> {
    let config_dir = get_config_dir().await?;
    let config_path = config_dir.join("config.toml");

    let config_content = toml::to_string(&Config::default())?;
    let mut file = fs::File::create(&config_path).await?;
    file.write_all(config_content.as_bytes()).await?;

    Ok(config_path)
}

pub async fn load_config() -> Result<Config> {
    let config_dir = get_config_dir().await?;
    let config_path = config_dir.join("config.toml");

    if !config_path.exists() {
        create_default_config().await?;
    }

    let config_content = fs::read_to_string(&config_path)
        .await
        .context("Could not read config file")?;
    let mut config: Config =
        toml::from_str(&config_content).context("Could not parse config file")?;

    apply_env_overrides(&mut config);
    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Some(provider) = env::var("LLM_PROVIDER").ok().as_deref().and_then(Provider::parse) {
        config.llm.provider = provider;
    }
    if let Ok(site_url) = env::var("SITE_URL") {
        config.llm.site_url = Some(site_url);
    }
    if let Ok(appid) = env::var("WECHAT_APPID") {
        config.payment.appid = appid;
    }
    if let Ok(notify_url) = env::var("NOTIFY_URL") {
        config.payment.notify_url = notify_url;
    }
}

/// 视频数据文件的路径
pub async fn data_file(config: &Config) -> Result<PathBuf> {
    match &config.storage.data_file {
        Some(path) => Ok(path.clone()),
        None => Ok(get_config_dir().await?.join("videos.json")),
    }
}

/// Factory功能，根据配置获取LLM客户端；未配置 key 时为 `None`。
pub fn get_llm_client(config: &Config) -> Result<Option<LLM>> {
    create_llm_client(&config.llm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.llm.provider, Provider::OpenRouter);
        assert_eq!(parsed.llm.max_tokens, 2000);
        assert!(parsed.storage.data_file.is_none());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [llm]
            provider = "gemini"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.llm.provider, Provider::Gemini);
        assert_eq!(parsed.llm.model_name(), "gemini-1.5-flash");
        assert_eq!(parsed.payment.mch_id, "your_mch_id");
    }

    #[test]
    fn explicit_key_and_base_win() {
        let config = LLMConfig {
            provider: Provider::OpenAI,
            api_key: Some("sk-test".to_string()),
            api_base: Some("http://localhost:1234/chat/completions/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolved_api_key().as_deref(), Some("sk-test"));
        assert_eq!(config.api_base_url(), "http://localhost:1234/chat/completions");
    }

    #[test]
    fn local_provider_never_has_a_key() {
        let config = LLMConfig {
            provider: Provider::Local,
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        assert!(config.resolved_api_key().is_none());
    }
}
