//! src/assistant.rs

use crate::fallback;
use crate::llm::LLMClient;
use crate::models::VideoRecord;
use crate::prompt::{build_system_prompt, build_user_prompt};

/// 回答用户的问题。
///
/// 先调用外部模型；没有配置客户端、调用失败或返回空文本时，改用本地兜底回复。
/// 失败只写日志，不会以错误的形式返回给用户，返回值总是非空的。
/// 调用方需保证 `message` 非空。
pub async fn answer(
    client: Option<&dyn LLMClient>,
    message: &str,
    records: &[VideoRecord],
) -> String {
    let Some(client) = client else {
        log::info!("未配置模型服务，使用本地回复");
        return fallback::respond(message, records);
    };

    let system_prompt = build_system_prompt(records);
    let user_prompt = build_user_prompt(message, records);

    match client.call(&system_prompt, &user_prompt).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            log::warn!("{} 返回了空内容，改用本地回复", client.name());
            fallback::respond(message, records)
        }
        Err(err) => {
            log::warn!("{} 调用失败，改用本地回复: {err:#}", client.name());
            fallback::respond(message, records)
        }
    }
}
