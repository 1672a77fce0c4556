//! src/commands/chat.rs

use crate::assistant;
use crate::commands::open_store;
use crate::config::get_llm_client;
use crate::store::VideoStore;
use anyhow::{anyhow, Context, Result};
use indicatif::ProgressBar;
use std::io::Write;
use std::time::Duration;

pub async fn handle_chat(message: String, stream: bool) -> Result<()> {
    let message = message.trim();
    if message.is_empty() {
        return Err(anyhow!("消息不能为空"));
    }

    let (config, store) = open_store().await?;
    let records = store.list().await.context("无法读取视频数据。")?;
    // 客户端构建失败（如代理地址无效）同样走本地回复
    let llm = get_llm_client(&config).unwrap_or_else(|err| {
        log::warn!("无法创建模型客户端，改用本地回复: {err:#}");
        None
    });

    let reply = match &llm {
        Some(llm) => {
            let pb = ProgressBar::new_spinner().with_message("AI 正在思考...");
            pb.enable_steady_tick(Duration::from_millis(120));
            let reply = assistant::answer(Some(llm.as_client()), message, &records).await;
            pb.finish_and_clear();
            reply
        }
        None => assistant::answer(None, message, &records).await,
    };

    if stream {
        print_streaming(&reply).await?;
    } else {
        println!("{reply}");
    }
    Ok(())
}

/// 逐字输出，模拟打字效果
async fn print_streaming(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout();
    for ch in text.chars() {
        write!(stdout, "{ch}")?;
        stdout.flush()?;
        tokio::time::sleep(Duration::from_millis(15)).await;
    }
    writeln!(stdout)?;
    Ok(())
}
