use crate::config;
use anyhow::{Context, Result};
use colored::Colorize;

pub async fn handle_init() -> Result<()> {
    let path = config::create_default_config()
        .await
        .context("无法初始化配置。")?;
    println!("{} {}", "✅ 已创建默认配置文件:".green(), path.display());
    Ok(())
}
