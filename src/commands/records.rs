//! src/commands/records.rs

use crate::cli::RecordArgs;
use crate::commands::open_store;
use crate::format::{thousands, truncate};
use crate::store::VideoStore;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::io::IsTerminal;
use std::path::Path;

/// 标题缺省时在终端里询问，非交互环境直接报错
fn resolve_title(record: &RecordArgs) -> Result<String> {
    if let Some(title) = record.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(title.to_string());
    }
    if !std::io::stdin().is_terminal() {
        return Err(anyhow!("缺少视频标题，请使用 --title 指定"));
    }
    let title: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("视频标题")
        .interact_text()?;
    Ok(title.trim().to_string())
}

pub async fn handle_add(record: RecordArgs) -> Result<()> {
    let title = resolve_title(&record)?;
    let (_, store) = open_store().await?;

    let saved = store
        .insert(record.into_draft(title))
        .await
        .context("无法保存视频数据。")?;

    println!("{} {}", "✅ 已添加视频记录:".green(), saved.id.cyan());
    Ok(())
}

pub async fn handle_update(id: String, record: RecordArgs) -> Result<()> {
    let title = resolve_title(&record)?;
    let (_, store) = open_store().await?;

    let updated = store
        .update(&id, record.into_draft(title))
        .await
        .context("无法更新视频数据。")?;

    println!("{} {}", "✅ 已更新视频记录:".green(), updated.id.cyan());
    Ok(())
}

pub async fn handle_delete(id: String, yes: bool) -> Result<()> {
    let (_, store) = open_store().await?;

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("确认删除视频记录 {id} 吗?"))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("好的，已取消删除。");
            return Ok(());
        }
    }

    store.delete(&id).await.context("无法删除视频数据。")?;
    println!("{} {}", "🗑️ 已删除视频记录:".green(), id.cyan());
    Ok(())
}

pub async fn handle_import(file: &Path) -> Result<()> {
    let (_, store) = open_store().await?;
    let imported = store
        .import(file)
        .await
        .with_context(|| format!("无法从 {} 导入数据。", file.display()))?;
    println!("{} {} 条", "✅ 已导入视频记录:".green(), imported);
    Ok(())
}

fn parse_since(since: &str) -> Result<DateTime<Utc>> {
    dateparser::parse(since).map_err(|e| anyhow!("无法识别的时间: {since} ({e})"))
}

pub async fn handle_list(since: Option<String>, json: bool) -> Result<()> {
    let (_, store) = open_store().await?;
    let mut records = store.list().await.context("无法读取视频数据。")?;

    if let Some(since) = since.as_deref() {
        let since = parse_since(since)?;
        records.retain(|r| r.created_at >= since);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{}", "暂无数据，请先使用 `homemate add` 添加视频数据。".yellow());
        return Ok(());
    }

    println!("\n{}", "=".repeat(60));
    for record in &records {
        println!(
            "{}  {}  [{}]",
            record.id.cyan(),
            truncate(&record.title, 24).bold(),
            record.platform.label()
        );
        println!(
            "    播放 {}  点赞 {}  评论 {}  转发 {}  · {}",
            thousands(record.views),
            thousands(record.likes),
            thousands(record.comments),
            thousands(record.shares),
            record
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
        );
        if !record.keywords.is_empty() {
            println!("    🏷️ {}", record.keywords.join("、"));
        }
    }
    println!("{}", "=".repeat(60));
    println!("共 {} 条记录", records.len());
    Ok(())
}
