//! src/commands/stats.rs

use crate::commands::open_store;
use crate::format::{duration, percent, price, rounded, thousands, truncate};
use crate::models::VideoRecord;
use crate::stats::{aggregate, display_keywords, top_records, AggregateStats, KeywordCount};
use crate::store::VideoStore;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

const TOP_VIDEOS: usize = 10;
const TOP_DISPLAY_KEYWORDS: usize = 10;
const TITLE_DISPLAY_CHARS: usize = 20;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TopVideo {
    id: String,
    title: String,
    views: u64,
    likes: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Dashboard {
    stats: AggregateStats,
    top_videos: Vec<TopVideo>,
    keywords: Vec<KeywordCount>,
}

impl Dashboard {
    fn build(records: &[VideoRecord]) -> Self {
        let top_videos = top_records(records, TOP_VIDEOS)
            .into_iter()
            .map(|r| TopVideo {
                id: r.id.clone(),
                title: truncate(&r.title, TITLE_DISPLAY_CHARS),
                views: r.views,
                likes: r.likes,
            })
            .collect();

        Self {
            stats: aggregate(records),
            top_videos,
            keywords: display_keywords(records, TOP_DISPLAY_KEYWORDS),
        }
    }
}

pub async fn handle_stats(json: bool) -> Result<()> {
    let (_, store) = open_store().await?;
    let records = store.list().await.context("无法读取视频数据。")?;
    let dashboard = Dashboard::build(&records);

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    if dashboard.stats.is_empty() {
        println!("{}", "暂无数据，请先使用 `homemate add` 添加视频数据。".yellow());
        return Ok(());
    }

    print_dashboard(&dashboard);
    Ok(())
}

fn print_section(title: &str) {
    println!("\n{}", title.bold().cyan());
    println!("{}", "-".repeat(60));
}

fn print_dashboard(dashboard: &Dashboard) {
    let stats = &dashboard.stats;

    println!("\n{}", "📊 数据看板".bold().yellow());
    println!("{}", "=".repeat(60));
    println!("视频数量: {}", stats.record_count);

    print_section("总计");
    println!(
        "播放 {}  点赞 {}  评论 {}  转发 {}",
        thousands(stats.totals.views),
        thousands(stats.totals.likes),
        thousands(stats.totals.comments),
        thousands(stats.totals.shares)
    );

    print_section("平均");
    println!(
        "播放 {}  点赞 {}  评论 {}  转发 {}",
        rounded(stats.averages.views),
        rounded(stats.averages.likes),
        rounded(stats.averages.comments),
        rounded(stats.averages.shares)
    );

    print_section("互动率");
    println!(
        "点赞率 {}  评论率 {}  转发率 {}  综合互动率 {}",
        percent(stats.rates.like_rate),
        percent(stats.rates.comment_rate),
        percent(stats.rates.share_rate),
        percent(stats.rates.engagement_rate)
    );

    let fields = &stats.field_averages;
    let mut optional = Vec::new();
    if fields.price > 0.0 {
        optional.push(format!("平均价格 {}", price(fields.price)));
    }
    if fields.duration > 0.0 {
        optional.push(format!("平均时长 {}", duration(fields.duration)));
    }
    if fields.customer_satisfaction > 0.0 {
        optional.push(format!("满意度 {:.1}", fields.customer_satisfaction));
    }
    if fields.completion_rate > 0.0 {
        optional.push(format!("完播率 {}", percent(fields.completion_rate)));
    }
    if fields.conversion_rate > 0.0 {
        optional.push(format!("转化率 {}", percent(fields.conversion_rate)));
    }
    if !optional.is_empty() {
        println!("{}", optional.join("  "));
    }

    print_section("平台分布");
    for entry in &stats.platforms {
        println!("  • {}: {}", entry.platform.label(), entry.count);
    }

    print_section("服务类型");
    for entry in &stats.service_types {
        println!("  • {}: {}", entry.service_type.label(), entry.count);
    }

    print_section("🏆 热门视频");
    for (index, video) in dashboard.top_videos.iter().enumerate() {
        println!(
            "{:>2}. {}  播放 {}  点赞 {}",
            index + 1,
            video.title.bold(),
            thousands(video.views),
            thousands(video.likes)
        );
    }

    if !dashboard.keywords.is_empty() {
        print_section("🏷️ 关键词");
        let line: Vec<String> = dashboard
            .keywords
            .iter()
            .map(|k| format!("{}({})", k.keyword, k.count))
            .collect();
        println!("{}", line.join("  "));
    }

    print_section("✍️ 创作风格");
    let style = &stats.style;
    if let Some(len) = style.avg_title_length {
        println!("平均标题长度: {len} 字");
    }
    if let Some(len) = style.avg_body_length {
        println!("平均文案长度: {len} 字");
    }
    let traits: Vec<&str> = [
        (style.has_emoji, "使用表情"),
        (style.has_emphasis, "感叹强调"),
        (style.has_question, "提问互动"),
        (style.has_structure, "分段结构"),
        (style.has_dialogue, "对话引用"),
    ]
    .into_iter()
    .filter_map(|(on, label)| on.then_some(label))
    .collect();
    if !traits.is_empty() {
        println!("风格特点: {}", traits.join("、"));
    }
    println!(
        "建议长度: 标题约 {} 字，文案约 {} 字",
        stats.length_preference.title_length, stats.length_preference.body_length
    );
}
