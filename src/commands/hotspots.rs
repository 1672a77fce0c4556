//! src/commands/hotspots.rs

use crate::format::compact;
use crate::hotspots::{HotspotProvider, HotspotReport, StaticHotspots, Timeframe, TopicCategory};
use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;

fn category_label(category: TopicCategory) -> &'static str {
    match category {
        TopicCategory::Cleaning => "保洁",
        TopicCategory::Babysitting => "育婴",
        TopicCategory::Eldercare => "养老",
        TopicCategory::General => "综合",
    }
}

pub async fn handle_hotspots(timeframe: Timeframe, json: bool) -> Result<()> {
    let report = StaticHotspots
        .fetch(timeframe)
        .await
        .context("无法获取热点数据。")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(timeframe, &report);
    Ok(())
}

fn print_report(timeframe: Timeframe, report: &HotspotReport) {
    println!(
        "\n{}",
        format!("🔥 {}家政热点", timeframe.label()).bold().yellow()
    );
    println!("{}", "=".repeat(60));
    for (index, topic) in report.hot_topics.iter().enumerate() {
        println!(
            "{}. {} {} [{}]",
            index + 1,
            topic.trend.icon(),
            topic.title.bold(),
            category_label(topic.category)
        );
        println!("   {}", topic.description.dimmed());
        println!("   热度 {} · 来源: {}", compact(topic.engagement), topic.source);
    }

    let metrics = &report.industry_metrics;
    println!("\n{}", "📊 行业数据".bold().cyan());
    println!("{}", "-".repeat(60));
    println!("市场规模: {} 亿元", metrics.market_size);
    println!("增长率: {}%", metrics.growth_rate);
    println!("用户渗透率: {}%", metrics.user_penetration);
    println!("平均服务价格: {} 元/小时", metrics.avg_service_price);

    println!("\n热门服务:");
    for service in &metrics.popular_services {
        println!("  • {}: {}%", service.name, service.percentage);
    }

    println!("\n区域供需:");
    for region in &metrics.regional_data {
        println!(
            "  • {}: 需求 {} / 供给 {}",
            region.region, region.demand, region.supply
        );
    }

    println!(
        "\n更新时间: {}",
        report
            .last_updated
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
    );
}
