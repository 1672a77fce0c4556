//! src/cli.rs
use clap::{Args, Parser, Subcommand};

use crate::hotspots::Timeframe;
use crate::models::{split_keywords, Platform, ServiceFrequency, ServiceType, TargetAge, VideoDraft};
use crate::payment::SubscriptionPlan;

/// 家政内容创作者的数据分析与 AI 创作助手
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 初始化配置文件
    #[command(alias = "i")]
    Init,

    /// 录入一条视频数据
    #[command(alias = "a")]
    Add {
        #[command(flatten)]
        record: RecordArgs,
    },

    /// 查看已录入的视频数据
    #[command(alias = "ls")]
    List {
        /// 只显示该时间之后录入的数据（如 "2024-01-01"、"7 days ago"）
        #[arg(short, long)]
        since: Option<String>,

        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 整体替换一条视频数据
    Update {
        /// 记录 ID
        id: String,

        #[command(flatten)]
        record: RecordArgs,
    },

    /// 删除一条视频数据
    #[command(alias = "rm")]
    Delete {
        /// 记录 ID
        id: String,

        /// 跳过确认
        #[arg(short, long)]
        yes: bool,
    },

    /// 从导出的 JSON 文件导入视频数据
    Import {
        /// JSON 文件路径
        file: std::path::PathBuf,
    },

    /// 数据看板：汇总统计、分布和创作风格
    #[command(alias = "s")]
    Stats {
        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 向 AI 助手提问
    #[command(alias = "c")]
    Chat {
        /// 问题内容
        message: String,

        /// 逐字输出回答
        #[arg(long)]
        stream: bool,
    },

    /// 查看家政行业热点
    #[command(alias = "hot")]
    Hotspots {
        /// 时间范围
        #[arg(short, long, value_enum, default_value_t = Timeframe::Today)]
        timeframe: Timeframe,

        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 订阅套餐，生成微信支付二维码
    Pay {
        /// 套餐类型
        #[arg(value_enum)]
        plan: SubscriptionPlan,
    },

    /// [Internal] 处理微信支付回调
    #[command(hide = true)]
    Notify {
        /// 回调内容
        body: String,
    },
}

/// 一条视频数据的录入参数
#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    /// 视频标题，不填时交互式输入
    #[arg(short, long)]
    pub title: Option<String>,

    /// 视频文案
    #[arg(long, default_value = "")]
    pub content: String,

    /// 关键词，用逗号分隔
    #[arg(short, long, default_value = "")]
    pub keywords: String,

    /// 播放量
    #[arg(long, default_value = "0", value_parser = parse_counter)]
    pub views: u64,

    /// 点赞量
    #[arg(long, default_value = "0", value_parser = parse_counter)]
    pub likes: u64,

    /// 评论量
    #[arg(long, default_value = "0", value_parser = parse_counter)]
    pub comments: u64,

    /// 转发量
    #[arg(long, default_value = "0", value_parser = parse_counter)]
    pub shares: u64,

    /// 发布平台: douyin/xiaohongshu/kuaishou/shipinhao/bilibili/other
    #[arg(short, long, default_value = "douyin")]
    pub platform: String,

    /// 服务类型: cleaning/babysitting/eldercare/cooking/laundry/other
    #[arg(long, default_value = "cleaning")]
    pub service_type: String,

    /// 目标人群: young/middle/senior/all
    #[arg(long, default_value = "all")]
    pub target_age: String,

    /// 服务频次: daily/weekly/monthly/occasional
    #[arg(long)]
    pub frequency: Option<String>,

    /// 地理位置
    #[arg(long)]
    pub location: Option<String>,

    /// 视频时长（秒）
    #[arg(long)]
    pub duration: Option<f64>,

    /// 服务价格
    #[arg(long)]
    pub price: Option<f64>,

    /// 客户满意度 1-5
    #[arg(long)]
    pub satisfaction: Option<f64>,

    /// 完播率 0-100
    #[arg(long)]
    pub completion_rate: Option<f64>,

    /// 互动率 0-100
    #[arg(long)]
    pub engagement_rate: Option<f64>,

    /// 转化率 0-100
    #[arg(long)]
    pub conversion_rate: Option<f64>,
}

impl RecordArgs {
    pub fn into_draft(self, title: String) -> VideoDraft {
        let positive = |v: Option<f64>| v.filter(|n| n.is_finite() && *n > 0.0);
        VideoDraft {
            title,
            content: self.content,
            keywords: split_keywords(&self.keywords),
            views: self.views,
            likes: self.likes,
            comments: self.comments,
            shares: self.shares,
            platform: Platform::parse(&self.platform),
            service_type: ServiceType::parse(&self.service_type),
            target_age: TargetAge::parse(&self.target_age),
            service_frequency: self.frequency.as_deref().map(ServiceFrequency::parse),
            location: self.location.filter(|l| !l.trim().is_empty()),
            duration: positive(self.duration),
            price: positive(self.price),
            customer_satisfaction: positive(self.satisfaction),
            completion_rate: positive(self.completion_rate),
            engagement_rate: positive(self.engagement_rate),
            conversion_rate: positive(self.conversion_rate),
        }
    }
}

/// 计数器宽松解析：无法识别的输入记为 0
fn parse_counter(raw: &str) -> Result<u64, String> {
    Ok(raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n > 0.0)
        .map(|n| n.trunc() as u64)
        .unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_coerce_garbage_to_zero() {
        assert_eq!(parse_counter("1200"), Ok(1200));
        assert_eq!(parse_counter("12.9"), Ok(12));
        assert_eq!(parse_counter("abc"), Ok(0));
        assert_eq!(parse_counter(""), Ok(0));
    }

    #[test]
    fn add_arguments_build_a_draft() {
        let cli = Cli::parse_from([
            "homemate",
            "add",
            "--title",
            "厨房深度清洁",
            "--keywords",
            "保洁，厨房",
            "--views",
            "oops",
            "--likes",
            "30",
            "--platform",
            "xiaohongshu",
            "--price",
            "0",
        ]);
        let Commands::Add { record } = cli.command else {
            panic!("expected add command");
        };
        let title = record.title.clone().unwrap();
        let draft = record.into_draft(title);
        assert_eq!(draft.title, "厨房深度清洁");
        assert_eq!(draft.keywords, vec!["保洁", "厨房"]);
        assert_eq!(draft.views, 0);
        assert_eq!(draft.likes, 30);
        assert_eq!(draft.platform, Platform::Xiaohongshu);
        assert_eq!(draft.service_type, ServiceType::Cleaning);
        assert_eq!(draft.price, None);
    }
}
