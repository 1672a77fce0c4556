//! src/hotspots.rs
//!
//! 行业热点数据源。目前只有内置的静态数据，接入真实数据源时实现
//! [`HotspotProvider`] 即可。

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    #[default]
    Today,
    Week,
    Month,
}

impl Timeframe {
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Today => "今日",
            Timeframe::Week => "本周",
            Timeframe::Month => "本月",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicCategory {
    Cleaning,
    Babysitting,
    Eldercare,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Hot,
    Stable,
}

impl Trend {
    pub fn icon(&self) -> &'static str {
        match self {
            Trend::Rising => "📈",
            Trend::Hot => "🔥",
            Trend::Stable => "➖",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotTopic {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: TopicCategory,
    pub trend: Trend,
    pub engagement: u64,
    pub timeframe: Timeframe,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceShare {
    pub name: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionalDemand {
    pub region: String,
    pub demand: u32,
    pub supply: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryMetrics {
    /// 市场规模，亿元
    pub market_size: f64,
    /// 增长率，%
    pub growth_rate: f64,
    /// 用户渗透率，%
    pub user_penetration: f64,
    /// 平均服务价格，元/小时
    pub avg_service_price: f64,
    pub popular_services: Vec<ServiceShare>,
    pub regional_data: Vec<RegionalDemand>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotReport {
    pub hot_topics: Vec<HotTopic>,
    pub industry_metrics: IndustryMetrics,
    pub last_updated: DateTime<Utc>,
}

#[async_trait]
pub trait HotspotProvider: Send + Sync {
    async fn fetch(&self, timeframe: Timeframe) -> Result<HotspotReport>;
}

/// 内置的静态热点数据
pub struct StaticHotspots;

type TopicSeed = (&'static str, &'static str, &'static str, TopicCategory, Trend, u64, &'static str);

const TODAY: &[TopicSeed] = &[
    ("1", "春节期间家政服务需求激增，预订量同比增长300%", "随着春节临近，深度清洁、年夜饭制作等服务需求大幅增长", TopicCategory::Cleaning, Trend::Rising, 8500, "家政行业报告"),
    ("2", "智能家政设备市场突破，AI辅助服务成新趋势", "扫地机器人、智能清洁工具等设备与传统家政服务结合", TopicCategory::General, Trend::Hot, 12300, "科技资讯"),
    ("3", "月嫂服务价格上涨20%，高端育婴师供不应求", "专业月嫂和育婴师需求持续增长，服务价格稳步上升", TopicCategory::Babysitting, Trend::Rising, 6800, "母婴行业周刊"),
];

const WEEK: &[TopicSeed] = &[
    ("4", "居家养老服务成热门赛道，专业护理员缺口达50万", "老龄化社会推动居家养老服务快速发展，专业人才紧缺", TopicCategory::Eldercare, Trend::Hot, 15600, "养老产业观察"),
    ("5", "家政O2O平台融资热潮，头部企业估值突破百亿", "多家家政平台完成新一轮融资，行业整合加速", TopicCategory::General, Trend::Stable, 9200, "投资界"),
    ("6", "绿色清洁产品需求增长，环保家政服务受青睐", "消费者环保意识提升，无毒清洁产品和服务成为新宠", TopicCategory::Cleaning, Trend::Rising, 7400, "环保资讯"),
];

const MONTH: &[TopicSeed] = &[
    ("7", "家政行业标准化进程加速，服务质量认证体系完善", "国家推出家政服务标准化指导意见，行业规范化发展", TopicCategory::General, Trend::Stable, 18900, "政策解读"),
    ("8", "95后成为家政服务主力消费群体，线上预订占比超70%", "年轻消费者偏好便捷的线上预订方式，推动行业数字化转型", TopicCategory::General, Trend::Hot, 22100, "消费趋势报告"),
    ("9", "家政服务员职业技能培训体系升级，专业化水平提升", "政府加大培训投入，家政服务员技能水平和收入待遇双提升", TopicCategory::General, Trend::Rising, 13500, "职业教育网"),
];

impl StaticHotspots {
    pub fn topics(timeframe: Timeframe) -> Vec<HotTopic> {
        let seeds = match timeframe {
            Timeframe::Today => TODAY,
            Timeframe::Week => WEEK,
            Timeframe::Month => MONTH,
        };
        let now = Utc::now();
        seeds
            .iter()
            .map(
                |&(id, title, description, category, trend, engagement, source)| HotTopic {
                    id: id.to_string(),
                    title: title.to_string(),
                    description: description.to_string(),
                    category,
                    trend,
                    engagement,
                    timeframe,
                    source: source.to_string(),
                    created_at: now,
                },
            )
            .collect()
    }

    pub fn industry_metrics() -> IndustryMetrics {
        let services = [
            ("家居保洁", 64.8),
            ("月嫂育婴", 23.5),
            ("老人护理", 18.7),
            ("烹饪服务", 12.3),
            ("洗衣熨烫", 8.9),
        ];
        let regions = [
            ("北京", 95, 78),
            ("上海", 92, 85),
            ("广州", 88, 82),
            ("深圳", 90, 75),
            ("杭州", 85, 80),
        ];

        IndustryMetrics {
            market_size: 10149.0,
            growth_rate: 15.2,
            user_penetration: 93.8,
            avg_service_price: 120.0,
            popular_services: services
                .iter()
                .map(|&(name, percentage)| ServiceShare {
                    name: name.to_string(),
                    percentage,
                })
                .collect(),
            regional_data: regions
                .iter()
                .map(|&(region, demand, supply)| RegionalDemand {
                    region: region.to_string(),
                    demand,
                    supply,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl HotspotProvider for StaticHotspots {
    async fn fetch(&self, timeframe: Timeframe) -> Result<HotspotReport> {
        Ok(HotspotReport {
            hot_topics: Self::topics(timeframe),
            industry_metrics: Self::industry_metrics(),
            last_updated: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn each_timeframe_has_its_own_topics() {
        let provider = StaticHotspots;
        for timeframe in [Timeframe::Today, Timeframe::Week, Timeframe::Month] {
            let report = provider.fetch(timeframe).await.unwrap();
            assert_eq!(report.hot_topics.len(), 3);
            assert!(report.hot_topics.iter().all(|t| t.timeframe == timeframe));
        }
        let week = provider.fetch(Timeframe::Week).await.unwrap();
        assert_eq!(week.hot_topics[0].id, "4");
        assert_eq!(week.hot_topics[0].category, TopicCategory::Eldercare);
    }

    #[test]
    fn metrics_serialize_in_camel_case() {
        let json = serde_json::to_value(StaticHotspots::industry_metrics()).unwrap();
        assert_eq!(json["marketSize"], 10149.0);
        assert_eq!(json["popularServices"][0]["name"], "家居保洁");
        assert_eq!(json["regionalData"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn seeded_trends_match_the_published_set() {
        for timeframe in [Timeframe::Today, Timeframe::Week, Timeframe::Month] {
            for topic in StaticHotspots::topics(timeframe) {
                let trend = serde_json::to_value(topic.trend).unwrap();
                assert!(["rising", "hot", "stable"].contains(&trend.as_str().unwrap()));
                assert!(!topic.trend.icon().is_empty());
            }
        }
    }
}
