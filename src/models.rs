//! src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 发布平台
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Douyin,
    Xiaohongshu,
    Kuaishou,
    Shipinhao,
    Bilibili,
    #[default]
    #[serde(other)]
    Other,
}

impl Platform {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "douyin" | "抖音" => Platform::Douyin,
            "xiaohongshu" | "小红书" => Platform::Xiaohongshu,
            "kuaishou" | "快手" => Platform::Kuaishou,
            "shipinhao" | "视频号" => Platform::Shipinhao,
            "bilibili" | "b站" => Platform::Bilibili,
            _ => Platform::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Douyin => "抖音",
            Platform::Xiaohongshu => "小红书",
            Platform::Kuaishou => "快手",
            Platform::Shipinhao => "视频号",
            Platform::Bilibili => "B站",
            Platform::Other => "其他",
        }
    }
}

/// 服务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Cleaning,
    Babysitting,
    Eldercare,
    Cooking,
    Laundry,
    #[default]
    #[serde(other)]
    Other,
}

impl ServiceType {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "cleaning" | "保洁" => ServiceType::Cleaning,
            "babysitting" | "月嫂" | "育婴" => ServiceType::Babysitting,
            "eldercare" | "养老" | "护理" => ServiceType::Eldercare,
            "cooking" | "烹饪" => ServiceType::Cooking,
            "laundry" | "洗衣" => ServiceType::Laundry,
            _ => ServiceType::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Cleaning => "家居保洁",
            ServiceType::Babysitting => "月嫂育婴",
            ServiceType::Eldercare => "老人护理",
            ServiceType::Cooking => "烹饪服务",
            ServiceType::Laundry => "洗衣熨烫",
            ServiceType::Other => "其他服务",
        }
    }
}

/// 目标用户年龄段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetAge {
    Young,
    Middle,
    Senior,
    #[default]
    #[serde(other)]
    All,
}

impl TargetAge {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "young" => TargetAge::Young,
            "middle" => TargetAge::Middle,
            "senior" => TargetAge::Senior,
            _ => TargetAge::All,
        }
    }
}

/// 服务频次
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceFrequency {
    Daily,
    Weekly,
    Monthly,
    #[serde(other)]
    Occasional,
}

impl ServiceFrequency {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "daily" => ServiceFrequency::Daily,
            "weekly" => ServiceFrequency::Weekly,
            "monthly" => ServiceFrequency::Monthly,
            _ => ServiceFrequency::Occasional,
        }
    }
}

/// 用户录入的视频内容，不含身份信息。
///
/// 新增和整体替换都使用这个结构，`id` 与 `created_at` 只由存储层分配。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoDraft {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub content: String,
    #[serde(deserialize_with = "lenient_keywords")]
    pub keywords: Vec<String>,
    #[serde(deserialize_with = "lenient_counter")]
    pub views: u64,
    #[serde(deserialize_with = "lenient_counter")]
    pub likes: u64,
    #[serde(deserialize_with = "lenient_counter")]
    pub comments: u64,
    #[serde(deserialize_with = "lenient_counter")]
    pub shares: u64,
    #[serde(deserialize_with = "lenient_platform")]
    pub platform: Platform,
    #[serde(deserialize_with = "lenient_service_type")]
    pub service_type: ServiceType,
    #[serde(deserialize_with = "lenient_target_age")]
    pub target_age: TargetAge,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_frequency")]
    pub service_frequency: Option<ServiceFrequency>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_string")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_number")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_number")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_number")]
    pub customer_satisfaction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_number")]
    pub completion_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_number")]
    pub engagement_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_number")]
    pub conversion_rate: Option<f64>,
}

/// 一条已入库的视频数据记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default = "Utc::now", deserialize_with = "lenient_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub draft: VideoDraft,
}

impl VideoRecord {
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>, draft: VideoDraft) -> Self {
        Self {
            id: id.into(),
            created_at,
            draft,
        }
    }
}

impl std::ops::Deref for VideoRecord {
    type Target = VideoDraft;

    fn deref(&self) -> &Self::Target {
        &self.draft
    }
}

/// 把逗号分隔的关键词输入拆成列表，兼容中文逗号。
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split([',', '，'])
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

// --- 反序列化时的宽松转换 ---
//
// 录入数据来自浏览器导出或手工编辑，字段可能缺失、为 null、是字符串形式的数字，
// 也可能是负数。计数器一律归零，可选数值一律视为未填写。

fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn lenient_counter<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value)
        .filter(|n| *n > 0.0)
        .map(|n| n.trunc() as u64)
        .unwrap_or(0))
}

fn lenient_opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value).filter(|n| *n > 0.0))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_string(deserializer)?;
    Ok(Some(value).filter(|s| !s.trim().is_empty()))
}

fn lenient_keywords<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Value::String(s) => split_keywords(&s),
        _ => Vec::new(),
    })
}

fn lenient_platform<'de, D>(deserializer: D) -> Result<Platform, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_string(deserializer)?;
    Ok(if value.is_empty() {
        Platform::Other
    } else {
        Platform::parse(&value)
    })
}

fn lenient_service_type<'de, D>(deserializer: D) -> Result<ServiceType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_string(deserializer)?;
    Ok(ServiceType::parse(&value))
}

fn lenient_target_age<'de, D>(deserializer: D) -> Result<TargetAge, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_string(deserializer)?;
    Ok(TargetAge::parse(&value))
}

fn lenient_frequency<'de, D>(deserializer: D) -> Result<Option<ServiceFrequency>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_string(deserializer)?;
    Ok(Some(value)
        .filter(|s| !s.is_empty())
        .map(|s| ServiceFrequency::parse(&s)))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok(),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    };
    Ok(parsed.unwrap_or_else(Utc::now))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_counters_coerce_to_zero() {
        let json = r#"{
            "id": "1",
            "title": "保洁小技巧",
            "views": "1200",
            "likes": -5,
            "comments": null,
            "shares": "abc",
            "platform": "douyin"
        }"#;
        let record: VideoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.views, 1200);
        assert_eq!(record.likes, 0);
        assert_eq!(record.comments, 0);
        assert_eq!(record.shares, 0);
        assert_eq!(record.platform, Platform::Douyin);
        assert!(record.keywords.is_empty());
    }

    #[test]
    fn unknown_categories_fall_back_to_catch_all_variants() {
        let json = r#"{
            "id": "2",
            "platform": "weibo",
            "serviceType": "gardening",
            "targetAge": "teens",
            "serviceFrequency": "yearly"
        }"#;
        let record: VideoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.platform, Platform::Other);
        assert_eq!(record.service_type, ServiceType::Other);
        assert_eq!(record.target_age, TargetAge::All);
        assert_eq!(record.service_frequency, Some(ServiceFrequency::Occasional));
    }

    #[test]
    fn optional_numbers_are_dropped_when_invalid() {
        let json = r#"{
            "id": "3",
            "price": "120.5",
            "duration": "",
            "customerSatisfaction": 0,
            "completionRate": 88
        }"#;
        let record: VideoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.price, Some(120.5));
        assert_eq!(record.duration, None);
        assert_eq!(record.customer_satisfaction, None);
        assert_eq!(record.completion_rate, Some(88.0));
    }

    #[test]
    fn browser_export_shape_is_accepted() {
        let json = r#"{
            "id": "1718000000000",
            "title": "月嫂的一天",
            "content": "早上六点起床：先给宝宝喂奶",
            "keywords": ["月嫂", "育婴"],
            "views": 3000,
            "likes": 120,
            "comments": 30,
            "shares": 12,
            "platform": "xiaohongshu",
            "createdAt": "2024-06-10T08:00:00.000Z",
            "serviceType": "babysitting"
        }"#;
        let record: VideoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "1718000000000");
        assert_eq!(record.keywords, vec!["月嫂", "育婴"]);
        assert_eq!(record.service_type, ServiceType::Babysitting);
        assert_eq!(record.created_at.to_rfc3339(), "2024-06-10T08:00:00+00:00");
    }

    #[test]
    fn keywords_split_on_both_comma_styles() {
        assert_eq!(
            split_keywords("保洁, 收纳，  ,深度清洁"),
            vec!["保洁", "收纳", "深度清洁"]
        );
    }
}
