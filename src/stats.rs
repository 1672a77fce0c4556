//! src/stats.rs

use crate::models::{Platform, ServiceType, VideoRecord};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// 排行中保留的关键词个数
pub const TOP_KEYWORDS: usize = 5;
/// 没有可用标题时推荐的标题字数
pub const DEFAULT_TITLE_LENGTH: usize = 25;
/// 没有可用正文时推荐的正文字数
pub const DEFAULT_BODY_LENGTH: usize = 150;
/// 推荐标题字数的下限
pub const MIN_TITLE_LENGTH: usize = 15;
/// 推荐正文字数的下限
pub const MIN_BODY_LENGTH: usize = 100;

lazy_static! {
    static ref EMOJI: Regex =
        Regex::new(r"[\x{1F300}-\x{1FAFF}\x{2600}-\x{27BF}]").expect("emoji pattern is valid");
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Averages {
    pub views: f64,
    pub likes: f64,
    pub comments: f64,
    pub shares: f64,
}

/// 以播放量为分母的各项互动率，单位为百分比
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rates {
    pub like_rate: f64,
    pub comment_rate: f64,
    pub share_rate: f64,
    /// (点赞 + 评论 + 转发) / 播放
    pub engagement_rate: f64,
}

/// 可选字段的平均值，只统计填写了该字段的记录
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAverages {
    pub engagement_rate: f64,
    pub conversion_rate: f64,
    pub customer_satisfaction: f64,
    pub price: f64,
    pub duration: f64,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformCount {
    pub platform: Platform,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCount {
    pub service_type: ServiceType,
    pub count: usize,
}

/// 从标题和正文里观察到的写作习惯
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSignals {
    /// 非空标题的平均字数，没有标题时为 `None`
    pub avg_title_length: Option<usize>,
    /// 非空正文的平均字数，没有正文时为 `None`
    pub avg_body_length: Option<usize>,
    pub has_emoji: bool,
    pub has_emphasis: bool,
    pub has_question: bool,
    pub has_structure: bool,
    pub has_dialogue: bool,
}

/// 生成内容时建议采用的标题/正文长度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthPreference {
    pub title_length: usize,
    pub body_length: usize,
}

/// 一组视频记录的汇总统计。每次按需重新计算，不做持久化。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub record_count: usize,
    pub totals: Totals,
    pub averages: Averages,
    pub rates: Rates,
    pub field_averages: FieldAverages,
    pub top_keywords: Vec<KeywordCount>,
    pub platforms: Vec<PlatformCount>,
    pub service_types: Vec<ServiceCount>,
    pub best_record: Option<VideoRecord>,
    pub style: StyleSignals,
    pub length_preference: LengthPreference,
}

impl AggregateStats {
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

/// 把视频记录汇总为统计结果。
///
/// 纯函数：只读取输入并返回新分配的结果。空输入时所有数值为 0，
/// `best_record` 为 `None`，所有除法在分母为 0 时取 0。
pub fn aggregate(records: &[VideoRecord]) -> AggregateStats {
    let count = records.len();

    let totals = records.iter().fold(Totals::default(), |mut acc, r| {
        acc.views = acc.views.saturating_add(r.views);
        acc.likes = acc.likes.saturating_add(r.likes);
        acc.comments = acc.comments.saturating_add(r.comments);
        acc.shares = acc.shares.saturating_add(r.shares);
        acc
    });

    let averages = Averages {
        views: per_record(totals.views, count),
        likes: per_record(totals.likes, count),
        comments: per_record(totals.comments, count),
        shares: per_record(totals.shares, count),
    };

    let rates = Rates {
        like_rate: percentage(totals.likes, totals.views),
        comment_rate: percentage(totals.comments, totals.views),
        share_rate: percentage(totals.shares, totals.views),
        engagement_rate: percentage(
            totals
                .likes
                .saturating_add(totals.comments)
                .saturating_add(totals.shares),
            totals.views,
        ),
    };

    let field_averages = FieldAverages {
        engagement_rate: mean_present(records.iter().map(|r| r.engagement_rate)),
        conversion_rate: mean_present(records.iter().map(|r| r.conversion_rate)),
        customer_satisfaction: mean_present(records.iter().map(|r| r.customer_satisfaction)),
        price: mean_present(records.iter().map(|r| r.price)),
        duration: mean_present(records.iter().map(|r| r.duration)),
        completion_rate: mean_present(records.iter().map(|r| r.completion_rate)),
    };

    let top_keywords = rank_by_count(count_first_seen(
        records.iter().flat_map(|r| r.keywords.iter().cloned()),
    ))
    .into_iter()
    .take(TOP_KEYWORDS)
    .map(|(keyword, count)| KeywordCount { keyword, count })
    .collect();

    let platforms = count_first_seen(records.iter().map(|r| r.platform))
        .into_iter()
        .map(|(platform, count)| PlatformCount { platform, count })
        .collect();

    let service_types = count_first_seen(records.iter().map(|r| r.service_type))
        .into_iter()
        .map(|(service_type, count)| ServiceCount {
            service_type,
            count,
        })
        .collect();

    AggregateStats {
        record_count: count,
        totals,
        averages,
        rates,
        field_averages,
        top_keywords,
        platforms,
        service_types,
        best_record: best_record(records).cloned(),
        style: style_signals(records),
        length_preference: length_preference(records),
    }
}

/// 播放量最高的记录，播放量相同时取最先出现的一条。
pub fn best_record(records: &[VideoRecord]) -> Option<&VideoRecord> {
    let mut best: Option<&VideoRecord> = None;
    for record in records {
        match best {
            Some(current) if record.views <= current.views => {}
            _ => best = Some(record),
        }
    }
    best
}

/// 根据历史内容推断的标题/正文长度，带默认值与下限。
pub fn length_preference(records: &[VideoRecord]) -> LengthPreference {
    let title = average_length(records.iter().map(|r| r.title.as_str()))
        .unwrap_or(DEFAULT_TITLE_LENGTH);
    let body = average_length(records.iter().map(|r| r.content.as_str()))
        .unwrap_or(DEFAULT_BODY_LENGTH);

    LengthPreference {
        title_length: title.max(MIN_TITLE_LENGTH),
        body_length: body.max(MIN_BODY_LENGTH),
    }
}

pub fn style_signals(records: &[VideoRecord]) -> StyleSignals {
    let titles: Vec<&str> = records
        .iter()
        .map(|r| r.title.as_str())
        .filter(|t| !t.is_empty())
        .collect();
    let bodies: Vec<&str> = records
        .iter()
        .map(|r| r.content.as_str())
        .filter(|c| !c.is_empty())
        .collect();

    StyleSignals {
        avg_title_length: average_length(titles.iter().copied()),
        avg_body_length: average_length(bodies.iter().copied()),
        has_emoji: titles.iter().any(|t| EMOJI.is_match(t)),
        has_emphasis: titles.iter().any(|t| t.contains(['！', '!'])),
        has_question: titles.iter().any(|t| t.contains(['？', '?'])),
        has_structure: bodies.iter().any(|c| c.contains(['：', ':', '、'])),
        has_dialogue: bodies.iter().any(|c| c.contains(['"', '“', '”'])),
    }
}

/// 按播放量降序取前 `limit` 条记录，播放量相同保持原顺序。
pub fn top_records(records: &[VideoRecord], limit: usize) -> Vec<&VideoRecord> {
    let mut sorted: Vec<&VideoRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.views.cmp(&a.views));
    sorted.truncate(limit);
    sorted
}

/// 用于展示的关键词排行：去掉首尾空白并转为小写后再计数。
pub fn display_keywords(records: &[VideoRecord], limit: usize) -> Vec<KeywordCount> {
    let normalized = records.iter().flat_map(|r| {
        r.keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
    });

    rank_by_count(count_first_seen(normalized))
        .into_iter()
        .take(limit)
        .map(|(keyword, count)| KeywordCount { keyword, count })
        .collect()
}

fn per_record(total: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn mean_present(values: impl Iterator<Item = Option<f64>>) -> f64 {
    let (sum, n) = values
        .flatten()
        .filter(|v| *v > 0.0)
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

fn average_length<'a>(texts: impl Iterator<Item = &'a str>) -> Option<usize> {
    let (sum, n) = texts
        .filter(|t| !t.is_empty())
        .fold((0usize, 0usize), |(sum, n), t| (sum + t.chars().count(), n + 1));
    if n == 0 {
        None
    } else {
        Some((sum as f64 / n as f64).round() as usize)
    }
}

/// 计数并按首次出现的顺序返回
fn count_first_seen<K>(items: impl Iterator<Item = K>) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    for item in items {
        match index.get(&item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }
    counts
}

// 稳定排序，计数相同的保持首次出现的顺序
fn rank_by_count<K>(mut counts: Vec<(K, usize)>) -> Vec<(K, usize)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VideoDraft;
    use chrono::Utc;

    fn record(id: &str, views: u64, likes: u64) -> VideoRecord {
        VideoRecord::new(
            id,
            Utc::now(),
            VideoDraft {
                views,
                likes,
                ..Default::default()
            },
        )
    }

    fn with_text(id: &str, title: &str, content: &str, keywords: &[&str]) -> VideoRecord {
        VideoRecord::new(
            id,
            Utc::now(),
            VideoDraft {
                title: title.to_string(),
                content: content.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn two_record_scenario() {
        let records = vec![record("a", 100, 10), record("b", 300, 9)];
        let stats = aggregate(&records);

        assert_eq!(stats.totals.views, 400);
        assert_eq!(stats.totals.likes, 19);
        assert_eq!(stats.best_record.as_ref().map(|r| r.id.as_str()), Some("b"));
        assert!((stats.rates.like_rate - 4.75).abs() < 1e-9);
        assert!((stats.averages.views - 200.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let stats = aggregate(&[]);
        assert!(stats.is_empty());
        assert_eq!(stats.totals, Totals::default());
        assert_eq!(stats.averages, Averages::default());
        assert_eq!(stats.rates, Rates::default());
        assert_eq!(stats.field_averages, FieldAverages::default());
        assert!(stats.best_record.is_none());
        assert!(stats.top_keywords.is_empty());
        assert!(stats.platforms.is_empty());
        assert_eq!(
            stats.length_preference,
            LengthPreference {
                title_length: DEFAULT_TITLE_LENGTH,
                body_length: DEFAULT_BODY_LENGTH,
            }
        );
    }

    #[test]
    fn rates_are_zero_without_views() {
        let records = vec![record("a", 0, 5), record("b", 0, 3)];
        let stats = aggregate(&records);
        assert_eq!(stats.totals.likes, 8);
        assert_eq!(stats.rates.like_rate, 0.0);
        assert_eq!(stats.rates.engagement_rate, 0.0);
        assert!(stats.rates.comment_rate.is_finite());
    }

    #[test]
    fn sums_do_not_depend_on_order() {
        let forward = vec![record("a", 10, 1), record("b", 20, 2), record("c", 30, 3)];
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = aggregate(&forward);
        let b = aggregate(&reversed);
        assert_eq!(a.totals, b.totals);
        assert_eq!(a.averages, b.averages);
        assert_eq!(a.rates, b.rates);
    }

    #[test]
    fn best_record_tie_goes_to_first_seen() {
        let records = vec![record("first", 500, 0), record("second", 500, 99)];
        assert_eq!(best_record(&records).map(|r| r.id.as_str()), Some("first"));
    }

    #[test]
    fn keyword_ranking_breaks_ties_by_first_occurrence() {
        let records = vec![
            with_text("1", "", "", &["收纳", "保洁", "月嫂"]),
            with_text("2", "", "", &["月嫂", "Saas", "保洁"]),
            with_text("3", "", "", &["育婴", "saas", "钟点工", "收纳"]),
        ];
        let stats = aggregate(&records);
        let ranked: Vec<&str> = stats.top_keywords.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(ranked, vec!["收纳", "保洁", "月嫂", "Saas", "育婴"]);
        assert_eq!(stats.top_keywords[0].count, 2);
    }

    #[test]
    fn display_keywords_are_normalized() {
        let records = vec![
            with_text("1", "", "", &[" SaaS ", "保洁"]),
            with_text("2", "", "", &["saas", "  "]),
        ];
        let keywords = display_keywords(&records, 10);
        assert_eq!(keywords[0].keyword, "saas");
        assert_eq!(keywords[0].count, 2);
        assert_eq!(keywords.len(), 2);
    }

    #[test]
    fn length_preference_applies_floors() {
        let records = vec![with_text("1", "短标题", "很短的正文", &[])];
        let pref = length_preference(&records);
        assert_eq!(pref.title_length, MIN_TITLE_LENGTH);
        assert_eq!(pref.body_length, MIN_BODY_LENGTH);
    }

    #[test]
    fn length_preference_counts_characters_not_bytes() {
        let title = "家".repeat(30);
        let body = "政".repeat(240);
        let records = vec![
            with_text("1", &title, &body, &[]),
            with_text("2", "", "", &[]),
        ];
        let pref = length_preference(&records);
        assert_eq!(pref.title_length, 30);
        assert_eq!(pref.body_length, 240);
    }

    #[test]
    fn style_signals_detect_punctuation() {
        let records = vec![
            with_text("1", "月嫂涨薪秘籍！", "第一步：准备工具、清洁剂", &[]),
            with_text("2", "你家阿姨会这样做吗？", "客户说“真干净”", &[]),
        ];
        let style = style_signals(&records);
        assert!(style.has_emphasis);
        assert!(style.has_question);
        assert!(style.has_structure);
        assert!(style.has_dialogue);
        assert!(!style.has_emoji);
        assert_eq!(style.avg_title_length, Some(9));
    }

    #[test]
    fn optional_field_averages_skip_missing_values() {
        let mut a = record("a", 1, 0);
        a.draft.price = Some(100.0);
        a.draft.customer_satisfaction = Some(4.0);
        let mut b = record("b", 1, 0);
        b.draft.price = Some(200.0);
        let c = record("c", 1, 0);

        let stats = aggregate(&[a, b, c]);
        assert!((stats.field_averages.price - 150.0).abs() < 1e-9);
        assert!((stats.field_averages.customer_satisfaction - 4.0).abs() < 1e-9);
        assert_eq!(stats.field_averages.duration, 0.0);
    }

    #[test]
    fn platform_distribution_keeps_first_seen_order() {
        let mut a = record("a", 1, 0);
        a.draft.platform = Platform::Xiaohongshu;
        let mut b = record("b", 1, 0);
        b.draft.platform = Platform::Douyin;
        let mut c = record("c", 1, 0);
        c.draft.platform = Platform::Xiaohongshu;

        let stats = aggregate(&[a, b, c]);
        assert_eq!(
            stats.platforms,
            vec![
                PlatformCount { platform: Platform::Xiaohongshu, count: 2 },
                PlatformCount { platform: Platform::Douyin, count: 1 },
            ]
        );
    }

    #[test]
    fn top_records_sorted_by_views() {
        let records = vec![record("a", 5, 0), record("b", 50, 0), record("c", 5, 0)];
        let ids: Vec<&str> = top_records(&records, 2).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn huge_counters_saturate_instead_of_overflowing() {
        let records: Vec<VideoRecord> =
            serde_json::from_str(r#"[{"views":"1e30","likes":"1e30"},{"views":"1e30","shares":"1e30"}]"#)
                .unwrap();
        assert_eq!(records[0].views, u64::MAX);

        let stats = aggregate(&records);
        assert_eq!(stats.totals.views, u64::MAX);
        assert_eq!(stats.totals.likes, u64::MAX);
        assert_eq!(stats.rates.engagement_rate, 100.0);
        assert!(stats.averages.views.is_finite());
    }

    #[test]
    fn aggregate_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(aggregate(&[record("a", 100, 10)])).unwrap();
        assert_eq!(json["recordCount"], 1);
        assert_eq!(json["bestRecord"]["id"], "a");
        assert!(json["rates"]["likeRate"].is_number());
        assert!(json["lengthPreference"]["titleLength"].is_number());
        assert!(json.get("record_count").is_none());
    }
}
