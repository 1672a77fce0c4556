//! src/intent.rs

use serde::Serialize;

/// 用户请求的意图分类，用于在本地兜底时挑选回复模板
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    /// 综合分析
    ComprehensiveAnalysis,
    /// 追踪热点
    TrendingTopics,
    /// 定制创作
    CustomCreation,
    /// 一键生成
    OneClickGeneration,
    /// 关键词策略
    KeywordStrategy,
    /// 功能介绍
    General,
}

struct IntentRule {
    kind: IntentKind,
    matches: fn(&str) -> bool,
}

/// 按优先级排列，第一条命中的规则生效。
/// 一句话同时命中多条时以靠前的为准，顺序不可调换。
const RULES: &[IntentRule] = &[
    IntentRule {
        kind: IntentKind::ComprehensiveAnalysis,
        matches: |m| m.contains("综合分析") || (m.contains("分析") && m.contains("创作习惯")),
    },
    IntentRule {
        kind: IntentKind::TrendingTopics,
        matches: |m| {
            m.contains("追踪热点")
                || m.contains("追热点")
                || (m.contains("热点") && m.contains("结合"))
        },
    },
    IntentRule {
        kind: IntentKind::CustomCreation,
        matches: |m| {
            m.contains("定制创作")
                || (m.contains("定制") && m.contains("需求"))
                || m.contains("具体的创作需求")
        },
    },
    IntentRule {
        kind: IntentKind::OneClickGeneration,
        matches: |m| {
            m.contains("一键生成")
                || (m.contains("生成") && (m.contains("爆款标题") || m.contains("内容脚本")))
        },
    },
    IntentRule {
        kind: IntentKind::KeywordStrategy,
        matches: |m| m.contains("关键词") || m.contains("keyword"),
    },
];

/// 对用户消息做关键词匹配，得到意图分类。
pub fn classify_intent(message: &str) -> IntentKind {
    let lowered = message.to_lowercase();
    RULES
        .iter()
        .find(|rule| (rule.matches)(&lowered))
        .map(|rule| rule.kind)
        .unwrap_or(IntentKind::General)
}
