//! src/fallback.rs
//!
//! 外部模型不可用时的本地回复生成。按意图挑选模板，结合用户数据填充，
//! 任何输入下都返回一段可以直接展示的非空文本。

use crate::intent::{classify_intent, IntentKind};
use crate::models::VideoRecord;
use crate::prompt::render_report;
use crate::stats::{aggregate, best_record, length_preference, AggregateStats};

/// 常用关键词为空时推荐的通用关键词
const GENERIC_KEYWORDS: &str = "家政服务、专业保洁、月嫂育婴、家政阿姨、服务到家";

/// 本地兜底回复
pub fn respond(message: &str, records: &[VideoRecord]) -> String {
    let stats = aggregate(records);
    match classify_intent(message) {
        IntentKind::ComprehensiveAnalysis => comprehensive_analysis(records, &stats),
        IntentKind::TrendingTopics => hot_topic_content(records),
        IntentKind::CustomCreation => custom_creation(&stats),
        IntentKind::OneClickGeneration => one_click_generation(records),
        IntentKind::KeywordStrategy => keyword_strategy(records),
        IntentKind::General => overview(&stats),
    }
}

fn comprehensive_analysis(records: &[VideoRecord], stats: &AggregateStats) -> String {
    if records.is_empty() {
        return r#"您好！我注意到您还没有上传视频数据。为了给您做准确的综合分析，建议先上传一些视频数据，包括：

📊 **需要的数据：**
- 视频标题和内容
- 播放量、点赞量、评论量、转发量
- 发布平台和时间
- 使用的关键词标签

上传数据后，我将为您提供：
✨ 个人创作风格分析
📈 数据表现洞察
🎯 个性化优化建议
💡 基于您特色的内容策略

请先用 `homemate add` 录入您的视频数据，然后我们开始深度分析！"#
            .to_string();
    }

    format!(
        r#"基于您上传的{count}个视频数据，我为您做了综合分析：

{report}

**个人风格特征分析：**
{personality}

**优化建议：**
{suggestions}

需要我为您生成具体的内容创作方案吗？"#,
        count = records.len(),
        report = render_report(stats),
        personality = personality_analysis(records),
        suggestions = optimization_suggestions(stats),
    )
}

fn custom_creation(stats: &AggregateStats) -> String {
    format!(
        r#"我来为您提供定制创作服务！请告诉我：

🎯 **您的具体需求：**
1. 想创作什么类型的内容？（如：家政技巧、客户案例、服务流程等）
2. 有特定的关键词或主题吗？
3. 目标用户是谁？（如：年轻妈妈、职场女性、老人家庭等）
4. 希望在哪个平台发布？

📊 **基于您的数据分析：**
{report}

请详细描述您的需求，我会结合您的个人风格和历史数据，为您量身定制内容方案！"#,
        report = render_report(stats),
    )
}

fn one_click_generation(records: &[VideoRecord]) -> String {
    if records.is_empty() {
        return format!(
            r#"为了给您生成更精准的内容，建议先上传一些视频数据。不过，我可以先给您一套家政行业的通用爆款模板：

🔥 **通用爆款标题模板：**
1. 《家政阿姨的秘密！这3个技巧让客户抢着要》
2. 《月薪过万的家政员都在用这个方法！》
3. 《客户满意度100%！家政服务这样做就对了》

📝 **内容脚本框架：**
- 开场抓眼球（3秒黄金法则）
- 痛点共鸣（客户的困扰）
- 解决方案展示（专业技能）
- 效果证明（前后对比）
- 行动号召（联系方式）

🏷️ **通用关键词：**
{GENERIC_KEYWORDS}

上传您的视频数据后，我会为您生成更个性化的内容！"#
        );
    }

    generate_from_data(records)
}

fn keyword_strategy(records: &[VideoRecord]) -> String {
    let (current, recommended, suggestions) = if records.is_empty() {
        (
            "暂无数据".to_string(),
            GENERIC_KEYWORDS.to_string(),
            "建议先上传视频数据，我将为您提供个性化关键词策略".to_string(),
        )
    } else {
        let stats = aggregate(records);
        let top: Vec<&str> = stats.top_keywords.iter().map(|k| k.keyword.as_str()).collect();
        let current = if top.is_empty() {
            "暂无关键词数据".to_string()
        } else {
            top.join("、")
        };
        let lead = top.first().copied().unwrap_or("家政服务");
        (
            current,
            "家政技巧、客户案例、服务流程、专业培训、行业经验、清洁妙招".to_string(),
            format!(
                r#"
• 主关键词：放在标题开头，如"{lead}"
• 长尾关键词：结合地区和服务类型，如"北京专业月嫂"
• 热门标签：关注平台热门话题，及时跟进
• 关键词密度：标题、描述、标签中合理分布，避免堆砌"#
            ),
        )
    };

    format!(
        r#"基于您的{count}个视频数据，为您推荐关键词策略：

🎯 **您常用的关键词：**
{current}

🔥 **推荐新关键词：**
{recommended}

💡 **关键词使用建议：**
{suggestions}"#,
        count = records.len(),
    )
}

fn overview(stats: &AggregateStats) -> String {
    format!(
        r#"您好！我是您的 AI 家政运营助手，我已经分析了您的数据。

{report}

我可以为您提供：
📊 **综合分析** - 深度分析您的创作数据和风格特征
💡 **一键生成** - 生成个性化的爆款标题和内容脚本
⚡ **追踪热点** - 结合最新热点创作追热点内容
🎯 **定制创作** - 根据您的具体需求定制内容方案

直接告诉我您的需求就可以开始！"#,
        report = render_report(stats),
    )
}

fn personality_analysis(records: &[VideoRecord]) -> String {
    if records.is_empty() {
        return "需要更多数据来分析您的个性特征。".to_string();
    }

    let platform = match records.first() {
        Some(first) => format!("您主要在{}等平台创作", first.platform.label()),
        None => "平台使用较为分散".to_string(),
    };

    let lively_titles = records
        .iter()
        .any(|r| r.title.contains('！') || r.title.contains('？'));
    let title_style = if lively_titles {
        "标题风格偏向活泼，善用感叹号和疑问句"
    } else {
        "标题风格相对平稳"
    };

    let keywords: Vec<&str> = records
        .iter()
        .flat_map(|r| r.keywords.iter().map(String::as_str))
        .take(3)
        .collect();
    let themes = if keywords.is_empty() {
        "内容主题较为多样".to_string()
    } else {
        format!("主要关注{}等主题", keywords.join("、"))
    };

    let frequency = if records.len() > 10 {
        "较高，持续更新"
    } else {
        "适中，稳定输出"
    };

    format!(
        r#"
• **平台偏好**: {platform}
• **标题风格**: {title_style}
• **内容主题**: {themes}
• **创作频率**: {frequency}
• **互动特点**: 根据数据表现，您的内容具有一定的用户吸引力"#
    )
}

fn optimization_suggestions(stats: &AggregateStats) -> String {
    if stats.is_empty() {
        return "上传更多数据后，我将为您提供个性化优化建议。".to_string();
    }

    let mut suggestions = Vec::new();
    if stats.averages.views < 1000.0 {
        suggestions.push("• **提升曝光**: 优化发布时间，建议在用户活跃时段发布");
    }
    if stats.rates.like_rate < 5.0 {
        suggestions.push("• **增加互动**: 在内容中加入提问或话题讨论，提升用户参与度");
    }
    suggestions.push("• **内容优化**: 基于您的风格，建议增加更多实用技巧分享");
    suggestions.push("• **关键词策略**: 结合热门话题，优化标题和标签");
    suggestions.join("\n")
}

/// 取前若干个关键词，去掉重复项
fn leading_keywords(records: &[VideoRecord], limit: usize) -> Vec<&str> {
    let mut keywords: Vec<&str> = Vec::new();
    for keyword in records.iter().flat_map(|r| r.keywords.iter()) {
        if keywords.len() == limit {
            break;
        }
        if !keywords.contains(&keyword.as_str()) {
            keywords.push(keyword.as_str());
        }
    }
    keywords
}

fn generate_from_data(records: &[VideoRecord]) -> String {
    let pref = length_preference(records);
    let count = records.len();
    let best_title = best_record(records)
        .map(|r| r.title.as_str())
        .filter(|t| !t.is_empty())
        .unwrap_or("月嫂涨薪秘籍");
    let keywords = leading_keywords(records, 8);
    let keywords = if keywords.is_empty() {
        "家政服务、专业保洁、客户满意、月嫂技巧、服务升级".to_string()
    } else {
        keywords.join("、")
    };
    let experience = if count > 5 { "5年总结" } else { "2年经验" };

    let script = if pref.body_length > 200 {
        let years = if count > 5 { "5年多了" } else { "也有2年多了" };
        format!(
            r#"
**开场(0-10秒)**: "哈喽姐妹们！我做家政{years}，今天必须跟大家分享一个超实用的技巧！你们知道吗？很多客户最看重的其实不是你打扫得多干净..."

**痛点展示(10-25秒)**: "前两天遇到个客户，她说之前请的阿姨表面上挺干净，但是！（停顿，表情严肃）细节根本不到位！门缝、窗台角落、油烟机滤网，这些地方不处理，再干净也白搭！"

**解决方案详解(25-60秒)**: "所以今天教大家我的独门秘籍！第一步，准备好工具（展示工具）；第二步，清洁顺序很重要，从上到下、从里到外；第三步是重点！（凑近镜头）死角要用这个小技巧处理..."

**效果对比(60-80秒)**: "大家看这个前后对比！（展示清洁前后照片）客户当场就说这个阿姨真不一样！现在她每个月都指定要我，还给我涨了工资！"

**互动引导(80-100秒)**: "姐妹们，这样的小技巧我还有很多，想学的记得点赞关注，评论区告诉我最想学哪方面，人多的话我专门做一期详细教学！""#
        )
    } else {
        let tenure = if count > 3 { "几年了" } else { "也有段时间了" };
        format!(
            r#"
**开场(0-5秒)**: "姐妹们！今天分享个家政小技巧！"

**痛点(5-15秒)**: "很多人觉得家政就是简单打扫，其实门道可多了！"

**解决方案(15-40秒)**: "我做家政{tenure}，发现客户最看重这3点：细节处理、服务态度、专业工具。掌握了这些，工资自然就上去了！"

**效果展示(40-55秒)**: "就像我现在这个客户，每月指定要我，还主动涨工资！"

**结尾(55-60秒)**: "想学更多技巧的，关注我！每天分享实用方法！""#
        )
    };

    format!(
        r#"基于您的{count}个视频数据，为您生成个性化内容：

🔥 **爆款标题方案（符合您{title}字左右的习惯）：**

**方案1**: 《{best_title}！客户抢着要的3个技巧💰》
**方案2**: 《做家政{experience}：这样服务客户主动加价！》
**方案3**: 《家政阿姨必看！月薪过万的都在用这个方法🔥》

📝 **完整内容脚本（符合您{body}字以上的习惯）：**
{script}

🏷️ **精准关键词（基于您的数据）：**
{keywords}

💡 **创作建议：**
- 您的内容平均{body}字左右，这个长度很适合分享经验
- 保持现有的叙述风格，用户更容易产生信任感
- 多加入具体的数字和案例，增强说服力

这套方案基于您的个人创作习惯和表现最好的内容定制！"#,
        title = pref.title_length,
        body = pref.body_length,
    )
}

fn hot_topic_content(records: &[VideoRecord]) -> String {
    if records.is_empty() {
        return r#"🔥 **追踪热点内容策略**

您暂未上传视频数据，先为您提供通用的热点追踪模板：

**🌟 当前热门话题：**

**热点1 - 年终大扫除**
• 标题：《年底大扫除攻略！家政阿姨3小时搞定全屋秘籍》
• 脚本要点：工具准备→清洁顺序→效率技巧→成果展示
• 关键词：#年底大扫除 #家政技巧 #高效清洁

**热点2 - 春节家政需求**
• 标题：《春节家政预约爆满！这些服务最受欢迎》
• 脚本要点：需求分析→服务标准→客户反馈→预约建议
• 关键词：#春节家政 #专业服务 #客户好评

**热点3 - 新年职场规划**
• 标题：《家政行业新趋势！月薪过万不是梦》
• 脚本要点：行业分析→技能提升→收入增长→职业规划
• 关键词：#家政行业 #职业规划 #技能提升

💡 **追热点建议：**
- 关注微博、抖音热搜榜
- 结合节假日和季节性话题
- 观察同行爆款内容规律
- 及时跟进突发热点事件

上传您的创作数据后，我会为您生成更个性化的热点内容策略！"#
            .to_string();
    }

    let count = records.len();
    let pref = length_preference(records);
    let keywords = leading_keywords(records, 5);
    let primary = keywords.first().copied().unwrap_or("家政");
    let secondary = keywords.get(1).copied().unwrap_or("家政");
    let keyword_line = if keywords.is_empty() {
        "暂无".to_string()
    } else {
        keywords.join("、")
    };
    let long_form = pref.body_length > 200;
    let style = if long_form {
        "详细叙述型，适合深度分享"
    } else {
        "简洁明快型，适合快速传播"
    };
    let experience = if count > 3 { "多年经验" } else { "亲身经历" };
    let outline = if long_form {
        let years = if count > 5 { "5年多" } else { "几年" };
        format!(
            r#"
- 开场引入热点（10秒）："最近大家都在讨论..."
- 个人经历分享（30秒）："我在这行{years}，发现..."
- 深度分析讲解（40秒）："其实背后的原因是..."
- 实用建议给出（15秒）："所以我建议大家..."
- 互动引导结尾（5秒）："你们觉得呢？评论区聊聊！""#
        )
    } else {
        r#"
- 热点切入（5秒）："最近很火的话题..."
- 快速分析（20秒）："其实关键在于..."
- 给出建议（15秒）："建议这样做..."
- 互动结尾（5秒）："同意的点赞！""#
            .to_string()
    };

    format!(
        r#"🔥 **基于您的创作风格，为您定制追热点方案：**

**📊 您的创作特点分析：**
- 视频数量：{count}个
- 常用关键词：{keyword_line}
- 内容风格：{style}

**🌟 个性化热点方案：**

**热点1 - 结合您的优势领域**
• 标题：《{primary}行业爆火！我{experience}告诉你真相》
• 角度：基于您的实际经验，分享行业内幕和技巧
• 预期效果：利用您的专业背景，增强内容可信度

**热点2 - 季节性话题结合**
• 标题：《年底{secondary}需求暴增！这样做客户抢着要》
• 角度：结合时令特点，展示专业服务价值
• 预期效果：抓住季节性需求，提升曝光和询单

**热点3 - 对比式热点**
• 标题：《同样做{primary}，为什么她月入过万我却不行？》
• 角度：通过对比引发思考，分享成功经验
• 预期效果：引发共鸣和讨论，提升互动率

**📝 完整脚本框架（符合您{body}字的习惯）：**
{outline}

🎯 **发布策略：**
- 最佳发布时间：根据您的历史数据，建议晚上7-9点
- 平台选择：优先选择您表现最好的平台
- 标签使用：#热点话题 + #{primary} + #专业分享

这套方案基于您的创作特点和历史表现数据定制！"#,
        body = pref.body_length,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VideoDraft;
    use chrono::Utc;

    fn records() -> Vec<VideoRecord> {
        vec![
            VideoRecord::new(
                "1",
                Utc::now(),
                VideoDraft {
                    title: "深度保洁前后对比！".to_string(),
                    content: "客户说：“阿姨你太专业了”".to_string(),
                    keywords: vec!["深度保洁".to_string(), "收纳".to_string()],
                    views: 5000,
                    likes: 100,
                    ..Default::default()
                },
            ),
            VideoRecord::new(
                "2",
                Utc::now(),
                VideoDraft {
                    title: "油烟机清洗".to_string(),
                    keywords: vec!["深度保洁".to_string(), "厨房".to_string()],
                    views: 300,
                    likes: 3,
                    ..Default::default()
                },
            ),
        ]
    }

    const MESSAGES: &[&str] = &[
        "综合分析",
        "追热点",
        "定制创作",
        "一键生成",
        "关键词",
        "你好",
        "",
    ];

    #[test]
    fn never_empty_for_any_intent() {
        for message in MESSAGES {
            assert!(!respond(message, &[]).trim().is_empty(), "empty for {message}");
            assert!(
                !respond(message, &records()).trim().is_empty(),
                "empty for {message}"
            );
        }
    }

    #[test]
    fn analysis_without_data_asks_for_upload() {
        let reply = respond("综合分析", &[]);
        assert!(reply.contains("还没有上传视频数据"));
    }

    #[test]
    fn analysis_with_data_includes_report_and_suggestions() {
        let reply = respond("帮我做综合分析和追踪热点", &records());
        assert!(reply.contains("基于您上传的2个视频数据"));
        assert!(reply.contains("总播放量：5,300"));
        assert!(reply.contains("增加互动"));
        assert!(reply.contains("您主要在其他等平台创作"));
    }

    #[test]
    fn generation_uses_best_title_and_unique_keywords() {
        let reply = respond("一键生成", &records());
        assert!(reply.contains("《深度保洁前后对比！！客户抢着要的3个技巧💰》"));
        assert!(reply.contains("深度保洁、收纳、厨房"));
        // 正文很短，用的是精简脚本
        assert!(reply.contains("开场(0-5秒)"));
    }

    #[test]
    fn keyword_strategy_lists_top_keywords() {
        let reply = respond("keyword ideas", &records());
        assert!(reply.contains("深度保洁、收纳、厨房"));
        assert!(reply.contains("如\"深度保洁\""));
    }

    #[test]
    fn hot_topics_with_data_uses_keywords() {
        let reply = respond("追踪热点", &records());
        assert!(reply.contains("《深度保洁行业爆火！"));
        assert!(reply.contains("《年底收纳需求暴增！"));
    }

    #[test]
    fn general_overview_lists_capabilities() {
        let reply = respond("你好", &[]);
        assert!(reply.contains("一键生成"));
        assert!(reply.contains("暂无视频数据"));
    }
}
