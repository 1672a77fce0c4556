//! src/prompt.rs

use crate::format::{percent, rounded, thousands};
use crate::models::VideoRecord;
use crate::stats::{aggregate, AggregateStats, StyleSignals};

const ROLE_PROMPT: &str = r#"你是一个专业的家政行业内容创作 AI 助手，具备以下能力：

1. **深度数据分析**：分析用户视频的标题、内容、关键词、播放量、点赞量、评论量、转发量等数据
2. **个性化理解**：了解用户的创作习惯、地区特色、口语风格和常用词汇
3. **内容生成**：生成接地气、口语化、拿来就能用的标题、脚本和关键词
4. **专业建议**：给出基于真实数据的优化建议和运营策略"#;

const NO_DATA_REPORT: &str = r#"**当前数据状态：** 暂无视频数据

**建议上传的数据类型：**
- 📝 视频标题和内容描述
- 📊 播放量、点赞量、评论量、转发量等表现数据
- 🏷️ 使用的关键词标签
- 📱 发布平台（抖音、小红书、快手等）
- 🏠 服务类型（保洁、月嫂、养老护理等）
- 📍 地理位置信息
- 👥 目标用户群体

**上传数据后您将获得：**
✨ 基于真实表现的个性化内容策略
📈 数据驱动的优化建议
🎯 符合您创作风格的爆款模板
💡 针对性的关键词和话题推荐"#;

/// 把统计结果渲染为给模型（和兜底回复）看的数据报告。
pub fn render_report(stats: &AggregateStats) -> String {
    if stats.is_empty() {
        return NO_DATA_REPORT.to_string();
    }

    let platforms = stats
        .platforms
        .iter()
        .map(|p| format!("{}({}个)", p.platform.label(), p.count))
        .collect::<Vec<_>>()
        .join("、");

    let keywords = if stats.top_keywords.is_empty() {
        "无".to_string()
    } else {
        stats
            .top_keywords
            .iter()
            .map(|k| k.keyword.as_str())
            .collect::<Vec<_>>()
            .join("、")
    };

    let (best_title, best_views) = match &stats.best_record {
        Some(r) if !r.title.is_empty() => (r.title.as_str(), r.views),
        Some(r) => ("未知", r.views),
        None => ("未知", 0),
    };

    format!(
        r#"
**视频数量：** {count}个
**总体数据：**
- 总播放量：{total_views}
- 总点赞量：{total_likes}
- 总评论量：{total_comments}
- 总转发量：{total_shares}

**平均表现：**
- 平均播放量：{avg_views}
- 平均点赞量：{avg_likes}
- 平均评论量：{avg_comments}
- 平均转发量：{avg_shares}

**平台分布：** {platforms}

**常用关键词：** {keywords}

**表现最佳视频：** "{best_title}" (播放量：{best_views})

**🎯 个人创作风格分析：**
{style}

**互动率分析：**
- 点赞率：{like_rate}
- 评论率：{comment_rate}
- 转发率：{share_rate}
"#,
        count = stats.record_count,
        total_views = thousands(stats.totals.views),
        total_likes = thousands(stats.totals.likes),
        total_comments = thousands(stats.totals.comments),
        total_shares = thousands(stats.totals.shares),
        avg_views = rounded(stats.averages.views),
        avg_likes = rounded(stats.averages.likes),
        avg_comments = rounded(stats.averages.comments),
        avg_shares = rounded(stats.averages.shares),
        best_views = thousands(best_views),
        style = render_style(&stats.style),
        like_rate = percent(stats.rates.like_rate),
        comment_rate = percent(stats.rates.comment_rate),
        share_rate = percent(stats.rates.share_rate),
    )
}

/// 创作风格的文字描述，每个命中的信号一行
pub fn render_style(style: &StyleSignals) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(len) = style.avg_title_length {
        let kind = if len > 20 {
            "偏爱详细描述型标题"
        } else {
            "喜欢简洁有力的标题"
        };
        lines.push(format!("- **标题习惯**: 平均{len}字，{kind}"));
    }
    if let Some(len) = style.avg_body_length {
        let kind = if len > 100 {
            "习惯详细叙述，信息量丰富"
        } else {
            "偏爱简短精炼的表达"
        };
        lines.push(format!("- **内容长度**: 平均{len}字，{kind}"));
    }
    if style.has_emoji {
        lines.push("- **表达风格**: 善用emoji表情，内容生动活泼".to_string());
    }
    if style.has_emphasis {
        lines.push("- **语气特点**: 常用感叹号，表达热情有感染力".to_string());
    }
    if style.has_question {
        lines.push("- **互动技巧**: 善用疑问句，引发用户思考和互动".to_string());
    }
    if style.has_structure {
        lines.push("- **内容结构**: 喜欢使用结构化表达，逻辑清晰".to_string());
    }
    if style.has_dialogue {
        lines.push("- **叙述方式**: 善用对话形式，增强代入感".to_string());
    }

    if lines.is_empty() {
        "- 需要更多数据来分析您的创作风格".to_string()
    } else {
        lines.join("\n")
    }
}

/// 构建系统提示词：角色说明 + 数据报告 + 回复要求。
///
/// 没有数据时引导模型先请用户上传数据，并给出通用建议；
/// 有数据时要求模型基于统计结果和长度偏好作答。
pub fn build_system_prompt(records: &[VideoRecord]) -> String {
    let stats = aggregate(records);
    let report = render_report(&stats);

    let requirements = if stats.is_empty() {
        r#"**⚠️ 重要说明：用户暂未上传视频数据**

**回复策略：**
- 用户还没有上传视频数据，无法进行个性化分析
- 请先引导用户上传数据，说明需要上传哪些数据以及这些数据的价值
- 如果用户坚持要内容建议，可以提供家政行业的通用优质模板
- 重点说明上传数据后能获得的个性化价值（基于真实表现的分析、符合个人风格的内容等）
- 语气友好、专业，不要让用户觉得没有数据就得不到帮助
- 可以附上一些通用、实用的家政内容创作技巧作为参考"#
            .to_string()
    } else {
        let pref = stats.length_preference;
        format!(
            r#"**🎯 用户内容长度偏好：**
- 标题长度偏好：{title}字左右
- 内容长度偏好：{body}字左右

**回复要求：**
- 必须基于用户的真实数据（总播放量 {views}）进行分析和建议
- 回复要接地气、口语化，符合家政行业特点
- 参考用户数据中常用的语气和文字风格来生成内容
- 给出具体可执行的建议，不要空泛的理论
- 如果生成内容，要包含完整的标题、脚本和关键词
- 体现对用户个人风格和地区特色的理解
- 内容长度：标题控制在{title}字左右，脚本内容在{body}字以上，符合用户的创作习惯"#,
            title = pref.title_length,
            body = pref.body_length,
            views = stats.totals.views,
        )
    };

    format!("{ROLE_PROMPT}\n\n**用户数据分析：**\n{report}\n\n{requirements}")
}

/// 构建用户提示词：在原始消息前后加上引导语，消息本身不做任何改动。
pub fn build_user_prompt(message: &str, records: &[VideoRecord]) -> String {
    if records.is_empty() {
        format!(
            r#"用户问题：{message}

**当前状态说明：**
我还没有上传任何视频数据，所以您无法基于我的创作风格和表现数据做个性化分析。

**我希望得到的帮助：**
- 如果您认为我应该先上传数据，请告诉我需要上传哪些信息，以及这些数据会怎样帮到我
- 如果我的问题不需要具体数据也能回答，请提供家政行业的专业建议和通用优质模板
- 请说明上传真实数据后，我能获得哪些额外的个性化价值

请用友好、专业的语气回答我的问题。"#
        )
    } else {
        format!(
            r#"用户问题：{message}

请基于我上传的{count}个视频数据进行分析和回答。这些数据包含了我的创作风格、内容偏好和表现数据。

请先分析我的个人特征（创作习惯、可能的地区特色、内容风格等），再针对我的问题给出专业、个性化的建议。"#,
            count = records.len()
        )
    }
}
