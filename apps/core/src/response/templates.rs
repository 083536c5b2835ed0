//! Reply templates and the generic phrases used when a persona has no
//! entry of its own.
//!
//! Templates carry the slots `{greeting}`, `{empathy}`, `{wisdom}` and
//! `{blessing}`; every slot is always filled, so a template may use any subset.

use crate::brain::intent::IntentCategory;

use super::strategy::{Approach, ToneLabel};

pub const GREETING_SLOT: &str = "{greeting}";
pub const EMPATHY_SLOT: &str = "{empathy}";
pub const WISDOM_SLOT: &str = "{wisdom}";
pub const BLESSING_SLOT: &str = "{blessing}";

/// Used when an approach has no templates
pub const GENERIC_TEMPLATES: &[&str] = &[
    "{greeting}{empathy}{wisdom}{blessing}",
    "{greeting}{empathy}{blessing}",
];

/// Template pool for an approach
pub fn templates_for(approach: Approach) -> &'static [&'static str] {
    match approach {
        Approach::EmotionalValidation => &[
            "{greeting}{empathy}你的感受都是真实的，值得被好好对待。{wisdom}{blessing}",
            "{greeting}{empathy}慢慢说，我一直在听。{blessing}",
            "{greeting}{empathy}有些路走得辛苦，不代表你走错了。{wisdom}{blessing}",
        ],
        Approach::SharedDelight => &[
            "{greeting}{empathy}这份喜悦，我也替你收下了！{blessing}",
            "{greeting}{empathy}好事要多说几遍，再讲讲？{blessing}",
        ],
        Approach::StructuredInsight => &[
            "{greeting}{empathy}我们一步步来看：先理清你真正在意的是什么，再看眼前能做的选择。{wisdom}{blessing}",
            "{greeting}这件事可以分开来想：哪些在你掌控之中，哪些只能交给时间。{wisdom}{blessing}",
        ],
        Approach::Celebration => &[
            "{greeting}{empathy}这是你努力换来的，值得好好庆祝！{blessing}",
            "{greeting}{empathy}好运从不偏爱谁，是你自己接住了它。{blessing}",
        ],
        Approach::Motivation => &[
            "{greeting}{empathy}你比自己想象的更有力量。{wisdom}{blessing}",
            "{greeting}{empathy}先迈出一小步，路自然会清楚起来。{wisdom}{blessing}",
        ],
        Approach::ActionableGuidance => &[
            "{greeting}{empathy}不妨从今天能做的一件小事开始，做完再看下一步。{wisdom}{blessing}",
            "{greeting}先把最急的一件事写下来，其余的交给明天。{wisdom}{blessing}",
        ],
        Approach::SpiritualInsight => &[
            "{greeting}{wisdom}万事皆有因缘，静下心来，答案自会浮现。{blessing}",
            "{greeting}{empathy}{wisdom}{blessing}",
        ],
    }
}

/// Empathy phrase for personas without their own line for the emotion
pub fn generic_empathy(tone: ToneLabel) -> &'static str {
    match tone {
        ToneLabel::DeepEmpathy => "我深深感受到你此刻的难过，你不是一个人。",
        ToneLabel::GentleComfort => "难过的时候，允许自己慢一点。",
        ToneLabel::SteadyReassurance => "别担心，我们一起面对。",
        ToneLabel::CalmGrounding => "先深呼吸，让情绪慢慢落地。",
        ToneLabel::JoyfulCelebration => "太好了，真为你高兴！",
        ToneLabel::WarmAcknowledgement => "看到你开心，我也很欣慰。",
        ToneLabel::BalancedWarmth => "谢谢你愿意和我分享。",
    }
}

/// Blessing for personas without their own line for the intent
pub fn generic_blessing(category: IntentCategory) -> &'static str {
    match category {
        IntentCategory::SeekingAdvice => "愿你做出让自己安心的选择。",
        IntentCategory::EmotionalSupport => "愿你早日走出阴霾，重拾笑容。",
        IntentCategory::CasualChat => "愿你今天一切顺心。",
        IntentCategory::SpiritualGuidance => "愿你心有所依，行有所向。",
        IntentCategory::ProblemSolving => "愿难题迎刃而解。",
        IntentCategory::SharingJoy => "愿好运常伴你左右。",
        IntentCategory::SeekingValidation => "愿你相信自己的判断。",
    }
}

pub const GENERIC_GREETING: &str = "朋友，";
pub const GENERIC_WISDOM: &str = "凡事顺其自然，尽人事，听天命。";
pub const GENERIC_CLOSING: &str = "愿你一切安好。";

/// Display name of a topic label
pub fn topic_name(topic: &str) -> &str {
    match topic {
        "career" => "事业",
        "love" => "感情",
        "wealth" => "财运",
        "health" => "健康",
        "family" => "家庭",
        "study" => "学业",
        "friendship" => "友情",
        "travel" => "出行",
        "destiny" => "运势",
        other => other,
    }
}

/// A sentence picking up the topic the user keeps returning to
pub fn focus_reflection(topic: &str) -> String {
    format!("关于{}的事，我一直记在心上。", topic_name(topic))
}

/// A sentence recalling an earlier shared memory. The snippet is quoted verbatim.
pub fn memory_reference(snippet: &str, formal: bool) -> String {
    let you = if formal { "您" } else { "你" };
    format!("还记得{}说过的“{}”吗？", you, snippet)
}
