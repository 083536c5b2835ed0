//! Topic extraction for fortune-telling conversations.
//!
//! Maps surface keywords onto a small set of life-area topics
//! (career, love, wealth, ...). Output keeps first-match order and never
//! repeats a topic.

use std::cmp::Reverse;
use std::ops::Range;

use super::keyword_matches;

/// A life area the personas know how to talk about
struct TopicDefinition {
    topic: &'static str,
    keywords: &'static [&'static str],
}

static TOPICS: &[TopicDefinition] = &[
    TopicDefinition {
        topic: "career",
        keywords: &["工作", "事业", "职场", "老板", "同事", "升职", "面试", "跳槽", "加班", "job", "career", "work"],
    },
    TopicDefinition {
        topic: "love",
        keywords: &["感情", "恋爱", "爱情", "男朋友", "女朋友", "对象", "分手", "结婚", "暗恋", "桃花", "love", "relationship", "boyfriend", "girlfriend"],
    },
    TopicDefinition {
        topic: "wealth",
        keywords: &["财运", "钱", "投资", "收入", "工资", "理财", "生意", "money", "wealth"],
    },
    TopicDefinition {
        topic: "health",
        keywords: &["健康", "身体", "生病", "失眠", "睡不着", "医院", "health", "sleep"],
    },
    TopicDefinition {
        topic: "family",
        keywords: &["家人", "父母", "爸爸", "妈妈", "孩子", "家庭", "family"],
    },
    TopicDefinition {
        topic: "study",
        keywords: &["学习", "考试", "考研", "成绩", "学校", "论文", "exam", "study"],
    },
    TopicDefinition {
        topic: "friendship",
        keywords: &["朋友", "闺蜜", "兄弟", "friend"],
    },
    TopicDefinition {
        topic: "travel",
        keywords: &["旅行", "出行", "搬家", "出差", "travel"],
    },
    TopicDefinition {
        topic: "destiny",
        keywords: &["运势", "命运", "星座", "运气", "缘分", "手链", "fortune", "destiny", "horoscope"],
    },
];

/// Keyword-to-topic matcher
pub struct TopicExtractor {
    topics: &'static [TopicDefinition],
    max_topics: usize,
}

impl Default for TopicExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicExtractor {
    /// Create an extractor over the built-in topic table
    pub fn new() -> Self {
        Self::with_limit(5)
    }

    /// Create an extractor returning at most `max_topics` topics
    pub fn with_limit(max_topics: usize) -> Self {
        Self {
            topics: TOPICS,
            max_topics,
        }
    }

    /// Extract the topics mentioned in `text`, ordered by first appearance.
    ///
    /// Longer keywords claim their span first, so "男朋友" counts as love
    /// and never also as the "朋友" of friendship.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let text = text.to_lowercase();

        let mut keywords: Vec<(&'static str, &'static str)> = self
            .topics
            .iter()
            .flat_map(|def| def.keywords.iter().map(move |kw| (*kw, def.topic)))
            .collect();
        // Stable: equal lengths keep table order
        keywords.sort_by_key(|(kw, _)| Reverse(kw.len()));

        let mut claimed: Vec<Range<usize>> = Vec::new();
        let mut found: Vec<(usize, &'static str)> = Vec::new();

        for (keyword, topic) in keywords {
            for start in keyword_matches(&text, keyword) {
                let span = start..start + keyword.len();
                if claimed.iter().any(|c| c.start < span.end && span.start < c.end) {
                    continue;
                }
                claimed.push(span);

                match found.iter_mut().find(|(_, t)| *t == topic) {
                    Some(entry) => entry.0 = entry.0.min(start),
                    None => found.push((start, topic)),
                }
            }
        }

        found.sort_by_key(|(pos, _)| *pos);

        found
            .into_iter()
            .take(self.max_topics)
            .map(|(_, topic)| topic.to_string())
            .collect()
    }
}
