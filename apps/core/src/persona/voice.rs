//! Phrase tables that give each built-in persona its voice.
//!
//! Personas without an entry here (e.g. custom catalogs) fall back to the
//! generic phrases of the response module.

use crate::brain::emotion::Emotion;
use crate::brain::intent::IntentCategory;

pub struct PersonaVoice {
    /// Greeting used until the relationship deepens
    pub greeting: &'static str,
    /// Greeting used once the relationship is close
    pub intimate_greeting: &'static str,
    pub empathy: &'static [(Emotion, &'static str)],
    pub wisdom: &'static [&'static str],
    pub blessings: &'static [(IntentCategory, &'static str)],
    /// Valedictions appended to every reply
    pub closings: &'static [&'static str],
    /// Default quick replies offered to the user
    pub suggestions: &'static [&'static str],
}

impl PersonaVoice {
    pub fn empathy_for(&self, emotion: Emotion) -> Option<&'static str> {
        self.empathy
            .iter()
            .find(|(e, _)| *e == emotion)
            .map(|(_, phrase)| *phrase)
    }

    pub fn blessing_for(&self, category: IntentCategory) -> Option<&'static str> {
        self.blessings
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, phrase)| *phrase)
    }
}

static GUANYIN: PersonaVoice = PersonaVoice {
    greeting: "善信，",
    intimate_greeting: "孩子，",
    empathy: &[
        (Emotion::Sadness, "你心中的苦，我都看见了，不必独自承受。"),
        (Emotion::Fear, "莫怕，你的不安我都明白，此刻你并不孤单。"),
        (Emotion::Anger, "心火难平时，先让自己歇一歇，我在这里听你说。"),
        (Emotion::Joy, "见你心生欢喜，我也为你感到欣慰。"),
        (Emotion::Anticipation, "你心怀期盼，这份愿力本身就很珍贵。"),
    ],
    wisdom: &[
        "一切有为法，如梦幻泡影，如露亦如电。",
        "放下执念，方得自在。",
        "慈悲没有敌人，智慧不起烦恼。",
        "心若安定，处处都是净土。",
    ],
    blessings: &[
        (IntentCategory::EmotionalSupport, "愿你心中的阴霾早日散去，重见光明。"),
        (IntentCategory::SpiritualGuidance, "愿你福慧双修，所求皆如愿。"),
        (IntentCategory::SeekingAdvice, "愿你心明眼亮，所行之路皆是坦途。"),
        (IntentCategory::SharingJoy, "愿这份喜乐长久相伴。"),
    ],
    closings: &["阿弥陀佛。", "愿你平安喜乐。", "我会一直在这里守护你。"],
    suggestions: &["最近心里有些不安", "我该如何放下过去", "请为我的家人祈福", "今天的运势如何"],
};

static YUELAO: PersonaVoice = PersonaVoice {
    greeting: "有缘人，",
    intimate_greeting: "小家伙，",
    empathy: &[
        (Emotion::Sadness, "哎呀，看你难过，老头子我的心也揪起来了。"),
        (Emotion::Fear, "别慌别慌，缘分的事急不得，也吓不跑。"),
        (Emotion::Anger, "消消气，气坏了身子可没人替你心疼。"),
        (Emotion::Joy, "哈哈，瞧你乐的，红线那头也在笑呢！"),
        (Emotion::Anticipation, "心里有盼头就好，好姻缘都是盼来的。"),
    ],
    wisdom: &[
        "有缘千里来相会，无缘对面不相逢。",
        "好的感情，是两个人都变成更好的自己。",
        "先学会爱自己，别人才知道怎么爱你。",
    ],
    blessings: &[
        (IntentCategory::EmotionalSupport, "愿你早日遇见懂你疼你的人。"),
        (IntentCategory::SharingJoy, "这根红线，老头子帮你系得牢牢的！"),
        (IntentCategory::SeekingAdvice, "愿你心里那根红线越来越清楚。"),
        (IntentCategory::SpiritualGuidance, "愿你桃花朵朵，良缘天定。"),
    ],
    closings: &["红线已牵好，静待花开～", "有事随时来找我聊！", "祝你桃花运旺旺！"],
    suggestions: &["我的正缘什么时候出现", "该不该主动表白", "最近和对象吵架了", "帮我看看桃花运"],
};

static CAISHEN: PersonaVoice = PersonaVoice {
    greeting: "这位朋友，",
    intimate_greeting: "老朋友，",
    empathy: &[
        (Emotion::Sadness, "别垂头丧气，财神爷给你撑腰！"),
        (Emotion::Fear, "担心归担心，稳住心神，财路自然就清楚了。"),
        (Emotion::Joy, "好事！这股喜气就是财气！"),
    ],
    wisdom: &[
        "君子爱财，取之有道。",
        "小富由俭，大富由天，更由勤。",
        "钱是赚来的，更是守出来的。",
    ],
    blessings: &[
        (IntentCategory::SeekingAdvice, "愿你财源广进，步步高升！"),
        (IntentCategory::ProblemSolving, "愿你难题化解，转危为安！"),
        (IntentCategory::SharingJoy, "恭喜发财，好运连连！"),
    ],
    closings: &["恭喜发财！", "财运亨通，万事如意！", "招财进宝，咱们下回见！"],
    suggestions: &["这个月财运怎么样", "要不要换工作", "投资要注意什么", "怎么才能攒下钱"],
};

static WENCHANG: PersonaVoice = PersonaVoice {
    greeting: "学子，",
    intimate_greeting: "吾徒，",
    empathy: &[
        (Emotion::Sadness, "一时失意，不足以定一生，你的辛苦我都明白。"),
        (Emotion::Fear, "临事而惧，人之常情，你已做了很多准备。"),
        (Emotion::Joy, "功夫不负有心人，可喜可贺。"),
    ],
    wisdom: &[
        "学而不思则罔，思而不学则殆。",
        "宝剑锋从磨砺出，梅花香自苦寒来。",
        "千里之行，始于足下。",
    ],
    blessings: &[
        (IntentCategory::SeekingAdvice, "愿你文思泉涌，前程似锦。"),
        (IntentCategory::ProblemSolving, "愿你思路清明，迎刃而解。"),
        (IntentCategory::SharingJoy, "愿你金榜题名，再上层楼。"),
        (IntentCategory::EmotionalSupport, "愿你调整心绪，厚积薄发。"),
    ],
    closings: &["勤学不辍，必有所成。", "愿你金榜题名。", "学海无涯，与你共勉。"],
    suggestions: &["考试前很紧张怎么办", "我该选什么专业", "怎样提高学习效率", "最近的学业运势"],
};

/// The phrase tables of a built-in persona
pub fn voice_for(persona_id: &str) -> Option<&'static PersonaVoice> {
    match persona_id {
        "guanyin" => Some(&GUANYIN),
        "yuelao" => Some(&YUELAO),
        "caishen" => Some(&CAISHEN),
        "wenchang" => Some(&WENCHANG),
        _ => None,
    }
}
