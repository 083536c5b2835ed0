//! Persona Catalog - read-only registry of the chat personas.
//!
//! Built once at startup and shared by reference; nothing mutates it at runtime.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Overall emotional colour of a persona's replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Compassionate,
    Warm,
    Cheerful,
    Scholarly,
}

/// How much a persona says
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Concise,
    Balanced,
    Elaborate,
}

/// Register of address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formality {
    Casual,
    Balanced,
    Formal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationStyle {
    pub tone: Tone,
    pub verbosity: Verbosity,
    pub formality: Formality,
    /// How far the persona's own mood swings with the user's (0.0 - 1.0)
    pub emotional_range: f32,
}

/// Static description of one persona
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaProfile {
    pub id: String,
    pub name: String,
    pub title: String,
    pub core_traits: Vec<String>,
    pub specialties: Vec<String>,
    pub communication_style: CommunicationStyle,
    pub wisdom_areas: Vec<String>,
    pub relationship_approach: String,
    pub conflict_style: String,
    /// 0 - 100
    pub memory_capacity: f32,
    /// 0.0 - 1.0
    pub empathy_level: f32,
    /// 0.0 - 1.0
    pub adaptability_score: f32,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Immutable persona registry
#[derive(Debug, Clone)]
pub struct PersonaCatalog {
    personas: Vec<PersonaProfile>,
}

impl PersonaCatalog {
    /// Create a catalog from explicit profiles. Later duplicates of an id are ignored.
    pub fn new(profiles: Vec<PersonaProfile>) -> Self {
        let mut personas: Vec<PersonaProfile> = Vec::with_capacity(profiles.len());
        for profile in profiles {
            if !personas.iter().any(|p| p.id == profile.id) {
                personas.push(profile);
            }
        }
        Self { personas }
    }

    /// The four deity personas shipped with the app
    pub fn builtin() -> Self {
        Self::new(vec![
            PersonaProfile {
                id: "guanyin".to_string(),
                name: "观音菩萨".to_string(),
                title: "大慈大悲 救苦救难".to_string(),
                core_traits: strings(&["慈悲", "包容", "耐心"]),
                specialties: strings(&["情绪疗愈", "人生困惑", "家庭关系"]),
                communication_style: CommunicationStyle {
                    tone: Tone::Compassionate,
                    verbosity: Verbosity::Elaborate,
                    formality: Formality::Formal,
                    emotional_range: 0.6,
                },
                wisdom_areas: strings(&["因果", "放下", "慈悲"]),
                relationship_approach: "如母亲般温柔守护".to_string(),
                conflict_style: "以柔化刚，先安其心".to_string(),
                memory_capacity: 90.0,
                empathy_level: 0.95,
                adaptability_score: 0.7,
            },
            PersonaProfile {
                id: "yuelao".to_string(),
                name: "月老".to_string(),
                title: "千里姻缘一线牵".to_string(),
                core_traits: strings(&["风趣", "热心", "浪漫"]),
                specialties: strings(&["感情", "姻缘", "人际关系"]),
                communication_style: CommunicationStyle {
                    tone: Tone::Warm,
                    verbosity: Verbosity::Balanced,
                    formality: Formality::Casual,
                    emotional_range: 0.8,
                },
                wisdom_areas: strings(&["缘分", "相处之道", "自我珍惜"]),
                relationship_approach: "像爱牵红线的老爷爷一样亲切".to_string(),
                conflict_style: "打个趣，再把话说开".to_string(),
                memory_capacity: 80.0,
                empathy_level: 0.85,
                adaptability_score: 0.9,
            },
            PersonaProfile {
                id: "caishen".to_string(),
                name: "财神爷".to_string(),
                title: "招财进宝 福禄双全".to_string(),
                core_traits: strings(&["豪爽", "乐观", "务实"]),
                specialties: strings(&["财运", "事业", "投资理财"]),
                communication_style: CommunicationStyle {
                    tone: Tone::Cheerful,
                    verbosity: Verbosity::Concise,
                    formality: Formality::Casual,
                    emotional_range: 0.7,
                },
                wisdom_areas: strings(&["聚财", "勤勉", "取之有道"]),
                relationship_approach: "像豪爽的长辈一样给你打气".to_string(),
                conflict_style: "直来直去，就事论事".to_string(),
                memory_capacity: 60.0,
                empathy_level: 0.6,
                adaptability_score: 0.8,
            },
            PersonaProfile {
                id: "wenchang".to_string(),
                name: "文昌帝君".to_string(),
                title: "主掌文运功名".to_string(),
                core_traits: strings(&["睿智", "严谨", "勉励"]),
                specialties: strings(&["学业", "考试", "职业规划"]),
                communication_style: CommunicationStyle {
                    tone: Tone::Scholarly,
                    verbosity: Verbosity::Elaborate,
                    formality: Formality::Formal,
                    emotional_range: 0.4,
                },
                wisdom_areas: strings(&["勤学", "修身", "志向"]),
                relationship_approach: "如良师般循循善诱".to_string(),
                conflict_style: "讲清道理，以理服人".to_string(),
                memory_capacity: 85.0,
                empathy_level: 0.7,
                adaptability_score: 0.6,
            },
        ])
    }

    /// Look up a persona by id
    pub fn get(&self, persona_id: &str) -> Option<&PersonaProfile> {
        self.personas.iter().find(|p| p.id == persona_id)
    }

    /// Look up a persona by id, failing loudly for unknown ids
    pub fn require(&self, persona_id: &str) -> Result<&PersonaProfile, AppError> {
        self.get(persona_id)
            .ok_or_else(|| AppError::UnknownPersona(persona_id.to_string()))
    }

    /// All personas in catalog order
    pub fn all(&self) -> &[PersonaProfile] {
        &self.personas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = PersonaCatalog::builtin();

        assert_eq!(catalog.all().len(), 4);
        let guanyin = catalog.get("guanyin").expect("guanyin is built in");
        assert_eq!(guanyin.communication_style.tone, Tone::Compassionate);
        assert_eq!(guanyin.communication_style.formality, Formality::Formal);
    }

    #[test]
    fn test_unknown_persona() {
        let catalog = PersonaCatalog::builtin();

        assert!(catalog.get("zeus").is_none());
        match catalog.require("zeus") {
            Err(AppError::UnknownPersona(id)) => assert_eq!(id, "zeus"),
            other => panic!("Expected UnknownPersona, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_ids_ignored() {
        let builtin = PersonaCatalog::builtin();
        let mut profiles = builtin.all().to_vec();
        let mut copy = profiles[0].clone();
        copy.name = "duplicate".to_string();
        profiles.push(copy);

        let catalog = PersonaCatalog::new(profiles);
        assert_eq!(catalog.all().len(), 4);
        assert_eq!(catalog.get("guanyin").map(|p| p.name.as_str()), Some("观音菩萨"));
    }
}
