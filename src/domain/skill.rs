use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: i64,
    pub skill_name: String,
    pub level: SkillLevel,
}

impl Skill {
    fn new(id: i64, skill_name: &str, level: SkillLevel) -> Self {
        Self { id, skill_name: skill_name.to_string(), level }
    }
}

/// The skills shown on the portfolio.
#[must_use]
pub fn default_catalog() -> Vec<Skill> {
    vec![
        Skill::new(1, "Next.js", SkillLevel::Advanced),
        Skill::new(2, "TypeScript", SkillLevel::Intermediate),
        Skill::new(3, "React", SkillLevel::Advanced),
        Skill::new(4, "JavaScript", SkillLevel::Advanced),
    ]
}
