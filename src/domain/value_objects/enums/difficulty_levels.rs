use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DifficultyLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let difficulty = match self {
            DifficultyLevel::Beginner => "Beginner",
            DifficultyLevel::Intermediate => "Intermediate",
            DifficultyLevel::Advanced => "Advanced",
        };
        write!(f, "{}", difficulty)
    }
}

impl DifficultyLevel {
    pub fn from_str(value: &str) -> Self {
        match value {
            "Intermediate" => DifficultyLevel::Intermediate,
            "Advanced" => DifficultyLevel::Advanced,
            _ => DifficultyLevel::Beginner,
        }
    }
}
