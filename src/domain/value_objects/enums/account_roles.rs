use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Closed role set. Only `Trainer` accounts may author plans or be follow
/// targets; authorization points match on this exhaustively.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountRole {
    #[default]
    User,
    Trainer,
}

impl Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let role = match self {
            AccountRole::User => "USER",
            AccountRole::Trainer => "TRAINER",
        };
        write!(f, "{}", role)
    }
}

impl AccountRole {
    pub fn from_str(value: &str) -> Self {
        match value {
            "TRAINER" => AccountRole::Trainer,
            _ => AccountRole::User,
        }
    }
}
