use serde::{Deserialize, Serialize};

use crate::domain::value_objects::plans::PlanViewModel;

/// Shown instead of an error when the viewer follows nobody yet.
pub const EMPTY_FEED_MESSAGE: &str = "Follow some trainers to see their plans in your feed";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedModel {
    pub plans: Vec<PlanViewModel>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
