use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::{accounts::AccountEntity, plans::PlanEntity},
    value_objects::{accounts::TrainerSummaryModel, enums::difficulty_levels::DifficultyLevel},
};

/// Preview size for non-subscribers, in Unicode scalars, not bytes.
pub const PREVIEW_CHARS: usize = 150;

/// A plan as seen by a specific viewer: description gated on subscription
/// state, with the state echoed in `is_subscribed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanViewModel {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: i32,
    pub duration: i32,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub difficulty: DifficultyLevel,
    pub trainer: TrainerSummaryModel,
    pub is_subscribed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Computes the viewer-facing view of a plan. Pure and deterministic; the
/// subscription flag must refer to this exact plan. A trainer viewing their
/// own plan gets the same treatment as any other non-subscriber.
pub fn reveal(
    plan: PlanEntity,
    trainer: AccountEntity,
    viewer_has_active_subscription: bool,
) -> PlanViewModel {
    let description = if viewer_has_active_subscription {
        plan.description
    } else {
        preview_description(&plan.description)
    };

    PlanViewModel {
        id: plan.id,
        title: plan.title,
        description,
        price: plan.price,
        duration: plan.duration_days,
        image: plan.image_url,
        tags: plan.tags,
        difficulty: DifficultyLevel::from_str(&plan.difficulty),
        trainer: TrainerSummaryModel::from(trainer),
        is_subscribed: viewer_has_active_subscription,
        created_at: plan.created_at,
        updated_at: plan.updated_at,
    }
}

/// The ellipsis is appended even when nothing was cut; clients rely on the
/// suffix as the redaction marker.
fn preview_description(description: &str) -> String {
    let mut preview: String = description.chars().take(PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}

/// Ungated plan with its trainer, for the owning trainer and for
/// subscription detail views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetailModel {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: i32,
    pub duration: i32,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub difficulty: DifficultyLevel,
    pub trainer: TrainerSummaryModel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlanDetailModel {
    pub fn from_joined(plan: PlanEntity, trainer: AccountEntity) -> Self {
        Self {
            id: plan.id,
            title: plan.title,
            description: plan.description,
            price: plan.price,
            duration: plan.duration_days,
            image: plan.image_url,
            tags: plan.tags,
            difficulty: DifficultyLevel::from_str(&plan.difficulty),
            trainer: TrainerSummaryModel::from(trainer),
            created_at: plan.created_at,
            updated_at: plan.updated_at,
        }
    }
}

/// Own plan with its active-subscription count, for the trainer dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MyPlanModel {
    #[serde(flatten)]
    pub plan: PlanDetailModel,
    pub subscription_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanModel {
    pub title: String,
    pub description: String,
    pub price: i32,
    pub duration: i32,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub difficulty: Option<DifficultyLevel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanModel {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<i32>,
    pub duration: Option<i32>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub difficulty: Option<DifficultyLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trainer() -> AccountEntity {
        AccountEntity {
            id: Uuid::new_v4(),
            email: "coach@example.com".to_string(),
            display_name: "Coach".to_string(),
            role: "TRAINER".to_string(),
            bio: None,
            avatar_url: None,
            certification: Some("NASM".to_string()),
            created_at: Utc::now(),
        }
    }

    fn sample_plan(description: &str) -> PlanEntity {
        let now = Utc::now();
        PlanEntity {
            id: Uuid::new_v4(),
            trainer_id: Uuid::new_v4(),
            title: "Strength Basics".to_string(),
            description: description.to_string(),
            price: 49,
            duration_days: 30,
            image_url: None,
            tags: vec!["strength".to_string()],
            difficulty: "Beginner".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn reveal_returns_full_description_for_subscriber() {
        let description = "a".repeat(500);
        let view = reveal(sample_plan(&description), sample_trainer(), true);

        assert_eq!(view.description, description);
        assert!(view.is_subscribed);
    }

    #[test]
    fn reveal_truncates_long_description_for_non_subscriber() {
        let description = "x".repeat(500);
        let view = reveal(sample_plan(&description), sample_trainer(), false);

        assert_eq!(view.description.chars().count(), PREVIEW_CHARS + 3);
        assert!(view.description.ends_with("..."));
        assert!(!view.is_subscribed);
    }

    #[test]
    fn reveal_appends_ellipsis_even_when_nothing_was_cut() {
        let view = reveal(sample_plan("ten chars!"), sample_trainer(), false);

        assert_eq!(view.description, "ten chars!...");
        assert!(!view.is_subscribed);
    }

    #[test]
    fn reveal_counts_characters_not_bytes() {
        // 200 two-byte scalars; a byte slice at 150 would split a char.
        let description = "é".repeat(200);
        let view = reveal(sample_plan(&description), sample_trainer(), false);

        let expected = format!("{}...", "é".repeat(PREVIEW_CHARS));
        assert_eq!(view.description, expected);
    }
}
