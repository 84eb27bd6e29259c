use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use anyhow::anyhow;
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::plans::{EditPlanEntity, InsertPlanEntity},
    repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
    value_objects::{
        accounts::Viewer,
        enums::{account_roles::AccountRole, difficulty_levels::DifficultyLevel},
        plans::{
            CreatePlanModel, MyPlanModel, PlanDetailModel, PlanViewModel, UpdatePlanModel, reveal,
        },
    },
};

const MAX_TITLE_CHARS: usize = 100;
const MAX_DESCRIPTION_CHARS: usize = 2000;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Plan not found")]
    NotFound,
    #[error("Not authorized to modify this plan")]
    NotOwner,
    #[error("Only trainers can manage plans")]
    TrainerOnly,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PlanError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PlanError::NotFound => StatusCode::NOT_FOUND,
            PlanError::NotOwner | PlanError::TrainerOnly => StatusCode::FORBIDDEN,
            PlanError::Validation(_) => StatusCode::BAD_REQUEST,
            PlanError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type PlanResult<T> = Result<T, PlanError>;

pub struct PlanUseCase<P, S>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    plan_repository: Arc<P>,
    subscription_repository: Arc<S>,
}

impl<P, S> PlanUseCase<P, S>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(plan_repository: Arc<P>, subscription_repository: Arc<S>) -> Self {
        Self {
            plan_repository,
            subscription_repository,
        }
    }

    /// Global catalog, gated per viewer. Anonymous viewers get every
    /// description redacted.
    pub async fn list_plans(&self, viewer_id: Option<Uuid>) -> PlanResult<Vec<PlanViewModel>> {
        let plans = self.plan_repository.list_with_trainers().await.map_err(|err| {
            error!(db_error = ?err, "plans: failed to list catalog");
            PlanError::Internal(err)
        })?;

        let subscribed: HashSet<Uuid> = match viewer_id {
            Some(viewer_id) => self
                .subscription_repository
                .list_active_plan_ids(viewer_id)
                .await
                .map_err(|err| {
                    error!(%viewer_id, db_error = ?err, "plans: failed to load viewer subscriptions");
                    PlanError::Internal(err)
                })?
                .into_iter()
                .collect(),
            None => HashSet::new(),
        };

        Ok(plans
            .into_iter()
            .map(|(plan, trainer)| {
                let is_subscribed = subscribed.contains(&plan.id);
                reveal(plan, trainer, is_subscribed)
            })
            .collect())
    }

    pub async fn get_plan(
        &self,
        plan_id: Uuid,
        viewer_id: Option<Uuid>,
    ) -> PlanResult<PlanViewModel> {
        let (plan, trainer) = self
            .plan_repository
            .find_with_trainer(plan_id)
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "plans: failed to load plan");
                PlanError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(
                    %plan_id,
                    status = PlanError::NotFound.status_code().as_u16(),
                    "plans: plan does not exist"
                );
                PlanError::NotFound
            })?;

        let is_subscribed = match viewer_id {
            Some(viewer_id) => self
                .subscription_repository
                .has_active(viewer_id, plan_id)
                .await
                .map_err(|err| {
                    error!(%viewer_id, %plan_id, db_error = ?err, "plans: failed to probe subscription");
                    PlanError::Internal(err)
                })?,
            None => false,
        };

        Ok(reveal(plan, trainer, is_subscribed))
    }

    pub async fn create_plan(
        &self,
        viewer: Viewer,
        create_plan_model: CreatePlanModel,
    ) -> PlanResult<PlanDetailModel> {
        self.require_trainer(&viewer)?;

        let title = create_plan_model.title.trim().to_string();
        validate_title(&title)?;
        validate_description(&create_plan_model.description)?;
        validate_price(create_plan_model.price)?;
        validate_duration(create_plan_model.duration)?;

        let now = Utc::now();
        let insert_plan_entity = InsertPlanEntity {
            trainer_id: viewer.account_id,
            title,
            description: create_plan_model.description,
            price: create_plan_model.price,
            duration_days: create_plan_model.duration,
            image_url: create_plan_model.image,
            tags: create_plan_model.tags.unwrap_or_default(),
            difficulty: create_plan_model
                .difficulty
                .unwrap_or(DifficultyLevel::Beginner)
                .to_string(),
            created_at: now,
            updated_at: now,
        };

        let plan_id = self
            .plan_repository
            .create(insert_plan_entity)
            .await
            .map_err(|err| {
                error!(trainer_id = %viewer.account_id, db_error = ?err, "plans: failed to create");
                PlanError::Internal(err)
            })?;

        info!(%plan_id, trainer_id = %viewer.account_id, "plans: plan created");

        self.load_detail(plan_id).await
    }

    pub async fn update_plan(
        &self,
        viewer: Viewer,
        plan_id: Uuid,
        update_plan_model: UpdatePlanModel,
    ) -> PlanResult<PlanDetailModel> {
        self.require_trainer(&viewer)?;
        self.require_owned_plan(plan_id, viewer.account_id).await?;

        if let Some(title) = update_plan_model.title.as_deref() {
            validate_title(title.trim())?;
        }
        if let Some(description) = update_plan_model.description.as_deref() {
            validate_description(description)?;
        }
        if let Some(price) = update_plan_model.price {
            validate_price(price)?;
        }
        if let Some(duration) = update_plan_model.duration {
            validate_duration(duration)?;
        }

        let edit_plan_entity = EditPlanEntity {
            title: update_plan_model.title.map(|title| title.trim().to_string()),
            description: update_plan_model.description,
            price: update_plan_model.price,
            duration_days: update_plan_model.duration,
            image_url: update_plan_model.image,
            tags: update_plan_model.tags,
            difficulty: update_plan_model
                .difficulty
                .map(|difficulty| difficulty.to_string()),
            updated_at: Utc::now(),
        };

        self.plan_repository
            .update(plan_id, edit_plan_entity)
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "plans: failed to update");
                PlanError::Internal(err)
            })?;

        info!(%plan_id, trainer_id = %viewer.account_id, "plans: plan updated");

        self.load_detail(plan_id).await
    }

    /// Removes the plan row only. Existing subscriptions keep referencing
    /// the deleted plan; nothing invalidates them.
    pub async fn delete_plan(&self, viewer: Viewer, plan_id: Uuid) -> PlanResult<()> {
        self.require_trainer(&viewer)?;
        self.require_owned_plan(plan_id, viewer.account_id).await?;

        self.plan_repository.delete(plan_id).await.map_err(|err| {
            error!(%plan_id, db_error = ?err, "plans: failed to delete");
            PlanError::Internal(err)
        })?;

        info!(%plan_id, trainer_id = %viewer.account_id, "plans: plan deleted");
        Ok(())
    }

    pub async fn my_plans(&self, viewer: Viewer) -> PlanResult<Vec<MyPlanModel>> {
        self.require_trainer(&viewer)?;

        let plans = self
            .plan_repository
            .list_by_trainer(viewer.account_id)
            .await
            .map_err(|err| {
                error!(trainer_id = %viewer.account_id, db_error = ?err, "plans: failed to list own plans");
                PlanError::Internal(err)
            })?;

        let plan_ids: Vec<Uuid> = plans.iter().map(|(plan, _)| plan.id).collect();
        let counts: HashMap<Uuid, i64> = self
            .subscription_repository
            .count_active_by_plans(plan_ids)
            .await
            .map_err(|err| {
                error!(trainer_id = %viewer.account_id, db_error = ?err, "plans: failed to count subscribers");
                PlanError::Internal(err)
            })?
            .into_iter()
            .collect();

        Ok(plans
            .into_iter()
            .map(|(plan, trainer)| {
                let subscription_count = counts.get(&plan.id).copied().unwrap_or(0);
                MyPlanModel {
                    plan: PlanDetailModel::from_joined(plan, trainer),
                    subscription_count,
                }
            })
            .collect())
    }

    fn require_trainer(&self, viewer: &Viewer) -> PlanResult<()> {
        match viewer.role {
            AccountRole::Trainer => Ok(()),
            AccountRole::User => {
                warn!(
                    account_id = %viewer.account_id,
                    status = PlanError::TrainerOnly.status_code().as_u16(),
                    "plans: non-trainer attempted plan management"
                );
                Err(PlanError::TrainerOnly)
            }
        }
    }

    async fn require_owned_plan(&self, plan_id: Uuid, trainer_id: Uuid) -> PlanResult<()> {
        let plan = self
            .plan_repository
            .find_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "plans: failed to load plan for ownership check");
                PlanError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(
                    %plan_id,
                    status = PlanError::NotFound.status_code().as_u16(),
                    "plans: plan does not exist"
                );
                PlanError::NotFound
            })?;

        if plan.trainer_id != trainer_id {
            warn!(
                %plan_id,
                %trainer_id,
                owner_id = %plan.trainer_id,
                status = PlanError::NotOwner.status_code().as_u16(),
                "plans: trainer does not own this plan"
            );
            return Err(PlanError::NotOwner);
        }

        Ok(())
    }

    async fn load_detail(&self, plan_id: Uuid) -> PlanResult<PlanDetailModel> {
        let (plan, trainer) = self
            .plan_repository
            .find_with_trainer(plan_id)
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "plans: failed to reload plan");
                PlanError::Internal(err)
            })?
            .ok_or_else(|| PlanError::Internal(anyhow!("plan vanished on reload")))?;

        Ok(PlanDetailModel::from_joined(plan, trainer))
    }
}

fn validate_title(title: &str) -> PlanResult<()> {
    if title.is_empty() {
        return Err(PlanError::Validation(
            "Please provide a plan title".to_string(),
        ));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(PlanError::Validation(
            "Title cannot exceed 100 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> PlanResult<()> {
    if description.is_empty() {
        return Err(PlanError::Validation(
            "Please provide a plan description".to_string(),
        ));
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(PlanError::Validation(
            "Description cannot exceed 2000 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_price(price: i32) -> PlanResult<()> {
    if price < 0 {
        return Err(PlanError::Validation(
            "Price cannot be negative".to_string(),
        ));
    }
    Ok(())
}

fn validate_duration(duration: i32) -> PlanResult<()> {
    if duration < 1 {
        return Err(PlanError::Validation(
            "Duration must be at least 1 day".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::{accounts::AccountEntity, plans::PlanEntity},
        repositories::{plans::MockPlanRepository, subscriptions::MockSubscriptionRepository},
    };

    fn trainer_entity(id: Uuid) -> AccountEntity {
        AccountEntity {
            id,
            email: "coach@example.com".to_string(),
            display_name: "Coach".to_string(),
            role: "TRAINER".to_string(),
            bio: None,
            avatar_url: None,
            certification: None,
            created_at: Utc::now(),
        }
    }

    fn plan_entity(id: Uuid, trainer_id: Uuid, description: &str) -> PlanEntity {
        let now = Utc::now();
        PlanEntity {
            id,
            trainer_id,
            title: "Mobility Reset".to_string(),
            description: description.to_string(),
            price: 29,
            duration_days: 14,
            image_url: None,
            tags: vec![],
            difficulty: "Beginner".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn trainer_viewer(account_id: Uuid) -> Viewer {
        Viewer {
            account_id,
            role: AccountRole::Trainer,
        }
    }

    fn create_model() -> CreatePlanModel {
        CreatePlanModel {
            title: "Mobility Reset".to_string(),
            description: "Daily mobility work".to_string(),
            price: 29,
            duration: 14,
            image: None,
            tags: None,
            difficulty: None,
        }
    }

    fn usecase(
        plan_repo: MockPlanRepository,
        subscription_repo: MockSubscriptionRepository,
    ) -> PlanUseCase<MockPlanRepository, MockSubscriptionRepository> {
        PlanUseCase::new(Arc::new(plan_repo), Arc::new(subscription_repo))
    }

    #[tokio::test]
    async fn create_plan_rejects_non_trainer() {
        let usecase = usecase(
            MockPlanRepository::new(),
            MockSubscriptionRepository::new(),
        );
        let viewer = Viewer {
            account_id: Uuid::new_v4(),
            role: AccountRole::User,
        };

        let result = usecase.create_plan(viewer, create_model()).await;

        assert!(matches!(result, Err(PlanError::TrainerOnly)));
    }

    #[tokio::test]
    async fn create_plan_rejects_oversized_title() {
        let usecase = usecase(
            MockPlanRepository::new(),
            MockSubscriptionRepository::new(),
        );
        let mut model = create_model();
        model.title = "t".repeat(101);

        let result = usecase
            .create_plan(trainer_viewer(Uuid::new_v4()), model)
            .await;

        assert!(matches!(result, Err(PlanError::Validation(_))));
    }

    #[tokio::test]
    async fn create_plan_rejects_zero_duration() {
        let usecase = usecase(
            MockPlanRepository::new(),
            MockSubscriptionRepository::new(),
        );
        let mut model = create_model();
        model.duration = 0;

        let result = usecase
            .create_plan(trainer_viewer(Uuid::new_v4()), model)
            .await;

        assert!(matches!(result, Err(PlanError::Validation(_))));
    }

    #[tokio::test]
    async fn create_plan_defaults_difficulty_and_tags() {
        let trainer_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();
        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_create()
            .withf(|insert| insert.difficulty == "Beginner" && insert.tags.is_empty())
            .returning(move |_| Ok(plan_id));
        plan_repo
            .expect_find_with_trainer()
            .returning(move |id| {
                Ok(Some((
                    plan_entity(id, trainer_id, "Daily mobility work"),
                    trainer_entity(trainer_id),
                )))
            });
        let usecase = usecase(plan_repo, MockSubscriptionRepository::new());

        let detail = usecase
            .create_plan(trainer_viewer(trainer_id), create_model())
            .await
            .unwrap();

        assert_eq!(detail.id, plan_id);
        assert_eq!(detail.difficulty, DifficultyLevel::Beginner);
    }

    #[tokio::test]
    async fn update_plan_rejects_non_owner() {
        let owner_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();
        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_find_by_id()
            .returning(move |id| Ok(Some(plan_entity(id, owner_id, "desc"))));
        let usecase = usecase(plan_repo, MockSubscriptionRepository::new());

        let result = usecase
            .update_plan(
                trainer_viewer(Uuid::new_v4()),
                plan_id,
                UpdatePlanModel::default(),
            )
            .await;

        assert!(matches!(result, Err(PlanError::NotOwner)));
    }

    #[tokio::test]
    async fn delete_plan_fails_when_absent() {
        let mut plan_repo = MockPlanRepository::new();
        plan_repo.expect_find_by_id().returning(|_| Ok(None));
        let usecase = usecase(plan_repo, MockSubscriptionRepository::new());

        let result = usecase
            .delete_plan(trainer_viewer(Uuid::new_v4()), Uuid::new_v4())
            .await;

        assert!(matches!(result, Err(PlanError::NotFound)));
    }

    #[tokio::test]
    async fn delete_plan_leaves_subscriptions_untouched() {
        let trainer_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();
        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_find_by_id()
            .returning(move |id| Ok(Some(plan_entity(id, trainer_id, "desc"))));
        plan_repo.expect_delete().returning(|_| Ok(()));
        // No expectations on the subscription repository: any call during
        // deletion panics the mock.
        let usecase = usecase(plan_repo, MockSubscriptionRepository::new());

        let result = usecase.delete_plan(trainer_viewer(trainer_id), plan_id).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn list_plans_redacts_for_anonymous_viewer() {
        let trainer_id = Uuid::new_v4();
        let long_description = "d".repeat(400);
        let mut plan_repo = MockPlanRepository::new();
        let description = long_description.clone();
        plan_repo.expect_list_with_trainers().returning(move || {
            Ok(vec![(
                plan_entity(Uuid::new_v4(), trainer_id, &description),
                trainer_entity(trainer_id),
            )])
        });
        let usecase = usecase(plan_repo, MockSubscriptionRepository::new());

        let plans = usecase.list_plans(None).await.unwrap();

        assert_eq!(plans.len(), 1);
        assert!(plans[0].description.ends_with("..."));
        assert!(!plans[0].is_subscribed);
    }

    #[tokio::test]
    async fn get_plan_reveals_full_description_for_subscriber() {
        let viewer_id = Uuid::new_v4();
        let trainer_id = Uuid::new_v4();
        let long_description = "d".repeat(400);
        let mut plan_repo = MockPlanRepository::new();
        let description = long_description.clone();
        plan_repo.expect_find_with_trainer().returning(move |id| {
            Ok(Some((
                plan_entity(id, trainer_id, &description),
                trainer_entity(trainer_id),
            )))
        });
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_has_active()
            .returning(|_, _| Ok(true));
        let usecase = usecase(plan_repo, subscription_repo);

        let view = usecase
            .get_plan(Uuid::new_v4(), Some(viewer_id))
            .await
            .unwrap();

        assert_eq!(view.description, long_description);
        assert!(view.is_subscribed);
    }

    #[tokio::test]
    async fn my_plans_attaches_subscriber_counts() {
        let trainer_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();
        let mut plan_repo = MockPlanRepository::new();
        plan_repo.expect_list_by_trainer().returning(move |_| {
            Ok(vec![(
                plan_entity(plan_id, trainer_id, "desc"),
                trainer_entity(trainer_id),
            )])
        });
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_count_active_by_plans()
            .returning(move |_| Ok(vec![(plan_id, 4)]));
        let usecase = usecase(plan_repo, subscription_repo);

        let plans = usecase.my_plans(trainer_viewer(trainer_id)).await.unwrap();

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].subscription_count, 4);
    }
}
