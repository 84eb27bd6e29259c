use std::sync::Arc;

use anyhow::{Context, anyhow};
use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        entities::subscriptions::InsertSubscriptionEntity,
        repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
        value_objects::{
            enums::subscription_statuses::SubscriptionStatus,
            subscriptions::SubscriptionViewModel,
        },
    },
    usecases::is_unique_violation,
};

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("Plan not found")]
    PlanNotFound,
    #[error("You already have a subscription to this plan")]
    DuplicateSubscription,
    #[error("Subscription not found")]
    NotFound,
    #[error("Not authorized to view this subscription")]
    Forbidden,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::PlanNotFound | SubscriptionError::NotFound => StatusCode::NOT_FOUND,
            SubscriptionError::DuplicateSubscription => StatusCode::BAD_REQUEST,
            SubscriptionError::Forbidden => StatusCode::FORBIDDEN,
            SubscriptionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type SubscriptionResult<T> = Result<T, SubscriptionError>;

pub struct SubscriptionUseCase<S, P>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    subscription_repository: Arc<S>,
    plan_repository: Arc<P>,
}

impl<S, P> SubscriptionUseCase<S, P>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    pub fn new(subscription_repository: Arc<S>, plan_repository: Arc<P>) -> Self {
        Self {
            subscription_repository,
            plan_repository,
        }
    }

    /// Payment is simulated: once the plan resolves and the pair is new,
    /// the subscription is created unconditionally.
    pub async fn subscribe(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> SubscriptionResult<SubscriptionViewModel> {
        info!(%user_id, %plan_id, "subscriptions: subscribe requested");

        let plan = self
            .plan_repository
            .find_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "subscriptions: failed to load plan");
                SubscriptionError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(
                    %plan_id,
                    status = SubscriptionError::PlanNotFound.status_code().as_u16(),
                    "subscriptions: plan does not exist"
                );
                SubscriptionError::PlanNotFound
            })?;

        let purchased_at = Utc::now();
        let expires_at = purchased_at
            .checked_add_signed(Duration::days(plan.duration_days.into()))
            .context("failed to compute subscription expiry")?;

        let insert_subscription_entity = InsertSubscriptionEntity {
            user_id,
            plan_id,
            purchased_at,
            status: SubscriptionStatus::Active.to_string(),
            expires_at,
        };

        let subscription = self
            .subscription_repository
            .insert(insert_subscription_entity)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    warn!(
                        %user_id,
                        %plan_id,
                        status = SubscriptionError::DuplicateSubscription.status_code().as_u16(),
                        "subscriptions: pair already has a subscription record"
                    );
                    SubscriptionError::DuplicateSubscription
                } else {
                    error!(%user_id, %plan_id, db_error = ?err, "subscriptions: failed to insert");
                    SubscriptionError::Internal(err)
                }
            })?;

        info!(
            %user_id,
            %plan_id,
            subscription_id = %subscription.id,
            expires_at = %subscription.expires_at,
            "subscriptions: subscription created"
        );

        let (subscription, plan, trainer) = self
            .subscription_repository
            .find_with_plan_and_trainer(subscription.id)
            .await
            .map_err(|err| {
                error!(
                    subscription_id = %subscription.id,
                    db_error = ?err,
                    "subscriptions: failed to reload created subscription"
                );
                SubscriptionError::Internal(err)
            })?
            .ok_or_else(|| {
                SubscriptionError::Internal(anyhow!("created subscription vanished on reload"))
            })?;

        Ok(SubscriptionViewModel::from_joined(
            subscription,
            plan,
            trainer,
        ))
    }

    pub async fn list_mine(&self, user_id: Uuid) -> SubscriptionResult<Vec<SubscriptionViewModel>> {
        let rows = self
            .subscription_repository
            .list_by_user(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "subscriptions: failed to list for user");
                SubscriptionError::Internal(err)
            })?;

        Ok(rows
            .into_iter()
            .map(|(subscription, plan, trainer)| {
                SubscriptionViewModel::from_joined(subscription, plan, trainer)
            })
            .collect())
    }

    pub async fn get_one(
        &self,
        subscription_id: Uuid,
        requester_id: Uuid,
    ) -> SubscriptionResult<SubscriptionViewModel> {
        let (subscription, plan, trainer) = self
            .subscription_repository
            .find_with_plan_and_trainer(subscription_id)
            .await
            .map_err(|err| {
                error!(%subscription_id, db_error = ?err, "subscriptions: failed to load");
                SubscriptionError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(
                    %subscription_id,
                    status = SubscriptionError::NotFound.status_code().as_u16(),
                    "subscriptions: not found"
                );
                SubscriptionError::NotFound
            })?;

        if subscription.user_id != requester_id {
            warn!(
                %subscription_id,
                %requester_id,
                status = SubscriptionError::Forbidden.status_code().as_u16(),
                "subscriptions: requester does not own this subscription"
            );
            return Err(SubscriptionError::Forbidden);
        }

        Ok(SubscriptionViewModel::from_joined(
            subscription,
            plan,
            trainer,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            entities::{
                accounts::AccountEntity, plans::PlanEntity, subscriptions::SubscriptionEntity,
            },
            repositories::{
                plans::MockPlanRepository, subscriptions::MockSubscriptionRepository,
            },
        },
        usecases::unique_violation_error,
    };

    fn sample_trainer() -> AccountEntity {
        AccountEntity {
            id: Uuid::new_v4(),
            email: "coach@example.com".to_string(),
            display_name: "Coach".to_string(),
            role: "TRAINER".to_string(),
            bio: None,
            avatar_url: None,
            certification: None,
            created_at: Utc::now(),
        }
    }

    fn sample_plan(id: Uuid, duration_days: i32) -> PlanEntity {
        let now = Utc::now();
        PlanEntity {
            id,
            trainer_id: Uuid::new_v4(),
            title: "Hypertrophy Block".to_string(),
            description: "Twelve weeks of progressive overload".to_string(),
            price: 79,
            duration_days,
            image_url: None,
            tags: vec![],
            difficulty: "Intermediate".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn entity_from_insert(insert: &InsertSubscriptionEntity) -> SubscriptionEntity {
        SubscriptionEntity {
            id: Uuid::new_v4(),
            user_id: insert.user_id,
            plan_id: insert.plan_id,
            purchased_at: insert.purchased_at,
            status: insert.status.clone(),
            expires_at: insert.expires_at,
        }
    }

    fn usecase(
        subscription_repo: MockSubscriptionRepository,
        plan_repo: MockPlanRepository,
    ) -> SubscriptionUseCase<MockSubscriptionRepository, MockPlanRepository> {
        SubscriptionUseCase::new(Arc::new(subscription_repo), Arc::new(plan_repo))
    }

    #[tokio::test]
    async fn subscribe_fails_when_plan_is_missing() {
        let mut plan_repo = MockPlanRepository::new();
        plan_repo.expect_find_by_id().returning(|_| Ok(None));
        let usecase = usecase(MockSubscriptionRepository::new(), plan_repo);

        let result = usecase.subscribe(Uuid::new_v4(), Uuid::new_v4()).await;

        assert!(matches!(result, Err(SubscriptionError::PlanNotFound)));
    }

    #[tokio::test]
    async fn subscribe_computes_expiry_from_plan_duration() {
        let plan_id = Uuid::new_v4();
        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_find_by_id()
            .returning(move |id| Ok(Some(sample_plan(id, 30))));

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_insert()
            .withf(|insert| {
                insert.expires_at - insert.purchased_at == Duration::days(30)
                    && insert.status == "active"
            })
            .returning(|insert| Ok(entity_from_insert(&insert)));
        subscription_repo
            .expect_find_with_plan_and_trainer()
            .returning(move |id| {
                let insert = InsertSubscriptionEntity {
                    user_id: Uuid::new_v4(),
                    plan_id,
                    purchased_at: Utc::now(),
                    status: "active".to_string(),
                    expires_at: Utc::now() + Duration::days(30),
                };
                let mut entity = entity_from_insert(&insert);
                entity.id = id;
                Ok(Some((entity, sample_plan(plan_id, 30), sample_trainer())))
            });
        let usecase = usecase(subscription_repo, plan_repo);

        let view = usecase.subscribe(Uuid::new_v4(), plan_id).await.unwrap();

        assert_eq!(view.status, SubscriptionStatus::Active);
        assert_eq!(view.plan.id, plan_id);
    }

    #[tokio::test]
    async fn subscribe_translates_unique_violation_regardless_of_prior_status() {
        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_find_by_id()
            .returning(move |id| Ok(Some(sample_plan(id, 7))));
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_insert()
            .returning(|_| Err(unique_violation_error()));
        let usecase = usecase(subscription_repo, plan_repo);

        let result = usecase.subscribe(Uuid::new_v4(), Uuid::new_v4()).await;

        assert!(matches!(
            result,
            Err(SubscriptionError::DuplicateSubscription)
        ));
    }

    #[tokio::test]
    async fn get_one_rejects_non_owner() {
        let subscription_id = Uuid::new_v4();
        let owner_id = Uuid::new_v4();
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_with_plan_and_trainer()
            .returning(move |id| {
                let plan = sample_plan(Uuid::new_v4(), 30);
                let entity = SubscriptionEntity {
                    id,
                    user_id: owner_id,
                    plan_id: plan.id,
                    purchased_at: Utc::now(),
                    status: "active".to_string(),
                    expires_at: Utc::now() + Duration::days(30),
                };
                Ok(Some((entity, plan, sample_trainer())))
            });
        let usecase = usecase(subscription_repo, MockPlanRepository::new());

        let result = usecase.get_one(subscription_id, Uuid::new_v4()).await;

        assert!(matches!(result, Err(SubscriptionError::Forbidden)));
    }

    #[tokio::test]
    async fn get_one_fails_when_absent() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_with_plan_and_trainer()
            .returning(|_| Ok(None));
        let usecase = usecase(subscription_repo, MockPlanRepository::new());

        let result = usecase.get_one(Uuid::new_v4(), Uuid::new_v4()).await;

        assert!(matches!(result, Err(SubscriptionError::NotFound)));
    }
}
