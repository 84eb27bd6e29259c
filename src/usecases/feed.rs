use std::{collections::HashSet, sync::Arc};

use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::{
    repositories::{
        follows::FollowRepository, plans::PlanRepository, subscriptions::SubscriptionRepository,
    },
    value_objects::{
        feed::{EMPTY_FEED_MESSAGE, FeedModel},
        plans::reveal,
    },
};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl FeedError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        match self {
            FeedError::Internal(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type FeedResult<T> = Result<T, FeedError>;

/// Joins the follow graph, the plan catalog and the viewer's subscription
/// state into one personalized view. Recomputed from store state on every
/// call; no caching, no pagination.
pub struct FeedUseCase<F, P, S>
where
    F: FollowRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    follow_repository: Arc<F>,
    plan_repository: Arc<P>,
    subscription_repository: Arc<S>,
}

impl<F, P, S> FeedUseCase<F, P, S>
where
    F: FollowRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(
        follow_repository: Arc<F>,
        plan_repository: Arc<P>,
        subscription_repository: Arc<S>,
    ) -> Self {
        Self {
            follow_repository,
            plan_repository,
            subscription_repository,
        }
    }

    pub async fn personalized_feed(&self, viewer_id: Uuid) -> FeedResult<FeedModel> {
        let trainer_ids = self
            .follow_repository
            .list_followed_trainer_ids(viewer_id)
            .await
            .map_err(|err| {
                error!(%viewer_id, db_error = ?err, "feed: failed to load followed trainers");
                FeedError::Internal(err)
            })?;

        if trainer_ids.is_empty() {
            info!(%viewer_id, "feed: viewer follows nobody, returning empty feed");
            return Ok(FeedModel {
                plans: vec![],
                count: 0,
                message: Some(EMPTY_FEED_MESSAGE.to_string()),
            });
        }

        let plans = self
            .plan_repository
            .list_by_trainers(trainer_ids)
            .await
            .map_err(|err| {
                error!(%viewer_id, db_error = ?err, "feed: failed to load followed trainers' plans");
                FeedError::Internal(err)
            })?;

        let subscribed: HashSet<Uuid> = self
            .subscription_repository
            .list_active_plan_ids(viewer_id)
            .await
            .map_err(|err| {
                error!(%viewer_id, db_error = ?err, "feed: failed to load active subscriptions");
                FeedError::Internal(err)
            })?
            .into_iter()
            .collect();

        let plans: Vec<_> = plans
            .into_iter()
            .map(|(plan, trainer)| {
                let is_subscribed = subscribed.contains(&plan.id);
                reveal(plan, trainer, is_subscribed)
            })
            .collect();

        info!(%viewer_id, plan_count = plans.len(), "feed: personalized feed composed");

        Ok(FeedModel {
            count: plans.len(),
            plans,
            message: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::{accounts::AccountEntity, plans::PlanEntity},
        repositories::{
            follows::MockFollowRepository, plans::MockPlanRepository,
            subscriptions::MockSubscriptionRepository,
        },
    };
    use chrono::Utc;

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
            title: "Couch to 5k".to_string(),
            description: description.to_string(),
            price: 19,
            duration_days: 60,
            image_url: None,
            tags: vec![],
            difficulty: "Beginner".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn usecase(
        follow_repo: MockFollowRepository,
        plan_repo: MockPlanRepository,
        subscription_repo: MockSubscriptionRepository,
    ) -> FeedUseCase<MockFollowRepository, MockPlanRepository, MockSubscriptionRepository> {
        FeedUseCase::new(
            Arc::new(follow_repo),
            Arc::new(plan_repo),
            Arc::new(subscription_repo),
        )
    }

    #[tokio::test]
    async fn empty_follow_set_yields_message_not_error() {
        let mut follow_repo = MockFollowRepository::new();
        follow_repo
            .expect_list_followed_trainer_ids()
            .returning(|_| Ok(vec![]));
        let usecase = usecase(
            follow_repo,
            MockPlanRepository::new(),
            MockSubscriptionRepository::new(),
        );

        let feed = usecase.personalized_feed(Uuid::new_v4()).await.unwrap();

        assert!(feed.plans.is_empty());
        assert_eq!(feed.count, 0);
        assert_eq!(
            feed.message.as_deref(),
            Some("Follow some trainers to see their plans in your feed")
        );
    }

    #[tokio::test]
    async fn followed_trainers_plan_is_redacted_without_subscription() {
        let trainer_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();
        let long_description = "w".repeat(300);

        let mut follow_repo = MockFollowRepository::new();
        follow_repo
            .expect_list_followed_trainer_ids()
            .returning(move |_| Ok(vec![trainer_id]));
        let mut plan_repo = MockPlanRepository::new();
        let description = long_description.clone();
        plan_repo.expect_list_by_trainers().returning(move |_| {
            Ok(vec![(
                plan_entity(plan_id, trainer_id, &description),
                trainer_entity(trainer_id),
            )])
        });
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_list_active_plan_ids()
            .returning(|_| Ok(vec![]));
        let usecase = usecase(follow_repo, plan_repo, subscription_repo);

        let feed = usecase.personalized_feed(Uuid::new_v4()).await.unwrap();

        assert_eq!(feed.count, 1);
        assert!(feed.message.is_none());
        let view = &feed.plans[0];
        assert!(!view.is_subscribed);
        assert!(view.description.ends_with("..."));
        assert!(view.description.chars().count() <= 153);
    }

    #[tokio::test]
    async fn subscribing_reveals_full_description_in_feed() {
        let trainer_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();
        let long_description = "w".repeat(300);

        let mut follow_repo = MockFollowRepository::new();
        follow_repo
            .expect_list_followed_trainer_ids()
            .returning(move |_| Ok(vec![trainer_id]));
        let mut plan_repo = MockPlanRepository::new();
        let description = long_description.clone();
        plan_repo.expect_list_by_trainers().returning(move |_| {
            Ok(vec![(
                plan_entity(plan_id, trainer_id, &description),
                trainer_entity(trainer_id),
            )])
        });
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_list_active_plan_ids()
            .returning(move |_| Ok(vec![plan_id]));
        let usecase = usecase(follow_repo, plan_repo, subscription_repo);

        let feed = usecase.personalized_feed(Uuid::new_v4()).await.unwrap();

        let view = &feed.plans[0];
        assert!(view.is_subscribed);
        assert_eq!(view.description, long_description);
    }
}
