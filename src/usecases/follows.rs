use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        entities::follows::InsertFollowEntity,
        repositories::{accounts::AccountRepository, follows::FollowRepository},
        value_objects::{
            accounts::AccountModel, enums::account_roles::AccountRole, follows::FollowModel,
        },
    },
    usecases::is_unique_violation,
};

#[derive(Debug, Error)]
pub enum FollowError {
    #[error("Trainer not found")]
    TrainerNotFound,
    #[error("You can only follow trainer accounts")]
    InvalidTarget,
    #[error("You cannot follow yourself")]
    SelfFollowRejected,
    #[error("You are already following this trainer")]
    AlreadyExists,
    #[error("You are not following this trainer")]
    NotFollowing,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl FollowError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            FollowError::TrainerNotFound | FollowError::NotFollowing => StatusCode::NOT_FOUND,
            FollowError::InvalidTarget
            | FollowError::SelfFollowRejected
            | FollowError::AlreadyExists => StatusCode::BAD_REQUEST,
            FollowError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type FollowResult<T> = Result<T, FollowError>;

pub struct FollowUseCase<F, A>
where
    F: FollowRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    follow_repository: Arc<F>,
    account_repository: Arc<A>,
}

impl<F, A> FollowUseCase<F, A>
where
    F: FollowRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    pub fn new(follow_repository: Arc<F>, account_repository: Arc<A>) -> Self {
        Self {
            follow_repository,
            account_repository,
        }
    }

    pub async fn follow(&self, follower_id: Uuid, trainer_id: Uuid) -> FollowResult<FollowModel> {
        info!(%follower_id, %trainer_id, "follows: follow requested");

        // Checked before the role lookup so a self-follow is rejected as
        // such whatever the follower's role.
        if follower_id == trainer_id {
            warn!(
                %follower_id,
                status = FollowError::SelfFollowRejected.status_code().as_u16(),
                "follows: self-follow rejected"
            );
            return Err(FollowError::SelfFollowRejected);
        }

        let trainer = self
            .account_repository
            .find_by_id(trainer_id)
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "follows: failed to load follow target");
                FollowError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(
                    %trainer_id,
                    status = FollowError::TrainerNotFound.status_code().as_u16(),
                    "follows: follow target does not exist"
                );
                FollowError::TrainerNotFound
            })?;

        match AccountRole::from_str(&trainer.role) {
            AccountRole::Trainer => {}
            AccountRole::User => {
                warn!(
                    %trainer_id,
                    role = %trainer.role,
                    status = FollowError::InvalidTarget.status_code().as_u16(),
                    "follows: follow target is not a trainer"
                );
                return Err(FollowError::InvalidTarget);
            }
        }

        let insert_follow_entity = InsertFollowEntity {
            follower_id,
            trainer_id,
            created_at: Utc::now(),
        };

        let follow = self
            .follow_repository
            .insert(insert_follow_entity)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    warn!(
                        %follower_id,
                        %trainer_id,
                        status = FollowError::AlreadyExists.status_code().as_u16(),
                        "follows: edge already present"
                    );
                    FollowError::AlreadyExists
                } else {
                    error!(%follower_id, %trainer_id, db_error = ?err, "follows: failed to insert edge");
                    FollowError::Internal(err)
                }
            })?;

        info!(%follower_id, %trainer_id, "follows: edge created");
        Ok(FollowModel::from(follow))
    }

    pub async fn unfollow(&self, follower_id: Uuid, trainer_id: Uuid) -> FollowResult<()> {
        info!(%follower_id, %trainer_id, "follows: unfollow requested");

        let deleted = self
            .follow_repository
            .delete(follower_id, trainer_id)
            .await
            .map_err(|err| {
                error!(%follower_id, %trainer_id, db_error = ?err, "follows: failed to delete edge");
                FollowError::Internal(err)
            })?;

        if deleted == 0 {
            warn!(
                %follower_id,
                %trainer_id,
                status = FollowError::NotFollowing.status_code().as_u16(),
                "follows: no edge to delete"
            );
            return Err(FollowError::NotFollowing);
        }

        info!(%follower_id, %trainer_id, "follows: edge deleted");
        Ok(())
    }

    pub async fn list_following(&self, follower_id: Uuid) -> FollowResult<Vec<AccountModel>> {
        let trainers = self
            .follow_repository
            .list_following(follower_id)
            .await
            .map_err(|err| {
                error!(%follower_id, db_error = ?err, "follows: failed to list followed trainers");
                FollowError::Internal(err)
            })?;

        Ok(trainers.into_iter().map(AccountModel::from).collect())
    }

    pub async fn list_followers(&self, trainer_id: Uuid) -> FollowResult<Vec<AccountModel>> {
        let trainer = self
            .account_repository
            .find_by_id(trainer_id)
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "follows: failed to load trainer");
                FollowError::Internal(err)
            })?;

        // Missing account and wrong role collapse to the same 404, matching
        // the public followers endpoint's behavior.
        let is_trainer = trainer
            .map(|account| matches!(AccountRole::from_str(&account.role), AccountRole::Trainer))
            .unwrap_or(false);
        if !is_trainer {
            warn!(
                %trainer_id,
                status = FollowError::TrainerNotFound.status_code().as_u16(),
                "follows: followers requested for non-trainer"
            );
            return Err(FollowError::TrainerNotFound);
        }

        let followers = self
            .follow_repository
            .list_followers(trainer_id)
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "follows: failed to list followers");
                FollowError::Internal(err)
            })?;

        Ok(followers.into_iter().map(AccountModel::from).collect())
    }

    /// Absence of the edge is `false`, never an error.
    pub async fn is_following(&self, follower_id: Uuid, trainer_id: Uuid) -> FollowResult<bool> {
        let exists = self
            .follow_repository
            .exists(follower_id, trainer_id)
            .await
            .map_err(|err| {
                error!(%follower_id, %trainer_id, db_error = ?err, "follows: failed to probe edge");
                FollowError::Internal(err)
            })?;

        Ok(exists)
    }
}
