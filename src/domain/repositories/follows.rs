use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{
    accounts::AccountEntity,
    follows::{FollowEntity, InsertFollowEntity},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository {
    /// Inserts the edge. The table's unique constraint is the authority on
    /// duplicates; a violation surfaces as the underlying diesel error so
    /// the use case can translate it.
    async fn insert(&self, insert_follow_entity: InsertFollowEntity) -> Result<FollowEntity>;
    /// Returns the number of deleted rows (0 when no such edge existed).
    async fn delete(&self, follower_id: Uuid, trainer_id: Uuid) -> Result<usize>;
    /// Trainers the follower follows, newest-followed first.
    async fn list_following(&self, follower_id: Uuid) -> Result<Vec<AccountEntity>>;
    /// Accounts following the trainer, newest-follower first.
    async fn list_followers(&self, trainer_id: Uuid) -> Result<Vec<AccountEntity>>;
    async fn exists(&self, follower_id: Uuid, trainer_id: Uuid) -> Result<bool>;
    /// Followed trainer ids only, for feed composition.
    async fn list_followed_trainer_ids(&self, follower_id: Uuid) -> Result<Vec<Uuid>>;
}
