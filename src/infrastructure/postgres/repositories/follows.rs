use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{delete, insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            accounts::AccountEntity,
            follows::{FollowEntity, InsertFollowEntity},
        },
        repositories::follows::FollowRepository,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{accounts, follows},
    },
};

pub struct FollowPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl FollowPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl FollowRepository for FollowPostgres {
    async fn insert(&self, insert_follow_entity: InsertFollowEntity) -> Result<FollowEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // No pre-check: a duplicate pair hits the composite primary key and
        // bubbles up as a unique violation.
        let result = insert_into(follows::table)
            .values(&insert_follow_entity)
            .returning(FollowEntity::as_returning())
            .get_result::<FollowEntity>(&mut conn)?;

        Ok(result)
    }

    async fn delete(&self, follower_id: Uuid, trainer_id: Uuid) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(follows::table)
            .filter(follows::follower_id.eq(follower_id))
            .filter(follows::trainer_id.eq(trainer_id))
            .execute(&mut conn)?;

        Ok(deleted)
    }

    async fn list_following(&self, follower_id: Uuid) -> Result<Vec<AccountEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = follows::table
            .inner_join(accounts::table.on(accounts::id.eq(follows::trainer_id)))
            .filter(follows::follower_id.eq(follower_id))
            .order(follows::created_at.desc())
            .select(AccountEntity::as_select())
            .load::<AccountEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_followers(&self, trainer_id: Uuid) -> Result<Vec<AccountEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = follows::table
            .inner_join(accounts::table.on(accounts::id.eq(follows::follower_id)))
            .filter(follows::trainer_id.eq(trainer_id))
            .order(follows::created_at.desc())
            .select(AccountEntity::as_select())
            .load::<AccountEntity>(&mut conn)?;

        Ok(results)
    }

    async fn exists(&self, follower_id: Uuid, trainer_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let edge = follows::table
            .filter(follows::follower_id.eq(follower_id))
            .filter(follows::trainer_id.eq(trainer_id))
            .select(follows::created_at)
            .first::<chrono::DateTime<chrono::Utc>>(&mut conn)
            .optional()?;

        Ok(edge.is_some())
    }

    async fn list_followed_trainer_ids(&self, follower_id: Uuid) -> Result<Vec<Uuid>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = follows::table
            .filter(follows::follower_id.eq(follower_id))
            .order(follows::created_at.desc())
            .select(follows::trainer_id)
            .load::<Uuid>(&mut conn)?;

        Ok(results)
    }
}
