use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    domain::{entities::accounts::AccountEntity, repositories::accounts::AccountRepository},
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::accounts},
};

pub struct AccountPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AccountPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl AccountRepository for AccountPostgres {
    async fn find_by_id(&self, account_id: Uuid) -> Result<Option<AccountEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = accounts::table
            .filter(accounts::id.eq(account_id))
            .select(AccountEntity::as_select())
            .first::<AccountEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }
}
