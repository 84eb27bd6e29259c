use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::accounts::AccountEntity;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository {
    async fn find_by_id(&self, account_id: Uuid) -> Result<Option<AccountEntity>>;
}
