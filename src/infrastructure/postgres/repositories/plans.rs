use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{delete, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            accounts::AccountEntity,
            plans::{EditPlanEntity, InsertPlanEntity, PlanEntity},
        },
        repositories::plans::PlanRepository,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{accounts, plans},
    },
};

pub struct PlanPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PlanPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PlanRepository for PlanPostgres {
    async fn create(&self, insert_plan_entity: InsertPlanEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(plans::table)
            .values(&insert_plan_entity)
            .returning(plans::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn find_by_id(&self, plan_id: Uuid) -> Result<Option<PlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = plans::table
            .filter(plans::id.eq(plan_id))
            .select(PlanEntity::as_select())
            .first::<PlanEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_with_trainer(
        &self,
        plan_id: Uuid,
    ) -> Result<Option<(PlanEntity, AccountEntity)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = plans::table
            .inner_join(accounts::table)
            .filter(plans::id.eq(plan_id))
            .select((PlanEntity::as_select(), AccountEntity::as_select()))
            .first::<(PlanEntity, AccountEntity)>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_with_trainers(&self) -> Result<Vec<(PlanEntity, AccountEntity)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = plans::table
            .inner_join(accounts::table)
            .order(plans::created_at.desc())
            .select((PlanEntity::as_select(), AccountEntity::as_select()))
            .load::<(PlanEntity, AccountEntity)>(&mut conn)?;

        Ok(results)
    }

    async fn list_by_trainers(
        &self,
        trainer_ids: Vec<Uuid>,
    ) -> Result<Vec<(PlanEntity, AccountEntity)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = plans::table
            .inner_join(accounts::table)
            .filter(plans::trainer_id.eq_any(trainer_ids))
            .order(plans::created_at.desc())
            .select((PlanEntity::as_select(), AccountEntity::as_select()))
            .load::<(PlanEntity, AccountEntity)>(&mut conn)?;

        Ok(results)
    }

    async fn list_by_trainer(
        &self,
        trainer_id: Uuid,
    ) -> Result<Vec<(PlanEntity, AccountEntity)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = plans::table
            .inner_join(accounts::table)
            .filter(plans::trainer_id.eq(trainer_id))
            .order(plans::created_at.desc())
            .select((PlanEntity::as_select(), AccountEntity::as_select()))
            .load::<(PlanEntity, AccountEntity)>(&mut conn)?;

        Ok(results)
    }

    async fn update(&self, plan_id: Uuid, edit_plan_entity: EditPlanEntity) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(plans::table)
            .filter(plans::id.eq(plan_id))
            .set(&edit_plan_entity)
            .execute(&mut conn)?;

        Ok(())
    }

    async fn delete(&self, plan_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        delete(plans::table)
            .filter(plans::id.eq(plan_id))
            .execute(&mut conn)?;

        Ok(())
    }
}
