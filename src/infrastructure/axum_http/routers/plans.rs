use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    domain::{
        repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
        value_objects::plans::{CreatePlanModel, UpdatePlanModel},
    },
    infrastructure::{
        axum_http::auth::AuthUser,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{plans::PlanPostgres, subscriptions::SubscriptionPostgres},
        },
    },
    usecases::plans::PlanUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let plan_usecase = PlanUseCase::new(
        Arc::new(plan_repository),
        Arc::new(subscription_repository),
    );

    Router::new()
        .route("/", get(list_plans).post(create_plan))
        .route("/trainer/my-plans", get(my_plans))
        .route(
            "/:plan_id",
            get(get_plan).put(update_plan).delete(delete_plan),
        )
        .with_state(Arc::new(plan_usecase))
}

pub async fn list_plans<P, S>(
    State(plan_usecase): State<Arc<PlanUseCase<P, S>>>,
    viewer: Option<AuthUser>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match plan_usecase
        .list_plans(viewer.map(|auth| auth.account_id))
        .await
    {
        Ok(plans) => (StatusCode::OK, Json(json!({ "plans": plans }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_plan<P, S>(
    State(plan_usecase): State<Arc<PlanUseCase<P, S>>>,
    viewer: Option<AuthUser>,
    Path(plan_id): Path<Uuid>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match plan_usecase
        .get_plan(plan_id, viewer.map(|auth| auth.account_id))
        .await
    {
        Ok(plan) => (StatusCode::OK, Json(json!({ "plan": plan }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create_plan<P, S>(
    State(plan_usecase): State<Arc<PlanUseCase<P, S>>>,
    auth: AuthUser,
    Json(create_plan_model): Json<CreatePlanModel>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match plan_usecase
        .create_plan(auth.viewer(), create_plan_model)
        .await
    {
        Ok(plan) => (StatusCode::CREATED, Json(json!({ "plan": plan }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_plan<P, S>(
    State(plan_usecase): State<Arc<PlanUseCase<P, S>>>,
    auth: AuthUser,
    Path(plan_id): Path<Uuid>,
    Json(update_plan_model): Json<UpdatePlanModel>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match plan_usecase
        .update_plan(auth.viewer(), plan_id, update_plan_model)
        .await
    {
        Ok(plan) => (StatusCode::OK, Json(json!({ "plan": plan }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_plan<P, S>(
    State(plan_usecase): State<Arc<PlanUseCase<P, S>>>,
    auth: AuthUser,
    Path(plan_id): Path<Uuid>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match plan_usecase.delete_plan(auth.viewer(), plan_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Plan deleted successfully" })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn my_plans<P, S>(
    State(plan_usecase): State<Arc<PlanUseCase<P, S>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match plan_usecase.my_plans(auth.viewer()).await {
        Ok(plans) => (StatusCode::OK, Json(json!({ "plans": plans }))).into_response(),
        Err(err) => err.into_response(),
    }
}
