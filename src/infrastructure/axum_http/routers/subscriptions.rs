use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    domain::{
        repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
        value_objects::subscriptions::SubscribeModel,
    },
    infrastructure::{
        axum_http::auth::AuthUser,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{plans::PlanPostgres, subscriptions::SubscriptionPostgres},
        },
    },
    usecases::subscriptions::SubscriptionUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let subscription_usecase = SubscriptionUseCase::new(
        Arc::new(subscription_repository),
        Arc::new(plan_repository),
    );

    Router::new()
        .route("/", post(subscribe))
        .route("/my-subscriptions", get(my_subscriptions))
        .route("/:subscription_id", get(get_subscription))
        .with_state(Arc::new(subscription_usecase))
}

pub async fn subscribe<S, P>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, P>>>,
    auth: AuthUser,
    Json(subscribe_model): Json<SubscribeModel>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match subscription_usecase
        .subscribe(auth.account_id, subscribe_model.plan_id)
        .await
    {
        Ok(subscription) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Subscription created successfully",
                "subscription": subscription,
            })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn my_subscriptions<S, P>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, P>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match subscription_usecase.list_mine(auth.account_id).await {
        Ok(subscriptions) => (
            StatusCode::OK,
            Json(json!({ "subscriptions": subscriptions })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_subscription<S, P>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<S, P>>>,
    auth: AuthUser,
    Path(subscription_id): Path<Uuid>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match subscription_usecase
        .get_one(subscription_id, auth.account_id)
        .await
    {
        Ok(subscription) => (
            StatusCode::OK,
            Json(json!({ "subscription": subscription })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
