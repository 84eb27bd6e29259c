use std::sync::Arc;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};

use crate::{
    domain::repositories::{
        follows::FollowRepository, plans::PlanRepository,
        subscriptions::SubscriptionRepository,
    },
    infrastructure::{
        axum_http::auth::AuthUser,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{
                follows::FollowPostgres, plans::PlanPostgres,
                subscriptions::SubscriptionPostgres,
            },
        },
    },
    usecases::feed::FeedUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let follow_repository = FollowPostgres::new(Arc::clone(&db_pool));
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let feed_usecase = FeedUseCase::new(
        Arc::new(follow_repository),
        Arc::new(plan_repository),
        Arc::new(subscription_repository),
    );

    Router::new()
        .route("/personalized", get(personalized_feed))
        .with_state(Arc::new(feed_usecase))
}

pub async fn personalized_feed<F, P, S>(
    State(feed_usecase): State<Arc<FeedUseCase<F, P, S>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    F: FollowRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match feed_usecase.personalized_feed(auth.account_id).await {
        Ok(feed) => (StatusCode::OK, Json(feed)).into_response(),
        Err(err) => err.into_response(),
    }
}
