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
    domain::repositories::{accounts::AccountRepository, follows::FollowRepository},
    infrastructure::{
        axum_http::auth::AuthUser,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{accounts::AccountPostgres, follows::FollowPostgres},
        },
    },
    usecases::follows::FollowUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let follow_repository = FollowPostgres::new(Arc::clone(&db_pool));
    let account_repository = AccountPostgres::new(Arc::clone(&db_pool));
    let follow_usecase = FollowUseCase::new(
        Arc::new(follow_repository),
        Arc::new(account_repository),
    );

    Router::new()
        .route("/following", get(list_following))
        .route("/followers/:trainer_id", get(list_followers))
        .route("/check/:trainer_id", get(check_following))
        .route("/:trainer_id", post(follow).delete(unfollow))
        .with_state(Arc::new(follow_usecase))
}

pub async fn follow<F, A>(
    State(follow_usecase): State<Arc<FollowUseCase<F, A>>>,
    auth: AuthUser,
    Path(trainer_id): Path<Uuid>,
) -> impl IntoResponse
where
    F: FollowRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    match follow_usecase.follow(auth.account_id, trainer_id).await {
        Ok(follow) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Successfully followed trainer",
                "follow": follow,
            })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn unfollow<F, A>(
    State(follow_usecase): State<Arc<FollowUseCase<F, A>>>,
    auth: AuthUser,
    Path(trainer_id): Path<Uuid>,
) -> impl IntoResponse
where
    F: FollowRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    match follow_usecase.unfollow(auth.account_id, trainer_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Successfully unfollowed trainer" })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_following<F, A>(
    State(follow_usecase): State<Arc<FollowUseCase<F, A>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    F: FollowRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    match follow_usecase.list_following(auth.account_id).await {
        Ok(trainers) => (StatusCode::OK, Json(json!({ "trainers": trainers }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_followers<F, A>(
    State(follow_usecase): State<Arc<FollowUseCase<F, A>>>,
    Path(trainer_id): Path<Uuid>,
) -> impl IntoResponse
where
    F: FollowRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    match follow_usecase.list_followers(trainer_id).await {
        Ok(followers) => (StatusCode::OK, Json(json!({ "followers": followers }))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn check_following<F, A>(
    State(follow_usecase): State<Arc<FollowUseCase<F, A>>>,
    auth: AuthUser,
    Path(trainer_id): Path<Uuid>,
) -> impl IntoResponse
where
    F: FollowRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    match follow_usecase.is_following(auth.account_id, trainer_id).await {
        Ok(is_following) => {
            (StatusCode::OK, Json(json!({ "isFollowing": is_following }))).into_response()
        }
        Err(err) => err.into_response(),
    }
}
