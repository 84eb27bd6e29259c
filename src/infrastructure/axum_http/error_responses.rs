use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::{
    config::{config_loader, stage::Stage},
    usecases::{
        feed::FeedError, follows::FollowError, plans::PlanError,
        subscriptions::SubscriptionError,
    },
};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

fn respond(status: StatusCode, message: String) -> Response {
    let body = Json(ErrorResponse {
        code: status.as_u16(),
        message,
    });

    (status, body).into_response()
}

// Internal failure detail stays in the logs outside the Local stage.
fn internal_message(err: &anyhow::Error) -> String {
    match config_loader::get_stage() {
        Stage::Production => "Internal server error".to_string(),
        Stage::Local => err.to_string(),
    }
}

impl IntoResponse for PlanError {
    fn into_response(self) -> Response {
        match self {
            PlanError::Internal(err) => {
                error!(db_error = ?err, "plans: request failed");
                respond(StatusCode::INTERNAL_SERVER_ERROR, internal_message(&err))
            }
            other => respond(other.status_code(), other.to_string()),
        }
    }
}

impl IntoResponse for FollowError {
    fn into_response(self) -> Response {
        match self {
            FollowError::Internal(err) => {
                error!(db_error = ?err, "follows: request failed");
                respond(StatusCode::INTERNAL_SERVER_ERROR, internal_message(&err))
            }
            other => respond(other.status_code(), other.to_string()),
        }
    }
}

impl IntoResponse for SubscriptionError {
    fn into_response(self) -> Response {
        match self {
            SubscriptionError::Internal(err) => {
                error!(db_error = ?err, "subscriptions: request failed");
                respond(StatusCode::INTERNAL_SERVER_ERROR, internal_message(&err))
            }
            other => respond(other.status_code(), other.to_string()),
        }
    }
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        match self {
            FeedError::Internal(err) => {
                error!(db_error = ?err, "feed: request failed");
                respond(StatusCode::INTERNAL_SERVER_ERROR, internal_message(&err))
            }
        }
    }
}
