use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use murmur_types::api::{CreateMessageRequest, UpdateMessageRequest};
use murmur_types::models::Message;

use crate::error::{ServiceResult, reject_body};
use crate::{AppState, blocking};

// Absence is reported as 200 with an empty body, never 404.

pub async fn create_message(
    State(state): State<AppState>,
    body: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<Json<Message>, StatusCode> {
    let Json(req) = body.map_err(|e| reject_body("create_message", e, StatusCode::BAD_REQUEST))?;

    let message = blocking(&state, move |svc| svc.create_message(&req))
        .await
        .map_err(|e| e.reject("create_message", StatusCode::BAD_REQUEST))?;

    Ok(Json(message))
}

pub async fn get_all_messages(State(state): State<AppState>) -> Json<Vec<Message>> {
    let result = blocking(&state, |svc| svc.all_messages()).await;
    Json(list_or_empty("get_all_messages", result))
}

pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Response {
    let result = blocking(&state, move |svc| svc.message(message_id)).await;
    found_or_empty("get_message", result)
}

pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Response {
    let result = blocking(&state, move |svc| svc.delete_message(message_id)).await;
    found_or_empty("delete_message", result)
}

/// Validation failures, store failures and unknown ids all answer 400.
pub async fn update_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    body: Result<Json<UpdateMessageRequest>, JsonRejection>,
) -> Result<Json<Message>, StatusCode> {
    let Json(req) = body.map_err(|e| reject_body("update_message", e, StatusCode::BAD_REQUEST))?;

    blocking(&state, move |svc| {
        svc.update_message(message_id, &req.message_text)
    })
    .await
    .map_err(|e| e.reject("update_message", StatusCode::BAD_REQUEST))?
    .map(Json)
    .ok_or(StatusCode::BAD_REQUEST)
}

pub async fn get_messages_by_account(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Json<Vec<Message>> {
    let result = blocking(&state, move |svc| svc.messages_by_account(account_id)).await;
    Json(list_or_empty("get_messages_by_account", result))
}

fn found_or_empty(op: &str, result: ServiceResult<Option<Message>>) -> Response {
    match result {
        Ok(Some(message)) => Json(message).into_response(),
        Ok(None) => StatusCode::OK.into_response(),
        Err(e) => e.reject(op, StatusCode::OK).into_response(),
    }
}

fn list_or_empty(op: &str, result: ServiceResult<Vec<Message>>) -> Vec<Message> {
    result.unwrap_or_else(|e| {
        e.reject(op, StatusCode::OK);
        Vec::new()
    })
}
