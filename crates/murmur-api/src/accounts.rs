use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};

use murmur_types::api::Credentials;
use murmur_types::models::Account;

use crate::error::reject_body;
use crate::{AppState, blocking};

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<Account>, StatusCode> {
    let Json(req) = body.map_err(|e| reject_body("register", e, StatusCode::BAD_REQUEST))?;

    let account = blocking(&state, move |svc| svc.register(&req))
        .await
        .map_err(|e| e.reject("register", StatusCode::BAD_REQUEST))?;

    Ok(Json(account))
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<Account>, StatusCode> {
    let Json(req) = body.map_err(|e| reject_body("login", e, StatusCode::UNAUTHORIZED))?;

    let account = blocking(&state, move |svc| svc.login(&req))
        .await
        .map_err(|e| e.reject("login", StatusCode::UNAUTHORIZED))?;

    Ok(Json(account))
}
