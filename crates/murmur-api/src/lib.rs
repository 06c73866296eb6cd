pub mod accounts;
pub mod error;
pub mod messages;
pub mod service;
pub mod validation;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tracing::error;

use crate::error::{ServiceError, ServiceResult};
use crate::service::SocialService;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub service: SocialService,
}

impl AppStateInner {
    pub fn new(service: SocialService) -> AppState {
        Arc::new(Self { service })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route(
            "/messages",
            get(messages::get_all_messages).post(messages::create_message),
        )
        .route(
            "/messages/{message_id}",
            get(messages::get_message)
                .delete(messages::delete_message)
                .patch(messages::update_message),
        )
        .route(
            "/accounts/{account_id}/messages",
            get(messages::get_messages_by_account),
        )
        .with_state(state)
}

/// Run a service call off the async runtime. A panicked or cancelled task is
/// reported as a store failure.
pub(crate) async fn blocking<F, T>(state: &AppState, f: F) -> ServiceResult<T>
where
    F: FnOnce(&SocialService) -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.service))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ServiceError::Store(e.into())
        })?
}
