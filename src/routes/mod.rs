use axum::{Json, Router, extract::rejection::JsonRejection};

use crate::{error::AppError, state::SharedState};

/// User identity middleware.
pub mod auth;
/// Catalog cache CRUD.
pub mod catalog;
/// Authenticated collection routes.
pub mod collection;
/// RAWG proxy routes.
pub mod discovery;
/// Swagger UI.
pub mod docs;
/// Liveness probe.
pub mod health;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(catalog::router())
        .merge(collection::router(state.clone()))
        .merge(discovery::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}

/// Unwrap a JSON body, reporting malformed payloads as a JSON `400`.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
