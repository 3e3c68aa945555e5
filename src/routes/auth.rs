//! Identity of the caller, as forwarded by the authentication proxy in front of the backend.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::SharedState};

/// Authenticated user attached to the request by [`require_user`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// Opaque id issued by the identity provider.
    pub id: String,
}

/// Read the user id from `header`, ignoring blank values.
fn user_from_headers(headers: &HeaderMap, header: &str) -> Option<CurrentUser> {
    headers
        .get(header)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| CurrentUser { id: id.to_owned() })
}

/// Reject requests without an authenticated user and expose the user to handlers.
pub async fn require_user(
    State(state): State<SharedState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = user_from_headers(req.headers(), state.user_header())
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".into()))?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
