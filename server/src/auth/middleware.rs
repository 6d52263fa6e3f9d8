//! Authentication extractor.
//!
//! The session is the demo user persisted in the shared store, so the
//! extractor reads it from there rather than from a request header.

use axum::{extract::FromRequestParts, http::request::Parts};
use transmarin_engine::{AuthUser, Module, Session};

use crate::error::AppError;
use crate::AppState;

/// The logged-in user. Rejects with 401 when nobody is logged in.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthUser);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let mut store = state.store.lock().await;
        let user = Session::new(&mut *store).current_user();
        user.map(CurrentUser).ok_or(AppError::Unauthorized)
    }
}

/// Reject with 403 unless `user`'s role may open `module`.
pub fn require_module(user: &AuthUser, module: Module) -> Result<(), AppError> {
    if user.has_access(module) {
        Ok(())
    } else {
        tracing::debug!(email = %user.email, %module, "module access denied");
        Err(AppError::Forbidden(format!(
            "role {:?} cannot access {}",
            user.role, module
        )))
    }
}
