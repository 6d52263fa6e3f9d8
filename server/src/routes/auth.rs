//! Login routes for the simulated demo accounts.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use transmarin_engine::{AuthUser, Session, UserRole};

use crate::auth::CurrentUser;
use crate::error::{AppError, Result};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginAsRequest {
    pub role: UserRole,
}

/// Create auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/login-as", post(login_as))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

/// POST /auth/login - Log in with a demo email; any password.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthUser>> {
    let user = state
        .write_store(move |store| {
            Ok(Session::new(store).login(&request.email, &request.password)?)
        })
        .await?;
    user.map(Json).ok_or(AppError::Unauthorized)
}

/// POST /auth/login-as - Log in as the demo user of a role.
async fn login_as(
    State(state): State<AppState>,
    Json(request): Json<LoginAsRequest>,
) -> Result<Json<AuthUser>> {
    let role = request.role;
    let user = state
        .write_store(move |store| Ok(Session::new(store).login_as(role)?))
        .await?;
    Ok(Json(user))
}

/// POST /auth/logout - Clear the session.
async fn logout(State(state): State<AppState>) -> Result<StatusCode> {
    state
        .write_store(|store| Ok(Session::new(store).logout()?))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/me - The logged-in user.
async fn me(CurrentUser(user): CurrentUser) -> Json<AuthUser> {
    Json(user)
}
