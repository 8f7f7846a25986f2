// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Login and session routes.

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::middleware::auth::{create_jwt, AuthUser, TOKEN_COOKIE};
use crate::models::{Role, User};
use crate::services::password::{self, PasswordCheck};
use crate::AppState;

/// Routes reachable without a token.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Routes that need an authenticated caller.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/auth/me", get(get_me))
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 20))]
    pub mobile: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Successful login response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub role: Role,
    pub name: String,
}

/// Exchange mobile + password for a bearer token.
///
/// The token is returned in the body and also set as an HttpOnly cookie.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let user = state
        .db
        .get_user_by_mobile(req.mobile.trim())
        .await?
        .filter(|u| u.is_active)
        .ok_or(AppError::InvalidCredentials)?;

    match password::verify_password(&req.password, &user.password_hash) {
        PasswordCheck::Valid => {}
        PasswordCheck::ValidLegacy => {
            let hash = password::hash_password(&req.password)?;
            state.db.set_password_hash(user.id, &hash).await?;
            tracing::info!(user_id = user.id, "Upgraded legacy password to argon2");
        }
        PasswordCheck::Invalid => {
            tracing::info!(mobile = %user.mobile, "Failed login");
            return Err(AppError::InvalidCredentials);
        }
    }

    let token = create_jwt(
        &user.mobile,
        user.role,
        &user.name,
        &state.config.jwt_signing_key,
        state.config.token_ttl_hours,
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let cookie = Cookie::build((TOKEN_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(state.config.token_ttl_hours))
        .build();

    tracing::info!(user_id = user.id, role = %user.role, "Login successful");

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            access_token: token,
            token_type: "bearer".to_string(),
            role: user.role,
            name: user.name,
        }),
    ))
}

/// Clear the session cookie. Bearer tokens simply expire.
async fn logout(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(TOKEN_COOKIE).path("/"))
}

/// Current user's profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<User>> {
    let profile = state
        .db
        .get_user_by_mobile(&user.mobile)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.mobile)))?;
    Ok(Json(profile))
}
