// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! JWT authentication middleware and role gate.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::Role;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cookie carrying the session token for browser clients.
pub const TOKEN_COOKIE: &str = "fitbro_token";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (login mobile number)
    pub sub: String,
    pub role: Role,
    /// Display name
    pub name: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub mobile: String,
    pub role: Role,
    pub name: String,
}

impl AuthUser {
    /// Role gate: allow only the listed roles, unless enforcement is
    /// switched off in configuration.
    pub fn require_roles(&self, config: &Config, allowed: &[Role]) -> Result<()> {
        if !config.enforce_roles || allowed.contains(&self.role) {
            return Ok(());
        }
        tracing::warn!(mobile = %self.mobile, role = %self.role, "Role not permitted");
        Err(AppError::Forbidden)
    }
}

/// Middleware that requires valid JWT authentication.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(TOKEN_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) => token.to_string(),
            None => return Err(AppError::Unauthorized),
        }
    };

    let key = DecodingKey::from_secret(&state.config.jwt_signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let claims = decode::<Claims>(&token, &key, &validation)
        .map_err(|_| AppError::InvalidToken)?
        .claims;

    request.extensions_mut().insert(AuthUser {
        mobile: claims.sub,
        role: claims.role,
        name: claims.name,
    });

    Ok(next.run(request).await)
}

/// Create a JWT for a user session.
pub fn create_jwt(
    mobile: &str,
    role: Role,
    name: &str,
    signing_key: &[u8],
    ttl_hours: i64,
) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;
    let ttl_secs = usize::try_from(ttl_hours.max(1))? * 60 * 60;

    let claims = Claims {
        sub: mobile.to_string(),
        role,
        name: name.to_string(),
        iat: now,
        exp: now + ttl_secs,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            mobile: "9000000001".to_string(),
            role,
            name: "Test".to_string(),
        }
    }

    #[test]
    fn test_role_gate() {
        let config = Config::default();
        let owner = user(Role::GymOwner);
        assert!(owner
            .require_roles(&config, &[Role::FitbroAdmin, Role::GymOwner])
            .is_ok());
        assert!(matches!(
            owner.require_roles(&config, &[Role::FitbroAdmin]),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn test_role_gate_disabled() {
        let config = Config {
            enforce_roles: false,
            ..Config::default()
        };
        assert!(user(Role::GymMember)
            .require_roles(&config, &[Role::FitbroAdmin])
            .is_ok());
    }

    #[test]
    fn test_jwt_round_trip() {
        let key = b"unit-test-signing-key";
        let token = create_jwt("9000000001", Role::GymOfficer, "Priya", key, 12).unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(key),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();
        assert_eq!(data.claims.sub, "9000000001");
        assert_eq!(data.claims.role, Role::GymOfficer);
        assert_eq!(data.claims.exp - data.claims.iat, 12 * 3600);
    }
}
