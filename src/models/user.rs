// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User account model and role set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Account roles. The serialized strings are what tokens and the role
/// gate carry, and what the `users.role` column stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum Role {
    #[serde(rename = "FitBro Admin")]
    #[sqlx(rename = "FitBro Admin")]
    FitbroAdmin,
    #[serde(rename = "FitBro Officer")]
    #[sqlx(rename = "FitBro Officer")]
    FitbroOfficer,
    #[serde(rename = "Gym Owner")]
    #[sqlx(rename = "Gym Owner")]
    GymOwner,
    #[serde(rename = "Gym Instructor")]
    #[sqlx(rename = "Gym Instructor")]
    GymInstructor,
    #[serde(rename = "Gym Officer")]
    #[sqlx(rename = "Gym Officer")]
    GymOfficer,
    #[serde(rename = "Gym Member")]
    #[sqlx(rename = "Gym Member")]
    GymMember,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::FitbroAdmin,
        Role::FitbroOfficer,
        Role::GymOwner,
        Role::GymInstructor,
        Role::GymOfficer,
        Role::GymMember,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::FitbroAdmin => "FitBro Admin",
            Role::FitbroOfficer => "FitBro Officer",
            Role::GymOwner => "Gym Owner",
            Role::GymInstructor => "Gym Instructor",
            Role::GymOfficer => "Gym Officer",
            Role::GymMember => "Gym Member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("Unknown role: {}", s))
    }
}

/// User row. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Login identifier (unique)
    pub mobile: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub gym_id: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(length(min = 6, max = 20))]
    pub mobile: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
    pub role: Role,
    pub gym_id: Option<i64>,
}

/// Payload for `PATCH /users/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,
    #[validate(length(min = 6, max = 20))]
    pub mobile: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 128))]
    pub password: Option<String>,
    pub role: Option<Role>,
    pub gym_id: Option<i64>,
    pub is_active: Option<bool>,
}

impl UpdateUser {
    /// Apply every field except `password`, which needs hashing first.
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(mobile) = self.mobile {
            user.mobile = mobile;
        }
        if let Some(email) = self.email {
            user.email = Some(email);
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(gym_id) = self.gym_id {
            user.gym_id = Some(gym_id);
        }
        if let Some(active) = self.is_active {
            user.is_active = active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_string_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!("Gym Janitor".parse::<Role>().is_err());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: 1,
            name: "Asha".to_string(),
            mobile: "9000000001".to_string(),
            email: None,
            password_hash: "$argon2id$secret".to_string(),
            role: Role::GymOwner,
            gym_id: Some(3),
            is_active: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "Gym Owner");
    }
}
