// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Middleware modules (authentication, role gate, security headers).

pub mod auth;
pub mod security;

pub use auth::{require_auth, AuthUser};
