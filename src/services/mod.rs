// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Services module - business rules shared by the route handlers.

pub mod catalog;
pub mod cycle;
pub mod logo;
pub mod membership;
pub mod password;
pub mod visitor;

pub use logo::LogoStore;
pub use password::PasswordCheck;
