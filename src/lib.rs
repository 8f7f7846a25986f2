// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FitBro: multi-tenant gym management backend.
//!
//! This crate provides the REST API used by gym staff to manage gyms,
//! membership plans, members, training cycles, the exercise catalog,
//! assessments, walk-in visitors and announcements.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::LogoStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub logos: LogoStore,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Self {
        let logos = LogoStore::new(&config.upload_dir, config.max_logo_bytes);
        Self { config, db, logos }
    }
}
