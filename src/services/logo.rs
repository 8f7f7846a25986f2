// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Gym logo storage on the local filesystem.
//!
//! Files are named after the gym and a digest of their content, so a new
//! upload never overwrites a different earlier one and re-uploading the
//! same bytes is idempotent.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};

const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// Hex characters of the SHA-256 digest kept in file names.
const DIGEST_PREFIX_LEN: usize = 16;

/// Subdirectory of the upload root holding logos.
const LOGO_DIR: &str = "logos";

/// Writes logos under `<root>/logos/` and hands back their public URL.
#[derive(Debug, Clone)]
pub struct LogoStore {
    root: PathBuf,
    max_bytes: usize,
}

impl LogoStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    /// Store `bytes` as the logo of `gym_id`; returns `/static/logos/<name>`.
    pub async fn store(&self, gym_id: i64, original_name: &str, bytes: &[u8]) -> Result<String> {
        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }
        if bytes.len() > self.max_bytes {
            return Err(AppError::BadRequest(format!(
                "Logo exceeds the {} byte limit",
                self.max_bytes
            )));
        }

        let file_name = logo_file_name(gym_id, original_name, bytes)?;
        let dir = self.root.join(LOGO_DIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create logo dir: {}", e)))?;
        tokio::fs::write(dir.join(&file_name), bytes)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to write logo: {}", e)))?;

        tracing::info!(gym_id, file = %file_name, size = bytes.len(), "Stored gym logo");
        Ok(format!("/static/{}/{}", LOGO_DIR, file_name))
    }
}

/// `gym_<id>_<digest>.<ext>` for an upload, rejecting unknown extensions.
pub fn logo_file_name(gym_id: i64, original_name: &str, bytes: &[u8]) -> Result<String> {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()))
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Unsupported logo type; allowed: {}",
                ALLOWED_EXTENSIONS.join(", ")
            ))
        })?;

    let digest = hex::encode(Sha256::digest(bytes));
    Ok(format!(
        "gym_{}_{}.{}",
        gym_id,
        &digest[..DIGEST_PREFIX_LEN],
        ext
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_is_content_addressed() {
        let a = logo_file_name(3, "Logo.PNG", b"first").unwrap();
        let b = logo_file_name(3, "logo.png", b"second").unwrap();
        assert!(a.starts_with("gym_3_") && a.ends_with(".png"));
        assert_ne!(a, b);
        assert_eq!(a, logo_file_name(3, "other.png", b"first").unwrap());
    }

    #[test]
    fn test_rejects_unknown_extension() {
        assert!(logo_file_name(1, "payload.exe", b"x").is_err());
        assert!(logo_file_name(1, "no_extension", b"x").is_err());
    }

    #[tokio::test]
    async fn test_store_enforces_size_limit() {
        let dir = std::env::temp_dir().join(format!("fitbro-logo-test-{}", std::process::id()));
        let store = LogoStore::new(&dir, 4);
        assert!(store.store(1, "a.png", b"too large").await.is_err());

        let url = store.store(1, "a.png", b"ok").await.unwrap();
        assert!(url.starts_with("/static/logos/gym_1_"));
        let name = url.rsplit('/').next().unwrap();
        assert!(dir.join("logos").join(name).is_file());
        std::fs::remove_dir_all(dir).ok();
    }
}
