// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Catalog tree rules.
//!
//! Master rows are tenant-independent; override rows belong to exactly
//! one gym. A row's parent must exist in the same table and may not be
//! the row itself or one of its descendants.

use crate::db::{CatalogTable, Database, MAX_TREE_DEPTH};
use crate::error::{AppError, Result};
use crate::models::CatalogKind;

/// Check the kind/gym pairing.
pub fn check_placement(kind: CatalogKind, gym_id: Option<i64>) -> Result<()> {
    match (kind, gym_id) {
        (CatalogKind::Master, Some(_)) => Err(AppError::Validation(
            "master entries cannot belong to a gym".to_string(),
        )),
        (CatalogKind::Override, None) => Err(AppError::Validation(
            "override entries require a gym_id".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Given the lineage of the proposed parent (parent first, root last),
/// reject a parent link that would close a loop through `row_id` or push
/// the row deeper than `MAX_TREE_DEPTH`.
pub fn check_lineage(row_id: Option<i64>, parent_id: i64, lineage: &[i64]) -> Result<()> {
    if lineage.is_empty() {
        return Err(AppError::NotFound(format!("Parent {} not found", parent_id)));
    }
    if let Some(id) = row_id {
        if lineage.contains(&id) {
            return Err(AppError::BadRequest(
                "An entry cannot be its own ancestor".to_string(),
            ));
        }
    }
    // A truncated lineage cannot prove the link is loop-free.
    if lineage.len() >= MAX_TREE_DEPTH {
        return Err(AppError::BadRequest("Catalog tree too deep".to_string()));
    }
    Ok(())
}

/// Validate kind, gym and parent for a row about to be written.
/// `row_id` is `None` for inserts.
pub async fn validate_node(
    db: &Database,
    table: CatalogTable,
    row_id: Option<i64>,
    kind: CatalogKind,
    gym_id: Option<i64>,
    parent_id: Option<i64>,
) -> Result<()> {
    check_placement(kind, gym_id)?;

    if let Some(gym_id) = gym_id {
        db.require("gyms", gym_id, "Gym").await?;
    }

    if let Some(parent_id) = parent_id {
        let lineage = db.catalog_lineage(table, parent_id).await?;
        check_lineage(row_id, parent_id, &lineage).map_err(|err| match err {
            AppError::NotFound(_) => {
                AppError::NotFound(format!("Parent {} not found", table.label()))
            }
            other => other,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_placement() {
        assert!(check_placement(CatalogKind::Master, None).is_ok());
        assert!(check_placement(CatalogKind::Override, Some(2)).is_ok());
        assert!(check_placement(CatalogKind::Master, Some(2)).is_err());
        assert!(check_placement(CatalogKind::Override, None).is_err());
    }

    #[test]
    fn test_check_lineage() {
        // 5 -> 3 -> 1 (root)
        let lineage = [5, 3, 1];
        assert!(check_lineage(None, 5, &lineage).is_ok());
        assert!(check_lineage(Some(9), 5, &lineage).is_ok());
        assert!(check_lineage(Some(5), 5, &lineage).is_err());
        assert!(check_lineage(Some(1), 5, &lineage).is_err());
        assert!(matches!(
            check_lineage(Some(1), 42, &[]),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_check_lineage_depth_cap() {
        let at_cap: Vec<i64> = (1..=MAX_TREE_DEPTH as i64).rev().collect();
        assert!(check_lineage(None, at_cap[0], &at_cap[1..]).is_ok());
        assert!(matches!(
            check_lineage(None, at_cap[0], &at_cap),
            Err(AppError::BadRequest(_))
        ));
        // A loop hidden beyond the walk is still refused.
        assert!(check_lineage(Some(9_999), at_cap[0], &at_cap).is_err());
    }
}
