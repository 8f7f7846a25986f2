// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

use super::{expect_deleted, Database};
use crate::error::{AppError, Result};
use crate::models::catalog::CreateEquipment;
use crate::models::Equipment;

const EQUIPMENT_COLUMNS: &str =
    "id, gym_id, name, category, manufacturer, purchase_date, warranty_years, status";

impl Database {
    // ─── Equipment Operations ────────────────────────────────────

    pub async fn get_equipment(&self, id: i64) -> Result<Option<Equipment>> {
        let sql = format!("SELECT {} FROM equipment WHERE id = ?", EQUIPMENT_COLUMNS);
        Ok(sqlx::query_as::<_, Equipment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn list_equipment(&self, gym_id: Option<i64>) -> Result<Vec<Equipment>> {
        let sql = format!(
            "SELECT {} FROM equipment WHERE (?1 IS NULL OR gym_id = ?1) ORDER BY id",
            EQUIPMENT_COLUMNS
        );
        Ok(sqlx::query_as::<_, Equipment>(&sql)
            .bind(gym_id)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn insert_equipment(&self, payload: &CreateEquipment) -> Result<Equipment> {
        let id = sqlx::query(
            r#"INSERT INTO equipment (gym_id, name, category, manufacturer, purchase_date, warranty_years, status)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(payload.gym_id)
        .bind(&payload.name)
        .bind(&payload.category)
        .bind(&payload.manufacturer)
        .bind(payload.purchase_date)
        .bind(payload.warranty_years)
        .bind(&payload.status)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.fetch_equipment(id).await
    }

    pub async fn update_equipment(&self, equipment: &Equipment) -> Result<Equipment> {
        sqlx::query(
            r#"UPDATE equipment
               SET name = ?, category = ?, manufacturer = ?, purchase_date = ?, warranty_years = ?, status = ?
               WHERE id = ?"#,
        )
        .bind(&equipment.name)
        .bind(&equipment.category)
        .bind(&equipment.manufacturer)
        .bind(equipment.purchase_date)
        .bind(equipment.warranty_years)
        .bind(&equipment.status)
        .bind(equipment.id)
        .execute(&self.pool)
        .await?;

        self.fetch_equipment(equipment.id).await
    }

    pub async fn delete_equipment(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_deleted(result.rows_affected(), "Equipment")
    }

    async fn fetch_equipment(&self, id: i64) -> Result<Equipment> {
        self.get_equipment(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Equipment not found".to_string()))
    }
}
