// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitness assessment templates and recorded results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::types::Json;
use std::collections::HashSet;
use validator::{Validate, ValidationError};

use super::CatalogKind;

/// A named set of attributes measured during an assessment.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AssessmentTemplate {
    pub id: i64,
    pub name: String,
    pub attributes: Json<Vec<String>>,
    pub kind: CatalogKind,
    pub gym_id: Option<i64>,
}

/// Attribute lists must be non-empty with distinct, non-blank names.
fn validate_attributes(attributes: &[String]) -> Result<(), ValidationError> {
    if attributes.is_empty() {
        return Err(ValidationError::new("attributes_empty"));
    }
    let mut seen = HashSet::new();
    for attribute in attributes {
        let trimmed = attribute.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new("attribute_blank"));
        }
        if !seen.insert(trimmed) {
            return Err(ValidationError::new("attribute_duplicate"));
        }
    }
    Ok(())
}

fn validate_attribute_vec(attributes: &Vec<String>) -> Result<(), ValidationError> {
    validate_attributes(attributes)
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssessmentTemplate {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(custom(function = "validate_attribute_vec"))]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub kind: CatalogKind,
    pub gym_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateAssessmentTemplate {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_attribute_vec"))]
    pub attributes: Option<Vec<String>>,
    pub kind: Option<CatalogKind>,
    pub gym_id: Option<i64>,
}

impl UpdateAssessmentTemplate {
    pub fn apply(self, template: &mut AssessmentTemplate) {
        if let Some(name) = self.name {
            template.name = name;
        }
        if let Some(attributes) = self.attributes {
            template.attributes = Json(attributes);
        }
        if let Some(kind) = self.kind {
            template.kind = kind;
        }
        if self.gym_id.is_some() {
            template.gym_id = self.gym_id;
        }
    }
}

/// Values measured for one member against one template.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AssessmentResult {
    pub id: i64,
    pub member_id: i64,
    pub template_id: i64,
    pub taken_at: NaiveDate,
    #[sqlx(rename = "result_values")]
    pub values: Json<Map<String, Value>>,
}

impl AssessmentResult {
    /// Keys in `values` that the template does not define.
    pub fn unknown_keys<'a>(
        values: &'a Map<String, Value>,
        template: &AssessmentTemplate,
    ) -> Vec<&'a str> {
        values
            .keys()
            .filter(|key| !template.attributes.0.iter().any(|a| a == *key))
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssessmentResult {
    pub member_id: i64,
    pub template_id: i64,
    pub taken_at: NaiveDate,
    pub values: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateAssessmentResult {
    pub taken_at: Option<NaiveDate>,
    pub values: Option<Map<String, Value>>,
}
