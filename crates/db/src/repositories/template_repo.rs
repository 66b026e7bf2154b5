//! Repository and resolver for the `templates` table.
//!
//! Storage is plain CRUD keyed by the `(template_id, client_id)` pair.
//! Resolution layers client-specific overrides on top of the `'default'`
//! layer: the two layers are read independently (no snapshot across them)
//! and merged in process by [`merge_layers`].

use std::collections::HashMap;

use sqlx::types::Json;
use sqlx::PgPool;

use notesync_core::types::DEFAULT_CLIENT_ID;

use crate::models::template::{CreateTemplate, ReplaceTemplate, Template};

const COLUMNS: &str = "id, template_id, client_id, name, description, sections, \
     global_instruction, clinical_safety_rules, version, is_active, created_at, updated_at";

/// CRUD and resolution operations for templates.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a new template, returning the created row.
    ///
    /// A duplicate `(template_id, client_id)` pair violates
    /// `uq_templates_template_id_client_id` and surfaces as a unique
    /// violation for the caller to classify.
    pub async fn insert(pool: &PgPool, input: &CreateTemplate) -> Result<Template, sqlx::Error> {
        let query = format!(
            "INSERT INTO templates \
                (template_id, client_id, name, description, sections, \
                 global_instruction, clinical_safety_rules, version, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(&input.template_id)
            .bind(&input.client_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(Json(&input.sections))
            .bind(&input.global_instruction)
            .bind(input.clinical_safety_rules.as_ref().map(Json))
            .bind(input.version)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Full-document replace keyed by `(template_id, client_id)`.
    ///
    /// Overwrites every field except `created_at` and stamps `updated_at`.
    /// Returns `None` when no row matches the identity pair; this is not
    /// an upsert.
    pub async fn replace(
        pool: &PgPool,
        template_id: &str,
        client_id: &str,
        input: &ReplaceTemplate,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!(
            "UPDATE templates SET \
                name = $3, \
                description = $4, \
                sections = $5, \
                global_instruction = $6, \
                clinical_safety_rules = $7, \
                version = $8, \
                is_active = $9, \
                updated_at = now() \
             WHERE template_id = $1 AND client_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(template_id)
            .bind(client_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(Json(&input.sections))
            .bind(&input.global_instruction)
            .bind(input.clinical_safety_rules.as_ref().map(Json))
            .bind(input.version)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Point lookup by identity pair, active or not.
    pub async fn find_one(
        pool: &PgPool,
        template_id: &str,
        client_id: &str,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM templates WHERE template_id = $1 AND client_id = $2");
        sqlx::query_as::<_, Template>(&query)
            .bind(template_id)
            .bind(client_id)
            .fetch_optional(pool)
            .await
    }

    /// All rows for a client layer, active or not.
    pub async fn find_all_for_client(
        pool: &PgPool,
        client_id: &str,
    ) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE client_id = $1");
        sqlx::query_as::<_, Template>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Active point lookup used by resolution.
    async fn find_one_active(
        pool: &PgPool,
        template_id: &str,
        client_id: &str,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM templates \
             WHERE template_id = $1 AND client_id = $2 AND is_active = true"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(template_id)
            .bind(client_id)
            .fetch_optional(pool)
            .await
    }

    /// All active rows for a client layer, used by resolution.
    async fn find_all_active_for_client(
        pool: &PgPool,
        client_id: &str,
    ) -> Result<Vec<Template>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM templates WHERE client_id = $1 AND is_active = true");
        sqlx::query_as::<_, Template>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Resolve the effective template set visible to `client_id`.
    ///
    /// Reads the active default layer, then (for non-default clients) the
    /// active override layer, and merges override-wins by `template_id`.
    /// The two reads are independent queries; a template created or
    /// deactivated between them may or may not be reflected. A failure on
    /// either read fails the whole resolution -- returning defaults-only
    /// would misrepresent the effective state.
    pub async fn resolve_for_client(
        pool: &PgPool,
        client_id: &str,
    ) -> Result<Vec<Template>, sqlx::Error> {
        let defaults = Self::find_all_active_for_client(pool, DEFAULT_CLIENT_ID).await?;
        let overrides = if client_id != DEFAULT_CLIENT_ID {
            Self::find_all_active_for_client(pool, client_id).await?
        } else {
            Vec::new()
        };
        Ok(merge_layers(defaults, overrides))
    }

    /// Resolve a single template for `client_id`.
    ///
    /// An active client override takes absolute precedence; otherwise the
    /// active default is returned. An inactive override is treated as
    /// absent, so resolution falls through to the default layer.
    pub async fn resolve_one(
        pool: &PgPool,
        template_id: &str,
        client_id: &str,
    ) -> Result<Option<Template>, sqlx::Error> {
        if client_id != DEFAULT_CLIENT_ID {
            if let Some(t) = Self::find_one_active(pool, template_id, client_id).await? {
                return Ok(Some(t));
            }
        }
        Self::find_one_active(pool, template_id, DEFAULT_CLIENT_ID).await
    }
}

/// Merge the override layer onto the default layer.
///
/// Overrides replace defaults sharing the same `template_id`; each
/// `template_id` maps to at most one override per client, so the
/// overwrite is order-independent. The result is sorted by `name`
/// ascending -- the only place global ordering is imposed.
pub fn merge_layers(defaults: Vec<Template>, overrides: Vec<Template>) -> Vec<Template> {
    let mut by_id: HashMap<String, Template> = defaults
        .into_iter()
        .map(|t| (t.template_id.clone(), t))
        .collect();
    for t in overrides {
        by_id.insert(t.template_id.clone(), t);
    }
    let mut merged: Vec<Template> = by_id.into_values().collect();
    merged.sort_by(|a, b| a.name.cmp(&b.name));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;

    fn template(template_id: &str, client_id: &str, name: &str) -> Template {
        let now = chrono::Utc::now();
        Template {
            id: 0,
            template_id: template_id.to_string(),
            client_id: client_id.to_string(),
            name: name.to_string(),
            description: String::new(),
            sections: Json(Vec::new()),
            global_instruction: None,
            clinical_safety_rules: None,
            version: 1,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn override_replaces_default_with_same_template_id() {
        let defaults = vec![template("soap", "default", "SOAP")];
        let overrides = vec![template("soap", "clinic-7", "SOAP (clinic)")];

        let merged = merge_layers(defaults, overrides);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].client_id, "clinic-7");
        assert_eq!(merged[0].name, "SOAP (clinic)");
    }

    #[test]
    fn override_without_default_counterpart_is_included() {
        let defaults = vec![template("soap", "default", "SOAP")];
        let overrides = vec![template("intake", "clinic-7", "Intake")];

        let merged = merge_layers(defaults, overrides);

        assert_eq!(merged.len(), 2);
        assert!(merged.iter().any(|t| t.template_id == "intake"));
    }

    #[test]
    fn result_is_sorted_by_name_ascending() {
        let defaults = vec![
            template("c", "default", "Zulu"),
            template("a", "default", "Alpha"),
            template("b", "default", "Mike"),
        ];

        let merged = merge_layers(defaults, Vec::new());

        let names: Vec<&str> = merged.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Mike", "Zulu"]);
    }

    #[test]
    fn at_most_one_entry_per_template_id() {
        let defaults = vec![
            template("soap", "default", "SOAP"),
            template("intake", "default", "Intake"),
        ];
        let overrides = vec![
            template("soap", "clinic-7", "SOAP v2"),
            template("intake", "clinic-7", "Intake v2"),
        ];

        let merged = merge_layers(defaults, overrides);

        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|t| t.client_id == "clinic-7"));
    }

    #[test]
    fn empty_layers_merge_to_empty() {
        assert!(merge_layers(Vec::new(), Vec::new()).is_empty());
    }
}
