//! Repository for the `releases` table.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::release::{CreateRelease, Release};

const COLUMNS: &str = "id, version, release_date, download_url, release_notes, whats_new, \
     is_latest, min_version, platform, created_at";

/// CRUD operations for the app release catalog.
pub struct ReleaseRepo;

impl ReleaseRepo {
    /// Publish a new release, returning the created row.
    ///
    /// When the new release is marked latest, the flag is first cleared on
    /// all other rows. The two statements are not wrapped in a transaction;
    /// the catalog is advisory data and the update checker tolerates a
    /// momentarily missing latest flag. A duplicate `version` violates
    /// `uq_releases_version`.
    pub async fn create(pool: &PgPool, input: &CreateRelease) -> Result<Release, sqlx::Error> {
        if input.is_latest {
            sqlx::query("UPDATE releases SET is_latest = false WHERE is_latest = true")
                .execute(pool)
                .await?;
        }

        let query = format!(
            "INSERT INTO releases \
                (version, release_date, download_url, release_notes, whats_new, \
                 is_latest, min_version, platform) \
             VALUES ($1, COALESCE($2, now()), $3, $4, $5, $6, $7, COALESCE($8, 'all')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Release>(&query)
            .bind(&input.version)
            .bind(input.release_date)
            .bind(&input.download_url)
            .bind(&input.release_notes)
            .bind(input.whats_new.as_ref().map(Json))
            .bind(input.is_latest)
            .bind(&input.min_version)
            .bind(&input.platform)
            .fetch_one(pool)
            .await
    }

    /// The current latest release, newest `release_date` first.
    pub async fn find_latest(pool: &PgPool) -> Result<Option<Release>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM releases \
             WHERE is_latest = true \
             ORDER BY release_date DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Release>(&query)
            .fetch_optional(pool)
            .await
    }

    /// List recent releases, newest first.
    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<Release>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM releases ORDER BY release_date DESC LIMIT $1");
        sqlx::query_as::<_, Release>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
