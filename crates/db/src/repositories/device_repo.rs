//! Repository for the `devices` table.

use sqlx::PgPool;

use crate::models::device::{Device, RegisterDevice};

const COLUMNS: &str = "id, user_id, platform, architecture, app_version, os_version, \
     sessions_count, advanced_logs, advanced_logs_toggled_at, first_seen, last_seen";

/// CRUD operations for registered device installations.
pub struct DeviceRepo;

impl DeviceRepo {
    /// Register a device, upserting on `user_id`.
    ///
    /// First registration creates the row with `sessions_count = 1`;
    /// repeat registrations refresh the environment fields, bump
    /// `last_seen`, and increment the session counter. `advanced_logs`
    /// and `first_seen` are only written on insert.
    pub async fn register(pool: &PgPool, input: &RegisterDevice) -> Result<Device, sqlx::Error> {
        let query = format!(
            "INSERT INTO devices \
                (user_id, platform, architecture, app_version, os_version, sessions_count) \
             VALUES ($1, COALESCE($2, 'unknown'), COALESCE($3, 'unknown'), \
                     COALESCE($4, 'unknown'), COALESCE($5, 'unknown'), 1) \
             ON CONFLICT (user_id) DO UPDATE SET \
                platform = COALESCE($2, devices.platform), \
                architecture = COALESCE($3, devices.architecture), \
                app_version = COALESCE($4, devices.app_version), \
                os_version = COALESCE($5, devices.os_version), \
                sessions_count = devices.sessions_count + 1, \
                last_seen = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(&input.user_id)
            .bind(&input.platform)
            .bind(&input.architecture)
            .bind(&input.app_version)
            .bind(&input.os_version)
            .fetch_one(pool)
            .await
    }

    /// Look up a device by `user_id` (used by the client flag poll).
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Option<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices WHERE user_id = $1");
        sqlx::query_as::<_, Device>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List devices, most recently seen first.
    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices ORDER BY last_seen DESC LIMIT $1");
        sqlx::query_as::<_, Device>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Flip the advanced-logs flag for a device, stamping the toggle time.
    ///
    /// Returns `None` when no device matches `user_id`.
    pub async fn set_advanced_logs(
        pool: &PgPool,
        user_id: &str,
        enabled: bool,
    ) -> Result<Option<Device>, sqlx::Error> {
        let query = format!(
            "UPDATE devices SET \
                advanced_logs = $2, \
                advanced_logs_toggled_at = now() \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(user_id)
            .bind(enabled)
            .fetch_optional(pool)
            .await
    }
}
