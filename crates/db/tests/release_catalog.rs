//! Integration tests for the release catalog repository.

use assert_matches::assert_matches;
use sqlx::PgPool;

use notesync_db::models::release::CreateRelease;
use notesync_db::repositories::ReleaseRepo;

fn release(version: &str, is_latest: bool) -> CreateRelease {
    CreateRelease {
        version: version.to_string(),
        release_date: None,
        download_url: Some(format!("https://downloads.example.com/{version}")),
        release_notes: Some(format!("Release {version}")),
        whats_new: Some(vec!["Faster sync".to_string()]),
        is_latest,
        min_version: None,
        platform: None,
    }
}

#[sqlx::test]
async fn creating_latest_release_unmarks_previous_latest(pool: PgPool) {
    ReleaseRepo::create(&pool, &release("1.0.0", true))
        .await
        .unwrap();
    ReleaseRepo::create(&pool, &release("1.1.0", true))
        .await
        .unwrap();

    let latest = ReleaseRepo::find_latest(&pool).await.unwrap().unwrap();
    assert_eq!(latest.version, "1.1.0");

    // Only one row may carry the flag.
    let flagged: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM releases WHERE is_latest = true")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(flagged, 1);
}

#[sqlx::test]
async fn non_latest_release_leaves_flag_untouched(pool: PgPool) {
    ReleaseRepo::create(&pool, &release("1.0.0", true))
        .await
        .unwrap();
    ReleaseRepo::create(&pool, &release("0.9.9", false))
        .await
        .unwrap();

    let latest = ReleaseRepo::find_latest(&pool).await.unwrap().unwrap();
    assert_eq!(latest.version, "1.0.0");
}

#[sqlx::test]
async fn duplicate_version_is_rejected(pool: PgPool) {
    ReleaseRepo::create(&pool, &release("1.0.0", false))
        .await
        .unwrap();

    let err = ReleaseRepo::create(&pool, &release("1.0.0", false))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    );
}

#[sqlx::test]
async fn find_latest_returns_none_on_empty_catalog(pool: PgPool) {
    assert!(ReleaseRepo::find_latest(&pool).await.unwrap().is_none());
}

#[sqlx::test]
async fn list_orders_newest_first_and_honours_limit(pool: PgPool) {
    for (i, v) in ["1.0.0", "1.1.0", "1.2.0"].iter().enumerate() {
        let mut input = release(v, false);
        input.release_date =
            Some(chrono::Utc::now() - chrono::Duration::days(10 - i as i64));
        ReleaseRepo::create(&pool, &input).await.unwrap();
    }

    let all = ReleaseRepo::list(&pool, 10).await.unwrap();
    let versions: Vec<&str> = all.iter().map(|r| r.version.as_str()).collect();
    assert_eq!(versions, vec!["1.2.0", "1.1.0", "1.0.0"]);

    let limited = ReleaseRepo::list(&pool, 2).await.unwrap();
    assert_eq!(limited.len(), 2);
}
