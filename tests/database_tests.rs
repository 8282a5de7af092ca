#![allow(clippy::unwrap_used)]

use mm_reminder_bot::database::connection::DatabaseManager;
use mm_reminder_bot::database::models::{Holiday, UserPref};
use tempfile::{tempdir, TempDir};

async fn setup_test_db() -> (DatabaseManager, TempDir) {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.to_string_lossy());

    let db = DatabaseManager::new(&db_url).await.unwrap();
    db.run_migrations().await.unwrap();
    (db, dir)
}

#[tokio::test]
async fn test_timezone_upsert_and_lookup() {
    let (db, _dir) = setup_test_db().await;

    assert_eq!(UserPref::timezone_of(&db.pool, 42).await.unwrap(), None);

    UserPref::upsert_timezone(&db.pool, 42, "Asia/Yangon").await.unwrap();
    assert_eq!(
        UserPref::timezone_of(&db.pool, 42).await.unwrap(),
        Some("Asia/Yangon".to_string())
    );

    // Upsert replaces rather than duplicates.
    UserPref::upsert_timezone(&db.pool, 42, "Europe/Berlin").await.unwrap();
    assert_eq!(
        UserPref::timezone_of(&db.pool, 42).await.unwrap(),
        Some("Europe/Berlin".to_string())
    );
    assert_eq!(UserPref::list_all(&db.pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_find_by_chat_id() {
    let (db, _dir) = setup_test_db().await;

    UserPref::upsert_timezone(&db.pool, 7, "Asia/Yangon").await.unwrap();

    let pref = UserPref::find_by_chat_id(&db.pool, 7).await.unwrap();
    assert!(pref.is_some());
    let pref = pref.unwrap();
    assert_eq!(pref.chat_id, 7);
    assert_eq!(pref.timezone, "Asia/Yangon");
    assert!(!pref.created_at.is_empty());

    assert!(UserPref::find_by_chat_id(&db.pool, 8).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_all_users() {
    let (db, _dir) = setup_test_db().await;

    UserPref::upsert_timezone(&db.pool, 3, "Asia/Yangon").await.unwrap();
    UserPref::upsert_timezone(&db.pool, 1, "Europe/Berlin").await.unwrap();
    UserPref::upsert_timezone(&db.pool, 2, "UTC").await.unwrap();

    let users = UserPref::list_all(&db.pool).await.unwrap();
    let ids: Vec<i64> = users.iter().map(|u| u.chat_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_holiday_month_day_lookup_is_year_agnostic() {
    let (db, _dir) = setup_test_db().await;

    Holiday::create(&db.pool, "Union Day".to_string(), None, 2, 12, 2025, None)
        .await
        .unwrap();
    Holiday::create(&db.pool, "Union Day".to_string(), None, 2, 12, 2026, None)
        .await
        .unwrap();
    Holiday::create(&db.pool, "Martyrs' Day".to_string(), None, 7, 19, 2026, None)
        .await
        .unwrap();

    let feb12 = Holiday::find_by_month_day(&db.pool, 2, 12).await.unwrap();
    assert_eq!(feb12.len(), 2);
    assert!(feb12.iter().all(|h| h.name == "Union Day"));

    assert!(Holiday::find_by_month_day(&db.pool, 2, 13).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_holiday_year_listing_is_ordered() {
    let (db, _dir) = setup_test_db().await;

    Holiday::create(&db.pool, "Martyrs' Day".to_string(), None, 7, 19, 2026, None)
        .await
        .unwrap();
    Holiday::create(&db.pool, "Independence Day".to_string(), None, 1, 4, 2026, None)
        .await
        .unwrap();
    Holiday::create(&db.pool, "Thingyan".to_string(), None, 4, 13, 2026, Some("public".to_string()))
        .await
        .unwrap();

    let year = Holiday::find_by_year(&db.pool, 2026).await.unwrap();
    let names: Vec<&str> = year.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Independence Day", "Thingyan", "Martyrs' Day"]);

    assert!(Holiday::find_by_year(&db.pool, 2024).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_holiday_unique_constraint() {
    let (db, _dir) = setup_test_db().await;

    Holiday::create(&db.pool, "Thingyan".to_string(), None, 4, 13, 2026, None)
        .await
        .unwrap();

    // The same holiday in the same year is rejected.
    let duplicate = Holiday::create(&db.pool, "Thingyan".to_string(), None, 4, 13, 2026, None).await;
    assert!(duplicate.is_err());

    // But next year's entry is fine.
    let next_year = Holiday::create(&db.pool, "Thingyan".to_string(), None, 4, 13, 2027, None).await;
    assert!(next_year.is_ok());
}
