use std::time::Duration;

use tempfile::TempDir;

use loveymoji::config::DatabaseConfig;
use loveymoji::models::uploads::entities::NewUpload;
use loveymoji::storage::Storage;
use loveymoji::storage::sea_orm_storage::SeaOrmStorage;

async fn sqlite_storage(dir: &TempDir) -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: dir.path().join("gallery.db").to_string_lossy().into_owned(),
        ..DatabaseConfig::default()
    };
    SeaOrmStorage::connect(&config).await.unwrap()
}

fn new_upload(name: &str) -> NewUpload {
    NewUpload {
        original_name: name.to_string(),
        mime_type: "image/png".to_string(),
        size: 42,
        url: format!("/uploads/{name}"),
    }
}

#[actix_web::test]
async fn test_create_and_get_upload() {
    let dir = TempDir::new().unwrap();
    let storage = sqlite_storage(&dir).await;

    let created = storage.create_upload(new_upload("cat.png")).await.unwrap();
    assert!(uuid::Uuid::parse_str(&created.id).is_ok());
    assert_eq!(created.original_name, "cat.png");
    assert_eq!(created.size, 42);

    let found = storage.get_upload_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.url, "/uploads/cat.png");
    assert_eq!(
        found.created_at.timestamp_millis(),
        created.created_at.timestamp_millis()
    );

    let missing = storage
        .get_upload_by_id(&uuid::Uuid::new_v4().to_string())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[actix_web::test]
async fn test_list_recent_is_newest_first_and_limited() {
    let dir = TempDir::new().unwrap();
    let storage = sqlite_storage(&dir).await;

    for i in 0..5 {
        storage
            .create_upload(new_upload(&format!("{i}.png")))
            .await
            .unwrap();
        // 保证创建时间严格递增
        tokio::time::sleep(Duration::from_millis(3)).await;
    }

    let recent = storage.list_recent_uploads(3).await.unwrap();
    let names: Vec<&str> = recent.iter().map(|u| u.original_name.as_str()).collect();
    assert_eq!(names, vec!["4.png", "3.png", "2.png"]);

    let all = storage.list_recent_uploads(20).await.unwrap();
    assert_eq!(all.len(), 5);
}

#[actix_web::test]
async fn test_records_survive_reconnect() {
    let dir = TempDir::new().unwrap();
    let id = {
        let storage = sqlite_storage(&dir).await;
        storage.create_upload(new_upload("keep.png")).await.unwrap().id
    };

    let storage = sqlite_storage(&dir).await;
    let found = storage.get_upload_by_id(&id).await.unwrap();
    assert_eq!(found.map(|u| u.original_name), Some("keep.png".to_string()));
}
