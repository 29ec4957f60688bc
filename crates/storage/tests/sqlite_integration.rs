use playbook_core::model::LessonKey;
use storage::repository::{KeyValueStore, PROGRESS_KEY, ProgressRecord, Storage};
use storage::sqlite::SqliteRepository;

fn key(raw: &str) -> LessonKey {
    raw.parse().unwrap()
}

#[tokio::test]
async fn sqlite_load_missing_key_is_none() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_missing?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.load(PROGRESS_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_save_overwrites_value() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_overwrite?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.save("playbook.locale", b"en").await.unwrap();
    repo.save("playbook.locale", b"es").await.unwrap();

    assert_eq!(
        repo.load("playbook.locale").await.unwrap(),
        Some(b"es".to_vec())
    );
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.save("k", b"v").await.unwrap();
    repo.migrate().await.expect("second migrate");

    assert_eq!(repo.load("k").await.unwrap(), Some(b"v".to_vec()));
}

#[tokio::test]
async fn progress_record_survives_reconnect() {
    let url = "sqlite:file:memdb_kv_reconnect?mode=memory&cache=shared";
    let storage = Storage::sqlite(url).await.expect("open storage");

    let record = ProgressRecord::new(
        [key("foundations/data-types"), key("color/color-scales")]
            .into_iter()
            .collect(),
    );
    storage
        .kv
        .save(PROGRESS_KEY, &record.encode().unwrap())
        .await
        .unwrap();

    // Second handle on the same shared-cache database while the first is alive.
    let reopened = Storage::sqlite(url).await.expect("reopen storage");
    let bytes = reopened.kv.load(PROGRESS_KEY).await.unwrap().expect("stored");
    let decoded = ProgressRecord::decode(&bytes).unwrap();

    assert_eq!(decoded.record, record);
    assert!(decoded.skipped.is_empty());
    drop(storage);
}
