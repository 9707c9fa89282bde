// ABOUTME: Integration tests for the SQLite option store
// ABOUTME: Covers persistence, plugin prefixing, batch updates and hostile keys

use rstore_storage::{KeyValueStore, OptionChange, OptionValue, SqliteOptionStore, StorageError};
use sqlx::Row;

/// Helper to create an in-memory store for testing
async fn create_test_store() -> SqliteOptionStore {
    SqliteOptionStore::open("sqlite::memory:").await.unwrap()
}

#[tokio::test]
async fn test_set_and_get_preserve_value_kind() {
    let store = create_test_store().await;

    store.set("pl_id", OptionValue::Int(42)).await.unwrap();
    store.set("api_currency", "USD".into()).await.unwrap();

    assert_eq!(store.get("pl_id").await.unwrap(), Some(OptionValue::Int(42)));
    assert_eq!(
        store.get("api_currency").await.unwrap(),
        Some(OptionValue::from("USD"))
    );
    assert_eq!(store.get("api_market").await.unwrap(), None);
}

#[tokio::test]
async fn test_set_overwrites_existing_value() {
    let store = create_test_store().await;

    store.set("sync_ttl", OptionValue::Int(900)).await.unwrap();
    store.set("sync_ttl", OptionValue::Int(300)).await.unwrap();

    assert_eq!(store.get("sync_ttl").await.unwrap(), Some(OptionValue::Int(300)));
}

#[tokio::test]
async fn test_options_are_namespaced_with_plugin_prefix() {
    let store = create_test_store().await;
    store.set("api_tld", "secureserver.net".into()).await.unwrap();

    let row = sqlx::query("SELECT option_name, option_value FROM options")
        .fetch_one(store.pool())
        .await
        .unwrap();

    let name: String = row.get("option_name");
    let value: String = row.get("option_value");
    assert_eq!(name, "rstore_api_tld");
    assert_eq!(value, "\"secureserver.net\"");
}

#[tokio::test]
async fn test_delete_missing_key_is_ok() {
    let store = create_test_store().await;
    assert!(store.delete("next_sync").await.is_ok());
}

#[tokio::test]
async fn test_apply_batch_in_order() {
    let store = create_test_store().await;
    store.set("next_sync", OptionValue::Int(1_700_000_000)).await.unwrap();
    store.set("setup_rcc", "https://reseller.test".into()).await.unwrap();

    store
        .apply(&[
            OptionChange::set("pl_id", 42u64),
            OptionChange::delete("setup_rcc"),
            OptionChange::set("api_market", "fr-FR"),
            OptionChange::delete("next_sync"),
        ])
        .await
        .unwrap();

    assert_eq!(store.get("pl_id").await.unwrap(), Some(OptionValue::Int(42)));
    assert_eq!(
        store.get("api_market").await.unwrap(),
        Some(OptionValue::from("fr-FR"))
    );
    assert_eq!(store.get("setup_rcc").await.unwrap(), None);
    assert_eq!(store.get("next_sync").await.unwrap(), None);
}

#[tokio::test]
async fn test_hostile_keys_are_stored_literally() {
    let store = create_test_store().await;

    // Bound parameters keep the key out of the SQL text
    let key = "pl_id'; DROP TABLE options; --";
    store.set(key, "x".into()).await.unwrap();

    assert_eq!(store.get(key).await.unwrap(), Some(OptionValue::from("x")));
    store.set("pl_id", OptionValue::Int(1)).await.unwrap();
    assert_eq!(store.get("pl_id").await.unwrap(), Some(OptionValue::Int(1)));
}

#[tokio::test]
async fn test_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("rstore.db").display());

    {
        let store = SqliteOptionStore::open(&url).await.unwrap();
        store.set("pl_id", OptionValue::Int(7)).await.unwrap();
        store.pool().close().await;
    }

    let store = SqliteOptionStore::open(&url).await.unwrap();
    assert_eq!(store.get("pl_id").await.unwrap(), Some(OptionValue::Int(7)));
}

#[tokio::test]
async fn test_failed_batch_names_option_and_rolls_back() {
    let store = create_test_store().await;
    store.set("pl_id", OptionValue::Int(1)).await.unwrap();
    sqlx::query(
        "CREATE TRIGGER reject_api_tld BEFORE INSERT ON options \
         WHEN NEW.option_name = 'rstore_api_tld' \
         BEGIN SELECT RAISE(ABORT, 'api_tld is read-only'); END",
    )
    .execute(store.pool())
    .await
    .unwrap();

    let err = store
        .apply(&[
            OptionChange::set("pl_id", 42u64),
            OptionChange::set("api_tld", "secureserver.net"),
        ])
        .await
        .unwrap_err();

    match err {
        StorageError::Database(message) => assert!(message.contains("'api_tld'")),
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(store.get("pl_id").await.unwrap(), Some(OptionValue::Int(1)));
}
