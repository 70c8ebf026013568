// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use founderdash_app::pages::DEFAULT_PAGE_SIZE;
use founderdash_app::products::ProductsPage;
use founderdash_app::settings::{SettingsField, SettingsPage};
use founderdash_app::storage::{self, PRODUCTS_KEY, RecordStorage, SETTINGS_KEY, USERS_KEY};
use founderdash_app::users::UsersPage;
use founderdash_app::{ProductId, ProductStatus, UserId, UserStatus};
use founderdash_store::{Store, validate_db_path};
use founderdash_testkit::temp_db_path;

#[test]
fn validate_db_path_rejects_uri_forms() {
    assert!(validate_db_path("").is_err());
    assert!(validate_db_path("file:test.db").is_err());
    assert!(validate_db_path("https://example.com/db.sqlite").is_err());
    assert!(validate_db_path("db.sqlite?mode=ro").is_err());
    assert!(validate_db_path(":memory:").is_ok());
    assert!(validate_db_path("/tmp/founderdash.db").is_ok());
}

#[test]
fn bootstrap_is_idempotent() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.bootstrap()?;
    assert!(store.entries()?.is_empty());
    Ok(())
}

#[test]
fn bootstrap_rejects_foreign_database() -> Result<()> {
    let store = Store::open_memory()?;
    store
        .raw_connection()
        .execute_batch("CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT);")?;

    let err = store
        .bootstrap()
        .expect_err("schema validation should fail");
    assert!(
        err.to_string()
            .contains("missing required table `kv_entries`")
    );
    Ok(())
}

#[test]
fn bootstrap_rejects_missing_columns() -> Result<()> {
    let store = Store::open_memory()?;
    store
        .raw_connection()
        .execute_batch("CREATE TABLE kv_entries (key TEXT PRIMARY KEY, payload TEXT NOT NULL);")?;

    let err = store
        .bootstrap()
        .expect_err("schema validation should fail");
    let message = err.to_string();
    assert!(message.contains("table `kv_entries` is missing required columns"));
    assert!(message.contains("updated_at"));
    Ok(())
}

#[test]
fn save_upserts_and_remove_forgets() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    assert_eq!(store.load(USERS_KEY)?, None);
    store.save(USERS_KEY, "[]")?;
    store.save(USERS_KEY, "[1]")?;
    assert_eq!(store.load(USERS_KEY)?.as_deref(), Some("[1]"));

    let entries = store.entries()?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].key, USERS_KEY);
    assert_eq!(entries[0].bytes, 3);

    store.remove(USERS_KEY)?;
    store.remove(USERS_KEY)?;
    assert_eq!(store.load(USERS_KEY)?, None);
    Ok(())
}

#[test]
fn collections_survive_reopen() -> Result<()> {
    let (_dir, path) = temp_db_path()?;
    {
        let store = Store::open(&path)?;
        store.bootstrap()?;

        let mut users = UsersPage::load(&store, DEFAULT_PAGE_SIZE);
        assert!(users.disable(&store, UserId::new(2)));

        let mut products = ProductsPage::load(&store, DEFAULT_PAGE_SIZE);
        assert_eq!(
            products.toggle_status(&store, ProductId::new(1)),
            Some(ProductStatus::Paused)
        );

        let mut settings = SettingsPage::load(&store);
        settings.toggle(SettingsField::WeeklySummary)?;
        assert!(settings.save(&store));
    }

    let store = Store::open(&path)?;
    store.bootstrap()?;

    let users = UsersPage::load(&store, DEFAULT_PAGE_SIZE);
    assert_eq!(
        users.find(UserId::new(2)).map(|user| user.status),
        Some(UserStatus::Disabled)
    );

    let products = ProductsPage::load(&store, DEFAULT_PAGE_SIZE);
    assert_eq!(
        products.find(ProductId::new(1)).map(|product| product.status),
        Some(ProductStatus::Paused)
    );

    let settings = SettingsPage::load(&store);
    assert!(!settings.settings().weekly_summary);

    let keys: Vec<String> = store.entries()?.into_iter().map(|entry| entry.key).collect();
    assert_eq!(keys, vec![PRODUCTS_KEY, SETTINGS_KEY, USERS_KEY]);
    Ok(())
}

#[test]
fn corrupt_payload_falls_back_to_seed() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.save(USERS_KEY, "{\"not\": \"a list\"}")?;

    let users = UsersPage::load(&store, DEFAULT_PAGE_SIZE);
    assert_eq!(users.records().len(), 10);
    assert!(storage::decode::<Vec<founderdash_app::User>>(
        USERS_KEY,
        &store.load(USERS_KEY)?.unwrap_or_default()
    )
    .is_ok());
    Ok(())
}

#[test]
fn reset_clears_every_collection() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    UsersPage::load(&store, DEFAULT_PAGE_SIZE);
    ProductsPage::load(&store, DEFAULT_PAGE_SIZE);
    assert_eq!(store.entries()?.len(), 2);

    storage::reset(&store)?;
    assert!(store.entries()?.is_empty());
    Ok(())
}
