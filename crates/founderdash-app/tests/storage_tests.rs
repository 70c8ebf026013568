// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use founderdash_app::settings::{SettingsField, SettingsPage};
use founderdash_app::storage::{
    PRODUCTS_KEY, RecordStorage, SETTINGS_KEY, USERS_KEY, load_or_seed, reset, sync,
};
use founderdash_testkit::{FailingStorage, MemoryStorage};

#[test]
fn missing_key_falls_back_to_seed() {
    let storage = MemoryStorage::default();
    let values: Vec<u32> = load_or_seed(&storage, USERS_KEY, || vec![1, 2]);
    assert_eq!(values, vec![1, 2]);
    assert_eq!(storage.saves(), 0);
}

#[test]
fn unparseable_payload_falls_back_to_seed() {
    let storage = MemoryStorage::with_entry(USERS_KEY, "{not json");
    let values: Vec<u32> = load_or_seed(&storage, USERS_KEY, || vec![7]);
    assert_eq!(values, vec![7]);
}

#[test]
fn stored_payload_wins_over_seed() {
    let storage = MemoryStorage::with_entry(PRODUCTS_KEY, "[3,4]");
    let values: Vec<u32> = load_or_seed(&storage, PRODUCTS_KEY, Vec::new);
    assert_eq!(values, vec![3, 4]);

    assert!(sync(&storage, PRODUCTS_KEY, &[5_u32]));
    assert_eq!(storage.saves(), 1);
    assert_eq!(storage.payload(PRODUCTS_KEY).as_deref(), Some("[5]"));
}

#[test]
fn failing_storage_is_not_fatal() {
    let storage = FailingStorage;
    let values: Vec<u32> = load_or_seed(&storage, USERS_KEY, || vec![9]);
    assert_eq!(values, vec![9]);
    assert!(!sync(&storage, USERS_KEY, &values));
}

#[test]
fn reset_forgets_everything() -> Result<()> {
    let storage = MemoryStorage::with_entry(USERS_KEY, "[]");
    storage.save(PRODUCTS_KEY, "[]")?;
    storage.save(SETTINGS_KEY, "{}")?;
    reset(&storage)?;
    assert_eq!(storage.load(USERS_KEY)?, None);
    assert_eq!(storage.load(PRODUCTS_KEY)?, None);
    assert_eq!(storage.load(SETTINGS_KEY)?, None);
    assert!(reset(&FailingStorage).is_err());
    Ok(())
}

#[test]
fn settings_save_persists_and_reloads() -> Result<()> {
    let storage = MemoryStorage::default();
    let mut page = SettingsPage::load(&storage);
    page.set_organization_name("Globex");
    page.toggle(SettingsField::WeeklySummary)?;
    assert!(page.save(&storage));
    assert!(!page.is_dirty());
    assert_eq!(storage.saves(), 1);

    let reloaded = SettingsPage::load(&storage);
    assert_eq!(reloaded.settings().organization_name, "Globex");
    assert!(!reloaded.settings().weekly_summary);

    let mut offline = SettingsPage::load(&FailingStorage);
    offline.set_organization_name("Initech");
    assert!(!offline.save(&FailingStorage));
    assert!(offline.is_dirty());
    Ok(())
}
