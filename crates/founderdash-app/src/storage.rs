// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Key-value persistence for the editable collections.
//!
//! Storage is best effort: reads that fail or do not parse fall back to
//! the seed data, and failed writes are logged and otherwise ignored.

use anyhow::{Context, Result};
use log::{error, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const USERS_KEY: &str = "founderdash_users";
pub const PRODUCTS_KEY: &str = "founderdash_products";
pub const SETTINGS_KEY: &str = "founderdash_settings";

pub const ALL_KEYS: [&str; 3] = [USERS_KEY, PRODUCTS_KEY, SETTINGS_KEY];

/// A string-keyed store of JSON payloads.
pub trait RecordStorage {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, payload: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub fn decode<T: DeserializeOwned>(key: &str, payload: &str) -> Result<T> {
    serde_json::from_str(payload).with_context(|| format!("decode stored `{key}`"))
}

/// Loads `key`, falling back to `fallback` when nothing usable is stored.
pub fn load_or_seed<T, F>(storage: &dyn RecordStorage, key: &str, fallback: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match storage.load(key) {
        Ok(Some(payload)) => match decode(key, &payload) {
            Ok(value) => value,
            Err(err) => {
                error!("failed to load {key} from storage, using defaults: {err:#}");
                fallback()
            }
        },
        Ok(None) => fallback(),
        Err(err) => {
            error!("failed to read {key} from storage, using defaults: {err:#}");
            fallback()
        }
    }
}

/// Writes `value` under `key`. Returns false when the write failed.
pub fn sync<T: Serialize + ?Sized>(storage: &dyn RecordStorage, key: &str, value: &T) -> bool {
    let payload = match serde_json::to_string(value) {
        Ok(payload) => payload,
        Err(err) => {
            error!("failed to encode {key} for storage: {err}");
            return false;
        }
    };
    match storage.save(key, &payload) {
        Ok(()) => true,
        Err(err) => {
            warn!("failed to save {key} to storage: {err:#}");
            false
        }
    }
}

/// Forgets every persisted collection so the next launch starts from seed.
pub fn reset(storage: &dyn RecordStorage) -> Result<()> {
    for key in ALL_KEYS {
        storage
            .remove(key)
            .with_context(|| format!("remove stored `{key}`"))?;
    }
    Ok(())
}

