// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use founderdash_app::storage::RecordStorage;
use founderdash_app::{
    ActionType, ActivityLog, ActivityLogId, ActivityStatus, Product, ProductId, ProductPlan,
    ProductStatus, User, UserId, UserRole, UserStatus,
};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::PathBuf;
use time::macros::{date, datetime};

/// Storage double backed by a map. Counts writes so tests can assert on
/// persistence without inspecting payloads.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<BTreeMap<String, String>>,
    saves: Cell<usize>,
}

impl MemoryStorage {
    pub fn with_entry(key: &str, payload: &str) -> Self {
        let storage = Self::default();
        storage
            .entries
            .borrow_mut()
            .insert(key.to_owned(), payload.to_owned());
        storage
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }

    pub fn payload(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl RecordStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.payload(key))
    }

    fn save(&self, key: &str, payload: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), payload.to_owned());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Every call fails, as a full disk or locked database would.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStorage;

impl RecordStorage for FailingStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        bail!("storage offline while loading {key}")
    }

    fn save(&self, key: &str, _payload: &str) -> Result<()> {
        bail!("storage offline while saving {key}")
    }

    fn remove(&self, key: &str) -> Result<()> {
        bail!("storage offline while removing {key}")
    }
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("founderdash.db");
    Ok((dir, db_path))
}

pub fn user(id: i64, name: &str, role: UserRole, status: UserStatus) -> User {
    let email = format!(
        "{}@acme.test",
        name.to_ascii_lowercase().replace(' ', ".")
    );
    User {
        id: UserId::new(id),
        name: name.to_owned(),
        email,
        role,
        status,
        created_at: date!(2026 - 01 - 15),
        avatar: founderdash_app::forms::avatar_initials(name),
    }
}

pub fn product(id: i64, name: &str, plan: ProductPlan, status: ProductStatus) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        plan,
        status,
        last_updated: date!(2026 - 02 - 01),
    }
}

pub fn activity(
    id: i64,
    action: &str,
    action_type: ActionType,
    performed_by: &str,
    status: ActivityStatus,
) -> ActivityLog {
    ActivityLog {
        id: ActivityLogId::new(id),
        action: action.to_owned(),
        action_type,
        performed_by: performed_by.to_owned(),
        target: format!("target-{id}"),
        status,
        timestamp: datetime!(2026 - 02 - 19 12:34:56),
    }
}

/// `count` active viewers named "Member 1", "Member 2", ...
pub fn members(count: i64) -> Vec<User> {
    (1..=count)
        .map(|id| {
            user(
                id,
                &format!("Member {id}"),
                UserRole::Viewer,
                UserStatus::Active,
            )
        })
        .collect()
}
