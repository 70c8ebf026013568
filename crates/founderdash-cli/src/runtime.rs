// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use founderdash_app::storage::RecordStorage;
use founderdash_store::Store;

pub struct StoreRuntime<'a> {
    store: &'a Store,
}

impl<'a> StoreRuntime<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }
}

impl founderdash_tui::AppRuntime for StoreRuntime<'_> {
    fn storage(&self) -> &dyn RecordStorage {
        self.store
    }
}
