// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod activity;
pub mod dashboard;
pub mod detail;
pub mod forms;
pub mod ids;
pub mod model;
pub mod pages;
pub mod products;
pub mod seed;
pub mod settings;
pub mod state;
pub mod storage;
pub mod users;

pub use ids::*;
pub use model::*;
pub use state::*;

