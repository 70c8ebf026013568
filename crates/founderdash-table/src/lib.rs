// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod dismiss;
pub mod filter;
pub mod geometry;
pub mod menu;
pub mod modal;
pub mod pagination;
pub mod records;
pub mod select;
pub mod table;

pub use dismiss::*;
pub use filter::*;
pub use geometry::*;
pub use menu::*;
pub use modal::*;
pub use pagination::*;
pub use records::*;
pub use select::*;
pub use table::*;
