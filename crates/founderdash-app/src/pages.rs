// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use founderdash_table::{
    RecordSet, RowActionKind, TableCommand, TableController, TableEvent, TableRecord, TableDef,
    TableView,
};

use crate::DetailRoute;

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// What a page asks its host to do after handling a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEffect {
    Navigate(DetailRoute),
    Status(String),
}

/// A record collection paired with the table that shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePage<T, A> {
    records: RecordSet<T>,
    table: TableController<A>,
}

impl<T: TableRecord, A: RowActionKind> TablePage<T, A> {
    pub fn new(records: Vec<T>, def: TableDef<A>) -> Self {
        Self {
            records: RecordSet::new(records),
            table: TableController::new(def),
        }
    }

    pub fn with_gaps(self, header_gap: i32, menu_gap: i32) -> Self {
        Self {
            records: self.records,
            table: self.table.with_gaps(header_gap, menu_gap),
        }
    }

    pub fn records(&self) -> &RecordSet<T> {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut RecordSet<T> {
        &mut self.records
    }

    pub fn table(&self) -> &TableController<A> {
        &self.table
    }

    pub fn view(&mut self) -> TableView<'_, T> {
        self.table.view(&self.records)
    }

    /// The visible page together with the table state that produced it.
    pub fn snapshot(&mut self) -> (TableView<'_, T>, &TableController<A>) {
        let view = self.table.view(&self.records);
        (view, &self.table)
    }

    pub fn filtered(&mut self) -> Vec<&T> {
        self.table.filtered(&self.records)
    }

    pub fn dispatch(&mut self, command: TableCommand<A>) -> Result<Vec<TableEvent<A>>> {
        self.table.dispatch(&self.records, command)
    }
}
