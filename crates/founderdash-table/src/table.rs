// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Search, column filters, pagination, and popups for one table.
//!
//! Page controllers own the rows in a [`RecordSet`]; a [`TableController`]
//! only reads them. All popups of a table (filter headers and row menus)
//! share one open slot, so opening any of them closes the previous one in
//! the same dispatch.

use anyhow::{Result, bail};
use log::debug;

use crate::dismiss::{DismissController, DismissEvent};
use crate::filter::{ColumnFilter, FilterState, TableRecord};
use crate::geometry::{AnchorRect, DropdownGeometry, FILTER_HEADER_GAP, compute_geometry};
use crate::menu::{RowActionInvocation, RowActionKind, RowMenu, RowTarget};
use crate::pagination::{PageWindow, ShellLayout};
use crate::records::RecordSet;

/// Static description of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef<A> {
    pub id: &'static str,
    pub search_fields: &'static [&'static str],
    pub filters: Vec<ColumnFilter>,
    pub page_size: usize,
    pub row_actions: Vec<A>,
    /// Whether a click on a row body activates the row.
    pub rows_navigate: bool,
    pub header_gap: i32,
    pub menu_gap: i32,
}

impl<A: RowActionKind> TableDef<A> {
    pub fn new(id: &'static str, search_fields: &'static [&'static str], page_size: usize) -> Self {
        Self {
            id,
            search_fields,
            filters: Vec::new(),
            page_size: page_size.max(1),
            row_actions: Vec::new(),
            rows_navigate: false,
            header_gap: FILTER_HEADER_GAP,
            menu_gap: FILTER_HEADER_GAP,
        }
    }

    pub fn with_filter(mut self, filter: ColumnFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_row_actions(mut self, actions: &[A]) -> Self {
        self.row_actions = actions.to_vec();
        self
    }

    pub fn navigating_rows(mut self) -> Self {
        self.rows_navigate = true;
        self
    }

    /// Overrides the popup gaps, e.g. for hosts measuring in terminal cells.
    pub fn with_gaps(mut self, header_gap: i32, menu_gap: i32) -> Self {
        self.header_gap = header_gap;
        self.menu_gap = menu_gap;
        self
    }

    pub fn filter(&self, name: &str) -> Option<&ColumnFilter> {
        self.filters.iter().find(|filter| filter.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PopupId {
    Filter(&'static str),
    RowMenu(String),
}

/// An open column filter dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPopup {
    pub filter: &'static str,
    pub geometry: DropdownGeometry,
    pub highlighted: usize,
}

/// Where on a row a click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRegion {
    Body,
    /// The trigger cell of the row action menu.
    ActionCell(AnchorRect),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCommand<A> {
    Search(String),
    SelectFilter { filter: String, value: String },
    ChangePage(usize),
    NextPage,
    PreviousPage,
    ToggleFilterPopup { filter: String, anchor: AnchorRect },
    ToggleRowMenu { target: RowTarget, anchor: AnchorRect },
    MoveHighlight(isize),
    ChooseHighlighted,
    ChooseRowAction(A),
    ClickRow { target: RowTarget, region: RowRegion },
    ClosePopup,
    Dismiss(DismissEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent<A> {
    SearchChanged(String),
    FilterChanged { filter: &'static str, value: String },
    PageChanged(usize),
    PopupOpened(PopupId),
    PopupClosed(PopupId),
    RowAction(RowActionInvocation<A>),
    RowActivated(RowTarget),
}

/// Visible page of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView<'a, T> {
    pub rows: Vec<&'a T>,
    pub window: PageWindow,
}

impl<T> TableView<'_, T> {
    pub fn layout(&self) -> ShellLayout {
        self.window.layout()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Memo {
    filter_revision: u64,
    records_revision: u64,
    records_len: usize,
    matches: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableController<A> {
    def: TableDef<A>,
    filters: FilterState,
    page: usize,
    popups: DismissController<PopupId>,
    filter_popup: Option<FilterPopup>,
    row_menu: Option<RowMenu<A>>,
    memo: Option<Memo>,
    filter_runs: u64,
}

impl<A: RowActionKind> TableController<A> {
    pub fn new(def: TableDef<A>) -> Self {
        let filters = FilterState::new(&def.filters);
        Self {
            def,
            filters,
            page: 1,
            popups: DismissController::new(),
            filter_popup: None,
            row_menu: None,
            memo: None,
            filter_runs: 0,
        }
    }

    pub fn def(&self) -> &TableDef<A> {
        &self.def
    }

    /// Re-measures popup gaps; popups opened afterwards use the new values.
    pub fn with_gaps(mut self, header_gap: i32, menu_gap: i32) -> Self {
        self.def = self.def.with_gaps(header_gap, menu_gap);
        self
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn search(&self) -> &str {
        self.filters.search()
    }

    pub fn selected(&self, filter: &str) -> &str {
        self.filters.selected(filter)
    }

    pub fn open_popup(&self) -> Option<&PopupId> {
        self.popups.open_id()
    }

    pub fn filter_popup(&self) -> Option<&FilterPopup> {
        self.filter_popup.as_ref()
    }

    pub fn row_menu(&self) -> Option<&RowMenu<A>> {
        self.row_menu.as_ref()
    }

    pub fn is_listening(&self) -> bool {
        self.popups.is_listening()
    }

    /// How many times the filter pass actually ran.
    pub fn filter_runs(&self) -> u64 {
        self.filter_runs
    }

    /// Filters (memoized) and paginates `records`.
    pub fn view<'a, T: TableRecord>(&mut self, records: &'a RecordSet<T>) -> TableView<'a, T> {
        self.refresh(records);
        let matches = self.matches();
        let window = PageWindow::new(self.page, self.def.page_size, matches.len());
        let rows = window
            .slice(matches)
            .iter()
            .filter_map(|index| records.records().get(*index))
            .collect();
        TableView { rows, window }
    }

    /// Every record passing the current search and filters, in source order.
    pub fn filtered<'a, T: TableRecord>(&mut self, records: &'a RecordSet<T>) -> Vec<&'a T> {
        self.refresh(records);
        self.matches()
            .iter()
            .filter_map(|index| records.records().get(*index))
            .collect()
    }

    pub fn dispatch<T: TableRecord>(
        &mut self,
        records: &RecordSet<T>,
        command: TableCommand<A>,
    ) -> Result<Vec<TableEvent<A>>> {
        let mut events: Vec<TableEvent<A>> = self.refresh(records).into_iter().collect();
        match command {
            TableCommand::Search(term) => {
                self.filters.set_search(term.clone());
                events.push(TableEvent::SearchChanged(term));
                events.extend(self.reset_page());
            }
            TableCommand::SelectFilter { filter, value } => {
                events.extend(self.select_filter(&filter, value)?);
            }
            TableCommand::ChangePage(page) => events.extend(self.go_to_page(page)),
            TableCommand::NextPage => {
                if !self.window().next_disabled() {
                    events.extend(self.go_to_page(self.page + 1));
                }
            }
            TableCommand::PreviousPage => {
                if !self.window().previous_disabled() {
                    events.extend(self.go_to_page(self.page - 1));
                }
            }
            TableCommand::ToggleFilterPopup { filter, anchor } => {
                events.extend(self.toggle_filter_popup(&filter, anchor)?);
            }
            TableCommand::ToggleRowMenu { target, anchor } => {
                events.extend(self.toggle_row_menu(target, anchor));
            }
            TableCommand::MoveHighlight(delta) => self.move_highlight(delta),
            TableCommand::ChooseHighlighted => events.extend(self.choose_highlighted()?),
            TableCommand::ChooseRowAction(action) => events.extend(self.choose_row_action(action)),
            TableCommand::ClickRow { target, region } => match region {
                RowRegion::ActionCell(anchor) => events.extend(self.toggle_row_menu(target, anchor)),
                RowRegion::Body => {
                    if self.def.rows_navigate {
                        events.push(TableEvent::RowActivated(target));
                    }
                }
            },
            TableCommand::ClosePopup => events.extend(self.close_popup()),
            TableCommand::Dismiss(event) => {
                if let Some(closed) = self.popups.handle(event) {
                    self.filter_popup = None;
                    self.row_menu = None;
                    events.push(TableEvent::PopupClosed(closed));
                }
            }
        }
        Ok(events)
    }

    /// Brings the memo up to date and pulls the page back inside the
    /// filtered range when the collection shrank under it.
    fn refresh<T: TableRecord>(&mut self, records: &RecordSet<T>) -> Option<TableEvent<A>> {
        let fresh = self.memo.as_ref().is_some_and(|memo| {
            memo.filter_revision == self.filters.revision()
                && memo.records_revision == records.revision()
                && memo.records_len == records.len()
        });
        if !fresh {
            let matches = records
                .iter()
                .enumerate()
                .filter(|(_, record)| self.filters.matches(*record, self.def.search_fields))
                .map(|(index, _)| index)
                .collect();
            self.filter_runs += 1;
            self.memo = Some(Memo {
                filter_revision: self.filters.revision(),
                records_revision: records.revision(),
                records_len: records.len(),
                matches,
            });
        }

        let last = self.window().last_page();
        if self.page > last {
            debug!(
                "table {}: page {} past the end, clamping to {last}",
                self.def.id, self.page
            );
            self.page = last;
            return Some(TableEvent::PageChanged(last));
        }
        None
    }

    fn matches(&self) -> &[usize] {
        self.memo.as_ref().map_or(&[][..], |memo| memo.matches.as_slice())
    }

    fn window(&self) -> PageWindow {
        PageWindow::new(self.page, self.def.page_size, self.matches().len())
    }

    fn reset_page(&mut self) -> Option<TableEvent<A>> {
        if self.page == 1 {
            return None;
        }
        self.page = 1;
        Some(TableEvent::PageChanged(1))
    }

    fn go_to_page(&mut self, page: usize) -> Option<TableEvent<A>> {
        let target = page.clamp(1, self.window().last_page());
        if target == self.page {
            return None;
        }
        self.page = target;
        Some(TableEvent::PageChanged(target))
    }

    fn select_filter(&mut self, filter: &str, value: String) -> Result<Vec<TableEvent<A>>> {
        let name = self.filters.select(&self.def.filters, filter, &value)?;
        let mut events = Vec::new();
        if self.popups.is_open(&PopupId::Filter(name)) {
            events.extend(self.close_popup());
        }
        events.push(TableEvent::FilterChanged {
            filter: name,
            value,
        });
        events.extend(self.reset_page());
        Ok(events)
    }

    fn toggle_filter_popup(
        &mut self,
        filter: &str,
        anchor: AnchorRect,
    ) -> Result<Vec<TableEvent<A>>> {
        let Some(declared) = self.def.filter(filter) else {
            bail!(
                "table {} has no `{filter}` filter -- open one of its declared column filters",
                self.def.id
            );
        };
        let name = declared.name;
        let id = PopupId::Filter(name);
        if self.popups.is_open(&id) {
            return Ok(self.close_popup());
        }

        let geometry = compute_geometry(anchor, self.def.header_gap);
        let rows = i32::try_from(declared.options.len()).unwrap_or(i32::MAX);
        let selected = self.filters.selected(name);
        let highlighted = declared
            .options
            .iter()
            .position(|option| option == selected)
            .unwrap_or(0);

        let mut events = Vec::new();
        if let Some(displaced) = self.popups.open(id.clone(), vec![anchor, geometry.area(rows)]) {
            events.push(TableEvent::PopupClosed(displaced));
        }
        self.row_menu = None;
        self.filter_popup = Some(FilterPopup {
            filter: name,
            geometry,
            highlighted,
        });
        events.push(TableEvent::PopupOpened(id));
        Ok(events)
    }

    fn toggle_row_menu(&mut self, target: RowTarget, anchor: AnchorRect) -> Vec<TableEvent<A>> {
        if self.def.row_actions.is_empty() {
            return Vec::new();
        }
        let id = PopupId::RowMenu(target.id.clone());
        if self.popups.is_open(&id) {
            return self.close_popup();
        }

        let menu = RowMenu::open(target, &self.def.row_actions, anchor, self.def.menu_gap);
        let mut events = Vec::new();
        if let Some(displaced) = self.popups.open(id.clone(), vec![anchor, menu.area()]) {
            events.push(TableEvent::PopupClosed(displaced));
        }
        self.filter_popup = None;
        self.row_menu = Some(menu);
        events.push(TableEvent::PopupOpened(id));
        events
    }

    fn move_highlight(&mut self, delta: isize) {
        if let Some(menu) = self.row_menu.as_mut() {
            menu.move_highlight(delta);
            return;
        }
        let Some(popup) = self.filter_popup.as_mut() else {
            return;
        };
        let options = self
            .def
            .filter(popup.filter)
            .map_or(0, |filter| filter.options.len());
        popup.highlighted = popup
            .highlighted
            .saturating_add_signed(delta)
            .min(options.saturating_sub(1));
    }

    fn choose_highlighted(&mut self) -> Result<Vec<TableEvent<A>>> {
        if let Some(action) = self.row_menu.as_ref().and_then(RowMenu::highlighted_action) {
            return Ok(self.choose_row_action(action));
        }
        let Some(popup) = self.filter_popup else {
            return Ok(Vec::new());
        };
        let Some(value) = self
            .def
            .filter(popup.filter)
            .and_then(|filter| filter.options.get(popup.highlighted))
            .cloned()
        else {
            return Ok(Vec::new());
        };
        self.select_filter(popup.filter, value)
    }

    fn choose_row_action(&mut self, action: A) -> Vec<TableEvent<A>> {
        let Some(invocation) = self.row_menu.as_ref().and_then(|menu| menu.invoke(action)) else {
            return Vec::new();
        };
        let mut events = vec![TableEvent::RowAction(invocation)];
        events.extend(self.close_popup());
        events
    }

    fn close_popup(&mut self) -> Vec<TableEvent<A>> {
        self.filter_popup = None;
        self.row_menu = None;
        self.popups
            .close()
            .map(TableEvent::PopupClosed)
            .into_iter()
            .collect()
    }
}
