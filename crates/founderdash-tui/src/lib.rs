// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use founderdash_app::activity::ActivityPage;
use founderdash_app::dashboard::{DashboardCounts, recent_activity};
use founderdash_app::detail::{
    DetailAction, ProductDetail, UserDetail, product_detail, user_detail,
};
use founderdash_app::forms::FormPayload;
use founderdash_app::pages::PageEffect;
use founderdash_app::products::ProductsPage;
use founderdash_app::settings::{SettingsField, SettingsPage};
use founderdash_app::storage::RecordStorage;
use founderdash_app::users::UsersPage;
use founderdash_app::{
    AppCommand, AppMode, AppState, DetailRoute, FormKind, ProductId, ProductPlan, ProductStatus,
    TabKind, Theme, UserId, UserRole, UserStatus, format_date, format_timestamp,
};
use founderdash_table::{
    ALL, AnchorRect, DismissEvent, DismissKey, Modal, PageWindow, Point, PopupId, RowActionKind,
    RowRegion, RowTarget, ShellLayout, TableCommand, TableController, TableRecord, TableView,
};
use log::{debug, warn};
use ratatui::{Frame, Terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::{Date, OffsetDateTime};

const POLL_INTERVAL: Duration = Duration::from_millis(120);
const STATUS_TTL: Duration = Duration::from_secs(4);

// Popups sit directly under their trigger cell.
const HEADER_GAP_CELLS: i32 = 0;
const MENU_GAP_CELLS: i32 = 0;
const SELECT_GAP_CELLS: i32 = 0;

const COLUMN_SPACING: u16 = 1;
const ACTION_CELL: &str = "⋯";
const ACTION_CELL_WIDTH: u16 = 3;
const PAGER_BUTTON_WIDTH: u16 = 8;
const FILTER_MARK: &str = "▾";
const FILTER_MARK_OPEN: &str = "▴";
const FILTER_MARK_ACTIVE: &str = "▼";

const DETAIL_BUTTON_SPACING: u16 = 2;

const SETTINGS_LABEL_WIDTH: u16 = 28;
const SETTINGS_VALUE_WIDTH: u16 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnDef {
    label: &'static str,
    field: &'static str,
    width: u16,
    filter: Option<&'static str>,
}

const fn column(label: &'static str, field: &'static str, width: u16) -> ColumnDef {
    ColumnDef {
        label,
        field,
        width,
        filter: None,
    }
}

const fn filter_column(label: &'static str, field: &'static str, width: u16) -> ColumnDef {
    ColumnDef {
        label,
        field,
        width,
        filter: Some(field),
    }
}

const USER_COLUMNS: &[ColumnDef] = &[
    column("Name", "name", 20),
    column("Email", "email", 28),
    filter_column("Role", "role", 12),
    filter_column("Status", "status", 12),
    column("Joined", "created_at", 12),
];

const PRODUCT_COLUMNS: &[ColumnDef] = &[
    column("Product", "name", 26),
    filter_column("Plan", "plan", 14),
    filter_column("Status", "status", 12),
    column("Last updated", "last_updated", 14),
];

const ACTIVITY_COLUMNS: &[ColumnDef] = &[
    column("Action", "action", 30),
    filter_column("Type", "action_type", 18),
    column("By", "performed_by", 16),
    column("Target", "target", 20),
    filter_column("Status", "status", 12),
    column("When", "timestamp", 18),
];

/// Host services the event loop needs beyond the page state.
pub trait AppRuntime {
    fn storage(&self) -> &dyn RecordStorage;

    fn today(&self) -> Date {
        OffsetDateTime::now_utc().date()
    }
}

/// Every page the dashboard shows, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pages {
    pub users: UsersPage,
    pub products: ProductsPage,
    pub activity: ActivityPage,
    pub settings: SettingsPage,
}

impl Pages {
    pub fn load(storage: &dyn RecordStorage, page_size: usize) -> Self {
        Self {
            users: UsersPage::load(storage, page_size).with_gaps(HEADER_GAP_CELLS, MENU_GAP_CELLS),
            products: ProductsPage::load(storage, page_size)
                .with_gaps(HEADER_GAP_CELLS, MENU_GAP_CELLS),
            activity: ActivityPage::seeded(page_size).with_gaps(HEADER_GAP_CELLS, MENU_GAP_CELLS),
            settings: SettingsPage::load(storage).with_select_gap(SELECT_GAP_CELLS),
        }
    }
}

pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Name,
    Email,
    Role,
    UserStatus,
    Plan,
    ProductStatus,
}

impl FormField {
    const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Role => "Role",
            Self::UserStatus | Self::ProductStatus => "Status",
            Self::Plan => "Plan",
        }
    }

    const fn is_choice(self) -> bool {
        !matches!(self, Self::Name | Self::Email)
    }
}

fn form_fields(kind: FormKind) -> &'static [FormField] {
    match kind {
        FormKind::AddUser => &[
            FormField::Name,
            FormField::Email,
            FormField::Role,
            FormField::UserStatus,
        ],
        FormKind::AddProduct => &[FormField::Name, FormField::Plan, FormField::ProductStatus],
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FormUiState {
    payload: FormPayload,
    field_index: usize,
    error: Option<String>,
}

impl FormUiState {
    fn new(kind: FormKind) -> Self {
        Self {
            payload: FormPayload::blank_for(kind),
            field_index: 0,
            error: None,
        }
    }

    fn field(&self) -> FormField {
        let fields = form_fields(self.payload.kind());
        fields[self.field_index.min(fields.len() - 1)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewData {
    pages: Pages,
    viewport: Rect,
    cursor: usize,
    search_draft: String,
    settings_cursor: usize,
    org_draft: Option<String>,
    form: Option<FormUiState>,
    modal: Modal<FormKind>,
    help_visible: bool,
    status_token: u64,
}

impl ViewData {
    fn new(pages: Pages, viewport: Rect) -> Self {
        Self {
            pages,
            viewport,
            cursor: 0,
            search_draft: String::new(),
            settings_cursor: 0,
            org_draft: None,
            form: None,
            modal: Modal::new(),
            help_visible: false,
            status_token: 0,
        }
    }
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R, pages: Pages) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    let size = terminal.size().context("read terminal size")?;

    let mut view_data = ViewData::new(pages, Rect::new(0, 0, size.width, size.height));
    state.dispatch(AppCommand::SetTheme(
        view_data.pages.settings.settings().theme,
    ));
    let (internal_tx, internal_rx) = mpsc::channel();

    let mut result = Ok(());
    loop {
        process_internal_events(state, &view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &mut view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(POLL_INTERVAL).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if !has_event {
            continue;
        }
        match event::read().context("read event") {
            Ok(Event::Key(key)) => {
                if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                    break;
                }
            }
            Ok(Event::Mouse(mouse)) => {
                handle_mouse_event(state, runtime, &mut view_data, &internal_tx, mouse);
            }
            Ok(Event::Resize(width, height)) => {
                view_data.viewport = Rect::new(0, 0, width, height);
                sync_modal_area(&mut view_data);
            }
            Ok(_) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(
        io::stdout(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )
    .context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_TTL);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    match state.mode {
        AppMode::Form(_) => {
            handle_form_key(state, runtime, view_data, internal_tx, key);
            return false;
        }
        AppMode::Search => {
            handle_search_key(state, runtime, view_data, internal_tx, key);
            return false;
        }
        AppMode::Nav => {}
    }

    if state.active_tab == TabKind::Settings
        && state.detail.is_none()
        && handle_settings_key(state, runtime, view_data, internal_tx, key)
    {
        return false;
    }

    if let Some(route) = state.detail {
        if matches!(key.code, KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h')) {
            state.dispatch(AppCommand::CloseDetail);
            return false;
        }
        if let KeyCode::Char(digit @ '1'..='9') = key.code {
            let index = digit as usize - '1' as usize;
            if let Some(action) = DetailAction::for_route(route).get(index) {
                run_detail_action(state, view_data, internal_tx, route, *action);
                return false;
            }
        }
    } else if handle_table_key(state, runtime, view_data, internal_tx, key) {
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Tab, _) | (KeyCode::Char('f'), KeyModifiers::NONE) => {
            switch_tab(state, runtime, view_data, AppCommand::NextTab);
        }
        (KeyCode::BackTab, _) | (KeyCode::Char('b'), KeyModifiers::NONE) => {
            switch_tab(state, runtime, view_data, AppCommand::PrevTab);
        }
        (KeyCode::Char('?'), _) => view_data.help_visible = true,
        (KeyCode::Char('q'), KeyModifiers::NONE) => return true,
        _ => {}
    }
    false
}

fn switch_tab<R: AppRuntime>(
    state: &mut AppState,
    runtime: &R,
    view_data: &mut ViewData,
    command: AppCommand,
) {
    close_popups(runtime.storage(), state.active_tab, view_data);
    state.dispatch(command);
    view_data.cursor = 0;
}

/// Leaving a tab drops any popup it had open.
fn close_popups(storage: &dyn RecordStorage, tab: TabKind, view_data: &mut ViewData) {
    let pages = &mut view_data.pages;
    let closed = match tab {
        TabKind::Users => pages.users.table().open_popup().is_some(),
        TabKind::Products => pages.products.table().open_popup().is_some(),
        TabKind::Activity => pages.activity.table().open_popup().is_some(),
        TabKind::Settings => {
            pages.settings.close_selects();
            false
        }
        TabKind::Dashboard => false,
    };
    if closed {
        if let Err(error) = dispatch_table_input(pages, storage, tab, TableInput::ClosePopup) {
            warn!("closing {} popup failed: {error:#}", tab.label());
        }
    }
}

fn handle_search_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match (key.code, key.modifiers) {
        (KeyCode::Esc | KeyCode::Enter, _) => {
            state.dispatch(AppCommand::ExitToNav);
            return;
        }
        (KeyCode::Backspace, _) => {
            view_data.search_draft.pop();
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => view_data.search_draft.clear(),
        (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            view_data.search_draft.push(ch);
        }
        _ => return,
    }
    let term = view_data.search_draft.clone();
    apply_table_input(
        state,
        runtime,
        view_data,
        internal_tx,
        TableInput::Search(term),
    );
    view_data.cursor = 0;
}

fn handle_table_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    let tab = state.active_tab;
    let Some(chrome) = table_chrome(&mut view_data.pages, tab) else {
        return false;
    };

    if chrome.popup.is_some() {
        let input = match key.code {
            KeyCode::Char('j') | KeyCode::Down => TableInput::MoveHighlight(1),
            KeyCode::Char('k') | KeyCode::Up => TableInput::MoveHighlight(-1),
            KeyCode::Enter => TableInput::ChooseHighlighted,
            KeyCode::Esc => TableInput::Dismiss(DismissEvent::Key(DismissKey::Escape)),
            _ => return false,
        };
        apply_table_input(state, runtime, view_data, internal_tx, input);
        return true;
    }

    let regions = table_regions(screen_layout(view_data.viewport).body, chrome.window.page_size);
    let cursor_row = chrome.rows.get(view_data.cursor);
    let input = match key.code {
        KeyCode::Char('/') => {
            view_data.search_draft = chrome.search.clone();
            state.dispatch(AppCommand::StartSearch);
            return true;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            view_data.cursor = (view_data.cursor + 1).min(chrome.rows.len().saturating_sub(1));
            return true;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.cursor = view_data.cursor.saturating_sub(1);
            return true;
        }
        KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
            view_data.cursor = 0;
            TableInput::NextPage
        }
        KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => {
            view_data.cursor = 0;
            TableInput::PreviousPage
        }
        KeyCode::Enter => match cursor_row {
            Some(row) => TableInput::ClickRow {
                target: row.target.clone(),
                region: RowRegion::Body,
            },
            None => return true,
        },
        KeyCode::Char('m') => {
            let Some(row) = cursor_row else {
                return true;
            };
            let Some(cell) = regions
                .rows
                .get(view_data.cursor)
                .and_then(|line| action_cell_rect(*line, &chrome))
            else {
                return true;
            };
            TableInput::ClickRow {
                target: row.target.clone(),
                region: RowRegion::ActionCell(anchor_of(cell)),
            }
        }
        KeyCode::Char(digit @ '1'..='9') => {
            let index = digit as usize - '1' as usize;
            let Some((filter, rect)) = filter_headers(&chrome, regions.header).nth(index) else {
                return true;
            };
            TableInput::ToggleFilter {
                filter: filter.to_owned(),
                anchor: anchor_of(rect),
            }
        }
        KeyCode::Char('a') => {
            match tab {
                TabKind::Users => open_form(state, view_data, FormKind::AddUser),
                TabKind::Products => open_form(state, view_data, FormKind::AddProduct),
                _ => {}
            }
            return true;
        }
        KeyCode::Char('d') if tab == TabKind::Users => {
            if let Some(row) = cursor_row {
                let target = row.target.clone();
                disable_user(state, runtime, view_data, internal_tx, &target);
            }
            return true;
        }
        KeyCode::Char('t') if tab == TabKind::Products => {
            if let Some(row) = cursor_row {
                let target = row.target.clone();
                toggle_product(state, runtime, view_data, internal_tx, &target);
            }
            return true;
        }
        _ => return false,
    };
    apply_table_input(state, runtime, view_data, internal_tx, input);
    true
}

fn disable_user<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    target: &RowTarget,
) {
    let message = match target.id.parse::<UserId>() {
        Ok(id) if view_data.pages.users.disable(runtime.storage(), id) => {
            format!("{} disabled", target.display_name)
        }
        Ok(id) => format!("user {id} no longer exists"),
        Err(error) => format!("{error:#}"),
    };
    emit_status(state, view_data, internal_tx, message);
}

fn toggle_product<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    target: &RowTarget,
) {
    let message = match target.id.parse::<ProductId>() {
        Ok(id) => match view_data.pages.products.toggle_status(runtime.storage(), id) {
            Some(status) => format!("{} is now {}", target.display_name, status.as_str()),
            None => format!("product {id} no longer exists"),
        },
        Err(error) => format!("{error:#}"),
    };
    emit_status(state, view_data, internal_tx, message);
}

fn handle_settings_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if let Some(draft) = view_data.org_draft.as_mut() {
        match key.code {
            KeyCode::Esc => view_data.org_draft = None,
            KeyCode::Enter => {
                let name = draft.trim().to_owned();
                view_data.org_draft = None;
                if name.is_empty() {
                    emit_status(
                        state,
                        view_data,
                        internal_tx,
                        "organization name is required -- type a name and press enter",
                    );
                } else {
                    view_data.pages.settings.set_organization_name(name);
                }
            }
            KeyCode::Backspace => {
                draft.pop();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => draft.push(ch),
            _ => {}
        }
        return true;
    }

    if let Some(field) = open_settings_select(&view_data.pages.settings) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if let Some(select) = view_data.pages.settings.select_field_mut(field) {
                    select.move_highlight(1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if let Some(select) = view_data.pages.settings.select_field_mut(field) {
                    select.move_highlight(-1);
                }
            }
            KeyCode::Enter => {
                let chosen = view_data
                    .pages
                    .settings
                    .select_field_mut(field)
                    .and_then(|select| select.choose_highlighted());
                if let Some(value) = chosen {
                    apply_settings_choice(state, view_data, internal_tx, field, &value);
                }
            }
            KeyCode::Esc => {
                if let Some(select) = view_data.pages.settings.select_field_mut(field) {
                    select.handle_dismiss(DismissEvent::Key(DismissKey::Escape));
                }
            }
            _ => {}
        }
        return true;
    }

    let last = SettingsField::ALL.len() - 1;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            view_data.settings_cursor = (view_data.settings_cursor + 1).min(last);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.settings_cursor = view_data.settings_cursor.saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let field = SettingsField::ALL[view_data.settings_cursor.min(last)];
            activate_setting(state, view_data, internal_tx, field);
        }
        KeyCode::Char('s') => save_settings(state, runtime, view_data, internal_tx),
        _ => return false,
    }
    true
}

fn open_settings_select(settings: &SettingsPage) -> Option<SettingsField> {
    [SettingsField::DefaultRole, SettingsField::Theme]
        .into_iter()
        .find(|field| {
            settings
                .select_field(*field)
                .is_some_and(|select| select.is_open())
        })
}

fn activate_setting(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    field: SettingsField,
) {
    match field {
        SettingsField::OrganizationName => {
            view_data.org_draft = Some(view_data.pages.settings.settings().organization_name.clone());
        }
        SettingsField::DefaultRole | SettingsField::Theme => {
            let regions = settings_regions(screen_layout(view_data.viewport).body);
            let index = settings_index(field);
            let trigger = anchor_of(regions.values[index]);
            let container = anchor_of(regions.rows[index]);
            let settings = &mut view_data.pages.settings;
            let current = settings.value(field);
            let was_open = settings
                .select_field(field)
                .is_some_and(|select| select.is_open());
            settings.close_selects();
            if !was_open && let Some(select) = settings.select_field_mut(field) {
                select.toggle(trigger, container, &current);
            }
        }
        toggle => match view_data.pages.settings.toggle(toggle) {
            Ok(on) => {
                let label = if on { "on" } else { "off" };
                emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("{} {label}", toggle.label().to_lowercase()),
                );
            }
            Err(error) => emit_status(state, view_data, internal_tx, format!("{error:#}")),
        },
    }
}

fn apply_settings_choice(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    field: SettingsField,
    value: &str,
) {
    if let Err(error) = view_data.pages.settings.apply_choice(field, value) {
        emit_status(state, view_data, internal_tx, format!("{error:#}"));
        return;
    }
    if field == SettingsField::Theme {
        state.dispatch(AppCommand::SetTheme(
            view_data.pages.settings.settings().theme,
        ));
    }
}

fn save_settings<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let message = if view_data.pages.settings.save(runtime.storage()) {
        "settings saved"
    } else {
        "settings not saved; check the log file for the storage error"
    };
    emit_status(state, view_data, internal_tx, message);
}

fn settings_index(field: SettingsField) -> usize {
    SettingsField::ALL
        .iter()
        .position(|candidate| *candidate == field)
        .unwrap_or(0)
}

fn open_form(state: &mut AppState, view_data: &mut ViewData, kind: FormKind) {
    state.dispatch(AppCommand::OpenForm(kind));
    view_data.form = Some(FormUiState::new(kind));
    view_data
        .modal
        .open(kind.title(), kind, anchor_of(dialog_rect(view_data.viewport)));
}

fn close_form(state: &mut AppState, view_data: &mut ViewData) {
    view_data.modal.close();
    view_data.form = None;
    state.dispatch(AppCommand::ExitToNav);
}

fn sync_modal_area(view_data: &mut ViewData) {
    if view_data.modal.is_open() {
        let dialog = anchor_of(dialog_rect(view_data.viewport));
        view_data.modal.set_dialog_area(dialog);
    }
}

fn handle_form_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    if key.code == KeyCode::Esc {
        if view_data
            .modal
            .handle(DismissEvent::Key(DismissKey::Escape))
            .is_some()
        {
            close_form(state, view_data);
        }
        return;
    }
    if key.code == KeyCode::Enter {
        submit_form(state, runtime, view_data, internal_tx);
        return;
    }

    let Some(form) = view_data.form.as_mut() else {
        return;
    };
    let count = form_fields(form.payload.kind()).len();
    let field = form.field();
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.field_index = (form.field_index + 1) % count,
        KeyCode::BackTab | KeyCode::Up => form.field_index = (form.field_index + count - 1) % count,
        KeyCode::Left if field.is_choice() => cycle_form_choice(&mut form.payload, field, -1),
        KeyCode::Right | KeyCode::Char(' ') if field.is_choice() => {
            cycle_form_choice(&mut form.payload, field, 1);
        }
        KeyCode::Backspace => edit_form_text(&mut form.payload, field, None),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            edit_form_text(&mut form.payload, field, Some(ch));
        }
        _ => {}
    }
}

fn submit_form<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(payload) = view_data.form.as_ref().map(|form| form.payload.clone()) else {
        return;
    };
    let today = runtime.today();
    let result = match payload {
        FormPayload::User(input) => view_data
            .pages
            .users
            .add(runtime.storage(), input, today)
            .map(|id| format!("added user {id}")),
        FormPayload::Product(input) => view_data
            .pages
            .products
            .add(runtime.storage(), input, today)
            .map(|id| format!("added product {id}")),
    };
    match result {
        Ok(message) => {
            close_form(state, view_data);
            view_data.cursor = 0;
            emit_status(state, view_data, internal_tx, message);
        }
        Err(error) => {
            if let Some(form) = view_data.form.as_mut() {
                form.error = Some(format!("{error:#}"));
            }
        }
    }
}

/// `Some(ch)` appends, `None` deletes the last character.
fn edit_form_text(payload: &mut FormPayload, field: FormField, ch: Option<char>) {
    let text = match (payload, field) {
        (FormPayload::User(input), FormField::Name) => &mut input.name,
        (FormPayload::User(input), FormField::Email) => &mut input.email,
        (FormPayload::Product(input), FormField::Name) => &mut input.name,
        _ => return,
    };
    match ch {
        Some(ch) => text.push(ch),
        None => {
            text.pop();
        }
    }
}

fn cycle_form_choice(payload: &mut FormPayload, field: FormField, delta: isize) {
    match (payload, field) {
        (FormPayload::User(input), FormField::Role) => {
            input.role = cycle(&UserRole::ALL, input.role, delta);
        }
        (FormPayload::User(input), FormField::UserStatus) => {
            input.status = cycle(&UserStatus::ALL, input.status, delta);
        }
        (FormPayload::Product(input), FormField::Plan) => {
            input.plan = cycle(&ProductPlan::ALL, input.plan, delta);
        }
        (FormPayload::Product(input), FormField::ProductStatus) => {
            input.status = cycle(&ProductStatus::ALL, input.status, delta);
        }
        _ => {}
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, delta: isize) -> T {
    let len = all.len() as isize;
    let index = all.iter().position(|value| *value == current).unwrap_or(0) as isize;
    all[(index + delta).rem_euclid(len) as usize]
}

fn form_field_value(payload: &FormPayload, field: FormField) -> String {
    match (payload, field) {
        (FormPayload::User(input), FormField::Name) => input.name.clone(),
        (FormPayload::User(input), FormField::Email) => input.email.clone(),
        (FormPayload::User(input), FormField::Role) => input.role.as_str().to_owned(),
        (FormPayload::User(input), FormField::UserStatus) => input.status.as_str().to_owned(),
        (FormPayload::Product(input), FormField::Name) => input.name.clone(),
        (FormPayload::Product(input), FormField::Plan) => input.plan.as_str().to_owned(),
        (FormPayload::Product(input), FormField::ProductStatus) => {
            input.status.as_str().to_owned()
        }
        _ => String::new(),
    }
}

/// A table command before it is bound to a page's row-action type.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TableInput {
    Search(String),
    SelectFilter { filter: String, value: String },
    NextPage,
    PreviousPage,
    ToggleFilter { filter: String, anchor: AnchorRect },
    MoveHighlight(isize),
    ChooseHighlighted,
    ChooseMenuItem(usize),
    ClickRow { target: RowTarget, region: RowRegion },
    ClosePopup,
    Dismiss(DismissEvent),
}

fn table_command<A: RowActionKind>(input: TableInput, actions: &[A]) -> Option<TableCommand<A>> {
    Some(match input {
        TableInput::Search(term) => TableCommand::Search(term),
        TableInput::SelectFilter { filter, value } => TableCommand::SelectFilter { filter, value },
        TableInput::NextPage => TableCommand::NextPage,
        TableInput::PreviousPage => TableCommand::PreviousPage,
        TableInput::ToggleFilter { filter, anchor } => {
            TableCommand::ToggleFilterPopup { filter, anchor }
        }
        TableInput::MoveHighlight(delta) => TableCommand::MoveHighlight(delta),
        TableInput::ChooseHighlighted => TableCommand::ChooseHighlighted,
        TableInput::ChooseMenuItem(index) => TableCommand::ChooseRowAction(*actions.get(index)?),
        TableInput::ClickRow { target, region } => TableCommand::ClickRow { target, region },
        TableInput::ClosePopup => TableCommand::ClosePopup,
        TableInput::Dismiss(event) => TableCommand::Dismiss(event),
    })
}

fn dispatch_table_input(
    pages: &mut Pages,
    storage: &dyn RecordStorage,
    tab: TabKind,
    input: TableInput,
) -> Result<Vec<PageEffect>> {
    match tab {
        TabKind::Users => {
            let actions = pages.users.table().def().row_actions.clone();
            match table_command(input, &actions) {
                Some(command) => pages.users.dispatch(storage, command),
                None => Ok(Vec::new()),
            }
        }
        TabKind::Products => {
            let actions = pages.products.table().def().row_actions.clone();
            match table_command(input, &actions) {
                Some(command) => pages.products.dispatch(storage, command),
                None => Ok(Vec::new()),
            }
        }
        TabKind::Activity => match table_command(input, &[]) {
            Some(command) => pages.activity.dispatch(command).map(|()| Vec::new()),
            None => Ok(Vec::new()),
        },
        TabKind::Dashboard | TabKind::Settings => Ok(Vec::new()),
    }
}

fn apply_table_input<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    input: TableInput,
) {
    let tab = state.active_tab;
    debug!("{} table input: {input:?}", tab.label());
    match dispatch_table_input(&mut view_data.pages, runtime.storage(), tab, input) {
        Ok(effects) => {
            for effect in effects {
                match effect {
                    PageEffect::Navigate(route) => {
                        state.dispatch(AppCommand::OpenDetail(route));
                    }
                    PageEffect::Status(message) => {
                        emit_status(state, view_data, internal_tx, message);
                    }
                }
            }
        }
        Err(error) => emit_status(state, view_data, internal_tx, format!("{error:#}")),
    }

    let rows = table_chrome(&mut view_data.pages, tab).map_or(0, |chrome| chrome.rows.len());
    view_data.cursor = view_data.cursor.min(rows.saturating_sub(1));
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RowChrome {
    target: RowTarget,
    cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PopupChrome {
    Filter {
        filter: &'static str,
        options: Vec<String>,
        selected: String,
        area: AnchorRect,
        highlighted: usize,
    },
    Menu {
        labels: Vec<&'static str>,
        area: AnchorRect,
        highlighted: usize,
    },
}

impl PopupChrome {
    fn area(&self) -> AnchorRect {
        match self {
            Self::Filter { area, .. } | Self::Menu { area, .. } => *area,
        }
    }
}

/// Everything the renderer and the mouse router need from a table, with the
/// row type erased.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TableChrome {
    columns: &'static [ColumnDef],
    headers: Vec<String>,
    has_actions: bool,
    search: String,
    rows: Vec<RowChrome>,
    window: PageWindow,
    popup: Option<PopupChrome>,
}

fn table_chrome(pages: &mut Pages, tab: TabKind) -> Option<TableChrome> {
    match tab {
        TabKind::Users => {
            let (view, table) = pages.users.snapshot();
            Some(chrome_of(&view, table, USER_COLUMNS))
        }
        TabKind::Products => {
            let (view, table) = pages.products.snapshot();
            Some(chrome_of(&view, table, PRODUCT_COLUMNS))
        }
        TabKind::Activity => {
            let (view, table) = pages.activity.snapshot();
            Some(chrome_of(&view, table, ACTIVITY_COLUMNS))
        }
        TabKind::Dashboard | TabKind::Settings => None,
    }
}

fn chrome_of<T: TableRecord, A: RowActionKind>(
    view: &TableView<'_, T>,
    table: &TableController<A>,
    columns: &'static [ColumnDef],
) -> TableChrome {
    let rows = view
        .rows
        .iter()
        .map(|record| RowChrome {
            target: RowTarget::new(record.record_id(), record.display_name()),
            cells: columns
                .iter()
                .map(|column| {
                    record
                        .field(column.field)
                        .map(|value| value.into_owned())
                        .unwrap_or_default()
                })
                .collect(),
        })
        .collect();

    let popup = match (table.filter_popup(), table.row_menu()) {
        (Some(popup), _) => table.def().filter(popup.filter).map(|declared| {
            let rows = i32::try_from(declared.options.len()).unwrap_or(i32::MAX);
            PopupChrome::Filter {
                filter: popup.filter,
                options: declared.options.clone(),
                selected: table.selected(popup.filter).to_owned(),
                area: popup.geometry.area(rows),
                highlighted: popup.highlighted,
            }
        }),
        (None, Some(menu)) => Some(PopupChrome::Menu {
            labels: menu.actions().iter().map(|action| action.label()).collect(),
            area: menu.area(),
            highlighted: menu.highlighted(),
        }),
        (None, None) => None,
    };

    TableChrome {
        columns,
        headers: columns
            .iter()
            .map(|column| header_label(column, table))
            .collect(),
        has_actions: !table.def().row_actions.is_empty(),
        search: table.search().to_owned(),
        rows,
        window: view.window,
        popup,
    }
}

fn header_label<A: RowActionKind>(column: &ColumnDef, table: &TableController<A>) -> String {
    let Some(filter) = column.filter else {
        return column.label.to_owned();
    };
    let selected = table.selected(filter);
    if selected != ALL {
        return format!("{}: {selected} {FILTER_MARK_ACTIVE}", column.label);
    }
    let mark = if table.open_popup() == Some(&PopupId::Filter(filter)) {
        FILTER_MARK_OPEN
    } else {
        FILTER_MARK
    };
    format!("{} {mark}", column.label)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScreenLayout {
    tabs: Rect,
    body: Rect,
    status: Rect,
}

fn screen_layout(area: Rect) -> ScreenLayout {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(area);
    ScreenLayout {
        tabs: layout[0],
        body: layout[1],
        status: layout[2],
    }
}

fn inner_rect(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

/// Title cells of the tab bar, laid out the way `Tabs` draws them: one
/// padding cell either side and a one-cell divider between titles.
fn tab_regions(tabs: Rect) -> Vec<(TabKind, Rect)> {
    let inner = inner_rect(tabs);
    let mut x = inner.x;
    TabKind::ALL
        .into_iter()
        .map(|tab| {
            let width = u16::try_from(tab.label().chars().count())
                .unwrap_or(u16::MAX)
                .saturating_add(2);
            let rect = Rect::new(x, inner.y, width, 1);
            x = x.saturating_add(width).saturating_add(1);
            (tab, rect)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TableRegions {
    search: Rect,
    header: Rect,
    rows: Vec<Rect>,
    pager: Rect,
    previous: Rect,
    next: Rect,
}

fn table_regions(body: Rect, page_size: usize) -> TableRegions {
    let inner = inner_rect(body);
    let line = |offset: u16| Rect::new(inner.x, inner.y.saturating_add(offset), inner.width, 1);
    let page_rows = u16::try_from(page_size).unwrap_or(u16::MAX);
    let pager = line(page_rows.saturating_add(3));
    let next = Rect::new(
        pager.right().saturating_sub(PAGER_BUTTON_WIDTH),
        pager.y,
        PAGER_BUTTON_WIDTH,
        1,
    );
    let previous = Rect::new(
        next.x.saturating_sub(PAGER_BUTTON_WIDTH + 1),
        pager.y,
        PAGER_BUTTON_WIDTH,
        1,
    );
    TableRegions {
        search: line(0),
        header: line(1),
        rows: (0..page_rows).map(|offset| line(offset + 2)).collect(),
        pager,
        previous,
        next,
    }
}

/// Cell rectangles of one table line; the action cell comes last.
fn column_rects(line: Rect, columns: &[ColumnDef], has_actions: bool) -> Vec<Rect> {
    let widths = columns
        .iter()
        .map(|column| column.width)
        .chain(has_actions.then_some(ACTION_CELL_WIDTH));
    let mut x = line.x;
    widths
        .map(|width| {
            let rect = Rect::new(x, line.y, width, 1);
            x = x.saturating_add(width).saturating_add(COLUMN_SPACING);
            rect
        })
        .collect()
}

fn action_cell_rect(line: Rect, chrome: &TableChrome) -> Option<Rect> {
    if !chrome.has_actions {
        return None;
    }
    column_rects(line, chrome.columns, true).last().copied()
}

/// Filterable header cells, left to right.
fn filter_headers(
    chrome: &TableChrome,
    header: Rect,
) -> impl Iterator<Item = (&'static str, Rect)> + '_ {
    chrome
        .columns
        .iter()
        .zip(column_rects(header, chrome.columns, chrome.has_actions))
        .filter_map(|(column, rect)| column.filter.map(|filter| (filter, rect)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TableHit {
    PopupItem(usize),
    Search,
    Header { filter: &'static str, rect: Rect },
    Row { index: usize, action_cell: Option<Rect> },
    Previous,
    Next,
    Nothing,
}

fn table_hit(chrome: &TableChrome, regions: &TableRegions, point: Point) -> TableHit {
    if let Some(popup) = &chrome.popup {
        let area = popup.area();
        if area.contains(point) {
            return TableHit::PopupItem(usize::try_from(point.y - area.top).unwrap_or(0));
        }
    }

    let position = position_of(point);
    if regions.search.contains(position) {
        return TableHit::Search;
    }
    if regions.header.contains(position) {
        return filter_headers(chrome, regions.header)
            .find(|(_, rect)| rect.contains(position))
            .map_or(TableHit::Nothing, |(filter, rect)| TableHit::Header {
                filter,
                rect,
            });
    }
    if let Some(index) = regions
        .rows
        .iter()
        .take(chrome.rows.len())
        .position(|line| line.contains(position))
    {
        let action_cell = action_cell_rect(regions.rows[index], chrome)
            .filter(|cell| cell.contains(position));
        return TableHit::Row { index, action_cell };
    }
    if chrome.window.layout() != ShellLayout::Empty {
        if regions.previous.contains(position) {
            return TableHit::Previous;
        }
        if regions.next.contains(position) {
            return TableHit::Next;
        }
    }
    TableHit::Nothing
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SettingsRegions {
    rows: Vec<Rect>,
    values: Vec<Rect>,
    save: Rect,
}

fn settings_regions(body: Rect) -> SettingsRegions {
    let inner = inner_rect(body);
    let rows: Vec<Rect> = (0..SettingsField::ALL.len())
        .map(|index| {
            let offset = u16::try_from(index * 2 + 1).unwrap_or(u16::MAX);
            Rect::new(inner.x, inner.y.saturating_add(offset), inner.width, 1)
        })
        .collect();
    let values = rows
        .iter()
        .map(|row| {
            Rect::new(
                row.x.saturating_add(SETTINGS_LABEL_WIDTH),
                row.y,
                SETTINGS_VALUE_WIDTH,
                1,
            )
        })
        .collect();
    let save_y = rows.last().map_or(inner.y, |row| row.y.saturating_add(2));
    SettingsRegions {
        rows,
        values,
        save: Rect::new(inner.x, save_y, 16, 1),
    }
}

fn dialog_rect(viewport: Rect) -> Rect {
    centered_rect(60, 50, viewport)
}

/// Line of the detail view that returns to the list.
fn detail_back_rect(body: Rect) -> Rect {
    let inner = inner_rect(body);
    Rect::new(inner.x, inner.y, inner.width, 1)
}

/// Buttons on the line under the back link; none when the record is missing.
fn detail_action_rects(pages: &Pages, body: Rect, route: DetailRoute) -> Vec<(DetailAction, Rect)> {
    if detail_subject(pages, route).is_none() {
        return Vec::new();
    }
    let inner = inner_rect(body);
    let mut x = inner.x;
    DetailAction::for_route(route)
        .iter()
        .enumerate()
        .map(|(index, action)| {
            let width = detail_button(index, *action).chars().count() as u16;
            let rect = Rect::new(x, inner.y + 1, width, 1).intersection(inner);
            x = x.saturating_add(width + DETAIL_BUTTON_SPACING);
            (*action, rect)
        })
        .collect()
}

fn anchor_of(rect: Rect) -> AnchorRect {
    AnchorRect::new(
        i32::from(rect.x),
        i32::from(rect.y),
        i32::from(rect.width),
        i32::from(rect.height),
    )
}

fn position_of(point: Point) -> Position {
    Position::new(
        u16::try_from(point.x.max(0)).unwrap_or(u16::MAX),
        u16::try_from(point.y.max(0)).unwrap_or(u16::MAX),
    )
}

/// Clips a popup area to the screen.
fn rect_of(area: AnchorRect, bounds: Rect) -> Rect {
    let clamp = |value: i32| u16::try_from(value.max(0)).unwrap_or(u16::MAX);
    Rect::new(
        clamp(area.left),
        clamp(area.top),
        clamp(area.width),
        clamp(area.height),
    )
    .intersection(bounds)
}

fn handle_mouse_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    mouse: MouseEvent,
) {
    let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
        return;
    };
    let point = Point::new(i32::from(mouse.column), i32::from(mouse.row));
    let position = Position::new(mouse.column, mouse.row);

    if view_data.help_visible {
        view_data.help_visible = false;
        return;
    }

    if view_data.modal.is_open() {
        handle_form_click(state, view_data, point);
        return;
    }
    if state.mode == AppMode::Search {
        state.dispatch(AppCommand::ExitToNav);
    }

    let screen = screen_layout(view_data.viewport);
    if let Some((tab, _)) = tab_regions(screen.tabs)
        .into_iter()
        .find(|(_, rect)| rect.contains(position))
    {
        switch_tab(state, runtime, view_data, AppCommand::SelectTab(tab));
        return;
    }

    if let Some(route) = state.detail {
        if detail_back_rect(screen.body).contains(position) {
            state.dispatch(AppCommand::CloseDetail);
        } else if let Some((action, _)) = detail_action_rects(&view_data.pages, screen.body, route)
            .into_iter()
            .find(|(_, rect)| rect.contains(position))
        {
            run_detail_action(state, view_data, internal_tx, route, action);
        }
        return;
    }

    match state.active_tab {
        TabKind::Users | TabKind::Products | TabKind::Activity => {
            handle_table_click(state, runtime, view_data, internal_tx, point);
        }
        TabKind::Settings => handle_settings_click(state, runtime, view_data, internal_tx, point),
        TabKind::Dashboard => {}
    }
}

fn handle_table_click<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    point: Point,
) {
    let Some(chrome) = table_chrome(&mut view_data.pages, state.active_tab) else {
        return;
    };
    let regions = table_regions(screen_layout(view_data.viewport).body, chrome.window.page_size);
    let hit = table_hit(&chrome, &regions, point);

    if let TableHit::PopupItem(index) = hit {
        let input = match &chrome.popup {
            Some(PopupChrome::Filter {
                filter, options, ..
            }) => options.get(index).map(|value| TableInput::SelectFilter {
                filter: (*filter).to_owned(),
                value: value.clone(),
            }),
            Some(PopupChrome::Menu { .. }) => Some(TableInput::ChooseMenuItem(index)),
            None => None,
        };
        if let Some(input) = input {
            apply_table_input(state, runtime, view_data, internal_tx, input);
            view_data.cursor = 0;
        }
        return;
    }

    // The pointer-down reaches the open popup's dismissal first; the click
    // itself is then routed as usual.
    if chrome.popup.is_some() {
        apply_table_input(
            state,
            runtime,
            view_data,
            internal_tx,
            TableInput::Dismiss(DismissEvent::PointerDown(point)),
        );
    }

    let input = match hit {
        TableHit::Search => {
            view_data.search_draft = chrome.search.clone();
            state.dispatch(AppCommand::StartSearch);
            return;
        }
        TableHit::Header { filter, rect } => TableInput::ToggleFilter {
            filter: filter.to_owned(),
            anchor: anchor_of(rect),
        },
        TableHit::Row { index, action_cell } => {
            view_data.cursor = index;
            TableInput::ClickRow {
                target: chrome.rows[index].target.clone(),
                region: action_cell.map_or(RowRegion::Body, |cell| {
                    RowRegion::ActionCell(anchor_of(cell))
                }),
            }
        }
        TableHit::Previous => {
            view_data.cursor = 0;
            TableInput::PreviousPage
        }
        TableHit::Next => {
            view_data.cursor = 0;
            TableInput::NextPage
        }
        TableHit::PopupItem(_) | TableHit::Nothing => return,
    };
    apply_table_input(state, runtime, view_data, internal_tx, input);
}

fn handle_settings_click<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    point: Point,
) {
    if let Some(field) = open_settings_select(&view_data.pages.settings) {
        let chosen = view_data
            .pages
            .settings
            .select_field_mut(field)
            .and_then(|select| {
                let geometry = select.geometry()?;
                let rows = i32::try_from(select.options().len()).unwrap_or(i32::MAX);
                let area = geometry.area(rows);
                if !area.contains(point) {
                    return None;
                }
                select.choose(usize::try_from(point.y - area.top).ok()?)
            });
        if let Some(value) = chosen {
            apply_settings_choice(state, view_data, internal_tx, field, &value);
            return;
        }
        if let Some(select) = view_data.pages.settings.select_field_mut(field) {
            select.handle_dismiss(DismissEvent::PointerDown(point));
        }
    }

    let position = position_of(point);
    let regions = settings_regions(screen_layout(view_data.viewport).body);
    if regions.save.contains(position) {
        save_settings(state, runtime, view_data, internal_tx);
        return;
    }
    if let Some(index) = regions.rows.iter().position(|row| row.contains(position)) {
        view_data.settings_cursor = index;
        view_data.org_draft = None;
        activate_setting(state, view_data, internal_tx, SettingsField::ALL[index]);
    }
}

fn handle_form_click(state: &mut AppState, view_data: &mut ViewData, point: Point) {
    if view_data
        .modal
        .handle(DismissEvent::PointerDown(point))
        .is_some()
    {
        close_form(state, view_data);
        return;
    }

    let inner = inner_rect(dialog_rect(view_data.viewport));
    let Some(form) = view_data.form.as_mut() else {
        return;
    };
    let count = form_fields(form.payload.kind()).len();
    let position = position_of(point);
    for index in 0..count {
        let offset = u16::try_from(index * 2 + 1).unwrap_or(u16::MAX);
        let row = Rect::new(inner.x, inner.y.saturating_add(offset), inner.width, 1);
        if row.contains(position) {
            form.field_index = index;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    background: Color,
    text: Color,
    accent: Color,
    muted: Color,
    selection: Color,
    status: Color,
    error: Color,
}

impl Palette {
    const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                accent: Color::Blue,
                muted: Color::Gray,
                selection: Color::Gray,
                status: Color::Magenta,
                error: Color::Red,
            },
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::White,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                selection: Color::DarkGray,
                status: Color::Yellow,
                error: Color::LightRed,
            },
            Theme::System => Self {
                background: Color::Reset,
                text: Color::Reset,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                selection: Color::DarkGray,
                status: Color::Yellow,
                error: Color::Red,
            },
        }
    }
}

fn render(frame: &mut Frame<'_>, state: &AppState, view_data: &mut ViewData) {
    view_data.viewport = frame.area();
    sync_modal_area(view_data);
    let palette = Palette::for_theme(state.theme);
    let screen = screen_layout(frame.area());

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        frame.area(),
    );

    let selected = TabKind::ALL
        .iter()
        .position(|tab| *tab == state.active_tab)
        .unwrap_or(0);
    let tabs = Tabs::new(TabKind::ALL.map(TabKind::label).to_vec())
        .block(
            Block::default()
                .title(format!(
                    "founderdash | {}",
                    view_data.pages.settings.settings().organization_name
                ))
                .borders(Borders::ALL),
        )
        .style(Style::default().fg(palette.text))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, screen.tabs);

    match (state.detail, state.active_tab) {
        (Some(route), _) => {
            let detail = Paragraph::new(detail_text(&view_data.pages, route))
                .block(Block::default().borders(Borders::ALL).title(detail_title(route)));
            frame.render_widget(detail, screen.body);
        }
        (None, TabKind::Dashboard) => {
            let body = Paragraph::new(render_dashboard_text(&view_data.pages))
                .block(Block::default().borders(Borders::ALL).title("dashboard"));
            frame.render_widget(body, screen.body);
        }
        (None, TabKind::Settings) => render_settings(frame, screen.body, view_data, palette),
        (None, tab) => render_table(
            frame,
            screen.body,
            tab,
            view_data,
            palette,
            state.mode == AppMode::Search,
        ),
    }

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(palette.status))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status, screen.status);

    if let Some(form) = &view_data.form {
        render_form(frame, view_data.modal.title(), form, palette);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_table(
    frame: &mut Frame<'_>,
    area: Rect,
    tab: TabKind,
    view_data: &mut ViewData,
    palette: Palette,
    searching: bool,
) {
    let Some(chrome) = table_chrome(&mut view_data.pages, tab) else {
        return;
    };
    frame.render_widget(
        Block::default().borders(Borders::ALL).title(tab.label()),
        area,
    );
    let bounds = inner_rect(area);
    let regions = table_regions(area, chrome.window.page_size);

    let search_style = if searching {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    };
    frame.render_widget(
        Paragraph::new(search_line(&chrome, &view_data.search_draft, searching)).style(search_style),
        regions.search.intersection(bounds),
    );

    let widths: Vec<Constraint> = column_rects(regions.header, chrome.columns, chrome.has_actions)
        .iter()
        .map(|rect| Constraint::Length(rect.width))
        .collect();
    let header = Row::new(chrome.headers.iter().map(|label| {
        Cell::from(label.as_str()).style(Style::default().add_modifier(Modifier::BOLD))
    }));
    let rows = chrome.rows.iter().enumerate().map(|(index, row)| {
        let mut cells: Vec<Cell<'_>> = row
            .cells
            .iter()
            .map(|value| Cell::from(value.as_str()))
            .collect();
        if chrome.has_actions {
            cells.push(Cell::from(ACTION_CELL).style(Style::default().fg(palette.accent)));
        }
        let style = if index == view_data.cursor {
            Style::default().bg(palette.selection)
        } else {
            Style::default()
        };
        Row::new(cells).style(style)
    });
    let table_area = Rect::new(
        regions.header.x,
        regions.header.y,
        regions.header.width,
        u16::try_from(regions.rows.len() + 1).unwrap_or(u16::MAX),
    )
    .intersection(bounds);
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .flex(Flex::Start);
    frame.render_widget(table, table_area);

    match chrome.window.layout() {
        ShellLayout::Empty => {
            let empty = Paragraph::new(empty_state_text(tab))
                .style(Style::default().fg(palette.muted));
            if let Some(first) = regions.rows.first() {
                frame.render_widget(empty, first.intersection(bounds));
            }
        }
        ShellLayout::Paged {
            caption,
            previous_disabled,
            next_disabled,
        } => {
            frame.render_widget(
                Paragraph::new(caption).style(Style::default().fg(palette.muted)),
                regions.pager.intersection(bounds),
            );
            let button = |label: &'static str, disabled: bool| {
                let style = if disabled {
                    Style::default().fg(palette.muted)
                } else {
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD)
                };
                Paragraph::new(Line::from(Span::styled(label, style)))
            };
            frame.render_widget(
                button("< Prev", previous_disabled),
                regions.previous.intersection(bounds),
            );
            frame.render_widget(
                button("Next >", next_disabled),
                regions.next.intersection(bounds),
            );
        }
    }

    if let Some(popup) = &chrome.popup {
        render_popup(frame, popup, palette);
    }
}

fn search_line(chrome: &TableChrome, draft: &str, searching: bool) -> String {
    if searching {
        return format!("/{draft}_");
    }
    if chrome.search.is_empty() {
        "/ to search".to_owned()
    } else {
        format!("/{}", chrome.search)
    }
}

fn empty_state_text(tab: TabKind) -> String {
    format!(
        "No {} match the current search and filters.",
        tab.label()
    )
}

fn render_popup(frame: &mut Frame<'_>, popup: &PopupChrome, palette: Palette) {
    let bounds = frame.area();
    let (area, lines) = match popup {
        PopupChrome::Filter {
            options,
            selected,
            area,
            highlighted,
            ..
        } => {
            let lines = options
                .iter()
                .enumerate()
                .map(|(index, option)| {
                    let mut style = Style::default();
                    if option == selected {
                        style = style.fg(palette.accent).add_modifier(Modifier::BOLD);
                    }
                    if index == *highlighted {
                        style = style.bg(palette.selection);
                    }
                    Line::styled(option.clone(), style)
                })
                .collect::<Vec<_>>();
            (*area, lines)
        }
        PopupChrome::Menu {
            labels,
            area,
            highlighted,
        } => {
            let lines = labels
                .iter()
                .enumerate()
                .map(|(index, label)| {
                    let style = if index == *highlighted {
                        Style::default().bg(palette.selection)
                    } else {
                        Style::default()
                    };
                    Line::styled(*label, style)
                })
                .collect::<Vec<_>>();
            (*area, lines)
        }
    };
    let rect = rect_of(area, bounds);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(palette.background).fg(palette.text)),
        rect,
    );
}

fn render_settings(frame: &mut Frame<'_>, area: Rect, view_data: &ViewData, palette: Palette) {
    frame.render_widget(
        Block::default().borders(Borders::ALL).title("settings"),
        area,
    );
    let bounds = inner_rect(area);
    let regions = settings_regions(area);
    let page = &view_data.pages.settings;

    for (index, field) in SettingsField::ALL.into_iter().enumerate() {
        let style = if index == view_data.settings_cursor {
            Style::default().bg(palette.selection)
        } else {
            Style::default()
        };
        let line = format!(
            "{:<width$}{}",
            field.label(),
            settings_value_text(page, field, view_data.org_draft.as_deref()),
            width = usize::from(SETTINGS_LABEL_WIDTH),
        );
        frame.render_widget(
            Paragraph::new(line).style(style),
            regions.rows[index].intersection(bounds),
        );
    }

    let save_label = if page.is_dirty() {
        "[ Save ] unsaved changes"
    } else {
        "[ Save ]"
    };
    let save = Rect::new(regions.save.x, regions.save.y, bounds.width, 1);
    frame.render_widget(
        Paragraph::new(save_label).style(Style::default().fg(palette.accent)),
        save.intersection(bounds),
    );

    let Some(field) = open_settings_select(page) else {
        return;
    };
    let Some(select) = page.select_field(field) else {
        return;
    };
    let Some(geometry) = select.geometry() else {
        return;
    };
    let current = page.value(field);
    let lines = select
        .options()
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let mut style = Style::default();
            if option.value == current {
                style = style.fg(palette.accent).add_modifier(Modifier::BOLD);
            }
            if index == select.highlighted() {
                style = style.bg(palette.selection);
            }
            Line::styled(option.label.clone(), style)
        })
        .collect::<Vec<_>>();
    let rows = i32::try_from(lines.len()).unwrap_or(i32::MAX);
    let rect = rect_of(geometry.area(rows), frame.area());
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(palette.background).fg(palette.text)),
        rect,
    );
}

fn settings_value_text(page: &SettingsPage, field: SettingsField, draft: Option<&str>) -> String {
    let settings = page.settings();
    match field {
        SettingsField::OrganizationName => match draft {
            Some(draft) => format!("{draft}_"),
            None => settings.organization_name.clone(),
        },
        SettingsField::DefaultRole | SettingsField::Theme => {
            let value = page.value(field);
            let label = page
                .select_field(field)
                .map_or(value.as_str(), |select| select.selected_label(&value));
            format!("{label} {FILTER_MARK}")
        }
        toggle => {
            if page.value(toggle) == "true" {
                "[x] on".to_owned()
            } else {
                "[ ] off".to_owned()
            }
        }
    }
}

fn render_form(frame: &mut Frame<'_>, title: &str, form: &FormUiState, palette: Palette) {
    let area = dialog_rect(frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::default()];
    for (index, field) in form_fields(form.payload.kind()).iter().enumerate() {
        let focused = index == form.field_index;
        let value = form_field_value(&form.payload, *field);
        let value = match (field.is_choice(), focused) {
            (true, _) => format!("< {value} >"),
            (false, true) => format!("{value}_"),
            (false, false) => value,
        };
        let marker = if focused { ">" } else { " " };
        let style = if focused {
            Style::default().fg(palette.accent)
        } else {
            Style::default()
        };
        lines.push(Line::styled(
            format!("{marker} {:<8}{value}", field.label()),
            style,
        ));
        lines.push(Line::default());
    }
    if let Some(error) = &form.error {
        lines.push(Line::styled(
            error.clone(),
            Style::default().fg(palette.error),
        ));
    }
    lines.push(Line::styled(
        "enter save | tab next field | left/right choose | esc cancel",
        Style::default().fg(palette.muted),
    ));

    let dialog = Paragraph::new(lines)
        .style(Style::default().bg(palette.background).fg(palette.text))
        .block(Block::default().title(title.to_owned()).borders(Borders::ALL));
    frame.render_widget(dialog, area);
}

/// Name of the record a detail page shows, if it still exists.
fn detail_subject(pages: &Pages, route: DetailRoute) -> Option<String> {
    match route {
        DetailRoute::User(id) => pages.users.find(id).map(|user| user.name.clone()),
        DetailRoute::Product(id) => pages.products.find(id).map(|product| product.name.clone()),
    }
}

fn detail_button(index: usize, action: DetailAction) -> String {
    format!("[{}] {}", index + 1, action.label())
}

fn detail_action_bar(route: DetailRoute) -> String {
    let buttons: Vec<String> = DetailAction::for_route(route)
        .iter()
        .enumerate()
        .map(|(index, action)| detail_button(index, *action))
        .collect();
    buttons.join(&" ".repeat(usize::from(DETAIL_BUTTON_SPACING)))
}

fn run_detail_action(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    route: DetailRoute,
    action: DetailAction,
) {
    let Some(name) = detail_subject(&view_data.pages, route) else {
        return;
    };
    let message = action.request(route, &name);
    emit_status(state, view_data, internal_tx, message);
}

fn detail_title(route: DetailRoute) -> String {
    match route {
        DetailRoute::User(id) => format!("user {id}"),
        DetailRoute::Product(id) => format!("product {id}"),
    }
}

fn detail_text(pages: &Pages, route: DetailRoute) -> String {
    match route {
        DetailRoute::User(id) => {
            let mut lines = vec!["< back to users".to_owned()];
            match user_detail(pages.users.records(), id) {
                UserDetail::Found { user, profile } => {
                    lines.push(detail_action_bar(route));
                    lines.push(String::new());
                    lines.push(format!("{}  ({})", user.name, user.avatar));
                    lines.push(format!("email     {}", user.email));
                    lines.push(format!("role      {}", user.role.as_str()));
                    lines.push(format!("status    {}", user.status.as_str()));
                    lines.push(format!("joined    {}", format_date(user.created_at)));
                    if let Some(profile) = profile {
                        lines.push(String::new());
                        lines.push(format!("last active  {}", profile.last_active));
                        lines.push(format!("last login   {}", profile.last_login));
                        lines.push(format!("auth         {}", profile.auth_method));
                        let two_factor = if profile.two_factor { "on" } else { "off" };
                        lines.push(format!("2fa          {two_factor}"));
                        lines.push(format!("devices      {}", profile.devices.join(", ")));
                        lines.push(String::new());
                        lines.push("recent activity".to_owned());
                        lines.extend(profile.recent_activity.iter().map(|entry| {
                            format!(
                                "  {} | {} | {} | {}",
                                entry.when,
                                entry.action,
                                entry.status.as_str(),
                                entry.ip_address
                            )
                        }));
                    }
                }
                UserDetail::NotFound(id) => {
                    lines.push(String::new());
                    lines.push(format!("user {id} not found -- go back to the users list"));
                }
            }
            lines.join("\n")
        }
        DetailRoute::Product(id) => {
            let mut lines = vec!["< back to products".to_owned()];
            match product_detail(pages.products.records(), id) {
                ProductDetail::Found { product, profile } => {
                    lines.push(detail_action_bar(route));
                    lines.push(String::new());
                    lines.push(product.name.clone());
                    lines.push(format!("plan          {}", product.plan.as_str()));
                    lines.push(format!("status        {}", product.status.as_str()));
                    lines.push(format!(
                        "last updated  {}",
                        format_date(product.last_updated)
                    ));
                    if let Some(profile) = profile {
                        lines.push(format!("created       {}", format_date(profile.created_at)));
                        lines.push(format!("version       {}", profile.version));
                        lines.push(String::new());
                        lines.push(profile.description);
                        lines.push(String::new());
                        lines.push("features".to_owned());
                        lines.extend(
                            profile
                                .features
                                .iter()
                                .map(|feature| format!("  - {feature}")),
                        );
                    }
                }
                ProductDetail::NotFound(id) => {
                    lines.push(String::new());
                    lines.push(format!(
                        "product {id} not found -- go back to the products list"
                    ));
                }
            }
            lines.join("\n")
        }
    }
}

fn render_dashboard_text(pages: &Pages) -> String {
    let logs = pages.activity.records();
    let counts = DashboardCounts::compute(pages.users.records(), pages.products.records(), logs);
    let mut lines = vec![
        format!(
            "users      {} total, {} active",
            counts.total_users, counts.active_users
        ),
        format!(
            "products   {} active, {} paused",
            counts.active_products, counts.paused_products
        ),
        format!(
            "activity   {} errors, {} pending",
            counts.errors, counts.pending
        ),
        String::new(),
        "recent activity".to_owned(),
    ];
    lines.extend(recent_activity(logs).iter().map(|log| {
        format!(
            "  {} | {} | {} | {}",
            format_timestamp(log.timestamp),
            log.action,
            log.performed_by,
            log.status.as_str()
        )
    }));
    lines.join("\n")
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }
    let mode = match state.mode {
        AppMode::Nav if view_data.org_draft.is_some() => "EDIT",
        AppMode::Nav => "NAV",
        AppMode::Search => "SEARCH",
        AppMode::Form(_) => "FORM",
    };
    let hints = match (state.mode, state.detail, state.active_tab) {
        (AppMode::Form(_), _, _) => "enter save | tab field | esc cancel",
        (AppMode::Search, _, _) => "type to filter | enter/esc done",
        (AppMode::Nav, Some(_), _) => "1-3 actions | esc back | b/f tabs | ? help | q quit",
        (AppMode::Nav, None, TabKind::Settings) => {
            "j/k move | enter edit | s save | b/f tabs | ? help | q quit"
        }
        (AppMode::Nav, None, TabKind::Dashboard) => "b/f tabs | ? help | q quit",
        (AppMode::Nav, None, TabKind::Activity) => {
            "j/k n/p | / search | 1-9 filter | b/f tabs | ? help | q quit"
        }
        (AppMode::Nav, None, _) => {
            "j/k n/p | enter open | m menu | / search | 1-9 filter | a add | ? help | q quit"
        }
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | q quit | b/f or tab/shift+tab switch tabs | ? help\n\
tables: j/k row | n/p page | / search | 1-9 column filter | enter open | m row menu\n\
users: a add | d disable    products: a add | t toggle status\n\
popups: j/k highlight | enter choose | esc close | click outside closes\n\
detail: 1-3 actions | esc/h back\n\
settings: j/k field | enter edit/toggle/open | s save\n\
form: tab/shift+tab field | left/right choose | enter save | esc cancel\n\
mouse: click tabs, headers, rows, the row menu cell, pager buttons"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
