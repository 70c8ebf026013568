// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use founderdash_table::{
    ColumnFilter, RowActionInvocation, RowActionKind, TableCommand, TableController, TableEvent,
    TableDef, TableView,
};
use log::info;
use time::Date;

use crate::forms::UserFormInput;
use crate::pages::{PageEffect, TablePage};
use crate::storage::{self, RecordStorage, USERS_KEY};
use crate::{DetailRoute, User, UserId, UserRole, UserStatus, seed};

pub const USER_SEARCH_FIELDS: &[&str] = &["name", "email"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    View,
    EditRole,
    Disable,
}

impl UserAction {
    pub const ALL: [Self; 3] = [Self::View, Self::EditRole, Self::Disable];
}

impl RowActionKind for UserAction {
    fn label(self) -> &'static str {
        match self {
            Self::View => "View user",
            Self::EditRole => "Edit role",
            Self::Disable => "Disable user",
        }
    }
}

pub fn users_table(page_size: usize) -> TableDef<UserAction> {
    TableDef::new("users", USER_SEARCH_FIELDS, page_size)
        .with_filter(ColumnFilter::new(
            "role",
            "Role",
            UserRole::ALL.map(UserRole::as_str),
        ))
        .with_filter(ColumnFilter::new(
            "status",
            "Status",
            UserStatus::ALL.map(UserStatus::as_str),
        ))
        .with_row_actions(&UserAction::ALL)
        .navigating_rows()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersPage {
    page: TablePage<User, UserAction>,
}

impl UsersPage {
    pub fn new(users: Vec<User>, page_size: usize) -> Self {
        Self {
            page: TablePage::new(users, users_table(page_size)),
        }
    }

    /// Starts from the stored snapshot, or the seed list when there is none,
    /// and writes the starting list back.
    pub fn load(storage: &dyn RecordStorage, page_size: usize) -> Self {
        let users: Vec<User> = storage::load_or_seed(storage, USERS_KEY, seed::users);
        let page = Self::new(users, page_size);
        page.persist(storage);
        page
    }

    /// Popup gaps in the host's units.
    pub fn with_gaps(self, header_gap: i32, menu_gap: i32) -> Self {
        Self {
            page: self.page.with_gaps(header_gap, menu_gap),
        }
    }

    pub fn records(&self) -> &[User] {
        self.page.records().records()
    }

    pub fn table(&self) -> &TableController<UserAction> {
        self.page.table()
    }

    pub fn view(&mut self) -> TableView<'_, User> {
        self.page.view()
    }

    pub fn snapshot(&mut self) -> (TableView<'_, User>, &TableController<UserAction>) {
        self.page.snapshot()
    }

    pub fn filtered(&mut self) -> Vec<&User> {
        self.page.filtered()
    }

    pub fn find(&self, id: UserId) -> Option<&User> {
        self.records().iter().find(|user| user.id == id)
    }

    pub fn dispatch(
        &mut self,
        storage: &dyn RecordStorage,
        command: TableCommand<UserAction>,
    ) -> Result<Vec<PageEffect>> {
        let mut effects = Vec::new();
        for event in self.page.dispatch(command)? {
            match event {
                TableEvent::RowActivated(target) => {
                    effects.push(PageEffect::Navigate(DetailRoute::User(target.id.parse()?)));
                }
                TableEvent::RowAction(invocation) => {
                    effects.push(self.run_action(storage, invocation)?);
                }
                _ => {}
            }
        }
        Ok(effects)
    }

    fn run_action(
        &mut self,
        storage: &dyn RecordStorage,
        invocation: RowActionInvocation<UserAction>,
    ) -> Result<PageEffect> {
        let id: UserId = invocation.id.parse()?;
        let name = invocation.display_name;
        Ok(match invocation.action {
            UserAction::View => PageEffect::Navigate(DetailRoute::User(id)),
            UserAction::EditRole => {
                info!("editing role for user {id} ({name})");
                PageEffect::Status(format!("role editing for {name} is not available yet"))
            }
            UserAction::Disable => {
                if self.disable(storage, id) {
                    info!("disabled user {id} ({name})");
                    PageEffect::Status(format!("{name} disabled"))
                } else {
                    PageEffect::Status(format!("user {id} no longer exists"))
                }
            }
        })
    }

    /// Sets the user's status to Disabled. The table page is left alone.
    pub fn disable(&mut self, storage: &dyn RecordStorage, id: UserId) -> bool {
        let changed = self
            .page
            .records_mut()
            .update_first(|user| user.id == id, |user| user.status = UserStatus::Disabled);
        if changed {
            self.persist(storage);
        }
        changed
    }

    /// Validates `input` and prepends the new user.
    pub fn add(
        &mut self,
        storage: &dyn RecordStorage,
        input: UserFormInput,
        today: Date,
    ) -> Result<UserId> {
        input.validate(self.records())?;
        let id = UserId::next_after(self.records().iter().map(|user| user.id));
        let user = input.into_user(id, today);
        info!("added user {id} ({})", user.name);
        self.page.records_mut().prepend(user);
        self.persist(storage);
        Ok(id)
    }

    fn persist(&self, storage: &dyn RecordStorage) -> bool {
        storage::sync(storage, USERS_KEY, self.records())
    }
}

