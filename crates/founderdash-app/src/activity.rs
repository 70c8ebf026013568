// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::HashSet;
use std::convert::Infallible;

use anyhow::Result;
use founderdash_table::{ColumnFilter, TableCommand, TableController, TableDef, TableView};

use crate::pages::TablePage;
use crate::{ActivityLog, ActivityStatus, seed};

pub const ACTIVITY_SEARCH_FIELDS: &[&str] = &["action", "target", "performed_by"];

/// Action types present in `logs`, in first-seen order.
pub fn action_type_options(logs: &[ActivityLog]) -> Vec<&'static str> {
    let mut seen = HashSet::new();
    logs.iter()
        .map(|log| log.action_type.as_str())
        .filter(|action_type| seen.insert(*action_type))
        .collect()
}

pub fn activity_table(logs: &[ActivityLog], page_size: usize) -> TableDef<Infallible> {
    TableDef::new("activity", ACTIVITY_SEARCH_FIELDS, page_size)
        .with_filter(ColumnFilter::new(
            "status",
            "Status",
            ActivityStatus::ALL.map(ActivityStatus::as_str),
        ))
        .with_filter(ColumnFilter::new(
            "action_type",
            "Action",
            action_type_options(logs),
        ))
}

/// Read-only log. Rows have no actions and are not clickable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityPage {
    page: TablePage<ActivityLog, Infallible>,
}

impl ActivityPage {
    pub fn new(logs: Vec<ActivityLog>, page_size: usize) -> Self {
        let def = activity_table(&logs, page_size);
        Self {
            page: TablePage::new(logs, def),
        }
    }

    pub fn seeded(page_size: usize) -> Self {
        Self::new(seed::activity_logs(), page_size)
    }

    pub fn with_gaps(self, header_gap: i32, menu_gap: i32) -> Self {
        Self {
            page: self.page.with_gaps(header_gap, menu_gap),
        }
    }

    pub fn records(&self) -> &[ActivityLog] {
        self.page.records().records()
    }

    pub fn table(&self) -> &TableController<Infallible> {
        self.page.table()
    }

    pub fn view(&mut self) -> TableView<'_, ActivityLog> {
        self.page.view()
    }

    pub fn snapshot(&mut self) -> (TableView<'_, ActivityLog>, &TableController<Infallible>) {
        self.page.snapshot()
    }

    pub fn filtered(&mut self) -> Vec<&ActivityLog> {
        self.page.filtered()
    }

    pub fn dispatch(&mut self, command: TableCommand<Infallible>) -> Result<()> {
        self.page.dispatch(command).map(drop)
    }
}

#[cfg(test)]
mod tests {
    use founderdash_table::{RowRegion, RowTarget, ShellLayout, TableCommand};

    use super::{ActivityPage, action_type_options};
    use crate::pages::DEFAULT_PAGE_SIZE;
    use crate::seed;

    fn ids(page: &mut ActivityPage) -> Vec<i64> {
        page.view().rows.iter().map(|log| log.id.get()).collect()
    }

    #[test]
    fn twelve_records_paginate_in_fives() -> anyhow::Result<()> {
        let mut activity = ActivityPage::seeded(DEFAULT_PAGE_SIZE);
        assert_eq!(ids(&mut activity), vec![1, 2, 3, 4, 5]);
        let view = activity.view();
        assert_eq!(view.window.caption(), "Showing 1\u{2013}5 of 12");
        assert!(view.window.previous_disabled());

        activity.dispatch(TableCommand::ChangePage(3))?;
        assert_eq!(ids(&mut activity), vec![11, 12]);
        let view = activity.view();
        assert!(view.window.next_disabled());
        assert!(matches!(
            view.layout(),
            ShellLayout::Paged {
                next_disabled: true,
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn search_sarah_resets_page() -> anyhow::Result<()> {
        let mut activity = ActivityPage::seeded(DEFAULT_PAGE_SIZE);
        activity.dispatch(TableCommand::ChangePage(2))?;
        activity.dispatch(TableCommand::Search("sarah".to_owned()))?;
        assert_eq!(activity.table().page(), 1);

        let expected: Vec<i64> = seed::activity_logs()
            .iter()
            .filter(|log| log.performed_by.to_lowercase().contains("sarah"))
            .map(|log| log.id.get())
            .collect();
        let found: Vec<i64> = activity.filtered().iter().map(|log| log.id.get()).collect();
        assert_eq!(found, expected);
        assert_eq!(found, vec![1, 3, 7, 10, 12]);
        Ok(())
    }

    #[test]
    fn search_keeps_trailing_whitespace() -> anyhow::Result<()> {
        let mut activity = ActivityPage::seeded(DEFAULT_PAGE_SIZE);
        activity.dispatch(TableCommand::Search("Chen ".to_owned()))?;
        assert!(activity.filtered().is_empty());
        assert_eq!(activity.view().layout(), ShellLayout::Empty);

        activity.dispatch(TableCommand::Search("Chen".to_owned()))?;
        let found: Vec<i64> = activity.filtered().iter().map(|log| log.id.get()).collect();
        assert_eq!(found, vec![1, 3, 7, 10, 12]);
        Ok(())
    }

    #[test]
    fn error_and_user_created_is_record_ten() -> anyhow::Result<()> {
        let mut activity = ActivityPage::seeded(DEFAULT_PAGE_SIZE);
        activity.dispatch(TableCommand::SelectFilter {
            filter: "status".to_owned(),
            value: "Error".to_owned(),
        })?;
        activity.dispatch(TableCommand::SelectFilter {
            filter: "action_type".to_owned(),
            value: "User Created".to_owned(),
        })?;
        let found = activity.filtered();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.get(), 10);
        assert_eq!(found[0].action, "Bulk import of users failed");
        Ok(())
    }

    #[test]
    fn action_type_options_keep_first_seen_order() {
        let options = action_type_options(&seed::activity_logs());
        assert_eq!(
            options,
            vec![
                "User Created",
                "Product Updated",
                "User Deleted",
                "Settings Changed",
                "Login",
                "Product Created",
                "User Updated",
            ]
        );
        let activity = ActivityPage::seeded(DEFAULT_PAGE_SIZE);
        let filter = activity
            .table()
            .def()
            .filter("action_type")
            .expect("declared filter");
        assert_eq!(filter.options[0], "All");
        assert_eq!(filter.options.len(), 8);
    }

    #[test]
    fn rows_are_inert() -> anyhow::Result<()> {
        let mut activity = ActivityPage::seeded(DEFAULT_PAGE_SIZE);
        activity.dispatch(TableCommand::ClickRow {
            target: RowTarget::new("1", "Created new user account"),
            region: RowRegion::Body,
        })?;
        assert!(activity.table().open_popup().is_none());
        assert!(activity.table().def().row_actions.is_empty());
        Ok(())
    }
}
