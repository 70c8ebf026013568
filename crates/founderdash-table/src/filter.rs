// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Record access and the two predicate kinds tables filter with.

use std::borrow::Cow;
use std::collections::BTreeMap;

use anyhow::{Result, bail};

/// Sentinel option that matches every record.
pub const ALL: &str = "All";

/// What the orchestrator needs to see of a row.
pub trait TableRecord {
    fn record_id(&self) -> String;

    /// Human-readable name handed to row-action callbacks.
    fn display_name(&self) -> String;

    /// Display value of a searchable or filterable field.
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// A filterable column: the header label and its fixed option list, the
/// first of which is always [`ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub name: &'static str,
    pub label: &'static str,
    pub options: Vec<String>,
}

impl ColumnFilter {
    /// `values` are the non-sentinel options in display order.
    pub fn new<I, S>(name: &'static str, label: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = vec![ALL.to_owned()];
        options.extend(
            values
                .into_iter()
                .map(Into::into)
                .filter(|value: &String| value != ALL),
        );
        Self {
            name,
            label,
            options,
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|candidate| candidate == option)
    }
}

/// Exact-match predicate; [`ALL`] matches unconditionally.
pub fn matches_option<T: TableRecord + ?Sized>(record: &T, field: &str, option: &str) -> bool {
    option == ALL || record.field(field).is_some_and(|value| value == option)
}

/// Case-insensitive substring match over `fields`. An empty term matches.
pub fn matches_search<T: TableRecord + ?Sized>(record: &T, fields: &[&str], term: &str) -> bool {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|field| {
        record
            .field(field)
            .is_some_and(|value| value.to_lowercase().contains(&needle))
    })
}

/// Search term plus one selected option per declared filter.
///
/// Every mutation bumps `revision`, which keys the orchestrator's memo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    search: String,
    selected: BTreeMap<&'static str, String>,
    revision: u64,
}

impl FilterState {
    pub fn new(filters: &[ColumnFilter]) -> Self {
        Self {
            search: String::new(),
            selected: filters
                .iter()
                .map(|filter| (filter.name, ALL.to_owned()))
                .collect(),
            revision: 0,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn selected(&self, filter: &str) -> &str {
        self.selected.get(filter).map_or(ALL, String::as_str)
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.revision += 1;
    }

    /// Rejects filters that were not declared and options outside the
    /// filter's list. Returns the declared filter name.
    pub fn select(
        &mut self,
        filters: &[ColumnFilter],
        filter: &str,
        option: &str,
    ) -> Result<&'static str> {
        let Some(declared) = filters.iter().find(|candidate| candidate.name == filter) else {
            bail!("unknown filter `{filter}` -- use one of the table's column filters");
        };
        if !declared.has_option(option) {
            bail!(
                "`{option}` is not an option of the {} filter -- choose one of: {}",
                declared.label,
                declared.options.join(", ")
            );
        }
        self.selected.insert(declared.name, option.to_owned());
        self.revision += 1;
        Ok(declared.name)
    }

    pub fn matches<T: TableRecord + ?Sized>(&self, record: &T, search_fields: &[&str]) -> bool {
        matches_search(record, search_fields, &self.search)
            && self
                .selected
                .iter()
                .all(|(field, option)| matches_option(record, field, option))
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{ALL, ColumnFilter, FilterState, TableRecord, matches_option, matches_search};

    struct Row {
        id: u32,
        name: &'static str,
        status: &'static str,
    }

    impl TableRecord for Row {
        fn record_id(&self) -> String {
            self.id.to_string()
        }

        fn display_name(&self) -> String {
            self.name.to_owned()
        }

        fn field(&self, name: &str) -> Option<Cow<'_, str>> {
            match name {
                "name" => Some(Cow::Borrowed(self.name)),
                "status" => Some(Cow::Borrowed(self.status)),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: 1,
                name: "Sarah Chen",
                status: "Active",
            },
            Row {
                id: 2,
                name: "Marcus Lee",
                status: "Disabled",
            },
            Row {
                id: 3,
                name: "Sarah Park",
                status: "Disabled",
            },
        ]
    }

    fn status_filter() -> ColumnFilter {
        ColumnFilter::new("status", "Status", ["Active", "Disabled"])
    }

    #[test]
    fn all_is_always_first_and_never_duplicated() {
        let filter = ColumnFilter::new("status", "Status", ["All", "Active"]);
        assert_eq!(filter.options, vec!["All".to_owned(), "Active".to_owned()]);
    }

    #[test]
    fn all_sentinel_matches_everything() {
        for row in rows() {
            assert!(matches_option(&row, "status", ALL));
        }
        let matched: Vec<u32> = rows()
            .iter()
            .filter(|row| matches_option(*row, "status", "Disabled"))
            .map(|row| row.id)
            .collect();
        assert_eq!(matched, vec![2, 3]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let matched: Vec<u32> = rows()
            .iter()
            .filter(|row| matches_search(*row, &["name"], "SARAH"))
            .map(|row| row.id)
            .collect();
        assert_eq!(matched, vec![1, 3]);
        assert!(matches_search(&rows()[1], &["name"], ""));
        assert!(!matches_search(&rows()[1], &["missing"], "lee"));
    }

    #[test]
    fn search_term_whitespace_is_significant() {
        let matched: Vec<u32> = rows()
            .iter()
            .filter(|row| matches_search(*row, &["name"], "Chen "))
            .map(|row| row.id)
            .collect();
        assert!(matched.is_empty());
        assert!(!matches_search(&rows()[1], &["name"], "  "));
        assert!(matches_search(&rows()[0], &["name"], "h C"));
    }

    #[test]
    fn predicates_commute() -> anyhow::Result<()> {
        let filters = vec![status_filter()];
        let mut state = FilterState::new(&filters);
        state.set_search("sarah");
        state.select(&filters, "status", "Disabled")?;

        let combined: Vec<u32> = rows()
            .iter()
            .filter(|row| state.matches(*row, &["name"]))
            .map(|row| row.id)
            .collect();
        let search_then_filter: Vec<u32> = rows()
            .iter()
            .filter(|row| matches_search(*row, &["name"], "sarah"))
            .filter(|row| matches_option(*row, "status", "Disabled"))
            .map(|row| row.id)
            .collect();
        let filter_then_search: Vec<u32> = rows()
            .iter()
            .filter(|row| matches_option(*row, "status", "Disabled"))
            .filter(|row| matches_search(*row, &["name"], "sarah"))
            .map(|row| row.id)
            .collect();

        assert_eq!(combined, vec![3]);
        assert_eq!(search_then_filter, combined);
        assert_eq!(filter_then_search, combined);
        Ok(())
    }

    #[test]
    fn select_rejects_undeclared_values() {
        let filters = vec![status_filter()];
        let mut state = FilterState::new(&filters);
        assert!(state.select(&filters, "status", "Paused").is_err());
        assert!(state.select(&filters, "plan", ALL).is_err());
        assert_eq!(state.selected("status"), ALL);
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn mutations_bump_revision() -> anyhow::Result<()> {
        let filters = vec![status_filter()];
        let mut state = FilterState::new(&filters);
        state.set_search("x");
        state.select(&filters, "status", "Active")?;
        assert_eq!(state.revision(), 2);
        assert_eq!(state.selected("status"), "Active");
        Ok(())
    }
}
