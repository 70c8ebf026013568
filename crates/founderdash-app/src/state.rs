// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{AppMode, DetailRoute, FormKind, TabKind, Theme};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub active_tab: TabKind,
    pub detail: Option<DetailRoute>,
    pub theme: Theme,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Nav,
            active_tab: TabKind::Dashboard,
            detail: None,
            theme: Theme::default(),
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextTab,
    PrevTab,
    SelectTab(TabKind),
    StartSearch,
    ExitToNav,
    OpenForm(FormKind),
    OpenDetail(DetailRoute),
    CloseDetail,
    SetTheme(Theme),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    TabChanged(TabKind),
    DetailOpened(DetailRoute),
    DetailClosed,
    ThemeChanged(Theme),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextTab => self.rotate_tab(1),
            AppCommand::PrevTab => self.rotate_tab(-1),
            AppCommand::SelectTab(tab) => self.select_tab(tab),
            AppCommand::StartSearch => {
                self.mode = AppMode::Search;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitToNav => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::OpenForm(kind) => {
                self.mode = AppMode::Form(kind);
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::OpenDetail(route) => {
                self.detail = Some(route);
                self.active_tab = match route {
                    DetailRoute::User(_) => TabKind::Users,
                    DetailRoute::Product(_) => TabKind::Products,
                };
                vec![AppEvent::DetailOpened(route)]
            }
            AppCommand::CloseDetail => match self.detail.take() {
                Some(_) => vec![AppEvent::DetailClosed],
                None => Vec::new(),
            },
            AppCommand::SetTheme(theme) => {
                if self.theme == theme {
                    return Vec::new();
                }
                self.theme = theme;
                vec![AppEvent::ThemeChanged(theme)]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<AppEvent> {
        let tabs = TabKind::ALL;
        let current = tabs
            .iter()
            .position(|tab| *tab == self.active_tab)
            .unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.select_tab(tabs[next])
    }

    /// Leaving a tab also leaves any detail page opened from it.
    fn select_tab(&mut self, tab: TabKind) -> Vec<AppEvent> {
        let mut events = Vec::new();
        if self.detail.take().is_some() {
            events.push(AppEvent::DetailClosed);
        }
        self.active_tab = tab;
        events.push(AppEvent::TabChanged(tab));
        events
    }

    fn set_status(&mut self, message: String) -> AppEvent {
        self.status_line = Some(message.clone());
        AppEvent::StatusUpdated(message)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState};
    use crate::{AppMode, DetailRoute, FormKind, ProductId, TabKind, Theme};

    #[test]
    fn tab_rotation_wraps() {
        let mut state = AppState {
            active_tab: TabKind::Settings,
            ..AppState::default()
        };

        let events = state.dispatch(AppCommand::NextTab);
        assert_eq!(state.active_tab, TabKind::Dashboard);
        assert_eq!(events, vec![AppEvent::TabChanged(TabKind::Dashboard)]);

        state.dispatch(AppCommand::PrevTab);
        assert_eq!(state.active_tab, TabKind::Settings);
    }

    #[test]
    fn detail_opens_on_owning_tab_and_closes_on_tab_change() {
        let mut state = AppState::default();
        let route = DetailRoute::Product(ProductId::new(3));

        let events = state.dispatch(AppCommand::OpenDetail(route));
        assert_eq!(events, vec![AppEvent::DetailOpened(route)]);
        assert_eq!(state.active_tab, TabKind::Products);

        let events = state.dispatch(AppCommand::NextTab);
        assert_eq!(
            events,
            vec![
                AppEvent::DetailClosed,
                AppEvent::TabChanged(TabKind::Activity)
            ]
        );
        assert_eq!(state.detail, None);
        assert!(state.dispatch(AppCommand::CloseDetail).is_empty());
    }

    #[test]
    fn mode_transitions() {
        let mut state = AppState::default();

        state.dispatch(AppCommand::StartSearch);
        assert_eq!(state.mode, AppMode::Search);

        state.dispatch(AppCommand::OpenForm(FormKind::AddUser));
        assert_eq!(state.mode, AppMode::Form(FormKind::AddUser));

        state.dispatch(AppCommand::ExitToNav);
        assert_eq!(state.mode, AppMode::Nav);
    }

    #[test]
    fn theme_and_status() {
        let mut state = AppState::default();
        assert_eq!(
            state.dispatch(AppCommand::SetTheme(Theme::Light)),
            vec![AppEvent::ThemeChanged(Theme::Light)]
        );
        assert!(state.dispatch(AppCommand::SetTheme(Theme::Light)).is_empty());

        state.dispatch(AppCommand::SetStatus("saved".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("saved"));
        state.dispatch(AppCommand::ClearStatus);
        assert_eq!(state.status_line, None);
    }
}
