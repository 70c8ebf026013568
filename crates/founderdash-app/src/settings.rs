// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use founderdash_table::{SelectField, SelectOption};
use log::info;

use crate::storage::{self, RecordStorage, SETTINGS_KEY};
use crate::{DefaultRole, Settings, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    OrganizationName,
    DefaultRole,
    EmailNotifications,
    WeeklySummary,
    TwoFactorAuth,
    Theme,
}

impl SettingsField {
    pub const ALL: [Self; 6] = [
        Self::OrganizationName,
        Self::DefaultRole,
        Self::EmailNotifications,
        Self::WeeklySummary,
        Self::TwoFactorAuth,
        Self::Theme,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::OrganizationName => "Organization name",
            Self::DefaultRole => "Default role",
            Self::EmailNotifications => "Email notifications",
            Self::WeeklySummary => "Weekly summary",
            Self::TwoFactorAuth => "Two-factor authentication",
            Self::Theme => "Theme",
        }
    }

    pub const fn is_toggle(self) -> bool {
        matches!(
            self,
            Self::EmailNotifications | Self::WeeklySummary | Self::TwoFactorAuth
        )
    }
}

fn role_field() -> SelectField {
    SelectField::new(
        "default_role",
        SettingsField::DefaultRole.label(),
        DefaultRole::ALL
            .into_iter()
            .map(|role| SelectOption::new(role.as_str(), role.label()))
            .collect(),
    )
}

fn theme_field() -> SelectField {
    SelectField::new(
        "theme",
        SettingsField::Theme.label(),
        Theme::ALL
            .into_iter()
            .map(|theme| SelectOption::new(theme.as_str(), theme.label()))
            .collect(),
    )
}

/// Editable copy of the organization settings plus the last saved copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPage {
    settings: Settings,
    saved: Settings,
    role_field: SelectField,
    theme_field: SelectField,
}

impl SettingsPage {
    pub fn new(settings: Settings) -> Self {
        Self {
            saved: settings.clone(),
            settings,
            role_field: role_field(),
            theme_field: theme_field(),
        }
    }

    /// Re-measures both dropdown gaps, e.g. in terminal cells.
    pub fn with_select_gap(mut self, gap: i32) -> Self {
        self.role_field = self.role_field.with_gap(gap);
        self.theme_field = self.theme_field.with_gap(gap);
        self
    }

    pub fn load(storage: &dyn RecordStorage) -> Self {
        Self::new(storage::load_or_seed(storage, SETTINGS_KEY, Settings::default))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_dirty(&self) -> bool {
        self.settings != self.saved
    }

    pub fn role_field(&self) -> &SelectField {
        &self.role_field
    }

    pub fn theme_field(&self) -> &SelectField {
        &self.theme_field
    }

    /// The dropdown backing `field`, if it is a select.
    pub fn select_field_mut(&mut self, field: SettingsField) -> Option<&mut SelectField> {
        match field {
            SettingsField::DefaultRole => Some(&mut self.role_field),
            SettingsField::Theme => Some(&mut self.theme_field),
            _ => None,
        }
    }

    pub fn select_field(&self, field: SettingsField) -> Option<&SelectField> {
        match field {
            SettingsField::DefaultRole => Some(&self.role_field),
            SettingsField::Theme => Some(&self.theme_field),
            _ => None,
        }
    }

    /// Closes every open dropdown.
    pub fn close_selects(&mut self) {
        self.role_field.close();
        self.theme_field.close();
    }

    /// Current raw value of a select-backed field.
    pub fn value(&self, field: SettingsField) -> String {
        match field {
            SettingsField::OrganizationName => self.settings.organization_name.clone(),
            SettingsField::DefaultRole => self.settings.default_role.as_str().to_owned(),
            SettingsField::EmailNotifications => self.settings.email_notifications.to_string(),
            SettingsField::WeeklySummary => self.settings.weekly_summary.to_string(),
            SettingsField::TwoFactorAuth => self.settings.two_factor_auth.to_string(),
            SettingsField::Theme => self.settings.theme.as_str().to_owned(),
        }
    }

    pub fn set_organization_name(&mut self, name: impl Into<String>) {
        self.settings.organization_name = name.into();
    }

    /// Flips a boolean setting and returns its new value.
    pub fn toggle(&mut self, field: SettingsField) -> Result<bool> {
        let flag = match field {
            SettingsField::EmailNotifications => &mut self.settings.email_notifications,
            SettingsField::WeeklySummary => &mut self.settings.weekly_summary,
            SettingsField::TwoFactorAuth => &mut self.settings.two_factor_auth,
            other => bail!("{} is not an on/off setting", other.label()),
        };
        *flag = !*flag;
        Ok(*flag)
    }

    pub fn set_default_role(&mut self, value: &str) -> Result<DefaultRole> {
        let Some(role) = DefaultRole::parse(value) else {
            bail!("unknown default role `{value}` -- choose viewer or admin");
        };
        self.settings.default_role = role;
        Ok(role)
    }

    /// Applies immediately; the caller repaints with the new palette.
    pub fn set_theme(&mut self, value: &str) -> Result<Theme> {
        let Some(theme) = Theme::parse(value) else {
            bail!("unknown theme `{value}` -- choose light, dark, or system");
        };
        self.settings.theme = theme;
        Ok(theme)
    }

    /// Applies a value picked from one of the dropdowns.
    pub fn apply_choice(&mut self, field: SettingsField, value: &str) -> Result<()> {
        match field {
            SettingsField::DefaultRole => self.set_default_role(value).map(drop),
            SettingsField::Theme => self.set_theme(value).map(drop),
            other => bail!("{} has no options to choose from", other.label()),
        }
    }

    /// Best effort: a failed write is logged and reported as false.
    pub fn save(&mut self, storage: &dyn RecordStorage) -> bool {
        if !storage::sync(storage, SETTINGS_KEY, &self.settings) {
            return false;
        }
        info!("saved settings for {}", self.settings.organization_name);
        self.saved = self.settings.clone();
        true
    }
}
