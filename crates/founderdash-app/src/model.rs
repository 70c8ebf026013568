// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::borrow::Cow;

use founderdash_table::TableRecord;
use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};

use crate::ids::*;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

pub fn format_date(date: Date) -> String {
    date.format(time::macros::format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

pub fn format_timestamp(timestamp: PrimitiveDateTime) -> String {
    timestamp
        .format(time::macros::format_description!(
            "[year]-[month]-[day] [hour]:[minute]"
        ))
        .unwrap_or_else(|_| timestamp.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Founder,
    Admin,
    Viewer,
}

impl UserRole {
    pub const ALL: [Self; 3] = [Self::Founder, Self::Admin, Self::Viewer];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Founder => "Founder",
            Self::Admin => "Admin",
            Self::Viewer => "Viewer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Founder" => Some(Self::Founder),
            "Admin" => Some(Self::Admin),
            "Viewer" => Some(Self::Viewer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Disabled,
}

impl UserStatus {
    pub const ALL: [Self; 2] = [Self::Active, Self::Disabled];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Disabled => "Disabled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Active" => Some(Self::Active),
            "Disabled" => Some(Self::Disabled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductPlan {
    Free,
    Pro,
    Enterprise,
}

impl ProductPlan {
    pub const ALL: [Self; 3] = [Self::Free, Self::Pro, Self::Enterprise];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Pro => "Pro",
            Self::Enterprise => "Enterprise",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Free" => Some(Self::Free),
            "Pro" => Some(Self::Pro),
            "Enterprise" => Some(Self::Enterprise),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    Active,
    Paused,
}

impl ProductStatus {
    pub const ALL: [Self; 2] = [Self::Active, Self::Paused];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Paused => "Paused",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Active" => Some(Self::Active),
            "Paused" => Some(Self::Paused),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Paused,
            Self::Paused => Self::Active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityStatus {
    Success,
    Error,
    Pending,
}

impl ActivityStatus {
    pub const ALL: [Self; 3] = [Self::Success, Self::Error, Self::Pending];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Error => "Error",
            Self::Pending => "Pending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionType {
    UserCreated,
    UserUpdated,
    UserDeleted,
    ProductCreated,
    ProductUpdated,
    ProductDeleted,
    SettingsChanged,
    Login,
}

impl ActionType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserCreated => "User Created",
            Self::UserUpdated => "User Updated",
            Self::UserDeleted => "User Deleted",
            Self::ProductCreated => "Product Created",
            Self::ProductUpdated => "Product Updated",
            Self::ProductDeleted => "Product Deleted",
            Self::SettingsChanged => "Settings Changed",
            Self::Login => "Login",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    #[serde(with = "iso_date")]
    pub created_at: Date,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub plan: ProductPlan,
    pub status: ProductStatus,
    #[serde(with = "iso_date")]
    pub last_updated: Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLog {
    pub id: ActivityLogId,
    pub action: String,
    pub action_type: ActionType,
    pub performed_by: String,
    pub target: String,
    pub status: ActivityStatus,
    pub timestamp: PrimitiveDateTime,
}

impl TableRecord for User {
    fn record_id(&self) -> String {
        self.id.to_string()
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "name" => Some(Cow::Borrowed(&self.name)),
            "email" => Some(Cow::Borrowed(&self.email)),
            "role" => Some(Cow::Borrowed(self.role.as_str())),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "created_at" => Some(Cow::Owned(format_date(self.created_at))),
            _ => None,
        }
    }
}

impl TableRecord for Product {
    fn record_id(&self) -> String {
        self.id.to_string()
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "name" => Some(Cow::Borrowed(&self.name)),
            "plan" => Some(Cow::Borrowed(self.plan.as_str())),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "last_updated" => Some(Cow::Owned(format_date(self.last_updated))),
            _ => None,
        }
    }
}

impl TableRecord for ActivityLog {
    fn record_id(&self) -> String {
        self.id.to_string()
    }

    fn display_name(&self) -> String {
        self.action.clone()
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "action" => Some(Cow::Borrowed(&self.action)),
            "action_type" => Some(Cow::Borrowed(self.action_type.as_str())),
            "performed_by" => Some(Cow::Borrowed(&self.performed_by)),
            "target" => Some(Cow::Borrowed(&self.target)),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "timestamp" => Some(Cow::Owned(format_timestamp(self.timestamp))),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserActivityEntry {
    pub action: String,
    pub when: String,
    pub status: ActivityStatus,
    pub ip_address: String,
}

/// Detail-page extras that only some users have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub last_active: String,
    pub auth_method: String,
    pub two_factor: bool,
    pub last_login: String,
    pub devices: Vec<String>,
    pub recent_activity: Vec<UserActivityEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductProfile {
    pub created_at: Date,
    pub description: String,
    pub version: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultRole {
    Viewer,
    Admin,
}

impl DefaultRole {
    pub const ALL: [Self; 2] = [Self::Viewer, Self::Admin];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Admin => "admin",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Viewer => "Viewer",
            Self::Admin => "Admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "viewer" => Some(Self::Viewer),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
    System,
}

impl Theme {
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::System];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::System => "System",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub organization_name: String,
    pub default_role: DefaultRole,
    pub email_notifications: bool,
    pub weekly_summary: bool,
    pub two_factor_auth: bool,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            organization_name: "Acme Corporation".to_owned(),
            default_role: DefaultRole::Viewer,
            email_notifications: true,
            weekly_summary: true,
            two_factor_auth: false,
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKind {
    Dashboard,
    Users,
    Products,
    Activity,
    Settings,
}

impl TabKind {
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Users,
        Self::Products,
        Self::Activity,
        Self::Settings,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Users => "users",
            Self::Products => "products",
            Self::Activity => "activity",
            Self::Settings => "settings",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.label() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    AddUser,
    AddProduct,
}

impl FormKind {
    pub const fn title(self) -> &'static str {
        match self {
            Self::AddUser => "Add user",
            Self::AddProduct => "Add product",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Nav,
    Search,
    Form(FormKind),
}

/// A detail page reached from a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailRoute {
    User(UserId),
    Product(ProductId),
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{
        ProductStatus, Settings, TabKind, Theme, User, UserId, UserRole, UserStatus,
    };
    use founderdash_table::TableRecord;

    #[test]
    fn tab_labels_round_trip() {
        for tab in TabKind::ALL {
            assert_eq!(TabKind::parse(tab.label()), Some(tab));
        }
        assert_eq!(TabKind::parse("house"), None);
    }

    #[test]
    fn product_status_toggles() {
        assert_eq!(ProductStatus::Active.toggled(), ProductStatus::Paused);
        assert_eq!(ProductStatus::Paused.toggled(), ProductStatus::Active);
    }

    #[test]
    fn user_serializes_with_iso_dates() -> anyhow::Result<()> {
        let user = User {
            id: UserId::new(1),
            name: "Sarah Chen".to_owned(),
            email: "sarah@founder.com".to_owned(),
            role: UserRole::Founder,
            status: UserStatus::Active,
            created_at: date!(2024 - 01 - 15),
            avatar: "SC".to_owned(),
        };
        let json = serde_json::to_string(&user)?;
        assert!(json.contains("\"created_at\":\"2024-01-15\""));
        assert_eq!(serde_json::from_str::<User>(&json)?, user);
        assert_eq!(user.field("role").as_deref(), Some("Founder"));
        assert_eq!(user.field("created_at").as_deref(), Some("2024-01-15"));
        Ok(())
    }

    #[test]
    fn settings_fill_missing_fields_with_defaults() -> anyhow::Result<()> {
        let settings: Settings = serde_json::from_str(r#"{"theme":"light"}"#)?;
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.organization_name, "Acme Corporation");
        Ok(())
    }
}
