// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Built-in demo data. Collections start from here until storage has a
//! snapshot of its own.

use time::macros::{date, datetime};
use time::{Date, PrimitiveDateTime};

use crate::{
    ActionType, ActivityLog, ActivityLogId, ActivityStatus, Product, ProductId, ProductPlan,
    ProductProfile, ProductStatus, User, UserActivityEntry, UserId, UserProfile, UserRole,
    UserStatus,
};

fn user(
    id: i64,
    name: &str,
    email: &str,
    role: UserRole,
    status: UserStatus,
    created_at: Date,
    avatar: &str,
) -> User {
    User {
        id: UserId::new(id),
        name: name.to_owned(),
        email: email.to_owned(),
        role,
        status,
        created_at,
        avatar: avatar.to_owned(),
    }
}

pub fn users() -> Vec<User> {
    use UserRole::{Admin, Founder, Viewer};
    use UserStatus::{Active, Disabled};

    vec![
        user(1, "Sarah Chen", "sarah@founder.com", Founder, Active, date!(2024-01-15), "SC"),
        user(2, "Marcus Johnson", "marcus@founder.com", Admin, Active, date!(2024-02-20), "MJ"),
        user(3, "Emily Rodriguez", "emily@founder.com", Admin, Active, date!(2024-03-10), "ER"),
        user(4, "David Park", "david@founder.com", Viewer, Active, date!(2024-03-25), "DP"),
        user(5, "Jessica Lee", "jessica@founder.com", Viewer, Disabled, date!(2024-04-05), "JL"),
        user(6, "Robert Thompson", "robert@founder.com", Admin, Active, date!(2024-04-18), "RT"),
        user(7, "Amanda Wilson", "amanda@founder.com", Viewer, Active, date!(2024-05-02), "AW"),
        user(8, "Christopher Martin", "chris@founder.com", Founder, Active, date!(2024-05-15), "CM"),
        user(9, "Lisa Anderson", "lisa@founder.com", Viewer, Disabled, date!(2024-05-28), "LA"),
        user(10, "James Taylor", "james@founder.com", Admin, Active, date!(2024-06-10), "JT"),
    ]
}

fn product(
    id: i64,
    name: &str,
    plan: ProductPlan,
    status: ProductStatus,
    last_updated: Date,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        plan,
        status,
        last_updated,
    }
}

pub fn products() -> Vec<Product> {
    use ProductPlan::{Enterprise, Free, Pro};
    use ProductStatus::{Active, Paused};

    vec![
        product(1, "Dashboard Analytics", Pro, Active, date!(2024-06-10)),
        product(2, "API Client", Enterprise, Active, date!(2024-06-08)),
        product(3, "Mobile App", Pro, Paused, date!(2024-06-05)),
        product(4, "Billing Module", Free, Active, date!(2024-06-03)),
        product(5, "Documentation Portal", Free, Active, date!(2024-06-01)),
        product(6, "Admin Console", Enterprise, Active, date!(2024-05-28)),
        product(7, "Data Export", Pro, Active, date!(2024-05-25)),
        product(8, "Webhooks", Enterprise, Paused, date!(2024-05-22)),
        product(9, "Search Engine", Pro, Active, date!(2024-05-20)),
        product(10, "Integrations Hub", Enterprise, Active, date!(2024-05-18)),
    ]
}

fn log_entry(
    id: i64,
    action: &str,
    action_type: ActionType,
    performed_by: &str,
    target: &str,
    status: ActivityStatus,
    timestamp: PrimitiveDateTime,
) -> ActivityLog {
    ActivityLog {
        id: ActivityLogId::new(id),
        action: action.to_owned(),
        action_type,
        performed_by: performed_by.to_owned(),
        target: target.to_owned(),
        status,
        timestamp,
    }
}

pub fn activity_logs() -> Vec<ActivityLog> {
    use ActionType::*;
    use ActivityStatus::{Error, Pending, Success};

    vec![
        log_entry(
            1,
            "Created new user account",
            UserCreated,
            "Sarah Chen",
            "alex.johnson@example.com",
            Success,
            datetime!(2024-06-15 14:32),
        ),
        log_entry(
            2,
            "Updated product pricing tier",
            ProductUpdated,
            "Marcus Williams",
            "Dashboard Analytics Pro",
            Success,
            datetime!(2024-06-15 13:18),
        ),
        log_entry(
            3,
            "Deleted inactive user account",
            UserDeleted,
            "Sarah Chen",
            "john.doe@example.com",
            Success,
            datetime!(2024-06-15 12:45),
        ),
        log_entry(
            4,
            "Modified security settings",
            SettingsChanged,
            "Alex Liu",
            "Two-Factor Authentication",
            Pending,
            datetime!(2024-06-15 11:22),
        ),
        log_entry(
            5,
            "User login from new device",
            Login,
            "Emma Rodriguez",
            "Chrome on Windows",
            Success,
            datetime!(2024-06-15 10:15),
        ),
        log_entry(
            6,
            "Failed to create product variant",
            ProductCreated,
            "Marcus Williams",
            "Analytics API Client",
            Error,
            datetime!(2024-06-15 09:42),
        ),
        log_entry(
            7,
            "Updated user role and permissions",
            UserUpdated,
            "Sarah Chen",
            "james.smith@example.com",
            Success,
            datetime!(2024-06-14 16:30),
        ),
        log_entry(
            8,
            "Archived old product version",
            ProductUpdated,
            "Marcus Williams",
            "Mobile App v1.2",
            Success,
            datetime!(2024-06-14 15:08),
        ),
        log_entry(
            9,
            "Changed API rate limits",
            SettingsChanged,
            "Alex Liu",
            "API Configuration",
            Success,
            datetime!(2024-06-14 14:25),
        ),
        log_entry(
            10,
            "Bulk import of users failed",
            UserCreated,
            "Sarah Chen",
            "CSV Import (50 users)",
            Error,
            datetime!(2024-06-14 13:10),
        ),
        log_entry(
            11,
            "User login attempt",
            Login,
            "Jessica Park",
            "Safari on macOS",
            Success,
            datetime!(2024-06-14 12:05),
        ),
        log_entry(
            12,
            "Removed user from team",
            UserDeleted,
            "Sarah Chen",
            "michael.brown@example.com",
            Success,
            datetime!(2024-06-14 11:18),
        ),
    ]
}

fn recent_activity() -> Vec<UserActivityEntry> {
    [
        ("Updated profile settings", "2 hours ago", ActivityStatus::Success, "192.168.1.1"),
        ("Logged in from new device", "1 day ago", ActivityStatus::Success, "192.168.1.2"),
        ("Changed password", "3 days ago", ActivityStatus::Success, "192.168.1.1"),
        ("Failed login attempt", "1 week ago", ActivityStatus::Error, "203.0.113.0"),
    ]
    .into_iter()
    .map(|(action, when, status, ip_address)| UserActivityEntry {
        action: action.to_owned(),
        when: when.to_owned(),
        status,
        ip_address: ip_address.to_owned(),
    })
    .collect()
}

/// Extras shown on a user's detail page, when there are any.
pub fn user_profile(id: UserId) -> Option<UserProfile> {
    let (last_active, two_factor, last_login, devices) = match id.get() {
        1 => (
            "2 hours ago",
            true,
            "2026-02-04 10:30 AM",
            ["MacBook Pro (Chrome)", "iPhone 15 (Safari)"],
        ),
        2 => (
            "1 day ago",
            false,
            "2026-02-03 03:45 PM",
            ["Windows PC (Edge)", "Android (Chrome)"],
        ),
        _ => return None,
    };
    Some(UserProfile {
        last_active: last_active.to_owned(),
        auth_method: "Email & Password".to_owned(),
        two_factor,
        last_login: last_login.to_owned(),
        devices: devices.iter().map(|device| (*device).to_owned()).collect(),
        recent_activity: recent_activity(),
    })
}

pub fn product_profile(id: ProductId) -> Option<ProductProfile> {
    let (created_at, description, version, features) = match id.get() {
        1 => (
            date!(2024-01-20),
            "Comprehensive analytics dashboard for real-time data visualization and insights.",
            "2.3.1",
            ["Real-time charts", "Custom dashboards", "Data export", "API access"],
        ),
        2 => (
            date!(2024-02-15),
            "Enterprise-grade REST API client with advanced authentication and rate limiting.",
            "3.1.0",
            ["OAuth 2.0 support", "Rate limiting", "Webhook support", "API versioning"],
        ),
        3 => (
            date!(2024-03-10),
            "Cross-platform mobile application for iOS and Android with offline support.",
            "1.8.2",
            ["iOS support", "Android support", "Offline mode", "Push notifications"],
        ),
        _ => return None,
    };
    Some(ProductProfile {
        created_at,
        description: description.to_owned(),
        version: version.to_owned(),
        features: features.iter().map(|feature| (*feature).to_owned()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{activity_logs, product_profile, products, user_profile, users};
    use crate::{ProductId, UserId};

    #[test]
    fn ids_are_unique() {
        let user_ids: HashSet<_> = users().iter().map(|user| user.id).collect();
        assert_eq!(user_ids.len(), users().len());
        let product_ids: HashSet<_> = products().iter().map(|product| product.id).collect();
        assert_eq!(product_ids.len(), products().len());
        assert_eq!(activity_logs().len(), 12);
    }

    #[test]
    fn profiles_exist_for_a_subset() {
        assert!(user_profile(UserId::new(1)).is_some());
        assert!(user_profile(UserId::new(7)).is_none());
        assert_eq!(
            product_profile(ProductId::new(3)).map(|profile| profile.version),
            Some("1.8.2".to_owned())
        );
        assert!(product_profile(ProductId::new(10)).is_none());
    }
}
