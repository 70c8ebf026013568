// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{ActivityLog, ActivityStatus, Product, ProductStatus, User, UserStatus};

/// How many log lines the overview lists.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardCounts {
    pub total_users: usize,
    pub active_users: usize,
    pub active_products: usize,
    pub paused_products: usize,
    pub errors: usize,
    pub pending: usize,
}

impl DashboardCounts {
    pub fn compute(users: &[User], products: &[Product], logs: &[ActivityLog]) -> Self {
        let count_logs =
            |status: ActivityStatus| logs.iter().filter(|log| log.status == status).count();
        Self {
            total_users: users.len(),
            active_users: users
                .iter()
                .filter(|user| user.status == UserStatus::Active)
                .count(),
            active_products: products
                .iter()
                .filter(|product| product.status == ProductStatus::Active)
                .count(),
            paused_products: products
                .iter()
                .filter(|product| product.status == ProductStatus::Paused)
                .count(),
            errors: count_logs(ActivityStatus::Error),
            pending: count_logs(ActivityStatus::Pending),
        }
    }
}

/// Newest entries first, as the log is stored.
pub fn recent_activity(logs: &[ActivityLog]) -> &[ActivityLog] {
    &logs[..logs.len().min(RECENT_ACTIVITY_LIMIT)]
}

#[cfg(test)]
mod tests {
    use super::{DashboardCounts, recent_activity};
    use crate::seed;

    #[test]
    fn counts_from_seed() {
        let logs = seed::activity_logs();
        let counts = DashboardCounts::compute(&seed::users(), &seed::products(), &logs);
        assert_eq!(
            counts,
            DashboardCounts {
                total_users: 10,
                active_users: 8,
                active_products: 8,
                paused_products: 2,
                errors: 2,
                pending: 1,
            }
        );
        assert_eq!(recent_activity(&logs).len(), 5);
        assert!(recent_activity(&[]).is_empty());
    }
}
