// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use log::info;

use crate::{DetailRoute, Product, ProductId, ProductProfile, User, UserId, UserProfile, seed};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserDetail<'a> {
    Found {
        user: &'a User,
        profile: Option<UserProfile>,
    },
    NotFound(UserId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductDetail<'a> {
    Found {
        product: &'a Product,
        profile: Option<ProductProfile>,
    },
    NotFound(ProductId),
}

/// Looks `id` up in the live collection, so edits made on the list page
/// show up here.
pub fn user_detail(users: &[User], id: UserId) -> UserDetail<'_> {
    match users.iter().find(|user| user.id == id) {
        Some(user) => UserDetail::Found {
            user,
            profile: seed::user_profile(id),
        },
        None => UserDetail::NotFound(id),
    }
}

pub fn product_detail(products: &[Product], id: ProductId) -> ProductDetail<'_> {
    match products.iter().find(|product| product.id == id) {
        Some(product) => ProductDetail::Found {
            product,
            profile: seed::product_profile(id),
        },
        None => ProductDetail::NotFound(id),
    }
}

/// Buttons on a detail page. None of them change data yet; each request is
/// logged and acknowledged on the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    EditRole,
    DisableUser,
    ResetPassword,
    EditProduct,
    ToggleStatus,
    DeleteProduct,
}

impl DetailAction {
    pub const USER: [Self; 3] = [Self::EditRole, Self::DisableUser, Self::ResetPassword];
    pub const PRODUCT: [Self; 3] = [Self::EditProduct, Self::ToggleStatus, Self::DeleteProduct];

    pub fn for_route(route: DetailRoute) -> &'static [Self] {
        match route {
            DetailRoute::User(_) => &Self::USER,
            DetailRoute::Product(_) => &Self::PRODUCT,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::EditRole => "Edit role",
            Self::DisableUser => "Disable user",
            Self::ResetPassword => "Reset password",
            Self::EditProduct => "Edit",
            Self::ToggleStatus => "Toggle status",
            Self::DeleteProduct => "Delete",
        }
    }

    /// Logs the request for `name` and returns the status message.
    pub fn request(self, route: DetailRoute, name: &str) -> String {
        let subject = match route {
            DetailRoute::User(id) => format!("user {id}"),
            DetailRoute::Product(id) => format!("product {id}"),
        };
        let verb = self.label().to_lowercase();
        info!("{verb} requested from detail page of {subject} ({name})");
        format!("{verb} for {name} is not available yet")
    }
}

#[cfg(test)]
mod tests {
    use super::{DetailAction, ProductDetail, UserDetail, product_detail, user_detail};
    use crate::{DetailRoute, ProductId, ProductStatus, UserId, seed};

    #[test]
    fn user_lookup() {
        let users = seed::users();
        match user_detail(&users, UserId::new(1)) {
            UserDetail::Found { user, profile } => {
                assert_eq!(user.name, "Sarah Chen");
                assert!(profile.is_some_and(|profile| profile.two_factor));
            }
            UserDetail::NotFound(id) => panic!("user {id} should exist"),
        }
        assert!(matches!(
            user_detail(&users, UserId::new(6)),
            UserDetail::Found { profile: None, .. }
        ));
        assert_eq!(
            user_detail(&users, UserId::new(99)),
            UserDetail::NotFound(UserId::new(99))
        );
    }

    #[test]
    fn product_lookup_reflects_live_status() {
        let mut products = seed::products();
        products[0].status = ProductStatus::Paused;
        match product_detail(&products, ProductId::new(1)) {
            ProductDetail::Found { product, profile } => {
                assert_eq!(product.status, ProductStatus::Paused);
                assert_eq!(profile.map(|profile| profile.version), Some("2.3.1".to_owned()));
            }
            ProductDetail::NotFound(id) => panic!("product {id} should exist"),
        }
        assert_eq!(
            product_detail(&products, ProductId::new(0)),
            ProductDetail::NotFound(ProductId::new(0))
        );
    }

    #[test]
    fn detail_actions_follow_the_route() {
        let user = DetailRoute::User(UserId::new(1));
        let labels: Vec<&str> = DetailAction::for_route(user)
            .iter()
            .map(|action| action.label())
            .collect();
        assert_eq!(labels, vec!["Edit role", "Disable user", "Reset password"]);

        let product = DetailRoute::Product(ProductId::new(2));
        assert_eq!(DetailAction::for_route(product), &DetailAction::PRODUCT);
        assert_eq!(
            DetailAction::DeleteProduct.request(product, "API Client"),
            "delete for API Client is not available yet"
        );
        assert_eq!(
            DetailAction::ResetPassword.request(user, "Sarah Chen"),
            "reset password for Sarah Chen is not available yet"
        );
    }
}
