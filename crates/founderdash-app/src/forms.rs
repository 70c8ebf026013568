// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use time::Date;

use crate::{
    FormKind, Product, ProductId, ProductPlan, ProductStatus, User, UserId, UserRole, UserStatus,
};

const MIN_NAME_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFormInput {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFormInput {
    pub name: String,
    pub plan: ProductPlan,
    pub status: ProductStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPayload {
    User(UserFormInput),
    Product(ProductFormInput),
}

impl FormPayload {
    pub fn kind(&self) -> FormKind {
        match self {
            Self::User(_) => FormKind::AddUser,
            Self::Product(_) => FormKind::AddProduct,
        }
    }

    pub fn blank_for(kind: FormKind) -> Self {
        match kind {
            FormKind::AddUser => Self::User(UserFormInput {
                name: String::new(),
                email: String::new(),
                role: UserRole::Viewer,
                status: UserStatus::Active,
            }),
            FormKind::AddProduct => Self::Product(ProductFormInput {
                name: String::new(),
                plan: ProductPlan::Free,
                status: ProductStatus::Active,
            }),
        }
    }
}

fn validate_name(name: &str, what: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        bail!("{what} is required -- enter a name and retry");
    }
    if trimmed.chars().count() < MIN_NAME_CHARS {
        bail!("{what} must be at least {MIN_NAME_CHARS} characters");
    }
    Ok(())
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}

/// Up to two uppercase initials, one per word.
pub fn avatar_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

impl UserFormInput {
    pub fn validate(&self, existing: &[User]) -> Result<()> {
        validate_name(&self.name, "name")?;
        let email = self.email.as_str();
        if email.trim().is_empty() {
            bail!("email is required -- enter an email address and retry");
        }
        if !is_valid_email(email) {
            bail!("invalid email address `{email}` -- use the form name@example.com");
        }
        if existing
            .iter()
            .any(|user| user.email.eq_ignore_ascii_case(email))
        {
            bail!("email `{email}` is already in use -- choose another address");
        }
        Ok(())
    }

    /// Builds the record the form describes. Does not validate.
    pub fn into_user(self, id: UserId, today: Date) -> User {
        let name = self.name.trim().to_owned();
        User {
            id,
            avatar: avatar_initials(&name),
            name,
            email: self.email.trim().to_owned(),
            role: self.role,
            status: self.status,
            created_at: today,
        }
    }
}

impl ProductFormInput {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name, "product name")
    }

    pub fn into_product(self, id: ProductId, today: Date) -> Product {
        Product {
            id,
            name: self.name.trim().to_owned(),
            plan: self.plan,
            status: self.status,
            last_updated: today,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{
        FormPayload, ProductFormInput, UserFormInput, avatar_initials, is_valid_email,
    };
    use crate::{FormKind, ProductPlan, ProductStatus, UserId, UserRole, UserStatus, seed};

    fn user_input(name: &str, email: &str) -> UserFormInput {
        UserFormInput {
            name: name.to_owned(),
            email: email.to_owned(),
            role: UserRole::Viewer,
            status: UserStatus::Active,
        }
    }

    #[test]
    fn blank_forms_carry_defaults() {
        assert_eq!(
            FormPayload::blank_for(FormKind::AddUser),
            FormPayload::User(user_input("", ""))
        );
        let FormPayload::Product(product) = FormPayload::blank_for(FormKind::AddProduct) else {
            panic!("product form expected");
        };
        assert_eq!(product.plan, ProductPlan::Free);
        assert_eq!(product.status, ProductStatus::Active);
        assert_eq!(
            FormPayload::blank_for(FormKind::AddProduct).kind(),
            FormKind::AddProduct
        );
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("nina@example.com"));
        assert!(is_valid_email("a.b@c.d.e"));
        assert!(!is_valid_email("nina@example"));
        assert!(!is_valid_email("nina@.com"));
        assert!(!is_valid_email("nina@example."));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("nina@@example.com"));
        assert!(!is_valid_email("ni na@example.com"));
    }

    #[test]
    fn user_validation() {
        let existing = seed::users();
        assert!(user_input("", "x@y.io").validate(&existing).is_err());
        assert!(user_input(" N ", "x@y.io").validate(&existing).is_err());
        assert!(user_input("Nina", "").validate(&existing).is_err());
        assert!(user_input("Nina", "nina").validate(&existing).is_err());
        assert!(
            user_input("Nina", "SARAH@founder.com")
                .validate(&existing)
                .is_err()
        );
        assert!(user_input("Nina", "nina@founder.com").validate(&existing).is_ok());
    }

    #[test]
    fn email_is_checked_as_typed() {
        let existing = seed::users();
        let error = user_input("Nina", " nina@founder.com")
            .validate(&existing)
            .expect_err("leading space should fail");
        assert!(error.to_string().contains("invalid email address"));
        assert!(user_input("Nina", "nina@founder.com ").validate(&existing).is_err());
        let error = user_input("Nina", "   ")
            .validate(&existing)
            .expect_err("blank email should fail");
        assert!(error.to_string().contains("email is required"));
    }

    #[test]
    fn new_user_gets_initials_and_date() {
        let user = user_input("  nina de  souza ", " nina@founder.com ")
            .into_user(UserId::new(11), date!(2026 - 10 - 19));
        assert_eq!(user.name, "nina de  souza");
        assert_eq!(user.avatar, "ND");
        assert_eq!(user.email, "nina@founder.com");
        assert_eq!(user.created_at, date!(2026 - 10 - 19));
        assert_eq!(avatar_initials("Cher"), "C");
    }

    #[test]
    fn product_validation() {
        let short = ProductFormInput {
            name: "X".to_owned(),
            plan: ProductPlan::Pro,
            status: ProductStatus::Paused,
        };
        assert!(short.validate().is_err());
        let ok = ProductFormInput {
            name: "Status Page".to_owned(),
            ..short
        };
        assert!(ok.validate().is_ok());
    }
}
