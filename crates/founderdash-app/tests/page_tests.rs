// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use founderdash_app::activity::{ActivityPage, action_type_options};
use founderdash_app::forms::{ProductFormInput, UserFormInput};
use founderdash_app::pages::{DEFAULT_PAGE_SIZE, PageEffect};
use founderdash_app::products::{ProductAction, ProductsPage};
use founderdash_app::storage::{PRODUCTS_KEY, RecordStorage, USERS_KEY, decode};
use founderdash_app::users::{UserAction, UsersPage};
use founderdash_app::{
    ActionType, ActivityStatus, DetailRoute, Product, ProductId, ProductPlan, ProductStatus, User,
    UserId, UserRole, UserStatus, seed,
};
use founderdash_table::{ALL, AnchorRect, RowRegion, RowTarget, TableCommand};
use founderdash_testkit::{FailingStorage, MemoryStorage, activity, members, product, user};
use time::macros::date;

fn seeded_users() -> UsersPage {
    UsersPage::new(seed::users(), DEFAULT_PAGE_SIZE)
}

fn seeded_products() -> ProductsPage {
    ProductsPage::new(seed::products(), DEFAULT_PAGE_SIZE)
}

fn user_input(name: &str, email: &str) -> UserFormInput {
    UserFormInput {
        name: name.to_owned(),
        email: email.to_owned(),
        role: UserRole::Viewer,
        status: UserStatus::Active,
    }
}

fn open_menu<A>(id: &str, name: &str) -> TableCommand<A> {
    TableCommand::ToggleRowMenu {
        target: RowTarget::new(id, name),
        anchor: AnchorRect::new(70, 6, 3, 1),
    }
}

#[test]
fn user_search_matches_name_or_email() -> Result<()> {
    let storage = MemoryStorage::default();
    let mut users = seeded_users();
    users.dispatch(&storage, TableCommand::Search("JAMES@".to_owned()))?;
    let names: Vec<&str> = users.filtered().iter().map(|user| user.name.as_str()).collect();
    assert_eq!(names, vec!["James Taylor"]);
    assert_eq!(storage.saves(), 0);
    Ok(())
}

#[test]
fn user_role_and_status_filters_combine() -> Result<()> {
    let storage = MemoryStorage::default();
    let mut users = seeded_users();
    for (filter, value) in [("role", "Viewer"), ("status", "Disabled")] {
        users.dispatch(
            &storage,
            TableCommand::SelectFilter {
                filter: filter.to_owned(),
                value: value.to_owned(),
            },
        )?;
    }
    let ids: Vec<i64> = users.filtered().iter().map(|user| user.id.get()).collect();
    assert_eq!(ids, vec![5, 9]);

    users.dispatch(
        &storage,
        TableCommand::SelectFilter {
            filter: "role".to_owned(),
            value: ALL.to_owned(),
        },
    )?;
    assert_eq!(users.filtered().len(), 2);
    Ok(())
}

#[test]
fn user_row_click_and_view_navigate() -> Result<()> {
    let storage = MemoryStorage::default();
    let mut users = seeded_users();
    let effects = users.dispatch(
        &storage,
        TableCommand::ClickRow {
            target: RowTarget::new("2", "Marcus Johnson"),
            region: RowRegion::Body,
        },
    )?;
    assert_eq!(
        effects,
        vec![PageEffect::Navigate(DetailRoute::User(UserId::new(2)))]
    );

    users.dispatch(&storage, open_menu("3", "Emily Rodriguez"))?;
    let effects = users.dispatch(&storage, TableCommand::ChooseRowAction(UserAction::View))?;
    assert_eq!(
        effects,
        vec![PageEffect::Navigate(DetailRoute::User(UserId::new(3)))]
    );
    Ok(())
}

#[test]
fn disable_persists_and_keeps_page() -> Result<()> {
    let storage = MemoryStorage::default();
    let mut users = seeded_users();
    users.dispatch(&storage, TableCommand::ChangePage(2))?;
    users.dispatch(&storage, open_menu("7", "Amanda Wilson"))?;
    let effects = users.dispatch(&storage, TableCommand::ChooseRowAction(UserAction::Disable))?;
    assert_eq!(
        effects,
        vec![PageEffect::Status("Amanda Wilson disabled".to_owned())]
    );
    assert_eq!(users.table().page(), 2);
    assert_eq!(
        users.find(UserId::new(7)).map(|user| user.status),
        Some(UserStatus::Disabled)
    );

    let stored = storage.load(USERS_KEY)?.expect("users persisted");
    let stored: Vec<User> = decode(USERS_KEY, &stored)?;
    assert_eq!(stored.len(), 10);
    assert!(
        stored
            .iter()
            .any(|user| user.id == UserId::new(7) && user.status == UserStatus::Disabled)
    );
    Ok(())
}

#[test]
fn disabling_on_the_last_page_writes_once() -> Result<()> {
    let storage = MemoryStorage::default();
    let mut users = UsersPage::new(members(12), DEFAULT_PAGE_SIZE);
    users.dispatch(&storage, TableCommand::ChangePage(3))?;
    let on_page: Vec<i64> = users.view().rows.iter().map(|user| user.id.get()).collect();
    assert_eq!(on_page, vec![11, 12]);

    users.dispatch(&storage, open_menu("12", "Member 12"))?;
    users.dispatch(&storage, TableCommand::ChooseRowAction(UserAction::Disable))?;
    assert_eq!(users.table().page(), 3);
    assert_eq!(storage.saves(), 1);

    users.dispatch(&storage, open_menu("404", "Ghost"))?;
    let effects = users.dispatch(&storage, TableCommand::ChooseRowAction(UserAction::Disable))?;
    assert_eq!(
        effects,
        vec![PageEffect::Status("user 404 no longer exists".to_owned())]
    );
    assert_eq!(storage.saves(), 1);
    Ok(())
}

#[test]
fn add_user_prepends_with_next_id() -> Result<()> {
    let storage = MemoryStorage::default();
    let mut users = UsersPage::new(
        vec![
            user(3, "Ada Byron", UserRole::Founder, UserStatus::Active),
            user(8, "Grace Hopper", UserRole::Admin, UserStatus::Active),
        ],
        DEFAULT_PAGE_SIZE,
    );
    let today = date!(2026 - 10 - 19);
    let id = users.add(&storage, user_input("Nina Souza", "nina@founder.com"), today)?;
    assert_eq!(id, UserId::new(9));
    let first = &users.records()[0];
    assert_eq!(first.id, id);
    assert_eq!(first.avatar, "NS");
    assert_eq!(first.role, UserRole::Viewer);
    assert_eq!(first.created_at, today);
    assert_eq!(storage.saves(), 1);

    assert!(
        users
            .add(&storage, user_input("Other", "NINA@founder.com"), today)
            .is_err()
    );
    assert!(
        users
            .add(&storage, user_input("Ada Again", "ADA.BYRON@acme.test"), today)
            .is_err()
    );
    assert_eq!(users.records().len(), 3);
    Ok(())
}

#[test]
fn users_load_uses_snapshot_and_survives_failures() -> Result<()> {
    let storage = MemoryStorage::default();
    let mut first = UsersPage::load(&storage, DEFAULT_PAGE_SIZE);
    first.add(
        &storage,
        user_input("Nina Souza", "nina@founder.com"),
        date!(2026 - 10 - 19),
    )?;

    let reloaded = UsersPage::load(&storage, DEFAULT_PAGE_SIZE);
    assert_eq!(reloaded.records().len(), 11);

    storage.save(USERS_KEY, "not json")?;
    assert_eq!(UsersPage::load(&storage, DEFAULT_PAGE_SIZE).records().len(), 10);

    let failing = FailingStorage;
    let mut offline = UsersPage::load(&failing, DEFAULT_PAGE_SIZE);
    assert_eq!(offline.records().len(), 10);
    assert!(offline.disable(&failing, UserId::new(1)));
    Ok(())
}

#[test]
fn toggle_on_second_filtered_page_keeps_page() -> Result<()> {
    let storage = MemoryStorage::default();
    let mut products = seeded_products();
    products.dispatch(&storage, TableCommand::Search("a".to_owned()))?;
    assert_eq!(products.filtered().len(), 8);
    products.dispatch(&storage, TableCommand::NextPage)?;
    assert_eq!(products.table().page(), 2);

    let on_page: Vec<i64> = products.view().rows.iter().map(|p| p.id.get()).collect();
    assert_eq!(on_page, vec![7, 9, 10]);

    products.dispatch(&storage, open_menu("9", "Search Engine"))?;
    let effects = products.dispatch(
        &storage,
        TableCommand::ChooseRowAction(ProductAction::ToggleStatus),
    )?;
    assert_eq!(
        effects,
        vec![PageEffect::Status("Search Engine is now Paused".to_owned())]
    );
    assert_eq!(products.table().page(), 2);
    products.view();
    assert_eq!(products.table().page(), 2);
    Ok(())
}

#[test]
fn toggle_round_trips_and_persists() -> Result<()> {
    let storage = MemoryStorage::default();
    let mut products = ProductsPage::new(
        vec![
            product(1, "Ledger", ProductPlan::Pro, ProductStatus::Active),
            product(2, "Inbox", ProductPlan::Free, ProductStatus::Paused),
        ],
        DEFAULT_PAGE_SIZE,
    );
    let id = ProductId::new(1);
    assert_eq!(products.toggle_status(&storage, id), Some(ProductStatus::Paused));
    assert_eq!(products.toggle_status(&storage, id), Some(ProductStatus::Active));
    assert_eq!(products.toggle_status(&storage, ProductId::new(404)), None);
    assert_eq!(storage.saves(), 2);

    let stored = storage.load(PRODUCTS_KEY)?.expect("products persisted");
    let stored: Vec<Product> = decode(PRODUCTS_KEY, &stored)?;
    assert_eq!(stored[0].status, ProductStatus::Active);
    assert_eq!(stored[1].status, ProductStatus::Paused);
    Ok(())
}

#[test]
fn plan_filter_and_logged_actions() -> Result<()> {
    let storage = MemoryStorage::default();
    let mut products = seeded_products();
    products.dispatch(
        &storage,
        TableCommand::SelectFilter {
            filter: "plan".to_owned(),
            value: "Enterprise".to_owned(),
        },
    )?;
    let ids: Vec<i64> = products.filtered().iter().map(|p| p.id.get()).collect();
    assert_eq!(ids, vec![2, 6, 8, 10]);

    products.dispatch(&storage, open_menu("2", "API Client"))?;
    let effects = products.dispatch(
        &storage,
        TableCommand::ChooseRowAction(ProductAction::VersionHistory),
    )?;
    assert!(
        matches!(&effects[..], [PageEffect::Status(message)] if message.contains("API Client"))
    );
    assert!(products.table().open_popup().is_none());
    assert_eq!(storage.saves(), 0);
    Ok(())
}

#[test]
fn add_product_defaults() -> Result<()> {
    let storage = MemoryStorage::default();
    let mut products = seeded_products();
    let id = products.add(
        &storage,
        ProductFormInput {
            name: "Status Page".to_owned(),
            plan: ProductPlan::Free,
            status: ProductStatus::Active,
        },
        date!(2026 - 10 - 19),
    )?;
    assert_eq!(id, ProductId::new(11));
    assert_eq!(products.records()[0].name, "Status Page");
    assert_eq!(products.records()[0].last_updated, date!(2026 - 10 - 19));
    assert!(storage.payload(PRODUCTS_KEY).is_some());
    Ok(())
}

#[test]
fn activity_filters_follow_the_given_log() -> Result<()> {
    use ActionType::{Login, SettingsChanged};
    use ActivityStatus::{Error, Pending, Success};

    let logs = vec![
        activity(1, "Signed in", Login, "Ada Byron", Success),
        activity(2, "Renamed org", SettingsChanged, "Ada Byron", Error),
        activity(3, "Signed in", Login, "Grace Hopper", Pending),
    ];
    assert_eq!(action_type_options(&logs), vec!["Login", "Settings Changed"]);

    let mut page = ActivityPage::new(logs, DEFAULT_PAGE_SIZE);
    page.dispatch(TableCommand::SelectFilter {
        filter: "action_type".to_owned(),
        value: "Login".to_owned(),
    })?;
    page.dispatch(TableCommand::Search("grace".to_owned()))?;
    let ids: Vec<i64> = page.filtered().iter().map(|log| log.id.get()).collect();
    assert_eq!(ids, vec![3]);
    Ok(())
}
