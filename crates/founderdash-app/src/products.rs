// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use founderdash_table::{
    ColumnFilter, RowActionInvocation, RowActionKind, TableCommand, TableController, TableEvent,
    TableDef, TableView,
};
use log::info;
use time::Date;

use crate::forms::ProductFormInput;
use crate::pages::{PageEffect, TablePage};
use crate::storage::{self, PRODUCTS_KEY, RecordStorage};
use crate::{DetailRoute, Product, ProductId, ProductPlan, ProductStatus, seed};

pub const PRODUCT_SEARCH_FIELDS: &[&str] = &["name"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductAction {
    View,
    Edit,
    ToggleStatus,
    VersionHistory,
}

impl ProductAction {
    pub const ALL: [Self; 4] = [
        Self::View,
        Self::Edit,
        Self::ToggleStatus,
        Self::VersionHistory,
    ];
}

impl RowActionKind for ProductAction {
    fn label(self) -> &'static str {
        match self {
            Self::View => "View product",
            Self::Edit => "Edit product",
            Self::ToggleStatus => "Toggle status",
            Self::VersionHistory => "View version history",
        }
    }
}

pub fn products_table(page_size: usize) -> TableDef<ProductAction> {
    TableDef::new("products", PRODUCT_SEARCH_FIELDS, page_size)
        .with_filter(ColumnFilter::new(
            "plan",
            "Plan",
            ProductPlan::ALL.map(ProductPlan::as_str),
        ))
        .with_filter(ColumnFilter::new(
            "status",
            "Status",
            ProductStatus::ALL.map(ProductStatus::as_str),
        ))
        .with_row_actions(&ProductAction::ALL)
        .navigating_rows()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductsPage {
    page: TablePage<Product, ProductAction>,
}

impl ProductsPage {
    pub fn new(products: Vec<Product>, page_size: usize) -> Self {
        Self {
            page: TablePage::new(products, products_table(page_size)),
        }
    }

    /// Starts from the stored snapshot or the seed list, writing the
    /// defaults when nothing was stored yet.
    pub fn load(storage: &dyn RecordStorage, page_size: usize) -> Self {
        let products: Vec<Product> = storage::load_or_seed(storage, PRODUCTS_KEY, seed::products);
        let page = Self::new(products, page_size);
        page.persist(storage);
        page
    }

    pub fn with_gaps(self, header_gap: i32, menu_gap: i32) -> Self {
        Self {
            page: self.page.with_gaps(header_gap, menu_gap),
        }
    }

    pub fn records(&self) -> &[Product] {
        self.page.records().records()
    }

    pub fn table(&self) -> &TableController<ProductAction> {
        self.page.table()
    }

    pub fn view(&mut self) -> TableView<'_, Product> {
        self.page.view()
    }

    pub fn snapshot(&mut self) -> (TableView<'_, Product>, &TableController<ProductAction>) {
        self.page.snapshot()
    }

    pub fn filtered(&mut self) -> Vec<&Product> {
        self.page.filtered()
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.records().iter().find(|product| product.id == id)
    }

    pub fn dispatch(
        &mut self,
        storage: &dyn RecordStorage,
        command: TableCommand<ProductAction>,
    ) -> Result<Vec<PageEffect>> {
        let mut effects = Vec::new();
        for event in self.page.dispatch(command)? {
            match event {
                TableEvent::RowActivated(target) => {
                    effects.push(PageEffect::Navigate(DetailRoute::Product(
                        target.id.parse()?,
                    )));
                }
                TableEvent::RowAction(invocation) => {
                    effects.push(self.run_action(storage, invocation)?);
                }
                _ => {}
            }
        }
        Ok(effects)
    }

    fn run_action(
        &mut self,
        storage: &dyn RecordStorage,
        invocation: RowActionInvocation<ProductAction>,
    ) -> Result<PageEffect> {
        let id: ProductId = invocation.id.parse()?;
        let name = invocation.display_name;
        Ok(match invocation.action {
            ProductAction::View => PageEffect::Navigate(DetailRoute::Product(id)),
            ProductAction::Edit => {
                info!("editing product {id} ({name})");
                PageEffect::Status(format!("editing {name} is not available yet"))
            }
            ProductAction::VersionHistory => {
                info!("viewing version history for product {id} ({name})");
                PageEffect::Status(format!("version history for {name} is not available yet"))
            }
            ProductAction::ToggleStatus => match self.toggle_status(storage, id) {
                Some(status) => PageEffect::Status(format!("{name} is now {}", status.as_str())),
                None => PageEffect::Status(format!("product {id} no longer exists")),
            },
        })
    }

    /// Flips Active and Paused, returning the new status. The table page is
    /// left alone.
    pub fn toggle_status(
        &mut self,
        storage: &dyn RecordStorage,
        id: ProductId,
    ) -> Option<ProductStatus> {
        let mut toggled = None;
        self.page.records_mut().update_first(
            |product| product.id == id,
            |product| {
                product.status = product.status.toggled();
                toggled = Some(product.status);
            },
        );
        if toggled.is_some() {
            self.persist(storage);
        }
        toggled
    }

    pub fn add(
        &mut self,
        storage: &dyn RecordStorage,
        input: ProductFormInput,
        today: Date,
    ) -> Result<ProductId> {
        input.validate()?;
        let id = ProductId::next_after(self.records().iter().map(|product| product.id));
        let product = input.into_product(id, today);
        info!("added product {id} ({})", product.name);
        self.page.records_mut().prepend(product);
        self.persist(storage);
        Ok(id)
    }

    fn persist(&self, storage: &dyn RecordStorage) -> bool {
        storage::sync(storage, PRODUCTS_KEY, self.records())
    }
}

