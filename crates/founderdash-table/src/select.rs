// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::dismiss::{DismissController, DismissEvent};
use crate::geometry::{AnchorRect, DropdownGeometry, SELECT_FIELD_GAP, compute_geometry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Single-select dropdown. The current value is owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectField {
    id: &'static str,
    label: &'static str,
    options: Vec<SelectOption>,
    gap: i32,
    geometry: Option<DropdownGeometry>,
    highlighted: usize,
    dismiss: DismissController<()>,
}

impl SelectField {
    pub fn new(id: &'static str, label: &'static str, options: Vec<SelectOption>) -> Self {
        Self {
            id,
            label,
            options,
            gap: SELECT_FIELD_GAP,
            geometry: None,
            highlighted: 0,
            dismiss: DismissController::new(),
        }
    }

    /// Overrides the trigger-to-popup gap.
    pub fn with_gap(mut self, gap: i32) -> Self {
        self.gap = gap;
        self
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.dismiss.any_open()
    }

    pub fn is_listening(&self) -> bool {
        self.dismiss.is_listening()
    }

    /// Geometry of the open popup; `None` while closed.
    pub fn geometry(&self) -> Option<DropdownGeometry> {
        if self.is_open() { self.geometry } else { None }
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Label shown on the trigger: the matching option's label, or the raw
    /// value when nothing matches.
    pub fn selected_label<'a>(&'a self, value: &'a str) -> &'a str {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map_or(value, |option| option.label.as_str())
    }

    /// Trigger click. `container` is the field's whole area (label plus
    /// trigger); the popup area is added to the live regions.
    pub fn toggle(&mut self, trigger: AnchorRect, container: AnchorRect, current: &str) -> bool {
        if self.is_open() {
            self.close();
            return false;
        }

        let geometry = compute_geometry(trigger, self.gap);
        let rows = i32::try_from(self.options.len()).unwrap_or(i32::MAX);
        self.geometry = Some(geometry);
        self.highlighted = self
            .options
            .iter()
            .position(|option| option.value == current)
            .unwrap_or(0);
        self.dismiss
            .open((), vec![container, trigger, geometry.area(rows)]);
        true
    }

    pub fn close(&mut self) {
        self.dismiss.close();
        self.geometry = None;
    }

    pub fn move_highlight(&mut self, delta: isize) {
        if self.options.is_empty() {
            self.highlighted = 0;
            return;
        }
        let last = self.options.len() - 1;
        self.highlighted = self.highlighted.saturating_add_signed(delta).min(last);
    }

    /// Picks the option at `index`, closing the popup. Returns the value to
    /// hand to the caller's change handler.
    pub fn choose(&mut self, index: usize) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        let value = self.options.get(index).map(|option| option.value.clone())?;
        self.close();
        Some(value)
    }

    pub fn choose_highlighted(&mut self) -> Option<String> {
        self.choose(self.highlighted)
    }

    /// Returns true when the event closed the popup.
    pub fn handle_dismiss(&mut self, event: DismissEvent) -> bool {
        if self.dismiss.handle(event).is_some() {
            self.geometry = None;
            true
        } else {
            false
        }
    }
}
