// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::dismiss::{DismissController, DismissEvent};
use crate::geometry::AnchorRect;

/// Dialog over a backdrop. Escape or a pointer-down on the backdrop closes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal<K> {
    title: String,
    dismiss: DismissController<K>,
}

impl<K> Default for Modal<K> {
    fn default() -> Self {
        Self {
            title: String::new(),
            dismiss: DismissController::default(),
        }
    }
}

impl<K: Clone + PartialEq> Modal<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.dismiss.any_open()
    }

    pub fn content(&self) -> Option<&K> {
        self.dismiss.open_id()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Shows `content`; `dialog` is the only area that keeps it open.
    pub fn open(&mut self, title: impl Into<String>, content: K, dialog: AnchorRect) {
        self.title = title.into();
        self.dismiss.open(content, vec![dialog]);
    }

    /// Updates the dialog area after a resize.
    pub fn set_dialog_area(&mut self, dialog: AnchorRect) {
        self.dismiss.set_live_regions(vec![dialog]);
    }

    pub fn close(&mut self) -> Option<K> {
        self.title.clear();
        self.dismiss.close()
    }

    /// Returns the content that `event` dismissed.
    pub fn handle(&mut self, event: DismissEvent) -> Option<K> {
        let closed = self.dismiss.handle(event);
        if closed.is_some() {
            self.title.clear();
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::Modal;
    use crate::dismiss::{DismissEvent, DismissKey};
    use crate::geometry::{AnchorRect, Point};

    fn dialog() -> AnchorRect {
        AnchorRect::new(20, 5, 40, 12)
    }

    #[test]
    fn backdrop_click_closes_dialog_click_does_not() {
        let mut modal = Modal::new();
        modal.open("Add user", "add-user", dialog());
        assert_eq!(modal.title(), "Add user");

        assert_eq!(modal.handle(DismissEvent::PointerDown(Point::new(30, 10))), None);
        assert!(modal.is_open());

        assert_eq!(
            modal.handle(DismissEvent::PointerDown(Point::new(2, 2))),
            Some("add-user")
        );
        assert!(!modal.is_open());
        assert_eq!(modal.title(), "");
    }

    #[test]
    fn escape_closes() {
        let mut modal = Modal::new();
        modal.open("Add product", 1_u8, dialog());
        assert_eq!(modal.handle(DismissEvent::Key(DismissKey::Other)), None);
        assert_eq!(modal.handle(DismissEvent::Key(DismissKey::Escape)), Some(1));
        assert_eq!(modal.content(), None);
    }

    #[test]
    fn resized_dialog_area_is_respected() {
        let mut modal = Modal::new();
        modal.open("Add user", (), dialog());
        modal.set_dialog_area(AnchorRect::new(0, 0, 10, 5));
        assert_eq!(modal.handle(DismissEvent::PointerDown(Point::new(30, 10))), Some(()));
    }
}
