// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Outside-click and Escape dismissal for floating popups.

use crate::geometry::{AnchorRect, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissKey {
    Escape,
    Other,
}

/// Document-level input a popup may have to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissEvent {
    PointerDown(Point),
    Key(DismissKey),
}

/// Holds at most one open popup id and closes it on outside input.
///
/// The controller only listens while something is open: `is_listening`
/// flips on with `open` and off with every path that closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DismissController<K> {
    open: Option<K>,
    live_regions: Vec<AnchorRect>,
    listening: bool,
}

impl<K> Default for DismissController<K> {
    fn default() -> Self {
        Self {
            open: None,
            live_regions: Vec::new(),
            listening: false,
        }
    }
}

impl<K: Clone + PartialEq> DismissController<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_id(&self) -> Option<&K> {
        self.open.as_ref()
    }

    pub fn is_open(&self, id: &K) -> bool {
        self.open.as_ref() == Some(id)
    }

    pub fn any_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn live_regions(&self) -> &[AnchorRect] {
        &self.live_regions
    }

    /// Opens `id`, returning whichever popup it displaced.
    pub fn open(&mut self, id: K, live_regions: Vec<AnchorRect>) -> Option<K> {
        let previous = self.open.take().filter(|previous| *previous != id);
        self.open = Some(id);
        self.live_regions = live_regions;
        self.listening = true;
        previous
    }

    pub fn close(&mut self) -> Option<K> {
        self.listening = false;
        self.live_regions.clear();
        self.open.take()
    }

    /// Replaces the live regions of the open popup, for example once its
    /// rendered area is known.
    pub fn set_live_regions(&mut self, live_regions: Vec<AnchorRect>) {
        if self.open.is_some() {
            self.live_regions = live_regions;
        }
    }

    /// Returns the id that was closed by `event`, if any.
    pub fn handle(&mut self, event: DismissEvent) -> Option<K> {
        if !self.listening {
            return None;
        }

        let dismiss = match event {
            DismissEvent::PointerDown(point) => !self
                .live_regions
                .iter()
                .any(|region| region.contains(point)),
            DismissEvent::Key(DismissKey::Escape) => true,
            DismissEvent::Key(DismissKey::Other) => false,
        };

        if dismiss { self.close() } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::{DismissController, DismissEvent, DismissKey};
    use crate::geometry::{AnchorRect, Point};

    fn header() -> AnchorRect {
        AnchorRect::new(0, 0, 40, 1)
    }

    #[test]
    fn listens_only_while_open() {
        let mut controller = DismissController::<&str>::new();
        assert!(!controller.is_listening());

        controller.open("status", vec![header()]);
        assert!(controller.is_listening());

        controller.close();
        assert!(!controller.is_listening());
        assert!(controller.live_regions().is_empty());
    }

    #[test]
    fn repeated_cycles_leave_nothing_attached() {
        let mut controller = DismissController::<u8>::new();
        for round in 0..5 {
            controller.open(round, vec![header()]);
            let closed = controller.handle(DismissEvent::Key(DismissKey::Escape));
            assert_eq!(closed, Some(round));
            assert!(!controller.is_listening());
        }
    }

    #[test]
    fn pointer_inside_live_region_keeps_popup() {
        let mut controller = DismissController::new();
        controller.open("role", vec![header(), AnchorRect::new(10, 3, 12, 4)]);

        assert_eq!(
            controller.handle(DismissEvent::PointerDown(Point::new(5, 0))),
            None
        );
        assert_eq!(
            controller.handle(DismissEvent::PointerDown(Point::new(12, 5))),
            None
        );
        assert!(controller.is_open(&"role"));

        assert_eq!(
            controller.handle(DismissEvent::PointerDown(Point::new(60, 20))),
            Some("role")
        );
        assert!(!controller.any_open());
    }

    #[test]
    fn non_escape_keys_are_ignored() {
        let mut controller = DismissController::new();
        controller.open(1, vec![header()]);
        assert_eq!(controller.handle(DismissEvent::Key(DismissKey::Other)), None);
        assert!(controller.is_open(&1));
    }

    #[test]
    fn events_while_closed_do_nothing() {
        let mut controller = DismissController::<u8>::new();
        assert_eq!(controller.handle(DismissEvent::Key(DismissKey::Escape)), None);
        assert_eq!(
            controller.handle(DismissEvent::PointerDown(Point::new(0, 0))),
            None
        );
    }

    #[test]
    fn opening_second_id_reports_displaced_one() {
        let mut controller = DismissController::new();
        assert_eq!(controller.open("a", vec![]), None);
        assert_eq!(controller.open("b", vec![]), Some("a"));
        assert!(controller.is_open(&"b"));
        assert!(!controller.is_open(&"a"));
    }

    #[test]
    fn independent_controllers_do_not_interfere() {
        let mut first = DismissController::new();
        let mut second = DismissController::new();
        first.open("plan", vec![AnchorRect::new(0, 0, 10, 1)]);
        second.open("theme", vec![AnchorRect::new(20, 0, 10, 1)]);

        first.close();
        assert!(second.is_open(&"theme"));
        assert!(second.is_listening());
    }
}
