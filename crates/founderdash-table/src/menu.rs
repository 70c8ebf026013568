// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::convert::Infallible;
use std::fmt::Debug;

use crate::geometry::{AnchorRect, DropdownGeometry, compute_geometry};

/// Narrowest a row action menu is drawn; it grows leftward from the trigger.
pub const ROW_MENU_MIN_WIDTH: i32 = 22;

/// A command offered by a table's row action menu.
pub trait RowActionKind: Copy + Eq + Debug {
    fn label(self) -> &'static str;
}

/// Tables without row actions use `Infallible`.
impl RowActionKind for Infallible {
    fn label(self) -> &'static str {
        match self {}
    }
}

/// The row a menu or click refers to, captured when the interaction starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowTarget {
    pub id: String,
    pub display_name: String,
}

impl RowTarget {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// A chosen command together with the row it was bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowActionInvocation<A> {
    pub action: A,
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMenu<A> {
    target: RowTarget,
    actions: Vec<A>,
    geometry: DropdownGeometry,
    highlighted: usize,
}

impl<A: RowActionKind> RowMenu<A> {
    pub fn open(target: RowTarget, actions: &[A], anchor: AnchorRect, gap: i32) -> Self {
        Self {
            target,
            actions: actions.to_vec(),
            geometry: compute_geometry(anchor, gap).widen_right_aligned(anchor, ROW_MENU_MIN_WIDTH),
            highlighted: 0,
        }
    }

    pub fn target(&self) -> &RowTarget {
        &self.target
    }

    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    pub fn geometry(&self) -> DropdownGeometry {
        self.geometry
    }

    pub fn area(&self) -> AnchorRect {
        self.geometry
            .area(i32::try_from(self.actions.len()).unwrap_or(i32::MAX))
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn move_highlight(&mut self, delta: isize) {
        let last = self.actions.len().saturating_sub(1);
        self.highlighted = self.highlighted.saturating_add_signed(delta).min(last);
    }

    pub fn highlighted_action(&self) -> Option<A> {
        self.actions.get(self.highlighted).copied()
    }

    /// Binds `action` to the row captured at open time. Actions the menu does
    /// not offer yield nothing.
    pub fn invoke(&self, action: A) -> Option<RowActionInvocation<A>> {
        self.actions
            .contains(&action)
            .then(|| RowActionInvocation {
                action,
                id: self.target.id.clone(),
                display_name: self.target.display_name.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{ROW_MENU_MIN_WIDTH, RowActionKind, RowMenu, RowTarget};
    use crate::geometry::AnchorRect;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Action {
        View,
        Disable,
        Archive,
    }

    impl RowActionKind for Action {
        fn label(self) -> &'static str {
            match self {
                Self::View => "View",
                Self::Disable => "Disable",
                Self::Archive => "Archive",
            }
        }
    }

    fn menu() -> RowMenu<Action> {
        RowMenu::open(
            RowTarget::new("7", "Sarah Chen"),
            &[Action::View, Action::Disable],
            AnchorRect::new(60, 4, 3, 1),
            0,
        )
    }

    #[test]
    fn invocation_carries_row_bound_at_open() {
        let menu = menu();
        let invocation = menu.invoke(Action::Disable).expect("offered action");
        assert_eq!(invocation.id, "7");
        assert_eq!(invocation.display_name, "Sarah Chen");
        assert_eq!(invocation.action.label(), "Disable");
        assert!(menu.invoke(Action::Archive).is_none());
    }

    #[test]
    fn narrow_trigger_widens_leftward() {
        let geometry = menu().geometry();
        assert_eq!(geometry.width, ROW_MENU_MIN_WIDTH);
        assert_eq!(geometry.left + geometry.width, 63);
        assert_eq!(geometry.top, 5);
    }

    #[test]
    fn highlight_clamps_to_actions() {
        let mut menu = menu();
        menu.move_highlight(4);
        assert_eq!(menu.highlighted_action(), Some(Action::Disable));
        menu.move_highlight(-4);
        assert_eq!(menu.highlighted_action(), Some(Action::View));
        assert_eq!(menu.area().height, 2);
    }
}
