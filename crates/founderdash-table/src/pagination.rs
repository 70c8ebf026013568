// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

/// One page of a filtered collection and the pager state derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

/// What the shell renders below the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellLayout {
    /// No rows: only the empty-state message, no pager.
    Empty,
    Paged {
        caption: String,
        previous_disabled: bool,
        next_disabled: bool,
    },
}

impl PageWindow {
    pub const fn new(page: usize, page_size: usize, total: usize) -> Self {
        Self {
            page,
            page_size,
            total,
        }
    }

    pub const fn total_pages(self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }

    /// Highest page a cursor may sit on; 1 for an empty collection.
    pub const fn last_page(self) -> usize {
        let pages = self.total_pages();
        if pages == 0 { 1 } else { pages }
    }

    pub const fn first_index(self) -> usize {
        if self.total == 0 {
            return 0;
        }
        self.page.saturating_sub(1) * self.page_size + 1
    }

    pub const fn last_index(self) -> usize {
        let end = self.page.saturating_mul(self.page_size);
        if end < self.total { end } else { self.total }
    }

    pub const fn previous_disabled(self) -> bool {
        self.page <= 1
    }

    pub const fn next_disabled(self) -> bool {
        self.total == 0 || self.page >= self.total_pages()
    }

    pub fn caption(self) -> String {
        format!(
            "Showing {}\u{2013}{} of {}",
            self.first_index(),
            self.last_index(),
            self.total
        )
    }

    pub fn layout(self) -> ShellLayout {
        if self.total == 0 {
            return ShellLayout::Empty;
        }
        ShellLayout::Paged {
            caption: self.caption(),
            previous_disabled: self.previous_disabled(),
            next_disabled: self.next_disabled(),
        }
    }

    /// Rows of `items` on this page. Out-of-range pages yield nothing.
    pub fn slice<'a, T>(self, items: &'a [T]) -> &'a [T] {
        let start = self.page.saturating_sub(1).saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::{PageWindow, ShellLayout};

    #[test]
    fn total_pages_rounds_up() {
        for (total, size, pages) in [(0, 5, 0), (1, 5, 1), (5, 5, 1), (6, 5, 2), (12, 5, 3)] {
            assert_eq!(PageWindow::new(1, size, total).total_pages(), pages);
        }
    }

    #[test]
    fn pager_flags_follow_page_bounds() {
        for total in 0..=13 {
            for page in 0..=4 {
                let window = PageWindow::new(page, 5, total);
                assert_eq!(window.previous_disabled(), page <= 1);
                assert_eq!(
                    window.next_disabled(),
                    total == 0 || page >= window.total_pages()
                );
            }
        }
    }

    #[test]
    fn twelve_records_across_three_pages() {
        let records: Vec<u32> = (1..=12).collect();

        let first = PageWindow::new(1, 5, records.len());
        assert_eq!(first.slice(&records), &[1, 2, 3, 4, 5]);
        assert_eq!(first.caption(), "Showing 1\u{2013}5 of 12");
        assert!(first.previous_disabled());
        assert!(!first.next_disabled());

        let last = PageWindow::new(3, 5, records.len());
        assert_eq!(last.slice(&records), &[11, 12]);
        assert_eq!(last.caption(), "Showing 11\u{2013}12 of 12");
        assert!(last.next_disabled());
    }

    #[test]
    fn empty_collection_renders_empty_state_only() {
        let window = PageWindow::new(1, 5, 0);
        assert_eq!(window.layout(), ShellLayout::Empty);
        assert_eq!(window.caption(), "Showing 0\u{2013}0 of 0");
        assert_eq!(window.last_page(), 1);
        assert!(window.slice::<u32>(&[]).is_empty());
    }

    #[test]
    fn out_of_range_page_slices_nothing() {
        let records = [1, 2, 3];
        assert!(PageWindow::new(4, 5, 3).slice(&records).is_empty());
    }
}
