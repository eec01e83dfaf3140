//! Menu navigation: a selection cursor and a scrolling viewport over an
//! ordered item list.

use std::ops::Range;

use crate::error::MenuError;

use super::items::{AsItemRef, ItemRef};

/// Positional read access to whatever currently backs a menu.
///
/// Lookups never fetch; callers make sure the positions they need are
/// loaded before reading.
pub trait Listing {
    fn item(&self, index: usize) -> Option<ItemRef<'_>>;
}

impl<T: AsItemRef> Listing for [T] {
    fn item(&self, index: usize) -> Option<ItemRef<'_>> {
        self.get(index).map(AsItemRef::as_item_ref)
    }
}

impl<T: AsItemRef> Listing for Vec<T> {
    fn item(&self, index: usize) -> Option<ItemRef<'_>> {
        self.as_slice().item(index)
    }
}

/// Cursor and viewport over `len` items.
///
/// Keeps `selected < len` (0 when empty) and, once the viewport has a size
/// and a move has happened, `offset <= selected < offset + size`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    len: usize,
    viewport_offset: usize,
    viewport_size: usize,
    selected_index: usize,
}

impl MenuState {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    #[cfg(test)]
    pub fn viewport_offset(&self) -> usize {
        self.viewport_offset
    }

    pub fn viewport_size(&self) -> usize {
        self.viewport_size
    }

    /// Resize the viewport. The offset is re-clamped by the next move.
    pub fn set_viewport_size(&mut self, size: usize) {
        self.viewport_size = size;
    }

    pub fn move_down(&mut self, n: usize) {
        self.selected_index = self
            .selected_index
            .saturating_add(n)
            .min(self.len.saturating_sub(1));
        if self.viewport_size > 0 && self.selected_index >= self.viewport_offset + self.viewport_size {
            self.viewport_offset = self.selected_index + 1 - self.viewport_size;
        }
    }

    pub fn move_up(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
        if self.selected_index < self.viewport_offset {
            self.viewport_offset = self.selected_index;
        }
    }

    /// Positions currently on screen.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.viewport_offset.min(self.len);
        let end = self.viewport_offset.saturating_add(self.viewport_size).min(self.len);
        start..end
    }

    /// Item under the cursor.
    pub fn selection<'a, L>(&self, items: &'a L) -> Result<ItemRef<'a>, MenuError>
    where
        L: Listing + ?Sized,
    {
        if self.is_empty() {
            return Err(MenuError::EmptySelection);
        }
        items.item(self.selected_index).ok_or(MenuError::EmptySelection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::tracks;

    fn menu(len: usize, viewport: usize) -> MenuState {
        let mut menu = MenuState::new(len);
        menu.set_viewport_size(viewport);
        menu
    }

    #[test]
    fn starts_at_the_top() {
        let m = menu(10, 3);
        assert_eq!(m.selected_index(), 0);
        assert_eq!(m.viewport_offset(), 0);
        assert_eq!(m.visible_range(), 0..3);
    }

    #[test]
    fn moving_down_scrolls_the_viewport() {
        let mut m = menu(10, 3);
        for _ in 0..4 {
            m.move_down(1);
        }
        assert_eq!(m.selected_index(), 4);
        assert_eq!(m.viewport_offset(), 2);
        assert_eq!(m.visible_range(), 2..5);
    }

    #[test]
    fn moves_clamp_at_both_ends() {
        let mut m = menu(10, 3);
        m.move_up(1);
        assert_eq!(m.selected_index(), 0);

        m.move_down(100);
        assert_eq!(m.selected_index(), 9);
        assert_eq!(m.viewport_offset(), 7);
        m.move_down(1);
        assert_eq!(m.selected_index(), 9);
    }

    #[test]
    fn down_then_up_restores_selection_and_viewport_when_unclamped() {
        let mut m = menu(20, 5);
        m.move_down(2);
        let before = m.clone();

        m.move_down(2);
        m.move_up(2);
        assert_eq!(m, before);
    }

    #[test]
    fn down_then_up_restores_only_selection_after_scrolling() {
        let mut m = menu(20, 5);
        m.move_down(2);

        m.move_down(6);
        assert_eq!(m.viewport_offset(), 4);
        m.move_up(6);
        assert_eq!(m.selected_index(), 2);
        assert_eq!(m.viewport_offset(), 2);
    }

    #[test]
    fn page_moves_use_the_viewport_size() {
        let mut m = menu(50, 10);
        m.move_down(m.viewport_size());
        assert_eq!(m.selected_index(), 10);
        assert_eq!(m.visible_range(), 1..11);

        m.move_up(m.viewport_size());
        assert_eq!(m.selected_index(), 0);
        assert_eq!(m.visible_range(), 0..10);
    }

    #[test]
    fn resize_waits_for_the_next_move() {
        let mut m = menu(10, 5);
        m.move_down(4);
        m.set_viewport_size(2);
        assert_eq!(m.viewport_offset(), 0);

        m.move_down(0);
        assert_eq!(m.viewport_offset(), 3);
        assert_eq!(m.visible_range(), 3..5);
    }

    #[test]
    fn short_lists_show_everything() {
        let m = menu(2, 10);
        assert_eq!(m.visible_range(), 0..2);
        assert_eq!(menu(0, 10).visible_range(), 0..0);
    }

    #[test]
    fn empty_menu_has_no_selection() {
        let mut m = menu(0, 5);
        m.move_down(3);
        m.move_up(1);
        assert_eq!(m.selected_index(), 0);

        let items = tracks(0);
        assert_eq!(m.selection(&items), Err(MenuError::EmptySelection));
    }

    #[test]
    fn selection_reads_the_item_under_the_cursor() {
        let items = tracks(5);
        let mut m = menu(items.len(), 2);
        m.move_down(3);

        match m.selection(&items).unwrap() {
            ItemRef::Track(track) => assert_eq!(track.name, "Track 3"),
            other => panic!("unexpected selection {other:?}"),
        }
    }
}
