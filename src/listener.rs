use crate::source::{HeaderId, ItemPosition};

/// Scroll activity of the host grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollState {
    #[default]
    Idle,
    Dragging,
    Flinging,
}

/// Item click callback. Positions arrive already translated back to the
/// caller's original item space.
pub trait OnItemClick {
    fn item_click(&mut self, position: usize);
}

pub trait OnItemLongClick {
    /// Return true if the long click was consumed.
    fn item_long_click(&mut self, position: usize) -> bool;
}

pub trait OnItemSelected {
    fn item_selected(&mut self, position: usize);

    fn nothing_selected(&mut self);
}

pub trait OnHeaderClick {
    fn header_click(&mut self, id: HeaderId);
}

pub trait OnHeaderLongClick {
    /// Return true if the long click was consumed.
    fn header_long_click(&mut self, id: HeaderId) -> bool;
}

/// Scroll pass-through. Invoked before the tracker updates, with the host
/// grid's untranslated scroll arguments.
pub trait OnScroll {
    fn scrolled(&mut self, first_visible: usize, visible_count: usize, total_count: usize);

    fn scroll_state_changed(&mut self, state: ScrollState);
}

/// Split a translated position into the item/header callback it belongs to.
pub(crate) fn split_position(position: ItemPosition) -> Result<usize, HeaderId> {
    match position {
        ItemPosition::Item(index) => Ok(index),
        ItemPosition::Header(id) => Err(id),
    }
}
