use crate::view::HeaderView;

/// Stable identifier for a section header.
///
/// Ids must be stable across data changes that preserve sections. The
/// reserved [`HeaderId::NONE`] sentinel means "no section" and never equals
/// a real id, so the first scroll pass after a reset always swaps headers in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeaderId(pub i64);

impl HeaderId {
    pub const NONE: HeaderId = HeaderId(-1);

    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }
}

/// A linear position translated back into the caller's item space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPosition {
    /// A real item, at its original (header-free) index.
    Item(usize),
    /// A synthetic header row belonging to the given section.
    Header(HeaderId),
}

/// Data source collaborator that exposes the flattened header+item sequence.
///
/// The adapter-wrapping layer that injects synthetic header rows lives behind
/// this trait; the widget only ever asks position-level questions of it.
pub trait HeaderSource {
    /// Length of the flattened sequence (header rows included).
    fn item_count(&self) -> usize;

    fn is_header_row(&self, position: usize) -> bool;

    /// Section id for the given linear position. Must be deterministic for
    /// unchanged data.
    fn header_id_at(&self, position: usize) -> HeaderId;

    /// Produce a view for the header anchored at `anchor`. The previously
    /// pinned view is handed back as `recycled` and may be reused. `None`
    /// means the section has no header to pin.
    fn header_view_for(
        &mut self,
        anchor: usize,
        recycled: Option<Box<dyn HeaderView>>,
    ) -> Option<Box<dyn HeaderView>>;

    /// Map a linear position back to the caller's original item space.
    fn translate_position(&self, position: usize) -> ItemPosition;

    /// Monotonic data version, bumped on every content change or
    /// invalidation. The tracker polls it each pass and resets tracked state
    /// on mismatch.
    fn version(&self) -> u64;
}
