use crate::geometry::Rect;
use crate::view::HeaderView;

/// Per-side spacing in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Edges {
    pub const fn all(value: i32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// The hosting grid's rendering engine.
///
/// Item recycling, measurement and scroll physics all belong to the host;
/// the widget only reads the geometry of currently laid-out children.
/// Visible indexes are relative to the first visible child, and every lookup
/// is allowed to fail transiently during scroll churn.
pub trait GridEngine {
    /// Linear position of the first laid-out child.
    fn first_visible_position(&self) -> usize;

    /// Linear position of the last laid-out child.
    fn last_visible_position(&self) -> usize;

    /// Number of currently laid-out children.
    fn child_count(&self) -> usize;

    /// Frame of the child at the given visible index, in view coordinates.
    fn child_frame(&self, visible_index: usize) -> Option<Rect>;

    /// Linear position of the child at the given visible index.
    fn position_for_child(&self, visible_index: usize) -> Option<usize>;

    /// The in-flow header view carried by the row at the given visible
    /// index, if that row is a header row.
    fn header_view_at(&self, visible_index: usize) -> Option<&dyn HeaderView>;

    fn header_view_at_mut(&mut self, visible_index: usize) -> Option<&mut dyn HeaderView>;

    fn width(&self) -> i32;

    fn height(&self) -> i32;

    fn padding(&self) -> Edges;

    /// Whether the host clips its content to the padding bounds.
    fn clip_to_padding(&self) -> bool;
}

/// Requested column configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnSpec {
    /// Fit as many columns of the configured width as the grid allows.
    #[default]
    AutoFit,
    Fixed(usize),
}

/// Measured column geometry, recomputed on every measurement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMetrics {
    /// One visual row spans this many linear positions.
    pub columns: usize,
    pub column_width: i32,
    pub horizontal_spacing: i32,
    pub vertical_spacing: i32,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            columns: 1,
            column_width: 0,
            horizontal_spacing: 0,
            vertical_spacing: 0,
        }
    }
}

/// Work out how many columns fit the given grid width.
///
/// Auto-fit packs `grid_width / column_width` columns, then drops columns
/// while the spacing-inclusive span overflows. With no usable column width
/// the vanilla-grid fallback of two columns applies.
pub fn measure_columns(
    spec: ColumnSpec,
    column_width: i32,
    horizontal_spacing: i32,
    grid_width: i32,
) -> usize {
    match spec {
        ColumnSpec::Fixed(n) => n.max(1),
        ColumnSpec::AutoFit => {
            if column_width <= 0 {
                return 2;
            }
            let grid_width = grid_width.max(0);
            let mut fitted = grid_width / column_width;
            if fitted <= 0 {
                return 1;
            }
            while fitted != 1 {
                if fitted * column_width + (fitted - 1) * horizontal_spacing > grid_width {
                    fitted -= 1;
                } else {
                    break;
                }
            }
            fitted as usize
        }
    }
}
