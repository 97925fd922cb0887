pub mod buffer;
pub mod canvas;
pub mod geometry;
pub mod grid;
pub mod lifecycle;
pub mod listener;
pub mod render;
pub mod source;
pub mod touch;
pub mod tracker;
pub mod view;
pub mod widget;

pub use buffer::{Buffer, Cell, Rgb};
pub use canvas::Canvas;
pub use geometry::Rect;
pub use grid::{measure_columns, ColumnSpec, Edges, GridEngine, GridMetrics};
pub use lifecycle::{DirectLifecycle, PlatformSupportError, ViewLifecycle};
pub use listener::{
    OnHeaderClick, OnHeaderLongClick, OnItemClick, OnItemLongClick, OnItemSelected, OnScroll,
    ScrollState,
};
pub use source::{HeaderId, HeaderSource, ItemPosition};
pub use touch::{PointerEvent, PointerKind, RedirectedEvent, TouchRedirector, TouchTarget};
pub use tracker::HeaderTracker;
pub use view::{HeaderView, TextHeaderView};
pub use widget::{Config, SavedState, StickyGridView};
