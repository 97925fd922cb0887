use crate::canvas::Canvas;
use crate::grid::{measure_columns, ColumnSpec, GridEngine, GridMetrics};
use crate::lifecycle::{PlatformSupportError, ViewLifecycle};
use crate::listener::{
    split_position, OnHeaderClick, OnHeaderLongClick, OnItemClick, OnItemLongClick,
    OnItemSelected, OnScroll, ScrollState,
};
use crate::render::dispatch_draw;
use crate::source::{HeaderId, HeaderSource};
use crate::touch::{PointerEvent, PointerKind, RedirectedEvent, TouchRedirector, TouchTarget};
use crate::tracker::HeaderTracker;
use crate::view::HeaderView;

/// Widget configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub sticky_headers: bool,
    /// Headers span the full grid width instead of the padded content width.
    pub headers_ignore_padding: bool,
    /// Mask the region under the pinned header so the base grid does not
    /// show through. Off means the pinned header renders over whatever the
    /// grid drew (transparent mode).
    pub mask_sticky_region: bool,
    pub columns: ColumnSpec,
    pub column_width: i32,
    pub horizontal_spacing: i32,
    pub vertical_spacing: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sticky_headers: true,
            headers_ignore_padding: false,
            mask_sticky_region: true,
            columns: ColumnSpec::AutoFit,
            column_width: 0,
            horizontal_spacing: 0,
            vertical_spacing: 0,
        }
    }
}

/// State that survives a serialization boundary. Only the sticky flag is
/// persisted; everything else is transient and recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedState {
    pub sticky_headers: bool,
}

/// Grid view with sticky section headers.
///
/// A thin facade over a composed rendering engine: the tracker decides which
/// header is current on each scroll pass, the renderer overlays headers
/// during each draw pass, and the touch redirector restores click behavior
/// for headers drawn outside normal layout.
pub struct StickyGridView<S, E, L>
where
    S: HeaderSource,
    E: GridEngine,
    L: ViewLifecycle,
{
    source: S,
    engine: E,
    lifecycle: L,
    config: Config,
    metrics: GridMetrics,
    tracker: HeaderTracker,
    redirector: TouchRedirector,
    pressed: Option<TouchTarget>,
    scroll_state: ScrollState,
    on_item_click: Option<Box<dyn OnItemClick>>,
    on_item_long_click: Option<Box<dyn OnItemLongClick>>,
    on_item_selected: Option<Box<dyn OnItemSelected>>,
    on_header_click: Option<Box<dyn OnHeaderClick>>,
    on_header_long_click: Option<Box<dyn OnHeaderLongClick>>,
    on_scroll: Option<Box<dyn OnScroll>>,
}

impl<S, E, L> StickyGridView<S, E, L>
where
    S: HeaderSource,
    E: GridEngine,
    L: ViewLifecycle,
{
    pub fn new(source: S, engine: E, lifecycle: L) -> Self {
        let mut widget = Self {
            source,
            engine,
            lifecycle,
            config: Config::default(),
            metrics: GridMetrics::default(),
            tracker: HeaderTracker::new(),
            redirector: TouchRedirector::new(),
            pressed: None,
            scroll_state: ScrollState::Idle,
            on_item_click: None,
            on_item_long_click: None,
            on_item_selected: None,
            on_header_click: None,
            on_header_long_click: None,
            on_scroll: None,
        };
        widget.tracker.sync_version(&widget.source);
        widget.measure();
        widget
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn metrics(&self) -> GridMetrics {
        self.metrics
    }

    /// Replace the data source. Tracked state is reset, as on any
    /// invalidation.
    pub fn set_source(&mut self, source: S) -> Result<(), PlatformSupportError> {
        self.source = source;
        self.tracker.reset(&mut self.lifecycle)?;
        self.tracker.sync_version(&self.source);
        Ok(())
    }

    pub fn sticky_headers(&self) -> bool {
        self.config.sticky_headers
    }

    /// Toggle sticky headers. Turning the feature back on recomputes pinning
    /// for the current scroll position, as if it was never off.
    pub fn set_sticky_headers(&mut self, sticky: bool) -> Result<(), PlatformSupportError> {
        if sticky != self.config.sticky_headers {
            self.config.sticky_headers = sticky;
            self.relayout()?;
        }
        Ok(())
    }

    pub fn headers_ignore_padding(&self) -> bool {
        self.config.headers_ignore_padding
    }

    pub fn set_headers_ignore_padding(&mut self, ignore: bool) {
        self.config.headers_ignore_padding = ignore;
    }

    pub fn sticky_header_transparent(&self) -> bool {
        !self.config.mask_sticky_region
    }

    pub fn set_sticky_header_transparent(&mut self, transparent: bool) {
        self.config.mask_sticky_region = !transparent;
    }

    pub fn set_columns(&mut self, columns: ColumnSpec) {
        self.config.columns = columns;
        self.measure();
    }

    pub fn set_column_width(&mut self, width: i32) {
        self.config.column_width = width;
        self.measure();
    }

    pub fn set_horizontal_spacing(&mut self, spacing: i32) {
        self.config.horizontal_spacing = spacing;
        self.measure();
    }

    pub fn set_vertical_spacing(&mut self, spacing: i32) {
        self.config.vertical_spacing = spacing;
        self.measure();
    }

    pub fn set_on_item_click(&mut self, listener: impl OnItemClick + 'static) {
        self.on_item_click = Some(Box::new(listener));
    }

    pub fn set_on_item_long_click(&mut self, listener: impl OnItemLongClick + 'static) {
        self.on_item_long_click = Some(Box::new(listener));
    }

    pub fn set_on_item_selected(&mut self, listener: impl OnItemSelected + 'static) {
        self.on_item_selected = Some(Box::new(listener));
    }

    pub fn set_on_header_click(&mut self, listener: impl OnHeaderClick + 'static) {
        self.on_header_click = Some(Box::new(listener));
    }

    pub fn set_on_header_long_click(&mut self, listener: impl OnHeaderLongClick + 'static) {
        self.on_header_long_click = Some(Box::new(listener));
    }

    pub fn set_on_scroll(&mut self, listener: impl OnScroll + 'static) {
        self.on_scroll = Some(Box::new(listener));
    }

    /// Measurement pass: recompute column geometry from the current grid
    /// width and re-measure the pinned header.
    pub fn measure(&mut self) {
        let padding = self.engine.padding();
        let grid_width = (self.engine.width() - padding.left - padding.right).max(0);
        self.metrics = GridMetrics {
            columns: measure_columns(
                self.config.columns,
                self.config.column_width,
                self.config.horizontal_spacing,
                grid_width,
            ),
            column_width: self.config.column_width,
            horizontal_spacing: self.config.horizontal_spacing,
            vertical_spacing: self.config.vertical_spacing,
        };
        self.tracker.measure_pinned(&self.engine, &self.config);
    }

    /// Re-measure and retrack for the current scroll position.
    pub fn relayout(&mut self) -> Result<(), PlatformSupportError> {
        self.measure();
        let first = self.engine.first_visible_position();
        self.tracker.scroll_changed(
            first,
            &mut self.source,
            &self.engine,
            self.metrics,
            &self.config,
            &mut self.lifecycle,
        )
    }

    /// Scroll notification from the host grid. Forwards to the caller's
    /// scroll listener, then updates header tracking.
    pub fn on_scroll(
        &mut self,
        first_visible: usize,
        visible_count: usize,
        total_count: usize,
    ) -> Result<(), PlatformSupportError> {
        if let Some(listener) = self.on_scroll.as_mut() {
            listener.scrolled(first_visible, visible_count, total_count);
        }
        self.tracker.scroll_changed(
            first_visible,
            &mut self.source,
            &self.engine,
            self.metrics,
            &self.config,
            &mut self.lifecycle,
        )
    }

    pub fn on_scroll_state_changed(&mut self, state: ScrollState) {
        if let Some(listener) = self.on_scroll.as_mut() {
            listener.scroll_state_changed(state);
        }
        self.scroll_state = state;
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll_state
    }

    /// Draw pass. `base_draw` renders the host grid's own children; the
    /// widget wraps it with masking and header overlays.
    pub fn draw<F>(&mut self, canvas: &mut Canvas, base_draw: F)
    where
        F: FnOnce(&mut Canvas),
    {
        dispatch_draw(
            canvas,
            base_draw,
            &mut self.tracker,
            &self.source,
            &mut self.engine,
            self.metrics,
            &self.config,
        );
    }

    /// Pointer handling. Returns the translated copy to dispatch to the
    /// targeted header view, if any; the caller still passes the original
    /// event through to the base grid. Tapping a header (down and up on the
    /// same target) fires the header click listener.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<RedirectedEvent> {
        let redirected = self.redirector.on_event(
            event,
            &self.tracker,
            &self.source,
            &self.engine,
            self.metrics.columns,
        );

        match event.kind {
            PointerKind::Down => {
                self.pressed = redirected.map(|r| r.target);
            }
            PointerKind::Up => {
                if let Some(target) = redirected.map(|r| r.target) {
                    if self.pressed == Some(target) {
                        if let Some(id) = self.header_id_for_target(target) {
                            if let Some(listener) = self.on_header_click.as_mut() {
                                listener.header_click(id);
                            }
                        }
                    }
                }
                self.pressed = None;
            }
            PointerKind::Move => {}
        }

        redirected
    }

    /// Section id behind a touch target, if it still resolves.
    fn header_id_for_target(&self, target: TouchTarget) -> Option<HeaderId> {
        match target {
            TouchTarget::Pinned => {
                let id = self.tracker.current_header_id();
                (!id.is_none()).then_some(id)
            }
            TouchTarget::InFlow(vi) => self
                .engine
                .position_for_child(vi)
                .map(|pos| self.source.header_id_at(pos)),
        }
    }

    /// Host-driven long-press notification for the active header gesture.
    /// Returns true if a header long click listener consumed it.
    pub fn notify_header_long_press(&mut self) -> bool {
        let Some(target) = self.redirector.target() else {
            return false;
        };
        let Some(id) = self.header_id_for_target(target) else {
            return false;
        };
        self.pressed = None;
        match self.on_header_long_click.as_mut() {
            Some(listener) => listener.header_long_click(id),
            None => false,
        }
    }

    /// Click pass-through from the base grid, with the raw (header-adjusted)
    /// position translated back to the caller's item space. Header rows go
    /// to the header click listener instead.
    pub fn notify_item_click(&mut self, raw_position: usize) {
        match split_position(self.source.translate_position(raw_position)) {
            Ok(index) => {
                if let Some(listener) = self.on_item_click.as_mut() {
                    listener.item_click(index);
                }
            }
            Err(id) => {
                if let Some(listener) = self.on_header_click.as_mut() {
                    listener.header_click(id);
                }
            }
        }
    }

    pub fn notify_item_long_click(&mut self, raw_position: usize) -> bool {
        match split_position(self.source.translate_position(raw_position)) {
            Ok(index) => match self.on_item_long_click.as_mut() {
                Some(listener) => listener.item_long_click(index),
                None => false,
            },
            Err(id) => match self.on_header_long_click.as_mut() {
                Some(listener) => listener.header_long_click(id),
                None => false,
            },
        }
    }

    pub fn notify_item_selected(&mut self, raw_position: usize) {
        if let Ok(index) = split_position(self.source.translate_position(raw_position)) {
            if let Some(listener) = self.on_item_selected.as_mut() {
                listener.item_selected(index);
            }
        }
    }

    pub fn notify_nothing_selected(&mut self) {
        if let Some(listener) = self.on_item_selected.as_mut() {
            listener.nothing_selected();
        }
    }

    pub fn current_header_id(&self) -> HeaderId {
        self.tracker.current_header_id()
    }

    pub fn header_bottom(&self) -> i32 {
        self.tracker.header_bottom()
    }

    /// The currently pinned header view, if any.
    pub fn pinned_header(&self) -> Option<&dyn HeaderView> {
        self.tracker.pinned_view()
    }

    /// Header view for a touch target: the pinned view, or the in-flow view
    /// at a visible row index. Absent on any lookup failure.
    pub fn header_at(&self, target: TouchTarget) -> Option<&dyn HeaderView> {
        match target {
            TouchTarget::Pinned => self.tracker.pinned_view(),
            TouchTarget::InFlow(vi) => self.engine.header_view_at(vi),
        }
    }

    pub fn saved_state(&self) -> SavedState {
        SavedState {
            sticky_headers: self.config.sticky_headers,
        }
    }

    pub fn restore_state(&mut self, state: SavedState) -> Result<(), PlatformSupportError> {
        self.set_sticky_headers(state.sticky_headers)
    }

    /// Data-change signal from the host; resets tracked state so the next
    /// scroll pass starts from scratch.
    pub fn invalidate(&mut self) -> Result<(), PlatformSupportError> {
        self.tracker.reset(&mut self.lifecycle)?;
        self.tracker.sync_version(&self.source);
        Ok(())
    }
}
