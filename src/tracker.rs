use crate::geometry::Rect;
use crate::grid::{GridEngine, GridMetrics};
use crate::lifecycle::{PlatformSupportError, ViewLifecycle};
use crate::source::{HeaderId, HeaderSource};
use crate::view::HeaderView;
use crate::widget::Config;

/// Tracks which header is current and where its pinned copy sits.
///
/// All state here is transient: it is recomputed lazily on each scroll pass
/// and thrown away whenever the data source changes. At most one view is
/// pinned at a time, and the tracker owns it exclusively between attach and
/// release.
pub struct HeaderTracker {
    current_header_id: HeaderId,
    pinned: Option<Box<dyn HeaderView>>,
    /// Bottom edge of the pinned header in view coordinates. 0 while
    /// suppressed, up to the full header height when fully revealed.
    header_bottom: i32,
    last_seen_version: u64,
}

impl Default for HeaderTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderTracker {
    pub fn new() -> Self {
        Self {
            current_header_id: HeaderId::NONE,
            pinned: None,
            header_bottom: 0,
            last_seen_version: 0,
        }
    }

    pub fn current_header_id(&self) -> HeaderId {
        self.current_header_id
    }

    pub fn header_bottom(&self) -> i32 {
        self.header_bottom
    }

    /// Measured height of the pinned header, or 0 when nothing is pinned.
    pub fn header_height(&self) -> i32 {
        self.pinned
            .as_ref()
            .map(|view| view.measured_height())
            .unwrap_or(0)
    }

    pub fn pinned_view(&self) -> Option<&dyn HeaderView> {
        self.pinned.as_deref()
    }

    pub fn pinned_view_mut(&mut self) -> Option<&mut (dyn HeaderView + 'static)> {
        self.pinned.as_deref_mut()
    }

    /// Release the pinned view and invalidate the tracked id. The next
    /// scroll pass behaves as if no header was ever pinned.
    pub fn reset(
        &mut self,
        lifecycle: &mut dyn ViewLifecycle,
    ) -> Result<(), PlatformSupportError> {
        self.header_bottom = 0;
        if let Some(mut view) = self.pinned.take() {
            lifecycle.detach_header(view.as_mut())?;
        }
        self.current_header_id = HeaderId::NONE;
        Ok(())
    }

    /// Keep the tracked version in step with the source after an explicit
    /// reset, so the polling check does not fire a second time.
    pub fn sync_version(&mut self, source: &dyn HeaderSource) {
        self.last_seen_version = source.version();
    }

    /// Re-measure and re-lay-out the pinned header to the current content
    /// width. Runs on every measurement pass and after each swap.
    pub fn measure_pinned(&mut self, engine: &dyn GridEngine, config: &Config) {
        if let Some(view) = self.pinned.as_deref_mut() {
            measure_header_view(view, engine, config);
        }
    }

    /// Recompute the current header and its pinned offset for the given
    /// first visible linear position.
    pub fn scroll_changed(
        &mut self,
        first_visible: usize,
        source: &mut dyn HeaderSource,
        engine: &dyn GridEngine,
        metrics: GridMetrics,
        config: &Config,
        lifecycle: &mut dyn ViewLifecycle,
    ) -> Result<(), PlatformSupportError> {
        if source.item_count() == 0 || !config.sticky_headers {
            return Ok(());
        }

        if source.version() != self.last_seen_version {
            self.reset(lifecycle)?;
            self.last_seen_version = source.version();
        }

        let Some(first_frame) = engine.child_frame(0) else {
            return Ok(());
        };

        let columns = metrics.columns.max(1);
        let count = source.item_count();

        // Candidate anchors: the row before, the first visible row, and the
        // row one grid-row down, clamped at the sequence ends.
        let before_row = if first_visible < columns {
            first_visible
        } else {
            first_visible - columns
        };
        let second_row = if first_visible + columns >= count {
            first_visible
        } else {
            first_visible + columns
        };

        let mut selected_anchor = first_visible;
        let new_header_id = if metrics.vertical_spacing == 0 {
            source.header_id_at(first_visible)
        } else if metrics.vertical_spacing < 0 {
            // Overlapping rows: once the next row's top reaches the view
            // top, its section is the current one.
            match engine.child_frame(columns) {
                Some(frame) if frame.top() <= 0 => {
                    selected_anchor = second_row;
                    source.header_id_at(second_row)
                }
                _ => source.header_id_at(first_visible),
            }
        } else {
            // Gapped rows: while a gap is partially visible at the top the
            // previous row's section is still current.
            let margin = first_frame.top();
            if 0 < margin && margin < metrics.vertical_spacing {
                selected_anchor = before_row;
                source.header_id_at(before_row)
            } else {
                source.header_id_at(first_visible)
            }
        };

        if new_header_id != self.current_header_id {
            log::debug!(
                "header transition {:?} -> {:?} (anchor {})",
                self.current_header_id,
                new_header_id,
                selected_anchor
            );
            self.swap_pinned(selected_anchor, source, engine, config, lifecycle)?;
            self.current_header_id = new_header_id;
        }

        self.update_header_bottom(first_visible, first_frame, source, engine, metrics);
        Ok(())
    }

    /// Release the old pinned view back to the source as the recycle
    /// candidate, and attach whatever the source hands back.
    fn swap_pinned(
        &mut self,
        anchor: usize,
        source: &mut dyn HeaderSource,
        engine: &dyn GridEngine,
        config: &Config,
        lifecycle: &mut dyn ViewLifecycle,
    ) -> Result<(), PlatformSupportError> {
        let recycled = match self.pinned.take() {
            Some(mut view) => {
                lifecycle.detach_header(view.as_mut())?;
                Some(view)
            }
            None => None,
        };

        let mut fresh = source.header_view_for(anchor, recycled);
        if let Some(view) = fresh.as_deref_mut() {
            measure_header_view(view, engine, config);
            lifecycle.attach_header(view)?;
        }
        self.pinned = fresh;
        Ok(())
    }

    fn update_header_bottom(
        &mut self,
        first_visible: usize,
        first_frame: Rect,
        source: &dyn HeaderSource,
        engine: &dyn GridEngine,
        metrics: GridMetrics,
    ) {
        let child_count = engine.child_count();
        if child_count == 0 {
            return;
        }

        let columns = metrics.columns.max(1);
        let padding = engine.padding();
        let clipping = engine.clip_to_padding();

        // Nearest in-flow header row whose top sits at or below the
        // clipping boundary.
        let mut watched: Option<Rect> = None;
        let mut watched_distance = i32::MAX;
        let mut vi = 0;
        while vi < child_count {
            if let Some(frame) = engine.child_frame(vi) {
                let distance = if clipping {
                    frame.top() - padding.top
                } else {
                    frame.top()
                };
                if distance >= 0 {
                    let is_header = engine
                        .position_for_child(vi)
                        .map(|pos| source.is_header_row(pos))
                        .unwrap_or(false);
                    if is_header && distance < watched_distance {
                        watched = Some(frame);
                        watched_distance = distance;
                    }
                }
            }
            vi += columns;
        }

        let header_height = self.header_height();

        self.header_bottom = match watched {
            Some(frame) => {
                if first_visible == 0 && first_frame.top() > 0 && !clipping {
                    // The whole sequence starts below the top edge; nothing
                    // to pin over.
                    0
                } else if clipping {
                    let bottom = frame.top().min(header_height + padding.top);
                    if bottom < padding.top {
                        header_height + padding.top
                    } else {
                        bottom
                    }
                } else {
                    let bottom = frame.top().min(header_height);
                    if bottom < 0 {
                        header_height
                    } else {
                        bottom
                    }
                }
            }
            None => {
                // No in-flow header approaching: fully pinned.
                header_height + if clipping { padding.top } else { 0 }
            }
        };
        log::trace!(
            "header bottom {} (height {})",
            self.header_bottom,
            header_height
        );
    }
}

/// Content width available to header views: the full grid width, minus
/// horizontal padding unless headers are configured to ignore it.
pub(crate) fn header_content_width(engine: &dyn GridEngine, config: &Config) -> i32 {
    if config.headers_ignore_padding {
        engine.width()
    } else {
        engine.width() - engine.padding().left - engine.padding().right
    }
}

/// Left edge header views are laid out against.
pub(crate) fn header_left(engine: &dyn GridEngine, config: &Config) -> i32 {
    if config.headers_ignore_padding {
        0
    } else {
        engine.padding().left
    }
}

pub(crate) fn measure_header_view(
    view: &mut dyn HeaderView,
    engine: &dyn GridEngine,
    config: &Config,
) {
    let width = header_content_width(engine, config);
    view.measure(width);
    let left = header_left(engine, config);
    let height = view.measured_height();
    view.layout(Rect::new(left, 0, width, height));
}
