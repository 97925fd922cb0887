use crate::canvas::Canvas;
use crate::geometry::Rect;
use crate::grid::{GridEngine, GridMetrics};
use crate::source::HeaderSource;
use crate::tracker::{header_content_width, header_left, HeaderTracker};
use crate::widget::Config;

/// Draw one frame: mask the pinned region, run the host grid's own draw,
/// overlay the in-flow header rows, then the pinned header on top.
///
/// The mask clip has to be in place before the base draw so the grid does
/// not show through where the pinned header lands, which is why this wraps
/// the base draw instead of running after it.
pub fn dispatch_draw<F>(
    canvas: &mut Canvas,
    base_draw: F,
    tracker: &mut HeaderTracker,
    source: &dyn HeaderSource,
    engine: &mut dyn GridEngine,
    metrics: GridMetrics,
    config: &Config,
) where
    F: FnOnce(&mut Canvas),
{
    let padding = engine.padding();
    let width = engine.width();
    let height = engine.height();
    let columns = metrics.columns.max(1);

    let draw_pinned = config.sticky_headers
        && tracker
            .pinned_view()
            .map(|view| view.is_visible())
            .unwrap_or(false);
    let header_height = tracker.header_height();
    let header_bottom = tracker.header_bottom();

    let (clip_left, clip_right) = if config.headers_ignore_padding {
        (0, width)
    } else {
        (padding.left, width - padding.right)
    };

    let masked = draw_pinned && config.mask_sticky_region;
    if masked {
        canvas.save();
        canvas.clip_rect(Rect::new(
            clip_left,
            header_bottom,
            clip_right - clip_left,
            height - header_bottom,
        ));
    }

    base_draw(canvas);

    draw_in_flow_headers(canvas, tracker, source, engine, columns, config);

    if masked {
        canvas.restore();
    }
    if !draw_pinned {
        return;
    }

    // Width can go stale across a resize; re-measure to the wanted content
    // width before drawing the pin.
    let wanted_width = header_content_width(engine, config);
    let left = header_left(engine, config);
    if let Some(view) = tracker.pinned_view_mut() {
        if view.measured_width() != wanted_width {
            view.measure(wanted_width);
            let measured_height = view.measured_height();
            view.layout(Rect::new(left, 0, wanted_width, measured_height));
        }
    }

    let clip_top = if engine.clip_to_padding() {
        padding.top
    } else {
        0
    };
    let top = header_bottom - header_height;

    canvas.save();
    canvas.clip_rect(Rect::new(
        clip_left,
        clip_top,
        clip_right - clip_left,
        header_bottom - clip_top,
    ));
    canvas.translate(left, top);

    // Partial transition: cross-fade proportionally to the revealed height.
    let fading = header_bottom != header_height && header_height > 0;
    if fading {
        let alpha = ((255 * header_bottom) / header_height).clamp(0, 255) as u8;
        canvas.save_layer_alpha(alpha);
    }

    if let Some(view) = tracker.pinned_view() {
        view.draw(canvas);
    }

    if fading {
        canvas.restore();
    }
    canvas.restore();
}

/// Overlay pass for header rows at their natural positions. The row that the
/// pin currently represents (same id, scrolled past the top) is skipped so
/// it is not drawn twice.
fn draw_in_flow_headers(
    canvas: &mut Canvas,
    tracker: &HeaderTracker,
    source: &dyn HeaderSource,
    engine: &mut dyn GridEngine,
    columns: usize,
    config: &Config,
) {
    if engine.child_count() == 0 {
        return;
    }

    let first = engine.first_visible_position();
    let last = engine.last_visible_position();
    let wanted_width = header_content_width(engine, config);
    let left = header_left(engine, config);
    let (clip_left, clip_right) = if config.headers_ignore_padding {
        (0, engine.width())
    } else {
        (
            engine.padding().left,
            engine.width() - engine.padding().right,
        )
    };

    let mut vi = 0;
    let mut pos = first;
    while pos <= last && vi < engine.child_count() {
        if source.is_header_row(pos) {
            let frame = engine.child_frame(vi);
            let row_id = engine
                .position_for_child(vi)
                .map(|p| source.header_id_at(p));
            if let (Some(frame), Some(row_id)) = (frame, row_id) {
                let stickied = row_id == tracker.current_header_id()
                    && frame.top() < 0
                    && config.sticky_headers;
                // A row with no header association is routine churn, not an
                // error; skip it.
                if let Some(view) = engine.header_view_at_mut(vi) {
                    if view.is_visible() && !stickied {
                        view.measure(wanted_width);
                        view.layout(Rect::new(left, 0, wanted_width, frame.height));
                        canvas.save();
                        canvas.clip_rect(Rect::new(
                            clip_left,
                            frame.top(),
                            clip_right - clip_left,
                            frame.height,
                        ));
                        canvas.translate(left, frame.top());
                        view.draw(canvas);
                        canvas.restore();
                    }
                }
            }
        }
        pos += columns;
        vi += columns;
    }
}
