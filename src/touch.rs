use crossterm::event::{MouseEvent, MouseEventKind};

use crate::grid::GridEngine;
use crate::source::HeaderSource;
use crate::tracker::HeaderTracker;

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A pointer event in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: i32,
    pub y: i32,
}

impl PointerEvent {
    pub const fn new(kind: PointerKind, x: i32, y: i32) -> Self {
        Self { kind, x, y }
    }
}

impl From<MouseEvent> for PointerEvent {
    fn from(event: MouseEvent) -> Self {
        let kind = match event.kind {
            MouseEventKind::Down(_) => PointerKind::Down,
            MouseEventKind::Up(_) => PointerKind::Up,
            _ => PointerKind::Move,
        };
        Self {
            kind,
            x: event.column as i32,
            y: event.row as i32,
        }
    }
}

/// Which header a gesture is being redirected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchTarget {
    /// The pinned header, drawn at the canvas origin.
    Pinned,
    /// The in-flow header row at the given visible child index.
    InFlow(usize),
}

/// A coordinate-translated copy of a pointer event, ready to dispatch to the
/// targeted header view in addition to the base grid's own handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectedEvent {
    pub target: TouchTarget,
    pub event: PointerEvent,
}

/// Re-targets pointer gestures at header views.
///
/// The base grid's hit-testing only resolves to item rows; the pinned header
/// is drawn outside normal layout and in-flow headers can sit under the pin.
/// On pointer-down the redirector picks a header target, and every event of
/// the active gesture produces a translated copy for that target until
/// pointer-up clears it.
#[derive(Debug, Default)]
pub struct TouchRedirector {
    target: Option<TouchTarget>,
}

impl TouchRedirector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<TouchTarget> {
        self.target
    }

    pub fn clear(&mut self) {
        self.target = None;
    }

    pub fn on_event(
        &mut self,
        event: PointerEvent,
        tracker: &HeaderTracker,
        source: &dyn HeaderSource,
        engine: &dyn GridEngine,
        columns: usize,
    ) -> Option<RedirectedEvent> {
        if event.kind == PointerKind::Down {
            self.target = find_touch_header(event.y, tracker, source, engine, columns);
        }

        let redirected = self.target.map(|target| RedirectedEvent {
            target,
            event: translate_event(event, target, engine),
        });

        if event.kind == PointerKind::Up {
            self.target = None;
        }

        redirected
    }
}

/// Resolve the header under the given y coordinate: the pinned header if the
/// touch is at or above its bottom edge, otherwise the in-flow header row
/// whose span contains the touch.
fn find_touch_header(
    y: i32,
    tracker: &HeaderTracker,
    source: &dyn HeaderSource,
    engine: &dyn GridEngine,
    columns: usize,
) -> Option<TouchTarget> {
    if tracker.pinned_view().is_some() && y <= tracker.header_bottom() {
        return Some(TouchTarget::Pinned);
    }

    if engine.child_count() == 0 {
        return None;
    }

    let columns = columns.max(1);
    let mut vi = 0;
    let mut pos = engine.first_visible_position();
    while pos <= engine.last_visible_position() && vi < engine.child_count() {
        if source.is_header_row(pos) {
            if let Some(frame) = engine.child_frame(vi) {
                if y >= frame.top() && y <= frame.bottom() {
                    return Some(TouchTarget::InFlow(vi));
                }
            }
        }
        pos += columns;
        vi += columns;
    }

    None
}

/// Shift the event into the target's coordinate space. The pinned header is
/// drawn at the canvas origin, so its events pass through untranslated.
fn translate_event(event: PointerEvent, target: TouchTarget, engine: &dyn GridEngine) -> PointerEvent {
    match target {
        TouchTarget::Pinned => event,
        TouchTarget::InFlow(vi) => {
            let top = engine.child_frame(vi).map(|f| f.top()).unwrap_or(0);
            PointerEvent {
                y: event.y - top,
                ..event
            }
        }
    }
}
