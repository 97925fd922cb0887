use crate::buffer::{Buffer, Cell};
use crate::geometry::Rect;

#[derive(Debug, Clone, Copy)]
struct CanvasState {
    /// Clip rect in buffer coordinates.
    clip: Rect,
    dx: i32,
    dy: i32,
    alpha: u8,
}

/// Drawing surface with a save/restore stack of clip, translation and alpha
/// state, wrapping a cell buffer.
///
/// Writes are given in the current translated coordinate space, clipped to
/// the intersection of every clip rect pushed so far, and alpha-blended
/// against whatever is already in the buffer when a translucent layer is
/// active.
pub struct Canvas<'a> {
    buf: &'a mut Buffer,
    stack: Vec<CanvasState>,
    state: CanvasState,
}

impl<'a> Canvas<'a> {
    pub fn new(buf: &'a mut Buffer) -> Self {
        let clip = Rect::from_size(buf.width(), buf.height());
        Self {
            buf,
            stack: Vec::new(),
            state: CanvasState {
                clip,
                dx: 0,
                dy: 0,
                alpha: 255,
            },
        }
    }

    pub fn width(&self) -> i32 {
        self.buf.width()
    }

    pub fn height(&self) -> i32 {
        self.buf.height()
    }

    pub fn save(&mut self) {
        self.stack.push(self.state);
    }

    /// Pop back to the most recent save. Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    /// Intersect the current clip with `rect` (in current coordinates).
    pub fn clip_rect(&mut self, rect: Rect) {
        let in_buffer = rect.translate(self.state.dx, self.state.dy);
        self.state.clip = self.state.clip.intersect(in_buffer);
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.state.dx += dx;
        self.state.dy += dy;
    }

    /// Save, then make every subsequent write blend with the given alpha
    /// until the matching restore. Nested layers multiply.
    pub fn save_layer_alpha(&mut self, alpha: u8) {
        self.save();
        let combined = (self.state.alpha as u32 * alpha as u32) / 255;
        self.state.alpha = combined as u8;
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        let bx = x + self.state.dx;
        let by = y + self.state.dy;
        if !self.state.clip.contains(bx, by) {
            return;
        }
        let blended = if self.state.alpha == 255 {
            cell
        } else {
            match self.buf.get(bx, by) {
                Some(under) => Cell {
                    ch: cell.ch,
                    fg: cell.fg.blend_over(under.fg, self.state.alpha),
                    bg: cell.bg.blend_over(under.bg, self.state.alpha),
                },
                None => cell,
            }
        };
        self.buf.set(bx, by, blended);
    }

    pub fn fill_rect(&mut self, rect: Rect, cell: Cell) {
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                self.set(x, y, cell);
            }
        }
    }
}
