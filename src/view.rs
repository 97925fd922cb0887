use unicode_width::UnicodeWidthChar;

use crate::buffer::{Cell, Rgb};
use crate::canvas::Canvas;
use crate::geometry::Rect;

/// A header view the widget can measure, lay out and draw.
///
/// Views draw in their own coordinate space starting at the origin; the
/// renderer translates and clips the canvas before calling [`draw`].
///
/// [`draw`]: HeaderView::draw
pub trait HeaderView {
    /// Measure to the given content width. The view picks its own height.
    fn measure(&mut self, width: i32);

    /// Position the view; `frame` is relative to the hosting grid.
    fn layout(&mut self, frame: Rect);

    fn frame(&self) -> Rect;

    fn measured_width(&self) -> i32;

    fn measured_height(&self) -> i32;

    fn is_visible(&self) -> bool;

    fn draw(&self, canvas: &mut Canvas);
}

/// Built-in header view rendering a single label row.
#[derive(Debug, Clone)]
pub struct TextHeaderView {
    label: String,
    row_height: i32,
    fg: Rgb,
    bg: Rgb,
    visible: bool,
    measured: (i32, i32),
    frame: Rect,
}

impl TextHeaderView {
    pub fn new(label: impl Into<String>, row_height: i32) -> Self {
        Self {
            label: label.into(),
            row_height: row_height.max(1),
            fg: Rgb::WHITE,
            bg: Rgb::new(40, 40, 40),
            visible: true,
            measured: (0, 0),
            frame: Rect::default(),
        }
    }

    pub fn with_colors(mut self, fg: Rgb, bg: Rgb) -> Self {
        self.fg = fg;
        self.bg = bg;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl HeaderView for TextHeaderView {
    fn measure(&mut self, width: i32) {
        self.measured = (width.max(0), self.row_height);
    }

    fn layout(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn frame(&self) -> Rect {
        self.frame
    }

    fn measured_width(&self) -> i32 {
        self.measured.0
    }

    fn measured_height(&self) -> i32 {
        self.measured.1
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn draw(&self, canvas: &mut Canvas) {
        let bounds = Rect::from_size(self.frame.width, self.frame.height);
        canvas.fill_rect(bounds, Cell::new(' ').with_fg(self.fg).with_bg(self.bg));

        // Label on the first row, truncated to the measured width.
        let mut x = 1;
        for ch in self.label.chars() {
            let w = ch.width().unwrap_or(0) as i32;
            if x + w > bounds.width {
                break;
            }
            canvas.set(x, 0, Cell::new(ch).with_fg(self.fg).with_bg(self.bg));
            x += w;
        }
    }
}
