use std::collections::HashMap;
use std::fs::File;

use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};
use stickygrid::{
    Buffer, Canvas, Cell, ColumnSpec, DirectLifecycle, Edges, GridEngine, HeaderId, HeaderSource,
    HeaderView, ItemPosition, Rect, Rgb, StickyGridView, TextHeaderView,
};

const COLUMNS: usize = 2;
const HEADER_HEIGHT: i32 = 2;
const ROW_HEIGHT: i32 = 1;
const WIDTH: i32 = 32;
const VIEWPORT: i32 = 10;

/// Sections with a header row followed by item rows; every visual row spans
/// COLUMNS linear positions.
struct DemoSource {
    labels: Vec<&'static str>,
    /// (section, is_header) per visual row.
    rows: Vec<(usize, bool)>,
    version: u64,
}

impl DemoSource {
    fn new(sections: &[(&'static str, usize)]) -> Self {
        let mut labels = Vec::new();
        let mut rows = Vec::new();
        for (index, (label, item_rows)) in sections.iter().enumerate() {
            labels.push(*label);
            rows.push((index, true));
            for _ in 0..*item_rows {
                rows.push((index, false));
            }
        }
        Self {
            labels,
            rows,
            version: 0,
        }
    }

    fn row_at(&self, position: usize) -> Option<(usize, bool)> {
        self.rows.get(position / COLUMNS).copied()
    }
}

impl HeaderSource for DemoSource {
    fn item_count(&self) -> usize {
        self.rows.len() * COLUMNS
    }

    fn is_header_row(&self, position: usize) -> bool {
        self.row_at(position).map(|(_, h)| h).unwrap_or(false)
    }

    fn header_id_at(&self, position: usize) -> HeaderId {
        self.row_at(position)
            .map(|(section, _)| HeaderId(section as i64 + 1))
            .unwrap_or(HeaderId::NONE)
    }

    fn header_view_for(
        &mut self,
        anchor: usize,
        _recycled: Option<Box<dyn HeaderView>>,
    ) -> Option<Box<dyn HeaderView>> {
        let (section, _) = self.row_at(anchor)?;
        Some(Box::new(
            TextHeaderView::new(self.labels[section], HEADER_HEIGHT)
                .with_colors(Rgb::BLACK, Rgb::new(200, 200, 80)),
        ))
    }

    fn translate_position(&self, position: usize) -> ItemPosition {
        let row_index = position / COLUMNS;
        match self.rows.get(row_index) {
            Some((section, true)) => ItemPosition::Header(HeaderId(*section as i64 + 1)),
            _ => {
                let items_before: usize = self.rows[..row_index.min(self.rows.len())]
                    .iter()
                    .filter(|(_, h)| !h)
                    .count()
                    * COLUMNS;
                ItemPosition::Item(items_before + position % COLUMNS)
            }
        }
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Fixed-height rows scrolled by a pixel offset.
struct DemoGrid {
    row_heights: Vec<i32>,
    header_views: HashMap<usize, TextHeaderView>,
    scroll_y: i32,
}

impl DemoGrid {
    fn new(source: &DemoSource) -> Self {
        let mut row_heights = Vec::new();
        let mut header_views = HashMap::new();
        for (row, (section, is_header)) in source.rows.iter().enumerate() {
            if *is_header {
                row_heights.push(HEADER_HEIGHT);
                header_views.insert(
                    row,
                    TextHeaderView::new(source.labels[*section], HEADER_HEIGHT)
                        .with_colors(Rgb::BLACK, Rgb::new(200, 200, 80)),
                );
            } else {
                row_heights.push(ROW_HEIGHT);
            }
        }
        Self {
            row_heights,
            header_views,
            scroll_y: 0,
        }
    }

    fn row_top(&self, row: usize) -> i32 {
        self.row_heights[..row].iter().sum::<i32>() - self.scroll_y
    }

    fn visible_rows(&self) -> Option<(usize, usize)> {
        let mut bounds = None;
        for row in 0..self.row_heights.len() {
            let top = self.row_top(row);
            if top + self.row_heights[row] > 0 && top < VIEWPORT {
                bounds = Some(match bounds {
                    None => (row, row),
                    Some((first, _)) => (first, row),
                });
            }
        }
        bounds
    }

    fn row_for_child(&self, visible_index: usize) -> Option<usize> {
        let (first, last) = self.visible_rows()?;
        let row = first + visible_index / COLUMNS;
        (row <= last).then_some(row)
    }
}

impl GridEngine for DemoGrid {
    fn first_visible_position(&self) -> usize {
        self.visible_rows().map(|(f, _)| f * COLUMNS).unwrap_or(0)
    }

    fn last_visible_position(&self) -> usize {
        self.visible_rows()
            .map(|(_, l)| l * COLUMNS + COLUMNS - 1)
            .unwrap_or(0)
    }

    fn child_count(&self) -> usize {
        self.visible_rows()
            .map(|(f, l)| (l - f + 1) * COLUMNS)
            .unwrap_or(0)
    }

    fn child_frame(&self, visible_index: usize) -> Option<Rect> {
        let row = self.row_for_child(visible_index)?;
        Some(Rect::new(0, self.row_top(row), WIDTH, self.row_heights[row]))
    }

    fn position_for_child(&self, visible_index: usize) -> Option<usize> {
        self.row_for_child(visible_index)?;
        Some(self.first_visible_position() + visible_index)
    }

    fn header_view_at(&self, visible_index: usize) -> Option<&dyn HeaderView> {
        let row = self.row_for_child(visible_index)?;
        self.header_views.get(&row).map(|v| v as &dyn HeaderView)
    }

    fn header_view_at_mut(&mut self, visible_index: usize) -> Option<&mut dyn HeaderView> {
        let row = self.row_for_child(visible_index)?;
        self.header_views
            .get_mut(&row)
            .map(|v| v as &mut dyn HeaderView)
    }

    fn width(&self) -> i32 {
        WIDTH
    }

    fn height(&self) -> i32 {
        VIEWPORT
    }

    fn padding(&self) -> Edges {
        Edges::default()
    }

    fn clip_to_padding(&self) -> bool {
        false
    }
}

fn main() -> std::io::Result<()> {
    let log_file = File::create("stickygrid-demo.log")?;
    WriteLogger::init(LevelFilter::Debug, LogConfig::default(), log_file)
        .expect("failed to initialize logger");

    let source = DemoSource::new(&[("Fruits", 3), ("Vegetables", 4), ("Grains", 2)]);
    let grid = DemoGrid::new(&source);
    let mut widget = StickyGridView::new(source, grid, DirectLifecycle);
    widget.set_columns(ColumnSpec::Fixed(COLUMNS));

    for scroll in [0, 2, 4, 5, 6, 8, 10] {
        widget.engine_mut().scroll_y = scroll;
        let first = widget.engine().first_visible_position();
        let visible = widget.engine().child_count();
        let total = widget.source().item_count();
        widget
            .on_scroll(first, visible, total)
            .expect("direct lifecycle never fails");

        let mut buf = Buffer::new(WIDTH, VIEWPORT);
        let mut canvas = Canvas::new(&mut buf);
        widget.draw(&mut canvas, |c| {
            // Stand-in for the host grid's own item rendering.
            c.fill_rect(
                Rect::new(0, 0, WIDTH, VIEWPORT),
                Cell::new('.').with_bg(Rgb::new(20, 20, 60)),
            );
        });

        println!(
            "scroll={scroll} current={:?} bottom={}",
            widget.current_header_id(),
            widget.header_bottom()
        );
        for y in 0..VIEWPORT {
            let line: String = (0..WIDTH)
                .map(|x| buf.get(x, y).map(|c| c.ch).unwrap_or(' '))
                .collect();
            println!("  |{line}|");
        }
    }

    Ok(())
}
