#![allow(dead_code)]

use std::collections::HashMap;

use stickygrid::{
    ColumnSpec, DirectLifecycle, Edges, GridEngine, HeaderId, HeaderSource, HeaderView,
    ItemPosition, Rect, StickyGridView, TextHeaderView,
};

/// One visual row of the flattened sequence. Every row spans `columns`
/// linear positions, headers included (the adapter pads header rows with
/// filler positions so stepping by the column count always lands on a row
/// start).
#[derive(Debug, Clone, Copy)]
struct RowInfo {
    section: usize,
    is_header: bool,
}

/// Scripted data source: a list of sections, each a header row followed by
/// its item rows.
pub struct FakeSource {
    ids: Vec<HeaderId>,
    labels: Vec<String>,
    rows: Vec<RowInfo>,
    columns: usize,
    header_height: i32,
    version: u64,
    /// Number of header_view_for calls, for idempotence assertions.
    pub fetches: usize,
}

impl FakeSource {
    /// `sections` is (id, label, item count); item counts should be a
    /// multiple of `columns` so rows stay full.
    pub fn new(sections: &[(i64, &str, usize)], columns: usize, header_height: i32) -> Self {
        let mut ids = Vec::new();
        let mut labels = Vec::new();
        let mut rows = Vec::new();
        for (index, (id, label, items)) in sections.iter().enumerate() {
            ids.push(HeaderId(*id));
            labels.push((*label).to_string());
            rows.push(RowInfo {
                section: index,
                is_header: true,
            });
            let item_rows = items.div_ceil(columns);
            for _ in 0..item_rows {
                rows.push(RowInfo {
                    section: index,
                    is_header: false,
                });
            }
        }
        Self {
            ids,
            labels,
            rows,
            columns,
            header_height,
            version: 0,
            fetches: 0,
        }
    }

    pub fn invalidate(&mut self) {
        self.version += 1;
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row_at(&self, position: usize) -> Option<RowInfo> {
        self.rows.get(position / self.columns).copied()
    }
}

impl HeaderSource for FakeSource {
    fn item_count(&self) -> usize {
        self.rows.len() * self.columns
    }

    fn is_header_row(&self, position: usize) -> bool {
        self.row_at(position).map(|r| r.is_header).unwrap_or(false)
    }

    fn header_id_at(&self, position: usize) -> HeaderId {
        self.row_at(position)
            .map(|r| self.ids[r.section])
            .unwrap_or(HeaderId::NONE)
    }

    fn header_view_for(
        &mut self,
        anchor: usize,
        _recycled: Option<Box<dyn HeaderView>>,
    ) -> Option<Box<dyn HeaderView>> {
        self.fetches += 1;
        let row = self.row_at(anchor)?;
        Some(Box::new(TextHeaderView::new(
            self.labels[row.section].clone(),
            self.header_height,
        )))
    }

    fn translate_position(&self, position: usize) -> ItemPosition {
        let row_index = position / self.columns;
        let Some(row) = self.rows.get(row_index) else {
            return ItemPosition::Item(position);
        };
        if row.is_header {
            return ItemPosition::Header(self.ids[row.section]);
        }
        let mut index = 0;
        for r in &self.rows[..row_index] {
            if !r.is_header {
                index += self.columns;
            }
        }
        ItemPosition::Item(index + position % self.columns)
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Layout parameters for the scripted grid.
#[derive(Debug, Clone, Copy)]
pub struct GridParams {
    pub width: i32,
    pub viewport_height: i32,
    pub padding: Edges,
    pub clip_to_padding: bool,
    pub vertical_spacing: i32,
    pub header_height: i32,
    pub row_height: i32,
}

impl GridParams {
    pub fn pixels() -> Self {
        Self {
            width: 200,
            viewport_height: 100,
            padding: Edges::default(),
            clip_to_padding: false,
            vertical_spacing: 0,
            header_height: 40,
            row_height: 20,
        }
    }

    pub fn cells() -> Self {
        Self {
            width: 20,
            viewport_height: 12,
            padding: Edges::default(),
            clip_to_padding: false,
            vertical_spacing: 0,
            header_height: 2,
            row_height: 2,
        }
    }
}

/// Scripted grid engine: lays rows out top-down with a scroll offset and
/// reports whatever intersects the viewport, like a host grid would.
pub struct FakeGrid {
    row_heights: Vec<i32>,
    header_views: HashMap<usize, TextHeaderView>,
    columns: usize,
    pub params: GridParams,
    pub scroll_y: i32,
}

impl FakeGrid {
    pub fn new(source: &FakeSource, params: GridParams) -> Self {
        let mut row_heights = Vec::new();
        let mut header_views = HashMap::new();
        for (row, info) in source.rows.iter().enumerate() {
            if info.is_header {
                row_heights.push(params.header_height);
                header_views.insert(
                    row,
                    TextHeaderView::new(source.labels[info.section].clone(), params.header_height),
                );
            } else {
                row_heights.push(params.row_height);
            }
        }
        Self {
            row_heights,
            header_views,
            columns: source.columns,
            params,
            scroll_y: 0,
        }
    }

    fn row_top(&self, row: usize) -> i32 {
        let mut top = self.params.padding.top - self.scroll_y;
        for height in &self.row_heights[..row] {
            top += height + self.params.vertical_spacing;
        }
        top
    }

    fn visible_rows(&self) -> Option<(usize, usize)> {
        let mut first = None;
        let mut last = None;
        for row in 0..self.row_heights.len() {
            let top = self.row_top(row);
            let bottom = top + self.row_heights[row];
            if bottom > 0 && top < self.params.viewport_height {
                if first.is_none() {
                    first = Some(row);
                }
                last = Some(row);
            }
        }
        Some((first?, last?))
    }

    fn row_for_child(&self, visible_index: usize) -> Option<usize> {
        let (first, last) = self.visible_rows()?;
        let row = first + visible_index / self.columns;
        if row <= last {
            Some(row)
        } else {
            None
        }
    }
}

impl GridEngine for FakeGrid {
    fn first_visible_position(&self) -> usize {
        self.visible_rows()
            .map(|(first, _)| first * self.columns)
            .unwrap_or(0)
    }

    fn last_visible_position(&self) -> usize {
        self.visible_rows()
            .map(|(_, last)| last * self.columns + self.columns - 1)
            .unwrap_or(0)
    }

    fn child_count(&self) -> usize {
        self.visible_rows()
            .map(|(first, last)| (last - first + 1) * self.columns)
            .unwrap_or(0)
    }

    fn child_frame(&self, visible_index: usize) -> Option<Rect> {
        let row = self.row_for_child(visible_index)?;
        let padding = self.params.padding;
        Some(Rect::new(
            padding.left,
            self.row_top(row),
            self.params.width - padding.left - padding.right,
            self.row_heights[row],
        ))
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
        self.params.width
    }

    fn height(&self) -> i32 {
        self.params.viewport_height
    }

    fn padding(&self) -> Edges {
        self.params.padding
    }

    fn clip_to_padding(&self) -> bool {
        self.params.clip_to_padding
    }
}

pub type Widget = StickyGridView<FakeSource, FakeGrid, DirectLifecycle>;

pub fn build_widget(sections: &[(i64, &str, usize)], columns: usize, params: GridParams) -> Widget {
    let source = FakeSource::new(sections, columns, params.header_height);
    let grid = FakeGrid::new(&source, params);
    let mut widget = StickyGridView::new(source, grid, DirectLifecycle);
    widget.set_columns(ColumnSpec::Fixed(columns));
    widget.set_vertical_spacing(params.vertical_spacing);
    widget
}

/// Move the scripted grid to the given scroll offset and deliver the matching
/// scroll notification.
pub fn scroll_to(widget: &mut Widget, scroll_y: i32) {
    widget.engine_mut().scroll_y = scroll_y;
    let first = widget.engine().first_visible_position();
    let visible = widget.engine().child_count();
    let total = widget.source().item_count();
    widget
        .on_scroll(first, visible, total)
        .expect("lifecycle hooks are no-ops in tests");
}

/// Three sections of four items each, the standard fixture.
pub fn three_sections() -> Vec<(i64, &'static str, usize)> {
    vec![(1, "Alpha", 4), (2, "Bravo", 4), (3, "Charlie", 4)]
}
