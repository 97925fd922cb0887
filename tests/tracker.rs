mod common;

use common::{build_widget, scroll_to, three_sections, FakeGrid, FakeSource, GridParams};
use stickygrid::{
    Config, DirectLifecycle, Edges, GridEngine, GridMetrics, HeaderId, HeaderTracker, HeaderView,
};

// ============================================================================
// Header selection
// ============================================================================

#[test]
fn test_zero_spacing_pins_first_visible_rows_section() {
    // 3 sections of 4 items, 2 columns: rows are H1 ii ii H2 ii ii H3 ii ii.
    // Scrolled so the first visible row is section 2's first item row.
    let mut widget = build_widget(&three_sections(), 2, GridParams::pixels());
    scroll_to(&mut widget, 120);

    assert_eq!(widget.current_header_id(), HeaderId(2));
    assert!(widget.pinned_header().is_some());
    // Next header (section 3) is a full row height away: fully pinned.
    assert_eq!(widget.header_bottom(), 40);
}

#[test]
fn test_positive_spacing_gap_selects_previous_sections_header() {
    let mut params = GridParams::pixels();
    params.vertical_spacing = 10;
    let mut widget = build_widget(&[(1, "Alpha", 4), (2, "Bravo", 4)], 2, params);

    // Section 2's header row top lands at 4px, inside the open (0, 10) gap,
    // so section 1 is still current.
    scroll_to(&mut widget, 106);
    assert_eq!(widget.current_header_id(), HeaderId(1));
}

#[test]
fn test_negative_spacing_promotes_next_row_once_it_reaches_top() {
    let mut params = GridParams::pixels();
    params.vertical_spacing = -5;
    let mut widget = build_widget(&[(1, "Alpha", 4), (2, "Bravo", 4)], 2, params);

    // First visible row is section 1's last item row; the overlapping next
    // row (section 2's header) has crossed the top edge.
    scroll_to(&mut widget, 66);
    assert_eq!(widget.current_header_id(), HeaderId(2));
}

#[test]
fn test_vertical_spacing_setter_applies_before_the_next_scroll_pass() {
    // Spacing arrives through the setter alone, after construction; the next
    // scroll pass must already select between gap candidates with it.
    let mut widget = build_widget(&[(1, "Alpha", 4), (2, "Bravo", 4)], 2, GridParams::pixels());
    widget.engine_mut().params.vertical_spacing = 10;
    widget.set_vertical_spacing(10);

    scroll_to(&mut widget, 106);
    assert_eq!(widget.current_header_id(), HeaderId(1));
}

#[test]
fn test_header_suppressed_when_content_starts_below_top() {
    // Overscrolled: the very first row sits below the top edge and the host
    // is not clipping to padding, so nothing should pin over the gap.
    let mut widget = build_widget(&three_sections(), 2, GridParams::pixels());
    scroll_to(&mut widget, -10);

    assert_eq!(widget.current_header_id(), HeaderId(1));
    assert_eq!(widget.header_bottom(), 0);
}

#[test]
fn test_clip_to_padding_offsets_pin_by_top_padding() {
    let mut params = GridParams::pixels();
    params.padding = Edges {
        top: 10,
        ..Edges::default()
    };
    params.clip_to_padding = true;
    let mut widget = build_widget(&three_sections(), 2, params);

    scroll_to(&mut widget, 120);
    assert_eq!(widget.header_bottom(), 40 + 10);
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_pinned_offset_stays_within_header_height() {
    let mut widget = build_widget(&three_sections(), 2, GridParams::pixels());
    for scroll in 0..=260 {
        scroll_to(&mut widget, scroll);
        let bottom = widget.header_bottom();
        assert!(
            (0..=40).contains(&bottom),
            "offset {bottom} out of range at scroll {scroll}"
        );
    }
}

#[test]
fn test_repeated_scroll_at_same_position_is_idempotent() {
    let mut widget = build_widget(&three_sections(), 2, GridParams::pixels());
    scroll_to(&mut widget, 120);
    assert_eq!(widget.source().fetches, 1);

    // Same first-visible position again: no redundant swap.
    scroll_to(&mut widget, 120);
    assert_eq!(widget.source().fetches, 1);
    assert_eq!(widget.current_header_id(), HeaderId(2));
}

#[test]
fn test_toggling_sticky_off_and_on_restores_identical_state() {
    let mut toggled = build_widget(&three_sections(), 2, GridParams::pixels());
    scroll_to(&mut toggled, 120);
    toggled.set_sticky_headers(false).unwrap();
    toggled.set_sticky_headers(true).unwrap();

    let mut straight = build_widget(&three_sections(), 2, GridParams::pixels());
    scroll_to(&mut straight, 120);

    assert_eq!(toggled.current_header_id(), straight.current_header_id());
    assert_eq!(toggled.header_bottom(), straight.header_bottom());
}

#[test]
fn test_sticky_disabled_never_pins() {
    let mut widget = build_widget(&three_sections(), 2, GridParams::pixels());
    widget.set_sticky_headers(false).unwrap();
    scroll_to(&mut widget, 120);

    assert!(widget.pinned_header().is_none());
    assert_eq!(widget.source().fetches, 0);
    assert_eq!(widget.current_header_id(), HeaderId::NONE);
}

#[test]
fn test_pinned_view_stays_mutable_through_the_tracker() {
    let mut source = FakeSource::new(&three_sections(), 2, 40);
    let mut grid = FakeGrid::new(&source, GridParams::pixels());
    grid.scroll_y = 120;

    let mut tracker = HeaderTracker::new();
    let mut lifecycle = DirectLifecycle;
    let metrics = GridMetrics {
        columns: 2,
        ..GridMetrics::default()
    };
    tracker
        .scroll_changed(
            grid.first_visible_position(),
            &mut source,
            &grid,
            metrics,
            &Config::default(),
            &mut lifecycle,
        )
        .unwrap();

    // The host can re-measure the pinned view in place.
    let view = tracker.pinned_view_mut().expect("a header should be pinned");
    view.measure(120);
    assert_eq!(view.measured_width(), 120);
}

// ============================================================================
// Invalidation
// ============================================================================

#[test]
fn test_invalidation_forces_a_transition_on_next_scroll() {
    let mut widget = build_widget(&three_sections(), 2, GridParams::pixels());
    scroll_to(&mut widget, 120);
    assert_eq!(widget.source().fetches, 1);

    widget.source_mut().invalidate();
    scroll_to(&mut widget, 120);

    // The sentinel id never matches, so the same section swaps back in.
    assert_eq!(widget.source().fetches, 2);
    assert_eq!(widget.current_header_id(), HeaderId(2));
}

#[test]
fn test_explicit_invalidate_resets_tracked_state() {
    let mut widget = build_widget(&three_sections(), 2, GridParams::pixels());
    scroll_to(&mut widget, 120);
    widget.invalidate().unwrap();

    assert!(widget.pinned_header().is_none());
    assert_eq!(widget.current_header_id(), HeaderId::NONE);
    assert_eq!(widget.header_bottom(), 0);
}

#[test]
fn test_empty_source_is_a_no_op() {
    let mut widget = build_widget(&[], 2, GridParams::pixels());
    scroll_to(&mut widget, 0);
    assert!(widget.pinned_header().is_none());
    assert_eq!(widget.current_header_id(), HeaderId::NONE);
}
