//! Edge detection and snap target geometry
//!
//! This module decides, from the live cursor position and the work area,
//! whether a dragged window should snap and to which half of the screen.
//! It also computes the "follow the cursor" rectangle used when a window
//! leaves a snap preview or is dragged out of a snapped position.
//!
//! Everything here is pure: no Win32, no registry access.

use crate::domain::core::{Point, Rect, Size};

/// Distance in device pixels from a work-area edge at which snapping engages
pub const EDGE_THRESHOLD: i32 = 4;

/// Work-area edge the cursor was detected on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapEdge {
    Left,
    Top,
    Right,
    Bottom,
}

impl SnapEdge {
    /// Returns the half of `work_area` that belongs to this edge
    ///
    /// Halves are split at the work area's own midpoint (`x + w / 2`), not at
    /// half the absolute right edge (`right / 2`). With a taskbar docked left
    /// and a work area of (60, 0)-(1920, 1080) the right half starts at
    /// x = 990, not x = 960.
    ///
    /// Odd dimensions give the extra pixel to the right/bottom half, so the
    /// two halves of an edge pair always tile the work area exactly.
    pub fn half_of(self, work_area: Rect) -> Rect {
        let half_w = work_area.w / 2;
        let half_h = work_area.h / 2;
        match self {
            SnapEdge::Left => Rect::new(work_area.x, work_area.y, half_w, work_area.h),
            SnapEdge::Top => Rect::new(work_area.x, work_area.y, work_area.w, half_h),
            SnapEdge::Right => Rect::new(
                work_area.x + half_w,
                work_area.y,
                work_area.w - half_w,
                work_area.h,
            ),
            SnapEdge::Bottom => Rect::new(
                work_area.x,
                work_area.y + half_h,
                work_area.w,
                work_area.h - half_h,
            ),
        }
    }
}

/// Result of edge detection for one cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapResult {
    /// Cursor is not in any edge zone
    NoSnap,
    /// Cursor is in an edge zone; the window should take this rectangle
    Snap(Rect),
}

/// Detects which edge zone, if any, the cursor is in
///
/// Edges are tested in a fixed order and the first match wins: left, top,
/// right, bottom. In the top-left corner this yields `Left`, and in the
/// top-right corner `Top`. The left and top tests compare against absolute
/// screen coordinates; the right and bottom tests against the work area's
/// exclusive right/bottom edges.
pub fn detect_edge(cursor: Point, work_area: Rect, threshold: i32) -> Option<SnapEdge> {
    if cursor.x <= threshold {
        Some(SnapEdge::Left)
    } else if cursor.y <= threshold {
        Some(SnapEdge::Top)
    } else if cursor.x >= work_area.right() - 1 - threshold {
        Some(SnapEdge::Right)
    } else if cursor.y >= work_area.bottom() - 1 - threshold {
        Some(SnapEdge::Bottom)
    } else {
        None
    }
}

/// Computes the snap target for a cursor position using [`EDGE_THRESHOLD`]
///
/// # Example
/// ```rust
/// use snaphook::domain::core::{Point, Rect};
/// use snaphook::domain::snap::{compute_edge_snap, SnapResult};
///
/// let work_area = Rect::new(0, 0, 1920, 1040);
/// let result = compute_edge_snap(Point::new(0, 500), work_area);
/// assert_eq!(result, SnapResult::Snap(Rect::new(0, 0, 960, 1040)));
/// ```
pub fn compute_edge_snap(cursor: Point, work_area: Rect) -> SnapResult {
    compute_edge_snap_with_threshold(cursor, work_area, EDGE_THRESHOLD)
}

/// Computes the snap target for a cursor position with an explicit threshold
pub fn compute_edge_snap_with_threshold(cursor: Point, work_area: Rect, threshold: i32) -> SnapResult {
    match detect_edge(cursor, work_area, threshold) {
        Some(edge) => SnapResult::Snap(edge.half_of(work_area)),
        None => SnapResult::NoSnap,
    }
}

/// Places a rectangle of `saved_size` so that `drag_offset` inside it sits under `cursor`
///
/// # Arguments
/// * `saved_size` - Size the window should return to
/// * `drag_offset` - Cursor position relative to the window's top-left corner at drag start
/// * `cursor` - Live cursor position
pub fn compute_follow_cursor_rect(saved_size: Size, drag_offset: Point, cursor: Point) -> Rect {
    Rect::at(
        Point::new(cursor.x - drag_offset.x, cursor.y - drag_offset.y),
        saved_size,
    )
}
