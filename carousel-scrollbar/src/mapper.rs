//! Conversions between carousel indices and handle offsets.
//!
//! Travel is proportional to index progress, except that index 0 and the
//! last page are pinned to the ends of the track so rounding from a
//! non-integer ratio never leaves the handle short of either edge.

use crate::geometry::ScrollbarGeometry;

/// Rest offset of a floating handle for the given index.
pub fn position_for_index(geometry: &ScrollbarGeometry, index: usize) -> f32 {
    let offset = if index == 0 {
        0.0
    } else if index < geometry.last_page_index() {
        geometry.ratio * index as f32
    } else {
        geometry.track_size - geometry.handle_size
    };
    geometry.bounds.clamp(offset)
}

/// Extent of a progress indicator for the given index.
///
/// Grows from the track origin and fills the whole track on the last page.
pub fn size_for_index(geometry: &ScrollbarGeometry, index: usize) -> f32 {
    if index < geometry.last_page_index() {
        geometry.ratio * index as f32
    } else {
        geometry.track_size
    }
}

/// Index cell an offset falls into.
pub fn index_for_offset(offset: f32, ratio: f32) -> usize {
    if ratio.is_nan() || offset.is_nan() || ratio <= 0.0 || offset <= 0.0 {
        return 0;
    }
    (offset / ratio).round() as usize
}

/// Clamp `value` into `[lo, hi]`.
pub fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}
