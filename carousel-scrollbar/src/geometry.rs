//! Track geometry derived from measured sizes and the carousel page layout.

use thiserror::Error;

/// Valid range for the handle offset along the track.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub start: f32,
    pub end: f32,
}

impl Bounds {
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Clamp an offset into this range.
    pub fn clamp(&self, value: f32) -> f32 {
        crate::mapper::clamp(value, self.start, self.end)
    }
}

/// Scrollbar geometry for one carousel instance.
///
/// Recomputed whenever the host initializes, refreshes or resizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarGeometry {
    /// Outer extent of the track.
    pub track_size: f32,
    /// Footprint of the handle along the track.
    pub handle_size: f32,
    /// Number of items in the carousel.
    pub item_count: usize,
    /// Number of items visible at once (page size).
    pub visible_count: usize,
    /// Pixels per index step.
    pub ratio: f32,
    /// Valid handle offsets.
    pub bounds: Bounds,
}

impl ScrollbarGeometry {
    /// Derive geometry, refusing layouts that leave nothing to scroll or
    /// a track that cannot contain its handle.
    pub fn new(
        track_size: f32,
        handle_size: f32,
        item_count: usize,
        visible_count: usize,
    ) -> Result<Self, GeometryError> {
        if item_count <= visible_count {
            return Err(GeometryError::NothingToScroll {
                item_count,
                visible_count,
            });
        }
        if track_size.is_nan()
            || handle_size.is_nan()
            || track_size <= 0.0
            || handle_size < 0.0
            || track_size < handle_size
        {
            return Err(GeometryError::TrackTooSmall {
                track_size,
                handle_size,
            });
        }

        let steps = (item_count - visible_count + 1) as f32;

        Ok(Self {
            track_size,
            handle_size,
            item_count,
            visible_count,
            ratio: track_size / steps,
            bounds: Bounds::new(0.0, track_size - handle_size),
        })
    }

    /// First index of the last page. Every index from here on renders pinned
    /// to the end of the track.
    pub fn last_page_index(&self) -> usize {
        self.item_count - self.visible_count
    }

    /// Largest index a navigation request may carry.
    pub fn last_index(&self) -> usize {
        self.item_count - 1
    }

    /// Index cell an offset falls into, pinned to the valid index range.
    pub fn index_at(&self, offset: f32) -> usize {
        crate::mapper::index_for_offset(offset, self.ratio).min(self.last_index())
    }
}

/// Layouts the scrollbar cannot represent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Nothing to scroll: {item_count} items with {visible_count} visible")]
    NothingToScroll {
        item_count: usize,
        visible_count: usize,
    },

    #[error("Track ({track_size}px) cannot contain a {handle_size}px handle")]
    TrackTooSmall { track_size: f32, handle_size: f32 },
}
