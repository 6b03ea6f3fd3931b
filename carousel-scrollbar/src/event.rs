//! Signals exchanged with the host carousel.

use std::time::Duration;

/// Page layout reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Total number of items.
    pub item_count: usize,
    /// Items visible at once.
    pub page_size: usize,
}

impl PageInfo {
    pub fn new(item_count: usize, page_size: usize) -> Self {
        Self {
            item_count,
            page_size,
        }
    }
}

/// Lifecycle signals published by the host carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    /// Host finished its own setup.
    Initialized(PageInfo),
    /// Host rebuilt its items.
    Refreshed(PageInfo),
    /// Host viewport changed size.
    Resized(PageInfo),
    /// Host is moving to a new index on its own (buttons, dots, autoplay).
    Translate,
    /// User started dragging the host's items.
    Drag,
    /// User stopped dragging the host's items.
    Dragged,
}

/// Request for the host to move to an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationRequest {
    pub index: usize,
    /// Host's transition speed.
    pub speed: Duration,
    /// The request comes from the scrollbar; the host must not sync the
    /// scrollbar back in response.
    pub suppress_resync: bool,
}

/// Read-only view of the host carousel's navigation state.
pub trait Carousel {
    /// Current index relative to the first real item.
    fn current_index(&self) -> usize;

    /// Duration of the host's slide transition.
    fn animation_speed(&self) -> Duration;
}

/// Result of handling a pointer or click event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Not handled; default action and propagation proceed.
    Ignored,
    /// Handled; default action must be prevented.
    Consumed,
    /// A drag session started on the handle.
    StartDrag {
        /// False for touch input, whose default action is left alone.
        prevent_default: bool,
    },
    /// The event must be cancelled and stopped from propagating.
    Suppressed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}
