//! Scrollbar configuration.

use serde::Deserialize;
use thiserror::Error;

/// How the scrollbar visualizes the carousel position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollbarType {
    /// A handle floating along the track.
    #[default]
    Scroll,
    /// An indicator growing from the track origin, with the handle at its edge.
    Progress,
}

/// Options recognized by the scrollbar.
///
/// Deserializes from the host's camelCase option names, so a carousel
/// option blob can be fed in directly:
///
/// ```
/// # use carousel_scrollbar::{ScrollbarOptions, ScrollbarType};
/// let options: ScrollbarOptions =
///     serde_json::from_str(r#"{ "scrollbarType": "progress", "scrollDragThreshold": 5 }"#).unwrap();
/// assert_eq!(options.scrollbar_type, Some(ScrollbarType::Progress));
/// assert_eq!(options.scroll_drag_threshold, 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollbarOptions {
    /// Rendering mode. `None` disables the scrollbar entirely.
    pub scrollbar_type: Option<ScrollbarType>,

    /// Minimum pointer path (px) before a pointer-down counts as a drag.
    pub scroll_drag_threshold: f32,

    /// Handle footprint in percent of the track, used when the handle
    /// is not measured (scroll mode).
    pub scrollbar_handle_size: f32,

    /// Path length (px) after which a committed drag locks out the
    /// click that follows the release.
    pub scroll_lock_threshold: f32,
}

impl Default for ScrollbarOptions {
    fn default() -> Self {
        Self {
            scrollbar_type: Some(ScrollbarType::Scroll),
            scroll_drag_threshold: 3.0,
            scrollbar_handle_size: 10.0,
            scroll_lock_threshold: 0.0,
        }
    }
}

impl ScrollbarOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rendering mode.
    pub fn scrollbar_type(mut self, kind: ScrollbarType) -> Self {
        self.scrollbar_type = Some(kind);
        self
    }

    /// Disable the scrollbar; every host signal is ignored.
    pub fn disabled(mut self) -> Self {
        self.scrollbar_type = None;
        self
    }

    pub fn drag_threshold(mut self, px: f32) -> Self {
        self.scroll_drag_threshold = px;
        self
    }

    pub fn handle_size(mut self, percent: f32) -> Self {
        self.scrollbar_handle_size = percent;
        self
    }

    pub fn lock_threshold(mut self, px: f32) -> Self {
        self.scroll_lock_threshold = px;
        self
    }

    /// Returns true unless the scrollbar was disabled.
    pub fn is_enabled(&self) -> bool {
        self.scrollbar_type.is_some()
    }

    /// Check that every numeric option is usable.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !self.scroll_drag_threshold.is_finite() || self.scroll_drag_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.scroll_drag_threshold));
        }
        if !self.scroll_lock_threshold.is_finite() || self.scroll_lock_threshold < 0.0 {
            return Err(ConfigError::InvalidLockThreshold(self.scroll_lock_threshold));
        }
        if !self.scrollbar_handle_size.is_finite()
            || self.scrollbar_handle_size <= 0.0
            || self.scrollbar_handle_size > 100.0
        {
            return Err(ConfigError::InvalidHandleSize(self.scrollbar_handle_size));
        }
        Ok(self)
    }
}

/// Errors raised by [`ScrollbarOptions::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Drag threshold must be a finite, non-negative length, got {0}")]
    InvalidThreshold(f32),

    #[error("Lock threshold must be a finite, non-negative length, got {0}")]
    InvalidLockThreshold(f32),

    #[error("Handle size must be a percentage in (0, 100], got {0}")]
    InvalidHandleSize(f32),
}
