//! Rendering capability used by the controller.
//!
//! The controller only ever positions and sizes three parts. How that
//! becomes visible is up to the [`Renderer`]; [`StyleRenderer`] writes
//! CSS-equivalent properties and is what hosts with a style model use.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::pointer::InputKind;
use crate::style::{StyleProperty, StyleSurface};

/// Parts of the scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    /// Fixed-length surface the handle travels within.
    Track,
    /// Draggable handle.
    Handle,
    /// Indicator growing from the track origin (progress mode).
    Progress,
}

/// Output side of the scrollbar.
pub trait Renderer: StyleSurface {
    /// Outer extent of a part along the track axis, `None` if unmeasurable.
    fn measure(&self, part: Part) -> Option<f32>;

    /// Place a part at `px` from the track origin.
    fn set_offset(&mut self, part: Part, px: f32);

    /// Set the extent of a part along the track axis.
    fn set_size(&mut self, part: Part, px: f32);

    /// Animate subsequent offset/size changes over `duration`, or apply them
    /// immediately with `None`.
    fn set_transition(&mut self, part: Part, duration: Option<Duration>);

    /// Toggle the "being dragged" visual flag on the handle.
    fn set_dragged(&mut self, dragged: bool);

    /// Toggle the disabled look used when there is nothing to scroll.
    fn set_disabled(&mut self, disabled: bool);

    /// Route move/up events of `input` from the whole surface to the
    /// scrollbar, so a drag survives the pointer leaving the handle.
    fn capture_pointer(&mut self, input: InputKind);

    /// Stop routing surface-wide move/up events.
    fn release_pointer(&mut self, input: InputKind);
}

/// How offsets are written, chosen once per renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Positioning {
    /// `transform: translateX(..)`, optionally promoted to its own layer.
    Transform { gpu: bool },
    /// `left: ..`
    Left,
}

impl Default for Positioning {
    fn default() -> Self {
        Positioning::Transform { gpu: true }
    }
}

/// In-memory style model implementing [`Renderer`].
#[derive(Debug, Clone, Default)]
pub struct StyleRenderer {
    positioning: Positioning,
    styles: HashMap<(Part, StyleProperty), String>,
    extents: HashMap<Part, f32>,
    offsets: HashMap<Part, f32>,
    sizes: HashMap<Part, f32>,
    detached: HashSet<Part>,
    dragged: bool,
    disabled: bool,
    captured: Option<InputKind>,
}

impl StyleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_positioning(positioning: Positioning) -> Self {
        Self {
            positioning,
            ..Default::default()
        }
    }

    /// Set the extent [`Renderer::measure`] reports for a part.
    pub fn extent(mut self, part: Part, px: f32) -> Self {
        self.extents.insert(part, px);
        self
    }

    /// Update a measured extent, e.g. after the host resized.
    pub fn set_extent(&mut self, part: Part, px: f32) {
        self.extents.insert(part, px);
    }

    /// Remove a part from the surface.
    pub fn detach(mut self, part: Part) -> Self {
        self.detached.insert(part);
        self
    }

    pub fn positioning(&self) -> Positioning {
        self.positioning
    }

    /// Last offset written to a part.
    pub fn offset(&self, part: Part) -> Option<f32> {
        self.offsets.get(&part).copied()
    }

    /// Last size written to a part.
    pub fn size(&self, part: Part) -> Option<f32> {
        self.sizes.get(&part).copied()
    }

    pub fn is_dragged(&self) -> bool {
        self.dragged
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn captured(&self) -> Option<InputKind> {
        self.captured
    }

    fn write(&mut self, part: Part, property: StyleProperty, value: Option<String>) {
        match value {
            Some(value) if !value.is_empty() => {
                self.styles.insert((part, property), value);
            }
            _ => {
                self.styles.remove(&(part, property));
            }
        }
    }
}

impl StyleSurface for StyleRenderer {
    fn is_attached(&self, part: Part) -> bool {
        !self.detached.contains(&part)
    }

    fn style(&self, part: Part, property: StyleProperty) -> Option<String> {
        self.styles.get(&(part, property)).cloned()
    }

    fn set_style(&mut self, part: Part, property: StyleProperty, value: Option<String>) {
        self.write(part, property, value);
    }
}

impl Renderer for StyleRenderer {
    fn measure(&self, part: Part) -> Option<f32> {
        if !self.is_attached(part) {
            return None;
        }
        self.extents.get(&part).copied()
    }

    fn set_offset(&mut self, part: Part, px: f32) {
        self.offsets.insert(part, px);
        match self.positioning {
            Positioning::Transform { gpu } => {
                let prefix = if gpu { "translateZ(0) " } else { "" };
                self.write(
                    part,
                    StyleProperty::Transform,
                    Some(format!("{prefix}translateX({px}px)")),
                );
            }
            Positioning::Left => {
                self.write(part, StyleProperty::Left, Some(format!("{px}px")));
            }
        }
    }

    fn set_size(&mut self, part: Part, px: f32) {
        self.sizes.insert(part, px);
        self.write(part, StyleProperty::Width, Some(format!("{px}px")));
    }

    fn set_transition(&mut self, part: Part, duration: Option<Duration>) {
        let value = duration.map(|d| format!("all {}s ease-in-out", d.as_secs_f32()));
        self.write(part, StyleProperty::Transition, value);
    }

    fn set_dragged(&mut self, dragged: bool) {
        self.dragged = dragged;
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    fn capture_pointer(&mut self, input: InputKind) {
        self.captured = Some(input);
    }

    fn release_pointer(&mut self, input: InputKind) {
        if self.captured == Some(input) {
            self.captured = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_positioning() {
        let mut gpu = StyleRenderer::new();
        gpu.set_offset(Part::Handle, 42.5);
        assert_eq!(
            gpu.style(Part::Handle, StyleProperty::Transform).as_deref(),
            Some("translateZ(0) translateX(42.5px)")
        );

        let mut plain = StyleRenderer::with_positioning(Positioning::Transform { gpu: false });
        plain.set_offset(Part::Handle, 10.0);
        assert_eq!(
            plain.style(Part::Handle, StyleProperty::Transform).as_deref(),
            Some("translateX(10px)")
        );

        let mut left = StyleRenderer::with_positioning(Positioning::Left);
        left.set_offset(Part::Handle, 10.0);
        assert_eq!(left.style(Part::Handle, StyleProperty::Left).as_deref(), Some("10px"));
        assert_eq!(left.style(Part::Handle, StyleProperty::Transform), None);
    }

    #[test]
    fn transition_is_cleared_with_none() {
        let mut renderer = StyleRenderer::new();
        renderer.set_transition(Part::Handle, Some(Duration::from_millis(250)));
        assert_eq!(
            renderer.style(Part::Handle, StyleProperty::Transition).as_deref(),
            Some("all 0.25s ease-in-out")
        );
        renderer.set_transition(Part::Handle, None);
        assert_eq!(renderer.style(Part::Handle, StyleProperty::Transition), None);
    }

    #[test]
    fn detached_parts_are_not_measured() {
        let renderer = StyleRenderer::new()
            .extent(Part::Progress, 30.0)
            .detach(Part::Progress);
        assert_eq!(renderer.measure(Part::Progress), None);
        assert!(!renderer.is_attached(Part::Progress));
    }
}
