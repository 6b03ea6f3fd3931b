//! Saving and restoring visual properties.
//!
//! ```
//! # use carousel_scrollbar::{Part, StyleProperty, StyleRenderer, StyleSnapshot, StyleSurface};
//! let mut surface = StyleRenderer::new();
//! let mut snapshot = StyleSnapshot::new(Part::Track);
//! snapshot.save(&surface, &[StyleProperty::Position]);
//! surface.set_style(Part::Track, StyleProperty::Position, Some("relative".into()));
//! snapshot.restore(&mut surface);
//! assert_eq!(surface.style(Part::Track, StyleProperty::Position), None);
//! ```

use crate::render::Part;

/// Visual properties the scrollbar writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Overflow,
    Position,
    Transform,
    Left,
    Top,
    Width,
    Height,
    Transition,
    Cursor,
}

impl StyleProperty {
    /// CSS property name.
    pub fn name(self) -> &'static str {
        match self {
            StyleProperty::Overflow => "overflow",
            StyleProperty::Position => "position",
            StyleProperty::Transform => "transform",
            StyleProperty::Left => "left",
            StyleProperty::Top => "top",
            StyleProperty::Width => "width",
            StyleProperty::Height => "height",
            StyleProperty::Transition => "transition",
            StyleProperty::Cursor => "cursor",
        }
    }
}

/// Properties of the track that the scrollbar may disturb.
pub const HOLDER_PROPERTIES: [StyleProperty; 2] = [StyleProperty::Overflow, StyleProperty::Position];

/// Properties of the handle and progress bar that the scrollbar moves.
pub const MOVABLE_PROPERTIES: [StyleProperty; 8] = [
    StyleProperty::Position,
    StyleProperty::Transform,
    StyleProperty::Left,
    StyleProperty::Top,
    StyleProperty::Width,
    StyleProperty::Height,
    StyleProperty::Transition,
    StyleProperty::Cursor,
];

/// A surface holding per-part style properties.
pub trait StyleSurface {
    /// Returns false for parts that do not exist on this surface.
    fn is_attached(&self, part: Part) -> bool;

    /// Current value of a property, `None` when unset.
    fn style(&self, part: Part, property: StyleProperty) -> Option<String>;

    /// Assign a property; `None` clears it.
    fn set_style(&mut self, part: Part, property: StyleProperty, value: Option<String>);
}

/// Recorded property values of one part.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSnapshot {
    part: Part,
    saved: Vec<(StyleProperty, Option<String>)>,
}

impl StyleSnapshot {
    pub fn new(part: Part) -> Self {
        Self {
            part,
            saved: Vec::new(),
        }
    }

    /// Record the current values of `properties`. Later saves of the same
    /// property overwrite earlier ones. Does nothing if the part is absent.
    pub fn save<S: StyleSurface + ?Sized>(&mut self, surface: &S, properties: &[StyleProperty]) -> &mut Self {
        if !surface.is_attached(self.part) {
            return self;
        }
        for &property in properties {
            let value = surface.style(self.part, property);
            match self.saved.iter_mut().find(|(saved, _)| *saved == property) {
                Some(entry) => entry.1 = value,
                None => self.saved.push((property, value)),
            }
        }
        self
    }

    /// Reapply every recorded value.
    pub fn restore<S: StyleSurface + ?Sized>(&self, surface: &mut S) -> &Self {
        if !surface.is_attached(self.part) {
            return self;
        }
        for (property, value) in &self.saved {
            surface.set_style(self.part, *property, value.clone());
        }
        self
    }
}
