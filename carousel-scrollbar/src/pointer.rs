//! Pointer input consumed by the drag state machine.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// A point in surface coordinates (px, or cells for terminal hosts).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Input device that produced a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InputKind {
    #[default]
    Mouse,
    Touch,
}

/// Stage of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// mousedown / touchstart
    Down,
    /// mousemove / touchmove
    Move,
    /// mouseup / touchend
    Up,
}

/// Interactive form controls. Mouse drags never start on these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormControl {
    Input,
    Select,
    Button,
    TextArea,
}

/// Opaque identity of the element an event was dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u64);

/// The element an event was dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub id: TargetId,
    /// Set when the target is an interactive form control.
    pub control: Option<FormControl>,
}

impl Target {
    pub fn new(id: u64) -> Self {
        Self {
            id: TargetId(id),
            control: None,
        }
    }

    pub fn control(id: u64, control: FormControl) -> Self {
        Self {
            id: TargetId(id),
            control: Some(control),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.control.is_some()
    }
}

/// A single pointer event.
///
/// For touch input the position is the first active touch point, or the
/// first changed touch point on release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub input: InputKind,
    pub position: Point,
    pub target: Target,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, input: InputKind, x: f32, y: f32, target: Target) -> Self {
        Self {
            phase,
            input,
            position: Point::new(x, y),
            target,
        }
    }

    pub fn mouse(phase: PointerPhase, x: f32, y: f32, target: Target) -> Self {
        Self::new(phase, InputKind::Mouse, x, y, target)
    }

    pub fn touch(phase: PointerPhase, x: f32, y: f32, target: Target) -> Self {
        Self::new(phase, InputKind::Touch, x, y, target)
    }

    pub fn is_touch(&self) -> bool {
        self.input == InputKind::Touch
    }

    /// Convert a crossterm mouse event. Only the primary button takes part
    /// in dragging; terminal cells are treated as pixels.
    pub fn from_mouse(event: &MouseEvent, target: Target) -> Option<Self> {
        let phase = match event.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerPhase::Down,
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => PointerPhase::Move,
            MouseEventKind::Up(MouseButton::Left) => PointerPhase::Up,
            _ => return None,
        };
        Some(Self::mouse(
            phase,
            event.column as f32,
            event.row as f32,
            target,
        ))
    }
}
