//! Drag state machine for the scrollbar handle.
//!
//! A pointer-down cannot tell a tap from the start of a drag, so a session
//! starts `Undecided` and only commits to `Dragging` once the pointer has
//! travelled past the drag threshold, and then only for horizontal intent.
//! A committed drag whose path exceeds the lock threshold becomes `Locked`:
//! the click the platform synthesizes on release must be swallowed once.
//!
//! The machine is pure. It never touches the renderer; the controller
//! applies the returned [`DragUpdate`]s.

use log::{debug, trace};

use crate::geometry::Bounds;
use crate::pointer::{InputKind, PointerEvent, PointerPhase, Point, TargetId};

/// Moves shorter than this from the origin are ignored until release.
const MIN_MOVE: f32 = 1.0;

/// Phase of the drag gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragPhase {
    /// No gesture in flight.
    #[default]
    Idle,
    /// Pointer is down, not yet known to be a drag.
    Undecided,
    /// Committed horizontal drag.
    Dragging,
    /// Committed drag with the post-release click suppressed.
    Locked,
}

/// One gesture in flight. Exists from pointer-down until release or rejection.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    phase: DragPhase,
    origin: Point,
    path_x: f32,
    path_y: f32,
    path_length: f32,
    delta_x: f32,
    input: InputKind,
    source: TargetId,
    pre_drag_offset: f32,
    current: f32,
}

impl DragSession {
    fn new(event: &PointerEvent, pre_drag_offset: f32) -> Self {
        Self {
            phase: DragPhase::Undecided,
            origin: event.position,
            path_x: 0.0,
            path_y: 0.0,
            path_length: 0.0,
            delta_x: pre_drag_offset,
            input: event.input,
            source: event.target.id,
            pre_drag_offset,
            current: pre_drag_offset,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Euclidean distance travelled from the origin.
    pub fn path_length(&self) -> f32 {
        self.path_length
    }

    /// Horizontal displacement composed with the pre-drag offset.
    pub fn delta_x(&self) -> f32 {
        self.delta_x
    }

    pub fn input(&self) -> InputKind {
        self.input
    }

    pub fn is_touch(&self) -> bool {
        self.input == InputKind::Touch
    }

    /// Element the gesture started on.
    pub fn source(&self) -> TargetId {
        self.source
    }

    /// Last clamped offset emitted while dragging.
    pub fn current(&self) -> f32 {
        self.current
    }

    fn track(&mut self, position: Point) {
        self.path_x = position.x - self.origin.x;
        self.path_y = position.y - self.origin.y;
        self.path_length = self.path_x.hypot(self.path_y);
        self.delta_x = self.path_x + self.pre_drag_offset;
    }

    fn is_committed(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging | DragPhase::Locked)
    }
}

/// A live position produced by a committed drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStep {
    /// Handle offset, clamped into the track bounds.
    pub offset: f32,
    /// Set on the step where the lock engaged: the click on this target
    /// must be suppressed once.
    pub locked: Option<TargetId>,
}

/// What the controller must do in response to a move or release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// No session, or the event belongs to another input device.
    Inactive,
    /// Session continues without anything to render.
    Pending,
    /// Gesture was a tap or a vertical swipe. Session is gone, no side effects.
    Rejected { input: InputKind },
    /// Committed drag moved.
    Moved(DragStep),
    /// Committed drag released. Session is gone.
    Released {
        step: DragStep,
        input: InputKind,
        source: TargetId,
    },
}

/// Owns at most one [`DragSession`].
#[derive(Debug, Clone, Default)]
pub struct DragMachine {
    drag_threshold: f32,
    lock_threshold: f32,
    session: Option<DragSession>,
}

impl DragMachine {
    pub fn new(drag_threshold: f32, lock_threshold: f32) -> Self {
        Self {
            drag_threshold,
            lock_threshold,
            session: None,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.session
            .as_ref()
            .map(|session| session.phase)
            .unwrap_or_default()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// True while any gesture is in flight, decided or not.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// True once the gesture has been accepted as a drag.
    pub fn is_dragging(&self) -> bool {
        self.session.as_ref().is_some_and(DragSession::is_committed)
    }

    /// Start a session on pointer-down.
    ///
    /// Refused while another session is in flight, and for mouse input on
    /// interactive form controls. Returns true if a session started.
    pub fn begin(&mut self, event: &PointerEvent, pre_drag_offset: f32) -> bool {
        if self.session.is_some() {
            trace!("Drag begin ignored: session already active");
            return false;
        }
        if event.input == InputKind::Mouse && event.target.is_interactive() {
            trace!("Drag begin ignored: target is an interactive control");
            return false;
        }

        debug!(
            "Drag session started at ({}, {}) from offset {}",
            event.position.x, event.position.y, pre_drag_offset
        );
        self.session = Some(DragSession::new(event, pre_drag_offset));
        true
    }

    /// Feed a move or release event.
    pub fn update(&mut self, event: &PointerEvent, bounds: Bounds) -> DragUpdate {
        let drag_threshold = self.drag_threshold;
        let lock_threshold = self.lock_threshold;

        let Some(session) = self.session.as_mut() else {
            return DragUpdate::Inactive;
        };
        if event.input != session.input || event.phase == PointerPhase::Down {
            return DragUpdate::Inactive;
        }

        let released = event.phase == PointerPhase::Up;
        session.track(event.position);
        trace!(
            "Drag path ({}, {}) length {} delta {}",
            session.path_x,
            session.path_y,
            session.path_length,
            session.delta_x
        );

        if !released && session.path_length < MIN_MOVE {
            return DragUpdate::Pending;
        }

        if session.phase == DragPhase::Undecided {
            if session.path_length < drag_threshold {
                if !released {
                    return DragUpdate::Pending;
                }
                let input = session.input;
                self.session = None;
                debug!("Drag rejected: released before threshold");
                return DragUpdate::Rejected { input };
            }

            if session.path_x.abs() > session.path_y.abs() {
                debug!("Drag committed after {}px", session.path_length);
                session.phase = DragPhase::Dragging;
            } else {
                let input = session.input;
                self.session = None;
                debug!("Drag rejected: vertical intent");
                return DragUpdate::Rejected { input };
            }
        }

        let mut locked = None;
        if session.phase == DragPhase::Dragging && session.path_length > lock_threshold {
            debug!("Drag locked, suppressing next click");
            session.phase = DragPhase::Locked;
            locked = Some(session.source);
        }

        let offset = bounds.clamp(session.delta_x);
        session.current = offset;
        let step = DragStep { offset, locked };

        if released {
            let input = session.input;
            let source = session.source;
            self.session = None;
            debug!("Drag released at offset {}", offset);
            return DragUpdate::Released {
                step,
                input,
                source,
            };
        }

        DragUpdate::Moved(step)
    }

    /// Drop the session without emitting anything.
    pub fn cancel(&mut self) -> Option<DragSession> {
        let session = self.session.take();
        if session.is_some() {
            debug!("Drag session cancelled");
        }
        session
    }
}
