//! Scrollbar controller for one carousel instance.
//!
//! The controller exclusively owns the geometry, the handle position and the
//! drag session of its carousel. It reacts to the host's lifecycle signals
//! and to pointer events on its handle, renders through a [`Renderer`], and
//! queues [`NavigationRequest`]s for the host (see [`take_requests`]).
//!
//! [`take_requests`]: ScrollbarController::take_requests

use std::collections::HashSet;
use std::rc::Rc;

use log::{debug, info, trace, warn};

use crate::config::{ConfigError, ScrollbarOptions, ScrollbarType};
use crate::drag::{DragMachine, DragPhase, DragSession, DragStep, DragUpdate};
use crate::event::{Carousel, CarouselEvent, EventResult, NavigationRequest, PageInfo};
use crate::geometry::ScrollbarGeometry;
use crate::mapper::{position_for_index, size_for_index};
use crate::pointer::{InputKind, PointerEvent, PointerPhase, TargetId};
use crate::render::{Part, Renderer};
use crate::style::{StyleProperty, StyleSnapshot, HOLDER_PROPERTIES, MOVABLE_PROPERTIES};
use crate::turn::TurnQueue;

/// Committed handle state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HandlePosition {
    /// Last committed offset, always within the geometry bounds.
    pub current: f32,
    /// Last index communicated to (or reported by) the host.
    pub active_index: usize,
}

/// Cleanup that runs once the current event turn has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    /// Drop the click guard of a released drag if no click consumed it.
    ReleaseClickGuard(TargetId),
}

pub struct ScrollbarController<R: Renderer> {
    kind: ScrollbarType,
    /// Scroll-mode handle footprint, percent of the track.
    handle_percent: f32,
    host: Rc<dyn Carousel>,
    renderer: Option<R>,

    page: PageInfo,
    geometry: Option<ScrollbarGeometry>,
    handle_size: f32,
    position: HandlePosition,

    drag: DragMachine,
    host_dragging: bool,
    initialized: bool,
    torn_down: bool,

    snapshots: Vec<StyleSnapshot>,
    click_guards: HashSet<TargetId>,
    turn: TurnQueue<Deferred>,
    outbox: Vec<NavigationRequest>,
}

impl<R: Renderer> ScrollbarController<R> {
    pub fn new(
        options: ScrollbarOptions,
        host: Rc<dyn Carousel>,
        renderer: R,
    ) -> Result<Self, ConfigError> {
        let options = options.validate()?;

        Ok(Self {
            kind: options.scrollbar_type.unwrap_or_default(),
            handle_percent: options.scrollbar_handle_size,
            host,
            renderer: Some(renderer),
            page: PageInfo::default(),
            geometry: None,
            handle_size: 0.0,
            position: HandlePosition::default(),
            drag: DragMachine::new(options.scroll_drag_threshold, options.scroll_lock_threshold),
            host_dragging: false,
            initialized: false,
            torn_down: false,
            snapshots: Vec::new(),
            click_guards: HashSet::new(),
            turn: TurnQueue::new(),
            outbox: Vec::new(),
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn kind(&self) -> ScrollbarType {
        self.kind
    }

    /// `None` before initialize, after teardown, or while there is nothing
    /// to scroll.
    pub fn geometry(&self) -> Option<&ScrollbarGeometry> {
        self.geometry.as_ref()
    }

    pub fn position(&self) -> HandlePosition {
        self.position
    }

    pub fn handle_size(&self) -> f32 {
        self.handle_size
    }

    pub fn phase(&self) -> DragPhase {
        self.drag.phase()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn is_host_dragging(&self) -> bool {
        self.host_dragging
    }

    /// True while a drag release still guards `target` against its click.
    pub fn has_click_guard(&self, target: TargetId) -> bool {
        self.click_guards.contains(&target)
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.renderer.as_mut()
    }

    /// Take the navigation requests produced since the last call.
    pub fn take_requests(&mut self) -> Vec<NavigationRequest> {
        std::mem::take(&mut self.outbox)
    }

    // -------------------------------------------------------------------------
    // Host lifecycle
    // -------------------------------------------------------------------------

    /// Dispatch a host lifecycle signal.
    pub fn handle_event(&mut self, event: &CarouselEvent) {
        match *event {
            CarouselEvent::Initialized(page) => self.initialize(page),
            CarouselEvent::Refreshed(page) | CarouselEvent::Resized(page) => self.refresh(page),
            CarouselEvent::Translate => self.sync(),
            CarouselEvent::Drag => self.host_drag_started(),
            CarouselEvent::Dragged => self.host_drag_ended(),
        }
    }

    /// Measure, snapshot pre-existing styles and render the initial state.
    /// Runs once; later calls do nothing.
    pub fn initialize(&mut self, page: PageInfo) {
        if self.initialized || self.torn_down {
            debug!("Initialize ignored: already initialized or torn down");
            return;
        }
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        let mut track = StyleSnapshot::new(Part::Track);
        track.save(&*renderer, &HOLDER_PROPERTIES);
        let mut handle = StyleSnapshot::new(Part::Handle);
        handle.save(&*renderer, &MOVABLE_PROPERTIES);
        self.snapshots = vec![track, handle];
        if self.kind == ScrollbarType::Progress {
            let mut progress = StyleSnapshot::new(Part::Progress);
            progress.save(&*renderer, &MOVABLE_PROPERTIES);
            self.snapshots.push(progress);
        }

        renderer.set_style(Part::Handle, StyleProperty::Cursor, Some("pointer".to_string()));

        self.page = page;
        self.initialized = true;
        self.recompute_geometry();
        self.size_handle();
        self.render_rest(false);

        info!(
            "Scrollbar initialized: {:?} mode, {} items, page size {}",
            self.kind, page.item_count, page.page_size
        );
    }

    /// Recompute geometry after the host refreshed or resized, and move the
    /// handle to the rest position of the host's current index.
    pub fn refresh(&mut self, page: PageInfo) {
        if !self.initialized || self.torn_down {
            debug!("Refresh ignored: scrollbar not initialized");
            return;
        }
        self.page = page;
        self.recompute_geometry();
        self.size_handle();
        self.render_rest(false);
    }

    /// Follow a navigation the host made on its own.
    pub fn sync(&mut self) {
        if !self.initialized || self.torn_down {
            return;
        }
        if self.host_dragging {
            debug!("Sync suspended: host drag in progress");
            return;
        }
        if self.drag.is_active() {
            debug!("Sync skipped: handle drag in progress");
            return;
        }
        self.render_rest(true);
    }

    /// The host started dragging its own items; stop following it.
    pub fn host_drag_started(&mut self) {
        trace!("Host drag started");
        self.host_dragging = true;
    }

    /// The host's own drag ended; resume following it.
    pub fn host_drag_ended(&mut self) {
        trace!("Host drag ended");
        self.host_dragging = false;
    }

    /// Detach from the renderer, restoring every saved style, and hand the
    /// renderer back. Safe to call more than once.
    pub fn teardown(&mut self) -> Option<R> {
        if self.torn_down {
            return None;
        }
        self.torn_down = true;

        let mut renderer = self.renderer.take();
        if let Some(renderer) = renderer.as_mut() {
            if let Some(session) = self.drag.cancel() {
                renderer.release_pointer(session.input());
                renderer.set_dragged(false);
            }
            for snapshot in &self.snapshots {
                snapshot.restore(renderer);
            }
        }

        self.geometry = None;
        self.snapshots.clear();
        self.click_guards.clear();
        self.turn.clear();
        self.outbox.clear();

        info!("Scrollbar torn down");
        renderer
    }

    // -------------------------------------------------------------------------
    // Pointer input
    // -------------------------------------------------------------------------

    /// Feed a pointer event. Down events are expected from the handle;
    /// move/up events from the whole surface while the pointer is captured.
    pub fn pointer(&mut self, event: &PointerEvent) -> EventResult {
        match event.phase {
            PointerPhase::Down => self.begin_drag(event),
            PointerPhase::Move | PointerPhase::Up => self.track_drag(event),
        }
    }

    /// Feed a click on `target`. The first click after a locked drag on the
    /// same target is suppressed.
    pub fn click(&mut self, target: TargetId) -> EventResult {
        if self.click_guards.remove(&target) {
            debug!("Suppressed click after drag on {:?}", target);
            EventResult::Suppressed
        } else {
            EventResult::Ignored
        }
    }

    /// Run cleanup deferred past the current event turn. Call once every
    /// event of the turn has been dispatched.
    pub fn end_turn(&mut self) {
        for task in self.turn.drain() {
            match task {
                Deferred::ReleaseClickGuard(target) => {
                    if self.click_guards.remove(&target) {
                        trace!("Click guard on {:?} expired unused", target);
                    }
                }
            }
        }
    }

    fn begin_drag(&mut self, event: &PointerEvent) -> EventResult {
        if !self.initialized || self.torn_down || self.geometry.is_none() {
            return EventResult::Ignored;
        }
        if self.host_dragging {
            trace!("Drag begin ignored: host drag in progress");
            return EventResult::Ignored;
        }
        if !self.drag.begin(event, self.position.current) {
            return EventResult::Ignored;
        }
        let Some(renderer) = self.renderer.as_mut() else {
            self.drag.cancel();
            return EventResult::Ignored;
        };

        renderer.set_transition(Part::Handle, None);
        if self.kind == ScrollbarType::Progress {
            renderer.set_transition(Part::Progress, None);
        }
        renderer.capture_pointer(event.input);
        renderer.set_dragged(true);

        EventResult::StartDrag {
            prevent_default: !event.is_touch(),
        }
    }

    fn track_drag(&mut self, event: &PointerEvent) -> EventResult {
        let Some(geometry) = self.geometry else {
            return EventResult::Ignored;
        };

        match self.drag.update(event, geometry.bounds) {
            DragUpdate::Inactive | DragUpdate::Pending => EventResult::Ignored,
            DragUpdate::Rejected { input } => {
                self.end_session(input);
                EventResult::Ignored
            }
            DragUpdate::Moved(step) => {
                self.apply_step(&geometry, step);
                EventResult::Consumed
            }
            DragUpdate::Released {
                step,
                input,
                source,
            } => {
                self.end_session(input);
                self.apply_step(&geometry, step);
                self.position.current = step.offset;
                if self.click_guards.contains(&source) {
                    self.turn.defer(Deferred::ReleaseClickGuard(source));
                }
                EventResult::Consumed
            }
        }
    }

    fn end_session(&mut self, input: InputKind) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.release_pointer(input);
            renderer.set_dragged(false);
        }
    }

    fn apply_step(&mut self, geometry: &ScrollbarGeometry, step: DragStep) {
        if let Some(target) = step.locked {
            self.click_guards.insert(target);
        }

        if let Some(renderer) = self.renderer.as_mut() {
            match self.kind {
                ScrollbarType::Scroll => renderer.set_offset(Part::Handle, step.offset),
                ScrollbarType::Progress => {
                    renderer.set_size(Part::Progress, step.offset);
                    renderer.set_offset(Part::Handle, step.offset);
                }
            }
        }

        let index = geometry.index_at(step.offset);
        if index != self.position.active_index {
            self.position.active_index = index;
            debug!("Requesting navigation to index {}", index);
            self.outbox.push(NavigationRequest {
                index,
                speed: self.host.animation_speed(),
                suppress_resync: true,
            });
        }
    }

    // -------------------------------------------------------------------------
    // Geometry and rest rendering
    // -------------------------------------------------------------------------

    fn recompute_geometry(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        let track_size = renderer.measure(Part::Track).unwrap_or(0.0);
        match self.kind {
            // Sized once, from the first track that could be measured.
            ScrollbarType::Scroll if self.handle_size <= 0.0 && track_size > 0.0 => {
                self.handle_size = track_size * self.handle_percent / 100.0;
            }
            ScrollbarType::Scroll => {}
            ScrollbarType::Progress => {
                self.handle_size = renderer.measure(Part::Handle).unwrap_or(0.0);
            }
        }

        match ScrollbarGeometry::new(
            track_size,
            self.handle_size,
            self.page.item_count,
            self.page.page_size,
        ) {
            Ok(geometry) => {
                debug!(
                    "Geometry: track {} handle {} ratio {} bounds {:?}",
                    geometry.track_size, geometry.handle_size, geometry.ratio, geometry.bounds
                );
                self.geometry = Some(geometry);
                renderer.set_disabled(false);
            }
            Err(err) => {
                warn!("Scrollbar disabled: {}", err);
                self.geometry = None;
                if let Some(session) = self.drag.cancel() {
                    renderer.release_pointer(session.input());
                    renderer.set_dragged(false);
                    // No release follows, so no click can follow either.
                    self.click_guards.remove(&session.source());
                }
                renderer.set_disabled(true);
            }
        }
    }

    /// Scroll mode keeps the handle size it was first given.
    fn size_handle(&mut self) {
        if self.kind != ScrollbarType::Scroll || self.geometry.is_none() {
            return;
        }
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_size(Part::Handle, self.handle_size);
        }
    }

    /// Move the handle (and progress bar) to the rest position of the host's
    /// current index.
    fn render_rest(&mut self, animate: bool) {
        let index = self.host.current_index();
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        let Some(geometry) = self.geometry else {
            renderer.set_offset(Part::Handle, 0.0);
            if self.kind == ScrollbarType::Progress {
                renderer.set_size(Part::Progress, 0.0);
            }
            self.position = HandlePosition::default();
            return;
        };

        if animate {
            let speed = Some(self.host.animation_speed());
            renderer.set_transition(Part::Handle, speed);
            if self.kind == ScrollbarType::Progress {
                renderer.set_transition(Part::Progress, speed);
            }
        }

        let current = match self.kind {
            ScrollbarType::Scroll => {
                let offset = position_for_index(&geometry, index);
                renderer.set_offset(Part::Handle, offset);
                offset
            }
            ScrollbarType::Progress => {
                let size = size_for_index(&geometry, index);
                renderer.set_size(Part::Progress, size);
                let offset = geometry.bounds.clamp(size);
                renderer.set_offset(Part::Handle, offset);
                offset
            }
        };

        trace!("Rest position for index {}: {}", index, current);
        self.position = HandlePosition {
            current,
            active_index: index,
        };
    }
}
