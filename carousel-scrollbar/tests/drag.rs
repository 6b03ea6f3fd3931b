use carousel_scrollbar::{
    Bounds, DragMachine, DragPhase, DragStep, DragUpdate, FormControl, InputKind, PointerEvent,
    PointerPhase, Target, TargetId,
};

const HANDLE: Target = Target {
    id: TargetId(1),
    control: None,
};

fn bounds() -> Bounds {
    Bounds::new(0.0, 180.0)
}

fn down(x: f32, y: f32) -> PointerEvent {
    PointerEvent::mouse(PointerPhase::Down, x, y, HANDLE)
}

fn mv(x: f32, y: f32) -> PointerEvent {
    PointerEvent::mouse(PointerPhase::Move, x, y, HANDLE)
}

fn up(x: f32, y: f32) -> PointerEvent {
    PointerEvent::mouse(PointerPhase::Up, x, y, HANDLE)
}

// ============================================================================
// Session start
// ============================================================================

#[test]
fn test_begin_starts_undecided_session() {
    let mut machine = DragMachine::new(3.0, 0.0);
    assert_eq!(machine.phase(), DragPhase::Idle);

    assert!(machine.begin(&down(50.0, 50.0), 40.0));
    assert_eq!(machine.phase(), DragPhase::Undecided);

    let session = machine.session().unwrap();
    assert_eq!(session.origin().x, 50.0);
    assert_eq!(session.origin().y, 50.0);
    assert_eq!(session.current(), 40.0);
    assert_eq!(session.source(), TargetId(1));
    assert!(!session.is_touch());
}

#[test]
fn test_begin_refused_while_session_active() {
    let mut machine = DragMachine::new(3.0, 0.0);
    assert!(machine.begin(&down(50.0, 50.0), 0.0));
    assert!(!machine.begin(&down(80.0, 50.0), 0.0));
    assert_eq!(machine.session().unwrap().origin().x, 50.0);
}

#[test]
fn test_begin_refused_on_interactive_control_for_mouse() {
    let mut machine = DragMachine::new(3.0, 0.0);
    let button = Target::control(2, FormControl::Button);
    assert!(!machine.begin(
        &PointerEvent::mouse(PointerPhase::Down, 0.0, 0.0, button),
        0.0
    ));
    assert!(!machine.is_active());

    // Touch input is not filtered
    assert!(machine.begin(
        &PointerEvent::touch(PointerPhase::Down, 0.0, 0.0, button),
        0.0
    ));
    assert!(machine.session().unwrap().is_touch());
}

// ============================================================================
// Disambiguation
// ============================================================================

#[test]
fn test_short_path_is_a_tap() {
    let mut machine = DragMachine::new(3.0, 0.0);
    machine.begin(&down(50.0, 50.0), 0.0);

    // sqrt(5) ~ 2.24 < 3
    assert_eq!(machine.update(&mv(52.0, 51.0), bounds()), DragUpdate::Pending);
    assert_eq!(machine.phase(), DragPhase::Undecided);

    assert_eq!(
        machine.update(&up(52.0, 51.0), bounds()),
        DragUpdate::Rejected {
            input: InputKind::Mouse
        }
    );
    assert_eq!(machine.phase(), DragPhase::Idle);
    assert!(!machine.is_active());
}

#[test]
fn test_sub_pixel_moves_are_ignored() {
    let mut machine = DragMachine::new(0.0, 0.0);
    machine.begin(&down(50.0, 50.0), 0.0);
    assert_eq!(machine.update(&mv(50.5, 50.0), bounds()), DragUpdate::Pending);
    assert_eq!(machine.phase(), DragPhase::Undecided);
}

#[test]
fn test_vertical_intent_is_rejected() {
    let mut machine = DragMachine::new(3.0, 0.0);
    machine.begin(&down(50.0, 50.0), 0.0);

    assert_eq!(
        machine.update(&mv(50.0, 60.0), bounds()),
        DragUpdate::Rejected {
            input: InputKind::Mouse
        }
    );
    assert_eq!(machine.phase(), DragPhase::Idle);
}

#[test]
fn test_diagonal_tie_is_rejected() {
    let mut machine = DragMachine::new(3.0, 0.0);
    machine.begin(&down(0.0, 0.0), 0.0);
    assert!(matches!(
        machine.update(&mv(10.0, 10.0), bounds()),
        DragUpdate::Rejected { .. }
    ));
}

#[test]
fn test_horizontal_path_commits_and_locks() {
    let mut machine = DragMachine::new(3.0, 0.0);
    machine.begin(&down(50.0, 50.0), 40.0);

    assert_eq!(
        machine.update(&mv(60.0, 52.0), bounds()),
        DragUpdate::Moved(DragStep {
            offset: 50.0,
            locked: Some(TargetId(1)),
        })
    );
    assert_eq!(machine.phase(), DragPhase::Locked);

    // The lock engages once
    assert_eq!(
        machine.update(&mv(70.0, 52.0), bounds()),
        DragUpdate::Moved(DragStep {
            offset: 60.0,
            locked: None,
        })
    );
}

#[test]
fn test_lock_waits_for_lock_threshold() {
    let mut machine = DragMachine::new(3.0, 20.0);
    machine.begin(&down(50.0, 50.0), 0.0);

    assert_eq!(
        machine.update(&mv(60.0, 50.0), bounds()),
        DragUpdate::Moved(DragStep {
            offset: 10.0,
            locked: None,
        })
    );
    assert_eq!(machine.phase(), DragPhase::Dragging);

    assert_eq!(
        machine.update(&mv(80.0, 50.0), bounds()),
        DragUpdate::Moved(DragStep {
            offset: 30.0,
            locked: Some(TargetId(1)),
        })
    );
    assert_eq!(machine.phase(), DragPhase::Locked);
}

#[test]
fn test_release_past_threshold_commits_in_one_step() {
    let mut machine = DragMachine::new(3.0, 0.0);
    machine.begin(&down(0.0, 0.0), 0.0);

    assert_eq!(
        machine.update(&up(3.0, 0.0), bounds()),
        DragUpdate::Released {
            step: DragStep {
                offset: 3.0,
                locked: Some(TargetId(1)),
            },
            input: InputKind::Mouse,
            source: TargetId(1),
        }
    );
    assert!(!machine.is_active());
}

// ============================================================================
// Clamping
// ============================================================================

#[test]
fn test_offsets_are_clamped_into_bounds() {
    let mut machine = DragMachine::new(3.0, 0.0);
    machine.begin(&down(100.0, 0.0), 20.0);

    match machine.update(&mv(0.0, 0.0), bounds()) {
        DragUpdate::Moved(step) => assert_eq!(step.offset, 0.0),
        other => panic!("expected move, got {:?}", other),
    }

    match machine.update(&up(500.0, 0.0), bounds()) {
        DragUpdate::Released { step, .. } => assert_eq!(step.offset, 180.0),
        other => panic!("expected release, got {:?}", other),
    }
}

// ============================================================================
// Stale and foreign events
// ============================================================================

#[test]
fn test_update_without_session_is_inactive() {
    let mut machine = DragMachine::new(3.0, 0.0);
    assert_eq!(machine.update(&up(10.0, 10.0), bounds()), DragUpdate::Inactive);
    assert_eq!(machine.update(&mv(10.0, 10.0), bounds()), DragUpdate::Inactive);
}

#[test]
fn test_events_from_other_device_are_ignored() {
    let mut machine = DragMachine::new(3.0, 0.0);
    machine.begin(
        &PointerEvent::touch(PointerPhase::Down, 0.0, 0.0, HANDLE),
        0.0,
    );
    assert_eq!(machine.update(&mv(50.0, 0.0), bounds()), DragUpdate::Inactive);
    assert_eq!(machine.phase(), DragPhase::Undecided);

    assert!(matches!(
        machine.update(
            &PointerEvent::touch(PointerPhase::Move, 50.0, 0.0, HANDLE),
            bounds()
        ),
        DragUpdate::Moved(_)
    ));
}

#[test]
fn test_cancel_discards_session() {
    let mut machine = DragMachine::new(3.0, 0.0);
    machine.begin(&down(0.0, 0.0), 0.0);
    machine.update(&mv(20.0, 0.0), bounds());

    let session = machine.cancel().unwrap();
    assert_eq!(session.phase(), DragPhase::Locked);
    assert_eq!(session.current(), 20.0);
    assert!(machine.cancel().is_none());
    assert_eq!(machine.phase(), DragPhase::Idle);
}
