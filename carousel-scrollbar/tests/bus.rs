use std::cell::RefCell;
use std::rc::Rc;

use carousel_scrollbar::{EventBus, Subscription};

fn recorder(bus: &EventBus<u32>, log: &Rc<RefCell<Vec<u32>>>, tag: u32) -> Subscription {
    let log = log.clone();
    bus.subscribe(move |event| log.borrow_mut().push(tag * 100 + event))
}

// ============================================================================
// Delivery
// ============================================================================

#[test]
fn test_publish_reaches_subscribers_in_order() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let _a = recorder(&bus, &log, 1);
    let _b = recorder(&bus, &log, 2);

    assert_eq!(bus.publish(&7), 2);
    assert_eq!(*log.borrow(), vec![107, 207]);
}

#[test]
fn test_clones_share_the_channel() {
    let bus = EventBus::new();
    let other = bus.clone();
    let log = Rc::new(RefCell::new(Vec::new()));
    let _sub = recorder(&other, &log, 1);

    bus.publish(&1);
    assert_eq!(*log.borrow(), vec![101]);
    assert_eq!(bus.subscriber_count(), 1);
}

#[test]
fn test_publish_without_subscribers() {
    let bus: EventBus<u32> = EventBus::new();
    assert_eq!(bus.publish(&1), 0);
}

// ============================================================================
// Disposal
// ============================================================================

#[test]
fn test_dispose_unsubscribes() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut sub = recorder(&bus, &log, 1);

    sub.dispose();
    assert!(!sub.is_active());
    assert_eq!(bus.subscriber_count(), 0);
    bus.publish(&1);
    assert!(log.borrow().is_empty());

    // Idempotent
    sub.dispose();
}

#[test]
fn test_drop_unsubscribes() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    {
        let _sub = recorder(&bus, &log, 1);
        assert_eq!(bus.subscriber_count(), 1);
    }
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn test_subscription_outlives_bus() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut sub = recorder(&bus, &log, 1);
    drop(bus);
    sub.dispose();
}

// ============================================================================
// Reentrancy
// ============================================================================

#[test]
fn test_handler_may_publish() {
    let bus: EventBus<u32> = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let inner = bus.clone();
    let _relay = bus.subscribe(move |event| {
        if *event == 1 {
            inner.publish(&2);
        }
    });
    let _rec = recorder(&bus, &log, 0);

    bus.publish(&1);
    assert_eq!(*log.borrow(), vec![2, 1]);
}

#[test]
fn test_handler_disposed_mid_dispatch_is_skipped() {
    let bus: EventBus<u32> = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

    let slot = victim.clone();
    let _killer = bus.subscribe(move |_| {
        if let Some(mut sub) = slot.borrow_mut().take() {
            sub.dispose();
        }
    });
    *victim.borrow_mut() = Some(recorder(&bus, &log, 1));

    assert_eq!(bus.publish(&5), 1);
    assert!(log.borrow().is_empty());
    assert_eq!(bus.subscriber_count(), 1);
}

#[test]
fn test_handler_may_subscribe() {
    let bus: EventBus<u32> = EventBus::new();
    let held: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

    let inner = bus.clone();
    let store = held.clone();
    let _sub = bus.subscribe(move |_| {
        store.borrow_mut().push(inner.subscribe(|_| {}));
    });

    // Handlers added during dispatch only see later events.
    assert_eq!(bus.publish(&1), 1);
    assert_eq!(bus.subscriber_count(), 2);
    assert_eq!(bus.publish(&2), 2);
}
