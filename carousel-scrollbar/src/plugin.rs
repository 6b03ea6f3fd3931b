//! Wiring a controller to the host's event buses.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use log::{debug, warn};

use crate::bus::{EventBus, Subscription};
use crate::config::{ConfigError, ScrollbarOptions};
use crate::controller::ScrollbarController;
use crate::event::{Carousel, CarouselEvent, EventResult, NavigationRequest};
use crate::pointer::{PointerEvent, TargetId};
use crate::render::Renderer;

/// A scrollbar attached to one carousel.
///
/// Listens to the carousel's lifecycle bus and publishes navigation requests
/// on the navigation bus. Requests are published only after the controller
/// has finished handling the event that produced them, so the host may react
/// by publishing lifecycle signals synchronously.
pub struct ScrollbarPlugin<R: Renderer + 'static> {
    controller: Rc<RefCell<ScrollbarController<R>>>,
    navigation: EventBus<NavigationRequest>,
    subscription: Option<Subscription>,
}

impl<R: Renderer + 'static> ScrollbarPlugin<R> {
    /// Create a controller and subscribe it to `events`. A disabled
    /// scrollbar is created but never subscribed.
    pub fn attach(
        options: ScrollbarOptions,
        host: Rc<dyn Carousel>,
        renderer: R,
        events: &EventBus<CarouselEvent>,
        navigation: EventBus<NavigationRequest>,
    ) -> Result<Self, ConfigError> {
        let enabled = options.is_enabled();
        let controller = Rc::new(RefCell::new(ScrollbarController::new(
            options, host, renderer,
        )?));

        let subscription = if enabled {
            let weak = Rc::downgrade(&controller);
            let outgoing = navigation.clone();
            Some(events.subscribe(move |event| {
                let Some(controller) = weak.upgrade() else {
                    return;
                };
                let requests = {
                    let Ok(mut controller) = controller.try_borrow_mut() else {
                        warn!("Dropped {:?}: scrollbar is busy", event);
                        return;
                    };
                    controller.handle_event(event);
                    controller.take_requests()
                };
                for request in &requests {
                    outgoing.publish(request);
                }
            }))
        } else {
            debug!("Scrollbar disabled by options");
            None
        };

        Ok(Self {
            controller,
            navigation,
            subscription,
        })
    }

    pub fn is_attached(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    pub fn controller(&self) -> Ref<'_, ScrollbarController<R>> {
        self.controller.borrow()
    }

    pub fn controller_mut(&self) -> RefMut<'_, ScrollbarController<R>> {
        self.controller.borrow_mut()
    }

    /// Feed a pointer event and publish any resulting navigation.
    pub fn pointer(&self, event: &PointerEvent) -> EventResult {
        let (result, requests) = {
            let mut controller = self.controller.borrow_mut();
            let result = controller.pointer(event);
            (result, controller.take_requests())
        };
        self.publish(&requests);
        result
    }

    /// Feed a click on `target`.
    pub fn click(&self, target: TargetId) -> EventResult {
        self.controller.borrow_mut().click(target)
    }

    /// Run cleanup deferred past the current event turn.
    pub fn end_turn(&self) {
        self.controller.borrow_mut().end_turn();
    }

    /// Unsubscribe and tear the controller down, returning the renderer.
    /// Safe to call more than once.
    pub fn destroy(&mut self) -> Option<R> {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.dispose();
        }
        self.controller.borrow_mut().teardown()
    }

    fn publish(&self, requests: &[NavigationRequest]) {
        for request in requests {
            self.navigation.publish(request);
        }
    }
}
