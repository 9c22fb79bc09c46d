//! Synchronous publish/subscribe bus
//!
//! Decouples UI-issued commands from the services that execute them.
//! Dispatch is synchronous and single-threaded: `publish` runs every
//! handler currently registered for the event's topic, in subscription
//! order, before it returns. A failing handler is logged at the dispatch
//! boundary and never prevents the remaining handlers from running.
//!
//! Handlers are invoked from a snapshot of the registration list, with
//! registration re-checked before each call, so unsubscribing mid-dispatch
//! neither crashes the loop nor invokes the removed handler for the event
//! in flight. Re-entrant publishes run depth-first to completion.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::CoreError;
use crate::models::events::{Event, Topic};

type Handler = Rc<RefCell<dyn FnMut(&Event) -> Result<(), CoreError>>>;

struct HandlerEntry {
    id: u64,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    topics: HashMap<Topic, Vec<HandlerEntry>>,
}

/// Handle returned by [`EventBus::subscribe`]; pass it back to
/// [`EventBus::unsubscribe`] to remove the handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscription {
    topic: Topic,
    id: u64,
}

/// Single-threaded synchronous event bus.
#[derive(Default)]
pub struct EventBus {
    registry: RefCell<Registry>,
}

impl EventBus {
    pub fn new() -> EventBus {
        EventBus::default()
    }

    /// Register `handler` for `topic`. Handlers run in subscription order.
    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> Subscription
    where
        F: FnMut(&Event) -> Result<(), CoreError> + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry
            .topics
            .entry(topic)
            .or_default()
            .push(HandlerEntry { id, handler: Rc::new(RefCell::new(handler)) });
        Subscription { topic, id }
    }

    /// Remove a previously registered handler. Idempotent: unknown or
    /// already-removed handles are ignored.
    pub fn unsubscribe(&self, subscription: &Subscription) {
        let mut registry = self.registry.borrow_mut();
        if let Some(entries) = registry.topics.get_mut(&subscription.topic) {
            entries.retain(|entry| entry.id != subscription.id);
        }
    }

    /// Deliver `event` to all handlers registered for its topic.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();

        // Snapshot so handlers may subscribe/unsubscribe freely mid-dispatch.
        let snapshot: Vec<(u64, Handler)> = {
            let registry = self.registry.borrow();
            match registry.topics.get(&topic) {
                Some(entries) => entries
                    .iter()
                    .map(|entry| (entry.id, Rc::clone(&entry.handler)))
                    .collect(),
                None => return,
            }
        };

        for (id, handler) in snapshot {
            if !self.is_registered(topic, id) {
                continue;
            }
            // A handler re-publishing its own topic would reach itself while
            // already borrowed; skip instead of aborting the dispatch.
            match handler.try_borrow_mut() {
                Ok(mut handler) => {
                    if let Err(err) = handler(&event) {
                        log::error!("event handler failed on {:?}: {}", topic, err);
                    }
                }
                Err(_) => {
                    log::warn!("skipped re-entrant handler on {:?}", topic);
                }
            }
        }
    }

    fn is_registered(&self, topic: Topic, id: u64) -> bool {
        self.registry
            .borrow()
            .topics
            .get(&topic)
            .map(|entries| entries.iter().any(|entry| entry.id == id))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::events::PlayerEvent;

    fn played() -> Event {
        Event::Score(PlayerEvent::Played)
    }

    #[test]
    fn test_handlers_run_in_subscription_order() {
        let bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for tag in 1..=3 {
            let order = Rc::clone(&order);
            bus.subscribe(Topic::ScoreEvent, move |_| {
                order.borrow_mut().push(tag);
                Ok(())
            });
        }

        bus.publish(played());
        assert_eq!(*order.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_failing_handler_does_not_stop_siblings() {
        let bus = EventBus::new();
        let calls = Rc::new(RefCell::new(Vec::new()));

        let c = Rc::clone(&calls);
        bus.subscribe(Topic::ScoreEvent, move |_| {
            c.borrow_mut().push("first");
            Ok(())
        });
        bus.subscribe(Topic::ScoreEvent, |_| {
            Err(CoreError::Handler("boom".into()))
        });
        let c = Rc::clone(&calls);
        bus.subscribe(Topic::ScoreEvent, move |_| {
            c.borrow_mut().push("third");
            Ok(())
        });

        bus.publish(played());
        assert_eq!(*calls.borrow(), vec!["first", "third"]);
    }

    #[test]
    fn test_unsubscribe_during_dispatch_skips_removed_handler() {
        let bus = Rc::new(EventBus::new());
        let second_ran = Rc::new(RefCell::new(false));

        // Placeholder replaced below once the second subscription exists.
        let removal_target: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let bus_ref = Rc::clone(&bus);
        let target = Rc::clone(&removal_target);
        bus.subscribe(Topic::ScoreEvent, move |_| {
            if let Some(sub) = target.borrow().as_ref() {
                bus_ref.unsubscribe(sub);
            }
            Ok(())
        });

        let ran = Rc::clone(&second_ran);
        let second = bus.subscribe(Topic::ScoreEvent, move |_| {
            *ran.borrow_mut() = true;
            Ok(())
        });
        *removal_target.borrow_mut() = Some(second);

        bus.publish(played());
        assert!(!*second_ran.borrow(), "removed handler must not see the in-flight event");
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let bus = EventBus::new();
        let sub = bus.subscribe(Topic::MediaEvent, |_| Ok(()));
        bus.unsubscribe(&sub);
        bus.unsubscribe(&sub);
        bus.publish(Event::Media(PlayerEvent::Paused));
    }

    #[test]
    fn test_reentrant_publish_runs_depth_first() {
        let bus = Rc::new(EventBus::new());
        let order = Rc::new(RefCell::new(Vec::new()));

        let o = Rc::clone(&order);
        let bus_ref = Rc::clone(&bus);
        bus.subscribe(Topic::ScoreEvent, move |event| {
            if matches!(event, Event::Score(PlayerEvent::Played)) {
                o.borrow_mut().push("outer-start");
                bus_ref.publish(Event::Score(PlayerEvent::Paused));
                o.borrow_mut().push("outer-end");
            } else {
                o.borrow_mut().push("inner");
            }
            Ok(())
        });

        bus.publish(played());
        // The nested publish reaches the same handler, which is mid-borrow;
        // it is skipped rather than crashing, and the outer dispatch resumes.
        assert_eq!(*order.borrow(), vec!["outer-start", "outer-end"]);

        // A second, distinct handler does see nested events depth-first.
        let o = Rc::clone(&order);
        bus.subscribe(Topic::ScoreEvent, move |event| {
            if matches!(event, Event::Score(PlayerEvent::Paused)) {
                o.borrow_mut().push("nested");
            }
            Ok(())
        });
        order.borrow_mut().clear();
        bus.publish(played());
        assert_eq!(*order.borrow(), vec!["outer-start", "nested", "outer-end"]);
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let bus = EventBus::new();
        bus.publish(played());
    }
}
