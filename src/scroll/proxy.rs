//! Scroll-configuration proxy
//!
//! Routes [`ScrollCommand`]s from the bus into the engine's settings
//! object, committing and re-rendering after each change so configuration
//! takes visible effect immediately instead of waiting for the next
//! natural re-render.

use std::rc::Rc;

use crate::bus::{EventBus, Subscription};
use crate::engine::ScoreEngine;
use crate::models::events::{Event, ScrollCommand, Topic};

/// Bus-attached proxy for scroll configuration commands.
pub struct ScrollProxy {
    bus: Rc<EventBus>,
    subscription: Option<Subscription>,
}

impl ScrollProxy {
    /// Subscribe to [`Topic::ScrollCommand`] and apply every command to
    /// `engine`.
    pub fn attach(bus: Rc<EventBus>, engine: Rc<dyn ScoreEngine>) -> ScrollProxy {
        let subscription = bus.subscribe(Topic::ScrollCommand, move |event| {
            if let Event::Scroll(command) = event {
                apply(engine.as_ref(), *command);
            }
            Ok(())
        });
        ScrollProxy { bus, subscription: Some(subscription) }
    }

    /// Stop handling commands. Idempotent.
    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.bus.unsubscribe(&subscription);
        }
    }
}

impl Drop for ScrollProxy {
    fn drop(&mut self) {
        self.detach();
    }
}

fn apply(engine: &dyn ScoreEngine, command: ScrollCommand) {
    match command {
        ScrollCommand::SetMode { mode } => engine.set_scroll_mode(mode),
        ScrollCommand::SetSpeed { speed } => engine.set_scroll_speed(speed),
        ScrollCommand::SetOffsetX { offset } => engine.set_scroll_offset_x(offset),
        ScrollCommand::SetOffsetY { offset } => engine.set_scroll_offset_y(offset),
        ScrollCommand::SetNativeSmooth { enabled } => engine.set_native_smooth_scroll(enabled),
        ScrollCommand::ScrollToCursor => {
            engine.scroll_to_cursor();
            return;
        }
    }
    engine.commit_settings();
    engine.render();
}
