//! Media element transport and event binding
//!
//! Wraps the host's `HtmlMediaElement` as a [`MediaTransport`] and mirrors
//! its DOM events (`timeupdate`, `seeked`, `play`, `pause`) onto the bus
//! as [`Event::Media`] notifications.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlMediaElement;

use crate::api::helpers::{engine_error, js_error_string};
use crate::bus::EventBus;
use crate::engine::MediaTransport;
use crate::error::CoreError;
use crate::models::events::{Event, PlayerEvent};

/// [`MediaTransport`] backed by a DOM media element.
pub struct DomMediaTransport {
    element: HtmlMediaElement,
}

impl DomMediaTransport {
    pub fn new(element: HtmlMediaElement) -> DomMediaTransport {
        DomMediaTransport { element }
    }
}

impl MediaTransport for DomMediaTransport {
    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn seek(&self, seconds: f64) -> Result<(), CoreError> {
        self.element.set_current_time(seconds);
        Ok(())
    }

    fn play(&self) -> Result<(), CoreError> {
        // The returned promise resolves when playback starts; rejection
        // (e.g. autoplay policy) surfaces through the pause state, so the
        // promise itself is not awaited here.
        self.element.play().map(|_| ()).map_err(|e| engine_error("media play", e))
    }

    fn pause(&self) -> Result<(), CoreError> {
        self.element.pause().map_err(|e| engine_error("media pause", e))
    }
}

/// DOM listeners republishing media element events onto the bus.
///
/// `dispose` removes the listeners and is idempotent; dropping the binding
/// disposes it as well.
pub struct MediaEventBinding {
    element: HtmlMediaElement,
    listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
}

impl MediaEventBinding {
    /// Attach `timeupdate`/`seeked`/`play`/`pause` listeners that publish
    /// [`Event::Media`] notifications.
    pub fn install(element: HtmlMediaElement, bus: Rc<EventBus>) -> MediaEventBinding {
        let mut binding = MediaEventBinding { element: element.clone(), listeners: Vec::new() };

        let make_position_listener = |event: fn(f64) -> PlayerEvent| {
            let bus = Rc::clone(&bus);
            let element = element.clone();
            Closure::<dyn FnMut()>::new(move || {
                bus.publish(Event::Media(event(element.current_time())));
            })
        };

        binding.add("timeupdate", make_position_listener(|seconds| PlayerEvent::PositionChanged { seconds }));
        binding.add("seeked", make_position_listener(|seconds| PlayerEvent::Seeked { seconds }));

        let play_bus = Rc::clone(&bus);
        binding.add(
            "play",
            Closure::<dyn FnMut()>::new(move || {
                play_bus.publish(Event::Media(PlayerEvent::Played));
            }),
        );

        let pause_bus = Rc::clone(&bus);
        binding.add(
            "pause",
            Closure::<dyn FnMut()>::new(move || {
                pause_bus.publish(Event::Media(PlayerEvent::Paused));
            }),
        );

        binding
    }

    fn add(&mut self, name: &'static str, closure: Closure<dyn FnMut()>) {
        if let Err(err) = self
            .element
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to attach media '{}' listener: {}", name, js_error_string(&err));
            return;
        }
        self.listeners.push((name, closure));
    }

    /// Remove all listeners. Idempotent, safe after element detachment.
    pub fn dispose(&mut self) {
        for (name, closure) in self.listeners.drain(..) {
            let _ = self
                .element
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for MediaEventBinding {
    fn drop(&mut self) {
        self.dispose();
    }
}
