//! DOM installation of the wheel-to-horizontal redirector
//!
//! Attaches a non-passive wheel listener to the scrollable score container
//! and applies the decisions of [`crate::scroll::decide`]. The returned
//! handle is exposed to JavaScript; `dispose` removes the listener and may
//! be called any number of times, before or after the element is detached.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, WheelEvent};

use crate::models::events::LayoutMode;
use crate::scroll::{decide, ScrollMetrics, WheelAction, WheelDeltaMode, WheelInput};

/// Disposer for an installed wheel redirector.
#[wasm_bindgen]
pub struct WheelRedirectHandle {
    element: Element,
    closure: Option<Closure<dyn FnMut(WheelEvent)>>,
}

#[wasm_bindgen]
impl WheelRedirectHandle {
    /// Remove the wheel listener. Idempotent.
    pub fn dispose(&mut self) {
        if let Some(closure) = self.closure.take() {
            let _ = self
                .element
                .remove_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for WheelRedirectHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Install the redirector on `element`. The active layout is read from
/// `layout` at event time, so layout-mode changes apply without
/// reinstalling.
pub fn install(element: Element, layout: Rc<Cell<LayoutMode>>) -> Result<WheelRedirectHandle, JsValue> {
    let target = element.clone();
    let closure = Closure::<dyn FnMut(WheelEvent)>::new(move |event: WheelEvent| {
        let input = WheelInput {
            delta_x: event.delta_x(),
            delta_y: event.delta_y(),
            delta_mode: WheelDeltaMode::from_dom(event.delta_mode()),
            modifier_held: event.ctrl_key() || event.meta_key() || event.alt_key(),
        };
        let metrics = ScrollMetrics {
            scroll_left: target.scroll_left() as f64,
            scroll_width: target.scroll_width() as f64,
            client_width: target.client_width() as f64,
        };
        match decide(&input, &metrics, layout.get()) {
            WheelAction::Pass => {}
            WheelAction::Scroll { to } => {
                target.set_scroll_left(to as i32);
                event.prevent_default();
                event.stop_propagation();
            }
        }
    });

    // Wheel listeners default to passive on some targets; preventDefault
    // requires an explicitly non-passive registration.
    let mut options = AddEventListenerOptions::new();
    options.set_passive(false);
    element.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        closure.as_ref().unchecked_ref(),
        &options,
    )?;

    Ok(WheelRedirectHandle { element, closure: Some(closure) })
}
