//! WASM build test
//!
//! Verifies that the module works inside a browser environment: bus
//! dispatch, localStorage-backed persistence, and the wheel decision
//! logic all behave as on native.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_test::*;

use scoresync_wasm::api::storage::LocalStorageStore;
use scoresync_wasm::bus::EventBus;
use scoresync_wasm::models::events::{Event, LayoutMode, PlayerEvent, Topic};
use scoresync_wasm::models::view_state::TrackSettings;
use scoresync_wasm::scroll::{decide, ScrollMetrics, WheelAction, WheelDeltaMode, WheelInput};
use scoresync_wasm::store::ViewStateStore;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_bus_dispatch_in_browser() {
    let bus = EventBus::new();
    let count = Rc::new(RefCell::new(0));

    let c = Rc::clone(&count);
    bus.subscribe(Topic::ScoreEvent, move |_| {
        *c.borrow_mut() += 1;
        Ok(())
    });

    bus.publish(Event::Score(PlayerEvent::Played));
    assert_eq!(*count.borrow(), 1);
}

#[wasm_bindgen_test]
fn test_local_storage_round_trip() {
    let storage = LocalStorageStore::from_window().expect("browser test needs localStorage");
    let store = ViewStateStore::new(Rc::new(storage));

    let path = "wasm-build-test.gp";
    store.save_track_settings(path, 0, &TrackSettings { volume: Some(20), ..Default::default() });

    let state = store.read(path);
    assert_eq!(state.settings_for(0).unwrap().volume, Some(16));
}

#[wasm_bindgen_test]
fn test_wheel_decision_in_browser() {
    let input = WheelInput {
        delta_x: 0.0,
        delta_y: 100.0,
        delta_mode: WheelDeltaMode::Pixel,
        modifier_held: false,
    };
    let metrics = ScrollMetrics { scroll_left: 0.0, scroll_width: 2000.0, client_width: 800.0 };

    assert_eq!(
        decide(&input, &metrics, LayoutMode::Horizontal),
        WheelAction::Scroll { to: 100.0 }
    );
}
