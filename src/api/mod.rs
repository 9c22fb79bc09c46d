//! WASM API for the playback sync module
//!
//! The JavaScript-facing surface: the exported [`PlaybackBridge`] class,
//! the DOM/JS-backed implementations of the consumed-interface traits,
//! and shared serialization helpers.
//!
//! # Module Structure
//!
//! - `helpers`: serialization and error conversion at the JS boundary
//! - `engine_js`: extern score-engine type and its trait adapter
//! - `media`: media-element transport and DOM event binding
//! - `storage`: localStorage-backed key-value client
//! - `scroll_dom`: wheel-listener installation and disposer handle
//! - `core`: the exported `PlaybackBridge` class

pub mod helpers;
pub mod engine_js;
pub mod media;
pub mod storage;
pub mod scroll_dom;
pub mod core;

pub use self::core::PlaybackBridge;
pub use self::scroll_dom::WheelRedirectHandle;
