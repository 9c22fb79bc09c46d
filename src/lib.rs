//! Score Playback Sync WASM Module
//!
//! This is the WASM module coordinating playback position and control
//! authority between the score/playback engine and an externally supplied
//! media element, and persisting per-document view preferences.

pub mod bus;
pub mod engine;
pub mod error;
pub mod models;
pub mod scroll;
pub mod store;
pub mod sync;
pub mod api;

// Re-export commonly used types
pub use error::CoreError;
pub use models::events::*;
pub use models::sync_mode::{SyncMode, SyncModeConfig};
pub use models::view_state::{ScoreViewState, TrackSettings};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(feature = "console_log")]
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Score playback sync WASM module initialized");
}
