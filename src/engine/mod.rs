//! Consumed interfaces of the host environment
//!
//! The score/playback engine, the media element, and the key-value storage
//! surface are external collaborators. The core only ever talks to them
//! through these traits; the `api` module supplies the JS/DOM-backed
//! implementations, tests supply recording doubles.
//!
//! Methods take `&self`: implementations are expected to use interior
//! mutability where they need state, which keeps trait objects freely
//! shareable on the single-threaded context.

use crate::error::CoreError;
use crate::models::events::ScrollMode;

/// The notation/score playback engine.
pub trait ScoreEngine {
    /// Whether a score is currently loaded.
    fn has_score(&self) -> bool;

    /// Number of tracks on the loaded score. Zero when none is loaded.
    fn track_count(&self) -> usize;

    /// Make exactly the given track indices the active render/playback set.
    fn render_tracks(&self, tracks: &[usize]) -> Result<(), CoreError>;

    fn set_solo(&self, track: usize, solo: bool) -> Result<(), CoreError>;
    fn set_mute(&self, track: usize, mute: bool) -> Result<(), CoreError>;
    fn set_volume(&self, track: usize, volume: i32) -> Result<(), CoreError>;
    fn set_transpose(&self, track: usize, semitones: i32) -> Result<(), CoreError>;

    fn play(&self) -> Result<(), CoreError>;
    fn pause(&self) -> Result<(), CoreError>;
    /// Toggle between playing and paused.
    fn play_pause(&self) -> Result<(), CoreError>;
    fn stop(&self) -> Result<(), CoreError>;
    fn seek(&self, seconds: f64) -> Result<(), CoreError>;

    /// Mutate the engine's settings object. Changes only take effect after
    /// `commit_settings` followed by `render`.
    fn set_scroll_mode(&self, mode: ScrollMode);
    fn set_scroll_speed(&self, speed: f64);
    fn set_scroll_offset_x(&self, offset: i32);
    fn set_scroll_offset_y(&self, offset: i32);
    fn set_native_smooth_scroll(&self, enabled: bool);

    /// Commit pending settings mutations.
    fn commit_settings(&self);

    /// Request a re-render with the committed settings.
    fn render(&self);

    /// Scroll the viewport to the playback cursor now.
    fn scroll_to_cursor(&self);
}

/// The externally supplied media element (audio/video).
pub trait MediaTransport {
    fn current_time(&self) -> f64;
    fn seek(&self, seconds: f64) -> Result<(), CoreError>;
    fn play(&self) -> Result<(), CoreError>;
    fn pause(&self) -> Result<(), CoreError>;
}

/// Transport used when the host embeds no media element; every operation
/// degrades to a no-op.
#[derive(Default)]
pub struct NullMediaTransport;

impl MediaTransport for NullMediaTransport {
    fn current_time(&self) -> f64 {
        0.0
    }

    fn seek(&self, _seconds: f64) -> Result<(), CoreError> {
        Ok(())
    }

    fn play(&self) -> Result<(), CoreError> {
        Ok(())
    }

    fn pause(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

/// Host key-value persistence surface (e.g. localStorage).
pub trait KeyValueStore {
    /// Stored value for `key`, or `None` when absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
}
