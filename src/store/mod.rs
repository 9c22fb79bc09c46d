//! Durable per-document view-state store
//!
//! Persists selected tracks and per-track mix settings keyed by document
//! path, and applies them back to the engine on document load. Every
//! mutation is a full read-merge-write cycle against the backing storage:
//! independent call sites (track selection UI, per-track mixer UI) may
//! interleave writes to the same document, so no in-memory copy is held
//! across operations.
//!
//! Missing state is not an error. Corrupt state is logged and treated as
//! missing; the corrupt entry stays until the next successful write
//! overwrites it.

use std::rc::Rc;

use crate::engine::{KeyValueStore, ScoreEngine};
use crate::models::view_state::{ScoreViewState, TrackSettings};

/// Storage key prefix; one entry per document path.
const KEY_PREFIX: &str = "score-view-state:";

/// Keyed, durable storage of per-document view preferences.
pub struct ViewStateStore {
    storage: Rc<dyn KeyValueStore>,
}

impl ViewStateStore {
    /// The storage client is injected; the store owns no ambient state.
    pub fn new(storage: Rc<dyn KeyValueStore>) -> ViewStateStore {
        ViewStateStore { storage }
    }

    fn key_for(document_path: &str) -> String {
        format!("{}{}", KEY_PREFIX, document_path)
    }

    /// Read the persisted state for a document. Missing and corrupt
    /// entries both come back as the default (empty) state.
    pub fn read(&self, document_path: &str) -> ScoreViewState {
        let key = Self::key_for(document_path);
        match self.storage.get(&key) {
            None => ScoreViewState::default(),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(state) => state,
                Err(err) => {
                    log::warn!("corrupt view state for '{}', using defaults: {}", document_path, err);
                    ScoreViewState::default()
                }
            },
        }
    }

    fn write(&self, document_path: &str, state: &ScoreViewState) {
        let key = Self::key_for(document_path);
        match serde_json::to_string(state) {
            Ok(raw) => {
                if let Err(err) = self.storage.set(&key, &raw) {
                    log::warn!("failed to persist view state for '{}': {}", document_path, err);
                }
            }
            Err(err) => {
                log::warn!("failed to serialize view state for '{}': {}", document_path, err);
            }
        }
    }

    /// Apply the persisted state for `document_path` to the engine.
    ///
    /// No-op when nothing is persisted or no score is loaded. The stored
    /// selection is applied first; stored indices that no longer exist on
    /// the score are dropped, and if none survive the engine default is
    /// left untouched. Track settings are applied second, one track at a
    /// time: a failure on one track is logged and does not abort the rest.
    pub fn load(&self, engine: &dyn ScoreEngine, document_path: &str) {
        if document_path.is_empty() || !engine.has_score() {
            return;
        }

        let state = self.read(document_path);
        if state == ScoreViewState::default() {
            return;
        }

        let track_count = engine.track_count();

        if !state.selected_track_indices.is_empty() {
            let surviving: Vec<usize> = state
                .selected_track_indices
                .iter()
                .copied()
                .filter(|&index| index < track_count)
                .collect();
            if surviving.is_empty() {
                log::debug!(
                    "stored selection for '{}' matches no track on the current score, keeping engine default",
                    document_path
                );
            } else if let Err(err) = engine.render_tracks(&surviving) {
                log::warn!("failed to apply track selection for '{}': {}", document_path, err);
            }
        }

        for (key, settings) in &state.track_settings {
            let index: usize = match key.parse() {
                Ok(index) => index,
                Err(_) => {
                    log::warn!("ignoring non-numeric track key '{}' for '{}'", key, document_path);
                    continue;
                }
            };
            if index >= track_count {
                continue;
            }
            let mut settings = settings.clone();
            settings.clamp();
            if let Err(err) = Self::apply_track(engine, index, &settings) {
                log::warn!(
                    "failed to apply settings for track {} of '{}': {}",
                    index,
                    document_path,
                    err
                );
            }
        }
    }

    /// Replace the persisted track selection, leaving settings untouched.
    /// No-op on empty path.
    pub fn save_selected_tracks(&self, document_path: &str, tracks: &[usize]) {
        if document_path.is_empty() {
            return;
        }
        let mut state = self.read(document_path);
        state.set_selected_tracks(tracks);
        self.write(document_path, &state);
    }

    /// Merge a settings patch into one track's persisted settings, leaving
    /// the selection and sibling tracks untouched. No-op on empty path.
    pub fn save_track_settings(&self, document_path: &str, track_index: usize, patch: &TrackSettings) {
        if document_path.is_empty() {
            return;
        }
        let mut state = self.read(document_path);
        state.merge_track_settings(track_index, patch);
        self.write(document_path, &state);
    }

    fn apply_track(
        engine: &dyn ScoreEngine,
        index: usize,
        settings: &TrackSettings,
    ) -> Result<(), crate::error::CoreError> {
        if let Some(solo) = settings.solo {
            engine.set_solo(index, solo)?;
        }
        if let Some(mute) = settings.mute {
            engine.set_mute(index, mute)?;
        }
        if let Some(volume) = settings.volume {
            engine.set_volume(index, volume)?;
        }
        if let Some(semitones) = settings.transpose {
            engine.set_transpose(index, semitones)?;
        }
        // transpose_audio is stored only; the engine exposes no capability
        // for audio-only pitch shift.
        Ok(())
    }
}
