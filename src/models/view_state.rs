//! Per-document view state
//!
//! `ScoreViewState` is the unit of persistence: one instance per document
//! path, holding the selected track set and per-track mix settings. Field
//! names serialize in camelCase to match the host's stored JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Volume range accepted by the playback engine.
pub const VOLUME_MIN: i32 = 0;
pub const VOLUME_MAX: i32 = 16;

/// Transposition range in semitones.
pub const TRANSPOSE_MIN: i32 = -12;
pub const TRANSPOSE_MAX: i32 = 12;

/// Mix settings for a single track.
///
/// Every field is optional: an absent field means "no stored preference"
/// and survives merges untouched. Numeric fields are clamped to their
/// declared range before storage and before application.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solo: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mute: Option<bool>,

    /// Playback volume, clamped to [0, 16].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<i32>,

    /// Notation transposition in semitones, clamped to [-12, 12].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transpose: Option<i32>,

    /// Audio-only transposition in semitones, clamped to [-12, 12].
    /// Stored and reported back, but never applied to the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transpose_audio: Option<i32>,
}

impl TrackSettings {
    /// Field-wise merge: fields present in `patch` overwrite, absent
    /// fields survive.
    pub fn merge(&mut self, patch: &TrackSettings) {
        if patch.solo.is_some() {
            self.solo = patch.solo;
        }
        if patch.mute.is_some() {
            self.mute = patch.mute;
        }
        if patch.volume.is_some() {
            self.volume = patch.volume;
        }
        if patch.transpose.is_some() {
            self.transpose = patch.transpose;
        }
        if patch.transpose_audio.is_some() {
            self.transpose_audio = patch.transpose_audio;
        }
    }

    /// Clamp all numeric fields to their declared ranges.
    pub fn clamp(&mut self) {
        if let Some(v) = self.volume {
            self.volume = Some(v.clamp(VOLUME_MIN, VOLUME_MAX));
        }
        if let Some(t) = self.transpose {
            self.transpose = Some(t.clamp(TRANSPOSE_MIN, TRANSPOSE_MAX));
        }
        if let Some(t) = self.transpose_audio {
            self.transpose_audio = Some(t.clamp(TRANSPOSE_MIN, TRANSPOSE_MAX));
        }
    }

    /// True if no field carries a stored preference.
    pub fn is_empty(&self) -> bool {
        self.solo.is_none()
            && self.mute.is_none()
            && self.volume.is_none()
            && self.transpose.is_none()
            && self.transpose_audio.is_none()
    }
}

/// Persisted view state for one document path.
///
/// `track_settings` entries may exist for indices not currently selected;
/// settings persist even when a track is deselected.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreViewState {
    /// Selected track indices in selection order; empty means "use the
    /// engine default".
    #[serde(default)]
    pub selected_track_indices: Vec<usize>,

    /// Per-track settings keyed by track index rendered as a string.
    #[serde(default)]
    pub track_settings: BTreeMap<String, TrackSettings>,
}

impl ScoreViewState {
    /// Replace the selection, deduplicating while preserving order.
    pub fn set_selected_tracks(&mut self, tracks: &[usize]) {
        let mut seen = Vec::with_capacity(tracks.len());
        for &t in tracks {
            if !seen.contains(&t) {
                seen.push(t);
            }
        }
        self.selected_track_indices = seen;
    }

    /// Merge a clamped settings patch into the entry for `track_index`,
    /// creating the entry if absent.
    pub fn merge_track_settings(&mut self, track_index: usize, patch: &TrackSettings) {
        let mut patch = patch.clone();
        patch.clamp();
        let entry = self.track_settings.entry(track_index.to_string()).or_default();
        entry.merge(&patch);
    }

    /// Settings for a track index, if any are stored.
    pub fn settings_for(&self, track_index: usize) -> Option<&TrackSettings> {
        self.track_settings.get(&track_index.to_string())
    }
}
