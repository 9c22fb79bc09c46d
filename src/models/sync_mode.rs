//! Sync modes and the authority configuration derived from them

use serde_repr::{Deserialize_repr, Serialize_repr};

/// Authority policy between the score engine and the external media element.
#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SyncMode {
    /// Either side may drive the other.
    Bidirectional = 0,
    /// Only the media element drives the score.
    MediaMaster = 1,
    /// Only the score drives the media element.
    ScoreMaster = 2,
}

impl SyncMode {
    pub fn from_u8(value: u8) -> Option<SyncMode> {
        match value {
            0 => Some(SyncMode::Bidirectional),
            1 => Some(SyncMode::MediaMaster),
            2 => Some(SyncMode::ScoreMaster),
            _ => None,
        }
    }
}

/// Routing permissions derived from a [`SyncMode`].
///
/// The two flags are a pure function of the mode; no other code path sets
/// them independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncModeConfig {
    pub mode: SyncMode,
    pub allow_media_control_score: bool,
    pub allow_score_control_media: bool,
}

impl SyncModeConfig {
    pub fn from_mode(mode: SyncMode) -> SyncModeConfig {
        let (media_controls_score, score_controls_media) = match mode {
            SyncMode::Bidirectional => (true, true),
            SyncMode::MediaMaster => (true, false),
            SyncMode::ScoreMaster => (false, true),
        };
        SyncModeConfig {
            mode,
            allow_media_control_score: media_controls_score,
            allow_score_control_media: score_controls_media,
        }
    }
}
