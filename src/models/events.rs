//! Event and command vocabulary carried on the bus
//!
//! The set of kinds is closed so the coordinator's routing can be matched
//! exhaustively. The bus itself treats payloads as opaque transport; only
//! the topic matters for delivery.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Delivery channel on the bus. One topic per event family, FIFO per topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Notifications originating from the score engine.
    ScoreEvent,
    /// Notifications originating from the media element.
    MediaEvent,
    /// Scroll-configuration commands issued by the UI.
    ScrollCommand,
    /// Transport commands issued by the UI.
    TransportCommand,
}

/// Playback notifications raised by either time-keeping side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerEvent {
    /// Continuous position report during playback.
    PositionChanged { seconds: f64 },
    /// Discrete jump to a position.
    Seeked { seconds: f64 },
    Played,
    Paused,
}

/// Rendering-engine scroll mode.
#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ScrollMode {
    Off = 0,
    Continuous = 1,
    OffScreen = 2,
}

/// Active rendering layout of the score surface.
#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum LayoutMode {
    Page = 0,
    Horizontal = 1,
}

/// Scroll-configuration commands applied through the engine settings.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScrollCommand {
    SetMode { mode: ScrollMode },
    SetSpeed { speed: f64 },
    SetOffsetX { offset: i32 },
    SetOffsetY { offset: i32 },
    SetNativeSmooth { enabled: bool },
    ScrollToCursor,
}

/// Transport commands issued by host UI controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransportCommand {
    PlayPause,
    Stop,
    SeekTo { seconds: f64 },
}

/// Tagged union of everything the bus carries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    Score(PlayerEvent),
    Media(PlayerEvent),
    Scroll(ScrollCommand),
    Transport(TransportCommand),
}

impl Event {
    /// The delivery topic for this event.
    pub fn topic(&self) -> Topic {
        match self {
            Event::Score(_) => Topic::ScoreEvent,
            Event::Media(_) => Topic::MediaEvent,
            Event::Scroll(_) => Topic::ScrollCommand,
            Event::Transport(_) => Topic::TransportCommand,
        }
    }
}
