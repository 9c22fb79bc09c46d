//! Data model for the playback sync module
//!
//! Serde-backed persisted state, the sync-mode authority table, and the
//! closed event vocabulary carried on the bus.

pub mod events;
pub mod sync_mode;
pub mod view_state;

pub use events::{Event, LayoutMode, PlayerEvent, ScrollCommand, ScrollMode, Topic, TransportCommand};
pub use sync_mode::{SyncMode, SyncModeConfig};
pub use view_state::{ScoreViewState, TrackSettings};
