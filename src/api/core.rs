//! JavaScript-facing playback bridge
//!
//! `PlaybackBridge` is the host's single entry point: it owns the bus, the
//! view-state store, the sync coordinator, and the scroll proxy, and turns
//! host calls into bus traffic. One bridge per document view; `dispose`
//! tears everything down.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlMediaElement};

use crate::api::engine_js::{ExternScoreEngine, JsEngineAdapter};
use crate::api::helpers::{deserialize, serialize};
use crate::api::media::{DomMediaTransport, MediaEventBinding};
use crate::api::scroll_dom::{self, WheelRedirectHandle};
use crate::api::storage::{LocalStorageStore, NullStore};
use crate::bus::EventBus;
use crate::engine::{KeyValueStore, MediaTransport, NullMediaTransport, ScoreEngine};
use crate::models::events::{Event, LayoutMode, PlayerEvent, ScrollCommand, TransportCommand};
use crate::models::sync_mode::SyncMode;
use crate::models::view_state::TrackSettings;
use crate::scroll::proxy::ScrollProxy;
use crate::store::ViewStateStore;
use crate::sync::SyncCoordinator;

/// Coordination surface exposed to the host UI layer.
#[wasm_bindgen]
pub struct PlaybackBridge {
    bus: Rc<EventBus>,
    engine: Rc<dyn ScoreEngine>,
    store: ViewStateStore,
    coordinator: SyncCoordinator,
    scroll_proxy: ScrollProxy,
    layout: Rc<Cell<LayoutMode>>,
    media_binding: Option<MediaEventBinding>,
}

#[wasm_bindgen]
impl PlaybackBridge {
    /// Wire the bridge to the host's engine object and, when present, its
    /// media element. Starts in bidirectional sync and page layout.
    #[wasm_bindgen(constructor)]
    pub fn new(engine: ExternScoreEngine, media: Option<HtmlMediaElement>) -> PlaybackBridge {
        let bus = Rc::new(EventBus::new());
        let engine: Rc<dyn ScoreEngine> = Rc::new(JsEngineAdapter::new(engine));

        let storage: Rc<dyn KeyValueStore> = match LocalStorageStore::from_window() {
            Some(store) => Rc::new(store),
            None => {
                log::warn!("localStorage unavailable, view state will not persist");
                Rc::new(NullStore)
            }
        };
        let store = ViewStateStore::new(storage);

        let (transport, media_binding): (Rc<dyn MediaTransport>, _) = match media {
            Some(element) => (
                Rc::new(DomMediaTransport::new(element.clone())),
                Some(MediaEventBinding::install(element, Rc::clone(&bus))),
            ),
            None => (Rc::new(NullMediaTransport), None),
        };

        let coordinator = SyncCoordinator::attach(
            Rc::clone(&bus),
            Rc::clone(&engine),
            transport,
            SyncMode::Bidirectional,
        );
        let scroll_proxy = ScrollProxy::attach(Rc::clone(&bus), Rc::clone(&engine));

        PlaybackBridge {
            bus,
            engine,
            store,
            coordinator,
            scroll_proxy,
            layout: Rc::new(Cell::new(LayoutMode::Page)),
            media_binding,
        }
    }

    /// Set the authority policy: 0 = bidirectional, 1 = media master,
    /// 2 = score master.
    #[wasm_bindgen(js_name = setSyncMode)]
    pub fn set_sync_mode(&self, mode: u8) -> Result<(), JsValue> {
        match SyncMode::from_u8(mode) {
            Some(mode) => {
                self.coordinator.set_mode(mode);
                Ok(())
            }
            None => Err(JsValue::from_str(&format!("unknown sync mode: {}", mode))),
        }
    }

    /// Set the rendering layout consumed by the wheel redirector.
    #[wasm_bindgen(js_name = setLayoutMode)]
    pub fn set_layout_mode(&self, horizontal: bool) {
        self.layout.set(if horizontal { LayoutMode::Horizontal } else { LayoutMode::Page });
    }

    // ------------------------------------------------------------------
    // View-state persistence
    // ------------------------------------------------------------------

    /// Apply the persisted view state for a document to the engine.
    #[wasm_bindgen(js_name = loadViewState)]
    pub fn load_view_state(&self, document_path: &str) {
        self.store.load(self.engine.as_ref(), document_path);
    }

    /// Persist the selected track set for a document.
    #[wasm_bindgen(js_name = saveSelectedTracks)]
    pub fn save_selected_tracks(&self, document_path: &str, tracks: &[u32]) {
        let tracks: Vec<usize> = tracks.iter().map(|&t| t as usize).collect();
        self.store.save_selected_tracks(document_path, &tracks);
    }

    /// Merge a settings patch into one track's persisted settings.
    #[wasm_bindgen(js_name = saveTrackSettings)]
    pub fn save_track_settings(
        &self,
        document_path: &str,
        track_index: u32,
        patch: JsValue,
    ) -> Result<(), JsValue> {
        let patch: TrackSettings = deserialize(patch, "invalid track settings patch")?;
        self.store.save_track_settings(document_path, track_index as usize, &patch);
        Ok(())
    }

    /// The persisted view state for a document (defaults when absent).
    #[wasm_bindgen(js_name = getViewState)]
    pub fn get_view_state(&self, document_path: &str) -> Result<JsValue, JsValue> {
        serialize(&self.store.read(document_path), "failed to serialize view state")
    }

    // ------------------------------------------------------------------
    // Score-engine notifications (forwarded by the host's engine hooks)
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = notifyScorePosition)]
    pub fn notify_score_position(&self, seconds: f64) {
        self.bus.publish(Event::Score(PlayerEvent::PositionChanged { seconds }));
    }

    #[wasm_bindgen(js_name = notifyScoreSeeked)]
    pub fn notify_score_seeked(&self, seconds: f64) {
        self.bus.publish(Event::Score(PlayerEvent::Seeked { seconds }));
    }

    #[wasm_bindgen(js_name = notifyScorePlaying)]
    pub fn notify_score_playing(&self) {
        self.bus.publish(Event::Score(PlayerEvent::Played));
    }

    #[wasm_bindgen(js_name = notifyScorePaused)]
    pub fn notify_score_paused(&self) {
        self.bus.publish(Event::Score(PlayerEvent::Paused));
    }

    // ------------------------------------------------------------------
    // UI commands
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = transportPlayPause)]
    pub fn transport_play_pause(&self) {
        self.bus.publish(Event::Transport(TransportCommand::PlayPause));
    }

    #[wasm_bindgen(js_name = transportStop)]
    pub fn transport_stop(&self) {
        self.bus.publish(Event::Transport(TransportCommand::Stop));
    }

    #[wasm_bindgen(js_name = transportSeek)]
    pub fn transport_seek(&self, seconds: f64) {
        self.bus.publish(Event::Transport(TransportCommand::SeekTo { seconds }));
    }

    /// Publish a scroll-configuration command, e.g.
    /// `{ kind: "setSpeed", speed: 1.5 }` or `{ kind: "scrollToCursor" }`.
    #[wasm_bindgen(js_name = scrollCommand)]
    pub fn scroll_command(&self, command: JsValue) -> Result<(), JsValue> {
        let command: ScrollCommand = deserialize(command, "invalid scroll command")?;
        self.bus.publish(Event::Scroll(command));
        Ok(())
    }

    /// Install wheel-to-horizontal redirection on the score container.
    #[wasm_bindgen(js_name = installWheelRedirect)]
    pub fn install_wheel_redirect(&self, element: Element) -> Result<WheelRedirectHandle, JsValue> {
        scroll_dom::install(element, Rc::clone(&self.layout))
    }

    /// Detach all bus subscriptions and DOM listeners. Idempotent.
    pub fn dispose(&mut self) {
        self.coordinator.detach();
        self.scroll_proxy.detach();
        if let Some(binding) = self.media_binding.as_mut() {
            binding.dispose();
        }
    }
}
