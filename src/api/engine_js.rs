//! Adapter for the host-supplied score/playback engine
//!
//! The engine is a JavaScript object (the rendering/playback library the
//! host embeds). It is consumed duck-typed through a wasm-bindgen extern
//! type; fallible calls are declared with `catch` so JS exceptions become
//! `Result`s instead of unwinding through the core.

use wasm_bindgen::prelude::*;

use crate::api::helpers::engine_error;
use crate::engine::ScoreEngine;
use crate::error::CoreError;
use crate::models::events::ScrollMode;

#[wasm_bindgen]
extern "C" {
    /// The external score/playback engine object supplied by the host.
    pub type ExternScoreEngine;

    #[wasm_bindgen(method, js_name = hasScore)]
    fn has_score(this: &ExternScoreEngine) -> bool;

    #[wasm_bindgen(method, js_name = trackCount)]
    fn track_count(this: &ExternScoreEngine) -> u32;

    #[wasm_bindgen(method, catch, js_name = renderTracks)]
    fn render_tracks(this: &ExternScoreEngine, tracks: &[u32]) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setSolo)]
    fn set_solo(this: &ExternScoreEngine, track: u32, solo: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setMute)]
    fn set_mute(this: &ExternScoreEngine, track: u32, mute: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setVolume)]
    fn set_volume(this: &ExternScoreEngine, track: u32, volume: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setTranspose)]
    fn set_transpose(this: &ExternScoreEngine, track: u32, semitones: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn play(this: &ExternScoreEngine) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn pause(this: &ExternScoreEngine) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = playPause)]
    fn play_pause(this: &ExternScoreEngine) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn stop(this: &ExternScoreEngine) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn seek(this: &ExternScoreEngine, seconds: f64) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = setScrollMode)]
    fn set_scroll_mode(this: &ExternScoreEngine, mode: u8);

    #[wasm_bindgen(method, js_name = setScrollSpeed)]
    fn set_scroll_speed(this: &ExternScoreEngine, speed: f64);

    #[wasm_bindgen(method, js_name = setScrollOffsetX)]
    fn set_scroll_offset_x(this: &ExternScoreEngine, offset: i32);

    #[wasm_bindgen(method, js_name = setScrollOffsetY)]
    fn set_scroll_offset_y(this: &ExternScoreEngine, offset: i32);

    #[wasm_bindgen(method, js_name = setNativeSmoothScroll)]
    fn set_native_smooth_scroll(this: &ExternScoreEngine, enabled: bool);

    #[wasm_bindgen(method, js_name = commitSettings)]
    fn commit_settings(this: &ExternScoreEngine);

    #[wasm_bindgen(method)]
    fn render(this: &ExternScoreEngine);

    #[wasm_bindgen(method, js_name = scrollToCursor)]
    fn scroll_to_cursor(this: &ExternScoreEngine);
}

/// [`ScoreEngine`] implementation backed by the extern JS engine object.
pub struct JsEngineAdapter {
    engine: ExternScoreEngine,
}

impl JsEngineAdapter {
    pub fn new(engine: ExternScoreEngine) -> JsEngineAdapter {
        JsEngineAdapter { engine }
    }
}

impl ScoreEngine for JsEngineAdapter {
    fn has_score(&self) -> bool {
        self.engine.has_score()
    }

    fn track_count(&self) -> usize {
        self.engine.track_count() as usize
    }

    fn render_tracks(&self, tracks: &[usize]) -> Result<(), CoreError> {
        let tracks: Vec<u32> = tracks.iter().map(|&t| t as u32).collect();
        self.engine
            .render_tracks(&tracks)
            .map_err(|e| engine_error("renderTracks", e))
    }

    fn set_solo(&self, track: usize, solo: bool) -> Result<(), CoreError> {
        self.engine
            .set_solo(track as u32, solo)
            .map_err(|e| engine_error("setSolo", e))
    }

    fn set_mute(&self, track: usize, mute: bool) -> Result<(), CoreError> {
        self.engine
            .set_mute(track as u32, mute)
            .map_err(|e| engine_error("setMute", e))
    }

    fn set_volume(&self, track: usize, volume: i32) -> Result<(), CoreError> {
        self.engine
            .set_volume(track as u32, volume)
            .map_err(|e| engine_error("setVolume", e))
    }

    fn set_transpose(&self, track: usize, semitones: i32) -> Result<(), CoreError> {
        self.engine
            .set_transpose(track as u32, semitones)
            .map_err(|e| engine_error("setTranspose", e))
    }

    fn play(&self) -> Result<(), CoreError> {
        self.engine.play().map_err(|e| engine_error("play", e))
    }

    fn pause(&self) -> Result<(), CoreError> {
        self.engine.pause().map_err(|e| engine_error("pause", e))
    }

    fn play_pause(&self) -> Result<(), CoreError> {
        self.engine.play_pause().map_err(|e| engine_error("playPause", e))
    }

    fn stop(&self) -> Result<(), CoreError> {
        self.engine.stop().map_err(|e| engine_error("stop", e))
    }

    fn seek(&self, seconds: f64) -> Result<(), CoreError> {
        self.engine.seek(seconds).map_err(|e| engine_error("seek", e))
    }

    fn set_scroll_mode(&self, mode: ScrollMode) {
        self.engine.set_scroll_mode(mode as u8);
    }

    fn set_scroll_speed(&self, speed: f64) {
        self.engine.set_scroll_speed(speed);
    }

    fn set_scroll_offset_x(&self, offset: i32) {
        self.engine.set_scroll_offset_x(offset);
    }

    fn set_scroll_offset_y(&self, offset: i32) {
        self.engine.set_scroll_offset_y(offset);
    }

    fn set_native_smooth_scroll(&self, enabled: bool) {
        self.engine.set_native_smooth_scroll(enabled);
    }

    fn commit_settings(&self) {
        self.engine.commit_settings();
    }

    fn render(&self) {
        self.engine.render();
    }

    fn scroll_to_cursor(&self) {
        self.engine.scroll_to_cursor();
    }
}
