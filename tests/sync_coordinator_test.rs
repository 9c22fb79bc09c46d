// Authority arbitration between the score engine and the media element:
// per-mode gating, echo suppression, and transport command routing.

use std::cell::RefCell;
use std::rc::Rc;

use scoresync_wasm::bus::EventBus;
use scoresync_wasm::engine::{MediaTransport, ScoreEngine};
use scoresync_wasm::error::CoreError;
use scoresync_wasm::models::events::{Event, PlayerEvent, ScrollMode, TransportCommand};
use scoresync_wasm::models::sync_mode::SyncMode;
use scoresync_wasm::sync::SyncCoordinator;

/// Score-engine double recording transport calls.
#[derive(Default)]
struct ScoreDouble {
    calls: RefCell<Vec<String>>,
}

impl ScoreDouble {
    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ScoreEngine for ScoreDouble {
    fn has_score(&self) -> bool {
        true
    }

    fn track_count(&self) -> usize {
        4
    }

    fn render_tracks(&self, _tracks: &[usize]) -> Result<(), CoreError> {
        Ok(())
    }

    fn set_solo(&self, _track: usize, _solo: bool) -> Result<(), CoreError> {
        Ok(())
    }

    fn set_mute(&self, _track: usize, _mute: bool) -> Result<(), CoreError> {
        Ok(())
    }

    fn set_volume(&self, _track: usize, _volume: i32) -> Result<(), CoreError> {
        Ok(())
    }

    fn set_transpose(&self, _track: usize, _semitones: i32) -> Result<(), CoreError> {
        Ok(())
    }

    fn play(&self) -> Result<(), CoreError> {
        self.calls.borrow_mut().push("play".to_string());
        Ok(())
    }

    fn pause(&self) -> Result<(), CoreError> {
        self.calls.borrow_mut().push("pause".to_string());
        Ok(())
    }

    fn play_pause(&self) -> Result<(), CoreError> {
        self.calls.borrow_mut().push("play_pause".to_string());
        Ok(())
    }

    fn stop(&self) -> Result<(), CoreError> {
        self.calls.borrow_mut().push("stop".to_string());
        Ok(())
    }

    fn seek(&self, seconds: f64) -> Result<(), CoreError> {
        self.calls.borrow_mut().push(format!("seek({})", seconds));
        Ok(())
    }

    fn set_scroll_mode(&self, _mode: ScrollMode) {}
    fn set_scroll_speed(&self, _speed: f64) {}
    fn set_scroll_offset_x(&self, _offset: i32) {}
    fn set_scroll_offset_y(&self, _offset: i32) {}
    fn set_native_smooth_scroll(&self, _enabled: bool) {}
    fn commit_settings(&self) {}
    fn render(&self) {}
    fn scroll_to_cursor(&self) {}
}

/// Media-transport double recording transport calls.
#[derive(Default)]
struct MediaDouble {
    calls: RefCell<Vec<String>>,
}

impl MediaDouble {
    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl MediaTransport for MediaDouble {
    fn current_time(&self) -> f64 {
        0.0
    }

    fn seek(&self, seconds: f64) -> Result<(), CoreError> {
        self.calls.borrow_mut().push(format!("seek({})", seconds));
        Ok(())
    }

    fn play(&self) -> Result<(), CoreError> {
        self.calls.borrow_mut().push("play".to_string());
        Ok(())
    }

    fn pause(&self) -> Result<(), CoreError> {
        self.calls.borrow_mut().push("pause".to_string());
        Ok(())
    }
}

struct Fixture {
    bus: Rc<EventBus>,
    score: Rc<ScoreDouble>,
    media: Rc<MediaDouble>,
    coordinator: SyncCoordinator,
}

fn fixture(mode: SyncMode) -> Fixture {
    let bus = Rc::new(EventBus::new());
    let score = Rc::new(ScoreDouble::default());
    let media = Rc::new(MediaDouble::default());
    let coordinator = SyncCoordinator::attach(
        Rc::clone(&bus),
        Rc::clone(&score) as Rc<dyn ScoreEngine>,
        Rc::clone(&media) as Rc<dyn MediaTransport>,
        mode,
    );
    Fixture { bus, score, media, coordinator }
}

#[test]
fn test_bidirectional_score_seek_forwards_once_and_echo_is_suppressed() {
    let f = fixture(SyncMode::Bidirectional);

    // User seeks in the score.
    f.bus.publish(Event::Score(PlayerEvent::Seeked { seconds: 12.0 }));
    assert_eq!(f.media.calls(), vec!["seek(12)"]);

    // The media element answers with its natural seeked notification.
    f.bus.publish(Event::Media(PlayerEvent::Seeked { seconds: 12.0 }));

    assert_eq!(f.media.calls(), vec!["seek(12)"], "no duplicate command");
    assert!(f.score.calls().is_empty(), "echo must not bounce back to the score");
}

#[test]
fn test_bidirectional_media_seek_forwards_once_and_echo_is_suppressed() {
    let f = fixture(SyncMode::Bidirectional);

    f.bus.publish(Event::Media(PlayerEvent::Seeked { seconds: 3.5 }));
    assert_eq!(f.score.calls(), vec!["seek(3.5)"]);

    // The score engine answers with its own position notification.
    f.bus.publish(Event::Score(PlayerEvent::PositionChanged { seconds: 3.5 }));

    assert_eq!(f.score.calls(), vec!["seek(3.5)"]);
    assert!(f.media.calls().is_empty(), "echo must not bounce back to the media element");
}

#[test]
fn test_media_master_drops_score_events() {
    let f = fixture(SyncMode::MediaMaster);

    f.bus.publish(Event::Score(PlayerEvent::Seeked { seconds: 8.0 }));
    f.bus.publish(Event::Score(PlayerEvent::Played));

    assert!(f.media.calls().is_empty(), "score must not control media in MediaMaster");
}

#[test]
fn test_media_master_routes_media_events() {
    let f = fixture(SyncMode::MediaMaster);

    f.bus.publish(Event::Media(PlayerEvent::Seeked { seconds: 2.0 }));
    f.bus.publish(Event::Media(PlayerEvent::Paused));

    assert_eq!(f.score.calls(), vec!["seek(2)", "pause"]);
}

#[test]
fn test_score_master_drops_media_events() {
    let f = fixture(SyncMode::ScoreMaster);

    f.bus.publish(Event::Media(PlayerEvent::Played));
    f.bus.publish(Event::Media(PlayerEvent::Seeked { seconds: 1.0 }));

    assert!(f.score.calls().is_empty(), "media must not control the score in ScoreMaster");
}

#[test]
fn test_score_master_routes_score_events() {
    let f = fixture(SyncMode::ScoreMaster);

    f.bus.publish(Event::Score(PlayerEvent::Played));
    f.bus.publish(Event::Score(PlayerEvent::Paused));

    assert_eq!(f.media.calls(), vec!["play", "pause"]);
}

#[test]
fn test_play_echo_suppressed_but_later_user_play_forwards() {
    let f = fixture(SyncMode::Bidirectional);

    f.bus.publish(Event::Score(PlayerEvent::Played));
    assert_eq!(f.media.calls(), vec!["play"]);

    // Echo from the media element: suppressed.
    f.bus.publish(Event::Media(PlayerEvent::Played));
    assert!(f.score.calls().is_empty());

    // A genuine later media-side play is a fresh user action.
    f.bus.publish(Event::Media(PlayerEvent::Played));
    assert_eq!(f.score.calls(), vec!["play"]);
}

#[test]
fn test_position_updates_within_tolerance_are_not_forwarded() {
    let f = fixture(SyncMode::Bidirectional);

    // First report: media position unknown, so it counts as drifted.
    f.bus.publish(Event::Score(PlayerEvent::PositionChanged { seconds: 10.0 }));
    assert_eq!(f.media.calls(), vec!["seek(10)"]);
    f.bus.publish(Event::Media(PlayerEvent::Seeked { seconds: 10.0 }));

    // In-tolerance follow-ups stay quiet.
    f.bus.publish(Event::Score(PlayerEvent::PositionChanged { seconds: 10.1 }));
    f.bus.publish(Event::Score(PlayerEvent::PositionChanged { seconds: 10.2 }));
    assert_eq!(f.media.calls(), vec!["seek(10)"]);

    // Real drift is corrected.
    f.bus.publish(Event::Score(PlayerEvent::PositionChanged { seconds: 11.0 }));
    assert_eq!(f.media.calls(), vec!["seek(10)", "seek(11)"]);
}

#[test]
fn test_mode_switch_touches_neither_side() {
    let f = fixture(SyncMode::Bidirectional);

    f.coordinator.set_mode(SyncMode::MediaMaster);
    f.coordinator.set_mode(SyncMode::ScoreMaster);

    assert!(f.score.calls().is_empty());
    assert!(f.media.calls().is_empty());
}

#[test]
fn test_mode_switch_applies_to_subsequent_events() {
    let f = fixture(SyncMode::ScoreMaster);

    f.bus.publish(Event::Media(PlayerEvent::Played));
    assert!(f.score.calls().is_empty());

    f.coordinator.set_mode(SyncMode::Bidirectional);
    f.bus.publish(Event::Media(PlayerEvent::Played));
    assert_eq!(f.score.calls(), vec!["play"]);
}

#[test]
fn test_transport_commands_reach_the_score_engine() {
    let f = fixture(SyncMode::MediaMaster);

    f.bus.publish(Event::Transport(TransportCommand::PlayPause));
    f.bus.publish(Event::Transport(TransportCommand::SeekTo { seconds: 30.0 }));
    f.bus.publish(Event::Transport(TransportCommand::Stop));

    assert_eq!(f.score.calls(), vec!["play_pause", "seek(30)", "stop"]);
}

#[test]
fn test_transport_result_propagates_per_mode() {
    let f = fixture(SyncMode::Bidirectional);

    // UI play-pause, then the engine reports it started playing.
    f.bus.publish(Event::Transport(TransportCommand::PlayPause));
    f.bus.publish(Event::Score(PlayerEvent::Played));
    assert_eq!(f.media.calls(), vec!["play"]);

    // Media acknowledges; nothing bounces.
    f.bus.publish(Event::Media(PlayerEvent::Played));
    assert_eq!(f.score.calls(), vec!["play_pause"]);
    assert_eq!(f.media.calls(), vec!["play"]);
}

#[test]
fn test_detach_stops_routing() {
    let mut f = fixture(SyncMode::Bidirectional);

    f.coordinator.detach();
    f.bus.publish(Event::Score(PlayerEvent::Seeked { seconds: 5.0 }));
    f.bus.publish(Event::Transport(TransportCommand::Stop));

    assert!(f.media.calls().is_empty());
    assert!(f.score.calls().is_empty());
}

#[test]
fn test_two_commands_two_echoes_all_suppressed() {
    let f = fixture(SyncMode::Bidirectional);

    f.bus.publish(Event::Score(PlayerEvent::Played));
    f.bus.publish(Event::Score(PlayerEvent::Seeked { seconds: 4.0 }));
    assert_eq!(f.media.calls(), vec!["play", "seek(4)"]);

    // Echoes may arrive in either order; both are consumed.
    f.bus.publish(Event::Media(PlayerEvent::Seeked { seconds: 4.0 }));
    f.bus.publish(Event::Media(PlayerEvent::Played));

    assert!(f.score.calls().is_empty());
}
