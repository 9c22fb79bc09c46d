//! Sync-mode coordinator
//!
//! The authority-arbitration core: decides, per mode, whether position,
//! seek, play, and pause signals flow media→score, score→media, or both,
//! and suppresses feedback loops.
//!
//! Feedback suppression is token-based, not timer-based. Applying a
//! translated command to one side naturally raises that side's own
//! notification in return; each outbound command therefore pushes one echo
//! token onto the receiving side's queue, and the next notification from
//! that side matching the token's kind is consumed silently. Exactly one
//! self-generated notification is suppressed per outbound command, so slow
//! callbacks cannot re-trigger and a legitimate follow-up user action is
//! never swallowed.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::bus::{EventBus, Subscription};
use crate::engine::{MediaTransport, ScoreEngine};
use crate::models::events::{Event, PlayerEvent, Topic, TransportCommand};
use crate::models::sync_mode::{SyncMode, SyncModeConfig};

/// Positions closer than this are considered in sync; continuous
/// position reports within the tolerance are not forwarded.
const DRIFT_TOLERANCE_SECS: f64 = 0.25;

/// Kind of self-generated notification an outbound command will raise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EchoKind {
    Seek,
    Play,
    Pause,
}

impl EchoKind {
    /// The echo kind a notification would satisfy. Both a discrete seek
    /// callback and a plain position report can answer a commanded seek.
    fn of(event: &PlayerEvent) -> EchoKind {
        match event {
            PlayerEvent::PositionChanged { .. } | PlayerEvent::Seeked { .. } => EchoKind::Seek,
            PlayerEvent::Played => EchoKind::Play,
            PlayerEvent::Paused => EchoKind::Pause,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Score,
    Media,
}

struct CoordinatorState {
    config: SyncModeConfig,
    /// Echo tokens expected from the score side.
    score_echoes: VecDeque<EchoKind>,
    /// Echo tokens expected from the media side.
    media_echoes: VecDeque<EchoKind>,
    last_score_position: Option<f64>,
    last_media_position: Option<f64>,
}

impl CoordinatorState {
    fn new(mode: SyncMode) -> CoordinatorState {
        CoordinatorState {
            config: SyncModeConfig::from_mode(mode),
            score_echoes: VecDeque::new(),
            media_echoes: VecDeque::new(),
            last_score_position: None,
            last_media_position: None,
        }
    }

    fn echoes_mut(&mut self, side: Side) -> &mut VecDeque<EchoKind> {
        match side {
            Side::Score => &mut self.score_echoes,
            Side::Media => &mut self.media_echoes,
        }
    }

    /// Consume the first outstanding token matching `kind`, if any.
    fn consume_echo(&mut self, side: Side, kind: EchoKind) -> bool {
        let queue = self.echoes_mut(side);
        if let Some(pos) = queue.iter().position(|&token| token == kind) {
            queue.remove(pos);
            true
        } else {
            false
        }
    }

    fn note_position(&mut self, side: Side, seconds: f64) {
        match side {
            Side::Score => self.last_score_position = Some(seconds),
            Side::Media => self.last_media_position = Some(seconds),
        }
    }

    /// Whether the peer of `from` has drifted beyond tolerance from
    /// `seconds`. Unknown peer position counts as drifted.
    fn peer_drifted(&self, from: Side, seconds: f64) -> bool {
        let peer_position = match from {
            Side::Score => self.last_media_position,
            Side::Media => self.last_score_position,
        };
        match peer_position {
            Some(known) => (known - seconds).abs() > DRIFT_TOLERANCE_SECS,
            None => true,
        }
    }
}

/// Arbitrates control authority between the score engine and the media
/// element according to the active [`SyncMode`].
pub struct SyncCoordinator {
    bus: Rc<EventBus>,
    state: Rc<RefCell<CoordinatorState>>,
    subscriptions: Vec<Subscription>,
}

impl SyncCoordinator {
    /// Attach to the bus, routing score/media notifications and UI
    /// transport commands. Starts in the given mode.
    pub fn attach(
        bus: Rc<EventBus>,
        score: Rc<dyn ScoreEngine>,
        media: Rc<dyn MediaTransport>,
        mode: SyncMode,
    ) -> SyncCoordinator {
        let state = Rc::new(RefCell::new(CoordinatorState::new(mode)));
        let mut subscriptions = Vec::new();

        {
            let state = Rc::clone(&state);
            let media = Rc::clone(&media);
            subscriptions.push(bus.subscribe(Topic::ScoreEvent, move |event| {
                if let Event::Score(player_event) = event {
                    on_score_event(&state, media.as_ref(), *player_event);
                }
                Ok(())
            }));
        }

        {
            let state = Rc::clone(&state);
            let score = Rc::clone(&score);
            subscriptions.push(bus.subscribe(Topic::MediaEvent, move |event| {
                if let Event::Media(player_event) = event {
                    on_media_event(&state, score.as_ref(), *player_event);
                }
                Ok(())
            }));
        }

        {
            let score = Rc::clone(&score);
            subscriptions.push(bus.subscribe(Topic::TransportCommand, move |event| {
                if let Event::Transport(command) = event {
                    on_transport_command(score.as_ref(), *command);
                }
                Ok(())
            }));
        }

        SyncCoordinator { bus, state, subscriptions }
    }

    /// Switch the authority policy. Takes effect for subsequent events
    /// only; neither side is paused, seeked, or otherwise touched.
    pub fn set_mode(&self, mode: SyncMode) {
        let mut state = self.state.borrow_mut();
        state.config = SyncModeConfig::from_mode(mode);
        log::debug!("sync mode set to {:?}", mode);
    }

    pub fn mode(&self) -> SyncMode {
        self.state.borrow().config.mode
    }

    /// Stop routing. Idempotent.
    pub fn detach(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            self.bus.unsubscribe(&subscription);
        }
    }
}

impl Drop for SyncCoordinator {
    fn drop(&mut self) {
        self.detach();
    }
}

fn on_score_event(state: &Rc<RefCell<CoordinatorState>>, media: &dyn MediaTransport, event: PlayerEvent) {
    let forward = {
        let mut state = state.borrow_mut();
        if let PlayerEvent::PositionChanged { seconds } | PlayerEvent::Seeked { seconds } = event {
            state.note_position(Side::Score, seconds);
        }
        if state.consume_echo(Side::Score, EchoKind::of(&event)) {
            // Self-generated notification answering an earlier command.
            return;
        }
        if !state.config.allow_score_control_media {
            return;
        }
        match event {
            PlayerEvent::PositionChanged { seconds } if !state.peer_drifted(Side::Score, seconds) => None,
            PlayerEvent::PositionChanged { seconds } | PlayerEvent::Seeked { seconds } => {
                state.echoes_mut(Side::Media).push_back(EchoKind::Seek);
                state.note_position(Side::Media, seconds);
                Some(PeerCommand::Seek(seconds))
            }
            PlayerEvent::Played => {
                state.echoes_mut(Side::Media).push_back(EchoKind::Play);
                Some(PeerCommand::Play)
            }
            PlayerEvent::Paused => {
                state.echoes_mut(Side::Media).push_back(EchoKind::Pause);
                Some(PeerCommand::Pause)
            }
        }
    };

    let result = match forward {
        None => return,
        Some(PeerCommand::Seek(seconds)) => media.seek(seconds),
        Some(PeerCommand::Play) => media.play(),
        Some(PeerCommand::Pause) => media.pause(),
    };
    if let Err(err) = result {
        log::warn!("media command failed: {}", err);
    }
}

fn on_media_event(state: &Rc<RefCell<CoordinatorState>>, score: &dyn ScoreEngine, event: PlayerEvent) {
    let forward = {
        let mut state = state.borrow_mut();
        if let PlayerEvent::PositionChanged { seconds } | PlayerEvent::Seeked { seconds } = event {
            state.note_position(Side::Media, seconds);
        }
        if state.consume_echo(Side::Media, EchoKind::of(&event)) {
            return;
        }
        if !state.config.allow_media_control_score {
            return;
        }
        match event {
            PlayerEvent::PositionChanged { seconds } if !state.peer_drifted(Side::Media, seconds) => None,
            PlayerEvent::PositionChanged { seconds } | PlayerEvent::Seeked { seconds } => {
                state.echoes_mut(Side::Score).push_back(EchoKind::Seek);
                state.note_position(Side::Score, seconds);
                Some(PeerCommand::Seek(seconds))
            }
            PlayerEvent::Played => {
                state.echoes_mut(Side::Score).push_back(EchoKind::Play);
                Some(PeerCommand::Play)
            }
            PlayerEvent::Paused => {
                state.echoes_mut(Side::Score).push_back(EchoKind::Pause);
                Some(PeerCommand::Pause)
            }
        }
    };

    let result = match forward {
        None => return,
        Some(PeerCommand::Seek(seconds)) => score.seek(seconds),
        Some(PeerCommand::Play) => score.play(),
        Some(PeerCommand::Pause) => score.pause(),
    };
    if let Err(err) = result {
        log::warn!("score command failed: {}", err);
    }
}

/// UI transport commands act on the score engine regardless of mode: the
/// mode arbitrates cross-side authority, not direct user intent. The
/// engine's resulting notification then propagates per the mode.
fn on_transport_command(score: &dyn ScoreEngine, command: TransportCommand) {
    let result = match command {
        TransportCommand::PlayPause => score.play_pause(),
        TransportCommand::Stop => score.stop(),
        TransportCommand::SeekTo { seconds } => score.seek(seconds),
    };
    if let Err(err) = result {
        log::warn!("transport command failed: {}", err);
    }
}

/// Translated command for the peer side.
enum PeerCommand {
    Seek(f64),
    Play,
    Pause,
}
