//! The round engine: the single authority on phase, score, clock and
//! correctness.
//!
//! Everything time-based (the one-second countdown, the pause before the
//! next room, the splash screen) is a timer in the engine's own
//! [`Timers`] set. Starting or ending a game cancels all of them, and each
//! handler re-checks the phase before acting, so a stale timer never
//! touches a newer game.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roomsort_config::{GameConfig, ItemId, RoomId};
use roomsort_timer::Timers;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{GameSession, Phase, PresentationSink, RoundState, Screen, SoundKind, build_round};

const TICK_PERIOD: Duration = Duration::from_secs(1);

// ---------------------------------------------------------------------------
// GameTimer / DropOutcome
// ---------------------------------------------------------------------------

/// What a scheduled timer means to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameTimer {
    /// The countdown, every second while playing.
    Tick,
    /// Move on to the next room after a completed round.
    AdvanceRound,
    /// The splash screen is over; start the game.
    SplashDone,
}

/// The verdict on one drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DropOutcome {
    /// The item belongs in the active room. It stays placed.
    Correct { round_complete: bool },
    /// Wrong room. Points were deducted and the item goes back.
    Incorrect,
    /// Released outside any room. Nothing happens.
    NoDrop,
    /// Not judged at all (no game running, or the item was already placed).
    Ignored,
}

impl DropOutcome {
    /// Whether the dragged item should disappear from the board.
    pub fn consumes_item(&self) -> bool {
        matches!(self, Self::Correct { .. })
    }

    /// Whether the drop changed the score.
    pub fn is_scored(&self) -> bool {
        matches!(self, Self::Correct { .. } | Self::Incorrect)
    }
}

/// A read-only view of the engine, for hosts and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub phase: Phase,
    pub score: i64,
    pub time_remaining_secs: u32,
    pub rooms_remaining: usize,
    pub room: Option<RoomId>,
    pub pending_correct: Vec<ItemId>,
    pub objects_in_play: Vec<ItemId>,
    pub round_serial: u64,
}

// ---------------------------------------------------------------------------
// RoundEngine
// ---------------------------------------------------------------------------

/// Drives one player's games from start screen to final score.
pub struct RoundEngine<S> {
    config: Arc<GameConfig>,
    sink: S,
    rng: StdRng,
    session: GameSession,
    round: Option<RoundState>,
    timers: Timers<GameTimer>,
    /// Bumped every time a new round is built.
    round_serial: u64,
}

impl<S: PresentationSink> RoundEngine<S> {
    /// Creates an engine on the start screen with a randomly seeded RNG.
    pub fn new(config: Arc<GameConfig>, sink: S) -> Self {
        Self::with_seed(config, sink, rand::rng().random())
    }

    /// Creates an engine whose shuffles are reproducible.
    pub fn with_seed(config: Arc<GameConfig>, sink: S, seed: u64) -> Self {
        let session = GameSession::new(config.game_rules.time_limit_seconds);
        Self {
            config,
            sink,
            rng: StdRng::seed_from_u64(seed),
            session,
            round: None,
            timers: Timers::new(),
            round_serial: 0,
        }
    }

    // -- accessors -----------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn score(&self) -> i64 {
        self.session.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.session.time_remaining_secs
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The current round, if a game is running.
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    /// Changes whenever a new round is built. Hosts compare it to know
    /// when to redraw the board.
    pub fn round_serial(&self) -> u64 {
        self.round_serial
    }

    /// Whether a splash screen is counting down to a start.
    pub fn splash_pending(&self) -> bool {
        self.timers.any(|t| *t == GameTimer::SplashDone)
    }

    /// Whether the pause before the next room is running.
    pub fn advance_pending(&self) -> bool {
        self.timers.any(|t| *t == GameTimer::AdvanceRound)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let round = self.round.as_ref();
        GameSnapshot {
            phase: self.session.phase,
            score: self.session.score,
            time_remaining_secs: self.session.time_remaining_secs,
            rooms_remaining: self.session.remaining_rooms.len(),
            room: round.map(|r| r.room.id.clone()),
            pending_correct: round
                .map(|r| r.pending_correct.iter().cloned().collect())
                .unwrap_or_default(),
            objects_in_play: round
                .map(|r| r.objects_in_play.iter().map(|i| i.id.clone()).collect())
                .unwrap_or_default(),
            round_serial: self.round_serial,
        }
    }

    // -- lifecycle -----------------------------------------------------------

    /// The start button: plays the button sound, shows the splash screen
    /// and starts the game once the splash is over.
    pub fn request_start(&mut self) -> bool {
        if !self.session.phase.can_start() || self.splash_pending() {
            debug!(phase = %self.session.phase, "start request ignored");
            return false;
        }
        self.sink.play_sound(SoundKind::ButtonStart);
        self.sink.show_screen(Screen::Splash);
        self.timers
            .schedule_once(GameTimer::SplashDone, self.config.feedback.splash_duration());
        true
    }

    /// Starts (or restarts) a game right away.
    ///
    /// Only valid on the start screen or after a game ended. Returns
    /// `false` and does nothing otherwise.
    pub fn start_game(&mut self) -> bool {
        if !self.session.phase.can_start() {
            debug!(phase = %self.session.phase, "start_game ignored");
            return false;
        }

        self.timers.cancel_all();
        self.timers.resume();
        self.round = None;

        let time_limit = self.config.game_rules.time_limit_seconds;
        self.session.start(&self.config.rooms, time_limit, &mut self.rng);
        info!(rooms = self.session.remaining_rooms.len(), time_limit, "game started");

        self.sink.update_score(self.session.score);
        self.sink.update_time(self.session.time_remaining_secs);
        self.sink.show_screen(Screen::Game);

        self.timers.schedule_every(GameTimer::Tick, TICK_PERIOD);
        self.prepare_round();
        true
    }

    /// Moves to the next room, or ends the game if every room was played.
    pub fn prepare_round(&mut self) {
        if self.session.phase != Phase::Playing {
            debug!(phase = %self.session.phase, "prepare_round ignored");
            return;
        }
        self.timers.cancel_where(|t| *t == GameTimer::AdvanceRound);

        let Some(room) = self.session.next_room() else {
            info!("all rooms played");
            self.end_game();
            return;
        };

        let round = build_round(&self.config, room, &mut self.rng);
        self.round_serial += 1;
        info!(
            room = %round.room.id,
            objects = round.objects_in_play.len(),
            correct = round.pending_correct.len(),
            rooms_left = self.session.remaining_rooms.len(),
            serial = self.round_serial,
            "round prepared"
        );

        self.sink.render_room(&round.room);
        self.sink.render_objects(&round.objects_in_play);
        if round.is_complete() {
            info!(room = %round.room.id, "round has nothing to place");
            self.timers.schedule_once(
                GameTimer::AdvanceRound,
                self.config.feedback.round_advance_delay(),
            );
        }
        self.round = Some(round);
    }

    /// Judges a drop of `item` onto `dropped_room` (or onto nothing).
    ///
    /// Correctness is checked against the active room. `dropped_room` only
    /// says whether the item landed on a room at all.
    pub fn resolve_drop(&mut self, item: &ItemId, dropped_room: Option<&RoomId>) -> DropOutcome {
        if self.session.phase != Phase::Playing {
            debug!(%item, phase = %self.session.phase, "drop ignored");
            return DropOutcome::Ignored;
        }
        let Some(round) = self.round.as_mut() else {
            return DropOutcome::Ignored;
        };
        let Some(dropped_room) = dropped_room else {
            debug!(%item, "dropped outside any room");
            return DropOutcome::NoDrop;
        };
        if round.is_placed(item) {
            debug!(%item, "item already placed");
            return DropOutcome::Ignored;
        }

        let belongs = match self.config.item(item) {
            Some(known) => {
                if !round.is_in_play(item) {
                    warn!(item = %known.id, room = %round.room.id, "dropped item is not on the board");
                }
                known.belongs_in(&round.room.id)
            }
            None => {
                warn!(%item, "unknown item dropped, counting as incorrect");
                false
            }
        };

        let rules = &self.config.game_rules;
        let message = self.config.feedback.message_duration();

        let outcome = if belongs {
            round.place(item);
            let round_complete = round.is_complete();
            self.session.score += rules.points_per_correct;
            self.sink.show_feedback(true, message);
            self.sink.play_sound(SoundKind::Correct);
            DropOutcome::Correct { round_complete }
        } else {
            self.session.score += rules.points_per_incorrect;
            self.sink.show_feedback(false, message);
            self.sink.play_sound(SoundKind::Incorrect);
            DropOutcome::Incorrect
        };
        self.sink.update_score(self.session.score);

        debug!(
            %item,
            %dropped_room,
            room = %round.room.id,
            ?outcome,
            score = self.session.score,
            "drop resolved"
        );

        if let DropOutcome::Correct {
            round_complete: true,
        } = outcome
        {
            info!(room = %round.room.id, score = self.session.score, "round complete");
            if !self.advance_pending() {
                self.timers.schedule_once(
                    GameTimer::AdvanceRound,
                    self.config.feedback.round_advance_delay(),
                );
            }
        }
        outcome
    }

    /// One second of the countdown.
    pub fn tick(&mut self) {
        if self.session.phase != Phase::Playing {
            return;
        }
        let expired = self.session.tick();
        self.sink.update_time(self.session.time_remaining_secs);
        if expired {
            info!("time is up");
            self.end_game();
        }
    }

    /// Ends the running game. Returns `false` if no game was running.
    pub fn end_game(&mut self) -> bool {
        if self.session.phase != Phase::Playing {
            debug!(phase = %self.session.phase, "end_game ignored");
            return false;
        }
        self.session.end();
        self.timers.cancel_all();
        self.round = None;
        info!(score = self.session.score, "game over");

        self.sink.update_final_score(self.session.score);
        self.sink.show_screen(Screen::End);
        true
    }

    /// Freezes a running game: the clock and the round advance stop and
    /// drops are ignored.
    pub fn pause(&mut self) -> bool {
        if !self.session.phase.can_transition_to(Phase::Paused) {
            debug!(phase = %self.session.phase, "pause ignored");
            return false;
        }
        self.session.phase = Phase::Paused;
        self.timers.pause();
        info!(time_remaining = self.session.time_remaining_secs, "game paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.session.phase != Phase::Paused {
            debug!(phase = %self.session.phase, "resume ignored");
            return false;
        }
        self.session.phase = Phase::Playing;
        self.timers.resume();
        info!(time_remaining = self.session.time_remaining_secs, "game resumed");
        true
    }

    // -- time ----------------------------------------------------------------

    /// Time until the next timer fires. `None` when nothing is pending or
    /// the game is paused.
    pub fn next_timer_due(&self) -> Option<Duration> {
        self.timers.until_next()
    }

    /// Lets `elapsed` pass, firing due timers one at a time in deadline
    /// order.
    pub fn advance(&mut self, elapsed: Duration) {
        let target = self.timers.now() + elapsed;
        while let Some(fired) = self.timers.pop_due(target) {
            self.on_timer(fired.kind);
        }
        self.timers.advance_to(target);
    }

    fn on_timer(&mut self, timer: GameTimer) {
        match timer {
            GameTimer::Tick => self.tick(),
            GameTimer::AdvanceRound => self.prepare_round(),
            GameTimer::SplashDone => {
                if self.session.phase.can_start() {
                    self.sink.start_background_music();
                    self.start_game();
                }
            }
        }
    }
}
