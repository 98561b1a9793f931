//! The presentation sink: everything the round engine asks the outside
//! world to show or play.

use std::time::Duration;

use roomsort_config::{Item, Room};
use serde::{Deserialize, Serialize};

/// Sound effects the engine triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundKind {
    Correct,
    Incorrect,
    ButtonStart,
}

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    Start,
    Splash,
    Game,
    End,
}

/// Receives presentation commands from the round engine.
///
/// The board, score and clock methods are required. Sound, screen and
/// music are optional: a headless host can ignore them.
pub trait PresentationSink {
    fn render_room(&mut self, room: &Room);

    /// The round's items, in display order.
    fn render_objects(&mut self, items: &[Item]);

    fn update_score(&mut self, score: i64);

    fn update_time(&mut self, seconds: u32);

    fn update_final_score(&mut self, score: i64);

    /// Shows a correct/incorrect message for `duration`.
    fn show_feedback(&mut self, correct: bool, duration: Duration);

    fn play_sound(&mut self, _sound: SoundKind) {}

    fn show_screen(&mut self, _screen: Screen) {}

    fn start_background_music(&mut self) {}
}

/// A presentation command as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SinkCommand {
    RenderRoom { room: Room },
    RenderObjects { items: Vec<Item> },
    UpdateScore { score: i64 },
    UpdateTime { seconds: u32 },
    UpdateFinalScore { score: i64 },
    ShowFeedback { correct: bool, duration_ms: u64 },
    PlaySound { sound: SoundKind },
    ShowScreen { screen: Screen },
    StartBackgroundMusic,
}

impl SinkCommand {
    /// Replays this command into a sink.
    pub fn apply(&self, sink: &mut impl PresentationSink) {
        match self {
            Self::RenderRoom { room } => sink.render_room(room),
            Self::RenderObjects { items } => sink.render_objects(items),
            Self::UpdateScore { score } => sink.update_score(*score),
            Self::UpdateTime { seconds } => sink.update_time(*seconds),
            Self::UpdateFinalScore { score } => sink.update_final_score(*score),
            Self::ShowFeedback {
                correct,
                duration_ms,
            } => sink.show_feedback(*correct, Duration::from_millis(*duration_ms)),
            Self::PlaySound { sound } => sink.play_sound(*sound),
            Self::ShowScreen { screen } => sink.show_screen(*screen),
            Self::StartBackgroundMusic => sink.start_background_music(),
        }
    }
}

/// Turns every call into a [`SinkCommand`] and hands it to `emit`.
///
/// Implement just this for sinks that only want the data form.
pub trait CommandSink {
    fn emit(&mut self, command: SinkCommand);
}

impl<T: CommandSink> PresentationSink for T {
    fn render_room(&mut self, room: &Room) {
        self.emit(SinkCommand::RenderRoom { room: room.clone() });
    }

    fn render_objects(&mut self, items: &[Item]) {
        self.emit(SinkCommand::RenderObjects {
            items: items.to_vec(),
        });
    }

    fn update_score(&mut self, score: i64) {
        self.emit(SinkCommand::UpdateScore { score });
    }

    fn update_time(&mut self, seconds: u32) {
        self.emit(SinkCommand::UpdateTime { seconds });
    }

    fn update_final_score(&mut self, score: i64) {
        self.emit(SinkCommand::UpdateFinalScore { score });
    }

    fn show_feedback(&mut self, correct: bool, duration: Duration) {
        self.emit(SinkCommand::ShowFeedback {
            correct,
            duration_ms: duration.as_millis() as u64,
        });
    }

    fn play_sound(&mut self, sound: SoundKind) {
        self.emit(SinkCommand::PlaySound { sound });
    }

    fn show_screen(&mut self, screen: Screen) {
        self.emit(SinkCommand::ShowScreen { screen });
    }

    fn start_background_music(&mut self) {
        self.emit(SinkCommand::StartBackgroundMusic);
    }
}

/// Keeps every command in memory. Handy for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub commands: Vec<SinkCommand>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&mut self) -> Vec<SinkCommand> {
        std::mem::take(&mut self.commands)
    }

    /// The most recent score update, if any.
    pub fn last_score(&self) -> Option<i64> {
        self.commands.iter().rev().find_map(|c| match c {
            SinkCommand::UpdateScore { score } => Some(*score),
            _ => None,
        })
    }

    /// The most recent clock update, if any.
    pub fn last_time(&self) -> Option<u32> {
        self.commands.iter().rev().find_map(|c| match c {
            SinkCommand::UpdateTime { seconds } => Some(*seconds),
            _ => None,
        })
    }

    /// How many recorded commands match `pred`.
    pub fn count(&self, pred: impl Fn(&SinkCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl CommandSink for RecordingSink {
    fn emit(&mut self, command: SinkCommand) {
        self.commands.push(command);
    }
}
