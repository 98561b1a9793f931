//! Game actor: a Tokio task that owns a [`GameController`].
//!
//! The controller is synchronous and single-threaded. The actor gives it
//! a mailbox and a clock: commands arrive over an mpsc channel, and
//! between commands the task sleeps until the next game timer is due.

use roomsort_config::{ItemId, RoomId};
use roomsort_drag::RawInput;
use roomsort_round::{DropOutcome, PresentationSink};
use roomsort_timer::{Pacer, sleep_until};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::{GameController, PointerReport, RoomsortError, Snapshot};

const MAILBOX_CAPACITY: usize = 64;

/// Commands sent to the game actor.
///
/// Variants with a `reply` are request/response; the caller waits on the
/// oneshot for the answer.
pub(crate) enum GameCommand {
    Start {
        reply: oneshot::Sender<Result<bool, RoomsortError>>,
    },
    RequestStart {
        reply: oneshot::Sender<Result<bool, RoomsortError>>,
    },
    Pointer {
        input: RawInput,
        reply: oneshot::Sender<Result<PointerReport, RoomsortError>>,
    },
    Drop {
        item: ItemId,
        room: Option<RoomId>,
        reply: oneshot::Sender<Result<DropOutcome, RoomsortError>>,
    },
    Pause {
        reply: oneshot::Sender<bool>,
    },
    Resume {
        reply: oneshot::Sender<bool>,
    },
    End {
        reply: oneshot::Sender<Result<bool, RoomsortError>>,
    },
    Snapshot {
        reply: oneshot::Sender<Snapshot>,
    },
    Shutdown,
}

/// Handle to a running game actor. Cheap to clone.
#[derive(Debug, Clone)]
pub struct GameHandle {
    sender: mpsc::Sender<GameCommand>,
}

impl GameHandle {
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> GameCommand,
    ) -> Result<T, RoomsortError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(make(reply_tx))
            .await
            .map_err(|_| RoomsortError::Unavailable)?;
        reply_rx.await.map_err(|_| RoomsortError::Unavailable)
    }

    /// Starts a game immediately (the restart button).
    pub async fn start(&self) -> Result<bool, RoomsortError> {
        self.request(|reply| GameCommand::Start { reply }).await?
    }

    /// Presses the start button: splash screen first, then the game.
    pub async fn request_start(&self) -> Result<bool, RoomsortError> {
        self.request(|reply| GameCommand::RequestStart { reply }).await?
    }

    /// Feeds raw mouse or touch input.
    pub async fn pointer(&self, input: RawInput) -> Result<PointerReport, RoomsortError> {
        self.request(|reply| GameCommand::Pointer { input, reply })
            .await?
    }

    /// Drops `item` on `room` (or on nothing) without a pointer gesture.
    pub async fn drop_item(
        &self,
        item: ItemId,
        room: Option<RoomId>,
    ) -> Result<DropOutcome, RoomsortError> {
        self.request(|reply| GameCommand::Drop { item, room, reply })
            .await?
    }

    pub async fn pause(&self) -> Result<bool, RoomsortError> {
        self.request(|reply| GameCommand::Pause { reply }).await
    }

    pub async fn resume(&self) -> Result<bool, RoomsortError> {
        self.request(|reply| GameCommand::Resume { reply }).await
    }

    pub async fn end(&self) -> Result<bool, RoomsortError> {
        self.request(|reply| GameCommand::End { reply }).await?
    }

    pub async fn snapshot(&self) -> Result<Snapshot, RoomsortError> {
        self.request(|reply| GameCommand::Snapshot { reply }).await
    }

    /// Stops the actor. Later calls return [`RoomsortError::Unavailable`].
    pub async fn shutdown(&self) -> Result<(), RoomsortError> {
        self.sender
            .send(GameCommand::Shutdown)
            .await
            .map_err(|_| RoomsortError::Unavailable)
    }

    /// Returns `true` once the actor has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Spawns `controller` on its own task and returns a handle to it.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_game<S>(controller: GameController<S>) -> GameHandle
where
    S: PresentationSink + Send + 'static,
{
    let (sender, receiver) = mpsc::channel(MAILBOX_CAPACITY);
    let actor = GameActor {
        controller,
        receiver,
    };
    tokio::spawn(actor.run());
    GameHandle { sender }
}

struct GameActor<S> {
    controller: GameController<S>,
    receiver: mpsc::Receiver<GameCommand>,
}

impl<S: PresentationSink> GameActor<S> {
    async fn run(mut self) {
        info!("game actor started");
        let mut pacer = Pacer::new();

        loop {
            let deadline = pacer.deadline(self.controller.next_timer_due());
            tokio::select! {
                cmd = self.receiver.recv() => {
                    // Catch the game clock up before acting, so the command
                    // sees the same state the player sees.
                    self.catch_up(&mut pacer);
                    match cmd {
                        Some(GameCommand::Shutdown) | None => break,
                        Some(cmd) => self.handle(cmd),
                    }
                }
                () = sleep_until(deadline) => {
                    self.catch_up(&mut pacer);
                }
            }
        }

        info!("game actor stopped");
    }

    fn catch_up(&mut self, pacer: &mut Pacer) {
        if let Err(e) = self.controller.advance(pacer.lap()) {
            warn!(error = %e, "failed to advance game");
        }
    }

    fn handle(&mut self, cmd: GameCommand) {
        match cmd {
            GameCommand::Start { reply } => {
                let _ = reply.send(self.controller.start_game());
            }
            GameCommand::RequestStart { reply } => {
                let _ = reply.send(self.controller.request_start());
            }
            GameCommand::Pointer { input, reply } => {
                let _ = reply.send(self.controller.pointer(&input));
            }
            GameCommand::Drop { item, room, reply } => {
                let _ = reply.send(self.controller.drop_item(&item, room.as_ref()));
            }
            GameCommand::Pause { reply } => {
                let _ = reply.send(self.controller.pause());
            }
            GameCommand::Resume { reply } => {
                let _ = reply.send(self.controller.resume());
            }
            GameCommand::End { reply } => {
                let _ = reply.send(self.controller.end_game());
            }
            GameCommand::Snapshot { reply } => {
                let _ = reply.send(self.controller.snapshot());
            }
            GameCommand::Shutdown => {
                debug!("shutdown handled by run loop");
            }
        }
    }
}
