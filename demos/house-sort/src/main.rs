use std::sync::Arc;
use std::time::Duration;

use roomsort::prelude::*;
use tokio::sync::mpsc::UnboundedReceiver;

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

/// `ROOMSORT_CONFIG` points at a JSON config; without it the built-in house is used.
fn load_config() -> Result<GameConfig, RoomsortError> {
    match std::env::var("ROOMSORT_CONFIG") {
        Ok(path) => Ok(GameConfig::load(path)?),
        Err(_) => Ok(GameConfig::house()),
    }
}

/// `ROOMSORT_SEED` makes the room order and object shuffles reproducible.
fn seed() -> Option<u64> {
    std::env::var("ROOMSORT_SEED").ok()?.parse().ok()
}

fn spawn(config: GameConfig, seed: Option<u64>) -> (GameHandle, UnboundedReceiver<SinkCommand>) {
    let config = Arc::new(config);
    let (sink, rx) = ChannelSink::new();
    let engine = match seed {
        Some(seed) => RoundEngine::with_seed(config, sink, seed),
        None => RoundEngine::new(config, sink),
    };
    let game = spawn_game(GameController::new(engine, RowLayout::default()));
    (game, rx)
}

// ---------------------------------------------------------------------------
// Scripted player
// ---------------------------------------------------------------------------

/// Plays a whole game: one wrong guess per room, then every right answer.
async fn play(game: &GameHandle, splash: Duration, advance: Duration) -> Result<i64, RoomsortError> {
    game.request_start().await?;
    tokio::time::sleep(splash).await;

    loop {
        let snap = game.snapshot().await?.game;
        if snap.phase != Phase::Playing {
            return Ok(snap.score);
        }
        let Some(room) = snap.room else {
            return Ok(snap.score);
        };

        let wrong = snap
            .objects_in_play
            .iter()
            .find(|id| !snap.pending_correct.contains(id));
        if let Some(wrong) = wrong {
            let outcome = game.drop_item(wrong.clone(), Some(room.clone())).await?;
            tracing::info!(item = %wrong, ?outcome, "scripted wrong guess");
        }
        for item in snap.pending_correct {
            game.drop_item(item, Some(room.clone())).await?;
        }

        tokio::time::sleep(advance).await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    roomsort::telemetry::init();

    let config = load_config()?;
    let splash = config.feedback.splash_duration() + Duration::from_millis(10);
    let advance = config.feedback.round_advance_delay() + Duration::from_millis(10);
    let (game, mut commands) = spawn(config, seed());

    let printer = tokio::spawn(async move {
        while let Some(cmd) = commands.recv().await {
            match serde_json::to_string(&cmd) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!(error = %e, "failed to encode command"),
            }
        }
    });

    let score = play(&game, splash, advance).await?;
    tracing::info!(score, "game finished");

    game.shutdown().await?;
    drop(game);
    printer.await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(rx: &mut UnboundedReceiver<SinkCommand>) -> Vec<SinkCommand> {
        let mut out = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            out.push(cmd);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn test_scripted_game_visits_every_room() {
        let (game, mut rx) = spawn(GameConfig::house(), Some(7));
        let score = play(&game, Duration::from_millis(3_010), Duration::from_millis(1_510))
            .await
            .unwrap();

        // Five rooms: five correct drops (+10) and one wrong guess (-5) each.
        assert_eq!(score, 5 * (5 * 10 - 5));

        let cmds = drain(&mut rx);
        let rooms = cmds
            .iter()
            .filter(|c| matches!(c, SinkCommand::RenderRoom { .. }))
            .count();
        assert_eq!(rooms, 5);
        assert_eq!(
            cmds.last(),
            Some(&SinkCommand::ShowScreen { screen: Screen::End })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_commands_encode_as_json_lines() {
        let (game, mut rx) = spawn(GameConfig::house(), Some(1));
        game.start().await.unwrap();
        game.snapshot().await.unwrap();

        for cmd in drain(&mut rx) {
            let line = serde_json::to_string(&cmd).unwrap();
            assert!(!line.contains('\n'));
            let back: SinkCommand = serde_json::from_str(&line).unwrap();
            assert_eq!(back, cmd);
        }
    }
}
