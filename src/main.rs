use std::env;
use std::time::Duration;

use anyhow::Context;
use packman::config::GameConfig;
use packman::events::GameplayEvent;
use packman::formatter::TickFormatter;
use packman::game::Game;
use packman::map::direction::Direction;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

/// A new random direction is requested this often.
const TURN_INTERVAL: u64 = 8;

/// Stop after this many ticks even if the round has not ended.
const MAX_TICKS: u64 = 20_000;

/// Status is logged this often.
const REPORT_INTERVAL: u64 = 100;

fn setup_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .event_format(TickFormatter)
        .with_env_filter(filter)
        .finish()
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber).context("Could not set global default subscriber")
}

fn load_config() -> anyhow::Result<GameConfig> {
    match env::args().nth(1) {
        Some(path) => GameConfig::from_path(&path).with_context(|| format!("Could not load configuration from {path}")),
        None => Ok(GameConfig::default()),
    }
}

/// Plays a round on the built-in board, steering the player at random, and logs what happens.
pub fn main() -> anyhow::Result<()> {
    setup_logging()?;

    let config = load_config()?;
    let tick_rate = config.tick_rate;
    let mut game = Game::from_config(config)?;
    let loop_time = Duration::from_secs(1) / tick_rate;
    let mut rng = SmallRng::from_os_rng();

    info!(loop_ms = loop_time.as_secs_f32() * 1000.0, "Starting headless game loop");
    game.start();

    for tick in 1..=MAX_TICKS {
        let start = std::time::Instant::now();

        if tick % TURN_INTERVAL == 0 {
            let direction = Direction::DIRECTIONS[rng.random_range(0..Direction::DIRECTIONS.len())];
            game.request_direction(direction);
        }

        for event in game.tick()? {
            match event {
                GameplayEvent::DotEaten(_) => {}
                GameplayEvent::PhaseChanged(phase) => debug!(%phase, "Phase changed"),
                other => info!(event = ?other, "Gameplay event"),
            }
        }

        if tick % REPORT_INTERVAL == 0 {
            let snapshot = game.snapshot()?;
            info!(
                stage = ?snapshot.stage,
                score = snapshot.score,
                lives = snapshot.lives,
                phase = %snapshot.phase,
                player = %snapshot.player.position,
                "Status"
            );
        }

        if game.stage().is_finished() {
            break;
        }

        let elapsed = start.elapsed();
        if elapsed < loop_time {
            spin_sleep::sleep(loop_time - elapsed);
        } else {
            warn!(behind = ?(elapsed - loop_time), "Game loop behind schedule");
        }
    }

    let snapshot = game.snapshot()?;
    info!(stage = ?snapshot.stage, score = snapshot.score, top_score = snapshot.top_score, "Game finished");
    Ok(())
}
