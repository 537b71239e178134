#![allow(dead_code)]

use once_cell::sync::Lazy;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter, prelude::*};
use tracing_appender::rolling;

use text_adventure::adventure::{AdventureRules, GameOptions, GameState, Inventory, Monster, Player};

static START: Once = Once::new();
static _GUARD: Lazy<std::sync::Mutex<Option<tracing_appender::non_blocking::WorkerGuard>>> = Lazy::new(|| std::sync::Mutex::new(None));

/// Initialize test environment: dotenv and tracing (stderr + file).
/// Idempotent: safe to call multiple times.
pub fn init() {
    START.call_once(|| {
        let _ = dotenvy::dotenv();
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("info"))
            .expect("env filter");

        // Daily rotating log file separate from game runtime logs
        let file_appender = rolling::daily("logs", "tests.log");
        let (file_nb, guard) = tracing_appender::non_blocking(file_appender);
        *_GUARD.lock().unwrap() = Some(guard); // retain guard for lifetime

        let stderr_layer = fmt::layer()
            .with_target(true)
            .with_test_writer();

        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(file_nb);

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(file_layer)
            .try_init();

        tracing::info!(target="test_init", "Test tracing initialized (stderr + rotating file)");
    });
}

pub fn monster(name: &str, health: u32, power: u32) -> Monster {
    Monster { name: name.into(), description: format!("A test {name}."), health, power, bounty: 20 }
}

/// Default new-game state facing the given monster.
pub fn new_game_against(monster: Monster) -> GameState {
    new_game_with(monster, GameOptions::default())
}

pub fn new_game_with(monster: Monster, options: GameOptions) -> GameState {
    let rules = AdventureRules::default();
    let player = Player::new_with_rules(&rules);
    GameState::with_parts(rules, options, player, Inventory::starter(), monster)
}
