
// 同階層のファイルをモジュールとしてインポート
pub mod adventure; // Encounter engine (rules/models/combat/game)
pub mod config;
pub mod console; // Turn menu screens
pub mod sqlite; // SQLite save store
pub mod storage; // Save record + store trait + JSON files

pub use adventure::{AdventureRules, GameOptions, GameState};
pub use config::{Cli, Config, StoreKind};
pub use sqlite::Db;
pub use storage::{JsonFileStore, SaveRecord, SaveStore};

use color_eyre::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{BufRead, Write};
use tracing::{info, warn};

use console::{LineConsole, Session, Terminal};

// Ensure .env is loaded for tests before anything else runs in the test process.
#[cfg(test)]
#[ctor::ctor]
fn load_dotenv_for_tests() {
    let _ = dotenvy::dotenv();
}

/// 設定に応じたセーブ先を開く
pub fn open_store(config: &Config) -> Result<Box<dyn SaveStore>> {
    Ok(match config.store {
        StoreKind::Json => Box::new(JsonFileStore::new(&config.save_dir)),
        StoreKind::Sqlite => Box::new(Db::open_or_create(&config.db_path)?),
    })
}

/// 新規ゲーム、または `load_id` のセーブから再開したゲームを作る。
/// セーブが見つからない/読めない場合は報告して新規ゲームにフォールバック
pub fn start_game<R: Rng + ?Sized>(
    config: &Config,
    rules: AdventureRules,
    store: &dyn SaveStore,
    rng: &mut R,
    term: &mut dyn Terminal,
) -> Result<GameState> {
    let Some(id) = config.load_id.as_deref() else {
        return Ok(GameState::new(rules, config.options, rng)?);
    };
    match store.load(id) {
        Ok(Some(record)) => {
            info!(target: "app", slot = id, "save loaded");
            term.say(&format!("Loaded save '{id}'."))?;
            Ok(GameState::resume(rules, config.options, record.into(), rng)?)
        }
        Ok(None) => {
            info!(target: "app", slot = id, "save not found");
            term.say(&format!("No save named '{id}' was found. Starting a new game."))?;
            Ok(GameState::new(rules, config.options, rng)?)
        }
        Err(e) => {
            warn!(target: "app", slot = id, error = %e, "save unreadable");
            term.say(&format!("Could not load save '{id}': {e}. Starting a new game."))?;
            Ok(GameState::new(rules, config.options, rng)?)
        }
    }
}

/// アプリケーションのメインループを実行
pub fn run<R: BufRead, W: Write>(config: &Config, input: R, output: W) -> Result<()> {
    let rules = config.load_rules()?;
    let store = open_store(config)?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut term = LineConsole::new(input, output);

    term.say(&format!("=== {} ===", rules.game_name))?;
    let game = start_game(config, rules, store.as_ref(), &mut rng, &mut term)?;
    let mut session = Session::new(game, store);
    console::play(&mut session, &mut term)
}
