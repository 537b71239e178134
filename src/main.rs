use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::rolling;

use text_adventure::{open_store, Cli, Config};

fn main() -> Result<()> {
    color_eyre::install()?;

    // Load .env (optional). ADVENTURE_* settings may live in a local .env file.
    // If the file doesn't exist, ignore the error.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_cli(&cli);

    // ログ: 標準出力はゲーム画面に使うため、ファイルへのみ出力する
    let file_appender = rolling::daily(&config.log_dir, "adventure.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    // guard を drop するとログが失われるため、main の終わりまで保持

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // ファイルにANSIカラー不要
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!(target: "app", ?config, "starting");

    if cli.list_saves {
        let store = open_store(&config)?;
        for slot in store.list()? {
            println!("{slot}");
        }
        drop(guard);
        return Ok(());
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let res = text_adventure::run(&config, stdin.lock(), stdout.lock());
    drop(guard);
    res
}
