//! アプリケーション設定
//!
//! 既定値 → 環境変数 (`.env` 含む) → コマンドライン引数 の順に上書きする。

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{eyre, Result, WrapErr};

use crate::adventure::{AdventureRules, GameOptions};

/// セーブ先の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Json,
    Sqlite,
}

impl FromStr for StoreKind {
    type Err = color_eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StoreKind::Json),
            "sqlite" => Ok(StoreKind::Sqlite),
            other => Err(eyre!("unknown store kind: {other} (expected json or sqlite)")),
        }
    }
}

/// コマンドライン引数
#[derive(Debug, Default, Parser)]
#[command(name = "adventure", about = "Turn-based monster encounter")]
pub struct Cli {
    /// 指定した名前のセーブを読み込んで開始
    #[arg(long)]
    pub load: Option<String>,
    /// 乱数シード (モンスター生成を再現したい場合)
    #[arg(long)]
    pub seed: Option<u64>,
    /// セーブ先
    #[arg(long, value_enum)]
    pub store: Option<StoreKind>,
    /// 戦闘中の逃走を許可
    #[arg(long)]
    pub allow_flee: bool,
    /// ショップを無効化
    #[arg(long)]
    pub no_shop: bool,
    /// 魔法のポーションを無効化
    #[arg(long)]
    pub no_potion: bool,
    /// 討伐時にモンスターの賞金を受け取る
    #[arg(long)]
    pub collect_bounty: bool,
    /// ルール定義 (JSON) のパス
    #[arg(long)]
    pub rules: Option<PathBuf>,
    /// セーブ一覧を表示して終了
    #[arg(long)]
    pub list_saves: bool,
}

/// アプリケーション設定
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON セーブのディレクトリ
    pub save_dir: PathBuf,
    /// セーブ先の種類
    pub store: StoreKind,
    /// SQLite セーブのファイル
    pub db_path: PathBuf,
    /// ログ出力先ディレクトリ
    pub log_dir: PathBuf,
    /// 乱数シード (None ならエントロピーから)
    pub seed: Option<u64>,
    /// ゲームの任意機能
    pub options: GameOptions,
    /// ルール定義ファイル
    pub rules_path: Option<PathBuf>,
    /// 起動時に読み込むセーブ名
    pub load_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("saves"),
            store: StoreKind::Json,
            db_path: PathBuf::from("saves/adventure.sqlite"),
            log_dir: PathBuf::from("logs"),
            seed: None,
            options: GameOptions::default(),
            rules_path: None,
            load_id: None,
        }
    }
}

impl Config {
    /// 新しい設定インスタンスを作成 (既定値)
    pub fn new() -> Self {
        Self::default()
    }

    /// プロセスの環境変数から設定を作成
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を作成 (テストで環境変数を汚さないため)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut c = Self::default();
        if let Some(v) = lookup("ADVENTURE_SAVE_DIR") { c.save_dir = PathBuf::from(v); }
        if let Some(v) = lookup("ADVENTURE_STORE") { c.store = v.parse()?; }
        if let Some(v) = lookup("ADVENTURE_DB_PATH") { c.db_path = PathBuf::from(v); }
        if let Some(v) = lookup("ADVENTURE_LOG_DIR") { c.log_dir = PathBuf::from(v); }
        if let Some(v) = lookup("ADVENTURE_SEED") {
            c.seed = Some(v.trim().parse().wrap_err_with(|| format!("ADVENTURE_SEED={v}"))?);
        }
        if let Some(v) = lookup("ADVENTURE_RULES") { c.rules_path = Some(PathBuf::from(v)); }
        c.options.allow_flee = flag(&lookup, "ADVENTURE_ALLOW_FLEE", c.options.allow_flee)?;
        c.options.enable_potion = flag(&lookup, "ADVENTURE_ENABLE_POTION", c.options.enable_potion)?;
        c.options.enable_shop = flag(&lookup, "ADVENTURE_ENABLE_SHOP", c.options.enable_shop)?;
        c.options.collect_bounty = flag(&lookup, "ADVENTURE_COLLECT_BOUNTY", c.options.collect_bounty)?;
        Ok(c)
    }

    /// コマンドライン引数で上書き
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if cli.load.is_some() { self.load_id = cli.load.clone(); }
        if cli.seed.is_some() { self.seed = cli.seed; }
        if let Some(store) = cli.store { self.store = store; }
        if cli.rules.is_some() { self.rules_path = cli.rules.clone(); }
        if cli.allow_flee { self.options.allow_flee = true; }
        if cli.no_shop { self.options.enable_shop = false; }
        if cli.no_potion { self.options.enable_potion = false; }
        if cli.collect_bounty { self.options.collect_bounty = true; }
        self
    }

    /// ルールを読み込む (指定がなければ既定ルール)
    pub fn load_rules(&self) -> Result<AdventureRules> {
        match &self.rules_path {
            Some(path) => AdventureRules::from_json_file(path)
                .wrap_err_with(|| format!("failed to load rules from {}", path.display())),
            None => Ok(AdventureRules::default()),
        }
    }
}

fn flag<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(v) => match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(eyre!("{key} must be a boolean, got '{other}'")),
        },
    }
}
