//! 画面システム: ターン制メニュー / 装備 / ショップ / セーブ の各画面を管理
//!
//! 1 行入力 → 1 回の遷移、というターン制の入出力だけを扱う。
//! 入出力は [`Terminal`] 越しなので、テストでは `&[u8]` と `Vec<u8>` で台本どおりに動かせる。

use std::io::{self, BufRead, Write};

use color_eyre::Result;
use tracing::{debug, info};

use crate::adventure::{Event, GameState, SessionStatus};
use crate::storage::SaveStore;

pub mod equip;
pub mod menu;
pub mod save;
pub mod shop;

pub use equip::EquipScreen;
pub use menu::MenuScreen;
pub use save::SaveScreen;
pub use shop::ShopScreen;

/// 行単位の入出力
pub trait Terminal {
    /// 1 行出力
    fn say(&mut self, line: &str) -> io::Result<()>;

    /// プロンプトを出して 1 行読む。入力が閉じていれば `None`
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// 任意の `BufRead` / `Write` の組を [`Terminal`] として扱う
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// 出力先を取り出す (テストで画面内容を確認するため)
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Terminal for LineConsole<R, W> {
    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut s = String::new();
        if self.input.read_line(&mut s)? == 0 {
            return Ok(None);
        }
        Ok(Some(s.trim().to_string()))
    }
}

/// 1 セッション分の状態。ゲーム本体とセーブ先を所有する
pub struct Session {
    pub game: GameState,
    pub store: Box<dyn SaveStore>,
}

impl Session {
    pub fn new(game: GameState, store: Box<dyn SaveStore>) -> Self {
        Self { game, store }
    }
}

/// 各画面が実装すべきトレイト
pub trait Screen {
    /// 画面に入ったときの表示
    fn render(&self, session: &Session, term: &mut dyn Terminal) -> io::Result<()>;

    /// 入力待ちのプロンプト
    fn prompt(&self, session: &Session) -> String;

    /// 1 行分の入力を処理
    /// 戻り値: Some(次の画面) で遷移 (再表示)、None で同じ画面のまま再入力
    fn handle_line(&mut self, session: &mut Session, line: &str, term: &mut dyn Terminal) -> Result<Option<ScreenMode>>;
}

/// 取り得る画面の列挙型
pub enum ScreenMode {
    Menu(MenuScreen),
    Equip(EquipScreen),
    Shop(ShopScreen),
    Save(SaveScreen),
    Exit,
}

impl ScreenMode {
    fn as_screen(&mut self) -> Option<&mut dyn Screen> {
        match self {
            ScreenMode::Menu(s) => Some(s),
            ScreenMode::Equip(s) => Some(s),
            ScreenMode::Shop(s) => Some(s),
            ScreenMode::Save(s) => Some(s),
            ScreenMode::Exit => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ScreenMode::Menu(_) => "menu",
            ScreenMode::Equip(_) => "equip",
            ScreenMode::Shop(_) => "shop",
            ScreenMode::Save(_) => "save",
            ScreenMode::Exit => "exit",
        }
    }
}

/// モンスター登場の口上
pub fn announce_monster(session: &Session, term: &mut dyn Terminal) -> io::Result<()> {
    let m = session.game.monster();
    term.say(&format!("A wild {} appears!", m.name))?;
    term.say(&format!("Description: {}", m.description))?;
    term.say(&format!("Health: {}", m.health))?;
    term.say(&format!("Power: {}", m.power))?;
    term.say(&format!("Money: {}", m.bounty))
}

/// セッションのメインループを実行
pub fn play(session: &mut Session, term: &mut dyn Terminal) -> Result<()> {
    // 体力 0 のセーブから再開した場合はメニューを出さずに終了
    if session.game.status() == SessionStatus::GameOver {
        info!(target: "app", "resumed an already finished game");
        term.say(&Event::GameOver.to_string())?;
        return Ok(());
    }
    announce_monster(session, term)?;
    let mut current = ScreenMode::Menu(MenuScreen::new());
    let mut needs_render = true;

    loop {
        let name = current.name();
        let Some(screen) = current.as_screen() else { break };

        if needs_render {
            screen.render(session, term)?;
        }

        let prompt = screen.prompt(session);
        let Some(line) = term.ask(&prompt)? else {
            // 入力が閉じた: セーブせずに終了
            info!(target: "app", screen = name, "input closed");
            term.say("")?;
            if !session.game.is_over() {
                session.game.quit();
            }
            break;
        };
        debug!(target: "app", screen = name, input = %line, "line received");

        match screen.handle_line(session, &line, term)? {
            Some(next) => {
                current = next;
                needs_render = true;
            }
            None => needs_render = false,
        }
    }

    debug!(
        target: "app",
        snapshot = %serde_json::to_string(&session.game.snapshot())?,
        "session finished"
    );
    Ok(())
}
