//! ショップ画面: 回復アイテムとポーションの補充

use std::io;

use color_eyre::Result;

use super::{MenuScreen, ScreenMode, Session, Screen, Terminal};
use crate::adventure::ShopListing;

/// ショップ画面状態
#[derive(Debug, Default)]
pub struct ShopScreen;

impl ShopScreen {
    pub fn new() -> Self {
        Self
    }
}

/// ショップでの入力 ("<番号> [個数]" または "done")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopInput {
    Done,
    Buy { choice: usize, quantity: u32 },
}

impl ShopInput {
    pub fn parse(input: &str) -> Option<ShopInput> {
        let s = input.trim();
        if s.eq_ignore_ascii_case("done") {
            return Some(ShopInput::Done);
        }
        let mut parts = s.split_whitespace();
        let choice = parts.next()?.parse().ok()?;
        let quantity = match parts.next() {
            Some(q) => q.parse().ok()?,
            None => 1,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(ShopInput::Buy { choice, quantity })
    }
}

/// 枠付きの品目表。品名は左寄せ、価格は右寄せ
pub fn format_shop_menu(listings: &[ShopListing]) -> Vec<String> {
    let width = listings.iter().map(|l| l.item_name.len()).max().unwrap_or(0);
    let border = "-".repeat(width + 12);
    let mut lines = vec![format!("/{border}\\")];
    for (i, l) in listings.iter().enumerate() {
        let price = format!("{}g", l.price);
        lines.push(format!("| {:<width$} {:>8}  | [{}]", l.item_name, price, i + 1));
    }
    lines.push(format!("\\{border}/"));
    lines
}

impl Screen for ShopScreen {
    fn render(&self, session: &Session, term: &mut dyn Terminal) -> io::Result<()> {
        term.say("")?;
        term.say(&format!("Welcome to the shop! You have {} gold.", session.game.player().gold))?;
        for line in format_shop_menu(session.game.shop_listings()) {
            term.say(&line)?;
        }
        Ok(())
    }

    fn prompt(&self, _session: &Session) -> String {
        "Enter an item number and optional quantity, or type \"done\" to leave: ".to_string()
    }

    fn handle_line(&mut self, session: &mut Session, line: &str, term: &mut dyn Terminal) -> Result<Option<ScreenMode>> {
        match ShopInput::parse(line) {
            Some(ShopInput::Done) => return Ok(Some(ScreenMode::Menu(MenuScreen::new()))),
            Some(ShopInput::Buy { choice, quantity }) => match session.game.buy(choice, quantity) {
                Ok(event) => term.say(&event.to_string())?,
                Err(e) => term.say(&e.to_string())?,
            },
            None => term.say("Please enter an item number (and quantity) or 'done'.")?,
        }
        Ok(None)
    }
}
