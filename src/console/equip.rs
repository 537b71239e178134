//! 装備画面: "done" が入力されるまで装備を繰り返せるサブメニュー

use std::io;

use color_eyre::Result;

use super::{MenuScreen, ScreenMode, Session, Screen, Terminal};
use crate::adventure::Item;

/// 装備画面状態
#[derive(Debug, Default)]
pub struct EquipScreen;

impl EquipScreen {
    pub fn new() -> Self {
        Self
    }
}

/// 装備画面での入力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipInput {
    Done,
    Pick(usize),
}

impl EquipInput {
    /// "done" (大文字小文字無視) か 1 以上の数字のみ受け付ける
    pub fn parse(input: &str) -> Option<EquipInput> {
        let s = input.trim();
        if s.eq_ignore_ascii_case("done") {
            return Some(EquipInput::Done);
        }
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        s.parse().ok().map(EquipInput::Pick)
    }
}

fn describe(item: &Item) -> String {
    match item {
        Item::Weapon { name, durability, attack_boost } => {
            format!("{name} (+{attack_boost} attack, {durability} uses left)")
        }
        Item::HealthBoost { name, heal_restore, quantity } => {
            format!("{name} (+{heal_restore} HP, {quantity} left)")
        }
        Item::Potion { name, quantity, .. } => format!("{name} ({quantity} left)"),
    }
}

impl Screen for EquipScreen {
    fn render(&self, session: &Session, term: &mut dyn Terminal) -> io::Result<()> {
        term.say("")?;
        term.say("Available items to equip:")?;
        for (i, item) in session.game.equip_options().into_iter().enumerate() {
            term.say(&format!("{}: {}", i + 1, describe(item)))?;
        }
        Ok(())
    }

    fn prompt(&self, _session: &Session) -> String {
        "Enter the number of the item you would like to equip or type \"done\" to exit: ".to_string()
    }

    fn handle_line(&mut self, session: &mut Session, line: &str, term: &mut dyn Terminal) -> Result<Option<ScreenMode>> {
        match EquipInput::parse(line) {
            Some(EquipInput::Done) => return Ok(Some(ScreenMode::Menu(MenuScreen::new()))),
            Some(EquipInput::Pick(choice)) => match session.game.equip(choice) {
                Ok(event) => term.say(&event.to_string())?,
                Err(e) => term.say(&e.to_string())?,
            },
            None => term.say("Please enter a valid number or 'done'.")?,
        }
        Ok(None)
    }
}
