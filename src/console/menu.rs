//! メニュー画面: 毎ターン表示される 1〜5 (+6) の選択肢

use std::io;

use color_eyre::Result;
use tracing::info;

use super::{EquipScreen, SaveScreen, ScreenMode, Session, ShopScreen, Screen, Terminal};
use crate::adventure::{CombatObserver, Event, FightChoice, Monster, Player};

/// メニューの選択肢
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Fight,
    Sleep,
    Equip,
    UsePotion,
    Quit,
    Shop,
}

impl MenuItem {
    fn parse(input: &str, shop_open: bool) -> Option<MenuItem> {
        match input {
            "1" => Some(MenuItem::Fight),
            "2" => Some(MenuItem::Sleep),
            "3" => Some(MenuItem::Equip),
            "4" => Some(MenuItem::UsePotion),
            "5" => Some(MenuItem::Quit),
            "6" if shop_open => Some(MenuItem::Shop),
            _ => None,
        }
    }
}

/// メニュー画面状態 (状態はゲーム側が持つので空)
#[derive(Debug, Default)]
pub struct MenuScreen;

impl MenuScreen {
    pub fn new() -> Self {
        Self
    }

    fn last_option(session: &Session) -> u8 {
        if session.game.options.enable_shop { 6 } else { 5 }
    }
}

/// 戦闘の実況をターミナルへ流し、逃走可否を尋ねる
struct ConsoleObserver<'a> {
    term: &'a mut dyn Terminal,
    seen: usize,
    error: Option<io::Error>,
}

impl CombatObserver for ConsoleObserver<'_> {
    fn on_event(&mut self, event: &Event) {
        self.seen += 1;
        if self.error.is_none() {
            if let Err(e) = self.term.say(&event.to_string()) {
                self.error = Some(e);
            }
        }
    }

    fn choose(&mut self, player: &Player, monster: &Monster) -> FightChoice {
        let prompt = format!(
            "You have {} HP, the {} has {}. (c)ontinue or (f)lee? ",
            player.health, monster.name, monster.health
        );
        match self.term.ask(&prompt) {
            Ok(Some(answer)) if matches!(answer.to_ascii_lowercase().as_str(), "f" | "flee") => FightChoice::Flee,
            Ok(_) => FightChoice::Continue,
            Err(e) => {
                self.error.get_or_insert(e);
                FightChoice::Continue
            }
        }
    }
}

impl Screen for MenuScreen {
    fn render(&self, session: &Session, term: &mut dyn Terminal) -> io::Result<()> {
        let game = &session.game;
        let p = game.player();
        let rules = &game.rules;
        term.say(&format!("Current HP: {}, Current Gold: {}", p.health, p.gold))?;
        let equipped = if p.equipped_items.is_empty() { "None".to_string() } else { p.equipped_items.join(", ") };
        term.say(&format!("Equipped items: {equipped}"))?;
        term.say("What would you like to do?")?;
        term.say(if game.can_fight() { "1) Fight Monster" } else { "1) Monster already defeated, cannot fight" })?;
        term.say(&format!(
            "2) Sleep (Restore {} HP for {} Gold, but remember HP caps out at {})",
            rules.rest_heal, rules.rest_cost, rules.max_health
        ))?;
        term.say("3) Choose an item from inventory to equip")?;
        term.say(if game.monster_defeated() {
            "4) Monster Already Defeated"
        } else if !game.options.enable_potion {
            "4) Magic potions are disabled"
        } else {
            "4) Use your magic potion (Defeat monster without losing HP)"
        })?;
        term.say("5) Quit")?;
        if game.options.enable_shop {
            term.say("6) Visit the shop")?;
        }
        Ok(())
    }

    fn prompt(&self, session: &Session) -> String {
        format!("Enter your choice (1-{}): ", Self::last_option(session))
    }

    fn handle_line(&mut self, session: &mut Session, line: &str, term: &mut dyn Terminal) -> Result<Option<ScreenMode>> {
        let Some(item) = MenuItem::parse(line, session.game.options.enable_shop) else {
            term.say(&format!("Invalid choice. Please choose (1-{}).", Self::last_option(session)))?;
            return Ok(None);
        };
        info!(target: "app", ?item, "menu choice");

        match item {
            MenuItem::Fight => {
                let mut observer = ConsoleObserver { term: &mut *term, seen: 0, error: None };
                let result = session.game.fight(&mut observer);
                let (seen, error) = (observer.seen, observer.error);
                if let Some(e) = error {
                    return Err(e.into());
                }
                match result {
                    Ok(report) => {
                        for event in report.events.iter().skip(seen) {
                            term.say(&event.to_string())?;
                        }
                    }
                    Err(e) => term.say(&e.to_string())?,
                }
                if session.game.is_over() {
                    return Ok(Some(ScreenMode::Exit));
                }
            }
            MenuItem::Sleep => match session.game.rest() {
                Ok(event) => term.say(&event.to_string())?,
                Err(e) => term.say(&e.to_string())?,
            },
            MenuItem::Equip => return Ok(Some(ScreenMode::Equip(EquipScreen::new()))),
            MenuItem::UsePotion => match session.game.use_potion() {
                Ok(events) => {
                    for event in events {
                        term.say(&event.to_string())?;
                    }
                }
                Err(e) => term.say(&e.to_string())?,
            },
            MenuItem::Quit => {
                let farewell = session.game.quit();
                term.say(&farewell.to_string())?;
                return Ok(Some(ScreenMode::Save(SaveScreen::new())));
            }
            MenuItem::Shop => return Ok(Some(ScreenMode::Shop(ShopScreen::new()))),
        }
        Ok(Some(ScreenMode::Menu(MenuScreen::new())))
    }
}
