use text_adventure::adventure::{GameOptions, GameState, Inventory, Player, SessionStatus};
use text_adventure::config::Config;
use text_adventure::console::{self, LineConsole, Session};
use text_adventure::sqlite::Db;
use text_adventure::storage::{JsonFileStore, SaveRecord, SaveStore};
mod common;

#[ctor::ctor]
fn _init() { common::init(); }

/// Plays `script` line by line and returns the finished session with everything printed.
fn play_script(game: GameState, script: &str) -> (Session, String) {
    let store = Db::in_memory().expect("in-memory db");
    let mut session = Session::new(game, Box::new(store));
    let mut term = LineConsole::new(script.as_bytes(), Vec::new());
    console::play(&mut session, &mut term).expect("session runs");
    let out = String::from_utf8(term.into_output()).expect("utf8 output");
    (session, out)
}

#[test]
fn menu_lists_all_options() {
    let (_, out) = play_script(common::new_game_against(common::monster("goblin", 12, 2)), "");
    assert!(out.starts_with("A wild goblin appears!\n"));
    for line in [
        "Current HP: 100, Current Gold: 10",
        "Equipped items: None",
        "1) Fight Monster",
        "2) Sleep (Restore 15 HP for 5 Gold, but remember HP caps out at 100)",
        "3) Choose an item from inventory to equip",
        "4) Use your magic potion (Defeat monster without losing HP)",
        "5) Quit",
        "6) Visit the shop",
        "Enter your choice (1-6): ",
    ] {
        assert!(out.contains(line), "missing {line:?} in:\n{out}");
    }
}

#[test]
fn fight_then_quit_and_save() {
    let (session, out) = play_script(common::new_game_against(common::monster("goblin", 12, 2)), "1\n5\nhero\n");
    assert!(out.contains("You attack the goblin for 10 damage! The goblin has 2 health left!"));
    assert!(out.contains("The goblin attacks back for 2 damage! You have 98 HP left!"));
    assert!(out.contains("You defeated the goblin!"));
    assert!(out.contains("1) Monster already defeated, cannot fight"));
    assert!(out.contains("You chose to quit. Goodbye!!"));
    assert!(out.contains("Progress saved as 'hero'."));
    // each blow is printed once even though the observer and the report both carry it
    assert_eq!(out.matches("You defeated the goblin!").count(), 1);

    let record = session.store.load("hero").expect("load").expect("saved");
    assert_eq!(record.player_health, 98);
    assert_eq!(record.player_gold, 10);
    assert_eq!(record.sword_durability, 24);
    assert_eq!(session.game.status(), SessionStatus::Quit);
}

#[test]
fn invalid_menu_choice_reprompts_without_redraw() {
    let (session, out) = play_script(common::new_game_against(common::monster("goblin", 12, 2)), "9\nfight\n");
    assert_eq!(out.matches("Invalid choice. Please choose (1-6).").count(), 2);
    assert_eq!(out.matches("What would you like to do?").count(), 1);
    // closing the input quits without a save prompt
    assert!(!out.contains("Enter a name to save"));
    assert!(session.store.list().expect("list").is_empty());
    assert_eq!(session.game.status(), SessionStatus::Quit);
}

#[test]
fn sleeping_without_gold_is_refused() {
    let rules = text_adventure::AdventureRules::default();
    let player = Player { gold: 3, health: 50, ..Player::new_with_rules(&rules) };
    let game = GameState::with_parts(rules, GameOptions::default(), player, Inventory::starter(), common::monster("troll", 18, 30));
    let (session, out) = play_script(game, "2\n5\n\n");
    assert!(out.contains("Not enough gold to sleep! You need 5 gold but have 3."));
    assert!(out.contains("Progress not saved."));
    assert_eq!(session.game.player().health, 50);
    assert_eq!(session.game.player().gold, 3);
}

#[test]
fn equip_menu_loops_until_done() {
    let (session, out) = play_script(
        common::new_game_against(common::monster("goblin", 12, 2)),
        "3\nsword\n1\n7\ndone\n",
    );
    assert!(out.contains("Available items to equip:"));
    assert!(out.contains("1: swashbuckler sword (+10 attack, 25 uses left)"));
    assert!(out.contains("2: milkshake (+10 HP, 3 left)"));
    assert!(!out.contains("3: magic potion"));
    assert!(out.contains("Please enter a valid number or 'done'."));
    assert!(out.contains("You equipped swashbuckler sword and gained 10 attack power! Attack power: 20."));
    assert!(out.contains("Invalid choice 7, please pick a number between 1 and 2."));
    assert!(out.contains("Equipped items: swashbuckler sword"));
    assert_eq!(session.game.player().attack_power, 20);
}

#[test]
fn potion_wins_and_disables_fighting() {
    let (session, out) = play_script(
        common::new_game_against(common::monster("George the Giant", 1200, 120)),
        "4\n4\n1\n",
    );
    assert!(out.contains("You use a magic potion and defeat the George the Giant without losing HP!"));
    assert!(out.contains("4) Monster Already Defeated"));
    assert!(out.contains("The George the Giant has already been defeated!"));
    assert_eq!(session.game.player().health, 100);
    assert_eq!(session.game.inventory().potions_left(), 0);
}

#[test]
fn defeat_ends_the_game_without_saving() {
    let (session, out) = play_script(
        common::new_game_against(common::monster("George the Giant", 1000, 140)),
        "1\nhero\n",
    );
    assert!(out.contains("You have 0 HP left!"));
    assert!(out.contains("Game Over!"));
    assert!(!out.contains("Enter a name to save"));
    assert_eq!(session.game.status(), SessionStatus::GameOver);
    assert!(session.store.list().expect("list").is_empty());
}

#[test]
fn fleeing_keeps_the_monster_alive() {
    let options = GameOptions { allow_flee: true, ..GameOptions::default() };
    let (session, out) = play_script(common::new_game_with(common::monster("troll", 30, 8), options), "1\nf\n");
    assert!(out.contains("You have 92 HP, the troll has 20. (c)ontinue or (f)lee? "));
    assert!(out.contains("You fled from the troll with 92 HP."));
    assert!(!session.game.monster_defeated());
    assert_eq!(session.game.monster().health, 20);
    assert_eq!(session.game.player().gold, 10);
}

#[test]
fn shop_restocks_milkshakes() {
    let (session, out) = play_script(
        common::new_game_against(common::monster("goblin", 12, 2)),
        "6\n1 2\n2\nx\ndone\n",
    );
    assert!(out.contains("Welcome to the shop! You have 10 gold."));
    assert!(out.contains("| milkshake          4g  | [1]"));
    assert!(out.contains("Purchased 2 x milkshake for 8 gold. Current Gold: 2."));
    assert!(out.contains("Purchase rejected"));
    assert!(out.contains("Please enter an item number (and quantity) or 'done'."));
    assert_eq!(session.game.player().gold, 2);
    assert_eq!(session.game.inventory().potions_left(), 1);
}

#[test]
fn shop_option_hidden_when_disabled() {
    let options = GameOptions { enable_shop: false, ..GameOptions::default() };
    let (_, out) = play_script(common::new_game_with(common::monster("goblin", 12, 2), options), "6\n");
    assert!(!out.contains("6) Visit the shop"));
    assert!(out.contains("Invalid choice. Please choose (1-5)."));
}

#[test]
fn run_saves_then_resumes_from_json() -> color_eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = Config { save_dir: dir.path().to_path_buf(), seed: Some(11), ..Config::new() };

    let mut first = Vec::new();
    text_adventure::run(&config, &b"2\n5\nslot1\n"[..], &mut first)?;
    let first = String::from_utf8(first)?;
    assert!(first.starts_with("=== Monster Encounter ===\n"));
    assert!(first.contains("Progress saved as 'slot1'."));

    let resumed = Config { load_id: Some("slot1".into()), ..config.clone() };
    let mut second = Vec::new();
    text_adventure::run(&resumed, &b"5\n\n"[..], &mut second)?;
    let second = String::from_utf8(second)?;
    assert!(second.contains("Loaded save 'slot1'."));
    assert!(second.contains("Current HP: 100, Current Gold: 5"));

    let missing = Config { load_id: Some("ghost".into()), ..config };
    let mut third = Vec::new();
    text_adventure::run(&missing, &b""[..], &mut third)?;
    let third = String::from_utf8(third)?;
    assert!(third.contains("No save named 'ghost' was found. Starting a new game."));
    assert!(third.contains("Current HP: 100, Current Gold: 10"));
    Ok(())
}

#[test]
fn potion_option_relabelled_when_disabled() {
    let options = GameOptions { enable_potion: false, ..GameOptions::default() };
    let (session, out) = play_script(common::new_game_with(common::monster("goblin", 12, 2), options), "4
");
    assert!(out.contains("4) Magic potions are disabled"));
    assert!(!out.contains("4) Use your magic potion"));
    assert!(out.contains("Potions are disabled in this game."));
    assert_eq!(session.game.inventory().potions_left(), 1);
}

#[test]
fn empty_equip_list_still_accepts_done() {
    let rules = text_adventure::AdventureRules::default();
    let player = Player::new_with_rules(&rules);
    let game = GameState::with_parts(rules, GameOptions::default(), player, Inventory::new(Vec::new()), common::monster("goblin", 12, 2));
    let (session, out) = play_script(game, "3
1
done
");
    assert!(out.contains("Available items to equip:"));
    assert!(!out.contains("1: "));
    assert!(out.contains("Invalid choice 1, please pick a number between 1 and 0."));
    // back on the menu after "done"
    assert_eq!(out.matches("What would you like to do?").count(), 2);
    assert!(session.game.player().equipped_items.is_empty());
}

#[test]
fn dead_save_ends_without_menu() -> color_eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut record = SaveRecord::from(common::new_game_against(common::monster("goblin", 12, 2)).progress());
    record.player_health = 0;
    JsonFileStore::new(dir.path()).save("fallen", &record)?;

    let config = Config { save_dir: dir.path().to_path_buf(), seed: Some(2), load_id: Some("fallen".into()), ..Config::new() };
    let mut out = Vec::new();
    text_adventure::run(&config, &b"5
again
"[..], &mut out)?;
    let out = String::from_utf8(out)?;
    assert!(out.contains("Loaded save 'fallen'."));
    assert!(out.contains("Game Over!"));
    assert!(!out.contains("What would you like to do?"));
    assert!(!out.contains("Enter a name to save"));
    assert_eq!(JsonFileStore::new(dir.path()).list()?, vec!["fallen"]);
    Ok(())
}
