pub mod rules;
pub mod models;
pub mod events;
pub mod error;
pub mod combat;
pub mod shop;
pub mod game;

pub use combat::{CombatObserver, CombatOutcome, FightChoice, Relentless};
pub use error::ActionError;
pub use events::Event;
pub use game::{FightReport, GameOptions, GameSnapshot, GameState, Progress, SessionStatus};
pub use models::{generate, Inventory, Item, ItemKind, Monster, Player};
pub use rules::{AdventureRules, RulesError, ShopListing, SpeciesTemplate};
pub use shop::{purchase_item, Purchase, PurchaseError};
