use thiserror::Error;

use super::shop::PurchaseError;

/// A refused transition. The game state is left untouched whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Not enough gold to sleep! You need {needed} gold but have {available}.")]
    InsufficientGold { needed: u32, available: u32 },
    #[error("You are out of {name}, please choose something else or \"done\".")]
    ItemDepleted { name: String },
    #[error("Cannot equip {name}: durability too low.")]
    WeaponBroken { name: String },
    #[error("{name} cannot be equipped.")]
    NotEquipable { name: String },
    #[error("Invalid choice {choice}, please pick a number between 1 and {max}.")]
    InvalidSelection { choice: usize, max: usize },
    #[error("The {monster} has already been defeated!")]
    MonsterAlreadyDefeated { monster: String },
    #[error("You have no magic potions to use!")]
    NoPotions,
    #[error("Potions are disabled in this game.")]
    PotionsDisabled,
    #[error("The shop is closed.")]
    ShopClosed,
    #[error("{name} is not something the shop can restock.")]
    NotStockable { name: String },
    #[error("Purchase rejected: {0}")]
    Purchase(#[from] PurchaseError),
    #[error("The game is over.")]
    GameOver,
}
