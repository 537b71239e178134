use std::fmt;

use serde::{Deserialize, Serialize};

/// Something that happened during a transition, rendered as one status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    PlayerStrikes { monster: String, damage: u32, monster_health: u32 },
    MonsterStrikes { monster: String, damage: u32, player_health: u32 },
    MonsterSlain { monster: String },
    PlayerSlain { monster: String },
    Fled { monster: String, player_health: u32 },
    BountyCollected { amount: u32, gold: u32 },
    WeaponWorn { name: String, durability: u32 },
    WeaponBroke { name: String },
    Rested { restored: u32, health: u32, gold: u32 },
    Consumed { name: String, restored: u32, health: u32, left: u32 },
    WeaponEquipped { name: String, boost: u32, attack_power: u32 },
    PotionUsed { potion: String, monster: String },
    Purchased { name: String, quantity: u32, spent: u32, gold: u32 },
    GameOver,
    Farewell,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::PlayerStrikes { monster, damage, monster_health } => {
                write!(f, "You attack the {monster} for {damage} damage! The {monster} has {monster_health} health left!")
            }
            Event::MonsterStrikes { monster, damage, player_health } => {
                write!(f, "The {monster} attacks back for {damage} damage! You have {player_health} HP left!")
            }
            Event::MonsterSlain { monster } => write!(f, "You defeated the {monster}!"),
            Event::PlayerSlain { monster } => write!(f, "The {monster} killed you!"),
            Event::Fled { monster, player_health } => {
                write!(f, "You fled from the {monster} with {player_health} HP.")
            }
            Event::BountyCollected { amount, gold } => {
                write!(f, "You collected a bounty of {amount} gold. Current Gold: {gold}.")
            }
            Event::WeaponWorn { name, durability } => {
                write!(f, "Your {name} has {durability} uses left.")
            }
            Event::WeaponBroke { name } => write!(f, "Your {name} has broken!"),
            Event::Rested { restored, health, gold } => write!(
                f,
                "You slept and restored {restored} HP. Current HP: {health}. Current Gold: {gold}."
            ),
            Event::Consumed { name, restored, health, left } => write!(
                f,
                "You equipped {name} for {restored} HP! Current HP: {health}. ({left} left)"
            ),
            Event::WeaponEquipped { name, boost, attack_power } => write!(
                f,
                "You equipped {name} and gained {boost} attack power! Attack power: {attack_power}."
            ),
            Event::PotionUsed { potion, monster } => {
                write!(f, "You use a {potion} and defeat the {monster} without losing HP!")
            }
            Event::Purchased { name, quantity, spent, gold } => write!(
                f,
                "Purchased {quantity} x {name} for {spent} gold. Current Gold: {gold}."
            ),
            Event::GameOver => write!(f, "Game Over!"),
            Event::Farewell => write!(f, "You chose to quit. Goodbye!!"),
        }
    }
}
