use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::rules::{AdventureRules, SpeciesTemplate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub description: String,
    pub health: u32,
    pub power: u32,
    pub bounty: u32,
}

impl Monster {
    /// Rolls one value from each stat tier of the given species.
    pub fn from_template<R: Rng + ?Sized>(template: &SpeciesTemplate, rng: &mut R) -> Self {
        Self {
            name: template.name.clone(),
            description: template.description.clone(),
            health: pick_tier(&template.health, rng),
            power: pick_tier(&template.power, rng),
            bounty: pick_tier(&template.bounty, rng),
        }
    }

    /// Returns the remaining health, floored at 0.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    pub fn is_slain(&self) -> bool { self.health == 0 }
}

fn pick_tier<R: Rng + ?Sized>(tiers: &[u32; 3], rng: &mut R) -> u32 {
    tiers[rng.gen_range(0..tiers.len())]
}

/// Picks a species uniformly and rolls a fresh monster from it.
///
/// Returns `None` only when the rules carry an empty species table, which
/// [`AdventureRules::validate`] rejects.
pub fn generate<R: Rng + ?Sized>(rules: &AdventureRules, rng: &mut R) -> Option<Monster> {
    rules
        .species
        .choose(rng)
        .map(|template| Monster::from_template(template, rng))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub health: u32,
    pub gold: u32,
    pub attack_power: u32,
    pub equipped_items: Vec<String>,
    pub monster_defeated: bool,
}

impl Player {
    pub fn new_with_rules(rules: &AdventureRules) -> Self {
        Self {
            health: rules.player_default_health.min(rules.max_health),
            gold: rules.player_default_gold,
            attack_power: rules.player_default_attack,
            equipped_items: Vec::new(),
            monster_defeated: false,
        }
    }

    /// Restores up to `amount` health without passing `max`. Returns what was actually gained.
    pub fn heal(&mut self, amount: u32, max: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(max);
        self.health.saturating_sub(before)
    }

    /// Returns the remaining health, floored at 0.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    pub fn is_alive(&self) -> bool { self.health > 0 }

    /// Drops every occurrence of `name` from the equipped list.
    pub fn unequip(&mut self, name: &str) {
        self.equipped_items.retain(|item| item != name);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind { Weapon, HealthBoost, Potion }

/// Inventory entry. Field names follow the save-file layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Item {
    #[serde(rename = "weapon")]
    Weapon {
        name: String,
        #[serde(rename = "currentDurability")]
        durability: u32,
        #[serde(rename = "attackBoost")]
        attack_boost: u32,
    },
    #[serde(rename = "healthBoost")]
    HealthBoost {
        name: String,
        #[serde(rename = "healthRestore")]
        heal_restore: u32,
        quantity: u32,
    },
    #[serde(rename = "potion")]
    Potion {
        name: String,
        effect: String,
        quantity: u32,
    },
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Weapon { name, .. } | Item::HealthBoost { name, .. } | Item::Potion { name, .. } => name,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Weapon { .. } => ItemKind::Weapon,
            Item::HealthBoost { .. } => ItemKind::HealthBoost,
            Item::Potion { .. } => ItemKind::Potion,
        }
    }

    pub fn is_equipable(&self) -> bool { self.kind() != ItemKind::Potion }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new(items: Vec<Item>) -> Self { Self { items } }

    /// The fixed kit every new game starts with.
    pub fn starter() -> Self {
        Self::new(vec![
            Item::Weapon { name: "swashbuckler sword".into(), durability: 25, attack_boost: 10 },
            Item::HealthBoost { name: "milkshake".into(), heal_restore: 10, quantity: 3 },
            Item::Potion {
                name: "magic potion".into(),
                effect: "Defeats any one monster without losing HP.".into(),
                quantity: 1,
            },
        ])
    }

    pub fn items(&self) -> &[Item] { &self.items }

    /// Indices (into [`Inventory::items`]) of everything that can be equipped, in inventory order.
    pub fn equipable_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_equipable())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Item> { self.items.get_mut(index) }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.name() == name)
    }

    pub fn weapon_mut(&mut self) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.kind() == ItemKind::Weapon)
    }

    pub fn weapon_durability(&self) -> Option<u32> {
        self.items.iter().find_map(|item| match item {
            Item::Weapon { durability, .. } => Some(*durability),
            _ => None,
        })
    }

    pub fn set_weapon_durability(&mut self, value: u32) {
        if let Some(Item::Weapon { durability, .. }) = self.weapon_mut() {
            *durability = value;
        }
    }

    pub fn potion_mut(&mut self) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.kind() == ItemKind::Potion)
    }

    pub fn potions_left(&self) -> u32 {
        self.items
            .iter()
            .map(|item| match item {
                Item::Potion { quantity, .. } => *quantity,
                _ => 0,
            })
            .sum()
    }
}

impl Default for Inventory {
    fn default() -> Self { Self::starter() }
}
