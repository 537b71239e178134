use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One monster species with three possible values for each stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesTemplate {
    pub name: String,
    pub description: String,
    pub health: [u32; 3],
    pub power: [u32; 3],
    pub bounty: [u32; 3],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopListing {
    pub item_name: String,
    pub price: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdventureRules {
    pub game_name: String,
    pub max_health: u32,
    pub player_default_health: u32,
    pub player_default_gold: u32,
    pub player_default_attack: u32,
    pub rest_cost: u32,
    pub rest_heal: u32,
    pub shop: Vec<ShopListing>,
    pub species: Vec<SpeciesTemplate>,
}

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("rules must define at least one monster species")]
    NoSpecies,
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("default health {health} exceeds max health {max}")]
    HealthAboveMax { health: u32, max: u32 },
    #[error("shop listing '{0}' has a price of zero")]
    FreeListing(String),
    #[error("could not read rules file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse rules file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl AdventureRules {
    /// Reads a JSON rules file and validates it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, RulesError> {
        let text = std::fs::read_to_string(path)?;
        let rules: Self = serde_json::from_str(&text)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        if self.species.is_empty() {
            return Err(RulesError::NoSpecies);
        }
        if self.max_health == 0 {
            return Err(RulesError::Zero { field: "max_health" });
        }
        // combat only terminates if the player always deals damage
        if self.player_default_attack == 0 {
            return Err(RulesError::Zero { field: "player_default_attack" });
        }
        if self.player_default_health > self.max_health {
            return Err(RulesError::HealthAboveMax {
                health: self.player_default_health,
                max: self.max_health,
            });
        }
        if let Some(listing) = self.shop.iter().find(|l| l.price == 0) {
            return Err(RulesError::FreeListing(listing.item_name.clone()));
        }
        Ok(())
    }
}

impl Default for AdventureRules {
    fn default() -> Self {
        Self {
            game_name: "Monster Encounter".to_string(),
            max_health: 100,
            player_default_health: 100,
            player_default_gold: 10,
            player_default_attack: 10,
            rest_cost: 5,
            rest_heal: 15,
            shop: vec![
                ShopListing { item_name: "milkshake".into(), price: 4 },
                ShopListing { item_name: "magic potion".into(), price: 15 },
            ],
            species: vec![
                SpeciesTemplate {
                    name: "goblin".into(),
                    description: "A sneaky little guy, grabbing your gold.".into(),
                    health: [8, 10, 12],
                    power: [1, 2, 3],
                    bounty: [20, 22, 24],
                },
                SpeciesTemplate {
                    name: "troll".into(),
                    description: "A grumpy bridge troll who has a huge wooden club.".into(),
                    health: [15, 18, 21],
                    power: [25, 30, 35],
                    bounty: [8, 10, 12],
                },
                SpeciesTemplate {
                    name: "George the Giant".into(),
                    description: "The gentlest giant of the land, but quite a sensitive fella.".into(),
                    health: [1000, 1200, 1400],
                    power: [100, 120, 140],
                    bounty: [3, 5, 7],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_are_valid() {
        assert!(AdventureRules::default().validate().is_ok());
    }

    #[test]
    fn empty_species_table_is_rejected() {
        let rules = AdventureRules { species: vec![], ..AdventureRules::default() };
        assert!(matches!(rules.validate(), Err(RulesError::NoSpecies)));
    }

    #[test]
    fn zero_attack_is_rejected() {
        let rules = AdventureRules { player_default_attack: 0, ..AdventureRules::default() };
        assert!(matches!(rules.validate(), Err(RulesError::Zero { field: "player_default_attack" })));
    }

    #[test]
    fn rules_file_round_trips() -> color_eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("rules.json");
        let mut rules = AdventureRules::default();
        rules.rest_cost = 7;
        std::fs::write(&path, serde_json::to_string_pretty(&rules)?)?;
        assert_eq!(AdventureRules::from_json_file(&path)?, rules);
        Ok(())
    }
}
