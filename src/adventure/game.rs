use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::combat::{self, CombatObserver, CombatOutcome};
use super::error::ActionError;
use super::events::Event;
use super::models::{self, Inventory, Item, Monster, Player};
use super::rules::{AdventureRules, RulesError, ShopListing};
use super::shop::purchase_item;

/// Switches for the optional parts of the encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    pub allow_flee: bool,
    pub enable_potion: bool,
    pub enable_shop: bool,
    /// Pays the monster's bounty into the player's gold on defeat. Off unless asked for.
    #[serde(default)]
    pub collect_bounty: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self { allow_flee: false, enable_potion: true, enable_shop: true, collect_bounty: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus { Active, GameOver, Quit }

/// Everything a resumed session needs from a previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub inventory: Inventory,
    pub health: u32,
    pub gold: u32,
    pub equipped_items: Vec<String>,
    pub weapon_durability: u32,
    pub attack_power: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub player: Player,
    pub monster: Monster,
    pub inventory: Inventory,
    pub status: SessionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FightReport {
    pub outcome: CombatOutcome,
    pub events: Vec<Event>,
}

/// One encounter: the player, their inventory and the monster they face.
#[derive(Debug, Clone)]
pub struct GameState {
    pub rules: AdventureRules,
    pub options: GameOptions,
    player: Player,
    inventory: Inventory,
    monster: Monster,
    bounty_paid: bool,
    status: SessionStatus,
}

impl GameState {
    /// Starts a new game with default stats and the starter kit.
    pub fn new<R: Rng + ?Sized>(rules: AdventureRules, options: GameOptions, rng: &mut R) -> Result<Self, RulesError> {
        let player = Player::new_with_rules(&rules);
        Self::start(rules, options, player, Inventory::starter(), rng)
    }

    /// Resumes saved progress against a freshly rolled monster.
    pub fn resume<R: Rng + ?Sized>(
        rules: AdventureRules,
        options: GameOptions,
        progress: Progress,
        rng: &mut R,
    ) -> Result<Self, RulesError> {
        let mut player = Player::new_with_rules(&rules);
        player.health = progress.health.min(rules.max_health);
        player.gold = progress.gold;
        player.equipped_items = progress.equipped_items;
        if let Some(attack) = progress.attack_power {
            player.attack_power = attack.max(rules.player_default_attack);
        }
        let mut inventory = progress.inventory;
        inventory.set_weapon_durability(progress.weapon_durability);
        Self::start(rules, options, player, inventory, rng)
    }

    fn start<R: Rng + ?Sized>(
        rules: AdventureRules,
        options: GameOptions,
        player: Player,
        inventory: Inventory,
        rng: &mut R,
    ) -> Result<Self, RulesError> {
        rules.validate()?;
        let monster = models::generate(&rules, rng).ok_or(RulesError::NoSpecies)?;
        info!(target: "adventure", monster = %monster.name, health = monster.health, power = monster.power, "encounter started");
        Ok(Self::with_parts(rules, options, player, inventory, monster))
    }

    /// Assembles a state from explicit parts without rolling anything.
    pub fn with_parts(
        rules: AdventureRules,
        options: GameOptions,
        player: Player,
        inventory: Inventory,
        monster: Monster,
    ) -> Self {
        let status = if player.is_alive() { SessionStatus::Active } else { SessionStatus::GameOver };
        Self { rules, options, player, inventory, monster, bounty_paid: false, status }
    }

    pub fn player(&self) -> &Player { &self.player }
    pub fn inventory(&self) -> &Inventory { &self.inventory }
    pub fn monster(&self) -> &Monster { &self.monster }
    pub fn status(&self) -> SessionStatus { self.status }
    pub fn is_over(&self) -> bool { self.status != SessionStatus::Active }

    /// True once the monster is down, whether by combat or by potion.
    pub fn monster_defeated(&self) -> bool { self.player.monster_defeated || self.monster.is_slain() }

    pub fn can_fight(&self) -> bool { !self.is_over() && !self.monster_defeated() }

    pub fn can_use_potion(&self) -> bool {
        self.options.enable_potion && self.can_fight() && self.inventory.potions_left() > 0
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            player: self.player.clone(),
            monster: self.monster.clone(),
            inventory: self.inventory.clone(),
            status: self.status,
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            inventory: self.inventory.clone(),
            health: self.player.health,
            gold: self.player.gold,
            equipped_items: self.player.equipped_items.clone(),
            weapon_durability: self.inventory.weapon_durability().unwrap_or(0),
            attack_power: Some(self.player.attack_power),
        }
    }

    fn ensure_active(&self) -> Result<(), ActionError> {
        if self.is_over() { Err(ActionError::GameOver) } else { Ok(()) }
    }

    fn ensure_monster_standing(&self) -> Result<(), ActionError> {
        if self.monster_defeated() {
            return Err(ActionError::MonsterAlreadyDefeated { monster: self.monster.name.clone() });
        }
        Ok(())
    }

    /// Fights the monster to a finish. A surviving player wears the weapon down by one use.
    pub fn fight(&mut self, observer: &mut dyn CombatObserver) -> Result<FightReport, ActionError> {
        self.ensure_active()?;
        self.ensure_monster_standing()?;

        let report = combat::resolve(&mut self.player, &mut self.monster, self.options.allow_flee, observer);
        let mut events = report.events;

        match report.outcome {
            CombatOutcome::Victory => {
                events.push(Event::MonsterSlain { monster: self.monster.name.clone() });
                events.extend(self.pay_bounty());
            }
            CombatOutcome::Fled => {
                events.push(Event::Fled { monster: self.monster.name.clone(), player_health: self.player.health });
            }
            CombatOutcome::Defeat => {
                events.push(Event::PlayerSlain { monster: self.monster.name.clone() });
                events.push(Event::GameOver);
                self.status = SessionStatus::GameOver;
            }
        }
        if report.outcome != CombatOutcome::Defeat {
            events.extend(self.wear_weapon());
        }

        info!(
            target: "adventure",
            outcome = ?report.outcome,
            player_health = self.player.health,
            monster_health = self.monster.health,
            "fight resolved"
        );
        Ok(FightReport { outcome: report.outcome, events })
    }

    fn wear_weapon(&mut self) -> Vec<Event> {
        let Some(Item::Weapon { name, durability, .. }) = self.inventory.weapon_mut() else {
            return Vec::new();
        };
        if *durability == 0 {
            return Vec::new();
        }
        *durability -= 1;
        let mut events = vec![Event::WeaponWorn { name: name.clone(), durability: *durability }];
        if *durability == 0 {
            let name = name.clone();
            // the attack bonus already granted stays with the player
            self.player.unequip(&name);
            debug!(target: "adventure", weapon = %name, "weapon broke");
            events.push(Event::WeaponBroke { name });
        }
        events
    }

    /// Credits the bounty at most once per encounter, and only with `collect_bounty` on.
    fn pay_bounty(&mut self) -> Option<Event> {
        if self.bounty_paid || !self.options.collect_bounty {
            return None;
        }
        self.bounty_paid = true;
        self.player.gold = self.player.gold.saturating_add(self.monster.bounty);
        Some(Event::BountyCollected { amount: self.monster.bounty, gold: self.player.gold })
    }

    /// Pays the rest cost to recover health, capped at the max.
    pub fn rest(&mut self) -> Result<Event, ActionError> {
        self.ensure_active()?;
        let cost = self.rules.rest_cost;
        if self.player.gold < cost {
            return Err(ActionError::InsufficientGold { needed: cost, available: self.player.gold });
        }
        self.player.gold -= cost;
        let restored = self.player.heal(self.rules.rest_heal, self.rules.max_health);
        info!(target: "adventure", restored, health = self.player.health, gold = self.player.gold, "rested");
        Ok(Event::Rested { restored, health: self.player.health, gold: self.player.gold })
    }

    /// Items offered by the equip menu, in display order.
    pub fn equip_options(&self) -> Vec<&Item> {
        self.inventory
            .equipable_indices()
            .into_iter()
            .filter_map(|i| self.inventory.items().get(i))
            .collect()
    }

    /// Equips the `choice`-th (1-based) entry of [`GameState::equip_options`].
    ///
    /// Health items are drunk on the spot; weapons add their bonus to attack power.
    pub fn equip(&mut self, choice: usize) -> Result<Event, ActionError> {
        self.ensure_active()?;
        let indices = self.inventory.equipable_indices();
        let index = choice
            .checked_sub(1)
            .and_then(|i| indices.get(i).copied())
            .ok_or(ActionError::InvalidSelection { choice, max: indices.len() })?;
        let max_health = self.rules.max_health;

        let event = match self.inventory.get_mut(index) {
            Some(Item::HealthBoost { name, heal_restore, quantity }) => {
                if *quantity == 0 {
                    return Err(ActionError::ItemDepleted { name: name.clone() });
                }
                *quantity -= 1;
                let restored = self.player.heal(*heal_restore, max_health);
                self.player.equipped_items.push(name.clone());
                Event::Consumed { name: name.clone(), restored, health: self.player.health, left: *quantity }
            }
            Some(Item::Weapon { name, durability, attack_boost }) => {
                if *durability == 0 {
                    return Err(ActionError::WeaponBroken { name: name.clone() });
                }
                self.player.attack_power = self.player.attack_power.saturating_add(*attack_boost);
                self.player.equipped_items.push(name.clone());
                Event::WeaponEquipped { name: name.clone(), boost: *attack_boost, attack_power: self.player.attack_power }
            }
            Some(Item::Potion { name, .. }) => return Err(ActionError::NotEquipable { name: name.clone() }),
            None => return Err(ActionError::InvalidSelection { choice, max: indices.len() }),
        };
        info!(target: "adventure", %event, "equipped");
        Ok(event)
    }

    /// Drinks a potion to defeat the monster outright.
    pub fn use_potion(&mut self) -> Result<Vec<Event>, ActionError> {
        self.ensure_active()?;
        if !self.options.enable_potion {
            return Err(ActionError::PotionsDisabled);
        }
        self.ensure_monster_standing()?;
        let potion = match self.inventory.potion_mut() {
            Some(Item::Potion { name, quantity, .. }) if *quantity > 0 => {
                *quantity -= 1;
                name.clone()
            }
            _ => return Err(ActionError::NoPotions),
        };
        self.player.monster_defeated = true;
        info!(target: "adventure", monster = %self.monster.name, "potion used");

        let mut events = vec![Event::PotionUsed { potion, monster: self.monster.name.clone() }];
        events.extend(self.pay_bounty());
        Ok(events)
    }

    pub fn shop_listings(&self) -> &[ShopListing] { &self.rules.shop }

    /// Buys `quantity` of the `choice`-th (1-based) shop listing.
    pub fn buy(&mut self, choice: usize, quantity: u32) -> Result<Event, ActionError> {
        self.ensure_active()?;
        if !self.options.enable_shop {
            return Err(ActionError::ShopClosed);
        }
        let listing = choice
            .checked_sub(1)
            .and_then(|i| self.rules.shop.get(i))
            .cloned()
            .ok_or(ActionError::InvalidSelection { choice, max: self.rules.shop.len() })?;

        let stock = match self.inventory.find_mut(&listing.item_name) {
            Some(Item::HealthBoost { quantity, .. }) | Some(Item::Potion { quantity, .. }) => quantity,
            _ => return Err(ActionError::NotStockable { name: listing.item_name }),
        };
        let purchase = purchase_item(i64::from(listing.price), i64::from(self.player.gold), quantity)?;
        let gold = u32::try_from(purchase.leftover).unwrap_or(0);
        let spent = self.player.gold - gold;

        *stock = stock.saturating_add(purchase.purchased);
        self.player.gold = gold;
        info!(target: "adventure", item = %listing.item_name, quantity, spent, "purchased");
        Ok(Event::Purchased { name: listing.item_name, quantity: purchase.purchased, spent, gold })
    }

    pub fn quit(&mut self) -> Event {
        if self.status == SessionStatus::Active {
            self.status = SessionStatus::Quit;
        }
        info!(target: "adventure", status = ?self.status, "session ended");
        Event::Farewell
    }
}
