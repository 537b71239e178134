use serde::{Deserialize, Serialize};

use super::events::Event;
use super::models::{Monster, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome { Victory, Defeat, Fled }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FightChoice { Continue, Flee }

/// Watches a fight as it happens and decides whether to keep going.
pub trait CombatObserver {
    fn on_event(&mut self, event: &Event);

    /// Asked after every exchange both sides survived. Only consulted when fleeing is allowed.
    fn choose(&mut self, _player: &Player, _monster: &Monster) -> FightChoice {
        FightChoice::Continue
    }
}

/// Never flees and ignores the blow-by-blow.
#[derive(Debug, Clone, Copy, Default)]
pub struct Relentless;

impl CombatObserver for Relentless {
    fn on_event(&mut self, _event: &Event) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatReport {
    pub events: Vec<Event>,
    pub outcome: CombatOutcome,
}

/// Trades blows until one side drops to 0 (or the player flees).
///
/// The player always strikes first; a monster brought to 0 does not
/// counter-attack. Both health values are floored at 0.
pub fn resolve(
    player: &mut Player,
    monster: &mut Monster,
    allow_flee: bool,
    observer: &mut dyn CombatObserver,
) -> CombatReport {
    let mut events = Vec::new();
    let mut emit = |event: Event, observer: &mut dyn CombatObserver| {
        observer.on_event(&event);
        events.push(event);
    };

    let outcome = loop {
        if monster.is_slain() {
            break CombatOutcome::Victory;
        }
        if !player.is_alive() {
            break CombatOutcome::Defeat;
        }

        let dealt = player.attack_power;
        let monster_health = monster.take_damage(dealt);
        emit(
            Event::PlayerStrikes { monster: monster.name.clone(), damage: dealt, monster_health },
            observer,
        );
        if monster.is_slain() {
            break CombatOutcome::Victory;
        }

        let taken = monster.power;
        let player_health = player.take_damage(taken);
        emit(
            Event::MonsterStrikes { monster: monster.name.clone(), damage: taken, player_health },
            observer,
        );
        if !player.is_alive() {
            break CombatOutcome::Defeat;
        }

        if allow_flee && observer.choose(player, monster) == FightChoice::Flee {
            break CombatOutcome::Fled;
        }
    };

    CombatReport { events, outcome }
}
