//! Combat resolution for unit-vs-unit attacks
//!
//! One attack resolves through a fixed pipeline; every step changes the
//! math in an order-dependent way, so the order here is load-bearing:
//!
//! 1. Base damage each way = the opposing unit's attack value.
//! 2. Armor reduces the damage dealt *to* its carrier, floored at 0,
//!    unless the dealing side has Piercing. Evaluated per direction.
//! 3. First Strike on exactly one side applies that side's (post-armor)
//!    damage first; a lethal hit suppresses all return damage. Both or
//!    neither side: damage is simultaneous.
//! 4. Deadly: a side that dealt damage > 0 sets a surviving opponent's
//!    health to 0 after normal damage.
//! 5. The attacker loses its attack for the turn regardless of outcome.
//!
//! Battlefield cleanup (removal + Destroyed triggers) is the caller's
//! job; this module only mutates the two combatants.

use crate::core::CardInstance;
use crate::game::logger::GameLogger;

/// Guard legality for a unit target: while the defending side controls a
/// Guard unit, only Guard units are legal targets
pub fn guard_blocks_unit_target(defender_has_guard: bool, target: &CardInstance) -> bool {
    defender_has_guard && !target.has_guard()
}

/// Damage `dealer` inflicts on `receiver` after Armor/Piercing
fn damage_after_armor(dealer: &CardInstance, receiver: &CardInstance, log: &mut GameLogger) -> i32 {
    let armor = receiver.armor();
    if dealer.has_piercing() {
        if armor > 0 {
            log.log(format!("{} Piercing ignores Armor.", dealer.name));
        }
        return dealer.attack;
    }
    if armor > 0 {
        log.log(format!(
            "{} Armor reduces damage by {}.",
            receiver.name, armor
        ));
        (dealer.attack - armor).max(0)
    } else {
        dealer.attack
    }
}

fn apply_damage(unit: &mut CardInstance, amount: i32, log: &mut GameLogger) {
    unit.health -= amount;
    log.log(format!(
        "{} takes {} damage (HP: {}/{}).",
        unit.name, amount, unit.health, unit.max_health
    ));
}

/// Resolve one unit-vs-unit attack, mutating both combatants
///
/// Units may be left at health <= 0; the caller runs battlefield cleanup
/// afterwards.
pub fn resolve_unit_combat(
    attacker: &mut CardInstance,
    defender: &mut CardInstance,
    log: &mut GameLogger,
) {
    let dmg_to_defender = damage_after_armor(attacker, defender, log);
    let dmg_to_attacker = damage_after_armor(defender, attacker, log);

    let attacker_first = attacker.has_first_strike();
    let defender_first = defender.has_first_strike();

    // Whether each side actually applied its damage; a side removed by a
    // lethal first strike never deals, so its Deadly cannot fire
    let mut attacker_dealt = false;
    let mut defender_dealt = false;

    if attacker_first && !defender_first {
        log.log(format!("{} has First Strike!", attacker.name));
        apply_damage(defender, dmg_to_defender, log);
        attacker_dealt = true;
        if defender.health <= 0 {
            log.log(format!(
                "{} destroyed by First Strike before dealing damage!",
                defender.name
            ));
        } else {
            apply_damage(attacker, dmg_to_attacker, log);
            defender_dealt = true;
        }
    } else if defender_first && !attacker_first {
        log.log(format!("{} has First Strike!", defender.name));
        apply_damage(attacker, dmg_to_attacker, log);
        defender_dealt = true;
        if attacker.health <= 0 {
            log.log(format!(
                "{} destroyed by First Strike before dealing damage!",
                attacker.name
            ));
        } else {
            apply_damage(defender, dmg_to_defender, log);
            attacker_dealt = true;
        }
    } else {
        // Neither or both sides strike first: simultaneous damage
        apply_damage(defender, dmg_to_defender, log);
        apply_damage(attacker, dmg_to_attacker, log);
        attacker_dealt = true;
        defender_dealt = true;
    }

    if attacker.has_deadly() && attacker_dealt && dmg_to_defender > 0 && defender.health > 0 {
        log.log(format!(
            "{}'s Deadly trait destroys {}!",
            attacker.name, defender.name
        ));
        defender.health = 0;
    }
    if defender.has_deadly() && defender_dealt && dmg_to_attacker > 0 && attacker.health > 0 {
        log.log(format!(
            "{}'s Deadly trait destroys {}!",
            defender.name, attacker.name
        ));
        attacker.health = 0;
    }

    attacker.can_attack = false;
}
