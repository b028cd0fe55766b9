//! Effect dispatch and battlefield cleanup
//!
//! Deploy effects fire synchronously when a Unit enters the battlefield.
//! Destroyed effects fire during cleanup, per player in battlefield
//! order, after that pass's casualties have been removed. Cleanup itself
//! is a fixed-point loop with an explicit pass cap so that chained
//! "damage everything on death" effects always terminate.

use crate::core::{DeployEffect, DestroyedEffect, InstanceId, TargetSelector};
use crate::game::state::MatchState;
use rand::Rng;

/// Upper bound on cleanup passes in one resolution
///
/// Far beyond any legitimate chain for two 40-card decks; hitting it
/// means a content loop, which is logged and cut off.
pub const MAX_CLEANUP_PASSES: u32 = 32;

impl MatchState {
    /// Fire the Deploy effect of a unit that just entered the battlefield
    pub(crate) fn dispatch_deploy_effect(&mut self, owner_idx: usize, source: InstanceId) {
        let Some(pos) = self.players[owner_idx].find_battlefield(source) else {
            return;
        };
        let Some(effect) = self.players[owner_idx].battlefield[pos].deploy_effect.clone() else {
            return;
        };
        let source_name = self.players[owner_idx].battlefield[pos].name.clone();

        match effect {
            DeployEffect::HealFriendly { amount, target } => {
                self.deploy_heal(owner_idx, source, &source_name, amount, target);
            }
            DeployEffect::ImproveUnit {
                attack,
                health,
                target,
            } => {
                self.deploy_improve(owner_idx, source, &source_name, attack, health, target);
            }
            DeployEffect::Unknown { kind } => {
                self.logger
                    .log(format!("Unknown deploy effect: {}", kind));
            }
        }
    }

    fn deploy_heal(
        &mut self,
        owner_idx: usize,
        source: InstanceId,
        source_name: &str,
        amount: i32,
        target: TargetSelector,
    ) {
        // Every current selector resolves to "another damaged friendly
        // unit"; the selector hook exists for future content.
        let _ = target;
        let healed = self.players[owner_idx]
            .battlefield
            .iter_mut()
            .find(|u| u.id != source && u.is_damaged())
            .map(|unit| {
                unit.health = (unit.health + amount).min(unit.max_health);
                (unit.name.clone(), unit.health, unit.max_health)
            });

        match healed {
            Some((name, health, max_health)) => {
                self.logger.log(format!(
                    "{} deployed, healing {} for {} HP ({}/{}).",
                    source_name, name, amount, health, max_health
                ));
            }
            None => {
                self.logger.log(format!(
                    "{} deployed, but no valid target found for healing.",
                    source_name
                ));
            }
        }
    }

    fn deploy_improve(
        &mut self,
        owner_idx: usize,
        source: InstanceId,
        source_name: &str,
        attack: i32,
        health: i32,
        target: TargetSelector,
    ) {
        let candidates: Vec<usize> = self.players[owner_idx]
            .battlefield
            .iter()
            .enumerate()
            .filter(|(_, u)| u.id != source)
            .filter(|(_, u)| match target {
                TargetSelector::RandomFriendlyVehicle => u.is_vehicle(),
                _ => true,
            })
            .map(|(i, _)| i)
            .collect();

        if candidates.is_empty() {
            self.logger.log(format!(
                "{} deployed, but no valid target found to improve.",
                source_name
            ));
            return;
        }

        let pick = candidates[self.rng.borrow_mut().gen_range(0..candidates.len())];
        let unit = &mut self.players[owner_idx].battlefield[pick];
        let mut buffs = Vec::new();
        if attack != 0 {
            unit.attack += attack;
            buffs.push(format!("+{} ATK", attack));
        }
        if health != 0 {
            // Permanent buff: current and maximum health both grow
            unit.health += health;
            unit.max_health += health;
            buffs.push(format!("+{} HP", health));
        }
        let name = unit.name.clone();
        self.logger.log(format!(
            "{} deployed, improving {} ({}).",
            source_name,
            name,
            buffs.join(", ")
        ));
    }

    /// Remove dead units and fire their Destroyed effects until the board
    /// settles
    ///
    /// Each pass: per player (in seat order), remove every unit at
    /// health <= 0, then fire those units' Destroyed effects in
    /// battlefield iteration order. Effects may create new casualties,
    /// which the next pass collects. A pass with no casualties is the
    /// fixed point.
    pub(crate) fn cleanup_battlefield(&mut self) {
        for _pass in 0..MAX_CLEANUP_PASSES {
            let mut any_casualties = false;

            for idx in 0..self.players.len() {
                let battlefield = std::mem::take(&mut self.players[idx].battlefield);
                let mut casualties = Vec::new();
                for unit in battlefield {
                    if unit.health <= 0 {
                        casualties.push(unit);
                    } else {
                        self.players[idx].battlefield.push(unit);
                    }
                }

                let owner_name = self.players[idx].name.clone();
                for unit in &casualties {
                    self.logger.log(format!(
                        "{} (owned by {}) was destroyed.",
                        unit.name, owner_name
                    ));
                }
                for unit in &casualties {
                    if let Some(effect) = unit.destroyed_effect.clone() {
                        self.logger.log(format!(
                            "Triggering Destroyed effect for {}...",
                            unit.name
                        ));
                        self.dispatch_destroyed_effect(&unit.name, effect);
                    }
                }
                any_casualties |= !casualties.is_empty();
            }

            if !any_casualties {
                return;
            }
        }
        self.logger.log(format!(
            "Battlefield cleanup stopped after {} passes; effect chain cut off.",
            MAX_CLEANUP_PASSES
        ));
    }

    fn dispatch_destroyed_effect(&mut self, source_name: &str, effect: DestroyedEffect) {
        match effect {
            DestroyedEffect::DamageAll { amount } => {
                self.logger.log(format!(
                    "{} detonates, dealing {} damage to all units.",
                    source_name, amount
                ));
                for idx in 0..self.players.len() {
                    let battlefield = &mut self.players[idx].battlefield;
                    let mut hits = Vec::with_capacity(battlefield.len());
                    for unit in battlefield.iter_mut() {
                        unit.health -= amount;
                        hits.push(format!(
                            "{} takes {} damage (HP: {}/{}).",
                            unit.name, amount, unit.health, unit.max_health
                        ));
                    }
                    for hit in hits {
                        self.logger.log_verbose(hit);
                    }
                }
                // Casualties are collected by the caller's next pass
            }
            DestroyedEffect::Unknown { kind } => {
                self.logger
                    .log(format!("Unknown destroyed effect: {}", kind));
            }
        }
    }
}
