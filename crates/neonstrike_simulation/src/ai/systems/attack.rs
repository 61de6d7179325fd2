//! AI attack execution
//!
//! Cooldown — countdown на AdversaryStats, персистит через смены state
//! (выход из Attack не обнуляет таймер, нельзя сбросить cooldown джуком
//! туда-обратно). Pulse — событие, урон агрегирует damage arbiter в этом
//! же тике.

use bevy::prelude::*;

use crate::ai::{AIState, AttackPulse};
use crate::components::{Adversary, AdversaryArchetype, AdversaryStats, Health};

/// Система: countdown attack cooldown таймеров
pub fn tick_attack_cooldowns(
    mut adversaries: Query<(&Adversary, &mut AdversaryStats)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (adversary, mut stats) in adversaries.iter_mut() {
        if !adversary.active {
            continue;
        }
        if stats.attack_timer > 0.0 {
            stats.attack_timer = (stats.attack_timer - delta).max(0.0);
        }
    }
}

/// Система: генерация AttackPulse в Attack state
///
/// Первый pulse после входа в Attack мгновенный (таймер стартует
/// истёкшим), дальше — каждые attack_cooldown секунд.
pub fn ai_attack_pulses(
    mut adversaries: Query<(Entity, &Adversary, &Health, &mut AdversaryStats, &AIState)>,
    archetype: Res<AdversaryArchetype>,
    mut pulses: EventWriter<AttackPulse>,
) {
    for (entity, adversary, health, mut stats, state) in adversaries.iter_mut() {
        if !adversary.active || !health.is_alive() {
            continue;
        }
        if !matches!(state, AIState::Attack) {
            continue;
        }

        if stats.can_attack() {
            stats.start_attack(archetype.attack_cooldown);
            pulses.write(AttackPulse {
                adversary: entity,
                slot: adversary.slot,
                damage: stats.damage,
            });
            crate::log(&format!(
                "AI: slot {} attack pulse ({} dmg)",
                adversary.slot, stats.damage
            ));
        }
    }
}
