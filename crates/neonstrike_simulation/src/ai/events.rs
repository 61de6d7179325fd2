//! AI Events — исходящие события FSM
//!
//! AttackPulse — edge-событие "атака только что случилась". Damage arbiter
//! агрегирует pulses этого же тика (sets chained), так что окно видимости —
//! ровно один тик, без wall-clock эвристик.

use bevy::prelude::*;

/// Event: attack pulse противника (cooldown истёк в Attack state)
///
/// Сам по себе урона не наносит — агрегацию по дистанции/state делает
/// combat::aggregate_player_damage в этом же тике.
#[derive(Event, Debug, Clone)]
pub struct AttackPulse {
    /// Entity атакующего (для повторной валидации при агрегации)
    pub adversary: Entity,
    /// Stable slot id (для презентационного слоя)
    pub slot: u8,
    /// Урон pulse (per-instance, с jitter)
    pub damage: u32,
}
