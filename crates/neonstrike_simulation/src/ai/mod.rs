//! AI decision-making module
//!
//! Per-adversary FSM: Patrol → Chase → Attack (+ terminal Dead).
//! Чистая функция от (state, player position, Δt); здоровье AI не трогает —
//! в Dead переводит только damage arbiter.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::{AIState, AIStateKind};
pub use events::AttackPulse;

use crate::SimSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate (set `SimSet::Ai`).
/// Порядок выполнения:
/// 1. ai_fsm_transitions — смена state по дистанции до игрока
/// 2. ai_movement_from_state — движение + yaw facing
/// 3. tick_attack_cooldowns — countdown cooldown таймеров
/// 4. ai_attack_pulses — генерация AttackPulse событий в Attack state
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AttackPulse>();

        app.add_systems(
            FixedUpdate,
            (
                systems::fsm::ai_fsm_transitions,
                systems::movement::ai_movement_from_state,
                systems::attack::tick_attack_cooldowns,
                systems::attack::ai_attack_pulses,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimSet::Ai),
        );
    }
}
