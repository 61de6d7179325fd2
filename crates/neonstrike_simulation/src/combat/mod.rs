//! Combat module — damage arbitration
//!
//! ECS ответственность:
//! - Применение hit reports (от внешнего raycast collaborator) к health
//! - Kill-арбитраж: Dead state, освобождение слота, счёт
//! - Агрегация attack pulses в урон игроку
//!
//! Collaborator ответственность (вне crate):
//! - Raycast/hit-testing (камера → target handle + impact point)
//! - Визуальный tint, particles, звук — по событиям отсюда

use bevy::prelude::*;

pub mod damage;
pub mod player_damage;

// Re-export основных типов
pub use damage::{
    apply_hit_reports, damage_tint, AdversaryDamaged, AdversaryKilled, HitReport, KILL_SCORE,
};
pub use player_damage::{aggregate_player_damage, PlayerDefeated};

use crate::SimSet;

/// Combat Plugin
///
/// Порядок выполнения (после AI set — pulses этого тика уже в очереди):
/// 1. apply_hit_reports — урон от попаданий игрока, kill-арбитраж
/// 2. aggregate_player_damage — pulses → урон игроку (мёртвые уже отфильтрованы)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HitReport>()
            .add_event::<AdversaryDamaged>()
            .add_event::<AdversaryKilled>()
            .add_event::<PlayerDefeated>();

        app.add_systems(
            FixedUpdate,
            (apply_hit_reports, aggregate_player_damage)
                .chain()
                .in_set(SimSet::Combat),
        );
    }
}
