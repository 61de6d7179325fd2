//! Damage arbitration — hit reports от внешнего hit-test collaborator
//!
//! Контракт:
//! - Цель валидна только если active ∧ alive; иначе no-op
//! - health ≤ 0 → kill: alive=false, active=false, state=Dead, слот свободен
//! - Нелетальный урон всегда провоцирует: state=Chase
//! - Урон игроку здесь не считается — см. player_damage

use bevy::prelude::*;

use crate::ai::AIState;
use crate::components::{Adversary, Health, PlayerState};

/// Очки за убитого противника
pub const KILL_SCORE: u32 = 100;

// Tint blend для визуального damage feedback (linear RGB)
const DAMAGED_TINT: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const BASE_TINT: Vec3 = Vec3::new(0.4, 0.0, 0.0);

/// Event: попадание по противнику (от raycast collaborator)
#[derive(Event, Debug, Clone)]
pub struct HitReport {
    /// Target handle из hit-test результата
    pub target: Entity,
    /// Урон (обычно effective damage текущего оружия)
    pub amount: u32,
    /// Точка попадания (для particles)
    pub impact_point: Vec3,
}

/// Event: противник получил урон, но жив (для tint/звука)
#[derive(Event, Debug, Clone)]
pub struct AdversaryDamaged {
    pub slot: u8,
    /// clamp(health, 0, max) / max
    pub health_fraction: f32,
    /// Цвет модели: blend damaged→base пропорционально health_fraction
    pub tint: Vec3,
    pub impact_point: Vec3,
}

/// Event: противник убит (для particles/звука/счёта в UI)
#[derive(Event, Debug, Clone)]
pub struct AdversaryKilled {
    pub slot: u8,
    pub position: Vec3,
}

/// Tint модели противника по доле здоровья
///
/// fraction=1.0 → базовый цвет, fraction=0.0 → полностью "damaged" красный.
pub fn damage_tint(health_fraction: f32) -> Vec3 {
    DAMAGED_TINT.lerp(BASE_TINT, health_fraction.clamp(0.0, 1.0))
}

/// Система: применение hit reports
///
/// 1. Читаем HitReport события
/// 2. Валидируем цель (active ∧ alive), иначе no-op
/// 3. Применяем урон (saturating), шлём AdversaryDamaged
/// 4. health == 0 → kill: освобождаем слот, Dead, AdversaryKilled, +score
/// 5. Иначе — провоцируем: state=Chase
pub fn apply_hit_reports(
    mut hits: EventReader<HitReport>,
    mut adversaries: Query<(&mut Adversary, &mut Health, &Transform, &mut AIState)>,
    mut player: ResMut<PlayerState>,
    mut damaged_events: EventWriter<AdversaryDamaged>,
    mut killed_events: EventWriter<AdversaryKilled>,
) {
    for hit in hits.read() {
        let Ok((mut adversary, mut health, transform, mut state)) =
            adversaries.get_mut(hit.target)
        else {
            crate::log_warning(&format!(
                "Combat: hit report for unknown target {:?}",
                hit.target
            ));
            continue;
        };

        if !adversary.active || !health.is_alive() {
            // Слот свободен или труп — попадание в пустоту
            continue;
        }

        health.take_damage(hit.amount);
        let fraction = health.fraction();

        damaged_events.write(AdversaryDamaged {
            slot: adversary.slot,
            health_fraction: fraction,
            tint: damage_tint(fraction),
            impact_point: hit.impact_point,
        });

        if !health.is_alive() {
            // Kill: слот освобождается, запись остаётся для reuse
            adversary.active = false;
            *state = AIState::Dead;
            player.award_kill(KILL_SCORE);

            killed_events.write(AdversaryKilled {
                slot: adversary.slot,
                position: transform.translation,
            });

            crate::log_info(&format!(
                "Combat: slot {} killed (score {})",
                adversary.slot, player.score
            ));
        } else {
            // Нелетальный урон провоцирует агрессию из любого state
            *state = AIState::Chase;
        }
    }
}
