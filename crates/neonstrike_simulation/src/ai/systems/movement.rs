//! AI movement от FSM state
//!
//! Движение по прямой (без pathfinding), horizontal plane only.
//! Facing — yaw-only поворот к цели, никакого pitch.

use bevy::prelude::*;

use crate::ai::AIState;
use crate::components::{Adversary, AdversaryArchetype, AdversaryStats, PlayerState};

/// Yaw-only поворот к цели (горизонтальная проекция направления)
pub fn face_toward(transform: &mut Transform, target: Vec3) {
    let mut direction = target - transform.translation;
    direction.y = 0.0;

    if direction.length_squared() > 1e-6 {
        let yaw = direction.x.atan2(direction.z);
        transform.rotation = Quat::from_rotation_y(yaw);
    }
}

/// Система: движение противников по текущему state
///
/// - Patrol: к patrol-точке со скоростью `speed · Δt`
/// - Chase: к игроку со скоростью `chase_speed_factor · speed · Δt`
/// - Attack: стоим, только facing на игрока
pub fn ai_movement_from_state(
    mut adversaries: Query<(&Adversary, &AdversaryStats, &AIState, &mut Transform)>,
    archetype: Res<AdversaryArchetype>,
    player: Res<PlayerState>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (adversary, stats, state, mut transform) in adversaries.iter_mut() {
        if !adversary.active {
            continue;
        }

        match state {
            AIState::Patrol { target, .. } => {
                let mut direction = *target - transform.translation;
                direction.y = 0.0;

                if direction.length() > archetype.patrol_arrive_radius {
                    let step = direction.normalize_or_zero() * stats.speed * delta;
                    transform.translation += step;
                    face_toward(&mut transform, *target);
                }
                // В радиусе прибытия стоим — retarget сделает fsm transition
            }

            AIState::Chase => {
                let mut direction = player.position - transform.translation;
                direction.y = 0.0;
                // Chase быстрее патруля
                let step = direction.normalize_or_zero()
                    * stats.speed
                    * archetype.chase_speed_factor
                    * delta;
                transform.translation += step;
                face_toward(&mut transform, player.position);
            }

            AIState::Attack => {
                face_toward(&mut transform, player.position);
            }

            AIState::Dead => {}
        }
    }
}
