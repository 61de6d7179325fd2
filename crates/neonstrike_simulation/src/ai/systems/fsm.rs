//! FSM AI transitions
//!
//! Переходы по дистанции до игрока (`d = distance(adversary, player)`):
//! - Patrol → Chase:  d < detection_range
//! - Chase → Patrol:  d > 1.5 × detection_range (потеряли игрока)
//! - Chase → Attack:  d < attack_range
//! - Attack → Chase:  d > 1.2 × attack_range (игрок вышел из melee)
//!
//! Здоровье transitions не трогают; Dead назначает только damage arbiter.

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::ai::AIState;
use crate::components::{Adversary, AdversaryArchetype, PlayerState};
use crate::DeterministicRng;

/// Новая patrol-точка: случайный угол, дистанция [hop_min, hop_max)
/// от текущей позиции (horizontal plane)
pub fn roll_patrol_target(
    origin: Vec3,
    archetype: &AdversaryArchetype,
    rng: &mut ChaCha8Rng,
) -> Vec3 {
    let angle = rng.gen::<f32>() * std::f32::consts::TAU;
    let distance = rng.gen_range(archetype.patrol_hop_min..archetype.patrol_hop_max);
    origin + Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
}

/// Свежий Patrol state: новая точка + случайный retarget-интервал
pub fn fresh_patrol_state(
    origin: Vec3,
    archetype: &AdversaryArchetype,
    rng: &mut ChaCha8Rng,
) -> AIState {
    AIState::Patrol {
        target: roll_patrol_target(origin, archetype, rng),
        retarget_timer: rng
            .gen_range(archetype.patrol_interval_min..archetype.patrol_interval_max),
    }
}

/// Система: AI FSM transitions
///
/// Обновляет AIState активных противников. Patrol self-transition ведёт
/// retarget countdown и роллит новую точку по прибытию или таймеру.
pub fn ai_fsm_transitions(
    mut adversaries: Query<(&Adversary, &Transform, &mut AIState)>,
    archetype: Res<AdversaryArchetype>,
    player: Res<PlayerState>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (adversary, transform, mut state) in adversaries.iter_mut() {
        if !adversary.active {
            continue;
        }

        let distance = transform.translation.distance(player.position);

        let new_state = match state.as_ref() {
            AIState::Dead => {
                // Терминальное — слот ждёт respawn
                continue;
            }

            AIState::Patrol { target, retarget_timer } => {
                if distance < archetype.detection_range {
                    crate::log(&format!(
                        "AI: slot {} Patrol → Chase (d={:.1})",
                        adversary.slot, distance
                    ));
                    AIState::Chase
                } else {
                    let mut to_target = *target - transform.translation;
                    to_target.y = 0.0;
                    let timer = *retarget_timer - delta;

                    if to_target.length() <= archetype.patrol_arrive_radius || timer <= 0.0 {
                        // Дошли или надоело — новая точка
                        fresh_patrol_state(transform.translation, &archetype, &mut rng.rng)
                    } else {
                        AIState::Patrol {
                            target: *target,
                            retarget_timer: timer,
                        }
                    }
                }
            }

            AIState::Chase => {
                if distance > archetype.lose_interest_factor * archetype.detection_range {
                    // Потеряли игрока — сразу новая patrol-точка
                    crate::log(&format!(
                        "AI: slot {} Chase → Patrol (lost player, d={:.1})",
                        adversary.slot, distance
                    ));
                    fresh_patrol_state(transform.translation, &archetype, &mut rng.rng)
                } else if distance < archetype.attack_range {
                    crate::log(&format!(
                        "AI: slot {} Chase → Attack (d={:.1})",
                        adversary.slot, distance
                    ));
                    AIState::Attack
                } else {
                    AIState::Chase
                }
            }

            AIState::Attack => {
                if distance > archetype.disengage_factor * archetype.attack_range {
                    AIState::Chase
                } else {
                    AIState::Attack
                }
            }
        };

        if *state != new_state {
            *state = new_state;
        }
    }
}
