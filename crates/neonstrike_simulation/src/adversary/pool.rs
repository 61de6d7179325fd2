//! Pool activation + respawn director
//!
//! Контракт спавна: волна активирует до `count` свободных слотов, никогда
//! не превышая capacity — излишек молча обрезается, без ошибок. Активация
//! ресетит запись: полное здоровье, свежий jitter, Patrol, позиция на
//! спавн-кольце вокруг центра арены (не вокруг игрока).

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::ai::systems::fsm::fresh_patrol_state;
use crate::ai::AIState;
use crate::components::{Adversary, AdversaryArchetype, AdversaryStats, Health, PlayerState};
use crate::DeterministicRng;

/// Event: запрос спавн-волны
#[derive(Event, Debug, Clone)]
pub struct SpawnWave {
    pub count: usize,
}

/// Пул слотов (entities созданы при старте, порядок стабилен)
#[derive(Resource, Debug, Clone)]
pub struct AdversaryPool {
    pub slots: Vec<Entity>,
}

impl AdversaryPool {
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

/// Размер волны респавна: 5 базовых + 1 за каждую 1000 очков, максимум 10
pub fn wave_size(score: u32) -> usize {
    (5 + (score / 1000) as usize).min(10)
}

/// Позиция спавна: случайный угол, дистанция [ring_min, ring_max)
/// от центра арены — за пределами immediate player range
fn roll_spawn_position(archetype: &AdversaryArchetype, rng: &mut ChaCha8Rng) -> Vec3 {
    let angle = rng.gen::<f32>() * std::f32::consts::TAU;
    let distance = rng.gen_range(archetype.spawn_ring_min..archetype.spawn_ring_max);
    Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
}

/// Система: активация слотов по SpawnWave событиям
///
/// Слоты обходятся в порядке пула (стабильные id) — при одном seed волна
/// детерминированно занимает одни и те же слоты.
pub fn process_spawn_waves(
    mut waves: EventReader<SpawnWave>,
    pool: Res<AdversaryPool>,
    mut adversaries: Query<(
        &mut Adversary,
        &mut Health,
        &mut AdversaryStats,
        &mut AIState,
        &mut Transform,
    )>,
    archetype: Res<AdversaryArchetype>,
    mut rng: ResMut<DeterministicRng>,
) {
    for wave in waves.read() {
        let mut remaining = wave.count;
        let mut spawned = 0usize;

        for &entity in &pool.slots {
            if remaining == 0 {
                break;
            }
            let Ok((mut adversary, mut health, mut stats, mut state, mut transform)) =
                adversaries.get_mut(entity)
            else {
                continue;
            };
            if adversary.active {
                continue;
            }

            // Reset записи под нового противника
            adversary.active = true;
            health.restore_full();

            // Per-instance jitter вокруг baseline
            let speed_roll = rng.rng.gen::<f32>();
            let damage_roll = rng.rng.gen::<f32>();
            stats.speed = archetype.base_speed + (speed_roll - 0.5) * archetype.speed_jitter;
            stats.damage = (archetype.base_damage as i32
                + ((damage_roll - 0.5) * archetype.damage_jitter).floor() as i32)
                .max(0) as u32;
            stats.attack_timer = 0.0;

            transform.translation = roll_spawn_position(&archetype, &mut rng.rng);
            transform.rotation = Quat::IDENTITY;

            *state = fresh_patrol_state(transform.translation, &archetype, &mut rng.rng);

            remaining -= 1;
            spawned += 1;
        }

        if spawned > 0 {
            crate::log_info(&format!(
                "Spawn: wave of {} requested, {} activated",
                wave.count, spawned
            ));
        } else if wave.count > 0 {
            crate::log(&format!(
                "Spawn: wave of {} requested, pool exhausted",
                wave.count
            ));
        }
    }
}

/// Система: respawn director
///
/// Когда живых не осталось — новая волна, масштабируемая счётом.
/// Волна обрабатывается process_spawn_waves'ом на следующем тике;
/// повторный запрос не накапливается, потому что к моменту следующей
/// проверки арена уже заселена.
pub fn replenish_population(
    adversaries: Query<(&Adversary, &Health)>,
    player: Res<PlayerState>,
    mut waves: EventWriter<SpawnWave>,
) {
    let alive = adversaries
        .iter()
        .filter(|(adversary, health)| adversary.active && health.is_alive())
        .count();

    if alive == 0 {
        let count = wave_size(player.score);
        waves.write(SpawnWave { count });
        crate::log_info(&format!(
            "Spawn: arena empty, requesting wave of {} (score {})",
            count, player.score
        ));
    }
}
