//! Adversary pool & spawn director
//!
//! Фиксированный пул слотов: entities создаются один раз при добавлении
//! plugin'а и переиспользуются — деспавна нет вообще. Спавн-волны приходят
//! событиями; director пополняет арену когда живых не осталось, размер
//! волны масштабируется счётом игрока.

use bevy::prelude::*;

pub mod pool;

// Re-export основных типов
pub use pool::{process_spawn_waves, replenish_population, AdversaryPool, SpawnWave};

use crate::components::{Adversary, AdversaryArchetype, AdversaryStats, Health};
use crate::ai::AIState;
use crate::SimSet;

/// Adversary Plugin
///
/// Строит пул при добавлении (до первого тика — слоты видны тестам сразу).
/// Системы в set `SimSet::Spawn`:
/// 1. process_spawn_waves — активация слотов по SpawnWave событиям
/// 2. replenish_population — волна респавна при пустой арене
pub struct AdversaryPlugin;

impl Plugin for AdversaryPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SpawnWave>();
        app.init_resource::<AdversaryArchetype>();

        // Пул строится на месте: capacity слотов, все свободны
        // (active=false, health=0, Dead)
        let archetype = app.world().resource::<AdversaryArchetype>().clone();
        let mut slots = Vec::with_capacity(archetype.pool_capacity);
        for slot in 0..archetype.pool_capacity {
            let entity = app
                .world_mut()
                .spawn((
                    Adversary {
                        slot: slot as u8,
                        active: false,
                    },
                    Health {
                        current: 0,
                        max: archetype.max_health,
                    },
                    AdversaryStats::baseline(&archetype),
                    AIState::Dead,
                    Transform::default(),
                ))
                .id();
            slots.push(entity);
        }
        app.insert_resource(AdversaryPool { slots });

        app.add_systems(
            FixedUpdate,
            (process_spawn_waves, replenish_population)
                .chain()
                .in_set(SimSet::Spawn),
        );
    }
}
