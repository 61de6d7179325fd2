//! NEONSTRIKE Simulation Core
//!
//! ECS-симуляция арены на Bevy 0.16 (strategic layer).
//!
//! Архитектура:
//! - ECS = simulation core (pool противников, AI FSM, damage arbitration,
//!   loadout/fire control, player ledger)
//! - Презентация (рендер, звук, particles, HUD-отрисовка, input) — внешние
//!   collaborators: читают события + опубликованные снапшоты, пишут только
//!   интенты и позицию игрока
//!
//! Тик детерминирован: фиксированный порядок set'ов, seeded RNG, все
//! таймеры — tick-relative countdown'ы. Драйвер продвигает время явной Δt
//! через `step_simulation`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod adversary;
pub mod ai;
pub mod arsenal;
pub mod combat;
pub mod components;
pub mod hud;
pub mod loadout;
pub mod logger;

// Re-export базовых типов для удобства
pub use adversary::{AdversaryPlugin, AdversaryPool, SpawnWave};
pub use ai::{AIPlugin, AIState, AIStateKind, AttackPulse};
pub use arsenal::{
    Arsenal, AttachmentId, AttachmentModifier, SkinDefinition, SkinId, WeaponId, WeaponProfile,
};
pub use combat::{
    damage_tint, AdversaryDamaged, AdversaryKilled, CombatPlugin, HitReport, PlayerDefeated,
    KILL_SCORE,
};
pub use components::*;
pub use hud::{
    weapon_stat_bars, AdversarySnapshot, AdversarySnapshots, HealthBand, HudState, WeaponStatBars,
};
pub use loadout::{
    FireIntent, LoadoutPlugin, LoadoutState, MuzzleFlash, ReloadCompleted, ReloadIntent,
    ReloadStarted, SelectWeaponIntent, SetSkinIntent, ShotFired, SkinChanged,
    ToggleAttachmentIntent, WeaponSelected,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger};

/// Порядок set'ов внутри одного тика
///
/// Chained: AI transitions считаются ДО агрегации урона, поэтому
/// attack pulse этого тика виден этому же тику combat set'а.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// FSM transitions, движение, attack pulses
    Ai,
    /// Hit reports, kill-арбитраж, урон игроку
    Combat,
    /// Fire control + loadout интенты
    Loadout,
    /// Спавн-волны + respawn director
    Spawn,
    /// Публикация HUD/снапшотов для презентации
    Snapshot,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Fixed timestep 60Hz для simulation tick
        app.insert_resource(Time::<Fixed>::from_hz(60.0));

        // Детерминистичный RNG (только если драйвер не задал свой seed)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.init_resource::<PlayerState>();

        // Порядок тика: AI → Combat → Loadout → Spawn → Snapshot
        app.configure_sets(
            FixedUpdate,
            (
                SimSet::Ai,
                SimSet::Combat,
                SimSet::Loadout,
                SimSet::Spawn,
                SimSet::Snapshot,
            )
                .chain(),
        );

        // Подсистемы
        app.add_plugins((AdversaryPlugin, AIPlugin, CombatPlugin, LoadoutPlugin));

        // HUD feed + снапшоты для презентационного слоя
        app.init_resource::<HudState>();
        app.init_resource::<AdversarySnapshots>();
        app.add_systems(
            FixedUpdate,
            (hud::refresh_hud, hud::publish_snapshots)
                .chain()
                .in_set(SimSet::Snapshot),
        );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0));

    app
}

/// Продвигает симуляцию на один тик с явной Δt
///
/// Драйвер владеет временем: никакого wall-clock внутри. Таймеры и
/// движение видят ровно `dt`, поэтому timing-тесты точны.
pub fn step_simulation(app: &mut App, dt: Duration) {
    app.world_mut()
        .resource_mut::<Time<Fixed>>()
        .advance_by(dt);
    app.world_mut().run_schedule(FixedUpdate);
}

/// Snapshot мира для сравнения детерминизма
///
/// Компоненты сортируются по Entity ID и сериализуются через Debug —
/// два прогона с одним seed обязаны дать идентичные байты.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
