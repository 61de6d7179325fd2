//! Loadout module — оружие в руках игрока
//!
//! # Архитектура
//!
//! **LoadoutState** — единственный активный loadout (resource):
//! weapon id + set обвесов + skin + ammo + таймеры.
//!
//! **Fire control** — гейтинг выстрелов по effective fire rate,
//! перезарядка как отменяемый Timer handle (смена оружия отменяет).
//!
//! **Intents** — все операции приходят событиями от input collaborator;
//! невалидные интенты — логируемые no-op'ы, не ошибки.

use bevy::prelude::*;

pub mod events;
pub mod fire_control;
pub mod state;

// Re-export основных типов
pub use events::{
    FireIntent, MuzzleFlash, ReloadCompleted, ReloadIntent, ReloadStarted, SelectWeaponIntent,
    SetSkinIntent, ShotFired, SkinChanged, ToggleAttachmentIntent, WeaponSelected,
};
pub use state::LoadoutState;

use crate::arsenal::Arsenal;
use crate::SimSet;

/// Loadout Plugin
///
/// Порядок выполнения:
/// 1. tick_fire_control — countdown shot timer, прогресс/завершение reload
/// 2. process_loadout_intents — select weapon / toggle attachment / skin
/// 3. process_fire_intents — выстрелы
/// 4. process_reload_intents — запуск перезарядки
pub struct LoadoutPlugin;

impl Plugin for LoadoutPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FireIntent>()
            .add_event::<ReloadIntent>()
            .add_event::<SelectWeaponIntent>()
            .add_event::<ToggleAttachmentIntent>()
            .add_event::<SetSkinIntent>()
            .add_event::<ShotFired>()
            .add_event::<MuzzleFlash>()
            .add_event::<ReloadStarted>()
            .add_event::<ReloadCompleted>()
            .add_event::<WeaponSelected>()
            .add_event::<SkinChanged>();

        // Таблицы должны существовать до построения LoadoutState
        app.init_resource::<Arsenal>();
        let loadout = {
            let arsenal = app.world().resource::<Arsenal>();
            LoadoutState::initial(arsenal)
        };
        app.insert_resource(loadout);

        app.add_systems(
            FixedUpdate,
            (
                fire_control::tick_fire_control,
                fire_control::process_loadout_intents,
                fire_control::process_fire_intents,
                fire_control::process_reload_intents,
            )
                .chain()
                .in_set(SimSet::Loadout),
        );
    }
}
