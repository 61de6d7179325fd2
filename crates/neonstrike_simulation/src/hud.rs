//! HUD feed & render snapshots
//!
//! Симуляция — single writer: презентационный слой не читает компоненты
//! напрямую, а забирает опубликованные в конце тика resources
//! (`HudState`, `AdversarySnapshots`). Отрисовка — дело collaborator'а.

use bevy::prelude::*;

use crate::ai::{AIState, AIStateKind};
use crate::arsenal::{Arsenal, WeaponProfile};
use crate::components::{Adversary, Health, PlayerState};
use crate::loadout::LoadoutState;

/// Цветовая зона индикатора здоровья игрока
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthBand {
    /// > 60%
    #[default]
    Good,
    /// 30-60%
    Caution,
    /// < 30%
    Critical,
}

impl HealthBand {
    pub fn from_percent(percent: u32) -> Self {
        if percent > 60 {
            HealthBand::Good
        } else if percent >= 30 {
            HealthBand::Caution
        } else {
            HealthBand::Critical
        }
    }
}

/// Готовые значения для HUD (обновляется каждый тик)
#[derive(Resource, Debug, Clone, Default)]
pub struct HudState {
    /// "<current>/<reserve>"
    pub ammo: String,
    pub weapon_name: String,
    pub adversaries_alive: usize,
    pub health_percent: u32,
    pub health_band: HealthBand,
    pub score: u32,
}

/// Снапшот одного активного противника для рендера
#[derive(Debug, Clone)]
pub struct AdversarySnapshot {
    pub slot: u8,
    pub position: Vec3,
    /// Yaw (радианы) — facing всегда горизонтальный
    pub yaw: f32,
    pub health_fraction: f32,
    pub state: AIStateKind,
}

/// Снапшоты активных противников, опубликованные в конце тика
#[derive(Resource, Debug, Clone, Default)]
pub struct AdversarySnapshots(pub Vec<AdversarySnapshot>);

/// Проценты stat-баров для экрана кастомизации (0-100)
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponStatBars {
    pub damage: f32,
    pub accuracy: f32,
    pub fire_rate: f32,
    pub range: f32,
}

/// Stat-бары по effective profile; шкалы капятся на 100%
pub fn weapon_stat_bars(profile: &WeaponProfile) -> WeaponStatBars {
    WeaponStatBars {
        damage: profile.damage.clamp(0.0, 100.0),
        accuracy: (profile.accuracy * 100.0).clamp(0.0, 100.0),
        fire_rate: (profile.fire_rate / 800.0 * 100.0).clamp(0.0, 100.0),
        range: profile.range.clamp(0.0, 100.0),
    }
}

/// Система: обновление HudState
pub fn refresh_hud(
    mut hud: ResMut<HudState>,
    loadout: Res<LoadoutState>,
    arsenal: Res<Arsenal>,
    player: Res<PlayerState>,
    adversaries: Query<(&Adversary, &Health)>,
) {
    hud.ammo = loadout.ammo_display();
    hud.weapon_name = arsenal
        .weapon(&loadout.weapon)
        .map(|profile| profile.name.clone())
        .unwrap_or_default();
    hud.adversaries_alive = adversaries
        .iter()
        .filter(|(adversary, health)| adversary.active && health.is_alive())
        .count();
    hud.health_percent = player.health_percent();
    hud.health_band = HealthBand::from_percent(hud.health_percent);
    hud.score = player.score;
}

/// Система: публикация снапшотов активных противников
pub fn publish_snapshots(
    mut snapshots: ResMut<AdversarySnapshots>,
    adversaries: Query<(&Adversary, &Health, &Transform, &AIState)>,
) {
    snapshots.0.clear();
    for (adversary, health, transform, state) in adversaries.iter() {
        if !adversary.active || !health.is_alive() {
            continue;
        }
        let (yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
        snapshots.0.push(AdversarySnapshot {
            slot: adversary.slot,
            position: transform.translation,
            yaw,
            health_fraction: health.fraction(),
            state: state.kind(),
        });
    }
    // Стабильный порядок для рендера
    snapshots.0.sort_by_key(|snapshot| snapshot.slot);
}
