//! Loadout events
//!
//! # Architecture
//!
//! **Intents** (input collaborator → ECS):
//! - `FireIntent` → выстрел, если fire control разрешает
//! - `ReloadIntent` → запуск перезарядки
//! - `SelectWeaponIntent` → смена оружия (отменяет pending reload!)
//! - `ToggleAttachmentIntent` → equip/unequip обвеса (set semantics)
//! - `SetSkinIntent` → косметика weapon model
//!
//! **Outcomes** (ECS → rendering/audio/UI collaborators, fire-and-forget):
//! - `ShotFired` / `MuzzleFlash` — camera kick + визуал выстрела
//! - `ReloadStarted` / `ReloadCompleted` — анимация/звук перезарядки
//! - `WeaponSelected` / `SkinChanged` — пересборка weapon model

use bevy::prelude::*;

use crate::arsenal::{AttachmentId, SkinId, WeaponId};

// ============================================================================
// Intents
// ============================================================================

/// Запрос на выстрел (обычно каждый кадр пока зажат trigger)
#[derive(Event, Debug, Clone)]
pub struct FireIntent;

/// Запрос на перезарядку
#[derive(Event, Debug, Clone)]
pub struct ReloadIntent;

/// Смена активного оружия
///
/// # Flow
/// 1. Существование id в таблицах (нет → логируемый no-op)
/// 2. Отмена pending reload handle
/// 3. Сброс ammo к magazine/reserve нового оружия
#[derive(Event, Debug, Clone)]
pub struct SelectWeaponIntent {
    pub weapon: WeaponId,
}

/// Toggle обвеса: equipped → снимаем, нет → ставим
#[derive(Event, Debug, Clone)]
pub struct ToggleAttachmentIntent {
    pub attachment: AttachmentId,
}

/// Смена скина weapon model
#[derive(Event, Debug, Clone)]
pub struct SetSkinIntent {
    pub skin: SkinId,
}

// ============================================================================
// Outcomes
// ============================================================================

/// Выстрел сделан; recoil — для camera kick collaborator
#[derive(Event, Debug, Clone)]
pub struct ShotFired {
    /// effective recoil × random[0.5, 1.0)
    pub recoil: f32,
}

/// Muzzle flash (позиция игрока; точную camera pose знает collaborator)
#[derive(Event, Debug, Clone)]
pub struct MuzzleFlash {
    pub position: Vec3,
}

/// Перезарядка запущена
#[derive(Event, Debug, Clone)]
pub struct ReloadStarted {
    /// Длительность (секунды) — для анимации
    pub duration: f32,
}

/// Перезарядка завершена, патроны перелиты
#[derive(Event, Debug, Clone)]
pub struct ReloadCompleted {
    pub current_ammo: u32,
    pub reserve_ammo: u32,
}

/// Оружие сменилось (пересборка weapon model + HUD)
#[derive(Event, Debug, Clone)]
pub struct WeaponSelected {
    pub weapon: WeaponId,
    pub name: String,
}

/// Скин сменился (перекраска weapon model)
#[derive(Event, Debug, Clone)]
pub struct SkinChanged {
    pub skin: SkinId,
    /// Linear RGB цвет из таблицы скинов
    pub color: Vec3,
}
