//! Arsenal — статические таблицы оружия, обвесов и скинов
//!
//! # Архитектура
//!
//! **WeaponProfile** — immutable blueprint оружия (damage, fire rate, ammo):
//! - Хранится в `Arsenal` resource (HashMap lookup)
//! - Создаются hardcoded в `Arsenal::default()` (позже из RON)
//!
//! **AttachmentModifier** — аддитивные дельты к числовым полям profile:
//! - Композиция чисто аддитивная → порядок equip не важен
//! - Поля без дельты остаются нетронутыми (нулевая дельта)
//!
//! **SkinDefinition** — косметика (имя + цвет для weapon model)
//!
//! `effective_stats` всегда аллоцирует свежий profile — базовые таблицы
//! никогда не мутируются.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// ============================================================================
// Ids
// ============================================================================

/// Weapon identifier (unique string ID, например "assault")
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeaponId(pub String);

impl From<&str> for WeaponId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Attachment identifier ("scope", "silencer", ...)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachmentId(pub String);

impl From<&str> for AttachmentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Skin identifier ("gold", "neon", ...)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkinId(pub String);

impl From<&str> for SkinId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ============================================================================
// WeaponProfile
// ============================================================================

/// Static weapon blueprint (immutable)
///
/// Runtime state (ammo, timers) живёт в `LoadoutState`, не здесь.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeaponProfile {
    /// Display name для HUD
    pub name: String,
    /// Урон за попадание
    pub damage: f32,
    /// Скорострельность (rounds per minute)
    pub fire_rate: f32,
    /// Точность (0.0 - 1.0)
    pub accuracy: f32,
    /// Дальность (метры)
    pub range: f32,
    /// Отдача (camera kick magnitude)
    pub recoil: f32,
    /// Размер магазина
    pub magazine_size: u32,
    /// Запас патронов (reserve)
    pub reserve_capacity: u32,
    /// Время перезарядки (секунды)
    pub reload_duration: f32,
}

impl WeaponProfile {
    /// Минимальный интервал между выстрелами (секунды)
    ///
    /// RPM → интервал; fire_rate защищён от нуля, чтобы обвесы
    /// не могли выключить оружие делением на ноль.
    pub fn shot_interval(&self) -> f32 {
        60.0 / self.fire_rate.max(1.0)
    }

    /// Урон, округлённый для hit report (floor на нуле)
    pub fn damage_per_hit(&self) -> u32 {
        self.damage.max(0.0).round() as u32
    }
}

// ============================================================================
// AttachmentModifier
// ============================================================================

/// Аддитивные дельты обвеса (signed, default 0.0)
///
/// Поля соответствуют числовым полям `WeaponProfile`; обвес, который
/// не трогает поле, оставляет нулевую дельту.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AttachmentModifier {
    /// Display name для UI
    pub name: String,
    pub damage: f32,
    pub fire_rate: f32,
    pub accuracy: f32,
    pub range: f32,
    pub recoil: f32,
}

// ============================================================================
// SkinDefinition
// ============================================================================

/// Skin (косметика weapon model)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SkinDefinition {
    /// Display name для UI
    pub name: String,
    /// Linear RGB цвет weapon model
    pub color: [f32; 3],
}

/// Hex color → linear RGB triple (для hardcoded таблиц)
fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

// ============================================================================
// Arsenal (Resource)
// ============================================================================

/// Lookup-таблицы оружия/обвесов/скинов (resource)
///
/// Создаётся один раз при запуске. Все getters существование-проверяющие:
/// неизвестный id → `None`, никаких паник.
#[derive(Resource, Clone, Debug)]
pub struct Arsenal {
    weapons: HashMap<WeaponId, WeaponProfile>,
    attachments: HashMap<AttachmentId, AttachmentModifier>,
    skins: HashMap<SkinId, SkinDefinition>,
}

impl Arsenal {
    /// Пустой registry
    pub fn new() -> Self {
        Self {
            weapons: HashMap::new(),
            attachments: HashMap::new(),
            skins: HashMap::new(),
        }
    }

    pub fn add_weapon(&mut self, id: impl Into<WeaponId>, profile: WeaponProfile) {
        self.weapons.insert(id.into(), profile);
    }

    pub fn add_attachment(&mut self, id: impl Into<AttachmentId>, modifier: AttachmentModifier) {
        self.attachments.insert(id.into(), modifier);
    }

    pub fn add_skin(&mut self, id: impl Into<SkinId>, skin: SkinDefinition) {
        self.skins.insert(id.into(), skin);
    }

    pub fn weapon(&self, id: &WeaponId) -> Option<&WeaponProfile> {
        self.weapons.get(id)
    }

    pub fn attachment(&self, id: &AttachmentId) -> Option<&AttachmentModifier> {
        self.attachments.get(id)
    }

    pub fn skin(&self, id: &SkinId) -> Option<&SkinDefinition> {
        self.skins.get(id)
    }

    /// Effective stats: базовый profile + дельты всех equipped обвесов
    ///
    /// Композиция аддитивная и порядко-независимая (attachments — set).
    /// Суммируем в отсортированном по id порядке: f32-сложение
    /// не ассоциативно, а результат обязан не зависеть от порядка equip.
    /// Неизвестные attachment ids пропускаются. Возвращает свежий profile,
    /// базовая таблица не мутируется. `None` если weapon id неизвестен.
    pub fn effective_stats(
        &self,
        weapon: &WeaponId,
        attachments: &HashSet<AttachmentId>,
    ) -> Option<WeaponProfile> {
        let mut stats = self.weapons.get(weapon)?.clone();

        let mut ids: Vec<&AttachmentId> = attachments.iter().collect();
        ids.sort_by(|a, b| a.0.cmp(&b.0));

        for id in ids {
            let Some(modifier) = self.attachments.get(id) else {
                continue; // Неизвестный обвес — defensive skip
            };
            stats.damage += modifier.damage;
            stats.fire_rate += modifier.fire_rate;
            stats.accuracy += modifier.accuracy;
            stats.range += modifier.range;
            stats.recoil += modifier.recoil;
        }

        Some(stats)
    }
}

impl Default for Arsenal {
    /// Hardcoded таблицы (стартовый арсенал)
    fn default() -> Self {
        let mut arsenal = Self::new();

        // === WEAPONS ===

        arsenal.add_weapon(
            "assault",
            WeaponProfile {
                name: "Assault Rifle".to_string(),
                damage: 25.0,
                fire_rate: 600.0,
                accuracy: 0.85,
                range: 50.0,
                recoil: 0.02,
                magazine_size: 30,
                reserve_capacity: 90,
                reload_duration: 2.5,
            },
        );

        arsenal.add_weapon(
            "sniper",
            WeaponProfile {
                name: "Sniper Rifle".to_string(),
                damage: 80.0,
                fire_rate: 60.0,
                accuracy: 0.98,
                range: 100.0,
                recoil: 0.08,
                magazine_size: 5,
                reserve_capacity: 20,
                reload_duration: 3.5,
            },
        );

        arsenal.add_weapon(
            "shotgun",
            WeaponProfile {
                name: "Shotgun".to_string(),
                damage: 60.0,
                fire_rate: 120.0,
                accuracy: 0.6,
                range: 20.0,
                recoil: 0.12,
                magazine_size: 8,
                reserve_capacity: 32,
                reload_duration: 4.0,
            },
        );

        // === ATTACHMENTS ===

        arsenal.add_attachment(
            "scope",
            AttachmentModifier {
                name: "Scope".to_string(),
                accuracy: 0.15,
                range: 10.0,
                ..Default::default()
            },
        );

        arsenal.add_attachment(
            "silencer",
            AttachmentModifier {
                name: "Silencer".to_string(),
                damage: -5.0,
                accuracy: 0.1,
                ..Default::default()
            },
        );

        arsenal.add_attachment(
            "grip",
            AttachmentModifier {
                name: "Grip".to_string(),
                recoil: -0.01,
                accuracy: 0.05,
                ..Default::default()
            },
        );

        arsenal.add_attachment(
            "laser",
            AttachmentModifier {
                name: "Laser".to_string(),
                accuracy: 0.08,
                ..Default::default()
            },
        );

        arsenal.add_attachment(
            "flashlight",
            AttachmentModifier {
                name: "Flashlight".to_string(),
                range: 5.0,
                ..Default::default()
            },
        );

        arsenal.add_attachment(
            "bipod",
            AttachmentModifier {
                name: "Bipod".to_string(),
                recoil: -0.02,
                accuracy: 0.12,
                ..Default::default()
            },
        );

        // === SKINS ===

        arsenal.add_skin(
            "default",
            SkinDefinition {
                name: "Default".to_string(),
                color: rgb(0x444444),
            },
        );
        arsenal.add_skin(
            "camo",
            SkinDefinition {
                name: "Camo".to_string(),
                color: rgb(0x4a5d23),
            },
        );
        arsenal.add_skin(
            "gold",
            SkinDefinition {
                name: "Gold".to_string(),
                color: rgb(0xffd700),
            },
        );
        arsenal.add_skin(
            "neon",
            SkinDefinition {
                name: "Neon".to_string(),
                color: rgb(0x00ffff),
            },
        );
        arsenal.add_skin(
            "carbon",
            SkinDefinition {
                name: "Carbon Fiber".to_string(),
                color: rgb(0x1a1a1a),
            },
        );
        arsenal.add_skin(
            "chrome",
            SkinDefinition {
                name: "Chrome".to_string(),
                color: rgb(0xc0c0c0),
            },
        );

        arsenal
    }
}

// ============================================================================
// Tests
// ============================================================================
