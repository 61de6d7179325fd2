//! LoadoutState — runtime состояние оружия в руках
//!
//! Инварианты:
//! - ammo поля клампятся на каждой мутации (u32 saturating)
//! - current + reserve никогда не превышают magazine + reserve_capacity,
//!   зафиксированные в момент выбора оружия
//! - максимум одна перезарядка в полёте (`reload` handle)

use bevy::prelude::*;
use std::collections::HashSet;

use crate::arsenal::{Arsenal, AttachmentId, SkinId, WeaponId, WeaponProfile};

/// Активный loadout игрока (resource, единственный экземпляр)
#[derive(Resource, Debug, Clone)]
pub struct LoadoutState {
    pub weapon: WeaponId,
    /// Set обвесов — дубликаты невозможны, порядок не важен
    pub attachments: HashSet<AttachmentId>,
    pub skin: SkinId,
    pub current_ammo: u32,
    pub reserve_ammo: u32,
    /// Countdown до следующего разрешённого выстрела (секунды)
    pub shot_timer: f32,
    /// Pending reload handle; `Some` ⇒ reloading. Отменяемый: смена
    /// оружия сбрасывает в `None`, завершение не применится к чужому
    /// магазину.
    pub reload: Option<Timer>,
}

impl LoadoutState {
    /// Loadout для конкретного оружия: полный магазин + полный запас
    pub fn for_weapon(id: impl Into<WeaponId>, profile: &WeaponProfile) -> Self {
        Self {
            weapon: id.into(),
            attachments: HashSet::new(),
            skin: "default".into(),
            current_ammo: profile.magazine_size,
            reserve_ammo: profile.reserve_capacity,
            shot_timer: 0.0,
            reload: None,
        }
    }

    /// Стартовый loadout (assault rifle из таблиц)
    pub fn initial(arsenal: &Arsenal) -> Self {
        let id: WeaponId = "assault".into();
        let profile = arsenal
            .weapon(&id)
            .expect("arsenal default tables must contain the assault rifle");
        Self::for_weapon(id.clone(), profile)
    }

    pub fn is_reloading(&self) -> bool {
        self.reload.is_some()
    }

    /// Можно ли стрелять прямо сейчас
    ///
    /// false при перезарядке или пустом магазине; иначе — по shot timer.
    pub fn can_shoot(&self) -> bool {
        if self.is_reloading() || self.current_ammo == 0 {
            return false;
        }
        self.shot_timer <= 0.0
    }

    /// Учесть выстрел: патрон + запуск межвыстрельного интервала
    pub fn register_shot(&mut self, interval: f32) {
        self.current_ammo = self.current_ammo.saturating_sub(1);
        self.shot_timer = interval;
    }

    /// Перелить патроны из запаса по завершению перезарядки
    ///
    /// Возвращает сколько патронов перелито.
    pub fn transfer_ammo(&mut self, magazine_size: u32) -> u32 {
        let needed = magazine_size.saturating_sub(self.current_ammo);
        let transferred = needed.min(self.reserve_ammo);
        self.current_ammo += transferred;
        self.reserve_ammo -= transferred;
        transferred
    }

    /// Equip обвеса; false если уже стоит (set semantics)
    pub fn equip_attachment(&mut self, id: AttachmentId) -> bool {
        self.attachments.insert(id)
    }

    /// Снять обвес; false если не стоял
    pub fn remove_attachment(&mut self, id: &AttachmentId) -> bool {
        self.attachments.remove(id)
    }

    /// Строка боезапаса для HUD: "<current>/<reserve>"
    pub fn ammo_display(&self) -> String {
        format!("{}/{}", self.current_ammo, self.reserve_ammo)
    }
}
