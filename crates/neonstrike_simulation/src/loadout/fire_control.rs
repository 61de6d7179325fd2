//! Fire control — гейтинг выстрелов, перезарядка, loadout интенты
//!
//! Все таймеры tick-relative: shot timer — countdown, reload — bevy Timer,
//! продвигаемый явной Δt. Невалидные интенты — логируемые no-op'ы.

use bevy::prelude::*;
use rand::Rng;

use crate::arsenal::Arsenal;
use crate::components::PlayerState;
use crate::loadout::events::*;
use crate::loadout::LoadoutState;
use crate::DeterministicRng;

/// Система: тик таймеров fire control
///
/// 1. Countdown межвыстрельного интервала
/// 2. Прогресс перезарядки; по завершению — перелив патронов и сброс handle
pub fn tick_fire_control(
    mut loadout: ResMut<LoadoutState>,
    arsenal: Res<Arsenal>,
    time: Res<Time<Fixed>>,
    mut completed_events: EventWriter<ReloadCompleted>,
) {
    if loadout.shot_timer > 0.0 {
        loadout.shot_timer = (loadout.shot_timer - time.delta_secs()).max(0.0);
    }

    let Some(timer) = loadout.reload.as_mut() else {
        return;
    };
    timer.tick(time.delta());
    if !timer.finished() {
        return;
    }

    // Handle мог пережить смену оружия только если его забыли отменить;
    // select_weapon сбрасывает reload, так что magazine здесь всегда
    // принадлежит тому же оружию, для которого reload стартовал.
    loadout.reload = None;
    let Some(profile) = arsenal.weapon(&loadout.weapon) else {
        crate::log_error(&format!(
            "Loadout: reload finished for unknown weapon {:?}",
            loadout.weapon
        ));
        return;
    };
    let magazine_size = profile.magazine_size;
    let transferred = loadout.transfer_ammo(magazine_size);

    completed_events.write(ReloadCompleted {
        current_ammo: loadout.current_ammo,
        reserve_ammo: loadout.reserve_ammo,
    });
    crate::log(&format!(
        "Loadout: reload complete (+{} rounds, {})",
        transferred,
        loadout.ammo_display()
    ));
}

/// Система: смена оружия / toggle обвесов / смена скина
pub fn process_loadout_intents(
    mut select_intents: EventReader<SelectWeaponIntent>,
    mut attachment_intents: EventReader<ToggleAttachmentIntent>,
    mut skin_intents: EventReader<SetSkinIntent>,
    mut loadout: ResMut<LoadoutState>,
    arsenal: Res<Arsenal>,
    mut selected_events: EventWriter<WeaponSelected>,
    mut skin_events: EventWriter<SkinChanged>,
) {
    for intent in select_intents.read() {
        let Some(profile) = arsenal.weapon(&intent.weapon) else {
            crate::log_warning(&format!(
                "Loadout: unknown weapon {:?} ignored",
                intent.weapon
            ));
            continue;
        };

        // Отменяем pending reload ДО переключения: завершение не должно
        // долить магазин нового оружия
        if loadout.reload.take().is_some() {
            crate::log("Loadout: pending reload cancelled by weapon switch");
        }

        loadout.weapon = intent.weapon.clone();
        loadout.current_ammo = profile.magazine_size;
        loadout.reserve_ammo = profile.reserve_capacity;
        loadout.shot_timer = 0.0;

        selected_events.write(WeaponSelected {
            weapon: intent.weapon.clone(),
            name: profile.name.clone(),
        });
        crate::log_info(&format!("Loadout: selected {}", profile.name));
    }

    for intent in attachment_intents.read() {
        if arsenal.attachment(&intent.attachment).is_none() {
            crate::log_warning(&format!(
                "Loadout: unknown attachment {:?} ignored",
                intent.attachment
            ));
            continue;
        }

        if loadout.remove_attachment(&intent.attachment) {
            crate::log(&format!("Loadout: removed {:?}", intent.attachment));
        } else {
            loadout.equip_attachment(intent.attachment.clone());
            crate::log(&format!("Loadout: equipped {:?}", intent.attachment));
        }
    }

    for intent in skin_intents.read() {
        let Some(skin) = arsenal.skin(&intent.skin) else {
            crate::log_warning(&format!("Loadout: unknown skin {:?} ignored", intent.skin));
            continue;
        };

        loadout.skin = intent.skin.clone();
        skin_events.write(SkinChanged {
            skin: intent.skin.clone(),
            color: Vec3::from_array(skin.color),
        });
    }
}

/// Система: выстрелы
///
/// Гейт: не reloading, магазин не пуст, межвыстрельный интервал истёк.
/// Hit-testing здесь не делается — raycast collaborator репортит попадания
/// обратно через combat::HitReport.
pub fn process_fire_intents(
    mut intents: EventReader<FireIntent>,
    mut loadout: ResMut<LoadoutState>,
    arsenal: Res<Arsenal>,
    player: Res<PlayerState>,
    mut rng: ResMut<DeterministicRng>,
    mut shot_events: EventWriter<ShotFired>,
    mut flash_events: EventWriter<MuzzleFlash>,
) {
    for _ in intents.read() {
        if !loadout.can_shoot() {
            continue; // Тихий no-op: автоогонь шлёт интент каждый кадр
        }

        let Some(effective) = arsenal.effective_stats(&loadout.weapon, &loadout.attachments)
        else {
            crate::log_error(&format!(
                "Loadout: fire intent for unknown weapon {:?}",
                loadout.weapon
            ));
            continue;
        };

        loadout.register_shot(effective.shot_interval());

        // Recoil для camera kick collaborator
        let recoil = effective.recoil * rng.rng.gen_range(0.5..1.0);
        shot_events.write(ShotFired { recoil });
        flash_events.write(MuzzleFlash {
            position: player.position,
        });
    }
}

/// Система: запуск перезарядки
///
/// No-op (false-семантика) если уже reloading, магазин полон или запас
/// пуст. Иначе — one-shot Timer handle на LoadoutState.
pub fn process_reload_intents(
    mut intents: EventReader<ReloadIntent>,
    mut loadout: ResMut<LoadoutState>,
    arsenal: Res<Arsenal>,
    mut started_events: EventWriter<ReloadStarted>,
) {
    for _ in intents.read() {
        let Some(profile) = arsenal.weapon(&loadout.weapon) else {
            crate::log_error(&format!(
                "Loadout: reload intent for unknown weapon {:?}",
                loadout.weapon
            ));
            continue;
        };

        if loadout.is_reloading()
            || loadout.current_ammo == profile.magazine_size
            || loadout.reserve_ammo == 0
        {
            continue;
        }

        let Some(effective) = arsenal.effective_stats(&loadout.weapon, &loadout.attachments)
        else {
            continue;
        };

        loadout.reload = Some(Timer::from_seconds(
            effective.reload_duration,
            TimerMode::Once,
        ));
        started_events.write(ReloadStarted {
            duration: effective.reload_duration,
        });
        crate::log(&format!(
            "Loadout: reload started ({:.1}s, {})",
            effective.reload_duration,
            loadout.ammo_display()
        ));
    }
}
