//! Агрегация attack pulses в урон игроку
//!
//! Pulse, выпущенный AI set'ом в этом тике, виден здесь же (sets chained) —
//! окно "атака только что случилась" равно ровно одному тику. Противник,
//! убитый apply_hit_reports раньше в этом тике, отфильтровывается.

use bevy::prelude::*;

use crate::ai::{AIState, AttackPulse};
use crate::components::{Adversary, AdversaryArchetype, Health, PlayerState};

/// Event: здоровье игрока дошло до нуля (game over для драйвера)
#[derive(Event, Debug, Clone)]
pub struct PlayerDefeated {
    pub final_score: u32,
}

/// Система: суммарный урон игроку за тик
///
/// Pulse засчитывается только если атакующий всё ещё:
/// active ∧ alive ∧ в Attack state ∧ в attack range от игрока.
pub fn aggregate_player_damage(
    mut pulses: EventReader<AttackPulse>,
    adversaries: Query<(&Adversary, &Health, &Transform, &AIState)>,
    archetype: Res<AdversaryArchetype>,
    mut player: ResMut<PlayerState>,
    mut defeated_events: EventWriter<PlayerDefeated>,
) {
    let mut total: u32 = 0;

    for pulse in pulses.read() {
        let Ok((adversary, health, transform, state)) = adversaries.get(pulse.adversary) else {
            continue;
        };

        if !adversary.active || !health.is_alive() {
            // Убит в этом же тике — pulse сгорает
            continue;
        }
        if !matches!(state, AIState::Attack) {
            continue;
        }
        if transform.translation.distance(player.position) >= archetype.attack_range {
            continue;
        }

        total = total.saturating_add(pulse.damage);
    }

    if total == 0 {
        return;
    }

    player.take_damage(total);
    crate::log(&format!(
        "Combat: player took {} damage (hp {})",
        total, player.health
    ));

    if player.health == 0 && !player.defeated {
        player.defeated = true;
        defeated_events.write(PlayerDefeated {
            final_score: player.score,
        });
        crate::log_info(&format!(
            "Combat: player defeated (final score {})",
            player.score
        ));
    }
}
