//! FSM AI components (state machine противника).

use bevy::prelude::*;

/// AI FSM состояния
///
/// Все таймеры — tick-relative countdown'ы (никаких wall-clock timestamps):
/// драйвер передаёт Δt явно, поэтому transitions воспроизводимы в тестах.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub enum AIState {
    /// Patrol — начальное состояние: случайные хопы вокруг текущей позиции
    Patrol {
        /// Текущая patrol-точка
        target: Vec3,
        /// Время до принудительной смены точки (секунды)
        retarget_timer: f32,
    },

    /// Chase — игрок в detection range, бежим напрямую (×1.5 скорости)
    Chase,

    /// Attack — игрок в melee range; pulses по attack cooldown
    Attack,

    /// Dead — терминальное, назначает только damage arbiter
    Dead,
}

impl Default for AIState {
    fn default() -> Self {
        // Нулевой таймер: первый же тик Patrol роллит настоящую точку
        Self::Patrol {
            target: Vec3::ZERO,
            retarget_timer: 0.0,
        }
    }
}

impl AIState {
    /// Лёгкий дискриминант для снапшотов/логов
    pub fn kind(&self) -> AIStateKind {
        match self {
            AIState::Patrol { .. } => AIStateKind::Patrol,
            AIState::Chase => AIStateKind::Chase,
            AIState::Attack => AIStateKind::Attack,
            AIState::Dead => AIStateKind::Dead,
        }
    }
}

/// Дискриминант AIState без payload (для снапшотов рендеру)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AIStateKind {
    Patrol,
    Chase,
    Attack,
    Dead,
}

impl AIStateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AIStateKind::Patrol => "patrol",
            AIStateKind::Chase => "chase",
            AIStateKind::Attack => "attack",
            AIStateKind::Dead => "dead",
        }
    }
}
