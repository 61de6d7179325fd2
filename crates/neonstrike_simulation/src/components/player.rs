//! Player ledger — позиция, здоровье, счёт
//!
//! Позицию каждый тик пишет драйвер (input/camera collaborator);
//! симуляция её только читает. Health/score мутируются только внутри
//! simulation tick (single-writer).

use bevy::prelude::*;

/// Player state resource
#[derive(Resource, Debug, Clone)]
pub struct PlayerState {
    /// Позиция игрока (пишется драйвером перед тиком)
    pub position: Vec3,
    pub health: u32,
    pub max_health: u32,
    /// Счёт: +100 за kill, масштабирует respawn-волны
    pub score: u32,
    /// Latch: выставляется один раз когда health дошло до 0
    pub defeated: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.8, 5.0), // Стартовая точка арены (eye height)
            health: 100,
            max_health: 100,
            score: 0,
            defeated: false,
        }
    }
}

impl PlayerState {
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn award_kill(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Процент здоровья для HUD (0-100)
    pub fn health_percent(&self) -> u32 {
        if self.max_health == 0 {
            return 0;
        }
        self.health * 100 / self.max_health
    }
}
