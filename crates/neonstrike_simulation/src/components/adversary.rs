//! Базовые компоненты противников: Adversary, Health, AdversaryStats
//!
//! Запись противника — plain data на pool-слоте (arena + index):
//! слот создаётся один раз при старте, переиспользуется, никогда не
//! деспавнится. Рендер читает snapshot, не сами компоненты.

use bevy::prelude::*;

/// Противник — компонент pool-слота
///
/// `slot` — стабильный id слота (0..capacity), живёт дольше любого
/// конкретного противника. `active=false` вместе с нулевым health
/// означает что слот свободен для reuse.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct Adversary {
    /// Stable slot id (индекс в пуле)
    pub slot: u8,
    /// Участвует ли слот в симуляции
    pub active: bool,
}

/// Здоровье противника
///
/// Инвариант: 0 ≤ current ≤ max (saturating арифметика)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn restore_full(&mut self) {
        self.current = self.max;
    }

    /// Доля здоровья для visual feedback (0.0 - 1.0)
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

/// Per-instance характеристики противника
///
/// speed/damage — baseline ± jitter, роллятся при спавне.
/// `attack_timer` — countdown между attack pulses; персистит через
/// смены state (выход из Attack не сбрасывает cooldown).
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct AdversaryStats {
    /// Скорость патруля (м/с); chase быстрее в chase_speed_factor раз
    pub speed: f32,
    /// Урон одного attack pulse
    pub damage: u32,
    /// Текущий cooldown timer (уменьшается до 0)
    pub attack_timer: f32,
}

impl Default for AdversaryStats {
    fn default() -> Self {
        Self::baseline(&AdversaryArchetype::default())
    }
}

impl AdversaryStats {
    /// Baseline stats без jitter (для inactive слотов)
    pub fn baseline(archetype: &AdversaryArchetype) -> Self {
        Self {
            speed: archetype.base_speed,
            damage: archetype.base_damage,
            attack_timer: 0.0,
        }
    }

    /// Может ли атаковать (cooldown == 0)
    pub fn can_attack(&self) -> bool {
        self.attack_timer <= 0.0
    }

    /// Пометить attack pulse (запустить cooldown)
    pub fn start_attack(&mut self, cooldown: f32) {
        self.attack_timer = cooldown;
    }
}

/// Baseline параметры противников + AI пороги (immutable config)
///
/// Один archetype на весь пул; per-instance разброс делает jitter при
/// спавне.
#[derive(Resource, Debug, Clone)]
pub struct AdversaryArchetype {
    /// Размер пула (слотов); спавн сверх capacity молча обрезается
    pub pool_capacity: usize,
    /// Max health
    pub max_health: u32,
    /// Базовая скорость патруля (м/с)
    pub base_speed: f32,
    /// Разброс скорости: speed = base + (r - 0.5) * speed_jitter
    pub speed_jitter: f32,
    /// Базовый урон attack pulse
    pub base_damage: u32,
    /// Разброс урона: damage = base + floor((r - 0.5) * damage_jitter)
    pub damage_jitter: f32,
    /// Радиус обнаружения игрока (метры)
    pub detection_range: f32,
    /// Радиус melee-атаки (метры)
    pub attack_range: f32,
    /// Cooldown между attack pulses (секунды)
    pub attack_cooldown: f32,
    /// Множитель скорости в Chase
    pub chase_speed_factor: f32,
    /// Потеря игрока: d > lose_interest_factor * detection_range
    pub lose_interest_factor: f32,
    /// Выход из Attack: d > disengage_factor * attack_range
    pub disengage_factor: f32,
    /// Радиус "дошли до patrol target"
    pub patrol_arrive_radius: f32,
    /// Дистанция patrol-хопа: [min, max)
    pub patrol_hop_min: f32,
    pub patrol_hop_max: f32,
    /// Интервал смены patrol target: [min, max) секунд
    pub patrol_interval_min: f32,
    pub patrol_interval_max: f32,
    /// Спавн-кольцо вокруг центра арены: [min, max) метров
    pub spawn_ring_min: f32,
    pub spawn_ring_max: f32,
}

impl Default for AdversaryArchetype {
    fn default() -> Self {
        Self {
            pool_capacity: 20,
            max_health: 100,
            base_speed: 2.0,
            speed_jitter: 0.5,
            base_damage: 15,
            damage_jitter: 10.0,
            detection_range: 25.0,
            attack_range: 3.0,
            attack_cooldown: 2.0,
            chase_speed_factor: 1.5,
            lose_interest_factor: 1.5,
            disengage_factor: 1.2,
            patrol_arrive_radius: 0.5,
            patrol_hop_min: 5.0,
            patrol_hop_max: 15.0,
            patrol_interval_min: 3.0,
            patrol_interval_max: 8.0,
            spawn_ring_min: 20.0,
            spawn_ring_max: 50.0,
        }
    }
}
