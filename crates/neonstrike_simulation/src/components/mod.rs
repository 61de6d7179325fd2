//! ECS components и shared resources симуляции
//!
//! Организация по доменам:
//! - adversary: записи противников (Adversary, Health, AdversaryStats, AdversaryArchetype)
//! - player: player ledger (PlayerState — позиция от драйвера, health, score)

pub mod adversary;
pub mod player;

// Re-exports для удобного импорта
pub use adversary::*;
pub use player::*;
