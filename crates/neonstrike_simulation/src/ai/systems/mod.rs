//! AI systems (FSM transitions, movement, attack pulses)

pub mod attack;
pub mod fsm;
pub mod movement;

// Re-export all systems
pub use attack::*;
pub use fsm::*;
pub use movement::*;
