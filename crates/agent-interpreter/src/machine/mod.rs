//! Per-turn state machine.

mod events;
mod states;
mod transitions;

pub use events::TurnEvent;
pub use states::TurnState;
pub use transitions::{StateTransition, TransitionError, TurnMachine};
