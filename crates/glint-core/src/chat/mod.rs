//! Conversation state machine.
//!
//! The store is an Elm-style reducer: the runtime calls
//! `update(state, event)` and executes the returned effects. All state
//! mutation happens inside the reducer; I/O happens only in the session
//! runtime that executes effects.

mod effects;
mod events;
mod state;
mod update;

pub use effects::ChatEffect;
pub use events::ChatEvent;
pub use state::{ConversationState, ImageData, Message, Role};
pub use update::update;
