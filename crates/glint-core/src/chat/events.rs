//! Conversation event types.
//!
//! Events are the only way state changes. UI input and dispatcher results
//! both re-enter the reducer through this enum.

use super::state::ImageData;

/// Events consumed by the conversation reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Draft text was edited. Replaces the draft text, nothing else.
    TextChanged { text: String },

    /// An image was attached to the draft. Replaces any previous attachment.
    ImageChanged { image: ImageData },

    /// Finalize the draft into a user message and dispatch the request.
    Send,

    /// The completion call returned text.
    ReplyReceived { text: String },

    /// The completion call failed. Carries a user-facing description.
    RequestFailed { message: String },
}
