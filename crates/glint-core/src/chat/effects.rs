//! Effect types.
//!
//! Effects are commands returned by the reducer that the session runtime
//! executes. They represent I/O and task spawning only, which keeps the
//! reducer pure: it mutates state and returns effects, never performs I/O.

use super::state::ImageData;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEffect {
    /// Invoke the completion call with a draft snapshot.
    ///
    /// Exactly one of these is in flight at a time; the reducer refuses
    /// `Send` while `is_loading` is set.
    Dispatch {
        text: String,
        image: Option<ImageData>,
    },

    /// Emit a one-shot, fire-and-forget notice for the presentation layer.
    /// Notices are not part of conversation state.
    Notify { message: String },
}
