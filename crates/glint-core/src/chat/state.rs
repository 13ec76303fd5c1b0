//! Conversation state types.

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// Raw image payload attached to a draft or message.
///
/// Bytes are kept as-is; base64 encoding happens at the provider boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// MIME type (e.g., "image/png", "image/jpeg")
    pub mime_type: String,
    /// Raw image bytes
    pub data: Vec<u8>,
}

/// A single conversation message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub image: Option<ImageData>,
}

impl Message {
    /// Creates a user message from a draft snapshot.
    pub fn user(text: impl Into<String>, image: Option<ImageData>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            image,
        }
    }

    /// Creates an assistant message from a reply. Replies carry no image.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            image: None,
        }
    }
}

/// Conversation state owned by the session runtime.
///
/// A single instance exists per session and is mutated only by the reducer,
/// so every transition is serialized through one owner.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    /// Messages, newest first.
    pub messages: Vec<Message>,
    /// Not-yet-sent input text.
    pub draft_text: String,
    /// Not-yet-sent image attachment.
    pub draft_image: Option<ImageData>,
    /// Text of the most recent assistant reply.
    pub last_reply: String,
    /// True exactly while a dispatched request is outstanding.
    pub is_loading: bool,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there is nothing to send.
    pub fn draft_is_empty(&self) -> bool {
        self.draft_text.trim().is_empty() && self.draft_image.is_none()
    }
}
