//! Conversation reducer (update function).
//!
//! All state mutations happen here. The session runtime calls
//! `update(state, event)` and executes the returned effects.

use super::effects::ChatEffect;
use super::events::ChatEvent;
use super::state::{ConversationState, Message};

/// The reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the session runtime to execute.
pub fn update(state: &mut ConversationState, event: ChatEvent) -> Vec<ChatEffect> {
    match event {
        ChatEvent::TextChanged { text } => {
            state.draft_text = text;
            vec![]
        }
        ChatEvent::ImageChanged { image } => {
            state.draft_image = Some(image);
            vec![]
        }
        ChatEvent::Send => {
            if state.draft_is_empty() {
                return vec![];
            }
            if state.is_loading {
                // One outstanding request at a time; the user can resend
                // once the current request settles.
                tracing::debug!("send refused: request already in flight");
                return vec![];
            }

            let text = std::mem::take(&mut state.draft_text);
            let image = state.draft_image.take();

            state.messages.insert(0, Message::user(&text, image.clone()));
            state.is_loading = true;

            vec![ChatEffect::Dispatch { text, image }]
        }
        ChatEvent::ReplyReceived { text } => {
            state.messages.insert(0, Message::assistant(&text));
            state.last_reply = text;
            state.is_loading = false;
            vec![]
        }
        ChatEvent::RequestFailed { message } => {
            // History stays as it was after the user message was prepended;
            // no partial assistant message is appended.
            state.is_loading = false;
            vec![ChatEffect::Notify { message }]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::state::{ImageData, Role};

    fn png_blob() -> ImageData {
        ImageData {
            mime_type: "image/png".to_string(),
            data: vec![0x89, 0x50, 0x4E, 0x47],
        }
    }

    #[test]
    fn test_text_changed_last_write_wins() {
        let mut state = ConversationState::new();

        for text in ["H", "Hi", "Hi t", "Hi there"] {
            let effects = update(
                &mut state,
                ChatEvent::TextChanged {
                    text: text.to_string(),
                },
            );
            assert!(effects.is_empty());
        }

        assert_eq!(state.draft_text, "Hi there");
        assert!(state.messages.is_empty());
        assert!(!state.is_loading);
    }

    #[test]
    fn test_image_changed_replaces_attachment() {
        let mut state = ConversationState::new();

        update(&mut state, ChatEvent::ImageChanged { image: png_blob() });
        let jpeg = ImageData {
            mime_type: "image/jpeg".to_string(),
            data: vec![0xFF, 0xD8],
        };
        update(
            &mut state,
            ChatEvent::ImageChanged {
                image: jpeg.clone(),
            },
        );

        assert_eq!(state.draft_image, Some(jpeg));
        assert!(state.draft_text.is_empty());
    }

    #[test]
    fn test_send_snapshots_draft_and_dispatches() {
        let mut state = ConversationState::new();
        state.draft_text = "Hi".to_string();

        let effects = update(&mut state, ChatEvent::Send);

        assert_eq!(
            effects,
            vec![ChatEffect::Dispatch {
                text: "Hi".to_string(),
                image: None,
            }]
        );
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].role, Role::User);
        assert_eq!(state.messages[0].text, "Hi");
        assert!(state.messages[0].image.is_none());
        assert!(state.draft_text.is_empty());
        assert!(state.draft_image.is_none());
        assert!(state.is_loading);
    }

    #[test]
    fn test_send_with_image_dispatches_attachment() {
        let mut state = ConversationState::new();
        state.draft_text = "What is this?".to_string();
        state.draft_image = Some(png_blob());

        let effects = update(&mut state, ChatEvent::Send);

        assert_eq!(
            effects,
            vec![ChatEffect::Dispatch {
                text: "What is this?".to_string(),
                image: Some(png_blob()),
            }]
        );
        assert_eq!(state.messages[0].image, Some(png_blob()));
        assert!(state.draft_image.is_none());
    }

    #[test]
    fn test_send_with_empty_draft_is_noop() {
        let mut state = ConversationState::new();
        state.draft_text = "   ".to_string();

        let effects = update(&mut state, ChatEvent::Send);

        assert!(effects.is_empty());
        assert!(state.messages.is_empty());
        assert!(!state.is_loading);
    }

    #[test]
    fn test_send_while_loading_is_refused() {
        let mut state = ConversationState::new();
        state.draft_text = "first".to_string();
        update(&mut state, ChatEvent::Send);

        state.draft_text = "second".to_string();
        let effects = update(&mut state, ChatEvent::Send);

        assert!(effects.is_empty());
        assert_eq!(state.messages.len(), 1);
        // The refused draft is kept so the user can resend it later.
        assert_eq!(state.draft_text, "second");
        assert!(state.is_loading);
    }

    #[test]
    fn test_reply_prepends_assistant_message() {
        let mut state = ConversationState::new();
        state.draft_text = "Hi".to_string();
        update(&mut state, ChatEvent::Send);

        let effects = update(
            &mut state,
            ChatEvent::ReplyReceived {
                text: "Hello".to_string(),
            },
        );

        assert!(effects.is_empty());
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[0].role, Role::Assistant);
        assert_eq!(state.messages[0].text, "Hello");
        assert_eq!(state.messages[1].role, Role::User);
        assert_eq!(state.messages[1].text, "Hi");
        assert_eq!(state.last_reply, "Hello");
        assert!(!state.is_loading);
    }

    #[test]
    fn test_failure_keeps_history_and_notifies_once() {
        let mut state = ConversationState::new();
        state.draft_text = "Hi".to_string();
        update(&mut state, ChatEvent::Send);

        let effects = update(
            &mut state,
            ChatEvent::RequestFailed {
                message: "HTTP 500".to_string(),
            },
        );

        assert_eq!(
            effects,
            vec![ChatEffect::Notify {
                message: "HTTP 500".to_string(),
            }]
        );
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].role, Role::User);
        assert!(!state.is_loading);
    }
}
