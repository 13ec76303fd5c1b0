//! Session runtime - owns the conversation state and executes effects.
//!
//! This is the effect boundary: the reducer stays pure and produces
//! effects; this module executes them. Dispatch effects spawn one tokio
//! task per send; the task reports back through an inbox channel and the
//! result re-enters the reducer as an event, so all state mutation is
//! serialized on the session owner.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::chat::{self, ChatEffect, ChatEvent, ConversationState, ImageData};
use crate::providers::gemini::GeminiClient;

/// One-shot notice for the presentation layer (e.g., an error toast).
///
/// Notices are fire-and-forget and never part of conversation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

/// Receiver half of the notice channel, consumed by the front-end.
pub type NoticeReceiver = mpsc::UnboundedReceiver<Notice>;

/// A single conversation session: state, client, and the event inbox.
pub struct ChatSession {
    state: ConversationState,
    client: Arc<GeminiClient>,
    /// Dispatch tasks send their results here.
    inbox_tx: mpsc::UnboundedSender<ChatEvent>,
    /// Drained by `run_until_idle`.
    inbox_rx: mpsc::UnboundedReceiver<ChatEvent>,
    notice_tx: mpsc::UnboundedSender<Notice>,
}

impl ChatSession {
    /// Creates a session and the notice receiver for the presentation layer.
    pub fn new(client: GeminiClient) -> (Self, NoticeReceiver) {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();

        let session = Self {
            state: ConversationState::new(),
            client: Arc::new(client),
            inbox_tx,
            inbox_rx,
            notice_tx,
        };
        (session, notice_rx)
    }

    /// Read access to the conversation state.
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Applies an event through the reducer and executes returned effects.
    pub fn handle(&mut self, event: ChatEvent) {
        for effect in chat::update(&mut self.state, event) {
            self.execute_effect(effect);
        }
    }

    /// Drains dispatcher results until no request is outstanding.
    ///
    /// There is no cancellation and no timeout: a send settles only when
    /// the completion call returns or fails on its own.
    pub async fn run_until_idle(&mut self) {
        while self.state.is_loading {
            // recv() cannot return None while the session holds a sender.
            let Some(event) = self.inbox_rx.recv().await else {
                break;
            };
            self.handle(event);
        }
    }

    fn execute_effect(&mut self, effect: ChatEffect) {
        match effect {
            ChatEffect::Dispatch { text, image } => self.spawn_dispatch(text, image),
            ChatEffect::Notify { message } => {
                let _ = self.notice_tx.send(Notice { message });
            }
        }
    }

    /// Spawns the completion call for a draft snapshot.
    ///
    /// Provider errors are converted to `RequestFailed` events here; they
    /// never propagate to the presentation layer as panics or results.
    fn spawn_dispatch(&self, text: String, image: Option<ImageData>) {
        let client = Arc::clone(&self.client);
        let inbox_tx = self.inbox_tx.clone();

        tokio::spawn(async move {
            tracing::debug!(has_image = image.is_some(), "dispatching completion request");
            let event = match client.generate_content(&text, image.as_ref()).await {
                Ok(text) => ChatEvent::ReplyReceived { text },
                Err(e) => {
                    tracing::warn!(error = format!("{e:#}"), "completion request failed");
                    ChatEvent::RequestFailed {
                        message: format!("Request failed: {e:#}"),
                    }
                }
            };
            let _ = inbox_tx.send(event);
        });
    }
}
