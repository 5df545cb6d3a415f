use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::entities::{CHAT_FALLBACK, Message};
use crate::domain::errors::ApiError;
use crate::domain::ports::{ChatGateway, TokenStore};
use crate::domain::transcript::{PendingTurn, Transcript};

// What happened to a send request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    // Blank text or a request already in flight; nothing changed.
    Ignored,
    Replied,
    // The fallback bubble was appended; the cause is kept for inspection.
    Fallback(ApiError),
    // The caller went away before the reply arrived; no reply was appended.
    Cancelled,
}

// Single-flight chat loop over one transcript.
pub struct ChatExchange<C, S> {
    pub chat: C,
    pub store: S,
    transcript: Transcript,
}

impl<C, S> ChatExchange<C, S>
where
    C: ChatGateway,
    S: TokenStore,
{
    pub fn new(chat: C, store: S) -> Self {
        Self {
            chat,
            store,
            transcript: Transcript::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        self.transcript.messages()
    }

    pub fn is_busy(&self) -> bool {
        self.transcript.is_busy()
    }

    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    // First phase: show the user message right away.
    pub fn begin_turn(&mut self, text: &str) -> Option<PendingTurn> {
        self.transcript.begin_turn(text)
    }

    // Second phase: call the backend and append whatever came back.
    #[tracing::instrument(name = "chat_turn", skip_all, fields(len = turn.text().len()))]
    pub async fn resolve_turn(
        &mut self,
        turn: PendingTurn,
        cancel: &CancellationToken,
    ) -> ChatOutcome {
        let token = match self.store.get().await {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "failed to read session token; sending without it.");
                None
            }
        };

        let result = tokio::select! {
            _ = cancel.cancelled() => None,
            result = self.chat.send_message(turn.text(), token.as_deref()) => Some(result),
        };

        match result {
            None => {
                debug!("chat request cancelled.");
                self.transcript.abandon_turn(turn);
                ChatOutcome::Cancelled
            }
            Some(Ok(reply)) => {
                info!("chat reply received.");
                self.transcript.complete_turn(turn, reply);
                ChatOutcome::Replied
            }
            Some(Err(err)) => {
                warn!(error = %err, "chat request failed.");
                self.transcript.complete_turn(turn, CHAT_FALLBACK);
                ChatOutcome::Fallback(err)
            }
        }
    }

    pub async fn send_message(&mut self, text: &str, cancel: &CancellationToken) -> ChatOutcome {
        match self.begin_turn(text) {
            Some(turn) => self.resolve_turn(turn, cancel).await,
            None => ChatOutcome::Ignored,
        }
    }
}
