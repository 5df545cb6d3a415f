use tracing::info;
use uuid::Uuid;

use crate::domain::entities::{Message, Role};
use crate::domain::errors::StoreError;
use crate::domain::ports::TokenStore;
use crate::domain::transcript::Transcript;

const TITLE_MAX_CHARS: usize = 40;

// A conversation parked by "New Conversation". Lives in memory only.
#[derive(Debug, Clone)]
pub struct ConversationSummary {
    pub id: Uuid,
    pub title: String,
    messages: Vec<Message>,
}

impl ConversationSummary {
    fn from_messages(messages: Vec<Message>) -> Option<Self> {
        let first = messages.iter().find(|m| m.role == Role::User)?;
        let title = first.content.trim();
        let title = if title.chars().count() > TITLE_MAX_CHARS {
            let cut: String = title.chars().take(TITLE_MAX_CHARS).collect();
            format!("{cut}...")
        } else {
            title.to_string()
        };
        Some(Self {
            id: Uuid::new_v4(),
            title,
            messages,
        })
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

// Recent conversations and sign-out, next to the chat view.
pub struct Sidebar<S> {
    pub store: S,
    // Newest first.
    recent: Vec<ConversationSummary>,
}

impl<S> Sidebar<S>
where
    S: TokenStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            recent: Vec::new(),
        }
    }

    pub fn recent(&self) -> &[ConversationSummary] {
        &self.recent
    }

    // Park the current conversation (if it has user turns) and start fresh.
    // Refused while a request is in flight.
    pub fn new_conversation(&mut self, transcript: &mut Transcript) -> bool {
        let Some(previous) = transcript.reset() else {
            return false;
        };
        self.archive(previous);
        true
    }

    // Swap an archived conversation back into the transcript.
    pub fn open(&mut self, index: usize, transcript: &mut Transcript) -> bool {
        if index >= self.recent.len() || transcript.is_busy() {
            return false;
        }
        let summary = self.recent.remove(index);
        info!(conversation_id = %summary.id, "conversation reopened.");
        match transcript.restore(summary.messages) {
            Some(previous) => {
                self.archive(previous);
                true
            }
            None => false,
        }
    }

    pub async fn sign_out(&self) -> Result<(), StoreError> {
        self.store.clear().await?;
        info!("signed out.");
        Ok(())
    }

    fn archive(&mut self, messages: Vec<Message>) {
        if let Some(summary) = ConversationSummary::from_messages(messages) {
            info!(conversation_id = %summary.id, "conversation archived.");
            self.recent.insert(0, summary);
        }
    }
}
