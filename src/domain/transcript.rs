use crate::domain::entities::{GREETING, Message, Role};

// Message list for one conversation plus the single-flight busy flag.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
    busy: bool,
}

// Handle for a user turn that has been shown but not yet answered.
#[must_use = "a pending turn must be completed or abandoned to clear the busy flag"]
#[derive(Debug)]
pub struct PendingTurn {
    text: String,
}

impl PendingTurn {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(GREETING)],
            busy: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn has_user_messages(&self) -> bool {
        self.messages.iter().any(|m| m.role == Role::User)
    }

    // Append the user message and raise the busy flag.
    // Returns None for blank input or while another turn is pending.
    pub fn begin_turn(&mut self, text: &str) -> Option<PendingTurn> {
        if self.busy || text.trim().is_empty() {
            return None;
        }
        self.messages.push(Message::user(text));
        self.busy = true;
        Some(PendingTurn {
            text: text.to_string(),
        })
    }

    pub fn complete_turn(&mut self, _turn: PendingTurn, reply: impl Into<String>) {
        self.messages.push(Message::assistant(reply));
        self.busy = false;
    }

    // The user message stays; only the busy flag is released.
    pub fn abandon_turn(&mut self, _turn: PendingTurn) {
        self.busy = false;
    }

    // Start over from the greeting, handing back the previous messages.
    pub fn reset(&mut self) -> Option<Vec<Message>> {
        if self.busy {
            return None;
        }
        Some(std::mem::replace(
            &mut self.messages,
            vec![Message::assistant(GREETING)],
        ))
    }

    pub fn restore(&mut self, messages: Vec<Message>) -> Option<Vec<Message>> {
        if self.busy {
            return None;
        }
        Some(std::mem::replace(&mut self.messages, messages))
    }
}
