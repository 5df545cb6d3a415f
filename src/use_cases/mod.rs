// Use cases layer: login, navigation, chat, and sidebar workflows.

pub mod auth_flow;
pub mod chat_exchange;
pub mod route_guard;
pub mod sidebar;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_flow::AuthFlow;
pub use chat_exchange::{ChatExchange, ChatOutcome};
pub use route_guard::{Navigation, RouteGuard};
pub use sidebar::{ConversationSummary, Sidebar};
