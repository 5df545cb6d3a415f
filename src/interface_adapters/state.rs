use crate::domain::{AuthGateway, ChatGateway, TokenStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    // We use Arc<dyn Trait> to hold any implementation (dependency injection).
    pub auth: Arc<dyn AuthGateway>,
    pub chat: Arc<dyn ChatGateway>,
    // The one session slot every page reads and writes.
    pub store: Arc<dyn TokenStore>,
}
