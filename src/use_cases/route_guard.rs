use tracing::warn;

use crate::domain::entities::Route;
use crate::domain::ports::TokenStore;

// Result of resolving a requested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

impl Navigation {
    pub fn target(self) -> Route {
        match self {
            Navigation::Render(route) | Navigation::Redirect(route) => route,
        }
    }
}

// Navigation-time gate for the chat view. A present token counts as valid
// until a downstream request says otherwise.
pub struct RouteGuard<S> {
    pub store: S,
}

impl<S> RouteGuard<S>
where
    S: TokenStore,
{
    pub async fn is_authorized(&self) -> bool {
        match self.store.get().await {
            Ok(token) => token.is_some(),
            Err(err) => {
                warn!(error = %err, "failed to read session token; treating as signed out.");
                false
            }
        }
    }

    pub async fn resolve(&self, path: &str) -> Navigation {
        match Route::from_path(path) {
            Some(Route::Chat) if self.is_authorized().await => Navigation::Render(Route::Chat),
            Some(Route::Chat) => Navigation::Redirect(Route::Login),
            Some(route) => Navigation::Render(route),
            None => Navigation::Redirect(Route::Landing),
        }
    }
}
