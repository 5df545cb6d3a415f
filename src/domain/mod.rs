// Domain layer: entities, form and transcript state, errors, and ports.

pub mod entities;
pub mod errors;
pub mod login;
pub mod ports;
pub mod transcript;

// Re-export the domain boundary types and ports.
pub use entities::{AuthMethod, AuthMode, AuthStep, Message, Role, Route};
pub use errors::{ApiError, AuthError, StoreError};
pub use ports::{AuthGateway, ChatGateway, OtpVerdict, TokenStore};
