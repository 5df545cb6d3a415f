// Seeded assistant message shown at the top of every fresh conversation.
pub const GREETING: &str = "Welcome to the future of AI. How can I assist you today?";

// Assistant reply used whenever the chat backend cannot produce one.
pub const CHAT_FALLBACK: &str = "I encountered a technical glitch while processing your request. Please ensure the backend service is running.";

// Well-known key the session token is persisted under.
pub const TOKEN_KEY: &str = "auth_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

// One chat bubble. Order in the transcript is display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// How the identifier is collected. Only changes the input affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMethod {
    #[default]
    Email,
    Mobile,
}

impl AuthMethod {
    pub fn label(self) -> &'static str {
        match self {
            AuthMethod::Email => "Email",
            AuthMethod::Mobile => "Mobile",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            AuthMethod::Email => "name@example.com",
            AuthMethod::Mobile => "+1 234 567 8900",
        }
    }
}

// Login and signup share the same OTP flow; the mode only changes copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    pub fn tagline(self) -> &'static str {
        match self {
            AuthMode::Login => "Welcome back, strategist",
            AuthMode::Signup => "Join the elite intelligence",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            AuthMode::Login => "Login Now",
            AuthMode::Signup => "Create Account",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStep {
    #[default]
    Input,
    AwaitingOtp,
    Authenticated,
}

// Pages reachable through navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Chat,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Chat => "/chat",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Route::Landing),
            "/login" => Some(Route::Login),
            "/chat" => Some(Route::Chat),
            _ => None,
        }
    }
}
