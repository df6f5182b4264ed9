use serde::Deserialize;

/// A single issued credential. The string is opaque to the client; the
/// server alone decides when it stops being valid, and the client finds
/// out through a 401.
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub token: String,
}

/// Ordered token history, insertion order significant. "Current" always
/// means the most recently added token; reading an empty store yields
/// the empty string so an unauthenticated call can still be attempted
/// and rejected by the server instead of being pre-validated here.
#[derive(Debug, Default)]
pub struct TokenStore {
    access: Vec<Token>,
    refresh: Vec<Token>,
}

impl TokenStore {
    pub fn current_access(&self) -> &str {
        self.access.last().map(|t| t.token.as_str()).unwrap_or("")
    }

    pub fn current_refresh(&self) -> &str {
        self.refresh.last().map(|t| t.token.as_str()).unwrap_or("")
    }

    pub fn add_access(&mut self, token: Token) {
        self.access.push(token);
    }

    pub fn add_refresh(&mut self, token: Token) {
        self.refresh.push(token);
    }

    pub fn has_refresh(&self) -> bool {
        !self.refresh.is_empty()
    }

    pub fn clear(&mut self) {
        self.access.clear();
        self.refresh.clear();
    }
}

/// Mutable session state: token history, the flag gating the 401
/// refresh-and-retry path, and the server base URL. The `ApiClient`
/// keeps exactly one of these behind a mutex.
#[derive(Debug)]
pub struct SessionState {
    pub tokens: TokenStore,
    pub refresh_enabled: bool,
    pub base_url: String,
}

impl SessionState {
    pub fn new(base_url: String) -> Self {
        Self {
            tokens: TokenStore::default(),
            refresh_enabled: false,
            base_url,
        }
    }

    /// Drop all tokens and disable the refresh path. Safe to call in
    /// any state; calling it twice leaves the same end state.
    pub fn logout(&mut self) {
        self.tokens.clear();
        self.refresh_enabled = false;
    }

    /// Authenticated means a refresh token is held and the refresh path
    /// is armed.
    pub fn is_authenticated(&self) -> bool {
        self.refresh_enabled && self.tokens.has_refresh()
    }
}
