//! Authentication gate.
//!
//! [`AuthGate`] decides what the console shows before any page is rendered.
//! It holds no I/O: callers apply the returned [`AuthEffects`] (persist the
//! token, rewrite the URL, fetch the user) and feed the fetch result back.

use tracing::debug;

use crate::error::ApiError;
use crate::models::User;

/// Key under which the token is persisted in client storage.
pub const TOKEN_STORAGE_KEY: &str = "token";
/// Query parameter that carries a token on first visit.
pub const TOKEN_QUERY_PARAM: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UserFetch {
    #[default]
    Idle,
    Pending,
    Loaded(User),
    Failed(ApiError),
}

/// Side effects requested by a gate transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthEffects {
    /// Write this token to persisted storage.
    pub persist: Option<String>,
    /// Drop the token query parameter from the current URL.
    pub strip_url: bool,
    /// Fetch user data with this token.
    pub fetch: Option<String>,
}

/// What the gate renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthView {
    Loading,
    StorageUnavailable,
    InvalidToken(ApiError),
    NotLoggedIn,
    Authenticated(User),
}

#[derive(Debug, Clone)]
pub struct AuthGate {
    storage_available: bool,
    token: Option<String>,
    authorizing: bool,
    user: UserFetch,
}

impl AuthGate {
    pub fn new(storage_available: bool) -> Self {
        Self {
            storage_available,
            token: None,
            authorizing: storage_available,
            user: UserFetch::Idle,
        }
    }

    /// First render: pick the token from the URL or from storage.
    pub fn mount(&mut self, url_token: Option<&str>, stored_token: Option<&str>) -> AuthEffects {
        let url_token = non_empty(url_token);
        let mut effects = AuthEffects {
            strip_url: url_token.is_some(),
            ..Default::default()
        };

        if !self.storage_available {
            self.authorizing = false;
            return effects;
        }

        match url_token.or_else(|| non_empty(stored_token)) {
            Some(token) => {
                debug!(from_url = url_token.is_some(), "authorizing with token");
                if url_token.is_some() {
                    effects.persist = Some(token.to_string());
                }
                effects.fetch = Some(self.start(token));
            }
            None => {
                debug!("no token in url or storage");
                self.authorizing = false;
            }
        }
        effects
    }

    /// Replace the token from the login form.
    pub fn login(&mut self, token: &str) -> AuthEffects {
        let Some(token) = non_empty(Some(token)) else {
            return AuthEffects::default();
        };
        if !self.storage_available {
            return AuthEffects::default();
        }
        AuthEffects {
            persist: Some(token.to_string()),
            strip_url: false,
            fetch: Some(self.start(token)),
        }
    }

    /// Forget the token. The caller removes it from storage.
    pub fn logout(&mut self) {
        self.token = None;
        self.user = UserFetch::Idle;
        self.authorizing = false;
    }

    /// Resolve the user fetch started for `token`. Stale results are ignored.
    pub fn user_loaded(&mut self, token: &str, user: User) {
        if self.is_current(token) {
            debug!(user = %user.user_name, "user data loaded");
            self.user = UserFetch::Loaded(user);
            self.authorizing = false;
        }
    }

    pub fn user_failed(&mut self, token: &str, err: ApiError) {
        if self.is_current(token) {
            debug!(error = %err, "user data request failed");
            self.user = UserFetch::Failed(err);
            self.authorizing = false;
        }
    }

    pub fn view(&self) -> AuthView {
        if self.authorizing {
            return AuthView::Loading;
        }
        if !self.storage_available {
            return AuthView::StorageUnavailable;
        }
        if let UserFetch::Failed(err) = &self.user {
            return AuthView::InvalidToken(err.clone());
        }
        if self.token.is_none() {
            return AuthView::NotLoggedIn;
        }
        match &self.user {
            UserFetch::Loaded(user) => AuthView::Authenticated(user.clone()),
            _ => AuthView::Loading,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        match &self.user {
            UserFetch::Loaded(user) => Some(user),
            _ => None,
        }
    }

    fn start(&mut self, token: &str) -> String {
        self.token = Some(token.to_string());
        self.user = UserFetch::Pending;
        self.authorizing = true;
        token.to_string()
    }

    fn is_current(&self, token: &str) -> bool {
        self.token.as_deref() == Some(token) && self.user == UserFetch::Pending
    }
}

fn non_empty(token: Option<&str>) -> Option<&str> {
    token.map(str::trim).filter(|t| !t.is_empty())
}
