//! Session state shared by the clients.
//!
//! `SessionManager` is a cheap, cloneable handle to one logical session. It
//! holds the credentials typed by the user and the bearer token from the
//! most recent successful login. Only [`AuthClient::login`] writes the token.
//!
//! [`AuthClient::login`]: crate::AuthClient::login

use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const USERNAME_HEADER: &str = "username";

#[derive(Default)]
struct SessionState {
    username: String,
    password: String,
    token: Option<String>,
}

/// Credentials as typed by the user, pending use by register or login.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A consistent copy of the username and token taken at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub username: String,
    pub token: Option<String>,
}

/// Headers attached to authenticated calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// `Bearer <token>`, absent before the first successful login.
    pub authorization: Option<String>,
    pub username: String,
}

impl AuthHeaders {
    /// Returns the header name/value pairs in send order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(authorization) = &self.authorization {
            pairs.push((AUTHORIZATION_HEADER.to_string(), authorization.clone()));
        }
        pairs.push((USERNAME_HEADER.to_string(), self.username.clone()));
        pairs
    }
}

impl From<SessionSnapshot> for AuthHeaders {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            authorization: snapshot.token.map(|token| format!("Bearer {}", token)),
            username: snapshot.username,
        }
    }
}

/// Everything an issued action needs from the session: the credentials for
/// register and login, and the headers for authenticated calls.
///
/// Captured once, when the action is issued, so later edits to the session
/// do not reach requests already on their way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedSession {
    pub credentials: Credentials,
    pub headers: AuthHeaders,
}

/// Handle to the single logical session of this client.
#[derive(Clone, Default)]
pub struct SessionManager {
    state: Arc<RwLock<SessionState>>,
}

impl SessionManager {
    /// Creates an empty session: no username, no token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the credentials typed by the user. Nothing is persisted.
    pub async fn set_credentials(&self, username: impl Into<String>, password: impl Into<String>) {
        let mut state = self.state.write().await;
        state.username = username.into();
        state.password = password.into();
    }

    /// Updates only the username, leaving the password and token untouched.
    pub async fn set_username(&self, username: impl Into<String>) {
        self.state.write().await.username = username.into();
    }

    pub async fn credentials(&self) -> Credentials {
        let state = self.state.read().await;
        Credentials {
            username: state.username.clone(),
            password: state.password.clone(),
        }
    }

    /// Replaces the bearer token. Most recent login wins.
    pub(crate) async fn set_token(&self, token: impl Into<String>) {
        self.state.write().await.token = Some(token.into());
    }

    pub async fn has_token(&self) -> bool {
        self.state.read().await.token.is_some()
    }

    /// Reads username and token under one lock.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            username: state.username.clone(),
            token: state.token.clone(),
        }
    }

    /// Reads credentials and headers under one lock.
    pub async fn capture(&self) -> CapturedSession {
        let state = self.state.read().await;
        CapturedSession {
            credentials: Credentials {
                username: state.username.clone(),
                password: state.password.clone(),
            },
            headers: SessionSnapshot {
                username: state.username.clone(),
                token: state.token.clone(),
            }
            .into(),
        }
    }

    /// Builds the headers for an authenticated call from one snapshot.
    ///
    /// Without a token the `Authorization` header is left out and the call
    /// goes ahead anyway; the gateway is expected to reject it.
    pub async fn auth_headers(&self) -> AuthHeaders {
        self.snapshot().await.into()
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager").finish_non_exhaustive()
    }
}
