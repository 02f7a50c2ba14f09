//! Registration and login against the gateway's auth service.

use std::sync::Arc;

use ordergate_core::messages;
use ordergate_core::{OperationResult, ReadStatusPolicy};
use serde_json::{Value, json};

use crate::endpoints;
use crate::outcome::{connection_failed, read_result, write_result};
use crate::session::{AuthHeaders, SessionManager};
use crate::transport::{GatewayRequest, Transport};

/// Client for the `/auth` endpoints. Register and login send no auth headers.
#[derive(Clone)]
pub struct AuthClient {
    transport: Arc<dyn Transport>,
    session: SessionManager,
    read_status: ReadStatusPolicy,
}

impl AuthClient {
    pub fn new(transport: Arc<dyn Transport>, session: SessionManager) -> Self {
        Self {
            transport,
            session,
            read_status: ReadStatusPolicy::default(),
        }
    }

    /// Sets the status policy used by [`whoami`](Self::whoami).
    pub fn with_read_status(mut self, policy: ReadStatusPolicy) -> Self {
        self.read_status = policy;
        self
    }

    fn credentials_request(path: &str, username: &str, password: &str) -> GatewayRequest {
        GatewayRequest::post(path).with_json(json!({
            "username": username,
            "password": password,
        }))
    }

    /// Registers a new user.
    ///
    /// Success carries a fixed confirmation and no payload. A rejected
    /// registration reports the gateway's `detail` when it sends one.
    pub async fn register(&self, username: &str, password: &str) -> OperationResult {
        tracing::debug!(username, "POST {}", endpoints::REGISTER);
        let request = Self::credentials_request(endpoints::REGISTER, username, password);

        match self.transport.send(request).await {
            Ok(response) => {
                let result = write_result(
                    "register",
                    &response,
                    messages::REGISTERED,
                    messages::REGISTER_FAILED,
                );
                if result.is_success() {
                    tracing::info!(username, "User registered");
                }
                result
            }
            Err(err) => connection_failed("register", &err),
        }
    }

    /// Logs in and stores the returned bearer token in the session.
    ///
    /// The body is inspected whatever the status. Only a non-empty string
    /// `access_token` counts as success; every other response yields the
    /// same fixed failure message, even when the gateway sent a `detail`.
    pub async fn login(&self, username: &str, password: &str) -> OperationResult {
        tracing::debug!(username, "POST {}", endpoints::LOGIN);
        let request = Self::credentials_request(endpoints::LOGIN, username, password);

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => return connection_failed("login", &err),
        };

        match access_token(&response.body) {
            Some(token) => {
                self.session.set_token(token).await;
                tracing::info!(username, "Logged in");
                OperationResult::success(messages::LOGGED_IN)
            }
            None => {
                tracing::warn!(username, status = %response.status, "Login did not return a token");
                OperationResult::failure(messages::LOGIN_FAILED)
            }
        }
    }

    /// Asks the gateway who the current token belongs to.
    pub async fn whoami(&self) -> OperationResult {
        self.whoami_with(&self.session.auth_headers().await).await
    }

    /// Like [`whoami`](Self::whoami), with headers captured earlier.
    pub async fn whoami_with(&self, headers: &AuthHeaders) -> OperationResult {
        tracing::debug!(authenticated = headers.authorization.is_some(), "GET {}", endpoints::WHOAMI);
        let request = GatewayRequest::get(endpoints::WHOAMI).with_headers(headers.to_pairs());

        match self.transport.send(request).await {
            Ok(response) => read_result(
                "whoami",
                self.read_status,
                response,
                messages::WHOAMI_FETCHED,
                messages::WHOAMI_FAILED,
            ),
            Err(err) => connection_failed("whoami", &err),
        }
    }
}

fn access_token(body: &Value) -> Option<&str> {
    body.get("access_token")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
}
