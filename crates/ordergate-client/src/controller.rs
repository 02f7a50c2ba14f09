//! Turns user actions into gateway calls and routes their results.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use ordergate_core::{ClientConfig, NumericField, OperationResult, Order, ResultOrdering};
use serde_json::Value;
use tokio::task::JoinHandle;

use crate::auth::AuthClient;
use crate::diagnostics::DiagnosticsClient;
use crate::orders::OrderClient;
use crate::session::{CapturedSession, SessionManager};
use crate::slot::ResultSlot;
use crate::transport::{HttpTransport, Transport};

/// A user intent that results in exactly one gateway request.
///
/// Order fields are raw form text; they are coerced when the action runs.
/// Register and login use the credentials held by the session when the
/// action is issued.
#[derive(Clone, PartialEq, Eq)]
pub enum Action {
    Register,
    Login,
    Whoami,
    Create {
        id: String,
        title: String,
        amount: String,
    },
    Update {
        id: String,
        title: String,
        amount: String,
    },
    Delete {
        id: String,
    },
    GetOne {
        id: String,
    },
    GetAll,
    GetLogs,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Login => "login",
            Self::Whoami => "whoami",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::GetOne { .. } => "get",
            Self::GetAll => "list",
            Self::GetLogs => "logs",
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create { id, title, amount } | Self::Update { id, title, amount } => {
                write!(f, "{}(id={:?}, title={:?}, amount={:?})", self.name(), id, title, amount)
            }
            Self::Delete { id } | Self::GetOne { id } => write!(f, "{}(id={:?})", self.name(), id),
            _ => f.write_str(self.name()),
        }
    }
}

/// The shared result slots: feedback text, order output, log output and the
/// identity reported by whoami.
#[derive(Debug)]
pub struct ResultSlots {
    pub feedback: ResultSlot<String>,
    pub orders: ResultSlot<Value>,
    pub logs: ResultSlot<Value>,
    pub identity: ResultSlot<Value>,
}

impl ResultSlots {
    pub fn new(ordering: ResultOrdering) -> Self {
        Self {
            feedback: ResultSlot::new(ordering),
            orders: ResultSlot::new(ordering),
            logs: ResultSlot::new(ordering),
            identity: ResultSlot::new(ordering),
        }
    }
}

/// Session, clients and result slots for one user of the gateway.
///
/// Cloning is cheap; clones share the session, the slots and the sequence
/// counter.
#[derive(Clone)]
pub struct GatewayController {
    session: SessionManager,
    auth: AuthClient,
    orders: OrderClient,
    diagnostics: DiagnosticsClient,
    slots: Arc<ResultSlots>,
    next_seq: Arc<AtomicU64>,
}

impl GatewayController {
    /// Creates a controller over `transport`, taking the read status policy
    /// and result ordering from `config`.
    pub fn new(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        let session = SessionManager::new();
        Self {
            auth: AuthClient::new(Arc::clone(&transport), session.clone())
                .with_read_status(config.read_status),
            orders: OrderClient::new(Arc::clone(&transport), session.clone())
                .with_read_status(config.read_status),
            diagnostics: DiagnosticsClient::new(transport).with_read_status(config.read_status),
            session,
            slots: Arc::new(ResultSlots::new(config.result_ordering)),
            next_seq: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Creates a controller talking HTTP to the configured gateway.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(Arc::new(HttpTransport::from_config(config)), config)
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    pub fn orders(&self) -> &OrderClient {
        &self.orders
    }

    pub fn diagnostics(&self) -> &DiagnosticsClient {
        &self.diagnostics
    }

    pub fn slots(&self) -> &ResultSlots {
        &self.slots
    }

    /// Reserves the next sequence number. Numbers grow with issue order.
    pub fn issue(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Runs `action` to completion and publishes its result.
    pub async fn perform(&self, action: Action) -> OperationResult {
        let captured = self.session.capture().await;
        let seq = self.issue();
        self.perform_issued(seq, captured, action).await
    }

    /// Issues `action` and spawns it without waiting for it to finish.
    ///
    /// The session is captured and the sequence number taken before
    /// spawning, so the request uses the credentials current at issue time
    /// and the number reflects issue order even when results come back in a
    /// different order. Nothing serializes concurrent actions.
    pub async fn dispatch(&self, action: Action) -> JoinHandle<OperationResult> {
        let captured = self.session.capture().await;
        let seq = self.issue();
        let controller = self.clone();
        tokio::spawn(async move { controller.perform_issued(seq, captured, action).await })
    }

    async fn perform_issued(
        &self,
        seq: u64,
        captured: CapturedSession,
        action: Action,
    ) -> OperationResult {
        tracing::debug!(seq, action = ?action, "Performing action");
        let CapturedSession {
            credentials,
            headers,
        } = captured;

        let result = match &action {
            Action::Register => {
                self.auth
                    .register(&credentials.username, &credentials.password)
                    .await
            }
            Action::Login => {
                self.auth
                    .login(&credentials.username, &credentials.password)
                    .await
            }
            Action::Whoami => self.auth.whoami_with(&headers).await,
            Action::Create { id, title, amount } => {
                self.orders
                    .create_with(&headers, &Order::from_form(id, title, amount))
                    .await
            }
            Action::Update { id, title, amount } => {
                self.orders
                    .update_with(&headers, &Order::from_form(id, title, amount))
                    .await
            }
            Action::Delete { id } => {
                self.orders
                    .remove_with(&headers, &NumericField::new(id.as_str()))
                    .await
            }
            Action::GetOne { id } => {
                self.orders
                    .get_one_with(&headers, &NumericField::new(id.as_str()))
                    .await
            }
            Action::GetAll => self.orders.get_all_with(&headers).await,
            Action::GetLogs => self.diagnostics.get_logs().await,
        };

        self.publish(seq, &action, &result);
        result
    }

    fn publish(&self, seq: u64, action: &Action, result: &OperationResult) {
        self.slots.feedback.publish(seq, result.message.clone());

        if let Some(payload) = &result.payload {
            match action {
                Action::GetOne { .. } | Action::GetAll => {
                    self.slots.orders.publish(seq, payload.clone());
                }
                Action::GetLogs => {
                    self.slots.logs.publish(seq, payload.clone());
                }
                Action::Whoami => {
                    self.slots.identity.publish(seq, payload.clone());
                }
                _ => {}
            }
        }
    }
}
