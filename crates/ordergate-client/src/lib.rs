//! Session and resource-operation controller for the order gateway.
//!
//! - [`SessionManager`] holds the typed credentials and the bearer token.
//! - [`AuthClient`] registers and logs in; a successful login sets the token.
//! - [`OrderClient`] creates, updates, deletes and fetches orders.
//! - [`DiagnosticsClient`] fetches the log feed.
//! - [`GatewayController`] ties them together behind [`Action`]s and
//!   publishes results into [`ResultSlot`]s.
//!
//! Every operation returns an [`OperationResult`](ordergate_core::OperationResult);
//! errors never escape.

pub mod auth;
pub mod controller;
pub mod diagnostics;
pub mod endpoints;
pub mod orders;
mod outcome;
pub mod session;
pub mod slot;
pub mod transport;

pub use auth::AuthClient;
pub use controller::{Action, GatewayController, ResultSlots};
pub use diagnostics::DiagnosticsClient;
pub use orders::OrderClient;
pub use session::{AuthHeaders, CapturedSession, Credentials, SessionManager, SessionSnapshot};
pub use slot::{Published, ResultSlot};
pub use transport::{GatewayRequest, GatewayResponse, HttpTransport, Transport};
