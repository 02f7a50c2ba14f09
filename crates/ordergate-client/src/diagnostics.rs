//! Unauthenticated access to the gateway's log feed.

use std::sync::Arc;

use ordergate_core::messages;
use ordergate_core::{OperationResult, ReadStatusPolicy};

use crate::endpoints;
use crate::outcome::{connection_failed, read_result};
use crate::transport::{GatewayRequest, Transport};

#[derive(Clone)]
pub struct DiagnosticsClient {
    transport: Arc<dyn Transport>,
    read_status: ReadStatusPolicy,
}

impl DiagnosticsClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            read_status: ReadStatusPolicy::default(),
        }
    }

    pub fn with_read_status(mut self, policy: ReadStatusPolicy) -> Self {
        self.read_status = policy;
        self
    }

    /// Fetches the log feed and echoes it verbatim as the payload.
    pub async fn get_logs(&self) -> OperationResult {
        tracing::debug!("GET {}", endpoints::LOGS);

        match self.transport.send(GatewayRequest::get(endpoints::LOGS)).await {
            Ok(response) => read_result(
                "get_logs",
                self.read_status,
                response,
                messages::LOGS_FETCHED,
                messages::LOGS_FETCH_FAILED,
            ),
            Err(err) => connection_failed("get_logs", &err),
        }
    }
}
