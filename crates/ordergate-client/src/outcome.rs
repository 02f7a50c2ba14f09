//! Folding exchanges into `OperationResult`s.
//!
//! Write operations check the status. Read operations check it only under
//! [`ReadStatusPolicy::StatusChecked`]; by default any received body is the
//! payload of a success.

use ordergate_core::messages;
use ordergate_core::{GatewayError, OperationResult, ReadStatusPolicy};

use crate::transport::GatewayResponse;

/// The single result for every exchange that produced no usable response.
pub(crate) fn connection_failed(operation: &str, err: &GatewayError) -> OperationResult {
    tracing::warn!(operation, error = %err, "Gateway unreachable");
    OperationResult::failure(messages::CONNECTION_FAILED)
}

/// Status-checked write: 2xx is success with `success_message`, anything
/// else is a failure with the body's `detail` or `fallback`.
pub(crate) fn write_result(
    operation: &str,
    response: &GatewayResponse,
    success_message: impl Into<String>,
    fallback: &str,
) -> OperationResult {
    if response.is_success() {
        OperationResult::success(success_message)
    } else {
        tracing::warn!(operation, status = %response.status, "Gateway rejected request");
        OperationResult::failure_from_body(&response.body, fallback)
    }
}

/// Read result under the configured status policy.
pub(crate) fn read_result(
    operation: &str,
    policy: ReadStatusPolicy,
    response: GatewayResponse,
    success_message: &str,
    fallback: &str,
) -> OperationResult {
    match policy {
        ReadStatusPolicy::StatusChecked if !response.is_success() => {
            tracing::warn!(operation, status = %response.status, "Gateway rejected read");
            OperationResult::failure_from_body(&response.body, fallback)
        }
        _ => {
            if !response.is_success() {
                tracing::debug!(
                    operation,
                    status = %response.status,
                    "Non-success read surfaced as payload"
                );
            }
            OperationResult::success_with_payload(success_message, response.body)
        }
    }
}
