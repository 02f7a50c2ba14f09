//! Order CRUD against the gateway's app service.

use std::sync::Arc;

use ordergate_core::messages;
use ordergate_core::{NumericField, OperationResult, Order, ReadStatusPolicy};
use serde_json::Value;

use crate::endpoints;
use crate::outcome::{connection_failed, read_result, write_result};
use crate::session::{AuthHeaders, SessionManager};
use crate::transport::{GatewayRequest, Transport};

/// Client for `/app/orders`. Every call carries the session's auth headers.
///
/// The plain methods read the headers from the session when called. The
/// `*_with` variants take headers captured earlier, e.g. when an action was
/// issued.
///
/// Nothing is cached: each read goes to the gateway.
#[derive(Clone)]
pub struct OrderClient {
    transport: Arc<dyn Transport>,
    session: SessionManager,
    read_status: ReadStatusPolicy,
}

impl OrderClient {
    pub fn new(transport: Arc<dyn Transport>, session: SessionManager) -> Self {
        Self {
            transport,
            session,
            read_status: ReadStatusPolicy::default(),
        }
    }

    /// Sets the status policy used by the read operations.
    pub fn with_read_status(mut self, policy: ReadStatusPolicy) -> Self {
        self.read_status = policy;
        self
    }

    fn authenticated(headers: &AuthHeaders, request: GatewayRequest) -> GatewayRequest {
        tracing::debug!(
            authenticated = headers.authorization.is_some(),
            "{} {}",
            request.method,
            request.path
        );
        request.with_headers(headers.to_pairs())
    }

    fn order_body(order: &Order) -> Value {
        // Order has no non-string map keys; serialization cannot fail
        serde_json::to_value(order).unwrap_or(Value::Null)
    }

    /// Creates an order. The caller-supplied id travels in the body.
    pub async fn create(&self, order: &Order) -> OperationResult {
        self.create_with(&self.session.auth_headers().await, order).await
    }

    pub async fn create_with(&self, headers: &AuthHeaders, order: &Order) -> OperationResult {
        let request = Self::authenticated(
            headers,
            GatewayRequest::post(endpoints::ORDERS).with_json(Self::order_body(order)),
        );

        match self.transport.send(request).await {
            Ok(response) => write_result(
                "create_order",
                &response,
                messages::order_added(&order.title, order.amount.text()),
                messages::ADD_FAILED,
            ),
            Err(err) => connection_failed("create_order", &err),
        }
    }

    /// Replaces the order stored under `order.id`.
    pub async fn update(&self, order: &Order) -> OperationResult {
        self.update_with(&self.session.auth_headers().await, order).await
    }

    pub async fn update_with(&self, headers: &AuthHeaders, order: &Order) -> OperationResult {
        let request = Self::authenticated(
            headers,
            GatewayRequest::put(endpoints::order(&order.id.value()))
                .with_json(Self::order_body(order)),
        );

        match self.transport.send(request).await {
            Ok(response) => write_result(
                "update_order",
                &response,
                messages::order_updated(&order.title, order.amount.text()),
                messages::UPDATE_FAILED,
            ),
            Err(err) => connection_failed("update_order", &err),
        }
    }

    pub async fn remove(&self, id: &NumericField) -> OperationResult {
        self.remove_with(&self.session.auth_headers().await, id).await
    }

    pub async fn remove_with(&self, headers: &AuthHeaders, id: &NumericField) -> OperationResult {
        let request = Self::authenticated(headers, GatewayRequest::delete(endpoints::order(&id.value())));

        match self.transport.send(request).await {
            Ok(response) => write_result(
                "delete_order",
                &response,
                messages::order_deleted(id.text()),
                messages::DELETE_FAILED,
            ),
            Err(err) => connection_failed("delete_order", &err),
        }
    }

    /// Fetches one order. Under the default policy the body is the payload
    /// whatever the status, so a gateway error body shows up as data.
    pub async fn get_one(&self, id: &NumericField) -> OperationResult {
        self.get_one_with(&self.session.auth_headers().await, id).await
    }

    pub async fn get_one_with(&self, headers: &AuthHeaders, id: &NumericField) -> OperationResult {
        let request = Self::authenticated(headers, GatewayRequest::get(endpoints::order(&id.value())));

        match self.transport.send(request).await {
            Ok(response) => read_result(
                "get_order",
                self.read_status,
                response,
                messages::ORDER_FETCHED,
                messages::ORDER_FETCH_FAILED,
            ),
            Err(err) => connection_failed("get_order", &err),
        }
    }

    pub async fn get_all(&self) -> OperationResult {
        self.get_all_with(&self.session.auth_headers().await).await
    }

    pub async fn get_all_with(&self, headers: &AuthHeaders) -> OperationResult {
        let request = Self::authenticated(headers, GatewayRequest::get(endpoints::ORDERS));

        match self.transport.send(request).await {
            Ok(response) => read_result(
                "get_orders",
                self.read_status,
                response,
                messages::ORDERS_FETCHED,
                messages::ORDERS_FETCH_FAILED,
            ),
            Err(err) => connection_failed("get_orders", &err),
        }
    }
}
