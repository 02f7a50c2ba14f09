#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use ordergate_client::{GatewayRequest, GatewayResponse, Transport};
use ordergate_core::{GatewayError, Result};
use reqwest::StatusCode;
use serde_json::Value;

enum Scripted {
    Respond {
        status: StatusCode,
        body: Value,
        delay: Duration,
    },
    Fail,
}

/// Transport that records every request and answers from a script, in order.
///
/// Once the script runs out every request fails at the transport level.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<GatewayRequest>>,
}

impl ScriptedTransport {
    pub fn respond(&self, status: u16, body: Value) -> &Self {
        self.respond_after(status, body, Duration::ZERO)
    }

    pub fn respond_after(&self, status: u16, body: Value, delay: Duration) -> &Self {
        self.script.lock().unwrap().push_back(Scripted::Respond {
            status: StatusCode::from_u16(status).unwrap(),
            body,
            delay,
        });
        self
    }

    pub fn fail(&self) -> &Self {
        self.script.lock().unwrap().push_back(Scripted::Fail);
        self
    }

    pub fn requests(&self) -> Vec<GatewayRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> GatewayRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: GatewayRequest) -> Result<GatewayResponse> {
        self.requests.lock().unwrap().push(request);
        let next = self.script.lock().unwrap().pop_front();

        match next {
            Some(Scripted::Respond { status, body, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(GatewayResponse::new(status, body))
            }
            Some(Scripted::Fail) | None => Err(GatewayError::transport("connection refused")),
        }
    }
}
