//! Gateway API paths.

use ordergate_core::Numeric;

pub const REGISTER: &str = "/auth/register";
pub const LOGIN: &str = "/auth/login";
pub const WHOAMI: &str = "/auth/me";
pub const ORDERS: &str = "/app/orders";
pub const LOGS: &str = "/logs/logs";

/// Per-order path. An invalid id renders as `NaN` and is sent as such.
pub fn order(id: &Numeric) -> String {
    format!("{}/{}", ORDERS, id)
}
