//! User-facing feedback messages.
//!
//! Messages that echo order fields are built by the functions below from the
//! text the user entered; the rest are fixed strings.

pub const CONNECTION_FAILED: &str = "Could not reach the server";

pub const REGISTERED: &str = "User registered successfully";
pub const REGISTER_FAILED: &str = "Registration failed";
pub const LOGGED_IN: &str = "Logged in successfully";
pub const LOGIN_FAILED: &str = "Login failed";
pub const WHOAMI_FETCHED: &str = "Fetched current user";
pub const WHOAMI_FAILED: &str = "Failed to fetch current user";

pub const ADD_FAILED: &str = "Failed to add order";
pub const UPDATE_FAILED: &str = "Failed to update order";
pub const DELETE_FAILED: &str = "Failed to delete order";
pub const ORDER_FETCHED: &str = "Fetched order";
pub const ORDER_FETCH_FAILED: &str = "Failed to fetch order";
pub const ORDERS_FETCHED: &str = "Fetched all orders";
pub const ORDERS_FETCH_FAILED: &str = "Failed to fetch orders";

pub const LOGS_FETCHED: &str = "Fetched logs";
pub const LOGS_FETCH_FAILED: &str = "Failed to fetch logs";

pub fn order_added(title: &str, amount: &str) -> String {
    format!("Added order: {}, amount: {}", title, amount)
}

pub fn order_updated(title: &str, amount: &str) -> String {
    format!("Updated order: {}, amount: {}", title, amount)
}

pub fn order_deleted(id: &str) -> String {
    format!("Deleted order with ID: {}", id)
}
