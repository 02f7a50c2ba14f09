//! Typed view over the gateway's log feed.
//!
//! The feed itself is opaque and is always echoed verbatim. When entries
//! match the log service's `{user, action}` shape they can also be read as
//! [`LogRecord`]s for display.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub user: String,
    pub action: String,
}

impl LogRecord {
    /// Reads a log feed payload as records.
    ///
    /// Returns `None` unless the payload is an array whose every entry has
    /// string `user` and `action` fields.
    pub fn parse_feed(payload: &Value) -> Option<Vec<LogRecord>> {
        payload
            .as_array()?
            .iter()
            .map(|entry| serde_json::from_value(entry.clone()).ok())
            .collect()
    }
}
