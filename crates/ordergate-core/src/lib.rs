//! Domain types shared by the ordergate crates: orders, numeric coercion,
//! operation results, feedback messages and configuration.

pub mod config;
pub mod error;
pub mod log_record;
pub mod messages;
pub mod numeric;
pub mod order;
pub mod result;

// Re-export common types
pub use config::{ClientConfig, ReadStatusPolicy, ResultOrdering};
pub use error::{GatewayError, Result};
pub use log_record::LogRecord;
pub use numeric::{Numeric, NumericField};
pub use order::Order;
pub use result::{OperationResult, Outcome};
