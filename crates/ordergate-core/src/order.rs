//! Order domain model.

use serde::Serialize;

use crate::numeric::NumericField;

/// An order record as sent to the gateway.
///
/// Orders are built from form fields immediately before a create or update
/// call and are not kept afterwards. `id` is supplied by the caller and is
/// also the key for lookup, update and delete. Numeric fields keep the text
/// as entered; only the coerced value is serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: NumericField,
    pub title: String,
    pub amount: NumericField,
}

impl Order {
    pub fn new(
        id: impl Into<NumericField>,
        title: impl Into<String>,
        amount: impl Into<NumericField>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            amount: amount.into(),
        }
    }

    /// Builds an order from raw form text, coercing `id` and `amount`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordergate_core::{Numeric, Order};
    ///
    /// let order = Order::from_form("1", "Widget", "5");
    /// assert_eq!(order.id.value(), Numeric::Number(1.0));
    /// assert_eq!(order.title, "Widget");
    /// ```
    pub fn from_form(id: &str, title: &str, amount: &str) -> Self {
        Self {
            id: NumericField::new(id),
            title: title.to_string(),
            amount: NumericField::new(amount),
        }
    }
}
