//! Numeric coercion of form input.
//!
//! Order ids and amounts arrive as text. They are coerced to numbers right
//! before each request with no validation: anything that does not read as a
//! number becomes [`Numeric::Invalid`] and is sent as such. The gateway
//! decides what to do with it.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Largest integer magnitude that survives an `f64` round trip exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A coerced numeric input value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    /// A number (possibly infinite).
    Number(f64),
    /// The not-a-number sentinel for text that does not read as a number.
    Invalid,
}

impl Numeric {
    /// Coerces form text into a number.
    ///
    /// - Surrounding whitespace is ignored, and blank text reads as `0`.
    /// - Decimal notation with optional sign, fraction and exponent.
    /// - `Infinity` with an optional sign.
    /// - Unsigned `0x`, `0o` and `0b` prefixed integers.
    ///
    /// Everything else yields [`Numeric::Invalid`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ordergate_core::Numeric;
    ///
    /// assert_eq!(Numeric::coerce(" 42 "), Numeric::Number(42.0));
    /// assert_eq!(Numeric::coerce(""), Numeric::Number(0.0));
    /// assert_eq!(Numeric::coerce("abc"), Numeric::Invalid);
    /// ```
    pub fn coerce(input: &str) -> Self {
        let text = input.trim();
        if text.is_empty() {
            return Self::Number(0.0);
        }

        match text {
            "Infinity" | "+Infinity" => return Self::Number(f64::INFINITY),
            "-Infinity" => return Self::Number(f64::NEG_INFINITY),
            _ => {}
        }

        if let Some(value) = parse_prefixed_integer(text) {
            return value;
        }

        // f64::from_str also accepts "inf"/"nan" spellings; restrict to plain decimal syntax
        let is_decimal_syntax = text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
        if !is_decimal_syntax {
            return Self::Invalid;
        }

        f64::from_str(text).map_or(Self::Invalid, Self::Number)
    }

    /// Returns the numeric value, or `None` for the sentinel.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Invalid => None,
        }
    }

    /// Check if this is the not-a-number sentinel
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    /// Returns the value as an integer when it is finite and has no fraction.
    fn as_exact_integer(&self) -> Option<i64> {
        match self {
            Self::Number(v) if v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER => {
                Some(*v as i64)
            }
            _ => None,
        }
    }
}

impl From<&str> for Numeric {
    fn from(input: &str) -> Self {
        Self::coerce(input)
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

/// Renders the value the way it appears in paths and feedback messages.
impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(int) = self.as_exact_integer() {
            return write!(f, "{}", int);
        }
        match self {
            Self::Invalid => write!(f, "NaN"),
            Self::Number(v) if v.is_infinite() && *v > 0.0 => write!(f, "Infinity"),
            Self::Number(v) if v.is_infinite() => write!(f, "-Infinity"),
            Self::Number(v) => f.write_str(&shortest_decimal(*v)),
        }
    }
}

/// Formats a finite number with the shortest round-trip digits, switching to
/// exponent notation outside `1e-7 < |v| < 1e21`.
fn shortest_decimal(v: f64) -> String {
    let scientific = format!("{:e}", v.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return v.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return v.to_string();
    };

    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let len = digits.len() as i32;
    // Position of the decimal point relative to the first digit
    let point = exponent + 1;

    let body = if len <= point && point <= 21 {
        format!("{}{}", digits, "0".repeat((point - len) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{}.{}", int, frac)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
    } else {
        let (first, rest) = digits.split_at(1);
        let sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, exponent.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, exponent.abs())
        }
    };

    if v < 0.0 { format!("-{}", body) } else { body }
}

/// A numeric form field: the text as typed together with its coerced value.
///
/// Requests carry the value; feedback messages echo the text.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericField {
    text: String,
    value: Numeric,
}

impl NumericField {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let value = Numeric::coerce(&text);
        Self { text, value }
    }

    /// The text as entered.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> Numeric {
        self.value
    }
}

impl From<&str> for NumericField {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for NumericField {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<Numeric> for NumericField {
    fn from(value: Numeric) -> Self {
        Self {
            text: value.to_string(),
            value,
        }
    }
}

impl From<i64> for NumericField {
    fn from(value: i64) -> Self {
        Numeric::from(value).into()
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for NumericField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

/// Integral values encode as JSON integers; the sentinel and infinities as `null`.
impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(int) = self.as_exact_integer() {
            return serializer.serialize_i64(int);
        }
        match self {
            Self::Number(v) if v.is_finite() => serializer.serialize_f64(*v),
            _ => serializer.serialize_none(),
        }
    }
}

fn parse_prefixed_integer(text: &str) -> Option<Numeric> {
    let (radix, digits) = match text.get(..2) {
        Some("0x") | Some("0X") => (16, &text[2..]),
        Some("0o") | Some("0O") => (8, &text[2..]),
        Some("0b") | Some("0B") => (2, &text[2..]),
        _ => return None,
    };

    if digits.is_empty() {
        return Some(Numeric::Invalid);
    }

    let value = digits.chars().try_fold(0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value.map_or(Numeric::Invalid, Numeric::Number))
}
