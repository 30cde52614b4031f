//! Lenient integer reading for catalog and cart payloads.
//!
//! Upstream data is hand-maintained and arrives with prices and stock counts
//! as numbers, numeric strings, or garbage. One policy is
//! shared by the catalog loader and the cart codec:
//!
//! - JSON numbers are accepted; fractions truncate toward zero.
//! - Strings use a leading-integer parse: optional leading whitespace, an
//!   optional sign, then decimal digits. Trailing text is ignored, so
//!   `"12abc"` reads as 12.
//! - Negative values, booleans, arrays, objects and strings without leading
//!   digits are malformed.
//! - `null` and missing fields are absent.
//!
//! Callers map both malformed and absent values to 0 and decide whether to
//! log the coercion.

use serde_json::{Number, Value};
use vitrine_core::{Product, ProductId};

/// Read an identifier that may be a string or a number.
///
/// Numbers use their JSON text (`7` -> `"7"`); blank strings and every other
/// type yield `None`.
#[must_use]
pub fn lenient_id(value: &Value) -> Option<ProductId> {
    match value {
        Value::String(s) => ProductId::parse(s).ok(),
        Value::Number(n) => ProductId::parse(&n.to_string()).ok(),
        _ => None,
    }
}

/// Read a display name.
///
/// Non-blank strings are kept as-is and numbers use their JSON text; anything
/// else becomes [`Product::UNTITLED`].
#[must_use]
pub fn lenient_name(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => Product::UNTITLED.to_string(),
    }
}

/// Outcome of reading a non-negative integer leniently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LenientInt {
    /// A usable value.
    Parsed(u64),
    /// The field was missing or `null`.
    Absent,
    /// The field was present but could not be read as a non-negative integer.
    Malformed,
}

impl LenientInt {
    /// Read a field value.
    #[must_use]
    pub fn read(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::Number(n)) => from_number(n),
            Some(Value::String(s)) => from_str(s),
            Some(_) => Self::Malformed,
        }
    }

    /// The parsed value, or 0 for absent and malformed input.
    #[must_use]
    pub const fn or_zero(self) -> u64 {
        match self {
            Self::Parsed(v) => v,
            Self::Absent | Self::Malformed => 0,
        }
    }

    /// Like [`or_zero`](Self::or_zero), saturating into a `u32`.
    #[must_use]
    pub fn or_zero_u32(self) -> u32 {
        u32::try_from(self.or_zero()).unwrap_or(u32::MAX)
    }

    /// Returns true if the input was present but unreadable.
    #[must_use]
    pub const fn is_malformed(self) -> bool {
        matches!(self, Self::Malformed)
    }
}

fn from_number(n: &Number) -> LenientInt {
    if let Some(v) = n.as_u64() {
        return LenientInt::Parsed(v);
    }
    if n.is_i64() {
        return LenientInt::Malformed;
    }
    match n.as_f64() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        // Finite and non-negative; `as` saturates at u64::MAX.
        Some(f) if f.is_finite() && f >= 0.0 => LenientInt::Parsed(f.trunc() as u64),
        _ => LenientInt::Malformed,
    }
}

fn from_str(s: &str) -> LenientInt {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, s.get(1..).unwrap_or_default()),
        Some(b'+') => (false, s.get(1..).unwrap_or_default()),
        _ => (false, s),
    };

    let digits: Vec<u64> = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|b| u64::from(b - b'0'))
        .collect();
    if digits.is_empty() {
        return LenientInt::Malformed;
    }

    let magnitude = digits
        .iter()
        .fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(*d));

    if negative && magnitude > 0 {
        LenientInt::Malformed
    } else {
        LenientInt::Parsed(magnitude)
    }
}
