//! Validation and totalling for the sum endpoint.
//!
//! Validation runs in two passes so the error reported is deterministic:
//! the container shape is checked before any element is inspected.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::SumError;

/// Largest magnitude at which every integer is exactly representable in `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Validate the `numbers` field of a sum request and add it up.
///
/// `numbers` is `None` when the body has no such field (or no body at all).
pub fn total(numbers: Option<&Value>) -> Result<f64, SumError> {
    let items = match numbers {
        Some(Value::Array(items)) => items,
        _ => return Err(SumError::NotAnArray),
    };

    let values = items
        .iter()
        .map(numeric_value)
        .collect::<Option<Vec<f64>>>()
        .ok_or(SumError::NonNumeric)?;

    Ok(values.into_iter().fold(0.0, |acc, n| acc + n))
}

/// Literals beyond the `f64` range (e.g. `1e400`) become infinities.
fn numeric_value(value: &Value) -> Option<f64> {
    let Value::Number(n) = value else {
        return None;
    };
    n.as_f64()
        .or_else(|| n.to_string().parse::<f64>().ok())
        .filter(|n| !n.is_nan())
}

/// A computed total, rendered the way JSON clients expect numbers.
///
/// Integral values within the safe-integer range serialize as JSON integers
/// (`6` rather than `6.0`). Non-finite totals serialize as `null`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Total(pub f64);

impl Serialize for Total {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let n = self.0;
        if !n.is_finite() {
            serializer.serialize_none()
        } else if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
            // -0.0 lands here too and renders as 0
            serializer.serialize_i64(n as i64)
        } else {
            serializer.serialize_f64(n)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sums_mixed_integers_and_floats() {
        let body = json!([1, 2, 3.5]);
        assert_eq!(total(Some(&body)).unwrap(), 6.5);
    }

    #[test]
    fn empty_array_totals_zero() {
        let body = json!([]);
        assert_eq!(total(Some(&body)).unwrap(), 0.0);
    }

    #[test]
    fn negative_numbers_are_accepted() {
        let body = json!([-1.5, 4, -2]);
        assert_eq!(total(Some(&body)).unwrap(), 0.5);
    }

    #[test]
    fn matches_sequential_float_addition() {
        let nums = [0.1, 0.2, 0.3, 1e-9, 42.0];
        let body = json!(nums);
        let expected = nums.iter().fold(0.0, |acc, n| acc + n);
        assert_eq!(total(Some(&body)).unwrap(), expected);
    }

    #[test]
    fn missing_field_is_not_an_array() {
        assert!(matches!(total(None), Err(SumError::NotAnArray)));
    }

    #[test]
    fn non_array_values_are_rejected() {
        for value in [json!("not-an-array"), json!(5), json!(null), json!({"a": 1})] {
            assert!(matches!(total(Some(&value)), Err(SumError::NotAnArray)));
        }
    }

    #[test]
    fn non_numeric_elements_are_rejected() {
        for value in [
            json!([1, "x"]),
            json!([true]),
            json!([null]),
            json!([[1]]),
            json!([{"n": 1}]),
            json!(["1"]),
        ] {
            assert!(matches!(total(Some(&value)), Err(SumError::NonNumeric)));
        }
    }

    #[test]
    fn error_messages_are_exact() {
        assert_eq!(SumError::NotAnArray.to_string(), "numbers must be an array");
        assert_eq!(
            SumError::NonNumeric.to_string(),
            "numbers must contain only numeric values"
        );
    }

    #[test]
    fn total_renders_integral_values_as_integers() {
        assert_eq!(serde_json::to_string(&Total(6.0)).unwrap(), "6");
        assert_eq!(serde_json::to_string(&Total(-3.0)).unwrap(), "-3");
        assert_eq!(serde_json::to_string(&Total(6.5)).unwrap(), "6.5");
        let big = serde_json::to_string(&Total(1e300)).unwrap();
        assert_eq!(big.parse::<f64>().unwrap(), 1e300);
    }

    #[test]
    fn out_of_range_literals_become_infinite() {
        let body: Value = serde_json::from_str("[1e400, 1]").unwrap();
        assert_eq!(total(Some(&body)).unwrap(), f64::INFINITY);

        let body: Value = serde_json::from_str("[-1e400]").unwrap();
        assert_eq!(total(Some(&body)).unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn overflowing_total_renders_null() {
        let body = json!([f64::MAX, f64::MAX]);
        let sum = total(Some(&body)).unwrap();
        assert!(sum.is_infinite());
        assert_eq!(serde_json::to_string(&Total(sum)).unwrap(), "null");
    }
}
