//! Canonical text form of record values.
//!
//! Every regex in a condition runs against text, and every template
//! substitution inserts text, so all of it goes through [`stringify`].

use serde_json::{Number, Value};
use std::borrow::Cow;

/// Magnitudes outside `[1e-4, 1e21)` switch to scientific notation.
const SCIENTIFIC_LOW: f64 = 1e-4;
const SCIENTIFIC_HIGH: f64 = 1e21;

/// Render a JSON value as text.
///
/// - strings are returned unchanged (no quoting)
/// - integral numbers have no fractional part or exponent
/// - booleans are `true` / `false`
/// - `null` is the empty string
/// - objects and arrays are compact JSON
///
/// # Example
///
/// ```
/// use kmenu::stringify;
/// use serde_json::json;
///
/// assert_eq!(stringify(&json!("nginx")), "nginx");
/// assert_eq!(stringify(&json!(3.0)), "3");
/// assert_eq!(stringify(&json!(null)), "");
/// ```
#[must_use]
pub fn stringify(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Number(n) => Cow::Owned(format_number(n)),
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

/// Render a JSON number.
///
/// Integral values print as plain integers even when they were written with
/// a fractional part (`3.0` → `3`). Floats of magnitude `1e21` or more print
/// in exponent form, whole-valued or not.
#[must_use]
pub fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    n.as_f64().map_or_else(|| n.to_string(), format_float)
}

fn format_float(f: f64) -> String {
    if !f.is_finite() {
        return f.to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }
    let abs = f.abs();
    if (SCIENTIFIC_LOW..SCIENTIFIC_HIGH).contains(&abs) {
        if f.fract() == 0.0 {
            format!("{f:.0}")
        } else {
            f.to_string()
        }
    } else {
        format!("{f:e}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_are_unchanged() {
        assert_eq!(stringify(&json!("a \"quoted\" value")), "a \"quoted\" value");
        assert_eq!(stringify(&json!("")), "");
    }

    #[test]
    fn integral_numbers() {
        assert_eq!(stringify(&json!(42)), "42");
        assert_eq!(stringify(&json!(-7)), "-7");
        assert_eq!(stringify(&json!(9090.0)), "9090");
        assert_eq!(stringify(&json!(u64::MAX)), "18446744073709551615");
        assert_eq!(stringify(&json!(-0.0)), "0");
    }

    #[test]
    fn fractional_numbers() {
        assert_eq!(stringify(&json!(0.25)), "0.25");
        assert_eq!(stringify(&json!(-1.5)), "-1.5");
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        assert_eq!(stringify(&json!(0.00001)), "1e-5");
        // Whole-valued floats at or above 1e21 are not expanded to digits.
        assert_eq!(stringify(&json!(1e21)), "1e21");
        assert_eq!(stringify(&json!(1.5e300)), "1.5e300");
        assert_eq!(stringify(&json!(1e20)), "100000000000000000000");
    }

    #[test]
    fn booleans_and_null() {
        assert_eq!(stringify(&json!(true)), "true");
        assert_eq!(stringify(&json!(false)), "false");
        assert_eq!(stringify(&Value::Null), "");
    }

    #[test]
    fn structured_values_are_compact_json() {
        assert_eq!(stringify(&json!({"name": "nginx"})), r#"{"name":"nginx"}"#);
        assert_eq!(stringify(&json!([1, "a"])), r#"[1,"a"]"#);
    }
}
