//! Lenient conversion of the `importe` and `usdt` request fields to numbers.

use serde_json::Value;

use crate::Error;

/// Convert a JSON amount to an `f64`.
///
/// Entry forms often send amounts as text or leave them blank, so:
/// - a missing field, `null`, `false`, `0`, `""`, `[]` and `{}` become `0.0`,
/// - `true` becomes `1.0`,
/// - numbers are used as-is,
/// - strings are parsed as decimal numbers, ignoring surrounding whitespace.
///
/// # Errors
/// Returns [Error::InvalidAmount] for text that is not a number, non-empty
/// arrays and objects, and values that are not finite (e.g. `"inf"`).
pub fn coerce_amount(field: &'static str, value: Option<&Value>) -> Result<f64, Error> {
    let invalid = || Error::InvalidAmount {
        field,
        value: value.map(Value::to_string).unwrap_or_default(),
    };

    let amount = match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Bool(flag)) => f64::from(u8::from(*flag)),
        Some(Value::Number(number)) => number.as_f64().ok_or_else(invalid)?,
        Some(Value::String(text)) if text.is_empty() => 0.0,
        Some(Value::String(text)) => text.trim().parse::<f64>().map_err(|_| invalid())?,
        Some(Value::Array(items)) if items.is_empty() => 0.0,
        Some(Value::Object(fields)) if fields.is_empty() => 0.0,
        Some(_) => return Err(invalid()),
    };

    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::Error;

    use super::coerce_amount;

    #[track_caller]
    fn must_coerce(value: Value) -> f64 {
        coerce_amount("importe", Some(&value))
            .unwrap_or_else(|error| panic!("could not coerce {value}: {error}"))
    }

    #[test]
    fn missing_amount_is_zero() {
        assert_eq!(coerce_amount("importe", None), Ok(0.0));
    }

    #[test]
    fn falsy_values_are_zero() {
        for value in [json!(null), json!(false), json!(0), json!(""), json!([]), json!({})] {
            assert_eq!(must_coerce(value), 0.0);
        }
    }

    #[test]
    fn numbers_are_kept() {
        assert_eq!(must_coerce(json!(98.5)), 98.5);
        assert_eq!(must_coerce(json!(-12)), -12.0);
        assert_eq!(must_coerce(json!(true)), 1.0);
    }

    #[test]
    fn numeric_text_is_parsed() {
        assert_eq!(must_coerce(json!("50")), 50.0);
        assert_eq!(must_coerce(json!(" 12.75 ")), 12.75);
        assert_eq!(must_coerce(json!("1e3")), 1000.0);
    }

    #[test]
    fn non_numeric_text_is_an_error() {
        let got = coerce_amount("usdt", Some(&json!("doce")));

        assert_eq!(
            got,
            Err(Error::InvalidAmount {
                field: "usdt",
                value: "\"doce\"".to_owned()
            })
        );
    }

    #[test]
    fn whitespace_only_text_is_an_error() {
        assert!(coerce_amount("importe", Some(&json!("  "))).is_err());
    }

    #[test]
    fn non_finite_text_is_an_error() {
        assert!(coerce_amount("importe", Some(&json!("inf"))).is_err());
        assert!(coerce_amount("importe", Some(&json!("NaN"))).is_err());
    }

    #[test]
    fn non_empty_collections_are_errors() {
        assert!(coerce_amount("importe", Some(&json!([1]))).is_err());
        assert!(coerce_amount("importe", Some(&json!({"a": 1}))).is_err());
    }
}
