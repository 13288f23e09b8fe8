//! Lenient conversions from loosely typed JSON input.
//!
//! Form-driven clients send numbers as strings and single values where a
//! list is expected. Each helper returns `Ok(None)` for an absent or null
//! value and `Err(Mismatch)` when the value is present but unusable.

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Mismatch;

/// Normalize a string or list of strings into a list of trimmed, non-blank
/// entries. Scalars become a one-element list; unusable types yield `None`.
pub(crate) fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = match value? {
        Value::String(s) => vec![s.trim().to_string()],
        Value::Number(n) => vec![n.to_string()],
        Value::Array(values) => values
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => return None,
    };
    Some(items.into_iter().filter(|s| !s.is_empty()).collect())
}

pub(crate) fn integer(value: Option<&Value>) -> Result<Option<i64>, Mismatch> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Ok(Some(i));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Some(f as i64)),
                _ => Err(Mismatch),
            }
        }
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<i64>().map(Some).map_err(|_| Mismatch)
        }
        Some(_) => Err(Mismatch),
    }
}

pub(crate) fn number(value: Option<&Value>) -> Result<Option<f64>, Mismatch> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_f64().map(Some).ok_or(Mismatch),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            match s.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(Some(f)),
                _ => Err(Mismatch),
            }
        }
        Some(_) => Err(Mismatch),
    }
}

pub(crate) fn boolean(value: Option<&Value>) -> Result<Option<bool>, Mismatch> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(Mismatch),
        },
        Some(_) => Err(Mismatch),
    }
}

pub(crate) fn text(value: Option<&Value>) -> Result<Option<String>, Mismatch> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(_) => Err(Mismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_list_wraps_scalar() {
        let v = json!("Action");
        assert_eq!(string_list(Some(&v)), Some(vec!["Action".to_string()]));
    }

    #[test]
    fn test_string_list_drops_blank_entries() {
        let v = json!(["RPG", "  ", "Strategy ", 3, null]);
        assert_eq!(
            string_list(Some(&v)),
            Some(vec!["RPG".to_string(), "Strategy".to_string(), "3".to_string()])
        );
    }

    #[test]
    fn test_string_list_rejects_objects() {
        let v = json!({"a": 1});
        assert_eq!(string_list(Some(&v)), None);
        assert_eq!(string_list(None), None);
    }

    #[test]
    fn test_integer_accepts_numeric_strings() {
        assert_eq!(integer(Some(&json!("1995"))), Ok(Some(1995)));
        assert_eq!(integer(Some(&json!(" 42 "))), Ok(Some(42)));
        assert_eq!(integer(Some(&json!(2001.0))), Ok(Some(2001)));
        assert_eq!(integer(Some(&json!(""))), Ok(None));
        assert_eq!(integer(Some(&Value::Null)), Ok(None));
    }

    #[test]
    fn test_integer_rejects_garbage() {
        assert_eq!(integer(Some(&json!("abc"))), Err(Mismatch));
        assert_eq!(integer(Some(&json!("1995abc"))), Err(Mismatch));
        assert_eq!(integer(Some(&json!(19.5))), Err(Mismatch));
        assert_eq!(integer(Some(&json!(true))), Err(Mismatch));
    }

    #[test]
    fn test_number_parses_strings() {
        assert_eq!(number(Some(&json!("4.5"))), Ok(Some(4.5)));
        assert_eq!(number(Some(&json!(3))), Ok(Some(3.0)));
        assert_eq!(number(Some(&json!("NaN"))), Err(Mismatch));
        assert_eq!(number(Some(&json!("five"))), Err(Mismatch));
    }

    #[test]
    fn test_boolean_accepts_string_forms() {
        assert_eq!(boolean(Some(&json!("TRUE"))), Ok(Some(true)));
        assert_eq!(boolean(Some(&json!(false))), Ok(Some(false)));
        assert_eq!(boolean(Some(&json!("yes"))), Err(Mismatch));
        assert_eq!(boolean(None), Ok(None));
    }

    #[test]
    fn test_text_trims() {
        assert_eq!(text(Some(&json!("  Nintendo "))), Ok(Some("Nintendo".to_string())));
        assert_eq!(text(Some(&json!(7))), Err(Mismatch));
    }
}
