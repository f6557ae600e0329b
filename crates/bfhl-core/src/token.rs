// Boundary normalization: turn the JSON `data` payload into textual tokens.

use serde_json::{Number, Value};

use crate::classifier::{classify, ClassificationResult};
use crate::error::ClassifyError;

/// Normalize a JSON payload into the token sequence the classifier expects.
///
/// Anything other than an array is rejected with
/// [`ClassifyError::InvalidInput`]. Array elements are rendered as text the
/// way a JavaScript client would stringify them.
pub fn tokens_from_json(value: &Value) -> Result<Vec<String>, ClassifyError> {
    let Value::Array(items) = value else {
        return Err(ClassifyError::InvalidInput);
    };
    Ok(items.iter().map(token_text).collect())
}

/// Normalize and classify in one step.
pub fn classify_json(value: &Value) -> Result<ClassificationResult, ClassifyError> {
    let tokens = tokens_from_json(value)?;
    Ok(classify(&tokens))
}

fn token_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        // Nested containers are not scalars; keep their compact JSON form.
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Integral floats print without a fractional part (`4.0` -> `"4"`).
fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_array_payloads_are_invalid() {
        for payload in [json!({}), json!("abc"), json!(12), json!(true), json!(null)] {
            assert_eq!(
                tokens_from_json(&payload),
                Err(ClassifyError::InvalidInput),
                "payload {payload} should be rejected"
            );
        }
    }

    #[test]
    fn strings_pass_through_verbatim() {
        let tokens = tokens_from_json(&json!(["a", " 1 ", "", "$"])).unwrap();
        assert_eq!(tokens, vec!["a", " 1 ", "", "$"]);
    }

    #[test]
    fn scalars_are_stringified() {
        let tokens = tokens_from_json(&json!([1, -7, 4.0, 2.5, true, false, null])).unwrap();
        assert_eq!(tokens, vec!["1", "-7", "4", "2.5", "true", "false", "null"]);
    }

    #[test]
    fn nested_values_become_compact_json() {
        let tokens = tokens_from_json(&json!([[1, 2], {"k": "v"}])).unwrap();
        assert_eq!(tokens, vec!["[1,2]", r#"{"k":"v"}"#]);
    }

    #[test]
    fn classify_json_mixes_numbers_and_strings() {
        let result = classify_json(&json!([1, "2", "a", true, "$"])).unwrap();
        assert_eq!(result.odd_numbers, vec!["1"]);
        assert_eq!(result.even_numbers, vec!["2"]);
        assert_eq!(result.alphabets, vec!["A", "TRUE"]);
        assert_eq!(result.special_characters, vec!["$"]);
        assert_eq!(result.sum, "3");
        assert_eq!(result.concat_string, "EuRtA");
    }

    #[test]
    fn classify_json_rejects_object() {
        assert_eq!(
            classify_json(&json!({"data": []})),
            Err(ClassifyError::InvalidInput)
        );
    }
}
