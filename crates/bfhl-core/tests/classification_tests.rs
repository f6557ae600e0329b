// Integration tests for the classifier's public API.
//
// Cover the properties that must hold for any input: every token lands in
// exactly one category, the sum matches the numeric tokens, and the result
// is deterministic.

use bfhl_core::classifier::{classify_token, TokenClass};
use bfhl_core::{classify, classify_json, transform, ClassifyError};
use serde_json::json;

/// A spread of tokens touching every classification branch.
fn varied_tokens() -> Vec<String> {
    [
        "0", "1", "-1", "42", "-42", "3.99", "-0.5", "007", "+6", "abc", "XyZ", "Q", "", "$",
        "&", " ", "é", "AB3", "a-b", "1e5", "--", "12abc", "null",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[test]
fn every_token_is_assigned_exactly_once() {
    let tokens = varied_tokens();
    let result = classify(&tokens);
    assert_eq!(result.token_count(), tokens.len());

    let mut remaining: Vec<String> = result
        .odd_numbers
        .iter()
        .chain(&result.even_numbers)
        .chain(&result.special_characters)
        .cloned()
        .collect();
    remaining.extend(result.alphabets.iter().cloned());

    // Each input token appears (upper-cased when alphabetic) exactly once.
    for token in &tokens {
        let expected = match classify_token(token) {
            TokenClass::Alphabetic => token.to_ascii_uppercase(),
            _ => token.clone(),
        };
        let pos = remaining
            .iter()
            .position(|t| *t == expected)
            .unwrap_or_else(|| panic!("token {token:?} missing from result"));
        remaining.remove(pos);
    }
    assert!(remaining.is_empty(), "extra tokens: {remaining:?}");
}

#[test]
fn sum_matches_integer_values_of_number_tokens() {
    let tokens = varied_tokens();
    let expected: i128 = tokens
        .iter()
        .filter_map(|t| match classify_token(t) {
            TokenClass::Number { value, .. } => Some(value),
            _ => None,
        })
        .sum();
    // 0 + 1 - 1 + 42 - 42 + 3 + 0 + 7 + 6
    assert_eq!(expected, 16);
    assert_eq!(classify(&tokens).sum, expected.to_string());
}

#[test]
fn categories_preserve_input_order() {
    let result = classify(&["9", "b", "2", "#", "7", "a", "4", "@"]);
    assert_eq!(result.odd_numbers, vec!["9", "7"]);
    assert_eq!(result.even_numbers, vec!["2", "4"]);
    assert_eq!(result.alphabets, vec!["B", "A"]);
    assert_eq!(result.special_characters, vec!["#", "@"]);
    assert_eq!(result.concat_string, "Ab");
}

#[test]
fn classification_is_deterministic() {
    let tokens = varied_tokens();
    assert_eq!(classify(&tokens), classify(&tokens));
}

#[test]
fn concat_string_is_transform_of_alphabets() {
    let result = classify(&varied_tokens());
    assert_eq!(result.concat_string, transform(&result.alphabets));
    assert_eq!(transform::<String>(&[]), "");
}

#[test]
fn json_boundary_rejects_non_arrays() {
    assert_eq!(classify_json(&json!({})), Err(ClassifyError::InvalidInput));
    assert_eq!(classify_json(&json!("a,b")), Err(ClassifyError::InvalidInput));
}

#[test]
fn json_boundary_matches_string_classification() {
    let from_json = classify_json(&json!(["a", "1", "334", "4", "R", "$"])).unwrap();
    let from_strings = classify(&["a", "1", "334", "4", "R", "$"]);
    assert_eq!(from_json, from_strings);
}
