// Token classification: numbers by parity, alphabetic words, special
// characters, plus the derived sum and concatenation.

use serde::Serialize;
use tracing::debug;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Aggregate output of one classification pass.
///
/// Every sequence preserves the input order of the tokens assigned to it.
/// Field names match the JSON response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub odd_numbers: Vec<String>,
    pub even_numbers: Vec<String>,
    pub alphabets: Vec<String>,
    pub special_characters: Vec<String>,
    pub sum: String,
    pub concat_string: String,
}

impl ClassificationResult {
    /// Total number of tokens placed across all four categories.
    pub fn token_count(&self) -> usize {
        self.odd_numbers.len()
            + self.even_numbers.len()
            + self.alphabets.len()
            + self.special_characters.len()
    }
}

/// The category a single token falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// A numeric literal. `value` is the truncated integer (saturating at the
    /// `i128` bounds); `odd` is taken from the last integer digit so it stays
    /// exact for literals of any length.
    Number { value: i128, odd: bool },
    Alphabetic,
    Special,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a single token by its text.
///
/// Priority order: number literal, all-letters word, single non-alphanumeric
/// character, then a character re-scan. A mixed token such as `"AB3"` falls
/// through to the re-scan and is kept whole as a special token.
pub fn classify_token(token: &str) -> TokenClass {
    if let Some((value, odd)) = parse_number(token) {
        return TokenClass::Number { value, odd };
    }

    if !token.is_empty() && token.chars().all(is_letter) {
        return TokenClass::Alphabetic;
    }

    let mut chars = token.chars();
    if let (Some(only), None) = (chars.next(), chars.next()) {
        if !only.is_ascii_digit() && !is_letter(only) {
            return TokenClass::Special;
        }
    }

    // Re-scan. Only the empty token reaches the alphabetic arm here: it has
    // no non-letter characters.
    if token.chars().all(is_letter) {
        TokenClass::Alphabetic
    } else {
        TokenClass::Special
    }
}

/// Classify an ordered sequence of tokens.
pub fn classify<S: AsRef<str>>(tokens: &[S]) -> ClassificationResult {
    let mut result = ClassificationResult::default();
    let mut sum: i128 = 0;

    for token in tokens {
        let token = token.as_ref();
        match classify_token(token) {
            TokenClass::Number { value, odd } => {
                sum = sum.saturating_add(value);
                if odd {
                    result.odd_numbers.push(token.to_string());
                } else {
                    result.even_numbers.push(token.to_string());
                }
            }
            TokenClass::Alphabetic => result.alphabets.push(token.to_ascii_uppercase()),
            TokenClass::Special => result.special_characters.push(token.to_string()),
        }
    }

    result.sum = sum.to_string();
    result.concat_string = transform(&result.alphabets);

    debug!(
        tokens = tokens.len(),
        odd = result.odd_numbers.len(),
        even = result.even_numbers.len(),
        alphabets = result.alphabets.len(),
        special = result.special_characters.len(),
        "classified tokens"
    );

    result
}

/// Build the concatenation string from alphabetic tokens.
///
/// All letters are collected left to right and lower-cased, the sequence is
/// reversed, then re-cased so even positions are upper case and odd positions
/// lower case.
pub fn transform<S: AsRef<str>>(alphabets: &[S]) -> String {
    let mut letters: Vec<char> = alphabets
        .iter()
        .flat_map(|token| token.as_ref().chars())
        .filter(|c| is_letter(*c))
        .map(|c| c.to_ascii_lowercase())
        .collect();
    letters.reverse();

    letters
        .into_iter()
        .enumerate()
        .map(|(i, c)| if i % 2 == 0 { c.to_ascii_uppercase() } else { c })
        .collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Parse a decimal literal: optional sign, then `digits`, `digits.`,
/// `digits.digits` or `.digits`, with surrounding ASCII whitespace ignored.
/// Returns the truncated integer value and its parity.
fn parse_number(text: &str) -> Option<(i128, bool)> {
    let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
    let (negative, unsigned) = match trimmed.as_bytes().first()? {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (unsigned, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let magnitude = int_part.bytes().fold(0i128, |acc, b| {
        acc.saturating_mul(10).saturating_add(i128::from(b - b'0'))
    });
    let value = if negative { -magnitude } else { magnitude };
    let odd = int_part
        .bytes()
        .last()
        .is_some_and(|b| (b - b'0') % 2 == 1);

    Some((value, odd))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
