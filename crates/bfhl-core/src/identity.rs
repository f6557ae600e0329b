// Identity record echoed in responses, plus the field checks used by the
// config loader and the interactive setup.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Lower-case, underscore-separated full name (e.g. `john_doe`).
    pub full_name: String,
    /// Birth date in DDMMYYYY form.
    pub birth_date: String,
    pub email: String,
    pub roll_number: String,
}

impl UserInfo {
    /// Identifier tagged onto every response: `{full_name}_{birth_date}`.
    pub fn user_id(&self) -> String {
        format!("{}_{}", self.full_name, self.birth_date)
    }
}

/// Lower-case a display name and join its words with underscores.
pub fn normalize_full_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Exactly eight ASCII digits.
pub fn is_valid_birth_date(s: &str) -> bool {
    s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Accepts `local@domain.tld`: one `@`, no whitespace, and a dot in the
/// domain with at least one character on each side.
pub fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UserInfo {
        UserInfo {
            full_name: "john_doe".into(),
            birth_date: "17091999".into(),
            email: "john@xyz.com".into(),
            roll_number: "ABCD123".into(),
        }
    }

    #[test]
    fn user_id_joins_name_and_birth_date() {
        assert_eq!(sample().user_id(), "john_doe_17091999");
    }

    #[test]
    fn normalize_full_name_lowercases_and_joins() {
        assert_eq!(normalize_full_name("John Doe"), "john_doe");
        assert_eq!(normalize_full_name("  Mary   Ann\tSmith "), "mary_ann_smith");
        assert_eq!(normalize_full_name(""), "");
    }

    #[test]
    fn birth_date_requires_eight_digits() {
        assert!(is_valid_birth_date("17091999"));
        assert!(!is_valid_birth_date("1709199"));
        assert!(!is_valid_birth_date("17-09-1999"));
        assert!(!is_valid_birth_date("1709199a"));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("john@xyz.com"));
        assert!(is_valid_email("a.b@c.d.e"));
        assert!(!is_valid_email("john@xyz"));
        assert!(!is_valid_email("@xyz.com"));
        assert!(!is_valid_email("john@.com"));
        assert!(!is_valid_email("john@xyz."));
        assert!(!is_valid_email("jo hn@xyz.com"));
        assert!(!is_valid_email("john@x@yz.com"));
    }
}
