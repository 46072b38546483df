//! Shared utility functions used across multiple modules.

use chrono::{DateTime, Utc};

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Render a Unix millisecond timestamp as an RFC 3339 UTC string.
///
/// Out-of-range values render as `"invalid"`.
pub fn format_unix_millis(value: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(value)
        .map_or_else(|| "invalid".to_string(), |at| at.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_rejects_empty() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("   ".to_string())), None);
    }

    #[test]
    fn normalize_text_option_trims_value() {
        assert_eq!(
            normalize_text_option(Some(" ref-42 ".to_string())),
            Some("ref-42".to_string())
        );
    }

    #[test]
    fn format_unix_millis_renders_epoch() {
        assert_eq!(format_unix_millis(0), "1970-01-01T00:00:00+00:00");
    }
}
