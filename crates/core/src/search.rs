//! Listing and text-search helpers shared by every list endpoint.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of rows per page on list endpoints.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Maximum number of rows per page on list endpoints.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Text search
// ---------------------------------------------------------------------------

/// Turn free text into an `ILIKE` pattern matching it anywhere in a column.
///
/// `%`, `_` and `\` in the input are escaped so they match literally.
/// Returns `None` for empty or whitespace-only input.
///
/// ```
/// use faena_core::search::build_like_pattern;
/// assert_eq!(build_like_pattern("cat 320"), Some("%cat 320%".to_string()));
/// assert_eq!(build_like_pattern("50%"), Some("%50\\%%".to_string()));
/// assert_eq!(build_like_pattern("  "), None);
/// ```
pub fn build_like_pattern(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut escaped = String::with_capacity(trimmed.len() + 2);
    for c in trimmed.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Some(format!("%{escaped}%"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- clamp_limit ---------------------------------------------------------

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 50, 500), 50);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(2000), 50, 500), 500);
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(-5), 50, 500), 1);
        assert_eq!(clamp_limit(Some(0), 50, 500), 1);
    }

    // -- clamp_offset --------------------------------------------------------

    #[test]
    fn clamp_offset_defaults_to_zero() {
        assert_eq!(clamp_offset(None), 0);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(Some(-10)), 0);
    }

    // -- build_like_pattern --------------------------------------------------

    #[test]
    fn like_pattern_wraps_term() {
        assert_eq!(
            build_like_pattern("excavadora"),
            Some("%excavadora%".to_string())
        );
    }

    #[test]
    fn like_pattern_trims_whitespace() {
        assert_eq!(build_like_pattern("  pala  "), Some("%pala%".to_string()));
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(build_like_pattern("a_b"), Some("%a\\_b%".to_string()));
    }

    #[test]
    fn like_pattern_empty_returns_none() {
        assert_eq!(build_like_pattern(""), None);
    }
}
