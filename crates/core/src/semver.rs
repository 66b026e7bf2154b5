//! Semantic version comparison for update checks.
//!
//! Releases carry plain `MAJOR.MINOR.PATCH` version strings (a leading `v`
//! and missing trailing parts are tolerated). Anything that does not parse
//! falls back to
//! string inequality so a malformed catalog entry still signals "different
//! version available" rather than silently suppressing updates.

/// Parse `[v]MAJOR[.MINOR[.PATCH]]` into a numeric triple.
///
/// Missing trailing parts count as zero, so `1.2` and `1.2.0` parse to the
/// same triple. Returns `None` for more than three parts, non-numeric
/// parts, or pre-release suffixes.
pub fn parse_version(v: &str) -> Option<(u64, u64, u64)> {
    let v = v.trim().strip_prefix('v').unwrap_or_else(|| v.trim());
    let parts: Vec<&str> = v.split('.').collect();
    if parts.len() > 3 {
        return None;
    }
    let mut nums = [0u64; 3];
    for (slot, part) in nums.iter_mut().zip(&parts) {
        *slot = part.parse().ok()?;
    }
    Some((nums[0], nums[1], nums[2]))
}

/// Whether `latest` is strictly newer than `current`.
///
/// When either side fails to parse, falls back to `latest != current`.
pub fn is_newer(latest: &str, current: &str) -> bool {
    match (parse_version(latest), parse_version(current)) {
        (Some(l), Some(c)) => l > c,
        _ => latest != current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_v_prefixed_versions() {
        assert_eq!(parse_version("1.2.3"), Some((1, 2, 3)));
        assert_eq!(parse_version("v0.10.0"), Some((0, 10, 0)));
        assert_eq!(parse_version(" 2.0.1 "), Some((2, 0, 1)));
    }

    #[test]
    fn short_versions_pad_missing_parts_with_zeros() {
        assert_eq!(parse_version("1.2"), Some((1, 2, 0)));
        assert_eq!(parse_version("2"), Some((2, 0, 0)));
        assert!(!is_newer("1.2.0", "1.2"));
        assert!(is_newer("1.2.1", "1.2"));
    }

    #[test]
    fn rejects_malformed_versions() {
        assert_eq!(parse_version("1.2.3.4"), None);
        assert_eq!(parse_version("1.2.x"), None);
        assert_eq!(parse_version(""), None);
    }

    #[test]
    fn compares_numerically_not_lexically() {
        assert!(is_newer("1.10.0", "1.9.9"));
        assert!(is_newer("2.0.0", "1.99.99"));
        assert!(!is_newer("1.2.3", "1.2.3"));
        assert!(!is_newer("1.2.2", "1.2.3"));
    }

    #[test]
    fn unparsable_versions_fall_back_to_inequality() {
        assert!(is_newer("1.2.3-beta", "1.2.3"));
        assert!(!is_newer("nightly", "nightly"));
    }
}
