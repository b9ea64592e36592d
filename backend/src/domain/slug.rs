//! Slug validation shared by courses and categories.
//!
//! Slugs identify courses and categories in URLs. They are trimmed,
//! non-empty identifiers composed of lowercase ASCII letters, digits, and
//! hyphens.

/// Return `true` when `value` is a valid URL slug.
///
/// Any multi-byte character fails the per-byte class checks, so the
/// byte-wise scan rejects non-ASCII input without a separate pass.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value.trim() == value
        && value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

#[cfg(test)]
mod tests {
    //! Unit tests for slug validation.

    use rstest::rstest;

    use super::is_valid_slug;

    #[rstest]
    #[case::simple("python-debutant", true)]
    #[case::with_digits("alg-2024", true)]
    #[case::single_letter("a", true)]
    #[case::empty("", false)]
    #[case::padded(" python-debutant ", false)]
    #[case::uppercase("Python-Debutant", false)]
    #[case::accented("python-débutant", false)]
    #[case::spaced("python debutant", false)]
    #[case::underscored("python_debutant", false)]
    fn slug_validation(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(value), expected);
    }
}
