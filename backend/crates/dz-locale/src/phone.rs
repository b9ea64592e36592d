//! Phone-number display formatting.
//!
//! Contact numbers arrive in whatever shape an operator typed: bare digits,
//! spaced pairs, or an international `213` prefix. Rendering collapses the
//! input to its ASCII digits and regroups them so every surface shows the
//! same string. Inputs matching none of the known shapes pass through
//! untouched.

/// International dialling prefix for Algeria.
const COUNTRY_CODE: &str = "213";

/// Digits in a subscriber number without the trunk prefix.
const SUBSCRIBER_DIGITS: usize = 9;

/// Digits in a trunk-prefixed national number.
const NATIONAL_DIGITS: usize = 10;

/// Fewest subscriber digits the international grouping can fill.
const MIN_SUBSCRIBER_DIGITS: usize = 7;

/// Formats a raw phone number using Algerian display conventions.
///
/// The ASCII digits of `raw` (every other character is separator noise)
/// select the first matching rule:
///
/// 1. Digits prefixed with the `213` country code render as `+213` followed
///    by the subscriber digits grouped one-two-two-two, with any remaining
///    digits as a single trailing group.
/// 2. Exactly nine digits gain the `0` trunk prefix and render in pairs.
/// 3. Exactly ten digits already starting with `0` render in pairs.
/// 4. Anything else, the empty string aside, is returned exactly as
///    supplied, separators and all.
///
/// A country-code match with fewer than seven subscriber digits cannot fill
/// its groups and falls back to rule 4; the later shape rules are not
/// consulted once the prefix has matched.
///
/// # Examples
///
/// ```
/// use dz_locale::format_phone;
///
/// assert_eq!(format_phone("213512345678"), "+213 5 12 34 56 78");
/// assert_eq!(format_phone("512 345 678"), "05 12 34 56 78");
/// assert_eq!(format_phone("0512345678"), "05 12 34 56 78");
/// assert_eq!(format_phone("poste 24"), "poste 24");
/// ```
#[must_use]
pub fn format_phone(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if let Some(subscriber) = digits.strip_prefix(COUNTRY_CODE) {
        if subscriber.len() >= MIN_SUBSCRIBER_DIGITS {
            return format_international(subscriber);
        }
        return raw.to_owned();
    }
    if digits.len() == SUBSCRIBER_DIGITS {
        return format_pairs(&format!("0{digits}"));
    }
    if digits.len() == NATIONAL_DIGITS && digits.starts_with('0') {
        return format_pairs(&digits);
    }
    raw.to_owned()
}

/// Groups subscriber digits behind the `+213` prefix.
///
/// The caller guarantees at least [`MIN_SUBSCRIBER_DIGITS`] digits, enough
/// to fill the four fixed groups; whatever follows them lands in one
/// trailing group.
fn format_international(subscriber: &str) -> String {
    let mut digits = subscriber.chars();
    let mut groups: Vec<String> = Vec::new();
    for width in [1_usize, 2, 2, 2] {
        groups.push(digits.by_ref().take(width).collect());
    }
    let rest: String = digits.collect();
    if !rest.is_empty() {
        groups.push(rest);
    }
    format!("+{COUNTRY_CODE} {}", groups.join(" "))
}

/// Renders a digit string as space-separated pairs.
fn format_pairs(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let pairs: Vec<String> = chars.chunks(2).map(|pair| pair.iter().collect()).collect();
    pairs.join(" ")
}
