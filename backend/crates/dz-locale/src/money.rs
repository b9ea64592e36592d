//! Dinar amounts and digit grouping.
//!
//! Prices are carried through the system as integer centimes and rendered
//! once, at the edge, in the fr-DZ commercial convention: space-grouped
//! thousands, comma decimal separator, `DA` suffix.

/// Formats an amount of centimes as a dinar display string.
///
/// # Examples
///
/// ```
/// use dz_locale::format_dzd;
///
/// assert_eq!(format_dzd(1_500_000), "15 000,00 DA");
/// assert_eq!(format_dzd(995), "9,95 DA");
/// assert_eq!(format_dzd(0), "0,00 DA");
/// assert_eq!(format_dzd(-25_050), "-250,50 DA");
/// ```
#[must_use]
pub fn format_dzd(centimes: i64) -> String {
    let magnitude = centimes.unsigned_abs();
    // Pad to three digits so the split always leaves an integer digit.
    let text = format!("{magnitude:03}");
    let chars: Vec<char> = text.chars().collect();
    let split = chars.len().saturating_sub(2);
    let dinars: String = chars.iter().take(split).collect();
    let fraction: String = chars.iter().skip(split).collect();
    let sign = if centimes < 0 { "-" } else { "" };
    format!("{sign}{},{fraction} DA", group_magnitude(&dinars))
}

/// Formats an integer with thousands groups separated by spaces.
///
/// # Examples
///
/// ```
/// use dz_locale::group_digits;
///
/// assert_eq!(group_digits(15_000), "15 000");
/// assert_eq!(group_digits(-1_500), "-1 500");
/// assert_eq!(group_digits(250), "250");
/// ```
#[must_use]
pub fn group_digits(value: i64) -> String {
    let grouped = group_magnitude(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Splits a digit string into groups of three, counted from the right.
fn group_magnitude(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut groups: Vec<String> = chars
        .rchunks(3)
        .map(|group| group.iter().collect())
        .collect();
    groups.reverse();
    groups.join(" ")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{format_dzd, group_digits};

    #[rstest]
    #[case::zero(0, "0,00 DA")]
    #[case::centimes_only(5, "0,05 DA")]
    #[case::under_a_dinar(95, "0,95 DA")]
    #[case::round_amount(1_500_000, "15 000,00 DA")]
    #[case::with_fraction(1_234_567, "12 345,67 DA")]
    #[case::seven_figure_price(125_000_000, "1 250 000,00 DA")]
    #[case::negative(-25_050, "-250,50 DA")]
    #[case::negative_centimes(-5, "-0,05 DA")]
    fn formats_dinar_amounts(#[case] centimes: i64, #[case] expected: &str) {
        assert_eq!(format_dzd(centimes), expected);
    }

    #[rstest]
    #[case::zero(0, "0")]
    #[case::short(250, "250")]
    #[case::exact_group(1_000, "1 000")]
    #[case::two_groups(15_000, "15 000")]
    #[case::three_groups(1_234_567, "1 234 567")]
    #[case::negative(-1_500, "-1 500")]
    #[case::extreme(i64::MIN, "-9 223 372 036 854 775 808")]
    fn groups_thousands(#[case] value: i64, #[case] expected: &str) {
        assert_eq!(group_digits(value), expected);
    }
}
