//! Currency amounts: "$26,991,707" <-> 26991707.0

use tracing::debug;

/// Parse a currency-formatted string into an amount
///
/// Strips surrounding whitespace, a leading `$` and thousands separators,
/// then requires a plain non-negative decimal. Anything else (words,
/// "million", ranges, a second currency symbol) yields `None`.
///
/// # Examples
///
/// ```
/// use dodcon_domain::parse_money;
///
/// assert_eq!(parse_money("$26,991,707"), Some(26_991_707.0));
/// assert_eq!(parse_money("$1,500.50"), Some(1500.5));
/// assert_eq!(parse_money("$5 million"), None);
/// ```
pub fn parse_money(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let digits: String = unsigned.chars().filter(|c| *c != ',').collect();

    let well_formed = !digits.is_empty()
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1;

    if !well_formed {
        debug!("Unparseable money amount: {:?}", text);
        return None;
    }

    match digits.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            debug!("Unparseable money amount: {:?}", text);
            None
        }
    }
}

/// Render an amount as "$" plus a comma-grouped number
///
/// Integral amounts have no decimals; others get two decimals with trailing
/// zeros and a dangling point trimmed.
///
/// # Examples
///
/// ```
/// use dodcon_domain::format_money;
///
/// assert_eq!(format_money(1_000_000.00), "$1,000,000");
/// assert_eq!(format_money(1500.5), "$1,500.5");
/// assert_eq!(format_money(0.25), "$0.25");
/// ```
pub fn format_money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    let rendered = if magnitude.fract() == 0.0 {
        format!("{:.0}", magnitude)
    } else {
        let fixed = format!("{:.2}", magnitude);
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    };

    let (integer, fraction) = match rendered.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let mut out = format!("{}${}", sign, group_thousands(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: formatting then parsing returns the same amount
        #[test]
        fn test_money_round_trip(cents in 0u64..100_000_000_000_000u64) {
            let amount = cents as f64 / 100.0;
            prop_assert_eq!(parse_money(&format_money(amount)), Some(amount));
        }

        /// Property: whole-dollar amounts never render a decimal point
        #[test]
        fn test_whole_dollars_have_no_point(dollars in 0u64..1_000_000_000_000u64) {
            let rendered = format_money(dollars as f64);
            prop_assert!(!rendered.contains('.'), "{} has a point", rendered);
        }
    }
}
