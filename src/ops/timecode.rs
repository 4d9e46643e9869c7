/// Parses a time code typed by the user into seconds.
///
/// Accepts `SS`, `MM:SS` and `HH:MM:SS`. Each component is a whole number; a
/// trailing `.dd` fraction on the last component is tolerated and dropped, so the
/// output of [`format`] parses back to whole seconds. Returns `None` for empty
/// input, more than three components, or any component that is not a number.
/// Negative and out-of-range components are accepted as-is.
pub fn parse(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() > 3 {
        return None;
    }

    let last = parts.len() - 1;
    let mut total: i64 = 0;
    for (i, part) in parts.into_iter().enumerate() {
        let value = parse_component(part, i == last)?;
        total = total.checked_mul(60)?.checked_add(value)?;
    }
    Some(total as f64)
}

fn parse_component(part: &str, is_last: bool) -> Option<i64> {
    let part = part.trim();
    let (whole, fraction) = match part.split_once('.') {
        Some(_) if !is_last => return None,
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (part, None),
    };

    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }

    let digits = whole.strip_prefix(['-', '+']).unwrap_or(whole);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    whole.parse::<i64>().ok()
}

/// Formats seconds as `MM:SS.cc`, or `HH:MM:SS.cc` from one hour up.
///
/// The hundredths are truncated, never rounded. Negative and non-finite
/// input formats as zero.
pub fn format(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let whole = seconds.floor();
    // Bias only the fraction so 1.29 doesn't floor to 1.28; whole seconds stay exact.
    let centis = (((seconds - whole) * 100.0 + 1e-6).floor() as u64).min(99);

    let total_secs = whole as u64;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3600;

    if total_secs >= 3600 {
        format!("{:02}:{:02}:{:02}.{:02}", hours, mins, secs, centis)
    } else {
        format!("{:02}:{:02}.{:02}", total_secs / 60, secs, centis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepted_forms() {
        assert_eq!(parse("45"), Some(45.0));
        assert_eq!(parse("1:05"), Some(65.0));
        assert_eq!(parse("01:02:03"), Some(3723.0));
        assert_eq!(parse(" 2:00 "), Some(120.0));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("1::2"), None);
        assert_eq!(parse("ab:10"), None);
        assert_eq!(parse("1:2:3:4"), None);
        assert_eq!(parse("5abc"), None);
        assert_eq!(parse("1:"), None);
        assert_eq!(parse("3."), None);
        assert_eq!(parse("1.5:30"), None);
        assert_eq!(parse("1.99:00:10"), None);
        assert_eq!(parse("1:2.5:10"), None);
    }

    #[test]
    fn test_parse_does_not_range_check() {
        assert_eq!(parse("-5"), Some(-5.0));
        assert_eq!(parse("0:75"), Some(75.0));
        assert_eq!(parse("1:99:99"), Some(3600.0 + 99.0 * 60.0 + 99.0));
    }

    #[test]
    fn test_parse_drops_fraction() {
        assert_eq!(parse("01:05.25"), Some(65.0));
        assert_eq!(parse("7.99"), Some(7.0));
    }

    #[test]
    fn test_format_minutes_and_hours() {
        assert_eq!(format(0.0), "00:00.00");
        assert_eq!(format(65.25), "01:05.25");
        assert_eq!(format(59.999), "00:59.99");
        assert_eq!(format(3599.99), "59:59.99");
        assert_eq!(format(3600.0), "01:00:00.00");
        assert_eq!(format(3723.5), "01:02:03.50");
    }

    #[test]
    fn test_format_truncates_hundredths() {
        assert_eq!(format(1.299), "00:01.29");
        assert_eq!(format(1.29), "00:01.29");
        assert_eq!(format(10.005), "00:10.00");
    }

    #[test]
    fn test_format_clamps_bad_input() {
        assert_eq!(format(-3.0), "00:00.00");
        assert_eq!(format(f64::NAN), "00:00.00");
    }

    #[test]
    fn test_format_then_parse_keeps_whole_seconds() {
        let samples = [
            0.0, 0.42, 1.29, 59.99, 60.0, 61.5, 599.01, 3599.999, 3600.0, 3661.75, 86399.5,
            359999.99,
        ];
        for x in samples {
            assert_eq!(parse(&format(x)), Some(x.floor()), "value {x}");
        }
        for centis in (0..36_000_000u64).step_by(9_737) {
            let x = centis as f64 / 100.0 + 0.004;
            assert_eq!(parse(&format(x)), Some(x.floor()), "value {x}");
        }
    }
}
