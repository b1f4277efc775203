use rust_decimal::prelude::*;

use crate::calculations::normalize_confidence;

/// Format a raw similarity value as a normalized percentage label.
///
/// One decimal; an exact tie in the binary value rounds away from zero.
///
/// # Examples
///
/// ```
/// use gate_core::formatting::format_confidence;
///
/// assert_eq!(format_confidence(Some(0.5)), "50.0%");
/// assert_eq!(format_confidence(Some(97.94)), "97.9%");
/// assert_eq!(format_confidence(Some(12.25)), "12.3%");
/// assert_eq!(format_confidence(None), "0.0%");
/// ```
pub fn format_confidence(value: Option<f64>) -> String {
    format!("{}%", one_decimal(normalize_confidence(value)))
}

fn one_decimal(value: f64) -> String {
    match Decimal::from_f64_retain(value) {
        Some(d) => {
            let rounded = d.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.1}", rounded)
        }
        // Out of Decimal range.
        None => format!("{:.1}", value),
    }
}

/// Format the efficiency counter as a whole percentage, e.g. `"69%"`.
pub fn format_efficiency(efficiency: i64) -> String {
    format!("{}%", efficiency)
}

/// Clamp an efficiency value into `[0, 1]` for gauge widths.
///
/// The stored value is never clamped; this is for rendering only.
pub fn efficiency_ratio(efficiency: i64) -> f64 {
    (efficiency.clamp(0, 100) as f64) / 100.0
}

/// Format a count with thousands separators.
///
/// # Examples
///
/// ```
/// use gate_core::formatting::format_count;
///
/// assert_eq!(format_count(7), "7");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(value: usize) -> String {
    group_thousands(&value.to_string())
}

/// Show `-` for an absent or empty value.
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "-".to_string(),
    }
}

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let remainder = s.len() % 3;
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i != 0 && i % 3 == remainder {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_confidence_fraction_and_percentage() {
        assert_eq!(format_confidence(Some(0.979)), "97.9%");
        assert_eq!(format_confidence(Some(97.9)), "97.9%");
        assert_eq!(format_confidence(Some(1.0)), "100.0%");
    }

    #[test]
    fn test_format_confidence_fixes_oversized_percentages() {
        // 48.99 must not be scaled to 4899%.
        assert_eq!(format_confidence(Some(48.99)), "49.0%");
    }

    #[test]
    fn test_format_confidence_exact_ties_round_up() {
        assert_eq!(format_confidence(Some(12.25)), "12.3%");
        assert_eq!(format_confidence(Some(50.25)), "50.3%");
        assert_eq!(format_confidence(Some(1.25)), "1.3%");
        assert_eq!(format_confidence(Some(98.75)), "98.8%");
    }

    #[test]
    fn test_format_confidence_near_ties_follow_binary_value() {
        // 0.15 and 0.35 are stored just below the tie.
        assert_eq!(one_decimal(0.15), "0.1");
        assert_eq!(one_decimal(0.35), "0.3");
    }

    #[test]
    fn test_format_efficiency() {
        assert_eq!(format_efficiency(69), "69%");
        assert_eq!(format_efficiency(0), "0%");
    }

    #[test]
    fn test_efficiency_ratio_is_clamped() {
        assert_eq!(efficiency_ratio(50), 0.5);
        assert_eq!(efficiency_ratio(250), 1.0);
        assert_eq!(efficiency_ratio(-3), 0.0);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(123456), "123,456");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some("2")), "2");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(None), "-");
    }
}
