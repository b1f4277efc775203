/// Raw values above this are already percentages; the rest are fractions.
pub const FRACTION_UPPER_BOUND: f64 = 1.0;

/// Bring a raw similarity value onto the 0–100 scale.
///
/// Producers send either a fraction (`0.979`) or a percentage (`97.9`) with
/// no unit flag. Values above 1.0 are taken as percentages, everything else
/// is multiplied by 100. Absent and NaN values count as 0.
///
/// A genuine confidence of exactly 1 % is indistinguishable from the
/// fraction 1.0 and is reported as 100 %.
///
/// # Examples
///
/// ```
/// use gate_core::calculations::normalize_confidence;
///
/// assert_eq!(normalize_confidence(Some(97.9)), 97.9);
/// assert_eq!(normalize_confidence(Some(1.0)), 100.0);
/// assert_eq!(normalize_confidence(None), 0.0);
/// ```
pub fn normalize_confidence(value: Option<f64>) -> f64 {
    match value {
        None => 0.0,
        Some(v) if v.is_nan() => 0.0,
        Some(v) if v > FRACTION_UPPER_BOUND => v,
        Some(v) => v * 100.0,
    }
}

/// Rounded mean of already-normalized confidences, `0` for no values.
///
/// Halves round towards positive infinity, so `68.5` gives `69` and `-2.5`
/// gives `-2`.
pub fn mean_confidence(values: impl IntoIterator<Item = f64>) -> i64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return 0;
    }
    (sum / count as f64 + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_is_scaled() {
        assert!((normalize_confidence(Some(0.979)) - 97.9).abs() < 1e-9);
        assert!((normalize_confidence(Some(0.5)) - 50.0).abs() < 1e-9);
        assert_eq!(normalize_confidence(Some(0.0)), 0.0);
    }

    #[test]
    fn test_percentage_is_unchanged() {
        assert_eq!(normalize_confidence(Some(97.9)), 97.9);
        assert_eq!(normalize_confidence(Some(48.99)), 48.99);
    }

    #[test]
    fn test_boundary_one_is_a_fraction() {
        assert_eq!(normalize_confidence(Some(1.0)), 100.0);
        assert_eq!(normalize_confidence(Some(1.0001)), 1.0001);
    }

    #[test]
    fn test_missing_values_are_zero() {
        assert_eq!(normalize_confidence(None), 0.0);
        assert_eq!(normalize_confidence(Some(f64::NAN)), 0.0);
    }

    #[test]
    fn test_out_of_range_passes_through() {
        assert_eq!(normalize_confidence(Some(250.0)), 250.0);
    }

    #[test]
    fn test_mean_confidence() {
        assert_eq!(mean_confidence([98.0, 40.0]), 69);
        assert_eq!(mean_confidence([97.4]), 97);
        assert_eq!(mean_confidence([50.5]), 51);
        assert_eq!(mean_confidence(std::iter::empty()), 0);
    }

    #[test]
    fn test_mean_confidence_negative_halves_round_up() {
        assert_eq!(mean_confidence([-2.5]), -2);
        assert_eq!(mean_confidence([-1.0, -4.0]), -2);
        assert_eq!(mean_confidence([-2.6]), -3);
    }
}
