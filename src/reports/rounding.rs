use std::cmp::Ordering;

use crate::reports::types::Average;

/// Computes `sum / count` rounded to two decimal places.
///
/// The mean is rounded half-to-even on its exact rational value, so
/// `33 / 8 = 4.125` becomes `4.12` while `827 / 200 = 4.135` becomes `4.14`.
/// Returns `None` when `count` is zero.
pub fn round_mean(sum: i128, count: usize) -> Option<Average> {
    if count == 0 {
        return None;
    }
    let count = count as i128;
    let scaled = sum * 100;
    let quotient = scaled.div_euclid(count);
    let remainder = scaled.rem_euclid(count);

    let hundredths = match (2 * remainder).cmp(&count) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal if quotient % 2 == 0 => quotient,
        Ordering::Equal => quotient + 1,
    };

    Some(Average::from_hundredths(hundredths))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hundredths(sum: i128, count: usize) -> i128 {
        round_mean(sum, count).unwrap().hundredths()
    }

    #[test]
    fn test_zero_count_has_no_mean() {
        assert!(round_mean(0, 0).is_none());
        assert!(round_mean(12, 0).is_none());
    }

    #[test]
    fn test_exact_means() {
        assert_eq!(hundredths(12, 3), 400);
        assert_eq!(hundredths(9, 2), 450);
        assert_eq!(hundredths(15, 4), 375);
    }

    #[test]
    fn test_repeating_fractions() {
        // 13 / 3 = 4.333...
        assert_eq!(hundredths(13, 3), 433);
        // 14 / 3 = 4.666...
        assert_eq!(hundredths(14, 3), 467);
    }

    #[test]
    fn test_half_boundaries_round_to_even() {
        // 4.125 -> 4.12
        assert_eq!(hundredths(33, 8), 412);
        // 4.135 -> 4.14
        assert_eq!(hundredths(827, 200), 414);
        // 4.145 -> 4.14
        assert_eq!(hundredths(829, 200), 414);
        // 4.115 -> 4.12
        assert_eq!(hundredths(823, 200), 412);
    }

    #[test]
    fn test_exact_tie_differs_from_float_rounding() {
        // 43 / 40 = 1.075; the nearest f64 is slightly below, which float
        // rounding turns into 1.07
        assert_eq!(hundredths(43, 40), 108);
    }

    #[test]
    fn test_negative_means_round_symmetrically() {
        assert_eq!(hundredths(-33, 8), -412);
        assert_eq!(hundredths(-827, 200), -414);
        assert_eq!(hundredths(-13, 3), -433);
    }

    #[test]
    fn test_large_sums_do_not_overflow() {
        let sum = i64::MAX as i128 * 3;
        assert_eq!(hundredths(sum, 3), i64::MAX as i128 * 100);
    }
}
