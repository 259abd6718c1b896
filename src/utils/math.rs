//! Shared numeric helpers for score and percentage handling.

/// Round `value` to `places` decimal places. Exact ties go to the even
/// neighbour, so `round_to(3.125, 2)` is 3.12.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Share of `count` in `total` as a percentage rounded to 2 decimals.
/// Returns 0.0 when `total` is zero.
pub fn percentage_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(count as f64 / total as f64 * 100.0, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_two_places() {
        assert_eq!(round_to(33.333333, 2), 33.33);
        assert_eq!(round_to(66.666666, 2), 66.67);
        assert_eq!(round_to(90.0, 2), 90.0);
    }

    #[test]
    fn test_round_to_three_places_negative() {
        assert_eq!(round_to(-0.123456, 3), -0.123);
        assert_eq!(round_to(-0.7, 3), -0.7);
    }

    #[test]
    fn test_round_to_ties_go_even() {
        assert_eq!(round_to(3.125, 2), 3.12);
        assert_eq!(round_to(15.625, 2), 15.62);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(-3.125, 2), -3.12);
    }

    #[test]
    fn test_percentage_of_binary_ties() {
        assert_eq!(percentage_of(1, 32), 3.12);
        assert_eq!(percentage_of(5, 32), 15.62);
        assert_eq!(percentage_of(1, 160), 0.62);
    }

    #[test]
    fn test_percentage_of_zero_total() {
        assert_eq!(percentage_of(0, 0), 0.0);
        assert_eq!(percentage_of(5, 0), 0.0);
    }

    #[test]
    fn test_percentage_of_thirds() {
        assert_eq!(percentage_of(1, 3), 33.33);
        assert_eq!(percentage_of(2, 3), 66.67);
        assert_eq!(percentage_of(3, 3), 100.0);
    }
}
