// Math utilities and helper functions

/// Band inside which a scalar is treated as exactly zero
pub const ZERO_EPSILON: f64 = f64::EPSILON;

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Check if a value is within `ZERO_EPSILON` of zero
pub fn approx_zero(value: f64) -> bool {
    value.abs() <= ZERO_EPSILON
}

/// Move `current` toward zero by `step`, snapping to exactly zero once the
/// value crosses or lands inside the epsilon band
pub fn relax_toward_zero(current: f64, step: f64) -> f64 {
    if approx_zero(current) {
        0.0
    } else if current > 0.0 {
        let next = current - step;
        if next < ZERO_EPSILON {
            0.0
        } else {
            next
        }
    } else {
        let next = current + step;
        if next > -ZERO_EPSILON {
            0.0
        } else {
            next
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_approx_zero() {
        assert!(approx_zero(0.0));
        assert!(approx_zero(-f64::EPSILON / 2.0));
        assert!(!approx_zero(0.001));
    }

    #[test]
    fn test_relax_positive_snaps() {
        assert_eq!(relax_toward_zero(5.0, 2.0), 3.0);
        assert_eq!(relax_toward_zero(1.0, 2.0), 0.0);
    }

    #[test]
    fn test_relax_negative_snaps() {
        assert_eq!(relax_toward_zero(-5.0, 2.0), -3.0);
        assert_eq!(relax_toward_zero(-1.0, 2.0), 0.0);
    }

    #[test]
    fn test_relax_inside_band_is_zero() {
        assert_eq!(relax_toward_zero(f64::EPSILON / 4.0, 1.0), 0.0);
    }
}
