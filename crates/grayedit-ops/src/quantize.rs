//! Conversion of real-valued samples back to 8 bits.

/// Clamps to `[0, 255]` and rounds half to even, the way a clamped 8-bit
/// array stores an assigned real. NaN becomes 0.
#[inline]
pub(crate) fn to_u8(v: f64) -> u8 {
    v.clamp(0.0, 255.0).round_ties_even() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_u8() {
        assert_eq!(to_u8(-3.0), 0);
        assert_eq!(to_u8(300.0), 255);
        assert_eq!(to_u8(127.5), 128);
        assert_eq!(to_u8(126.5), 126);
        assert_eq!(to_u8(12.49), 12);
        assert_eq!(to_u8(f64::NAN), 0);
    }
}
