use crate::error::Precondition;

/// Inclusive integer bounds `[min, max]` with `min <= max` checked up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntRange {
    min: i64,
    max: i64,
}

impl IntRange {
    /// The bounds booleans are derived through.
    pub const BOOLEAN: IntRange = IntRange { min: 0, max: 1 };

    pub fn new(min: i64, max: i64) -> Result<Self, Precondition> {
        if max < min {
            return Err(Precondition::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(self) -> i64 {
        self.min
    }

    pub fn max(self) -> i64 {
        self.max
    }

    /// Number of values in the range, `max - min + 1`. Wider than `i64` so the
    /// full `i64` domain does not overflow.
    pub fn span(self) -> u128 {
        (i128::from(self.max) - i128::from(self.min) + 1) as u128
    }

    pub fn contains(self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Maps a 32-bit roll onto the range as `(roll mod span) + min`.
    ///
    /// The plain modulo keeps the small bias towards low values whenever the
    /// span does not divide 2^32. Published outcomes depend on it.
    pub fn reduce(self, roll: u32) -> i64 {
        let offset = u128::from(roll) % self.span();
        // offset < span, so min + offset <= max
        (i128::from(self.min) + offset as i128) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_bounds() {
        assert_eq!(
            IntRange::new(5, 4),
            Err(Precondition::InvertedRange { min: 5, max: 4 })
        );
        assert!(IntRange::new(4, 4).is_ok());
    }

    #[test]
    fn span_covers_full_domain() {
        let full = IntRange::new(i64::MIN, i64::MAX).unwrap();
        assert_eq!(full.span(), 1u128 << 64);
        assert_eq!(full.reduce(0), i64::MIN);
        assert_eq!(full.reduce(u32::MAX), i64::MIN + i64::from(u32::MAX));
    }

    #[test]
    fn reduce_is_modulo_plus_min() {
        let die = IntRange::new(1, 6).unwrap();
        assert_eq!(die.reduce(2_822_079_407), 6);
        assert_eq!(die.reduce(0), 1);
        assert_eq!(die.reduce(5), 6);
        assert_eq!(die.reduce(6), 1);

        let negative = IntRange::new(-10, -8).unwrap();
        assert_eq!(negative.reduce(0), -10);
        assert_eq!(negative.reduce(4), -9);
        assert!(negative.contains(negative.reduce(u32::MAX)));
    }

    #[test]
    fn single_value_range_is_constant() {
        let one = IntRange::new(-3, -3).unwrap();
        assert_eq!(one.span(), 1);
        assert_eq!(one.reduce(123_456), -3);
    }
}
