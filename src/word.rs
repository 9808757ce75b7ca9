use crate::error::ConfigError;

/// Width in bits of the machine word the masks operate on.
///
/// Always a power of two no wider than 64, so every mask fits a `u64`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct WordSize(u32);

impl WordSize {
    pub const MAX_BITS: u32 = 64;

    pub fn new(bits: u32) -> Result<WordSize, ConfigError> {
        if !bits.is_power_of_two() {
            return Err(ConfigError::WordSizeNotPowerOfTwo(bits));
        }
        if bits > Self::MAX_BITS {
            return Err(ConfigError::WordSizeTooLarge(bits));
        }
        Ok(WordSize(bits))
    }

    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Number of shift stages, `log2(bits)`.
    #[inline]
    pub fn log2(self) -> u32 {
        self.0.trailing_zeros()
    }

    /// A word with every usable bit set.
    #[inline]
    pub fn full_mask(self) -> u64 {
        if self.0 == Self::MAX_BITS {
            u64::MAX
        } else {
            (1u64 << self.0) - 1
        }
    }

    /// Single bit mask for `position`, or `None` when it falls outside the word.
    #[inline]
    pub fn bit(self, position: usize) -> Option<u64> {
        if position < self.0 as usize {
            Some(1u64 << position)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WordSize;
    use crate::error::ConfigError;

    #[test]
    fn accepts_powers_of_two() {
        for &bits in &[1, 2, 8, 16, 32, 64] {
            assert_eq!(WordSize::new(bits).unwrap().bits(), bits);
        }
        assert_eq!(WordSize::new(32).unwrap().log2(), 5);
        assert_eq!(WordSize::new(1).unwrap().log2(), 0);
    }

    #[test]
    fn rejects_24_bits() {
        assert_eq!(WordSize::new(24), Err(ConfigError::WordSizeNotPowerOfTwo(24)));
        assert_eq!(WordSize::new(0), Err(ConfigError::WordSizeNotPowerOfTwo(0)));
    }

    #[test]
    fn rejects_wider_than_u64() {
        assert_eq!(WordSize::new(128), Err(ConfigError::WordSizeTooLarge(128)));
    }

    #[test]
    fn full_mask_and_bits() {
        assert_eq!(WordSize::new(8).unwrap().full_mask(), 0xff);
        assert_eq!(WordSize::new(64).unwrap().full_mask(), u64::MAX);

        let word = WordSize::new(8).unwrap();
        assert_eq!(word.bit(7), Some(0x80));
        assert_eq!(word.bit(8), None);
    }
}
