use crate::error::{ConfigError, Result};
use crate::mask::{derive_table, MaskTable};
use crate::matrix::{PuncturingMatrix, StandardMatrix};
use crate::word::WordSize;

/// A validated code configuration.
///
/// `constraint_length` is carried through to the derived table but does not
/// change the masks.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct CodeConfig {
    word: WordSize,
    constraint_length: usize,
    matrix: PuncturingMatrix,
}

impl CodeConfig {
    pub fn new(
        word_size: u32,
        constraint_length: usize,
        num_poly: usize,
        flags: &[u8],
    ) -> Result<CodeConfig> {
        let word = WordSize::new(word_size)?;
        let matrix = PuncturingMatrix::new(flags, num_poly)?;
        Ok(CodeConfig::from_parts(word, constraint_length, matrix)?)
    }

    pub fn from_parts(
        word: WordSize,
        constraint_length: usize,
        matrix: PuncturingMatrix,
    ) -> std::result::Result<CodeConfig, ConfigError> {
        if constraint_length == 0 {
            return Err(ConfigError::ZeroConstraintLength);
        }
        Ok(CodeConfig {
            word,
            constraint_length,
            matrix,
        })
    }

    pub fn standard(
        word_size: u32,
        constraint_length: usize,
        standard: StandardMatrix,
    ) -> Result<CodeConfig> {
        CodeConfig::new(
            word_size,
            constraint_length,
            standard.num_poly(),
            standard.flags(),
        )
    }

    #[inline]
    pub fn word_size(&self) -> WordSize {
        self.word
    }

    #[inline]
    pub fn constraint_length(&self) -> usize {
        self.constraint_length
    }

    #[inline]
    pub fn matrix(&self) -> &PuncturingMatrix {
        &self.matrix
    }

    /// Derives the shift/mask table for every polynomial.
    pub fn derive(&self) -> Result<MaskTable> {
        derive_table(self)
    }
}
