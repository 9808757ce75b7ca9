use thiserror::Error;

/// An invalid code configuration.
///
/// These are raised while a mask table is being derived. There is nothing to
/// recover: the configuration has to be fixed and the table derived again.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Error)]
pub enum ConfigError {
    #[error("word size {0} is not a power of two")]
    WordSizeNotPowerOfTwo(u32),

    #[error("word size {0} is wider than the 64 bit mask type")]
    WordSizeTooLarge(u32),

    #[error("at least one polynomial is required")]
    ZeroPolynomials,

    #[error("constraint length must be at least one")]
    ZeroConstraintLength,

    #[error("puncturing matrix is empty")]
    EmptyMatrix,

    /// The matrix length is not a multiple of the polynomial count.
    #[error("puncturing matrix length {len} is not divisible by {num_poly} polynomials")]
    NotDivisible { len: usize, num_poly: usize },

    #[error("puncturing matrix flag {value} at index {index} is not 0 or 1")]
    InvalidFlag { index: usize, value: u8 },

    #[error("polynomial {poly} is out of range for {num_poly} polynomials")]
    PolyOutOfRange { poly: usize, num_poly: usize },

    /// Every bit of this polynomial is punctured.
    #[error("polynomial {0} has no kept bits in the puncturing matrix")]
    EmptyRow(usize),

    /// A word has to hold at least one full cycle of the matrix.
    #[error("a {word_size} bit word cannot hold a matrix cycle of {total} kept bits")]
    WordTooNarrow { total: usize, word_size: u32 },

    /// Left shifts can only move a kept bit towards the most significant end.
    #[error("bit {bit} of polynomial {poly} would need to move backwards")]
    BackwardShift { poly: usize, bit: usize },

    #[error("bit position {position} of polynomial {poly} does not fit in a {word_size} bit word")]
    MaskOverflow {
        poly: usize,
        position: usize,
        word_size: u32,
    },

    #[error("two bits of polynomial {poly} collide at position {position} after the {shift} bit shift")]
    Collision {
        poly: usize,
        position: usize,
        shift: u32,
    },
}

/// Errors returned by index unwrapping and mask derivation.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Replicating the puncturing pattern produced fewer kept bits than asked for.
    #[error("requested {requested} kept bits but the unwrapped pattern only has {available}")]
    InsufficientBits { requested: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
