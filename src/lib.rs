//! # Puncture Masks
//!
//! Derives the shift/mask tables that let a punctured convolutional encoder
//! interleave its polynomial outputs a whole machine word at a time.
//!
//! Each polynomial's raw output word is spread by a short series of
//! `word = (word & !mask) | ((word & mask) << shift)` steps, one per power of
//! two, after which the polynomials are ORed together at their offsets. The
//! table is computed once per code configuration and can be kept as constant
//! data afterwards (see `demos/build-shift-masks.rs`).
//!
//! ```
//! use puncture_masks::{derive_shift_masks, StandardMatrix};
//!
//! let table = derive_shift_masks(8, 7, 2, StandardMatrix::N2Rate1_2.flags()).unwrap();
//! assert_eq!(table.interleave(&[0b1111, 0b0000]), Some(0b0101_0101));
//! ```
//!
//! Enabling the `debug_masks` feature prints every derivation stage.

#[macro_use]
mod debug;

mod config;
mod error;
mod mask;
mod matrix;
mod unwrap;
mod word;

pub use config::CodeConfig;
pub use error::{ConfigError, Error, Result};
pub use mask::{derive_shift_masks, MaskTable, PolyMasks, ShiftMask};
pub use matrix::{PuncturingMatrix, StandardMatrix};
pub use unwrap::{input_indices, output_indices};
pub use word::WordSize;
