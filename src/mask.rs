//! Shift/mask factorisation.
//!
//! Every kept bit of a polynomial has to travel `output - input` places to
//! reach its slot in the punctured, interleaved word. Those distances are
//! split into powers of two and applied largest first, so a whole word is
//! rearranged with at most `log2(word_size)` shift-and-mask steps.

use crate::config::CodeConfig;
use crate::error::{ConfigError, Result};
use crate::unwrap::{input_indices, output_indices};
use crate::word::WordSize;

/// One stage of the spreading network: bits set in `mask` move `shift`
/// places towards the most significant end.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ShiftMask {
    shift: u32,
    mask: u64,
}

impl ShiftMask {
    /// Returns `None` unless `shift` is less than 64.
    pub fn new(shift: u32, mask: u64) -> Option<ShiftMask> {
        if shift < 64 {
            Some(ShiftMask { shift, mask })
        } else {
            None
        }
    }

    #[inline]
    pub fn shift(self) -> u32 {
        self.shift
    }

    #[inline]
    pub fn mask(self) -> u64 {
        self.mask
    }

    #[inline]
    pub fn apply(self, word: u64) -> u64 {
        (word & !self.mask) | ((word & self.mask) << self.shift)
    }

    /// Undoes [`ShiftMask::apply`].
    #[inline]
    pub fn invert(self, word: u64) -> u64 {
        let moved = self.mask << self.shift;
        (word & !moved) | ((word & moved) >> self.shift)
    }
}

/// The derived stages for one polynomial.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct PolyMasks {
    poly: usize,
    bits: usize,
    keep: u64,
    placed: u64,
    offset: u32,
    stages: Vec<ShiftMask>,
}

impl PolyMasks {
    #[inline]
    pub fn poly(&self) -> usize {
        self.poly
    }

    /// Kept bits of this polynomial consumed per word.
    #[inline]
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Positions of the kept bits in the raw polynomial word.
    #[inline]
    pub fn keep(&self) -> u64 {
        self.keep
    }

    /// Positions of the kept bits once spread, before the interleave offset.
    #[inline]
    pub fn placed(&self) -> u64 {
        self.placed
    }

    /// Position of this polynomial's first bit in the interleaved word.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Stages in the order they must be applied, largest shift first.
    #[inline]
    pub fn stages(&self) -> &[ShiftMask] {
        &self.stages
    }

    /// Drops the punctured bits of a raw polynomial word and moves the rest
    /// into their interleaved positions.
    pub fn spread(&self, word: u64) -> u64 {
        self.stages
            .iter()
            .fold(word & self.keep, |word, stage| stage.apply(word))
    }

    /// Inverse of [`PolyMasks::spread`]. Bits outside [`PolyMasks::placed`]
    /// are ignored.
    pub fn gather(&self, word: u64) -> u64 {
        self.stages
            .iter()
            .rev()
            .fold(word & self.placed, |word, stage| stage.invert(word))
    }
}

/// Shift/mask stages for every polynomial of a code.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct MaskTable {
    word: WordSize,
    constraint_length: usize,
    polys: Vec<PolyMasks>,
}

impl MaskTable {
    #[inline]
    pub fn word_size(&self) -> WordSize {
        self.word
    }

    #[inline]
    pub fn constraint_length(&self) -> usize {
        self.constraint_length
    }

    #[inline]
    pub fn polynomials(&self) -> &[PolyMasks] {
        &self.polys
    }

    pub fn poly(&self, poly: usize) -> Option<&PolyMasks> {
        self.polys.get(poly)
    }

    /// Output bits produced per interleaved word.
    pub fn bits_per_word(&self) -> usize {
        self.polys.iter().map(PolyMasks::bits).sum()
    }

    /// Combines one raw word per polynomial into a punctured, interleaved word.
    ///
    /// Returns `None` if `words` does not hold exactly one word per polynomial.
    pub fn interleave(&self, words: &[u64]) -> Option<u64> {
        if words.len() != self.polys.len() {
            return None;
        }
        let out = self
            .polys
            .iter()
            .zip(words)
            .fold(0, |out, (poly, &word)| out | (poly.spread(word) << poly.offset));
        Some(out)
    }

    /// Splits an interleaved word back into one raw word per polynomial.
    /// Punctured positions come back as zero.
    pub fn deinterleave(&self, word: u64) -> Vec<u64> {
        self.polys
            .iter()
            .map(|poly| poly.gather(word >> poly.offset))
            .collect()
    }
}

/// Derives the shift/mask table for a code.
///
/// This validates the arguments into a [`CodeConfig`] and derives from it.
pub fn derive_shift_masks(
    word_size: u32,
    constraint_length: usize,
    num_poly: usize,
    matrix: &[u8],
) -> Result<MaskTable> {
    CodeConfig::new(word_size, constraint_length, num_poly, matrix)?.derive()
}

pub(crate) fn derive_table(config: &CodeConfig) -> Result<MaskTable> {
    let matrix = config.matrix();
    let word = config.word_size();
    let total = matrix.total_density();
    if total > word.bits() as usize {
        return Err(ConfigError::WordTooNarrow {
            total,
            word_size: word.bits(),
        }
        .into());
    }

    let mut polys = Vec::with_capacity(matrix.num_poly());
    for poly in 0..matrix.num_poly() {
        let density = matrix.density(poly)?;
        if density == 0 {
            return Err(ConfigError::EmptyRow(poly).into());
        }

        // Rounds down, so a word may be left a few bits short of full.
        let bits = word.bits() as usize * density / total;

        let input = input_indices(matrix, 0, poly, bits)?;
        let output = output_indices(matrix, 0, poly, bits)?;
        let offset = matrix.offset(poly)?;
        polys.push(factor(word, poly, offset, &input, &output)?);
    }

    Ok(MaskTable {
        word,
        constraint_length: config.constraint_length(),
        polys,
    })
}

fn bit(word: WordSize, poly: usize, position: usize) -> std::result::Result<u64, ConfigError> {
    word.bit(position).ok_or(ConfigError::MaskOverflow {
        poly,
        position,
        word_size: word.bits(),
    })
}

fn factor(
    word: WordSize,
    poly: usize,
    offset: usize,
    input: &[usize],
    output: &[usize],
) -> std::result::Result<PolyMasks, ConfigError> {
    let mut delta = Vec::with_capacity(input.len());
    for (j, (&i, &o)) in input.iter().zip(output).enumerate() {
        if o < i {
            return Err(ConfigError::BackwardShift { poly, bit: j });
        }
        delta.push(o - i);
    }
    print_indices!("delta", &delta);

    let mut keep = 0;
    for &i in input {
        keep |= bit(word, poly, i)?;
    }
    let mut placed = 0;
    for &o in output {
        bit(word, poly, o + offset)?;
        placed |= bit(word, poly, o)?;
    }
    print_word!("keep", keep, word.bits());

    let mut positions = input.to_vec();
    let mut stages = Vec::new();

    for k in (0..word.log2()).rev() {
        let shift = 1usize << k;
        if !delta.iter().any(|&d| d >= shift) {
            continue;
        }

        let mut mask = 0;
        for (pos, d) in positions.iter_mut().zip(delta.iter_mut()) {
            if *d >= shift {
                mask |= bit(word, poly, *pos)?;
                *pos += shift;
                *d -= shift;
            }
        }

        let mut occupied = 0u64;
        for &pos in &positions {
            let b = bit(word, poly, pos)?;
            if occupied & b != 0 {
                return Err(ConfigError::Collision {
                    poly,
                    position: pos,
                    shift: shift as u32,
                });
            }
            occupied |= b;
        }

        print_word!("mask", mask, word.bits());
        stages.push(ShiftMask {
            shift: shift as u32,
            mask,
        });
    }
    debug_assert_eq!(positions, output);

    Ok(PolyMasks {
        poly,
        bits: input.len(),
        keep,
        placed,
        offset: offset as u32,
        stages,
    })
}
