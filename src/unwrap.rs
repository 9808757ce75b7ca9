//! Index unwrapping.
//!
//! A puncturing row is periodic, so the kept bits of a polynomial over any
//! number of words are found by repeating the row end to end. These
//! functions list, for the first `num_bits` kept bits of a polynomial, where
//! each bit sits in the polynomial's own raw stream and where it lands in
//! the punctured, interleaved stream.

use crate::error::{ConfigError, Error, Result};
use crate::matrix::PuncturingMatrix;

/// Most indices a `Vec<usize>` can hold.
const MAX_INDICES: usize = isize::MAX as usize / std::mem::size_of::<usize>();

/// How many periods must be repeated to supply `num_bits` kept bits when
/// scanning from `start_idx`.
fn num_wraps(density: usize, period: usize, start_idx: usize, num_bits: usize) -> usize {
    let wraps = num_bits / density + usize::from(num_bits % density != 0);
    if start_idx % period != 0 {
        wraps.saturating_add(1)
    } else {
        wraps
    }
}

/// Positions of the first `num_bits` kept bits of `poly_idx`, counted from
/// `start_idx` within the polynomial's repeated row.
///
/// `start_idx` is normally less than the period. Larger values are allowed
/// but may fail with [`Error::InsufficientBits`] because the number of
/// repetitions is computed from the offset within a period.
pub fn input_indices(
    matrix: &PuncturingMatrix,
    start_idx: usize,
    poly_idx: usize,
    num_bits: usize,
) -> Result<Vec<usize>> {
    let kept = matrix.kept_positions(poly_idx)?;
    if kept.is_empty() {
        return Err(ConfigError::EmptyRow(poly_idx).into());
    }

    let period = matrix.period();
    let wraps = num_wraps(kept.len(), period, start_idx, num_bits);

    // Every slot of the repeated full pattern has to be addressable.
    if wraps.checked_mul(matrix.flags().len()).is_none() || num_bits > MAX_INDICES {
        let addressable = (usize::MAX / matrix.flags().len()).saturating_mul(kept.len());
        return Err(Error::InsufficientBits {
            requested: num_bits,
            available: addressable.min(MAX_INDICES),
        });
    }

    let indices: Vec<usize> = (0..wraps)
        .flat_map(|wrap| kept.iter().map(move |&pos| wrap * period + pos))
        .filter(|&pos| pos >= start_idx)
        .map(|pos| pos - start_idx)
        .take(num_bits)
        .collect();

    if indices.len() < num_bits {
        return Err(Error::InsufficientBits {
            requested: num_bits,
            available: indices.len(),
        });
    }

    print_indices!("input", &indices);
    Ok(indices)
}

/// Positions in the punctured, interleaved stream of the bits returned by
/// [`input_indices`], relative to the first slot of `poly_idx` at
/// `start_idx`.
///
/// Each position is the number of kept flags, across every polynomial,
/// between that first slot and the bit's own slot.
pub fn output_indices(
    matrix: &PuncturingMatrix,
    start_idx: usize,
    poly_idx: usize,
    num_bits: usize,
) -> Result<Vec<usize>> {
    let input = input_indices(matrix, start_idx, poly_idx, num_bits)?;
    if input.is_empty() {
        return Ok(input);
    }
    let num_poly = matrix.num_poly();

    let mut last_slot = start_idx * num_poly + poly_idx;
    let mut accumulator = 0;
    let mut output = Vec::with_capacity(input.len());

    for &i in &input {
        let slot = (i + start_idx) * num_poly + poly_idx;
        accumulator += matrix.ones_before(slot) - matrix.ones_before(last_slot);
        output.push(accumulator);
        last_slot = slot;
    }

    print_indices!("output", &output);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::{input_indices, output_indices};
    use crate::error::{ConfigError, Error};
    use crate::matrix::{PuncturingMatrix, StandardMatrix};

    fn matrix(flags: &[u8], num_poly: usize) -> PuncturingMatrix {
        PuncturingMatrix::new(flags, num_poly).unwrap()
    }

    #[test]
    fn rate_3_4_single_row() {
        let m = matrix(&[1, 0, 1, 1], 1);

        assert_eq!(input_indices(&m, 0, 0, 3).unwrap(), vec![0, 2, 3]);
        // Only kept flags are counted, so the gap at position 1 closes up.
        assert_eq!(output_indices(&m, 0, 0, 3).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn unpunctured_single_row_is_identity() {
        let m = matrix(&[1, 1, 1], 1);

        let input = input_indices(&m, 0, 0, 8).unwrap();
        assert_eq!(input, (0..8).collect::<Vec<_>>());
        assert_eq!(output_indices(&m, 0, 0, 8).unwrap(), input);
    }

    #[test]
    fn two_interleaved_rows() {
        let m = matrix(&[1, 1, 1, 0, 1, 1], 2);

        assert_eq!(input_indices(&m, 0, 0, 4).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(output_indices(&m, 0, 0, 4).unwrap(), vec![0, 2, 3, 5]);

        assert_eq!(input_indices(&m, 0, 1, 4).unwrap(), vec![0, 2, 3, 5]);
        assert_eq!(output_indices(&m, 0, 1, 4).unwrap(), vec![0, 3, 5, 8]);
    }

    #[test]
    fn start_mid_period() {
        let m = matrix(&[1, 1, 1, 0, 1, 1], 2);

        assert_eq!(input_indices(&m, 1, 1, 3).unwrap(), vec![1, 2, 4]);
        assert_eq!(output_indices(&m, 1, 1, 3).unwrap(), vec![1, 3, 6]);

        let m = matrix(&[1, 0, 1, 1], 1);
        assert_eq!(input_indices(&m, 1, 0, 4).unwrap(), vec![1, 2, 3, 5]);
        assert_eq!(output_indices(&m, 1, 0, 4).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn lengths_match_and_output_is_non_decreasing() {
        for standard in StandardMatrix::ALL.iter() {
            let m = PuncturingMatrix::from(*standard);
            for poly in 0..m.num_poly() {
                for start in 0..m.period() {
                    for &bits in &[1, 7, 32] {
                        let input = input_indices(&m, start, poly, bits).unwrap();
                        let output = output_indices(&m, start, poly, bits).unwrap();
                        assert_eq!(input.len(), bits);
                        assert_eq!(output.len(), bits);
                        assert!(output.windows(2).all(|w| w[0] <= w[1]), "{:?}", standard);
                    }
                }
            }
        }
    }

    #[test]
    fn empty_row() {
        let m = matrix(&[1, 0, 1, 0], 2);
        assert_eq!(
            input_indices(&m, 0, 1, 2),
            Err(Error::Config(ConfigError::EmptyRow(1)))
        );
        assert_eq!(
            output_indices(&m, 0, 1, 2),
            Err(Error::Config(ConfigError::EmptyRow(1)))
        );
    }

    #[test]
    fn poly_out_of_range() {
        let m = matrix(&[1, 1], 2);
        assert_eq!(
            input_indices(&m, 0, 2, 1),
            Err(Error::Config(ConfigError::PolyOutOfRange { poly: 2, num_poly: 2 }))
        );
    }

    #[test]
    fn start_past_one_period_runs_short() {
        let m = matrix(&[1, 1], 1);
        assert_eq!(
            input_indices(&m, 2, 0, 2),
            Err(Error::InsufficientBits {
                requested: 2,
                available: 0
            })
        );
    }

    #[test]
    fn huge_requests_are_refused() {
        let m = matrix(&[1, 1], 1);
        for &(start, bits) in &[(0, usize::MAX), (1, usize::MAX), (0, usize::MAX / 2 + 1)] {
            match input_indices(&m, start, 0, bits) {
                Err(Error::InsufficientBits { requested, available }) => {
                    assert_eq!(requested, bits);
                    assert!(available < bits);
                }
                other => panic!("start {} bits {}: {:?}", start, bits, other),
            }
            assert!(output_indices(&m, start, 0, bits).is_err());
        }

        // One kept bit per slot, so the scan itself would fit but the result could not.
        let m = matrix(&[1], 1);
        match output_indices(&m, 0, 0, usize::MAX) {
            Err(Error::InsufficientBits { requested, .. }) => assert_eq!(requested, usize::MAX),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn zero_bits_far_from_the_start() {
        let m = matrix(&[1, 1, 0, 1], 2);
        assert!(output_indices(&m, usize::MAX, 1, 0).unwrap().is_empty());
    }

    #[test]
    fn zero_bits() {
        let m = matrix(&[1, 0, 1, 1], 1);
        assert!(input_indices(&m, 0, 0, 0).unwrap().is_empty());
        assert!(output_indices(&m, 0, 0, 0).unwrap().is_empty());
    }
}
