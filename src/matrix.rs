//! Puncturing matrices.
//!
//! A matrix is stored as the flat, interleaved flag sequence it is written
//! in: flag `position * num_poly + poly` says whether bit `position` of
//! polynomial `poly` is transmitted. Each polynomial's row is also copied
//! into a contiguous buffer once so it can be scanned with `memchr`.

use memchr::memchr_iter;

use crate::error::ConfigError;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct PuncturingMatrix {
    flags: Box<[u8]>,
    num_poly: usize,
    /// Rows laid end to end, `period` flags each.
    rows: Box<[u8]>,
    /// `prefix[i]` is the number of kept flags in `flags[..i]`.
    prefix: Box<[usize]>,
}

impl PuncturingMatrix {
    /// Creates a matrix from interleaved 0/1 flags.
    ///
    /// Rows with no kept bits are accepted here and rejected by whichever
    /// derivation first needs them.
    pub fn new(flags: &[u8], num_poly: usize) -> Result<PuncturingMatrix, ConfigError> {
        if num_poly == 0 {
            return Err(ConfigError::ZeroPolynomials);
        }
        if flags.is_empty() {
            return Err(ConfigError::EmptyMatrix);
        }
        if flags.len() % num_poly != 0 {
            return Err(ConfigError::NotDivisible {
                len: flags.len(),
                num_poly,
            });
        }
        if let Some((index, &value)) = flags.iter().enumerate().find(|(_, f)| **f > 1) {
            return Err(ConfigError::InvalidFlag { index, value });
        }

        let period = flags.len() / num_poly;
        let mut rows = Vec::with_capacity(flags.len());
        for poly in 0..num_poly {
            rows.extend(flags.iter().skip(poly).step_by(num_poly));
        }
        debug_assert_eq!(rows.len(), period * num_poly);

        let mut prefix = Vec::with_capacity(flags.len() + 1);
        prefix.push(0);
        let mut total = 0;
        for &flag in flags {
            total += flag as usize;
            prefix.push(total);
        }

        Ok(PuncturingMatrix {
            flags: flags.into(),
            num_poly,
            rows: rows.into_boxed_slice(),
            prefix: prefix.into_boxed_slice(),
        })
    }

    #[inline]
    pub fn flags(&self) -> &[u8] {
        &self.flags
    }

    #[inline]
    pub fn num_poly(&self) -> usize {
        self.num_poly
    }

    /// Length of one row.
    #[inline]
    pub fn period(&self) -> usize {
        self.flags.len() / self.num_poly
    }

    /// The flags belonging to polynomial `poly`.
    pub fn row(&self, poly: usize) -> Result<&[u8], ConfigError> {
        if poly >= self.num_poly {
            return Err(ConfigError::PolyOutOfRange {
                poly,
                num_poly: self.num_poly,
            });
        }
        let period = self.period();
        Ok(&self.rows[poly * period..(poly + 1) * period])
    }

    /// Positions within one period of the kept bits of `poly`, ascending.
    pub fn kept_positions(&self, poly: usize) -> Result<Vec<usize>, ConfigError> {
        Ok(memchr_iter(1, self.row(poly)?).collect())
    }

    /// Kept bits per period for `poly`.
    pub fn density(&self, poly: usize) -> Result<usize, ConfigError> {
        Ok(memchr_iter(1, self.row(poly)?).count())
    }

    /// Kept bits per period over all polynomials.
    #[inline]
    pub fn total_density(&self) -> usize {
        self.prefix[self.flags.len()]
    }

    /// Number of kept flags before `slot` in the matrix repeated end to end.
    #[inline]
    pub fn ones_before(&self, slot: usize) -> usize {
        let len = self.flags.len();
        (slot / len) * self.total_density() + self.prefix[slot % len]
    }

    /// Position of the first bit of `poly` in the punctured, interleaved stream.
    pub fn offset(&self, poly: usize) -> Result<usize, ConfigError> {
        self.row(poly)?;
        Ok(self.prefix[poly])
    }

    /// Code rate as a reduced `(numerator, denominator)` pair.
    pub fn rate(&self) -> (usize, usize) {
        let (n, d) = (self.period(), self.total_density());
        let g = gcd(n, d);
        (n / g, d / g)
    }
}

impl From<StandardMatrix> for PuncturingMatrix {
    fn from(standard: StandardMatrix) -> PuncturingMatrix {
        let (flags, num_poly) = (standard.flags(), standard.num_poly());
        // The tables below are valid by construction.
        match PuncturingMatrix::new(flags, num_poly) {
            Ok(matrix) => matrix,
            Err(e) => unreachable!("standard matrix {:?} rejected: {}", standard, e),
        }
    }
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Commonly used puncturing patterns.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum StandardMatrix {
    /// Two polynomials, nothing punctured.
    N2Rate1_2,
    N2Rate2_3,
    N2Rate3_4,
    N2Rate5_6,
    N2Rate7_8,
    /// Three polynomials, nothing punctured.
    N3Rate1_3,
}

impl StandardMatrix {
    pub const ALL: [StandardMatrix; 6] = [
        StandardMatrix::N2Rate1_2,
        StandardMatrix::N2Rate2_3,
        StandardMatrix::N2Rate3_4,
        StandardMatrix::N2Rate5_6,
        StandardMatrix::N2Rate7_8,
        StandardMatrix::N3Rate1_3,
    ];

    pub fn flags(self) -> &'static [u8] {
        match self {
            StandardMatrix::N2Rate1_2 => &[1, 1],
            StandardMatrix::N2Rate2_3 => &[1, 1, 0, 1],
            StandardMatrix::N2Rate3_4 => &[1, 1, 0, 1, 1, 0],
            StandardMatrix::N2Rate5_6 => &[1, 1, 0, 1, 1, 0, 0, 1, 1, 0],
            StandardMatrix::N2Rate7_8 => &[1, 1, 0, 1, 0, 1, 0, 1, 1, 0, 0, 1, 1, 0],
            StandardMatrix::N3Rate1_3 => &[1, 1, 1],
        }
    }

    pub fn num_poly(self) -> usize {
        match self {
            StandardMatrix::N3Rate1_3 => 3,
            _ => 2,
        }
    }

    /// Short name used by the table generator, eg `rate_3_4`.
    pub fn name(self) -> &'static str {
        match self {
            StandardMatrix::N2Rate1_2 => "rate_1_2",
            StandardMatrix::N2Rate2_3 => "rate_2_3",
            StandardMatrix::N2Rate3_4 => "rate_3_4",
            StandardMatrix::N2Rate5_6 => "rate_5_6",
            StandardMatrix::N2Rate7_8 => "rate_7_8",
            StandardMatrix::N3Rate1_3 => "rate_1_3",
        }
    }

    pub fn from_name(name: &str) -> Option<StandardMatrix> {
        StandardMatrix::ALL.iter().copied().find(|m| m.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::{PuncturingMatrix, StandardMatrix};
    use crate::error::ConfigError;

    #[test]
    fn rows_are_strided_and_disjoint() {
        let matrix = PuncturingMatrix::new(&[1, 1, 1, 0, 1, 1], 2).unwrap();

        assert_eq!(matrix.period(), 3);
        assert_eq!(matrix.row(0).unwrap(), &[1, 1, 1]);
        assert_eq!(matrix.row(1).unwrap(), &[1, 0, 1]);
        assert_eq!(matrix.kept_positions(0).unwrap(), vec![0, 1, 2]);
        assert_eq!(matrix.kept_positions(1).unwrap(), vec![0, 2]);
        assert_eq!(matrix.density(0).unwrap(), 3);
        assert_eq!(matrix.density(1).unwrap(), 2);
        assert_eq!(matrix.total_density(), 5);
    }

    #[test]
    fn rejects_bad_shapes() {
        assert_eq!(PuncturingMatrix::new(&[1, 1], 0), Err(ConfigError::ZeroPolynomials));
        assert_eq!(PuncturingMatrix::new(&[], 2), Err(ConfigError::EmptyMatrix));
        assert_eq!(
            PuncturingMatrix::new(&[1, 1, 1], 2),
            Err(ConfigError::NotDivisible { len: 3, num_poly: 2 })
        );
        assert_eq!(
            PuncturingMatrix::new(&[1, 2], 1),
            Err(ConfigError::InvalidFlag { index: 1, value: 2 })
        );
    }

    #[test]
    fn row_out_of_range() {
        let matrix = PuncturingMatrix::new(&[1, 1], 2).unwrap();
        assert_eq!(
            matrix.row(2),
            Err(ConfigError::PolyOutOfRange { poly: 2, num_poly: 2 })
        );
    }

    #[test]
    fn ones_before_wraps() {
        let matrix = PuncturingMatrix::new(&[1, 1, 0, 1], 2).unwrap();

        assert_eq!(matrix.ones_before(0), 0);
        assert_eq!(matrix.ones_before(3), 2);
        assert_eq!(matrix.ones_before(4), 3);
        assert_eq!(matrix.ones_before(7), 5);
        assert_eq!(matrix.offset(0).unwrap(), 0);
        assert_eq!(matrix.offset(1).unwrap(), 1);
    }

    #[test]
    fn offset_skips_punctured_leading_flags() {
        let matrix = PuncturingMatrix::new(&[0, 1, 1, 1, 1, 1], 3).unwrap();
        assert_eq!(matrix.offset(1).unwrap(), 0);
        assert_eq!(matrix.offset(2).unwrap(), 1);
    }

    #[test]
    fn standard_rates() {
        let expected = [(1, 2), (2, 3), (3, 4), (5, 6), (7, 8), (1, 3)];
        for (standard, &rate) in StandardMatrix::ALL.iter().zip(expected.iter()) {
            let matrix = PuncturingMatrix::from(*standard);
            assert_eq!(matrix.rate(), rate, "{:?}", standard);
            assert_eq!(StandardMatrix::from_name(standard.name()), Some(*standard));
        }
        assert_eq!(StandardMatrix::from_name("rate_9_10"), None);
    }
}
