//! Interleaving and deinterleaving for CRC-encoded payloads and rate-matched codewords.

use crate::consts;

/// Maximum CRC input interleaving pattern Π_IL^max of TS 38.212 Table 5.3.1.1-1.
const CRC_REDIRECTS: [usize; consts::CRC_INTERLEAVER_BITS] = [
    0, 2, 4, 7, 9, 14, 19, 20, 24, 25, 26, 28, 31, 34, 42, 45,
    49, 50, 51, 53, 54, 56, 58, 59, 61, 62, 65, 66, 67, 69, 70, 71,
    72, 76, 77, 81, 82, 83, 87, 88, 89, 91, 93, 95, 98, 101, 104, 106,
    108, 110, 111, 113, 115, 118, 119, 120, 122, 123, 126, 127, 129, 132, 134, 138,
    139, 140, 1, 3, 5, 8, 10, 15, 21, 27, 29, 32, 35, 43, 46, 52,
    55, 57, 60, 63, 68, 73, 78, 84, 90, 92, 94, 96, 99, 102, 105, 107,
    109, 112, 114, 116, 121, 124, 128, 130, 133, 135, 141, 6, 11, 16, 22, 30,
    33, 36, 44, 47, 64, 74, 79, 85, 97, 100, 103, 117, 125, 131, 136, 142,
    12, 17, 23, 37, 48, 75, 80, 86, 137, 143, 13, 18, 38, 144, 39, 145,
    40, 146, 41, 147, 148, 149, 150, 151, 152, 153, 154, 155, 156, 157, 158, 159,
    160, 161, 162, 163,
];

/// Redirects between interleaved and natural order. Interleaved symbol `k` is natural
/// symbol `redirects[k]`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Interleaver {
    redirects: Vec<usize>,
}

impl Interleaver {
    /// Construct the CRC input interleaver for `k` payload bits (including CRC). Each
    /// CRC bit lands right after the last payload bit it depends on.
    pub fn crc(k: usize) -> Interleaver {
        assert!(k <= consts::CRC_INTERLEAVER_BITS);

        let offset = consts::CRC_INTERLEAVER_BITS - k;

        Interleaver {
            redirects: CRC_REDIRECTS.iter()
                .filter(|&&m| m >= offset)
                .map(|&m| m - offset)
                .collect(),
        }
    }

    /// Construct the triangular channel interleaver for `e` coded bits. Bits are written
    /// row by row into an isosceles right triangle of side T and read column by column.
    pub fn channel(e: usize) -> Interleaver {
        let mut side = 0;

        while side * (side + 1) / 2 < e {
            side += 1;
        }

        // Natural index held at each cell of the triangle, or `None` past the input.
        let mut rows: Vec<Vec<Option<usize>>> = Vec::with_capacity(side);
        let mut k = 0;

        for i in 0..side {
            rows.push((0..side - i).map(|_| {
                let cell = if k < e { Some(k) } else { None };
                k += 1;
                cell
            }).collect());
        }

        let redirects = (0..side)
            .flat_map(|j| (0..side - j).map(move |i| (i, j)))
            .filter_map(|(i, j)| rows[i][j])
            .collect();

        Interleaver {
            redirects: redirects,
        }
    }

    /// Number of symbols handled by the interleaver.
    pub fn len(&self) -> usize { self.redirects.len() }

    /// Get the natural index of interleaved symbol `k`.
    pub fn redirect(&self, k: usize) -> usize { self.redirects[k] }

    /// Interleave the given symbols.
    pub fn interleave<T: Copy>(&self, natural: &[T]) -> Vec<T> {
        assert_eq!(natural.len(), self.len());
        self.redirects.iter().map(|&i| natural[i]).collect()
    }

    /// Undo interleaving of the given symbols.
    pub fn deinterleave<T: Copy + Default>(&self, interleaved: &[T]) -> Vec<T> {
        assert_eq!(interleaved.len(), self.len());

        let mut natural = vec![T::default(); self.len()];

        for (&i, &sym) in self.redirects.iter().zip(interleaved) {
            natural[i] = sym;
        }

        natural
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_crc_table() {
        let mut sorted = CRC_REDIRECTS.to_vec();
        sorted.sort();
        assert!(sorted.iter().enumerate().all(|(i, &m)| i == m));
    }

    #[test]
    fn test_crc() {
        assert_eq!(Interleaver::crc(consts::CRC_INTERLEAVER_BITS).redirects,
                   CRC_REDIRECTS.to_vec());
        assert_eq!(Interleaver::crc(1).redirects, vec![0]);
        assert_eq!(&Interleaver::crc(56).redirects[..12],
                   &[0, 2, 3, 5, 7, 10, 11, 12, 14, 15, 18, 19]);

        for k in 1..=consts::CRC_INTERLEAVER_BITS {
            let il = Interleaver::crc(k);
            let mut sorted = il.redirects.clone();
            sorted.sort();

            assert_eq!(il.len(), k);
            assert!(sorted.iter().enumerate().all(|(i, &m)| i == m));
            // The final CRC bit always stays last.
            assert_eq!(il.redirects[k - 1], k - 1);
        }
    }

    #[test]
    fn test_channel() {
        assert_eq!(Interleaver::channel(5).redirects, vec![0, 3, 1, 4, 2]);
        assert_eq!(Interleaver::channel(10).redirects, vec![0, 4, 7, 9, 1, 5, 8, 2, 6, 3]);
        assert_eq!(Interleaver::channel(1).redirects, vec![0]);
    }

    #[test]
    fn test_roundtrip() {
        let il = Interleaver::channel(108);
        let bits: Vec<u8> = (0..108).map(|i| (i * 7 % 5 % 2) as u8).collect();
        let coded = il.interleave(&bits[..]);

        assert_ne!(coded, bits);
        assert_eq!(il.deinterleave(&coded[..]), bits);

        let il = Interleaver::crc(64);
        let llrs: Vec<f64> = (0..64).map(|i| i as f64 - 20.0).collect();
        assert_eq!(il.deinterleave(&il.interleave(&llrs[..])[..]), llrs);
    }
}
