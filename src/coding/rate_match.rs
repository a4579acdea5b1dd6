//! Rate matching between the length-N mother code and the E transmitted bits, as
//! described in TS 38.212 §5.4.1.
//!
//! The mother codeword is first permuted by a 32 sub-block interleaver, then bits are
//! selected by repetition, puncturing, or shortening. The decoder runs the same selection
//! in reverse over LLRs, so positions that were never sent are replaced by an erasure
//! (puncturing) or a certain zero (shortening).

use crate::coding::scl::Llr;
use crate::consts;

/// How the mother codeword is fitted to the transmitted length.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// The first N - E interleaved bits are dropped and unknown to the receiver.
    Puncturing,
    /// The last N - E interleaved bits are dropped and known to be zero.
    Shortening,
    /// Every interleaved bit is sent and the first E - N are sent again.
    Repetition,
}

impl Mode {
    /// Determine the mode for `k` payload bits (including CRC) carried by a mother code
    /// of length `n` over `e` transmitted bits.
    pub fn select(k: usize, n: usize, e: usize) -> Mode {
        if e >= n {
            Mode::Repetition
        } else if 16 * k <= 7 * e {
            Mode::Puncturing
        } else {
            Mode::Shortening
        }
    }
}

/// Sub-block permutation P(i) of TS 38.212 Table 5.4.1.1-1.
const SUBBLOCK_PERMUTATION: [usize; consts::SUBBLOCKS] = [
    0, 1, 2, 4, 3, 5, 6, 7, 8, 16, 9, 17, 10, 18, 11, 19,
    12, 20, 13, 21, 14, 22, 15, 23, 24, 25, 26, 28, 27, 29, 30, 31,
];

/// Compute the sub-block interleaver J(n) for a mother code of length `n`, so that
/// interleaved bit `i` is mother bit `J[i]`.
pub fn subblock_pattern(n: usize) -> Vec<usize> {
    assert!(n.is_power_of_two() && n >= consts::SUBBLOCKS);

    let size = n / consts::SUBBLOCKS;

    (0..n).map(|i| SUBBLOCK_PERMUTATION[i / size] * size + i % size).collect()
}

/// Mapping between mother code positions and transmitted positions.
#[derive(Clone, Debug)]
pub struct RateMatch {
    /// Selection mode.
    mode: Mode,
    /// Sub-block interleaver J(n).
    subblock: Vec<usize>,
    /// Mother code index sent at each transmitted position.
    selected: Vec<usize>,
}

impl RateMatch {
    /// Construct the rate matching pattern for `k` payload bits (including CRC) over
    /// the mother code of length `n` and `e` transmitted bits.
    pub fn new(k: usize, n: usize, e: usize) -> RateMatch {
        assert!(e > 0);

        let mode = Mode::select(k, n, e);
        let subblock = subblock_pattern(n);

        let selected = match mode {
            Mode::Repetition => (0..e).map(|i| subblock[i % n]).collect(),
            Mode::Puncturing => subblock[n - e..].to_vec(),
            Mode::Shortening => subblock[..e].to_vec(),
        };

        RateMatch {
            mode: mode,
            subblock: subblock,
            selected: selected,
        }
    }

    /// Get the selection mode.
    pub fn mode(&self) -> Mode { self.mode }

    /// Get the mother code length.
    pub fn mother_len(&self) -> usize { self.subblock.len() }

    /// Get the number of transmitted bits.
    pub fn coded_len(&self) -> usize { self.selected.len() }

    /// Get the mother code index sent at each transmitted position.
    pub fn selected(&self) -> &[usize] { &self.selected[..] }

    /// Get the sub-block interleaver J(n).
    pub fn subblock(&self) -> &[usize] { &self.subblock[..] }

    /// Get the mother code indices that are never transmitted, in interleaved order.
    pub fn dropped(&self) -> &[usize] {
        let (n, e) = (self.mother_len(), self.coded_len());

        match self.mode {
            Mode::Repetition => &[],
            Mode::Puncturing => &self.subblock[..n - e],
            Mode::Shortening => &self.subblock[e..],
        }
    }

    /// Select the transmitted symbols from the given mother codeword.
    pub fn select<T: Copy>(&self, mother: &[T]) -> Vec<T> {
        assert_eq!(mother.len(), self.mother_len());
        self.selected.iter().map(|&i| mother[i]).collect()
    }

    /// Recover mother code LLRs from the received LLRs. Received LLRs are clamped to
    /// the saturation magnitude, repeated positions are summed, punctured positions
    /// become erasures, and shortened positions become saturated in favor of zero.
    pub fn recover<F: Llr>(&self, llrs: &[F]) -> Vec<F> {
        assert_eq!(llrs.len(), self.coded_len());

        let known = F::saturation();
        let mut mother = vec![F::zero(); self.mother_len()];

        // Infinite inputs would turn into NaN in the exact check-node update.
        for (&i, &llr) in self.selected.iter().zip(llrs) {
            mother[i] = mother[i] + llr.max(-known).min(known);
        }

        if self.mode == Mode::Shortening {
            for &i in self.dropped() {
                mother[i] = known;
            }
        }

        mother
    }
}
