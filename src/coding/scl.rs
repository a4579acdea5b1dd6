//! Successive-cancellation list decoding of the natural-order polar code.
//!
//! Decoding walks the leaves (mother code positions) in order. Each surviving path keeps
//! the LLRs of the nodes above its current leaf and the partial sums of completed left
//! subtrees, so moving to the next leaf only recomputes the nodes below the deepest
//! shared ancestor. Payload positions fork every path on both bit values, and the list is
//! then cut back to the `L` paths with the smallest metrics.
//!
//! The recursion follows "LLR-Based Successive Cancellation List Decoding of Polar Codes",
//! Balatsoukas-Stimming, Bastani Parizi, Burg, 2015.

use std::cmp::Ordering;

use collect_slice::CollectSlice;
use num::Float;

use crate::coding::parity::ParityRegister;
use crate::coding::pattern::Role;
use crate::consts;

/// Soft value type usable as an LLR. Positive values favor a zero bit.
pub trait Llr: Float + From<f32> + Default + std::fmt::Debug {
    /// Magnitude that marks a bit as certain.
    fn saturation() -> Self {
        <Self as From<f32>>::from(consts::LLR_SATURATION)
    }
}

impl<T: Float + From<f32> + Default + std::fmt::Debug> Llr for T {}

/// Check-node combining rule.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub enum Combine {
    /// sign(a)·sign(b)·min(|a|, |b|).
    MinSum,
    /// Exact ln((1 + e^(a+b)) / (e^a + e^b)).
    SumProduct,
}

impl Combine {
    /// Combine the LLRs of two halves into the LLR of their XOR.
    pub fn f<F: Llr>(self, a: F, b: F) -> F {
        let mag = a.abs().min(b.abs());
        let approx = if (a < F::zero()) != (b < F::zero()) { -mag } else { mag };

        match self {
            Combine::MinSum => approx,
            // Correction terms keep the exact form stable for large magnitudes.
            Combine::SumProduct => approx +
                (-(a + b).abs()).exp().ln_1p() -
                (-(a - b).abs()).exp().ln_1p(),
        }
    }

    /// Cost of deciding `bit` at a leaf with the given LLR.
    pub fn penalty<F: Llr>(self, llr: F, bit: u8) -> F {
        let x = if bit == 0 { llr } else { -llr };

        match self {
            Combine::MinSum => if x < F::zero() { -x } else { F::zero() },
            Combine::SumProduct => if x > F::zero() {
                (-x).exp().ln_1p()
            } else {
                x.exp().ln_1p() - x
            },
        }
    }
}

/// LLR of the lower half given the decided upper-half partial sum.
fn g<F: Llr>(a: F, b: F, bit: u8) -> F {
    if bit == 0 { b + a } else { b - a }
}

/// Completed decoding path.
#[derive(Clone, Debug)]
pub struct Candidate<F> {
    /// Decided mother code input bits u.
    pub bits: Vec<u8>,
    /// Accumulated path metric, smaller is better.
    pub metric: F,
}

/// Partial decoding path.
#[derive(Clone)]
struct Path<F> {
    /// Node LLRs by depth, where depth `d` holds N >> d values. Depth 0 is the channel.
    alpha: Vec<Vec<F>>,
    /// Partial sums of the latest completed left child at each depth.
    sums: Vec<Vec<u8>>,
    /// Decided bits so far.
    bits: Vec<u8>,
    /// Accumulated metric.
    metric: F,
    /// Parity-check register state.
    parity: ParityRegister,
}

impl<F: Llr> Path<F> {
    /// Construct the root path for a mother code of length `2^exponent`.
    fn new(exponent: usize) -> Path<F> {
        let len = 1 << exponent;

        Path {
            alpha: (0..=exponent).map(|d| if d == 0 {
                vec![]
            } else {
                vec![F::zero(); len >> d]
            }).collect(),
            sums: vec![vec![]; exponent + 1],
            bits: Vec::with_capacity(len),
            metric: F::zero(),
            parity: ParityRegister::new(),
        }
    }

    fn exponent(&self) -> usize { self.alpha.len() - 1 }

    /// LLR of the current leaf.
    fn llr(&self) -> F { self.alpha[self.exponent()][0] }

    /// Compute the LLRs on the way from the deepest node shared with the previous leaf
    /// down to the given leaf.
    fn descend(&mut self, channel: &[F], leaf: usize, combine: Combine) {
        let n = self.exponent();

        // The first new node is the right child where the leaf index gained its lowest
        // set bit. All nodes below it are left children.
        let start = if leaf == 0 { 1 } else { n - leaf.trailing_zeros() as usize };

        for depth in start..=n {
            let (upper, lower) = self.alpha.split_at_mut(depth);
            let parent = if depth == 1 { channel } else { &upper[depth - 1][..] };
            let (a, b) = parent.split_at(parent.len() / 2);

            if depth == start && leaf > 0 {
                a.iter().zip(b).zip(&self.sums[depth])
                    .map(|((&a, &b), &u)| g(a, b, u))
                    .collect_slice_checked(&mut lower[0][..]);
            } else {
                a.iter().zip(b)
                    .map(|(&a, &b)| combine.f(a, b))
                    .collect_slice_checked(&mut lower[0][..]);
            }
        }
    }

    /// Decide the given bit for the current leaf and propagate partial sums up through
    /// every subtree it completes.
    fn commit(&mut self, leaf: usize, bit: u8, metric: F) {
        let n = self.exponent();

        self.metric = metric;
        self.bits.push(bit);

        let mut sums = vec![bit];

        for depth in (1..=n).rev() {
            if leaf >> (n - depth) & 1 == 0 {
                self.sums[depth] = sums;
                return;
            }

            sums = self.sums[depth].iter().zip(&sums)
                .map(|(&l, &r)| l ^ r)
                .chain(sums.iter().cloned())
                .collect();
        }
    }
}

/// Candidate extension of a path by one bit.
struct Fork<F> {
    /// Index of the extended path.
    path: usize,
    bit: u8,
    metric: F,
}

/// List decoder over a fixed position pattern.
pub struct ListDecoder<'a> {
    roles: &'a [Role],
    exponent: usize,
    list_size: usize,
    combine: Combine,
}

impl<'a> ListDecoder<'a> {
    /// Construct a new `ListDecoder` keeping up to `list_size` paths over the given
    /// position roles.
    pub fn new(roles: &'a [Role], list_size: usize, combine: Combine) -> ListDecoder<'a> {
        assert!(roles.len().is_power_of_two() && roles.len() > 1);
        assert!(list_size >= 1);

        ListDecoder {
            roles: roles,
            exponent: roles.len().trailing_zeros() as usize,
            list_size: list_size,
            combine: combine,
        }
    }

    /// Decode the given mother code LLRs and return the surviving paths, best metric
    /// first.
    pub fn decode<F: Llr>(&self, channel: &[F]) -> Vec<Candidate<F>> {
        assert_eq!(channel.len(), self.roles.len());

        let mut paths = vec![Path::new(self.exponent)];

        for (leaf, &role) in self.roles.iter().enumerate() {
            for path in paths.iter_mut() {
                path.parity.shift();
                path.descend(channel, leaf, self.combine);
            }

            match role {
                Role::Frozen => for path in paths.iter_mut() {
                    let metric = path.metric + self.combine.penalty(path.llr(), 0);
                    path.commit(leaf, 0, metric);
                },
                Role::ParityCheck => for path in paths.iter_mut() {
                    let bit = path.parity.bit();
                    let metric = path.metric + self.combine.penalty(path.llr(), bit);
                    path.commit(leaf, bit, metric);
                },
                Role::Information | Role::Crc => {
                    paths = self.fork(paths, leaf);
                },
            }
        }

        paths.sort_by(|a, b| a.metric.partial_cmp(&b.metric).unwrap_or(Ordering::Equal));

        trace!("list decoding finished with {} paths", paths.len());

        paths.into_iter().map(|p| Candidate {
            bits: p.bits,
            metric: p.metric,
        }).collect()
    }

    /// Extend every path by both bit values and keep the best `L` extensions.
    fn fork<F: Llr>(&self, paths: Vec<Path<F>>, leaf: usize) -> Vec<Path<F>> {
        let mut forks = Vec::with_capacity(2 * paths.len());

        for (i, path) in paths.iter().enumerate() {
            for bit in 0..2 {
                forks.push(Fork {
                    path: i,
                    bit: bit,
                    metric: path.metric + self.combine.penalty(path.llr(), bit),
                });
            }
        }

        // Stable, so equal metrics keep discovery order.
        forks.sort_by(|a, b| a.metric.partial_cmp(&b.metric).unwrap_or(Ordering::Equal));
        forks.truncate(self.list_size);

        // Remaining forks of each path, so the last one can take it without a copy.
        let mut uses = vec![0; paths.len()];

        for fork in forks.iter() {
            uses[fork.path] += 1;
        }

        let mut slots: Vec<Option<Path<F>>> = paths.into_iter().map(Some).collect();
        let mut survivors = Vec::with_capacity(forks.len());

        for fork in forks {
            uses[fork.path] -= 1;

            let path = if uses[fork.path] == 0 {
                slots[fork.path].take()
            } else {
                slots[fork.path].clone()
            };

            if let Some(mut path) = path {
                path.commit(leaf, fork.bit, fork.metric);
                path.parity.absorb(fork.bit);
                survivors.push(path);
            }
        }

        survivors
    }
}
