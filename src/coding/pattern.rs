//! Assigns a role to every mother code position (TS 38.212 §5.3.1.2, §5.4.1.1).
//!
//! Positions that rate matching removes, plus a low-index block when heavily punctured,
//! are excluded first. The K + n_PC most reliable remaining positions carry the payload
//! and parity-check bits, and all others are frozen to zero.

use crate::coding::interleave::Interleaver;
use crate::coding::polar::row_weight;
use crate::coding::rate_match::{Mode, RateMatch};
use crate::coding::reliability;
use crate::error::Result;
use crate::params::CodeParams;
use crate::util::div_ceil;

/// Role of a mother code position.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Fixed to zero.
    Frozen,
    /// Carries an information bit.
    Information,
    /// Carries a CRC bit.
    Crc,
    /// Carries a parity-check bit computed from earlier payload bits.
    ParityCheck,
}

/// Roles of all mother code positions.
#[derive(Clone, Debug)]
pub struct InfoPattern {
    /// Role of each position.
    roles: Vec<Role>,
    /// Positions carrying the K (interleaved) payload bits, in ascending order.
    carriers: Vec<usize>,
}

impl InfoPattern {
    /// Build the pattern for the given code, rate matching, and optional CRC
    /// interleaver. Fails if too few positions remain after rate matching exclusions.
    pub fn new(params: &CodeParams, rm: &RateMatch, crc_order: Option<&Interleaver>)
        -> Result<InfoPattern>
    {
        let (n, e) = (params.mother, params.coded);
        assert_eq!(rm.mother_len(), n);

        let mut excluded = vec![false; n];

        for &i in rm.dropped() {
            excluded[i] = true;
        }

        if rm.mode() == Mode::Puncturing {
            let low = if 4 * e >= 3 * n {
                div_ceil(3 * n - 2 * e, 4)
            } else {
                div_ceil(9 * n - 4 * e, 16)
            };

            for x in excluded[..low].iter_mut() {
                *x = true;
            }
        }

        let usable: Vec<usize> = reliability::sequence(params.exponent).iter()
            .map(|&q| q as usize)
            .filter(|&q| !excluded[q])
            .collect();

        let count = params.payload + params.pc_bits;

        if usable.len() < count {
            return Err(params.unsupported());
        }

        // Least reliable first.
        let chosen = &usable[usable.len() - count..];
        let mut roles = vec![Role::Frozen; n];

        for &i in chosen {
            roles[i] = Role::Information;
        }

        for &i in &chosen[..params.pc_bits - params.pc_weight_bits] {
            roles[i] = Role::ParityCheck;
        }

        if params.pc_weight_bits > 0 {
            let candidates = &chosen[params.pc_bits..];
            let min = candidates.iter().map(|&i| row_weight(i)).min();

            // Most reliable candidate of minimum weight.
            let picks = candidates.iter().rev()
                .filter(|&&i| Some(row_weight(i)) == min)
                .take(params.pc_weight_bits);

            for &i in picks {
                roles[i] = Role::ParityCheck;
            }
        }

        let carriers: Vec<usize> = (0..n).filter(|&i| roles[i] == Role::Information).collect();
        assert_eq!(carriers.len(), params.payload);

        for (k, &i) in carriers.iter().enumerate() {
            let source = crc_order.map_or(k, |il| il.redirect(k));

            if source >= params.info {
                roles[i] = Role::Crc;
            }
        }

        Ok(InfoPattern {
            roles: roles,
            carriers: carriers,
        })
    }

    /// Get the role of every mother code position.
    pub fn roles(&self) -> &[Role] { &self.roles[..] }

    /// Get the positions carrying the K payload bits, in ascending order.
    pub fn carriers(&self) -> &[usize] { &self.carriers[..] }

    /// Get the positions holding parity-check bits, in ascending order.
    pub fn parity_checks(&self) -> Vec<usize> {
        (0..self.roles.len()).filter(|&i| self.roles[i] == Role::ParityCheck).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::params::{Channel, CustomCode};

    fn build(channel: Channel, a: usize, e: usize) -> (CodeParams, RateMatch, InfoPattern) {
        let p = CodeParams::new(&channel, a, e).unwrap();
        let rm = RateMatch::new(p.payload, p.mother, p.coded);
        let il = if p.crc_interleave { Some(Interleaver::crc(p.payload)) } else { None };
        let pat = InfoPattern::new(&p, &rm, il.as_ref()).unwrap();

        (p, rm, pat)
    }

    #[test]
    fn test_counts() {
        for &(channel, a, e) in &[
            (Channel::UplinkControl, 24, 108),
            (Channel::UplinkControl, 12, 100),
            (Channel::UplinkControl, 15, 300),
            (Channel::UplinkControl, 19, 40),
            (Channel::UplinkControl, 400, 500),
            (Channel::DownlinkControl, 40, 108),
            (Channel::Broadcast, 32, 864),
            (Channel::Custom(CustomCode::default()), 100, 2000),
        ] {
            let (p, rm, pat) = build(channel, a, e);
            let roles = pat.roles();
            let count = |r| roles.iter().filter(|&&x| x == r).count();

            assert_eq!(count(Role::Information), p.info);
            assert_eq!(count(Role::Crc), p.crc.width());
            assert_eq!(count(Role::ParityCheck), p.pc_bits);
            assert_eq!(pat.carriers().len(), p.payload);

            for &i in rm.dropped() {
                assert_eq!(roles[i], Role::Frozen);
            }

            // Every chosen position is more reliable than every usable frozen one.
            let seq = reliability::sequence(p.exponent);
            let rank = |i: usize| seq.iter().position(|&q| q as usize == i).unwrap();
            let least = (0..p.mother).filter(|&i| roles[i] != Role::Frozen).map(rank).min();

            for &q in &seq[least.unwrap()..] {
                let q = q as usize;

                if roles[q] == Role::Frozen {
                    assert!(rm.dropped().contains(&q) || rm.mode() == Mode::Puncturing);
                }
            }
        }
    }

    #[test]
    fn test_parity_positions() {
        let (_, _, pat) = build(Channel::UplinkControl, 12, 100);
        assert_eq!(pat.parity_checks(), vec![62, 93, 103]);

        let non_frozen: Vec<usize> = (0..128).filter(|&i| pat.roles()[i] != Role::Frozen)
            .collect();
        assert_eq!(non_frozen, vec![
            62, 63, 93, 94, 95, 103, 107, 109, 110, 111, 115, 117, 118, 119, 121, 122,
            123, 124, 125, 126, 127,
        ]);

        let (_, _, pat) = build(Channel::UplinkControl, 15, 300);
        assert_eq!(pat.parity_checks(), vec![219, 231, 252]);

        let (_, _, pat) = build(Channel::UplinkControl, 19, 40);
        assert_eq!(pat.parity_checks(), vec![10, 12, 18]);
    }

    #[test]
    fn test_crc_roles() {
        // Without CRC interleaving the CRC bits take the highest carriers.
        let (p, _, pat) = build(Channel::UplinkControl, 24, 108);
        let carriers = pat.carriers();

        for (k, &i) in carriers.iter().enumerate() {
            let expect = if k < p.info { Role::Information } else { Role::Crc };
            assert_eq!(pat.roles()[i], expect);
        }

        // With interleaving the last carrier is still the final CRC bit.
        let (_, _, pat) = build(Channel::Broadcast, 32, 864);
        let last = *pat.carriers().last().unwrap();
        assert_eq!(pat.roles()[last], Role::Crc);
        assert_eq!(pat.roles()[pat.carriers()[0]], Role::Information);
    }

    #[test]
    fn test_exhausted() {
        // A mother code shorter than the payload.
        let code = CustomCode { max_exponent: 5, ..CustomCode::default() };
        let p = CodeParams::new(&Channel::Custom(code), 12, 40).unwrap();
        let rm = RateMatch::new(p.payload, p.mother, p.coded);

        assert_eq!(p.mother, 32);
        assert!(InfoPattern::new(&p, &rm, None).is_err());
    }
}
