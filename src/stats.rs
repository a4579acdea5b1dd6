//! Runtime statistics.

use crate::codec::Decoded;
use crate::error::PolarError;

/// Tracks decoding outcomes for a polar code.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeStats {
    /// Total number of decoded blocks.
    blocks: usize,
    /// Number of blocks whose information bits differ from the sent ones.
    errors: usize,
    /// Number of blocks where no path passed the CRC.
    crc_failures: usize,
    /// Number of block lengths skipped as unsupported.
    skipped: usize,
}

impl CodeStats {
    /// Record a decoded block against the information bits that were sent.
    pub fn record_block(&mut self, dec: &Decoded, sent: &[u8]) {
        self.blocks += 1;

        if dec.bits != sent {
            self.errors += 1;
        }

        if !dec.crc_ok {
            self.crc_failures += 1;
        }
    }

    /// Record that a block couldn't be coded.
    pub fn record_err(&mut self, err: PolarError) {
        match err {
            PolarError::UnsupportedBlockLength { info, coded } => {
                debug!("skipping unsupported block length A={} E={}", info, coded);
                self.skipped += 1;
            },
        }
    }

    /// Merge in the stats from the given object and clear the other stats.
    pub fn merge(&mut self, other: &mut CodeStats) {
        self.blocks += other.blocks;
        self.errors += other.errors;
        self.crc_failures += other.crc_failures;
        self.skipped += other.skipped;

        other.clear();
    }

    /// Clear all stats.
    pub fn clear(&mut self) {
        *self = CodeStats::default();
    }

    /// Get the number of decoded blocks.
    pub fn blocks(&self) -> usize { self.blocks }

    /// Get the number of blocks decoded to the wrong information bits.
    pub fn errors(&self) -> usize { self.errors }

    /// Get the number of blocks where no path passed the CRC.
    pub fn crc_failures(&self) -> usize { self.crc_failures }

    /// Get the number of block lengths skipped as unsupported.
    pub fn skipped(&self) -> usize { self.skipped }

    /// Fraction of decoded blocks in error, or zero if nothing was decoded.
    pub fn block_error_rate(&self) -> f64 {
        if self.blocks == 0 {
            0.0
        } else {
            self.errors as f64 / self.blocks as f64
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn decoded(bits: &[u8], crc_ok: bool) -> Decoded {
        Decoded {
            bits: bits.to_vec(),
            crc_ok: crc_ok,
        }
    }

    #[test]
    fn test_code_stats() {
        let mut a = CodeStats::default();
        let mut b = CodeStats::default();

        a.record_block(&decoded(&[1, 0, 1], true), &[1, 0, 1]);
        a.record_block(&decoded(&[1, 1, 1], false), &[1, 0, 1]);
        assert_eq!(a.blocks(), 2);
        assert_eq!(a.errors(), 1);
        assert_eq!(a.crc_failures(), 1);
        assert_eq!(a.block_error_rate(), 0.5);

        // A CRC pass on the wrong word still counts as an error.
        b.record_block(&decoded(&[0, 0, 0], true), &[1, 0, 1]);
        b.record_block(&decoded(&[1, 0, 1], false), &[1, 0, 1]);
        b.record_err(PolarError::UnsupportedBlockLength { info: 5, coded: 8 });
        assert_eq!(b.blocks(), 2);
        assert_eq!(b.errors(), 1);
        assert_eq!(b.crc_failures(), 1);
        assert_eq!(b.skipped(), 1);

        a.merge(&mut b);
        assert_eq!(a.blocks(), 4);
        assert_eq!(a.errors(), 2);
        assert_eq!(a.crc_failures(), 2);
        assert_eq!(a.skipped(), 1);
        assert_eq!(b, CodeStats::default());

        a.clear();
        assert_eq!(a.block_error_rate(), 0.0);
        assert_eq!(a, CodeStats::default());
    }
}
