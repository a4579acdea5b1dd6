//! Implements the 6, 11, and 24-bit CRCs attached to polar coded payloads.
//!
//! This implementation uses the typical long division and takes advantage of the short
//! lengths to use only a 64-bit word as a buffer, allowing simple bitwise operations.
//! Bits are fed MSB-first with a zero initial remainder and no output inversion.

use crate::consts;

/// CRC generator polynomials used with polar codes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub enum CrcKind {
    /// D^6 + D^5 + 1, for uplink control payloads of 12 to 19 bits.
    Crc6,
    /// D^11 + D^10 + D^9 + D^5 + 1, for longer uplink control payloads.
    Crc11,
    /// D^24 + D^23 + D^21 + D^20 + D^17 + D^15 + D^13 + D^12 + D^8 + D^4 + D^2 + D + 1,
    /// for broadcast and downlink control payloads.
    Crc24C,
}

impl CrcKind {
    /// Generator polynomial, with the MSB being the coefficient of highest degree.
    pub fn gen(&self) -> u64 {
        match *self {
            CrcKind::Crc6 => 0b1100001,
            CrcKind::Crc11 => 0b111000100001,
            CrcKind::Crc24C => 0b1101100101011000100010111,
        }
    }

    /// Number of CRC bits, which is the degree of the generator.
    pub fn width(&self) -> usize {
        degree(self.gen()) as usize
    }

    /// Compute the CRC bits of the given payload, MSB first. If `ones` is set, the
    /// payload is preceded by 24 ones as for downlink control.
    pub fn checksum(&self, bits: &[u8], ones: bool) -> Vec<u8> {
        let mut crc = Crc::new(*self);

        if ones {
            crc.feed_bits(std::iter::repeat(1).take(consts::DCI_CRC_ONES));
        }

        let word = crc.feed_bits(bits.iter().cloned()).finish();

        (0..self.width()).rev().map(|i| (word >> i) as u8 & 1).collect()
    }

    /// Check whether the given payload followed by its CRC bits is consistent.
    pub fn check(&self, bits: &[u8], ones: bool) -> bool {
        assert!(bits.len() >= self.width());

        let (payload, crc) = bits.split_at(bits.len() - self.width());
        self.checksum(payload, ones) == crc
    }
}

/// CRC calculator using long division.
struct Crc {
    kind: CrcKind,
    /// Current output of the calculator.
    word: u64,
}

impl Crc {
    /// Construct a new `Crc` with empty output.
    pub fn new(kind: CrcKind) -> Crc {
        Crc {
            kind: kind,
            word: 0,
        }
    }

    /// Feed in a single bit.
    pub fn feed_bit(&mut self, bit: u8) -> &mut Self {
        assert!(bit >> 1 == 0);

        self.word <<= 1;
        self.word |= bit as u64;

        self.div();
        self
    }

    /// Feed in the given bit stream.
    pub fn feed_bits<T: IntoIterator<Item = u8>>(&mut self, bits: T) -> &mut Self {
        for bit in bits {
            self.feed_bit(bit);
        }

        self
    }

    /// Finish the CRC calculation and return the resulting CRC.
    pub fn finish(&mut self) -> u64 {
        self.flush();
        self.word
    }

    /// Reduce the current word by dividing by the generator.
    fn div(&mut self) {
        let gen = self.kind.gen();

        while self.word != 0 {
            let diff = degree(self.word) as i32 - degree(gen) as i32;

            // If the divisor (generator) has higher degree than the dividend (word), then
            // no more division can be done.
            if diff < 0 {
                break;
            }

            // Bring the generator up to the same degree and knock off at least one of the
            // word's MSBs.
            self.word ^= gen << diff;
        }
    }

    /// Multiply the message by x^P and reduce.
    fn flush(&mut self) {
        for _ in 0..self.kind.width() {
            self.word <<= 1;
            self.div();
        }
    }
}

// Calculate the degree of the polynomial represented by x, where x > 0.
fn degree(x: u64) -> u32 {
    64 - 1 - x.leading_zeros()
}
