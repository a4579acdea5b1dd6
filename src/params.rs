//! Channel variants and the derived parameters of a single polar code block.

use crate::coding::crc::CrcKind;
use crate::coding::rate_match::Mode;
use crate::consts;
use crate::error::{PolarError, Result};
use crate::util::log2_ceil;

/// Physical channel whose polar coding rules apply.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    /// Broadcast channel (PBCH): CRC24C, CRC interleaving, N <= 512.
    Broadcast,
    /// Downlink control (DCI): like broadcast, with 24 leading ones in the CRC.
    DownlinkControl,
    /// Uplink control (UCI): CRC6 with parity-check bits or CRC11, channel interleaving,
    /// N <= 1024.
    UplinkControl,
    /// Caller-chosen combination of the standard building blocks.
    Custom(CustomCode),
}

/// Building blocks of a custom polar code.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomCode {
    /// CRC attached to the payload.
    pub crc: CrcKind,
    /// Largest mother code exponent.
    pub max_exponent: usize,
    /// Whether 24 ones precede the payload in the CRC calculation.
    pub crc_ones: bool,
    /// Whether the CRC-encoded payload is interleaved.
    pub crc_interleave: bool,
    /// Whether the rate-matched codeword is channel interleaved.
    pub channel_interleave: bool,
    /// Whether parity-check bits are added.
    pub parity_check: bool,
}

impl Default for CustomCode {
    fn default() -> Self {
        CustomCode {
            crc: CrcKind::Crc24C,
            max_exponent: consts::MAX_EXPONENT,
            crc_ones: false,
            crc_interleave: false,
            channel_interleave: false,
            parity_check: false,
        }
    }
}

impl Channel {
    /// Resolve the building blocks used for a payload of `info` bits over `coded` bits.
    fn code(&self, info: usize, coded: usize) -> Result<CustomCode> {
        let downlink = CustomCode {
            crc: CrcKind::Crc24C,
            max_exponent: consts::DOWNLINK_MAX_EXPONENT,
            crc_ones: false,
            crc_interleave: true,
            channel_interleave: false,
            parity_check: false,
        };

        match *self {
            Channel::Broadcast => Ok(downlink),
            Channel::DownlinkControl => Ok(CustomCode { crc_ones: true, ..downlink }),
            Channel::UplinkControl => {
                if info >= consts::SEGMENT_INFO_BITS ||
                   info >= consts::SEGMENT_SHORT_INFO_BITS && coded >= consts::SEGMENT_CODED_BITS
                {
                    return Err(PolarError::UnsupportedBlockLength { info, coded });
                }

                let pc = info >= consts::PC_MIN_INFO_BITS && info <= consts::PC_MAX_INFO_BITS;

                Ok(CustomCode {
                    crc: if pc { CrcKind::Crc6 } else { CrcKind::Crc11 },
                    max_exponent: consts::UPLINK_MAX_EXPONENT,
                    crc_ones: false,
                    crc_interleave: false,
                    channel_interleave: true,
                    parity_check: pc,
                })
            },
            Channel::Custom(code) => Ok(code),
        }
    }
}

/// Parameters of one polar code block, derived from the channel, the payload length,
/// and the transmitted length.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeParams {
    /// Number of information bits (A).
    pub info: usize,
    /// Number of transmitted bits (E).
    pub coded: usize,
    /// Number of information and CRC bits (K).
    pub payload: usize,
    /// Mother code exponent (n).
    pub exponent: usize,
    /// Mother code length (N).
    pub mother: usize,
    /// Attached CRC.
    pub crc: CrcKind,
    /// Whether 24 ones precede the payload in the CRC calculation.
    pub crc_ones: bool,
    /// Whether the CRC-encoded payload is interleaved.
    pub crc_interleave: bool,
    /// Whether the rate-matched codeword is channel interleaved.
    pub channel_interleave: bool,
    /// Number of parity-check bits (n_PC).
    pub pc_bits: usize,
    /// Number of parity-check bits placed on a minimum weight row (n_PC^wm).
    pub pc_weight_bits: usize,
    /// Rate matching mode.
    pub mode: Mode,
}

impl CodeParams {
    /// Derive the parameters for `info` payload bits transmitted over `coded` bits on the
    /// given channel.
    pub fn new(channel: &Channel, info: usize, coded: usize) -> Result<CodeParams> {
        let unsupported = PolarError::UnsupportedBlockLength { info, coded };

        if info < consts::MIN_INFO_BITS {
            return Err(unsupported);
        }

        let code = channel.code(info, coded)?;
        let payload = info + code.crc.width();
        let pc_bits = if code.parity_check { consts::PC_BITS } else { 0 };

        if code.crc_interleave && payload > consts::CRC_INTERLEAVER_BITS {
            return Err(unsupported);
        }

        if payload + pc_bits > coded {
            return Err(unsupported);
        }

        if code.max_exponent < consts::MIN_EXPONENT || code.max_exponent > consts::MAX_EXPONENT {
            return Err(unsupported);
        }

        // E - K + 3 > 192, rearranged to stay unsigned.
        let pc_weight_bits = if code.parity_check &&
            coded + consts::PC_BITS > payload + consts::PC_WM_THRESHOLD
        {
            1
        } else {
            0
        };

        let exponent = mother_exponent(payload, coded, code.max_exponent);
        let mother = 1 << exponent;

        Ok(CodeParams {
            info: info,
            coded: coded,
            payload: payload,
            exponent: exponent,
            mother: mother,
            crc: code.crc,
            crc_ones: code.crc_ones,
            crc_interleave: code.crc_interleave,
            channel_interleave: code.channel_interleave,
            pc_bits: pc_bits,
            pc_weight_bits: pc_weight_bits,
            mode: Mode::select(payload, mother, coded),
        })
    }

    /// Get the error describing this block length as unsupported.
    pub fn unsupported(&self) -> PolarError {
        PolarError::UnsupportedBlockLength {
            info: self.info,
            coded: self.coded,
        }
    }
}

/// Select the mother code exponent for `k` payload bits (including CRC) transmitted over
/// `e` bits, limited to `max` (TS 38.212 §5.3.1).
pub fn mother_exponent(k: usize, e: usize, max: usize) -> usize {
    assert!(k > 0 && e > 1);

    let ceil = log2_ceil(e);

    // Prefer the shorter code when E barely exceeds a power of two and the rate is low.
    let n1 = if 8 * e <= 9 * (1 << (ceil - 1)) && 16 * k < 9 * e {
        ceil - 1
    } else {
        ceil
    };

    let n2 = log2_ceil(k * consts::INV_MIN_RATE);

    n1.min(n2).min(max).max(consts::MIN_EXPONENT)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mother_exponent() {
        assert_eq!(mother_exponent(35, 108, 10), 7);
        assert_eq!(mother_exponent(56, 864, 9), 9);
        assert_eq!(mother_exponent(124, 2000, 10), 10);
        assert_eq!(mother_exponent(411, 500, 10), 9);
        // E just above a power of two at low rate drops down.
        assert_eq!(mother_exponent(20, 260, 10), 8);
        assert_eq!(mother_exponent(200, 260, 10), 9);
        // Bounded below by the rate limit and the minimum size.
        assert_eq!(mother_exponent(18, 1000, 10), 8);
        assert_eq!(mother_exponent(2, 20, 10), 5);
    }

    #[test]
    fn test_uplink() {
        let p = CodeParams::new(&Channel::UplinkControl, 24, 108).unwrap();
        assert_eq!(p.payload, 35);
        assert_eq!(p.mother, 128);
        assert_eq!(p.crc, CrcKind::Crc11);
        assert_eq!(p.mode, Mode::Puncturing);
        assert_eq!(p.pc_bits, 0);
        assert!(p.channel_interleave);
        assert!(!p.crc_interleave);

        let p = CodeParams::new(&Channel::UplinkControl, 12, 100).unwrap();
        assert_eq!(p.payload, 18);
        assert_eq!(p.crc, CrcKind::Crc6);
        assert_eq!(p.pc_bits, 3);
        assert_eq!(p.pc_weight_bits, 0);

        let p = CodeParams::new(&Channel::UplinkControl, 15, 300).unwrap();
        assert_eq!(p.mother, 256);
        assert_eq!(p.mode, Mode::Repetition);
        assert_eq!(p.pc_weight_bits, 1);

        let p = CodeParams::new(&Channel::UplinkControl, 400, 500).unwrap();
        assert_eq!(p.mother, 512);
        assert_eq!(p.mode, Mode::Shortening);
    }

    #[test]
    fn test_downlink() {
        let p = CodeParams::new(&Channel::Broadcast, 32, 864).unwrap();
        assert_eq!(p.payload, 56);
        assert_eq!(p.mother, 512);
        assert_eq!(p.mode, Mode::Repetition);
        assert!(p.crc_interleave);
        assert!(!p.crc_ones);

        let p = CodeParams::new(&Channel::DownlinkControl, 40, 108).unwrap();
        assert_eq!(p.payload, 64);
        assert_eq!(p.mother, 128);
        assert_eq!(p.mode, Mode::Shortening);
        assert!(p.crc_ones);
    }

    #[test]
    fn test_unsupported() {
        let err = |c: Channel, a, e| {
            assert_eq!(CodeParams::new(&c, a, e),
                       Err(PolarError::UnsupportedBlockLength { info: a, coded: e }));
        };

        // Below the minimum payload.
        err(Channel::UplinkControl, 5, 8);
        err(Channel::Broadcast, 5, 8);
        err(Channel::Custom(CustomCode::default()), 11, 200);
        // Rate above one.
        err(Channel::UplinkControl, 20, 25);
        err(Channel::DownlinkControl, 20, 40);
        // Beyond the CRC interleaver.
        err(Channel::DownlinkControl, 141, 1000);
        // Would need segmentation.
        err(Channel::UplinkControl, 400, 2000);
        err(Channel::UplinkControl, 1013, 1500);

        assert!(CodeParams::new(&Channel::DownlinkControl, 140, 1000).is_ok());
        assert!(CodeParams::new(&Channel::Custom(CustomCode::default()), 400, 2000).is_ok());
    }
}
