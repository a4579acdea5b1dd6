/// Smallest mother code exponent (N = 32).
pub const MIN_EXPONENT: usize = 5;
/// Largest mother code exponent supported by any channel (N = 1024).
pub const MAX_EXPONENT: usize = 10;
/// Largest mother code exponent for downlink channels.
pub const DOWNLINK_MAX_EXPONENT: usize = 9;
/// Largest mother code exponent for uplink control.
pub const UPLINK_MAX_EXPONENT: usize = 10;
/// Inverse of the minimum mother code rate, 1/R_min.
pub const INV_MIN_RATE: usize = 8;
/// Number of sub-blocks used by the rate matching sub-block interleaver.
pub const SUBBLOCKS: usize = 32;
/// Smallest payload coded with a polar code. Shorter payloads use other codes.
pub const MIN_INFO_BITS: usize = 12;
/// Length of the largest CRC input interleaving pattern.
pub const CRC_INTERLEAVER_BITS: usize = 164;
/// Number of parity-check bits used by short uplink control payloads.
pub const PC_BITS: usize = 3;
/// Smallest payload using parity-check bits on uplink control.
pub const PC_MIN_INFO_BITS: usize = 12;
/// Largest payload using parity-check bits on uplink control.
pub const PC_MAX_INFO_BITS: usize = 19;
/// A parity-check bit is moved to a minimum weight row when E - K + 3 exceeds this.
pub const PC_WM_THRESHOLD: usize = 192;
/// Uplink control payloads of at least this size are always segmented.
pub const SEGMENT_INFO_BITS: usize = 1013;
/// Uplink control payloads of at least this size are segmented when E is also large.
pub const SEGMENT_SHORT_INFO_BITS: usize = 360;
/// Coded length that triggers segmentation of mid-sized uplink control payloads.
pub const SEGMENT_CODED_BITS: usize = 1088;
/// Number of leading ones prepended to DCI payloads before CRC calculation.
pub const DCI_CRC_ONES: usize = 24;
/// Magnitude used for LLRs of shortened (known zero) positions.
pub const LLR_SATURATION: f32 = 1.0e6;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validate_params() {
        assert!(MIN_EXPONENT <= DOWNLINK_MAX_EXPONENT);
        assert!(DOWNLINK_MAX_EXPONENT <= MAX_EXPONENT);
        assert!(UPLINK_MAX_EXPONENT <= MAX_EXPONENT);
        // The smallest mother code must split evenly into sub-blocks.
        assert!((1 << MIN_EXPONENT) % SUBBLOCKS == 0);
        assert!(PC_MIN_INFO_BITS >= MIN_INFO_BITS);
    }
}
