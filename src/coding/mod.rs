//! Building blocks of NR polar coding: reliability ordering, rate matching, bit
//! placement, CRC and parity checks, the polar transform, and list decoding.

pub mod crc;
pub mod interleave;
pub mod parity;
pub mod pattern;
pub mod polar;
pub mod rate_match;
pub mod reliability;
pub mod scl;
