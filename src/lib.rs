//! Polar channel coding for the 5G NR physical layer, following 3GPP TS 38.212.
//!
//! A `PolarCodec` for a given `Channel` encodes information bits into a rate-matched
//! codeword and recovers them from channel LLRs with a CRC-aided successive-cancellation
//! list decoder. LLRs are positive for a likely zero bit.

#[macro_use]
extern crate log;

mod util;

pub mod codec;
pub mod coding;
pub mod consts;
pub mod error;
pub mod params;
pub mod stats;

pub use crate::codec::{Codec, Decoded, PolarCode, PolarCodec};
pub use crate::coding::scl::{Combine, Llr};
pub use crate::error::{PolarError, Result};
pub use crate::params::{Channel, CodeParams, CustomCode};
