//! Polar code pipelines for a single block length, and a per-channel codec that caches
//! them.
//!
//! Encoding runs CRC attachment, optional CRC interleaving, placement of payload and
//! parity-check bits, the polar transform, rate matching, and optional channel
//! interleaving. Decoding inverts the channel-side steps over LLRs, runs the list
//! decoder, and picks the most likely path whose CRC passes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::coding::interleave::Interleaver;
use crate::coding::parity::ParityRegister;
use crate::coding::pattern::{InfoPattern, Role};
use crate::coding::polar;
use crate::coding::rate_match::RateMatch;
use crate::coding::scl::{Candidate, Combine, ListDecoder, Llr};
use crate::error::Result;
use crate::params::{Channel, CodeParams};

/// Encoder and decoder interface for a family of block codes.
pub trait Codec {
    /// Encode the given information bits into `coded_len` transmitted bits.
    fn encode(&self, info: &[u8], coded_len: usize) -> Result<Vec<u8>>;

    /// Recover `info_len` information bits from the LLRs of the transmitted bits, using
    /// a list of `list_size` paths and either min-sum or exact check-node updates.
    fn decode(&self, llrs: &[f64], info_len: usize, list_size: usize, min_sum: bool)
        -> Result<Vec<u8>>;
}

/// Result of decoding a block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Decoded {
    /// Recovered information bits.
    pub bits: Vec<u8>,
    /// Whether the CRC passed. If not, `bits` come from the best path metric.
    pub crc_ok: bool,
}

/// Complete polar code for a fixed channel and block length.
#[derive(Clone, Debug)]
pub struct PolarCode {
    params: CodeParams,
    rate_match: RateMatch,
    pattern: InfoPattern,
    /// CRC input interleaver, if used.
    crc_order: Option<Interleaver>,
    /// Channel interleaver, if used.
    channel_order: Option<Interleaver>,
}

impl PolarCode {
    /// Construct the code carrying `info` bits over `coded` bits on the given channel.
    pub fn new(channel: &Channel, info: usize, coded: usize) -> Result<PolarCode> {
        let params = CodeParams::new(channel, info, coded)?;
        let rate_match = RateMatch::new(params.payload, params.mother, params.coded);

        let crc_order = if params.crc_interleave {
            Some(Interleaver::crc(params.payload))
        } else {
            None
        };

        let channel_order = if params.channel_interleave {
            Some(Interleaver::channel(params.coded))
        } else {
            None
        };

        let pattern = InfoPattern::new(&params, &rate_match, crc_order.as_ref())?;

        debug!("built polar code A={} E={} K={} N={} {:?}", params.info, params.coded,
               params.payload, params.mother, params.mode);

        Ok(PolarCode {
            params: params,
            rate_match: rate_match,
            pattern: pattern,
            crc_order: crc_order,
            channel_order: channel_order,
        })
    }

    /// Get the parameters of the code.
    pub fn params(&self) -> &CodeParams { &self.params }

    /// Get the roles of the mother code positions.
    pub fn pattern(&self) -> &InfoPattern { &self.pattern }

    /// Encode the given information bits into the transmitted bits.
    pub fn encode(&self, info: &[u8]) -> Vec<u8> {
        let p = &self.params;

        assert_eq!(info.len(), p.info);
        assert!(info.iter().all(|&b| b >> 1 == 0));

        let mut payload = info.to_vec();
        payload.extend(p.crc.checksum(info, p.crc_ones));

        let payload = match self.crc_order {
            Some(ref il) => il.interleave(&payload[..]),
            None => payload,
        };

        let mut u = vec![0; p.mother];

        for (&i, &bit) in self.pattern.carriers().iter().zip(payload.iter()) {
            u[i] = bit;
        }

        // Parity-check bits depend on every payload bit placed before them.
        let mut parity = ParityRegister::new();

        for (i, &role) in self.pattern.roles().iter().enumerate() {
            parity.shift();

            match role {
                Role::Frozen => {},
                Role::ParityCheck => u[i] = parity.bit(),
                Role::Information | Role::Crc => parity.absorb(u[i]),
            }
        }

        polar::transform(&mut u[..]);

        let coded = self.rate_match.select(&u[..]);

        match self.channel_order {
            Some(ref il) => il.interleave(&coded[..]),
            None => coded,
        }
    }

    /// Decode the LLRs of the transmitted bits with a list of `list_size` paths.
    pub fn decode<F: Llr>(&self, llrs: &[F], list_size: usize, combine: Combine) -> Decoded {
        let p = &self.params;

        assert_eq!(llrs.len(), p.coded);

        let llrs = match self.channel_order {
            Some(ref il) => il.deinterleave(llrs),
            None => llrs.to_vec(),
        };

        let mother = self.rate_match.recover(&llrs[..]);
        let cands = ListDecoder::new(self.pattern.roles(), list_size, combine)
            .decode(&mother[..]);

        for cand in cands.iter() {
            let payload = self.payload(cand);

            if p.crc.check(&payload[..], p.crc_ones) {
                return Decoded {
                    bits: payload[..p.info].to_vec(),
                    crc_ok: true,
                };
            }
        }

        debug!("no CRC match among {} paths (A={} E={})", cands.len(), p.info, p.coded);

        let payload = match cands.first() {
            Some(best) => self.payload(best),
            None => vec![0; p.payload],
        };

        Decoded {
            bits: payload[..p.info].to_vec(),
            crc_ok: false,
        }
    }

    /// Extract the K payload bits of the given path in natural order.
    fn payload<F>(&self, cand: &Candidate<F>) -> Vec<u8> {
        let bits: Vec<u8> = self.pattern.carriers().iter()
            .map(|&i| cand.bits[i])
            .collect();

        match self.crc_order {
            Some(ref il) => il.deinterleave(&bits[..]),
            None => bits,
        }
    }
}

/// Codec for one channel, building each block length's code on first use.
pub struct PolarCodec {
    channel: Channel,
    /// Codes built so far, keyed by (A, E).
    cache: Mutex<HashMap<(usize, usize), Arc<PolarCode>>>,
}

impl PolarCodec {
    /// Construct a new `PolarCodec` for the given channel.
    pub fn new(channel: Channel) -> PolarCodec {
        PolarCodec {
            channel: channel,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Get the channel whose rules the codec applies.
    pub fn channel(&self) -> Channel { self.channel }

    /// Get the code for `info` bits over `coded` bits, building it if needed.
    pub fn code(&self, info: usize, coded: usize) -> Result<Arc<PolarCode>> {
        // Entries are inserted whole, so a poisoned map is still consistent.
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(code) = cache.get(&(info, coded)) {
            return Ok(code.clone());
        }

        let code = Arc::new(PolarCode::new(&self.channel, info, coded)?);
        cache.insert((info, coded), code.clone());

        Ok(code)
    }
}

impl Codec for PolarCodec {
    fn encode(&self, info: &[u8], coded_len: usize) -> Result<Vec<u8>> {
        Ok(self.code(info.len(), coded_len)?.encode(info))
    }

    fn decode(&self, llrs: &[f64], info_len: usize, list_size: usize, min_sum: bool)
        -> Result<Vec<u8>>
    {
        let combine = if min_sum { Combine::MinSum } else { Combine::SumProduct };
        Ok(self.code(info_len, llrs.len())?.decode(llrs, list_size, combine).bits)
    }
}
