//! Standard errors that may occur when configuring a polar code.

use thiserror::Error;

/// Polar coding runtime errors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum PolarError {
    /// No standardized single-segment polar configuration exists for `info` payload bits
    /// carried over `coded` transmitted bits.
    #[error("unsupported block length: {info} information bits over {coded} coded bits")]
    UnsupportedBlockLength {
        /// Number of information bits (A).
        info: usize,
        /// Number of rate-matched output bits (E).
        coded: usize,
    },
}

/// Standard result using `PolarError`.
pub type Result<T> = std::result::Result<T, PolarError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        let err = PolarError::UnsupportedBlockLength { info: 5, coded: 8 };
        assert_eq!(err.to_string(),
                   "unsupported block length: 5 information bits over 8 coded bits");
    }
}
