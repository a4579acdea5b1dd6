//! Cyclic shift register generating parity-check bits, as described in TS 38.212
//! §5.3.1.2.
//!
//! The register is shifted once per mother code position. Payload bits are folded into
//! the head of the register, and a parity-check position takes the current head.

/// Number of cells in the register.
const CELLS: u32 = 5;

/// Five-cell parity register, with cell `y0` in the LSB.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ParityRegister(u8);

impl ParityRegister {
    /// Construct a new `ParityRegister` with all cells cleared.
    pub fn new() -> ParityRegister { ParityRegister(0) }

    /// Rotate the cells by one position: y0 <- y1 <- ... <- y4 <- y0.
    pub fn shift(&mut self) {
        self.0 = self.0 >> 1 | (self.0 & 1) << (CELLS - 1);
    }

    /// Get the parity bit at the head of the register.
    pub fn bit(&self) -> u8 { self.0 & 1 }

    /// Fold the given payload bit into the head of the register.
    pub fn absorb(&mut self, bit: u8) {
        assert!(bit >> 1 == 0);
        self.0 ^= bit;
    }
}
