use std::fmt;

/// # Opcodes
///
/// Opcodes are 16 bits, fetched big-endian from two consecutive bytes of memory.
/// Which instruction they encode is cased on some combination of:
/// - `(n, _, _, _)` the instruction class; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within a class
/// - `(_, _, n, n)` more specific behavior within a class
/// - `(_, n, n, n)` a fixed function that takes no operands (e.g. CLS)
///
/// Nibbles not used to select the instruction usually carry its operands.
/// - `(_, n, n, n)` a 12-bit address
/// - `(_, _, n, n)` an 8-bit immediate
/// - `(_, n, _, _)` the register Vx, or the range V0..=Vx
/// - `(_, _, n, _)` the register Vy
/// - `(_, _, _, n)` a 4-bit immediate, usually a sprite height
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Opcode(u16);

impl Opcode {
    /// Combines the high and low bytes of an instruction.
    pub fn from_bytes(high: u8, low: u8) -> Self {
        Opcode(u16::from_be_bytes([high, low]))
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// The Opcode's four nibbles, most significant first.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        (
            ((self.0 & 0xF000) >> 12) as u8,
            ((self.0 & 0x0F00) >> 8) as u8,
            ((self.0 & 0x00F0) >> 4) as u8,
            (self.0 & 0x000F) as u8,
        )
    }

    /// Register index in the second nibble.
    /// `[_x__]`
    pub fn x(self) -> usize {
        usize::from((self.0 & 0x0F00) >> 8)
    }

    /// Register index in the third nibble.
    /// `[__y_]`
    pub fn y(self) -> usize {
        usize::from((self.0 & 0x00F0) >> 4)
    }

    /// `[___n]`
    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    /// `[__kk]`
    pub fn kk(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// `[_nnn]`
    pub fn addr(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl From<u16> for Opcode {
    fn from(value: u16) -> Self {
        Opcode(value)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}
