use std::fmt;

use crate::opcode::Opcode;

/// A decoded instruction and its operands.
///
/// Register operands are indices into V0..VF; they are always in range because
/// they come from a single nibble.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 0nnn; machine code routines are not emulated
    Sys { addr: u16 },
    /// 1nnn
    Jump { addr: u16 },
    /// 2nnn
    Call { addr: u16 },
    /// 3xkk
    SkipIfEqual { x: usize, kk: u8 },
    /// 4xkk
    SkipIfNotEqual { x: usize, kk: u8 },
    /// 5xy0
    SkipIfRegEqual { x: usize, y: usize },
    /// 6xkk
    Load { x: usize, kk: u8 },
    /// 7xkk
    AddImmediate { x: usize, kk: u8 },
    /// 8xy0
    Assign { x: usize, y: usize },
    /// 8xy1
    Or { x: usize, y: usize },
    /// 8xy2
    And { x: usize, y: usize },
    /// 8xy3
    Xor { x: usize, y: usize },
    /// 8xy4
    AddWithCarry { x: usize, y: usize },
    /// 8xy5
    SubWithBorrow { x: usize, y: usize },
    /// 8xy6
    ShiftRight { x: usize },
    /// 8xy7
    ReverseSub { x: usize, y: usize },
    /// 8xyE
    ShiftLeft { x: usize },
    /// 9xy0
    SkipIfRegNotEqual { x: usize, y: usize },
    /// Annn
    SetIndex { addr: u16 },
    /// Bnnn
    JumpWithOffset { addr: u16 },
    /// Cxkk
    Random { x: usize, kk: u8 },
    /// Dxyn
    Draw { x: usize, y: usize, n: u8 },
    /// Ex9E
    SkipIfKeyDown { x: usize },
    /// ExA1
    SkipIfKeyUp { x: usize },
    /// Fx07
    ReadDelayTimer { x: usize },
    /// Fx0A
    AwaitKey { x: usize },
    /// Fx15
    SetDelayTimer { x: usize },
    /// Fx18
    SetSoundTimer { x: usize },
    /// Fx1E
    AddToIndex { x: usize },
    /// Fx29
    IndexToGlyph { x: usize },
    /// Fx33
    StoreBcd { x: usize },
    /// Fx55
    StoreRegisters { x: usize },
    /// Fx65
    LoadRegisters { x: usize },
    /// Anything else. Executes as a no-op.
    Unknown(Opcode),
}

impl Instruction {
    /// Selects the Instruction encoded by an opcode.
    ///
    /// Decoding never fails; patterns outside the instruction set come back as
    /// `Instruction::Unknown`.
    pub fn decode(op: impl Into<Opcode>) -> Self {
        let op = op.into();
        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::ClearScreen,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0x0, ..) => Instruction::Sys { addr },
            (0x1, ..) => Instruction::Jump { addr },
            (0x2, ..) => Instruction::Call { addr },
            (0x3, ..) => Instruction::SkipIfEqual { x, kk },
            (0x4, ..) => Instruction::SkipIfNotEqual { x, kk },
            (0x5, .., 0x0) => Instruction::SkipIfRegEqual { x, y },
            (0x6, ..) => Instruction::Load { x, kk },
            (0x7, ..) => Instruction::AddImmediate { x, kk },
            (0x8, .., 0x0) => Instruction::Assign { x, y },
            (0x8, .., 0x1) => Instruction::Or { x, y },
            (0x8, .., 0x2) => Instruction::And { x, y },
            (0x8, .., 0x3) => Instruction::Xor { x, y },
            (0x8, .., 0x4) => Instruction::AddWithCarry { x, y },
            (0x8, .., 0x5) => Instruction::SubWithBorrow { x, y },
            (0x8, .., 0x6) => Instruction::ShiftRight { x },
            (0x8, .., 0x7) => Instruction::ReverseSub { x, y },
            (0x8, .., 0xE) => Instruction::ShiftLeft { x },
            (0x9, .., 0x0) => Instruction::SkipIfRegNotEqual { x, y },
            (0xA, ..) => Instruction::SetIndex { addr },
            (0xB, ..) => Instruction::JumpWithOffset { addr },
            (0xC, ..) => Instruction::Random { x, kk },
            (0xD, ..) => Instruction::Draw { x, y, n },
            (0xE, .., 0x9, 0xE) => Instruction::SkipIfKeyDown { x },
            (0xE, .., 0xA, 0x1) => Instruction::SkipIfKeyUp { x },
            (0xF, .., 0x0, 0x7) => Instruction::ReadDelayTimer { x },
            (0xF, .., 0x0, 0xA) => Instruction::AwaitKey { x },
            (0xF, .., 0x1, 0x5) => Instruction::SetDelayTimer { x },
            (0xF, .., 0x1, 0x8) => Instruction::SetSoundTimer { x },
            (0xF, .., 0x1, 0xE) => Instruction::AddToIndex { x },
            (0xF, .., 0x2, 0x9) => Instruction::IndexToGlyph { x },
            (0xF, .., 0x3, 0x3) => Instruction::StoreBcd { x },
            (0xF, .., 0x5, 0x5) => Instruction::StoreRegisters { x },
            (0xF, .., 0x6, 0x5) => Instruction::LoadRegisters { x },
            _ => Instruction::Unknown(op),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::ClearScreen => write!(f, "CLS"),
            Instruction::Return => write!(f, "RET"),
            Instruction::Sys { addr } => write!(f, "SYS 0x{:03X}", addr),
            Instruction::Jump { addr } => write!(f, "JP 0x{:03X}", addr),
            Instruction::Call { addr } => write!(f, "CALL 0x{:03X}", addr),
            Instruction::SkipIfEqual { x, kk } => write!(f, "SE V{:X}, 0x{:02X}", x, kk),
            Instruction::SkipIfNotEqual { x, kk } => write!(f, "SNE V{:X}, 0x{:02X}", x, kk),
            Instruction::SkipIfRegEqual { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::Load { x, kk } => write!(f, "LD V{:X}, 0x{:02X}", x, kk),
            Instruction::AddImmediate { x, kk } => write!(f, "ADD V{:X}, 0x{:02X}", x, kk),
            Instruction::Assign { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Instruction::Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            Instruction::And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Instruction::Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Instruction::AddWithCarry { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Instruction::SubWithBorrow { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Instruction::ShiftRight { x } => write!(f, "SHR V{:X}", x),
            Instruction::ReverseSub { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Instruction::ShiftLeft { x } => write!(f, "SHL V{:X}", x),
            Instruction::SkipIfRegNotEqual { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            Instruction::SetIndex { addr } => write!(f, "LD I, 0x{:03X}", addr),
            Instruction::JumpWithOffset { addr } => write!(f, "JP V0, 0x{:03X}", addr),
            Instruction::Random { x, kk } => write!(f, "RND V{:X}, 0x{:02X}", x, kk),
            Instruction::Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Instruction::SkipIfKeyDown { x } => write!(f, "SKP V{:X}", x),
            Instruction::SkipIfKeyUp { x } => write!(f, "SKNP V{:X}", x),
            Instruction::ReadDelayTimer { x } => write!(f, "LD V{:X}, DT", x),
            Instruction::AwaitKey { x } => write!(f, "LD V{:X}, K", x),
            Instruction::SetDelayTimer { x } => write!(f, "LD DT, V{:X}", x),
            Instruction::SetSoundTimer { x } => write!(f, "LD ST, V{:X}", x),
            Instruction::AddToIndex { x } => write!(f, "ADD I, V{:X}", x),
            Instruction::IndexToGlyph { x } => write!(f, "LD F, V{:X}", x),
            Instruction::StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            Instruction::StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            Instruction::LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
            Instruction::Unknown(op) => write!(f, "DATA 0x{}", op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_fixed_opcodes() {
        assert_eq!(Instruction::decode(0x00E0), Instruction::ClearScreen);
        assert_eq!(Instruction::decode(0x00EE), Instruction::Return);
        assert_eq!(Instruction::decode(0x0123), Instruction::Sys { addr: 0x123 });
    }

    #[test]
    fn test_decodes_address_operands() {
        assert_eq!(Instruction::decode(0x1ABC), Instruction::Jump { addr: 0xABC });
        assert_eq!(Instruction::decode(0x2ABC), Instruction::Call { addr: 0xABC });
        assert_eq!(Instruction::decode(0xAABC), Instruction::SetIndex { addr: 0xABC });
        assert_eq!(
            Instruction::decode(0xBABC),
            Instruction::JumpWithOffset { addr: 0xABC }
        );
    }

    #[test]
    fn test_decodes_register_and_byte_operands() {
        assert_eq!(
            Instruction::decode(0x3A12),
            Instruction::SkipIfEqual { x: 0xA, kk: 0x12 }
        );
        assert_eq!(Instruction::decode(0x6B03), Instruction::Load { x: 0xB, kk: 0x03 });
        assert_eq!(Instruction::decode(0xC1FF), Instruction::Random { x: 0x1, kk: 0xFF });
        assert_eq!(
            Instruction::decode(0xD125),
            Instruction::Draw { x: 0x1, y: 0x2, n: 0x5 }
        );
    }

    #[test]
    fn test_decodes_arithmetic_family() {
        assert_eq!(Instruction::decode(0x8124), Instruction::AddWithCarry { x: 1, y: 2 });
        assert_eq!(Instruction::decode(0x8125), Instruction::SubWithBorrow { x: 1, y: 2 });
        assert_eq!(Instruction::decode(0x8126), Instruction::ShiftRight { x: 1 });
        assert_eq!(Instruction::decode(0x8127), Instruction::ReverseSub { x: 1, y: 2 });
        assert_eq!(Instruction::decode(0x812E), Instruction::ShiftLeft { x: 1 });
    }

    #[test]
    fn test_decodes_misc_family() {
        assert_eq!(Instruction::decode(0xE39E), Instruction::SkipIfKeyDown { x: 3 });
        assert_eq!(Instruction::decode(0xE3A1), Instruction::SkipIfKeyUp { x: 3 });
        assert_eq!(Instruction::decode(0xF00A), Instruction::AwaitKey { x: 0 });
        assert_eq!(Instruction::decode(0xF433), Instruction::StoreBcd { x: 4 });
        assert_eq!(Instruction::decode(0xFF55), Instruction::StoreRegisters { x: 0xF });
        assert_eq!(Instruction::decode(0xFF65), Instruction::LoadRegisters { x: 0xF });
    }

    #[test]
    fn test_unrecognised_patterns_are_unknown() {
        for op in [0x5121u16, 0x8128, 0x812F, 0x9121, 0xE100, 0xF100, 0xFFFF] {
            assert_eq!(Instruction::decode(op), Instruction::Unknown(Opcode::from(op)));
        }
    }

    #[test]
    fn test_every_opcode_decodes() {
        let unknown = (0..=u16::MAX)
            .filter(|op| matches!(Instruction::decode(*op), Instruction::Unknown(_)))
            .count();
        // 5xy? and 9xy? with a nonzero low nibble, 8xy? outside 0-7,E, and every
        // Ex?? / Fx?? pattern that isn't one of the 11 defined ones.
        let expected = 2 * 0x100 * 15 + 0x100 * 7 + 16 * (256 - 2) + 16 * (256 - 9);
        assert_eq!(unknown, expected);
    }

    #[test]
    fn test_display_mnemonics() {
        assert_eq!(Instruction::decode(0x00E0).to_string(), "CLS");
        assert_eq!(Instruction::decode(0x12F0).to_string(), "JP 0x2F0");
        assert_eq!(Instruction::decode(0x6A02).to_string(), "LD VA, 0x02");
        assert_eq!(Instruction::decode(0xD015).to_string(), "DRW V0, V1, 5");
        assert_eq!(Instruction::decode(0xFFFF).to_string(), "DATA 0xFFFF");
    }
}
