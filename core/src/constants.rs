/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// ROMs are loaded here and the program counter starts here.
pub const PROGRAM_START: u16 = 0x200;

/// Largest program image that fits between `PROGRAM_START` and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Number of V registers; the last one (VF) doubles as the flag register.
pub const REGISTER_COUNT: usize = 16;

/// Index of VF.
pub const FLAG_REGISTER: usize = 0xF;

/// Return addresses the call stack can hold.
pub const STACK_SIZE: usize = 16;

/// Keys on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Value of a lit pixel in the frame buffer; unlit pixels are 0.
pub const PIXEL_ON: u32 = 0xFFFF_FFFF;

/// Nanoseconds per CPU cycle (~500Hz).
pub const CLOCK_SPEED: u64 = 2_000_000;

/// Where the glyph table lives in memory.
pub const GLYPH_START: u16 = 0x50;

/// Bytes per glyph; each glyph is 8 pixels wide and 5 rows tall.
pub const GLYPH_SIZE: u16 = 5;

/// # Glyphs
/// The built-in sprites for the hexadecimal digits 0..F.
///
/// Each row is one byte with the glyph drawn in the high nibble, e.g. `0`:
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const GLYPHS: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
