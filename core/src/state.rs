use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, GLYPHS, GLYPH_START, KEY_COUNT, MEMORY_SIZE, PROGRAM_START,
    REGISTER_COUNT, STACK_SIZE,
};
use crate::error::{Error, Result};
use crate::opcode::Opcode;

/// The FrameBuffer is indexed as [y][x]; a pixel is either 0 or `PIXEL_ON`.
pub type FrameBuffer = [[u32; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Everything the interpreter knows about the machine at a point in time.
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - all 16 are general purpose
///     - VF is also overwritten with the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack, 0..=16
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented once per cycle
/// - a tone should play while the sound timer is above 0
///
/// ## Memory
/// - a stack of 16 return addresses
/// - 4096 bytes of addressable memory
///     - 0x050..0x0A0 holds the glyph table
///     - 0x200.. holds the program
/// - 32x64 frame buffer
///
/// ## Input
/// - the pressed status of keys 0..F, written from the outside
#[derive(Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: usize,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub keypad: [bool; KEY_COUNT],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub opcode: Opcode,
    pub draw_flag: bool,
}

impl State {
    /// Power-on state: empty memory apart from the glyph table, blank screen.
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let glyphs = usize::from(GLYPH_START);
        memory[glyphs..glyphs + GLYPHS.len()].copy_from_slice(&GLYPHS);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            keypad: [false; KEY_COUNT],
            delay_timer: 0,
            sound_timer: 0,
            opcode: Opcode::default(),
            // the first frame is always worth presenting
            draw_flag: true,
        }
    }

    /// Address of the instruction currently executing.
    ///
    /// The pc has already moved past it by the time it executes.
    pub fn instruction_address(&self) -> u16 {
        self.pc.wrapping_sub(2)
    }

    /// if cond then pc += 2
    pub fn skip_if(&mut self, cond: bool) {
        if cond {
            self.pc = self.pc.wrapping_add(0x2);
        }
    }

    /// Borrows `len` bytes of memory starting at `address`.
    pub fn read(&self, address: usize, len: usize) -> Result<&[u8]> {
        let end = Self::end_of(address, len)?;
        Ok(&self.memory[address..end])
    }

    /// Mutably borrows `len` bytes of memory starting at `address`.
    pub fn write(&mut self, address: usize, len: usize) -> Result<&mut [u8]> {
        let end = Self::end_of(address, len)?;
        Ok(&mut self.memory[address..end])
    }

    fn end_of(address: usize, len: usize) -> Result<usize> {
        match address.checked_add(len) {
            Some(end) if end <= MEMORY_SIZE => Ok(end),
            _ => Err(Error::MemoryOutOfBounds { address, len }),
        }
    }

    /// Reads the opcode at the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> Result<Opcode> {
        let bytes = self.read(usize::from(self.pc), 2)?;
        Ok(Opcode::from_bytes(bytes[0], bytes[1]))
    }

    /// Pressed status of the key named by a register value.
    pub fn key_down(&self, key: u8) -> Result<bool> {
        self.keypad
            .get(usize::from(key))
            .copied()
            .ok_or(Error::InvalidKey { key })
    }

    /// Decrements each nonzero timer by one.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_holds_glyphs() {
        let state = State::new();
        assert_eq!(state.memory[0x50..0xA0], GLYPHS);
        assert!(state.memory[..0x50].iter().all(|b| *b == 0));
        assert!(state.memory[0xA0..].iter().all(|b| *b == 0));
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_fetch_combines_bytes() {
        let mut state = State::new();
        state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(state.fetch().unwrap().value(), 0xAABB);
    }

    #[test]
    fn test_fetch_at_last_byte_is_out_of_bounds() {
        let mut state = State::new();
        state.pc = 0xFFF;
        assert!(matches!(
            state.fetch(),
            Err(Error::MemoryOutOfBounds { address: 0xFFF, len: 2 })
        ));
        state.pc = 0xFFE;
        assert!(state.fetch().is_ok());
    }

    #[test]
    fn test_write_rejects_ranges_past_memory() {
        let mut state = State::new();
        assert!(state.write(0xFFD, 3).is_ok());
        assert!(state.write(0xFFE, 3).is_err());
        assert!(state.write(usize::MAX, 1).is_err());
    }

    #[test]
    fn test_key_down_rejects_missing_keys() {
        let mut state = State::new();
        state.keypad[0xF] = true;
        assert!(state.key_down(0xF).unwrap());
        assert!(!state.key_down(0x0).unwrap());
        assert!(matches!(state.key_down(0x10), Err(Error::InvalidKey { key: 0x10 })));
    }

    #[test]
    fn test_timers_stop_at_zero() {
        let mut state = State::new();
        state.delay_timer = 1;
        state.tick_timers();
        state.tick_timers();
        assert_eq!(state.delay_timer, 0);
        assert_eq!(state.sound_timer, 0);
    }
}
