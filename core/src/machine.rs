use std::io::Read;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{KEY_COUNT, MAX_PROGRAM_SIZE, PROGRAM_START, REGISTER_COUNT};
use crate::error::{Error, Result};
use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::operations;
use crate::state::{FrameBuffer, State};

/// # Machine
/// A Chip-8 virtual machine.
///
/// Owns every piece of interpreter state and does no I/O of its own.
/// The outside world interfaces with it via methods to:
/// - reset it and load programs
/// - press and release keys
/// - advance it a single cycle at a time
/// - inspect its frame buffer for rendering by some display
///
/// How often `step` is called is up to the caller.
pub struct Machine {
    state: State,
    rng: StdRng,
}

impl Machine {
    pub fn new() -> Self {
        Machine {
            state: State::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// A machine whose random number instruction produces a fixed sequence.
    pub fn with_seed(seed: u64) -> Self {
        Machine {
            state: State::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns every register, timer, key and byte of memory to its power-on
    /// value and reloads the glyph table.
    pub fn reset(&mut self) {
        self.state = State::new();
        tracing::debug!("machine reset");
    }

    /// Copies a program image into memory at `PROGRAM_START`.
    ///
    /// Images that would run past the end of memory are rejected without
    /// touching memory.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Error::ProgramTooLarge {
                size: program.len(),
                capacity: MAX_PROGRAM_SIZE,
            });
        }
        self.state
            .write(usize::from(PROGRAM_START), program.len())?
            .copy_from_slice(program);
        tracing::debug!("loaded {} byte program", program.len());
        Ok(())
    }

    /// Load a rom from some source
    ///
    /// # Arguments
    /// * `reader` a reader over the raw program image
    ///
    /// Returns the number of bytes loaded.
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize> {
        let mut program = Vec::with_capacity(MAX_PROGRAM_SIZE);
        reader.read_to_end(&mut program)?;
        self.load_program(&program)?;
        Ok(program.len())
    }

    /// Advances the machine by a single cycle
    /// - fetches the opcode at the pc and moves the pc past it
    /// - decodes and executes it
    /// - ticks both timers
    ///
    /// A failed cycle leaves the timers alone. Returns the executed instruction.
    pub fn step(&mut self) -> Result<Instruction> {
        let address = self.state.pc;
        let op = self.state.fetch()?;
        self.state.opcode = op;
        self.state.pc = address.wrapping_add(2);

        let instruction = Instruction::decode(op);
        tracing::trace!("0x{:03X}: {} {}", address, op, instruction);
        operations::execute(instruction, &mut self.state, &mut self.rng)?;

        self.state.tick_timers();
        Ok(instruction)
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if it changed since it was last taken
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Set the pressed status of a key
    ///
    /// # Arguments
    /// * `key` the keypad index, 0x0..=0xF
    /// * `down` whether the key is held
    pub fn set_key(&mut self, key: u8, down: bool) -> Result<()> {
        let slot = self
            .state
            .keypad
            .get_mut(usize::from(key))
            .ok_or(Error::InvalidKey { key })?;
        *slot = down;
        Ok(())
    }

    pub fn key_press(&mut self, key: u8) -> Result<()> {
        self.set_key(key, true)
    }

    pub fn key_release(&mut self, key: u8) -> Result<()> {
        self.set_key(key, false)
    }

    /// Replaces the pressed status of every key at once.
    pub fn set_keypad(&mut self, keys: [bool; KEY_COUNT]) {
        self.state.keypad = keys;
    }

    pub fn keypad(&self) -> &[bool; KEY_COUNT] {
        &self.state.keypad
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.state.v
    }

    pub fn index_pointer(&self) -> u16 {
        self.state.i
    }

    pub fn program_counter(&self) -> u16 {
        self.state.pc
    }

    pub fn stack_pointer(&self) -> usize {
        self.state.sp
    }

    /// The live portion of the call stack, oldest return address first.
    pub fn stack(&self) -> &[u16] {
        &self.state.stack[..self.state.sp]
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    /// Whether a tone should be playing.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// The opcode fetched by the most recent `step`.
    pub fn current_opcode(&self) -> Opcode {
        self.state.opcode
    }

    pub fn memory(&self) -> &[u8] {
        &self.state.memory
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
