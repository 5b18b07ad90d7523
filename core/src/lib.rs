//! A Chip-8 interpreter core.
//!
//! [`Machine`] holds all of the interpreter state. Drivers load a program into
//! it, write the keypad, call [`Machine::step`] at whatever rate they like and
//! render the frame buffer.
pub use error::{Error, Result};
pub use instruction::Instruction;
pub use machine::Machine;
pub use opcode::Opcode;
pub use state::FrameBuffer;

pub mod constants;
mod error;
mod instruction;
mod machine;
mod opcode;
mod operations;
mod state;
