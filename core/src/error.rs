use thiserror::Error;

/// Conditions under which the machine refuses to carry on.
///
/// Every variant is detected synchronously, either while loading a program or
/// during a single `step`. Memory is checked before it is written so a failed
/// instruction never touches anything outside `0..MEMORY_SIZE`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("program is {size} bytes but only {capacity} bytes are available")]
    ProgramTooLarge { size: usize, capacity: usize },

    #[error("call at 0x{address:03X} with a full stack")]
    StackOverflow { address: u16 },

    #[error("return at 0x{address:03X} with an empty stack")]
    StackUnderflow { address: u16 },

    #[error("access of {len} bytes at 0x{address:04X} is outside of memory")]
    MemoryOutOfBounds { address: usize, len: usize },

    #[error("key 0x{key:02X} does not exist on the keypad")]
    InvalidKey { key: u8 },

    #[error("unable to read program")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
