use rand::Rng;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG_REGISTER, GLYPH_SIZE, GLYPH_START, PIXEL_ON, STACK_SIZE,
};
use crate::error::{Error, Result};
use crate::instruction::Instruction;
use crate::state::State;

/// Applies one decoded instruction to the state.
///
/// The pc must already point past the instruction.
pub fn execute(instruction: Instruction, state: &mut State, rng: &mut impl Rng) -> Result<()> {
    use Instruction::*;

    match instruction {
        ClearScreen => clr(state),
        Return => rts(state)?,
        Sys { .. } => {}
        Jump { addr } => state.pc = addr,
        Call { addr } => call(state, addr)?,
        SkipIfEqual { x, kk } => state.skip_if(state.v[x] == kk),
        SkipIfNotEqual { x, kk } => state.skip_if(state.v[x] != kk),
        SkipIfRegEqual { x, y } => state.skip_if(state.v[x] == state.v[y]),
        SkipIfRegNotEqual { x, y } => state.skip_if(state.v[x] != state.v[y]),
        Load { x, kk } => state.v[x] = kk,
        AddImmediate { x, kk } => state.v[x] = state.v[x].wrapping_add(kk),
        Assign { x, y } => state.v[x] = state.v[y],
        Or { x, y } => state.v[x] |= state.v[y],
        And { x, y } => state.v[x] &= state.v[y],
        Xor { x, y } => state.v[x] ^= state.v[y],
        AddWithCarry { x, y } => add(state, x, y),
        SubWithBorrow { x, y } => sub(state, x, y),
        ShiftRight { x } => shr(state, x),
        ReverseSub { x, y } => subn(state, x, y),
        ShiftLeft { x } => shl(state, x),
        SetIndex { addr } => state.i = addr,
        JumpWithOffset { addr } => state.pc = u16::from(state.v[0x0]) + addr,
        Random { x, kk } => state.v[x] = rng.gen::<u8>() & kk,
        Draw { x, y, n } => draw(state, x, y, n)?,
        SkipIfKeyDown { x } => state.skip_if(state.key_down(state.v[x])?),
        SkipIfKeyUp { x } => state.skip_if(!state.key_down(state.v[x])?),
        ReadDelayTimer { x } => state.v[x] = state.delay_timer,
        AwaitKey { x } => keyd(state, x),
        SetDelayTimer { x } => state.delay_timer = state.v[x],
        SetSoundTimer { x } => state.sound_timer = state.v[x],
        AddToIndex { x } => state.i = state.i.wrapping_add(u16::from(state.v[x])),
        IndexToGlyph { x } => state.i = GLYPH_START + GLYPH_SIZE * u16::from(state.v[x]),
        StoreBcd { x } => bcd(state, x)?,
        StoreRegisters { x } => stor(state, x)?,
        LoadRegisters { x } => read(state, x)?,
        Unknown(op) => {
            tracing::warn!(
                "ignoring unrecognised opcode {} at 0x{:03X}",
                op,
                state.instruction_address()
            );
        }
    }
    Ok(())
}

/// clear
fn clr(state: &mut State) {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
}

/// PC = STACK.pop()
fn rts(state: &mut State) -> Result<()> {
    if state.sp == 0 {
        return Err(Error::StackUnderflow {
            address: state.instruction_address(),
        });
    }
    state.sp -= 1;
    state.pc = state.stack[state.sp];
    Ok(())
}

/// STACK.push(PC); PC = addr
fn call(state: &mut State, addr: u16) -> Result<()> {
    if state.sp == STACK_SIZE {
        return Err(Error::StackOverflow {
            address: state.instruction_address(),
        });
    }
    state.stack[state.sp] = state.pc;
    state.sp += 1;
    state.pc = addr;
    Ok(())
}

/// Vx += Vy; VF = carry
/// The flag is written before the result, so with x = F the result wins.
fn add(state: &mut State, x: usize, y: usize) {
    let sum = u16::from(state.v[x]) + u16::from(state.v[y]);
    state.v[FLAG_REGISTER] = u8::from(sum > 0xFF);
    state.v[x] = (sum & 0xFF) as u8;
}

/// VF = Vx > Vy; Vx -= Vy
/// The subtraction reads the registers after the flag is written, so VF as an
/// operand is the new flag.
fn sub(state: &mut State, x: usize, y: usize) {
    state.v[FLAG_REGISTER] = u8::from(state.v[x] > state.v[y]);
    state.v[x] = state.v[x].wrapping_sub(state.v[y]);
}

/// VF = shifted out bit; Vx >>= 1
fn shr(state: &mut State, x: usize) {
    state.v[FLAG_REGISTER] = state.v[x] & 0x1;
    state.v[x] >>= 1;
}

/// VF = Vy > Vx; Vx = Vy - Vx
fn subn(state: &mut State, x: usize, y: usize) {
    state.v[FLAG_REGISTER] = u8::from(state.v[y] > state.v[x]);
    state.v[x] = state.v[y].wrapping_sub(state.v[x]);
}

/// VF = shifted out bit; Vx <<= 1
fn shl(state: &mut State, x: usize) {
    state.v[FLAG_REGISTER] = state.v[x] >> 7;
    state.v[x] <<= 1;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n onto the FrameBuffer at (Vx, Vy).
///
/// The origin wraps around the screen but the sprite itself does not: pixels
/// that fall past the right or bottom edge are clipped. Clipping is not an
/// error; only sprite rows past the end of memory are reported.
/// Sets VF if any pixels are erased.
fn draw(state: &mut State, x: usize, y: usize, n: u8) -> Result<()> {
    let origin_x = usize::from(state.v[x]) % DISPLAY_WIDTH;
    let origin_y = usize::from(state.v[y]) % DISPLAY_HEIGHT;
    let mut sprite = [0u8; 0xF];
    let rows = usize::from(n);
    sprite[..rows].copy_from_slice(state.read(usize::from(state.i), rows)?);

    // Reset the flag (used for collision detection)
    state.v[FLAG_REGISTER] = 0x0;

    for (row, &byte) in sprite[..rows].iter().enumerate() {
        let py = origin_y + row;
        if py >= DISPLAY_HEIGHT {
            break;
        }
        for bit in 0..8 {
            let px = origin_x + bit;
            if px >= DISPLAY_WIDTH {
                break;
            }
            if (byte >> (7 - bit)) & 0x1 == 0 {
                continue;
            }
            let pixel = &mut state.frame_buffer[py][px];
            if *pixel == PIXEL_ON {
                state.v[FLAG_REGISTER] = 0x1;
            }
            *pixel ^= PIXEL_ON;
        }
    }

    state.draw_flag = true;
    Ok(())
}

/// await keypress for Vx
/// Takes the lowest pressed key; with no key down the pc is wound back so this
/// instruction runs again on the next cycle.
fn keyd(state: &mut State, x: usize) {
    match state.keypad.iter().position(|down| *down) {
        Some(key) => state.v[x] = key as u8,
        None => {
            tracing::trace!("V{:X} waiting on a key press", x);
            state.pc = state.pc.wrapping_sub(0x2);
        }
    }
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(state: &mut State, x: usize) -> Result<()> {
    let vx = state.v[x];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    let address = usize::from(state.i);
    state.write(address, digits.len())?.copy_from_slice(&digits);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
fn stor(state: &mut State, x: usize) -> Result<()> {
    let registers = state.v;
    let address = usize::from(state.i);
    state
        .write(address, x + 1)?
        .copy_from_slice(&registers[..=x]);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
fn read(state: &mut State, x: usize) -> Result<()> {
    let mut registers = state.v;
    registers[..=x].copy_from_slice(state.read(usize::from(state.i), x + 1)?);
    state.v = registers;
    Ok(())
}
