use std::fs;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::Machine;
use chip8_display::Display;

use crate::config::Config;
use crate::keymap::keymap;

pub fn run(config: &Config) -> Result<()> {
    let mut machine = match config.seed {
        Some(seed) => Machine::with_seed(seed),
        None => Machine::new(),
    };

    // Load ROM
    let program = fs::read(&config.rom)
        .with_context(|| format!("unable to read {}", config.rom.display()))?;
    machine
        .load_program(&program)
        .with_context(|| format!("unable to load {}", config.rom.display()))?;
    tracing::info!("loaded {} ({} bytes)", config.rom.display(), program.len());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, config.scale)?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    // Set initial timing
    let cycle_time = config.cycle_time();
    let mut last_cycle = Instant::now();

    // Whether or not the cycle time should be respected
    let mut fast_forward = false;

    'event: loop {
        // Only render when the frame buffer has changed
        if let Some(frame) = machine.take_frame() {
            display.render(frame)?;
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => machine.key_press(kc)?,
                    (Keycode::Space, _) => fast_forward = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => machine.key_release(kc)?,
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        machine.step().with_context(|| {
            format!(
                "machine halted after opcode {} at 0x{:03X}",
                machine.current_opcode(),
                machine.program_counter()
            )
        })?;

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    tracing::info!("quitting");
    Ok(())
}
