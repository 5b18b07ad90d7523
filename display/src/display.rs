use sdl2::pixels::PixelFormatEnum;
use thiserror::Error;

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::FrameBuffer;

/// Colour of an unlit pixel: opaque black in RGBA8888.
const BACKGROUND: u32 = 0x0000_00FF;

const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("sdl: {0}")]
    Sdl(String),
}

impl DisplayError {
    fn sdl(err: impl ToString) -> Self {
        DisplayError::Sdl(err.to_string())
    }
}

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// The machine stores each pixel as a full 32 bit value, either 0 or `PIXEL_ON`,
/// so lit pixels can be handed to an RGBA8888 texture as they are.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, DisplayError> {
        let video_subsystem = sdl.video().map_err(DisplayError::sdl)?;
        let window = video_subsystem
            .window(
                "Chip-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(DisplayError::sdl)?;
        let canvas = window.into_canvas().build().map_err(DisplayError::sdl)?;

        Ok(Display { canvas })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of bytes that represent concatenated rows of
    /// pixels. Each pixel is a packed RGBA8888 value in native byte order.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .map(|pixel| if *pixel == 0 { BACKGROUND } else { *pixel })
            .flat_map(u32::to_ne_bytes)
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGBA8888 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGBA8888,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(DisplayError::sdl)?;

        texture
            .update(
                None,
                &Display::frame_to_sdl_texture(frame),
                DISPLAY_WIDTH * BYTES_PER_PIXEL,
            )
            .map_err(DisplayError::sdl)?;

        self.canvas.clear();
        self.canvas
            .copy(&texture, None, None)
            .map_err(DisplayError::sdl)?;
        self.canvas.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chip8_core::constants::PIXEL_ON;

    #[test]
    fn test_frame_to_sdl_texture() {
        let mut frame: FrameBuffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[0][0..2].copy_from_slice(&[0, PIXEL_ON]);
        frame[1][0..2].copy_from_slice(&[PIXEL_ON, 0]);
        let texture = Display::frame_to_sdl_texture(&frame);

        let off = BACKGROUND.to_ne_bytes();
        let on = PIXEL_ON.to_ne_bytes();
        let row = DISPLAY_WIDTH * BYTES_PER_PIXEL;

        assert_eq!(texture.len(), DISPLAY_WIDTH * DISPLAY_HEIGHT * BYTES_PER_PIXEL);
        assert_eq!(texture[0..4], off);
        assert_eq!(texture[4..8], on);
        assert_eq!(texture[row..row + 4], on);
        assert_eq!(texture[row + 4..row + 8], off);
        assert_eq!(texture[row + 8..row + 12], off);
    }
}
