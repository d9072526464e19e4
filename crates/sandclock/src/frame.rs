//! RGBA8 snapshot of a [`SandClock`] for renderers.

use glam::IVec2;

use crate::cell::Rgb;
use crate::SandClock;

/// Row-major pixels, top row first. `origin` is the grid coordinate of the
/// bottom-left pixel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub origin: IVec2,
    pub pixels: Vec<u8>,
}

impl Frame {
    /// RGBA of the pixel covering `coord`, if it is inside the frame.
    #[must_use]
    pub fn pixel(&self, coord: IVec2) -> Option<[u8; 4]> {
        let local = coord - self.origin;
        if local.x < 0 || local.y < 0 || local.x >= self.width as i32 || local.y >= self.height as i32
        {
            return None;
        }
        let row = self.height as usize - 1 - local.y as usize;
        let start = (row * self.width as usize + local.x as usize) * 4;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[start..start + 4]);
        Some(rgba)
    }
}

/// Paint the terrain bounds plus a one-cell wall margin. Grains show their
/// own color, free movable cells gray, walls black.
#[must_use]
pub fn render_rgba(clock: &SandClock) -> Frame {
    let Some(bounds) = clock.map().bounds() else {
        return Frame::default();
    };
    let view = bounds.padded(1);
    let mut pixels = Vec::with_capacity((view.width() * view.height()) as usize * 4);
    for row in view.rows_top_down() {
        for coord in row {
            let color = match clock.particle_at(coord) {
                Some(cell) => cell.color,
                None if clock.map().is_movable(coord) => Rgb::GRAY,
                None => Rgb::BLACK,
            };
            pixels.extend_from_slice(&color.to_rgba());
        }
    }
    Frame {
        width: view.width() as u32,
        height: view.height() as u32,
        origin: view.min,
        pixels,
    }
}
