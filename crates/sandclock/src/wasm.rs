//! Browser-facing wrapper around [`SandClock`].
//!
//! The neck stays closed between ticks and only opens for the ticks the
//! drain schedule picks, so the upper chamber empties at a steady rate.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::error::GeometryError;
use crate::frame::render_rgba;
use crate::geometry::{checked_direction, tilt_to_direction};
use crate::map::Bounds;
use crate::transition::DrainSchedule;
use crate::SandClock;

/// Ticks it takes the default hourglass to drain completely.
pub const DEFAULT_DRAIN_TICKS: u32 = 320;

#[wasm_bindgen]
#[derive(Debug)]
pub struct Hourglass {
    clock: SandClock,
    schedule: DrainSchedule,
}

impl Default for Hourglass {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Hourglass {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        let mut clock = SandClock::default();
        clock.set_transition_enabled(false);
        let schedule = DrainSchedule::for_duration(DEFAULT_DRAIN_TICKS, clock.len());
        Self { clock, schedule }
    }

    /// Spread the drain over `total_ticks`. Restarts the schedule.
    pub fn set_drain_ticks(&mut self, total_ticks: u32) {
        self.schedule = DrainSchedule::for_duration(total_ticks, self.clock.len());
    }

    /// Advance one tick with the board rotated by `tilt_degrees`; 0 is
    /// upright.
    pub fn tick(&mut self, tilt_degrees: f32) -> Result<(), JsValue> {
        let direction = tilt_push(tilt_degrees).map_err(|e| js_error(&e))?;
        self.step(direction);
        Ok(())
    }

    /// Advance one tick with an explicit push direction.
    pub fn push(&mut self, dx: f32, dy: f32) -> Result<(), JsValue> {
        let direction = checked_direction(Vec2::new(dx, dy)).map_err(|e| js_error(&e))?;
        self.step(direction);
        Ok(())
    }

    /// Open or shut the neck by hand. The next scheduled opening leaves it
    /// shut again.
    pub fn set_transition_enabled(&mut self, enabled: bool) {
        self.clock.set_transition_enabled(enabled);
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.viewport().map_or(0, |view| view.width() as u32)
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.viewport().map_or(0, |view| view.height() as u32)
    }

    /// RGBA8 pixels, top row first, `width * height * 4` bytes.
    #[must_use]
    pub fn pixels(&self) -> Vec<u8> {
        render_rgba(&self.clock).pixels
    }

    #[must_use]
    pub fn grain_count(&self) -> usize {
        self.clock.len()
    }
}

impl Hourglass {
    fn step(&mut self, direction: Vec2) {
        let scheduled = self.schedule.advance();
        if scheduled {
            self.clock.set_transition_enabled(true);
        }
        self.clock.simulate(direction);
        if scheduled {
            self.clock.set_transition_enabled(false);
        }
    }

    #[must_use]
    pub fn clock(&self) -> &SandClock {
        &self.clock
    }

    /// Area covered by [`render_rgba`].
    fn viewport(&self) -> Option<Bounds> {
        self.clock.map().bounds().map(|bounds| bounds.padded(1))
    }
}

/// Any finite tilt is accepted and wrapped into `[0, 360)`.
fn tilt_push(tilt_degrees: f32) -> Result<Vec2, GeometryError> {
    if tilt_degrees.is_finite() {
        Ok(tilt_to_direction(tilt_degrees))
    } else {
        Err(GeometryError::NonFiniteTilt(tilt_degrees))
    }
}

fn js_error(err: &GeometryError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
