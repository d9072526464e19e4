//! Grain record and its fall state.

use std::fmt;

use glam::IVec2;

/// Display color of a grain. The simulation never reads it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const GRAY: Rgb = Rgb::new(128, 128, 128);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert hue, saturation and value, each in `[0, 1]`.
    #[must_use]
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let sector = hue.rem_euclid(1.0) * 6.0;
        let index = sector.floor();
        let fraction = sector - index;

        let p = value * (1.0 - saturation);
        let q = value * (1.0 - saturation * fraction);
        let t = value * (1.0 - saturation * (1.0 - fraction));

        let (r, g, b) = match index as u8 {
            0 => (value, t, p),
            1 => (q, value, p),
            2 => (p, value, t),
            3 => (p, q, value),
            4 => (t, p, value),
            _ => (value, p, q),
        };
        Self::new(channel(r), channel(g), channel(b))
    }

    #[must_use]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Evenly spaced hues for `count` grains, fully saturated at 90% value.
pub fn hue_palette(count: usize) -> impl Iterator<Item = Rgb> {
    let step = 1.0 / count.max(1) as f32;
    (0..count).map(move |i| Rgb::from_hsv(i as f32 * step, 1.0, 0.9))
}

/// Whether a grain is resting or following a straight fall line.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum FallState {
    #[default]
    Resting,
    Falling {
        /// Cell the fall started from.
        origin: IVec2,
        /// Points of the fall line consumed so far, at least 1.
        steps: u32,
        /// Far end of the fall line, recomputed each tick to spot a change
        /// of push direction.
        heading: IVec2,
    },
}

/// A single grain.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub position: IVec2,
    pub color: Rgb,
    pub state: FallState,
}

impl Cell {
    #[must_use]
    pub fn new(position: IVec2, color: Rgb) -> Self {
        Self {
            position,
            color,
            state: FallState::Resting,
        }
    }

    #[must_use]
    pub fn is_falling(&self) -> bool {
        matches!(self.state, FallState::Falling { .. })
    }

    pub fn rest(&mut self) {
        self.state = FallState::Resting;
    }

    /// Record one more step along the fall line. A resting grain starts a
    /// new fall from `from` towards `heading`.
    pub fn fall_step(&mut self, from: IVec2, heading: IVec2) {
        self.state = match self.state {
            FallState::Resting => FallState::Falling {
                origin: from,
                steps: 1,
                heading,
            },
            FallState::Falling {
                origin,
                steps,
                heading,
            } => FallState::Falling {
                origin,
                steps: steps + 1,
                heading,
            },
        };
    }
}
