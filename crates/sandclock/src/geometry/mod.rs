//! Pure geometry shared by the tick loop: angle conversion, integer line
//! rasterization and the neighbor preference order for blocked grains.

mod angle;
mod line;
mod preference;

pub use angle::{
    angle_to_direction, checked_direction, direction_to_degrees, normalize_degrees,
    tilt_to_direction, unit_direction,
};
pub use line::{first_step, heading, Line, LinePoints};
pub use preference::{move_preferences, MovePreferences, PreferenceThresholds, COMPASS};
