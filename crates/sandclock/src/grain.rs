//! Per-grain update: continue a fall, start one, or slide sideways.

use glam::Vec2;

use crate::api::{StepApi, StepOutcome};
use crate::cell::FallState;
use crate::geometry::{first_step, heading, Line, MovePreferences};

/// Values shared by every grain in one tick.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    pub direction: Vec2,
    pub preferences: MovePreferences,
    pub fall_reach: f32,
}

pub fn update_grain(api: &mut StepApi, tick: &Tick) -> StepOutcome {
    let from = api.position();

    // A fall ends when the push turned far enough to move its heading, or
    // when the grain has used up its fall line.
    if let FallState::Falling { origin, steps, heading: stored } = api.cell().state {
        let turned = heading(origin, tick.direction, tick.fall_reach) != stored;
        let exhausted = steps as usize + 1 >= Line::new(origin, stored).point_count();
        if turned || exhausted {
            api.cell_mut().rest();
        }
    }

    let target = match api.cell().state {
        FallState::Falling { origin, steps, heading } => {
            Line::new(origin, heading).nth_point(steps as usize + 1)
        }
        FallState::Resting => first_step(from, tick.direction, tick.fall_reach),
    };

    if !api.passable(target) {
        api.cell_mut().rest();
        return api.redirect(&tick.preferences, target);
    }

    if api.occupied(target) {
        let outcome = api.redirect(&tick.preferences, target);
        if outcome != StepOutcome::Deferred {
            api.cell_mut().rest();
        }
        return outcome;
    }

    if api.baked(target) {
        return StepOutcome::Deferred;
    }

    api.relocate(target);
    let fall_heading = heading(from, tick.direction, tick.fall_reach);
    api.cell_mut().fall_step(from, fall_heading);
    StepOutcome::Fell
}
