//! Which neighbors a blocked grain tries, in order.
//!
//! The push angle falls in one of four quadrants. Each quadrant is bounded
//! by two axis directions with a diagonal between them; the grain tries the
//! nearer two of those three first, then the remaining one. Angles that sit
//! well off the diagonal also try a "lean" neighbor one step further round
//! on the side the angle leans towards.

use glam::IVec2;

/// The eight neighbor offsets, counter-clockwise from +x.
pub const COMPASS: [IVec2; 8] = [
    IVec2::new(1, 0),   // E
    IVec2::new(1, 1),   // NE
    IVec2::new(0, 1),   // N
    IVec2::new(-1, 1),  // NW
    IVec2::new(-1, 0),  // W
    IVec2::new(-1, -1), // SW
    IVec2::new(0, -1),  // S
    IVec2::new(1, -1),  // SE
];

fn compass(index: i32) -> IVec2 {
    COMPASS[index.rem_euclid(8) as usize]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreferenceThresholds {
    /// Within this many degrees of an axis the far side is not tried.
    pub axis_snap: f32,
    /// Beyond this many degrees from the diagonal a lean neighbor is added.
    pub lean: f32,
}

impl Default for PreferenceThresholds {
    fn default() -> Self {
        Self {
            axis_snap: 1.0,
            lean: 5.0,
        }
    }
}

/// Up to four neighbor offsets, most preferred first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePreferences {
    offsets: [IVec2; 4],
    len: usize,
}

impl MovePreferences {
    fn push(&mut self, offset: IVec2) {
        self.offsets[self.len] = offset;
        self.len += 1;
    }

    #[must_use]
    pub fn as_slice(&self) -> &[IVec2] {
        &self.offsets[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.as_slice().iter().copied()
    }
}

impl<'a> IntoIterator for &'a MovePreferences {
    type Item = &'a IVec2;
    type IntoIter = std::slice::Iter<'a, IVec2>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// Ordered neighbor offsets for a push at `angle` degrees.
///
/// # Panics
///
/// Panics if `angle` is outside `[0, 360)`.
#[must_use]
pub fn move_preferences(angle: f32, thresholds: PreferenceThresholds) -> MovePreferences {
    assert!(
        (0.0..360.0).contains(&angle),
        "angle {angle} is outside [0, 360)"
    );

    // Index of the quadrant's diagonal; its axes sit at `diagonal -/+ 1`.
    let diagonal = (angle / 90.0) as i32 * 2 + 1;
    let within = angle % 90.0;

    let low = compass(diagonal - 1);
    let mid = compass(diagonal);
    let high = compass(diagonal + 1);

    let mut prefs = MovePreferences {
        offsets: [IVec2::ZERO; 4],
        len: 0,
    };

    if within < thresholds.axis_snap {
        prefs.push(low);
        prefs.push(mid);
    } else if within >= 90.0 - thresholds.axis_snap {
        prefs.push(high);
        prefs.push(mid);
    } else if within > 45.0 {
        let (first, second) = if within - 45.0 < 90.0 - within {
            (mid, high)
        } else {
            (high, mid)
        };
        prefs.push(first);
        prefs.push(second);
        prefs.push(low);
    } else {
        let (first, second) = if within < 45.0 - within {
            (low, mid)
        } else {
            (mid, low)
        };
        prefs.push(first);
        prefs.push(second);
        prefs.push(high);
    }

    if within > 45.0 + thresholds.lean {
        prefs.push(compass(diagonal + 2));
    } else if within < 45.0 - thresholds.lean {
        prefs.push(compass(diagonal - 2));
    }

    prefs
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const E: IVec2 = IVec2::new(1, 0);
    const NE: IVec2 = IVec2::new(1, 1);
    const N: IVec2 = IVec2::new(0, 1);
    const NW: IVec2 = IVec2::new(-1, 1);
    const W: IVec2 = IVec2::new(-1, 0);
    const SW: IVec2 = IVec2::new(-1, -1);
    const S: IVec2 = IVec2::new(0, -1);
    const SE: IVec2 = IVec2::new(1, -1);

    fn prefs(angle: f32) -> Vec<IVec2> {
        move_preferences(angle, PreferenceThresholds::default())
            .iter()
            .collect()
    }

    #[test]
    fn snapped_to_axis() {
        assert_eq!(prefs(0.0), vec![E, NE, SE]);
        assert_eq!(prefs(89.5), vec![N, NE, NW]);
        assert_eq!(prefs(180.5), vec![W, SW, NW]);
    }

    #[test]
    fn exact_diagonal_has_no_lean() {
        assert_eq!(prefs(45.0), vec![NE, E, N]);
        assert_eq!(prefs(225.0), vec![SW, W, S]);
    }

    #[test]
    fn leaning_angles_add_far_neighbor() {
        assert_eq!(prefs(10.0), vec![E, NE, N, SE]);
        assert_eq!(prefs(30.0), vec![NE, E, N, SE]);
        assert_eq!(prefs(60.0), vec![NE, N, E, NW]);
        assert_eq!(prefs(300.0), vec![SE, S, E, SW]);
    }

    #[test]
    fn near_diagonal_skips_lean() {
        assert_eq!(prefs(42.0), vec![NE, E, N]);
        assert_eq!(prefs(48.0), vec![NE, N, E]);
    }

    #[test]
    fn tie_break_measured_within_quadrant() {
        // 200 degrees is 20 degrees past W, so W beats SW.
        assert_eq!(prefs(200.0), vec![W, SW, S, NW]);
        assert_eq!(prefs(110.0), vec![N, NW, W, NE]);
    }

    #[test]
    fn thresholds_change_the_list() {
        let wide = PreferenceThresholds { axis_snap: 15.0, lean: 45.0 };
        let list: Vec<IVec2> = move_preferences(10.0, wide).iter().collect();
        assert_eq!(list, vec![E, NE]);
    }

    #[test]
    #[should_panic(expected = "outside [0, 360)")]
    fn full_turn_is_out_of_range() {
        let _ = move_preferences(360.0, PreferenceThresholds::default());
    }

    #[test]
    #[should_panic(expected = "outside [0, 360)")]
    fn nan_is_out_of_range() {
        let _ = move_preferences(f32::NAN, PreferenceThresholds::default());
    }

    proptest! {
        #[test]
        fn prop_preferences_are_distinct_neighbors(angle in 0.0f32..360.0) {
            let list = prefs(angle);
            prop_assert!((2..=4).contains(&list.len()));
            for (i, offset) in list.iter().enumerate() {
                prop_assert_eq!(offset.abs().max_element(), 1);
                prop_assert!(!list[i + 1..].contains(offset));
            }
        }

        #[test]
        fn prop_preferences_are_deterministic(angle in 0.0f32..360.0) {
            prop_assert_eq!(prefs(angle), prefs(angle));
        }

        #[test]
        fn prop_first_choice_is_nearest_compass_point(angle in 0.0f32..360.0) {
            let first = prefs(angle)[0].as_vec2();
            let first_angle = first.y.atan2(first.x).to_degrees().rem_euclid(360.0);
            let diff = (first_angle - angle).abs();
            prop_assert!(diff.min(360.0 - diff) <= 22.5 + 1e-3);
        }
    }
}
