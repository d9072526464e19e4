//! Integer line rasterization.
//!
//! A fall trajectory is a [`Line`] from the cell where the fall began to
//! its [`heading`]. Each tick the grain takes the next point of that same
//! line instead of re-deriving a line from its current cell, so the path
//! stays straight no matter how many steps it has taken.

use glam::{IVec2, Vec2};

use super::angle::unit_direction;

/// Far point from `start` along `direction`, `reach` cells out.
///
/// The same point serves as the end of a fall line and as the marker that
/// the push direction changed mid-fall.
///
/// # Panics
///
/// Panics if `direction` is zero or not finite.
#[must_use]
pub fn heading(start: IVec2, direction: Vec2, reach: f32) -> IVec2 {
    let far = start.as_vec2() + Vec2::splat(0.5) + unit_direction(direction) * reach;
    far.floor().as_ivec2()
}

/// The neighbor a resting grain at `position` would step into.
///
/// # Panics
///
/// Panics if `direction` is degenerate or `reach` is too short to leave
/// the starting cell.
#[must_use]
pub fn first_step(position: IVec2, direction: Vec2, reach: f32) -> IVec2 {
    Line::new(position, heading(position, direction, reach)).nth_point(1)
}

/// Segment between two cells, rasterized with Bresenham's algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    start: IVec2,
    end: IVec2,
}

impl Line {
    #[must_use]
    pub fn new(start: IVec2, end: IVec2) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn start(&self) -> IVec2 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> IVec2 {
        self.end
    }

    /// Number of cells on the line, both endpoints included.
    #[must_use]
    pub fn point_count(&self) -> usize {
        let delta = (self.end - self.start).abs();
        delta.x.max(delta.y) as usize + 1
    }

    #[must_use]
    pub fn points(&self) -> LinePoints {
        LinePoints::new(self.start, self.end)
    }

    /// The `n`-th cell of the line, `0` being `start`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is past the end of the line.
    #[must_use]
    pub fn nth_point(&self, n: usize) -> IVec2 {
        assert!(
            n < self.point_count(),
            "point {n} is beyond the {} cells from {} to {}",
            self.point_count(),
            self.start,
            self.end,
        );
        self.points().nth(n).unwrap_or(self.end)
    }
}

/// Iterator over the cells of a [`Line`].
#[derive(Debug, Clone)]
pub struct LinePoints {
    current: IVec2,
    step: IVec2,
    steep: bool,
    error: i32,
    straight: i32,
    diagonal: i32,
    remaining: usize,
}

impl LinePoints {
    fn new(start: IVec2, end: IVec2) -> Self {
        let step = IVec2::new(
            if start.x < end.x { 1 } else { -1 },
            if start.y < end.y { 1 } else { -1 },
        );
        let delta = (end - start).abs();
        let steep = delta.y > delta.x;
        let (major, minor) = if steep {
            (delta.y, delta.x)
        } else {
            (delta.x, delta.y)
        };

        Self {
            current: start,
            step,
            steep,
            error: 2 * minor - major,
            straight: 2 * minor,
            diagonal: 2 * (minor - major),
            remaining: major as usize + 1,
        }
    }

    fn advance(&mut self) {
        let bend = self.error > 0;
        self.error += if bend { self.diagonal } else { self.straight };
        if self.steep {
            self.current.y += self.step.y;
            if bend {
                self.current.x += self.step.x;
            }
        } else {
            self.current.x += self.step.x;
            if bend {
                self.current.y += self.step.y;
            }
        }
    }
}

impl Iterator for LinePoints {
    type Item = IVec2;

    fn next(&mut self) -> Option<IVec2> {
        if self.remaining == 0 {
            return None;
        }
        let point = self.current;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for LinePoints {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn collect(start: (i32, i32), end: (i32, i32)) -> Vec<(i32, i32)> {
        Line::new(IVec2::new(start.0, start.1), IVec2::new(end.0, end.1))
            .points()
            .map(|p| (p.x, p.y))
            .collect()
    }

    #[test]
    fn single_point_line() {
        assert_eq!(collect((3, -2), (3, -2)), vec![(3, -2)]);
    }

    #[test]
    fn axis_and_diagonal_lines() {
        assert_eq!(collect((0, 0), (3, 0)), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(collect((0, 0), (0, -2)), vec![(0, 0), (0, -1), (0, -2)]);
        assert_eq!(collect((1, 1), (-1, 3)), vec![(1, 1), (0, 2), (-1, 3)]);
    }

    #[test]
    fn shallow_line_bends_late() {
        assert_eq!(
            collect((0, 0), (4, 2)),
            vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2)]
        );
    }

    #[test]
    fn steep_line_steps_on_y() {
        assert_eq!(
            collect((0, 0), (-2, -4)),
            vec![(0, 0), (0, -1), (-1, -2), (-1, -3), (-2, -4)]
        );
    }

    #[test]
    fn heading_is_far_along_direction() {
        assert_eq!(heading(IVec2::ZERO, Vec2::X, 100.0), IVec2::new(100, 0));
        assert_eq!(heading(IVec2::new(0, 9), Vec2::NEG_Y, 100.0), IVec2::new(0, -91));
        assert_eq!(heading(IVec2::ZERO, Vec2::new(1.0, -1.0), 100.0), IVec2::new(71, -71));
        assert_eq!(heading(IVec2::ZERO, Vec2::new(3.0, 0.0), 10.0), IVec2::new(10, 0));
    }

    #[test]
    fn first_step_is_a_neighbor() {
        let from = IVec2::new(5, 5);
        assert_eq!(first_step(from, Vec2::NEG_Y, 100.0), IVec2::new(5, 4));
        assert_eq!(first_step(from, Vec2::new(1.0, -1.0), 100.0), IVec2::new(6, 4));
        assert_eq!(first_step(from, Vec2::new(-1.0, 0.1), 100.0), IVec2::new(4, 5));
    }

    #[test]
    #[should_panic(expected = "beyond")]
    fn nth_point_past_end_panics() {
        let _ = Line::new(IVec2::ZERO, IVec2::new(2, 1)).nth_point(3);
    }

    proptest! {
        #[test]
        fn prop_rasterization_is_deterministic(
            sx in -50i32..50, sy in -50i32..50,
            ex in -50i32..50, ey in -50i32..50,
        ) {
            let line = Line::new(IVec2::new(sx, sy), IVec2::new(ex, ey));
            let a: Vec<IVec2> = line.points().collect();
            let b: Vec<IVec2> = line.points().collect();
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.len(), line.point_count());
            prop_assert_eq!(a[0], line.start());
            prop_assert_eq!(*a.last().unwrap(), line.end());
        }

        #[test]
        fn prop_consecutive_points_are_neighbors(
            sx in -50i32..50, sy in -50i32..50,
            ex in -50i32..50, ey in -50i32..50,
        ) {
            let points: Vec<IVec2> = Line::new(IVec2::new(sx, sy), IVec2::new(ex, ey)).points().collect();
            for pair in points.windows(2) {
                let d = (pair[1] - pair[0]).abs();
                prop_assert_eq!(d.max_element(), 1);
            }
        }

        #[test]
        fn prop_nth_point_matches_sequence(
            sx in -20i32..20, sy in -20i32..20,
            degrees in 0.0f32..360.0,
            n in 0usize..100,
        ) {
            let start = IVec2::new(sx, sy);
            let direction = crate::geometry::angle_to_direction(degrees);
            let line = Line::new(start, heading(start, direction, 100.0));
            prop_assume!(n < line.point_count());
            let points: Vec<IVec2> = line.points().collect();
            prop_assert_eq!(points[n], line.nth_point(n));
        }

        #[test]
        fn prop_scaled_lines_share_a_prefix(
            dx in -10i32..10, dy in -10i32..10,
            k in 2i32..6,
        ) {
            prop_assume!(dx != 0 || dy != 0);
            let short: Vec<IVec2> = Line::new(IVec2::ZERO, IVec2::new(dx, dy)).points().collect();
            let long: Vec<IVec2> = Line::new(IVec2::ZERO, IVec2::new(dx * k, dy * k)).points().collect();
            prop_assert_eq!(&long[..short.len()], &short[..]);
        }
    }
}
