//! Terrain: which cells grains may occupy.

use std::fmt;

use ahash::AHashMap;
use glam::IVec2;

/// Smallest rectangle holding every declared cell, both corners inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min: IVec2,
    pub max: IVec2,
}

impl Bounds {
    #[must_use]
    pub fn point(p: IVec2) -> Self {
        Self { min: p, max: p }
    }

    pub fn include(&mut self, p: IVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    #[must_use]
    pub fn contains(&self, p: IVec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Grown by `margin` cells on every side.
    #[must_use]
    pub fn padded(&self, margin: i32) -> Self {
        Self {
            min: self.min - IVec2::splat(margin),
            max: self.max + IVec2::splat(margin),
        }
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }

    /// Cells top row first (highest y), left to right.
    pub fn rows_top_down(&self) -> impl Iterator<Item = impl Iterator<Item = IVec2>> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y)
            .rev()
            .map(move |y| (min.x..=max.x).map(move |x| IVec2::new(x, y)))
    }
}

/// Movable/wall flag per declared cell. Undeclared cells are walls.
#[derive(Debug, Clone, Default)]
pub struct OccupancyMap {
    terrain: AHashMap<IVec2, bool>,
    bounds: Option<Bounds>,
}

impl OccupancyMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_terrain(&mut self, coord: IVec2, movable: bool) {
        match &mut self.bounds {
            Some(bounds) => bounds.include(coord),
            None => self.bounds = Some(Bounds::point(coord)),
        }
        self.terrain.insert(coord, movable);
    }

    /// Declare every cell of the half-open rectangle `[min, max)`.
    pub fn fill_rect(&mut self, min: IVec2, max: IVec2, movable: bool) {
        for y in min.y..max.y {
            for x in min.x..max.x {
                self.add_terrain(IVec2::new(x, y), movable);
            }
        }
    }

    #[must_use]
    pub fn is_movable(&self, coord: IVec2) -> bool {
        self.terrain.get(&coord).copied().unwrap_or(false)
    }

    /// `None` until the first cell is declared.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Every declared cell, movable or not, in no particular order.
    pub fn coords(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.terrain.keys().copied()
    }

    #[must_use]
    pub fn movable_count(&self) -> usize {
        self.terrain.values().filter(|&&movable| movable).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terrain.is_empty()
    }
}

/// Debug view: one row per line, top row first, with a one-cell wall margin.
/// `' '` is movable, `'#'` is wall.
impl fmt::Display for OccupancyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(bounds) = self.bounds else {
            return Ok(());
        };
        for row in bounds.padded(1).rows_top_down() {
            for coord in row {
                f.write_str(if self.is_movable(coord) { " " } else { "#" })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn undeclared_cells_are_walls() {
        let mut map = OccupancyMap::new();
        assert!(!map.is_movable(IVec2::ZERO));
        map.add_terrain(IVec2::new(1, 1), true);
        assert!(map.is_movable(IVec2::new(1, 1)));
        assert!(!map.is_movable(IVec2::new(1, 2)));
    }

    #[test]
    fn add_terrain_overwrites() {
        let mut map = OccupancyMap::new();
        map.add_terrain(IVec2::new(4, 4), true);
        map.add_terrain(IVec2::new(4, 4), true);
        assert_eq!(map.movable_count(), 1);
        map.add_terrain(IVec2::new(4, 4), false);
        assert!(!map.is_movable(IVec2::new(4, 4)));
        assert_eq!(map.coords().count(), 1);
    }

    #[test]
    fn bounds_grow_with_every_declared_cell() {
        let mut map = OccupancyMap::new();
        assert_eq!(map.bounds(), None);

        map.add_terrain(IVec2::new(2, 3), true);
        assert_eq!(map.bounds(), Some(Bounds::point(IVec2::new(2, 3))));

        map.add_terrain(IVec2::new(-1, 5), false);
        map.add_terrain(IVec2::new(4, -2), true);
        let bounds = map.bounds().unwrap();
        assert_eq!(bounds.min, IVec2::new(-1, -2));
        assert_eq!(bounds.max, IVec2::new(4, 5));
        assert_eq!(bounds.width(), 6);
        assert_eq!(bounds.height(), 8);
    }

    #[test]
    fn display_draws_walls_around_movable_cells() {
        let mut map = OccupancyMap::new();
        map.fill_rect(IVec2::new(0, 0), IVec2::new(3, 2), true);
        map.add_terrain(IVec2::new(1, 1), false);
        assert_eq!(map.to_string(), "#####\n# # #\n#   #\n#####\n");
    }

    #[test]
    fn empty_map_displays_nothing() {
        assert_eq!(OccupancyMap::new().to_string(), "");
    }

    #[test]
    fn rows_run_top_down() {
        let bounds = Bounds { min: IVec2::new(0, 0), max: IVec2::new(1, 1) };
        let rows: Vec<Vec<IVec2>> = bounds.rows_top_down().map(Iterator::collect).collect();
        assert_eq!(
            rows,
            vec![
                vec![IVec2::new(0, 1), IVec2::new(1, 1)],
                vec![IVec2::new(0, 0), IVec2::new(1, 0)],
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_bounds_contain_every_declared_cell(
            cells in proptest::collection::vec((-30i32..30, -30i32..30, any::<bool>()), 1..40),
        ) {
            let mut map = OccupancyMap::new();
            for &(x, y, movable) in &cells {
                map.add_terrain(IVec2::new(x, y), movable);
            }
            let bounds = map.bounds().unwrap();
            for &(x, y, _) in &cells {
                prop_assert!(bounds.contains(IVec2::new(x, y)));
            }
            let lines = map.to_string().lines().count() as i32;
            prop_assert_eq!(lines, bounds.height() + 2);
        }
    }
}
