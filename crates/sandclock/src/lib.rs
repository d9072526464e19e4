//! Hourglass sand simulation engine.
//!
//! Grains live on an integer grid inside a two-chamber hourglass. Each call
//! to [`SandClock::simulate`] runs one tick: every grain gets one chance to
//! fall along the push direction or slide to a neighboring cell.

pub mod api;
pub mod bake;
pub mod cell;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod grain;
pub mod map;
pub mod transition;
pub mod wasm;


use std::fmt;

use ahash::AHashMap;
use glam::{IVec2, Vec2};

use api::{StepApi, StepOutcome};
use bake::OccupancyBake;
use cell::{hue_palette, Cell};
use config::{HourglassLayout, SimConfig};
use error::ConfigError;
use geometry::{direction_to_degrees, move_preferences, unit_direction};
use grain::Tick;
use map::OccupancyMap;
use transition::ClosedTransitions;

/// Outcome counts for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub fell: usize,
    pub redirected: usize,
    pub deferred: usize,
    pub blocked: usize,
}

impl TickReport {
    fn record(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Fell => self.fell += 1,
            StepOutcome::Redirected => self.redirected += 1,
            StepOutcome::Deferred => self.deferred += 1,
            StepOutcome::Blocked => self.blocked += 1,
        }
    }

    #[must_use]
    pub fn moved(&self) -> usize {
        self.fell + self.redirected
    }

    /// No grain moved or waited, so the next tick with the same push will
    /// not move any either.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.moved() == 0 && self.deferred == 0
    }
}

/// Terrain of the standard hourglass: two `size`-square chambers touching
/// only at one diagonal.
#[must_use]
pub fn hourglass_terrain(size: i32) -> OccupancyMap {
    let mut map = OccupancyMap::new();
    map.fill_rect(IVec2::new(0, size), IVec2::new(size, 2 * size), true);
    map.fill_rect(IVec2::new(size, 0), IVec2::new(2 * size, size), true);
    map
}

/// The simulation: terrain, grains and gated edges, owned together.
#[derive(Debug)]
pub struct SandClock {
    config: SimConfig,
    map: OccupancyMap,
    bake: OccupancyBake,
    cells: Vec<Cell>,
    positions: AHashMap<IVec2, usize>,
    closed: ClosedTransitions,
    neck: Option<(IVec2, IVec2)>,
    order: Vec<usize>,
}

impl Default for SandClock {
    /// The standard hourglass with default tunables and an open neck.
    fn default() -> Self {
        let layout = HourglassLayout::default();
        let seeds: Vec<IVec2> = layout.seeds().collect();
        let mut clock = Self::assemble(
            SimConfig::default(),
            hourglass_terrain(layout.chamber_size),
            &seeds,
        );
        clock.neck = Some(layout.neck());
        clock
    }
}

impl SandClock {
    /// Build the hourglass described by `layout`. The neck starts open.
    pub fn new(config: SimConfig, layout: &HourglassLayout) -> Result<Self, ConfigError> {
        layout.validate()?;
        let mut clock = Self::with_terrain(
            config,
            hourglass_terrain(layout.chamber_size),
            layout.seeds(),
        )?;
        clock.neck = Some(layout.neck());
        Ok(clock)
    }

    /// Build a simulation over arbitrary terrain. Grains are created in
    /// `seeds` order and colored by that order.
    pub fn with_terrain<I>(config: SimConfig, map: OccupancyMap, seeds: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = IVec2>,
    {
        config.validate()?;
        let seeds: Vec<IVec2> = seeds.into_iter().collect();
        let mut seen = ahash::AHashSet::with_capacity(seeds.len());
        for &seed in &seeds {
            if !map.is_movable(seed) {
                return Err(ConfigError::SeedOutsideTerrain(seed));
            }
            if !seen.insert(seed) {
                return Err(ConfigError::DuplicateSeed(seed));
            }
        }
        Ok(Self::assemble(config, map, &seeds))
    }

    fn assemble(config: SimConfig, map: OccupancyMap, seeds: &[IVec2]) -> Self {
        let cells: Vec<Cell> = seeds
            .iter()
            .zip(hue_palette(seeds.len()))
            .map(|(&position, color)| Cell::new(position, color))
            .collect();
        let positions = cells
            .iter()
            .enumerate()
            .map(|(slot, cell)| (cell.position, slot))
            .collect();

        log::debug!(
            "sand clock: {} grains on {} movable cells, bake block {}x{}",
            cells.len(),
            map.movable_count(),
            config.block_width,
            config.block_height,
        );

        Self {
            bake: OccupancyBake::new(config.block_width, config.block_height),
            order: Vec::with_capacity(cells.len()),
            config,
            map,
            cells,
            positions,
            closed: ClosedTransitions::new(),
            neck: None,
        }
    }

    /// Advance one tick with the push `direction`.
    ///
    /// Grains furthest along the push move first, so a leader vacates its
    /// cell before the grains behind it look at that cell.
    ///
    /// # Panics
    ///
    /// Panics if `direction` is zero or not finite.
    pub fn simulate(&mut self, direction: Vec2) -> TickReport {
        let angle = direction_to_degrees(direction);
        let unit = unit_direction(direction);
        let tick = Tick {
            direction,
            preferences: move_preferences(angle, self.config.thresholds()),
            fall_reach: self.config.fall_reach,
        };

        self.bake.bake(self.cells.iter().map(|c| c.position));

        let cells = &self.cells;
        self.order.clear();
        self.order.extend(0..cells.len());
        // Stable sort: grains at the same depth keep creation order.
        self.order.sort_by(|&a, &b| {
            let depth_a = cells[a].position.as_vec2().dot(unit);
            let depth_b = cells[b].position.as_vec2().dot(unit);
            depth_b.total_cmp(&depth_a)
        });

        let mut report = TickReport::default();
        for &slot in &self.order {
            let mut api = StepApi::new(
                &self.map,
                &self.bake,
                &self.closed,
                &mut self.positions,
                &mut self.cells[slot],
                slot,
            );
            report.record(grain::update_grain(&mut api, &tick));
        }

        log::trace!("tick at {angle:.1} degrees: {report:?}");
        report
    }

    /// Open or close the neck between the chambers. Takes effect on the
    /// next [`simulate`](Self::simulate). Does nothing on custom terrain.
    pub fn set_transition_enabled(&mut self, enabled: bool) {
        let Some((a, b)) = self.neck else {
            log::warn!("sand clock has no neck to toggle");
            return;
        };
        if enabled {
            self.closed.open(a, b);
        } else {
            self.closed.close(a, b);
        }
        log::debug!("neck {a}-{b} {}", if enabled { "opened" } else { "closed" });
    }

    pub fn close_transition(&mut self, a: IVec2, b: IVec2) {
        self.closed.close(a, b);
    }

    pub fn open_transition(&mut self, a: IVec2, b: IVec2) {
        self.closed.open(a, b);
    }

    #[must_use]
    pub fn is_transition_closed(&self, a: IVec2, b: IVec2) -> bool {
        self.closed.is_closed(a, b)
    }

    #[must_use]
    pub fn neck(&self) -> Option<(IVec2, IVec2)> {
        self.neck
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn map(&self) -> &OccupancyMap {
        &self.map
    }

    /// Grains in creation order.
    #[must_use]
    pub fn particles(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn particle_at(&self, coord: IVec2) -> Option<&Cell> {
        self.positions.get(&coord).map(|&slot| &self.cells[slot])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The map's debug view with `'o'` on every grain.
impl fmt::Display for SandClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(bounds) = self.map.bounds() else {
            return Ok(());
        };
        for row in bounds.padded(1).rows_top_down() {
            for coord in row {
                let c = if self.positions.contains_key(&coord) {
                    "o"
                } else if self.map.is_movable(coord) {
                    " "
                } else {
                    "#"
                };
                f.write_str(c)?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
