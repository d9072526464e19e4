//! One grain's view of the board while its move is resolved.

use ahash::AHashMap;
use glam::IVec2;

use crate::bake::OccupancyBake;
use crate::cell::Cell;
use crate::geometry::MovePreferences;
use crate::map::OccupancyMap;
use crate::transition::ClosedTransitions;

/// What happened to a grain this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// Moved along the push direction, starting or continuing a fall.
    Fell,
    /// Moved sideways to a preferred neighbor.
    Redirected,
    /// Waited: its target was vacated earlier this tick, so the bake is stale.
    Deferred,
    /// Every candidate was walled off, closed or taken.
    Blocked,
}

/// Terrain and edge checks go through the map and closed-edge set. "Is a
/// grain here" has two answers: [`StepApi::occupied`] reads the live
/// position map, [`StepApi::baked`] the snapshot taken at the start of the
/// tick.
#[derive(Debug)]
pub struct StepApi<'a> {
    map: &'a OccupancyMap,
    bake: &'a OccupancyBake,
    closed: &'a ClosedTransitions,
    positions: &'a mut AHashMap<IVec2, usize>,
    cell: &'a mut Cell,
    slot: usize,
}

impl<'a> StepApi<'a> {
    pub fn new(
        map: &'a OccupancyMap,
        bake: &'a OccupancyBake,
        closed: &'a ClosedTransitions,
        positions: &'a mut AHashMap<IVec2, usize>,
        cell: &'a mut Cell,
        slot: usize,
    ) -> Self {
        Self {
            map,
            bake,
            closed,
            positions,
            cell,
            slot,
        }
    }

    #[must_use]
    pub fn position(&self) -> IVec2 {
        self.cell.position
    }

    #[must_use]
    pub fn cell(&self) -> &Cell {
        self.cell
    }

    pub fn cell_mut(&mut self) -> &mut Cell {
        self.cell
    }

    /// Movable terrain reachable from the grain's cell without crossing a
    /// closed edge.
    #[must_use]
    pub fn passable(&self, to: IVec2) -> bool {
        self.map.is_movable(to) && !self.closed.is_closed(self.cell.position, to)
    }

    #[must_use]
    pub fn occupied(&self, to: IVec2) -> bool {
        self.positions.contains_key(&to)
    }

    #[must_use]
    pub fn baked(&self, to: IVec2) -> bool {
        self.bake.has_particle_at(to)
    }

    /// Move the grain to `to`, keeping the position map in step.
    pub fn relocate(&mut self, to: IVec2) {
        self.positions.remove(&self.cell.position);
        self.positions.insert(to, self.slot);
        self.cell.position = to;
    }

    /// Try the preferred neighbors in order, skipping `except`. The first
    /// passable, free neighbor wins unless the bake still shows a grain
    /// there, in which case the grain waits for the next tick.
    pub fn redirect(&mut self, preferences: &MovePreferences, except: IVec2) -> StepOutcome {
        let from = self.cell.position;
        for offset in preferences.iter() {
            let target = from + offset;
            if target == except || !self.passable(target) || self.occupied(target) {
                continue;
            }
            if self.baked(target) {
                return StepOutcome::Deferred;
            }
            self.relocate(target);
            return StepOutcome::Redirected;
        }
        StepOutcome::Blocked
    }
}
