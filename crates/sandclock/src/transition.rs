//! Blocked edges between neighboring cells, and the neck's duty cycle.

use ahash::AHashSet;
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Unordered pair of cells. `Edge::new(a, b) == Edge::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    a: IVec2,
    b: IVec2,
}

impl Edge {
    #[must_use]
    pub fn new(a: IVec2, b: IVec2) -> Self {
        if (a.x, a.y) <= (b.x, b.y) {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    #[must_use]
    pub fn endpoints(&self) -> (IVec2, IVec2) {
        (self.a, self.b)
    }
}

/// Edges grains may not cross even though both cells are movable.
#[derive(Debug, Clone, Default)]
pub struct ClosedTransitions {
    edges: AHashSet<Edge>,
}

impl ClosedTransitions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&mut self, a: IVec2, b: IVec2) {
        self.edges.insert(Edge::new(a, b));
    }

    pub fn open(&mut self, a: IVec2, b: IVec2) {
        self.edges.remove(&Edge::new(a, b));
    }

    #[inline]
    #[must_use]
    pub fn is_closed(&self, a: IVec2, b: IVec2) -> bool {
        !self.edges.is_empty() && self.edges.contains(&Edge::new(a, b))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Opens the neck for one tick out of every `period`, so grains trickle
/// through at a steady rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainSchedule {
    period: u32,
    countdown: u32,
}

impl DrainSchedule {
    /// A period of 0 is treated as 1 (always open).
    #[must_use]
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            countdown: 0,
        }
    }

    /// Spread `grains` openings evenly over `total_ticks`.
    #[must_use]
    pub fn for_duration(total_ticks: u32, grains: usize) -> Self {
        let grains = u32::try_from(grains.max(1)).unwrap_or(u32::MAX);
        Self::new(total_ticks / grains)
    }

    #[must_use]
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Whether the neck is open for the coming tick. The first call opens.
    pub fn advance(&mut self) -> bool {
        if self.countdown == 0 {
            self.countdown = self.period - 1;
            true
        } else {
            self.countdown -= 1;
            false
        }
    }
}
