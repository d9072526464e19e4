//! Bit-packed "is some grain here" index, rebuilt at the start of each tick.
//!
//! The board is cut into fixed-size blocks and each block keeps one bit per
//! cell in a `u64`. The bake is only a snapshot: grains that move during the
//! tick leave it stale, and the live position map stays authoritative.

use ahash::AHashMap;
use glam::IVec2;

#[derive(Debug, Clone)]
pub struct OccupancyBake {
    block: IVec2,
    blocks: AHashMap<IVec2, u64>,
}

impl OccupancyBake {
    /// # Panics
    ///
    /// Panics if the block is empty or holds more than 64 cells.
    #[must_use]
    pub fn new(block_width: u32, block_height: u32) -> Self {
        let cells = block_width.saturating_mul(block_height);
        assert!(
            (1..=64).contains(&cells),
            "bake block {block_width}x{block_height} must hold 1 to 64 cells"
        );
        Self {
            block: IVec2::new(block_width as i32, block_height as i32),
            blocks: AHashMap::new(),
        }
    }

    /// Forget the previous snapshot and record `positions`.
    pub fn bake<I: IntoIterator<Item = IVec2>>(&mut self, positions: I) {
        self.blocks.clear();
        for p in positions {
            let (block, bit) = self.locate(p);
            *self.blocks.entry(block).or_insert(0) |= 1u64 << bit;
        }
    }

    #[inline]
    #[must_use]
    pub fn has_particle_at(&self, p: IVec2) -> bool {
        let (block, bit) = self.locate(p);
        self.blocks
            .get(&block)
            .is_some_and(|bits| bits & (1u64 << bit) != 0)
    }

    /// Number of blocks holding at least one grain.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    fn locate(&self, p: IVec2) -> (IVec2, u32) {
        let block = IVec2::new(p.x.div_euclid(self.block.x), p.y.div_euclid(self.block.y));
        let local = IVec2::new(p.x.rem_euclid(self.block.x), p.y.rem_euclid(self.block.y));
        (block, (local.x + local.y * self.block.x) as u32)
    }
}
