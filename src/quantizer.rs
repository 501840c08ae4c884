//! Splits a host block into equal chunks that fit a renderer's fixed capacity.

use std::num::NonZeroUsize;

/// How a block of `block_size * block_count` samples is cut into chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChunkPlan {
    /// Samples per chunk. Never exceeds the quantizer's capacity.
    pub block_size: usize,
    /// Number of chunks.
    pub block_count: usize,
}

impl ChunkPlan {
    pub fn total(&self) -> usize {
        self.block_size * self.block_count
    }

    /// Chunk boundaries as `start..end` ranges into the host block.
    pub fn chunks(&self) -> impl Iterator<Item = std::ops::Range<usize>> {
        let size = self.block_size;
        (0..self.block_count).map(move |i| i * size..(i + 1) * size)
    }
}

/// Finds the largest divisor of the requested sample count that is no larger
/// than the capacity, caching the result for the last count seen.
#[derive(Debug, Clone)]
pub struct BlockQuantizer {
    capacity: NonZeroUsize,
    last_requested: Option<usize>,
    plan: ChunkPlan,
    searches: usize,
}

impl BlockQuantizer {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            last_requested: None,
            plan: ChunkPlan::default(),
            searches: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Number of times a plan was actually computed rather than served from
    /// the cache.
    pub fn searches(&self) -> usize {
        self.searches
    }

    /// Forget the cached plan; the next call to [`plan`](Self::plan) recomputes.
    pub fn invalidate(&mut self) {
        self.last_requested = None;
    }

    /// The chunk plan for `requested` samples.
    ///
    /// A prime count above the capacity degrades to single-sample chunks.
    pub fn plan(&mut self, requested: usize) -> ChunkPlan {
        if self.last_requested != Some(requested) {
            self.plan = Self::search(requested, self.capacity.get());
            self.last_requested = Some(requested);
            self.searches += 1;
        }
        self.plan
    }

    fn search(requested: usize, capacity: usize) -> ChunkPlan {
        if requested == 0 {
            return ChunkPlan::default();
        }
        if requested <= capacity {
            return ChunkPlan {
                block_size: requested,
                block_count: 1,
            };
        }
        // terminates at 1 at the latest, at most `capacity` iterations
        let mut block_size = capacity;
        while requested % block_size != 0 {
            block_size -= 1;
        }
        ChunkPlan {
            block_size,
            block_count: requested / block_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantizer(capacity: usize) -> BlockQuantizer {
        BlockQuantizer::new(NonZeroUsize::new(capacity).unwrap())
    }

    fn plan(size: usize, count: usize) -> ChunkPlan {
        ChunkPlan {
            block_size: size,
            block_count: count,
        }
    }

    #[test]
    fn splits_into_largest_divisor() {
        assert_eq!(quantizer(24).plan(64), plan(16, 4));
        assert_eq!(quantizer(128).plan(512), plan(128, 4));
        assert_eq!(quantizer(24).plan(100), plan(20, 5));
    }

    #[test]
    fn small_blocks_are_not_split() {
        assert_eq!(quantizer(24).plan(23), plan(23, 1));
        assert_eq!(quantizer(24).plan(24), plan(24, 1));
        assert_eq!(quantizer(24).plan(1), plan(1, 1));
    }

    #[test]
    fn prime_counts_fall_back_to_single_samples() {
        assert_eq!(quantizer(24).plan(37), plan(1, 37));
        assert_eq!(quantizer(128).plan(131), plan(1, 131));
    }

    #[test]
    fn empty_block_renders_nothing() {
        let p = quantizer(24).plan(0);
        assert_eq!(p, plan(0, 0));
        assert_eq!(p.chunks().count(), 0);
    }

    #[test]
    fn plan_invariants_hold() {
        for capacity in 1..=64 {
            let mut q = quantizer(capacity);
            for n in 1..=600 {
                let p = q.plan(n);
                assert_eq!(p.total(), n, "capacity {capacity} n {n}");
                assert!(p.block_size >= 1 && p.block_size <= capacity);
            }
        }
    }

    #[test]
    fn repeated_counts_hit_the_cache() {
        let mut q = quantizer(24);
        let first = q.plan(64);
        let second = q.plan(64);
        assert_eq!(first, second);
        assert_eq!(q.searches(), 1);

        q.plan(48);
        assert_eq!(q.searches(), 2);
        assert_eq!(q.plan(64), first);
        assert_eq!(q.searches(), 3);

        q.invalidate();
        q.plan(64);
        assert_eq!(q.searches(), 4);
    }

    #[test]
    fn chunk_ranges_cover_the_block() {
        let ranges: Vec<_> = quantizer(24).plan(64).chunks().collect();
        assert_eq!(ranges, vec![0..16, 16..32, 32..48, 48..64]);
    }
}
