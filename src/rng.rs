use rand::Rng;

/// Source of uniform random indices for term selection.
///
/// Selection takes this as an injected collaborator so the pick can be
/// driven by a seeded generator in tests. `len` is always at least 1.
pub trait RandomSource {
    /// Returns an index in `0..len`, uniformly distributed.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Any `rand` generator is a valid source, including `thread_rng()` for
/// normal use and a seeded `SmallRng` for deterministic tests.
impl<R: Rng> RandomSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}
