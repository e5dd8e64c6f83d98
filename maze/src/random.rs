use rand::Rng;

/// Uniform integer source shared by grid construction, generation and
/// backtracking. Anything implementing `rand::Rng` qualifies, so tests can
/// hand in a seeded `StdRng` and get reproducible mazes.
pub trait RandomSource {
    /// Returns a value in `[0, upper)`. `upper` must be non-zero.
    fn next_below(&mut self, upper: usize) -> usize;

    /// Fisher-Yates: every permutation is equally likely.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_below(i + 1);
            items.swap(i, j);
        }
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }

        let i = self.next_below(items.len());
        items.get(i)
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_below(&mut self, upper: usize) -> usize {
        debug_assert!(upper > 0, "upper bound must be positive");
        self.random_range(0..upper)
    }
}
