//! Injectable source of randomness.
//!
//! Sessions never reach for a global generator. Anything implementing
//! [`rand::Rng`] works, so a seeded `StdRng` gives reproducible games.

use rand::Rng;

pub trait RandomSource {
    /// Uniformly chosen index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;

    /// `amount` distinct indices from `0..len`, in draw order.
    fn pick_distinct(&mut self, len: usize, amount: usize) -> Vec<usize>;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }

    fn pick_distinct(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(self, len, amount).into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn seeded_sources_repeat() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let xs: Vec<usize> = (0..20).map(|_| a.pick(50)).collect();
        let ys: Vec<usize> = (0..20).map(|_| b.pick(50)).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|&x| x < 50));
    }

    #[test]
    fn distinct_picks_do_not_repeat() {
        let mut rng = StdRng::seed_from_u64(11);
        let picks = rng.pick_distinct(100, 2);
        assert_eq!(picks.len(), 2);
        assert_eq!(picks.iter().collect::<HashSet<_>>().len(), 2);
        assert!(picks.iter().all(|&p| p < 100));
    }
}
