use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Picks one substitution candidate out of the survivors of filtering.
///
/// `choose` is only called with a non-empty slice and must return an index
/// into it. Any `FnMut(&[String]) -> usize` closure is a chooser too.
pub trait CandidateChooser {
    fn choose(&mut self, candidates: &[String]) -> usize;
}

impl<F> CandidateChooser for F
where
    F: FnMut(&[String]) -> usize,
{
    fn choose(&mut self, candidates: &[String]) -> usize {
        self(candidates)
    }
}

/// Uniform random choice; the production default.
#[derive(Debug, Clone)]
pub struct RandomChooser<R: Rng = ThreadRng> {
    rng: R,
}

impl RandomChooser<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::thread_rng() }
    }
}

impl Default for RandomChooser<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomChooser<StdRng> {
    /// Reproducible random choices for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> CandidateChooser for RandomChooser<R> {
    fn choose(&mut self, candidates: &[String]) -> usize {
        self.rng.gen_range(0..candidates.len())
    }
}

/// Always takes the first surviving candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl CandidateChooser for FirstCandidate {
    fn choose(&mut self, _candidates: &[String]) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<String> {
        ["margarine", "applesauce", "olive oil"]
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn test_first_candidate() {
        assert_eq!(FirstCandidate.choose(&candidates()), 0);
    }

    #[test]
    fn test_closure_chooser() {
        let mut last = |c: &[String]| c.len() - 1;
        assert_eq!(last.choose(&candidates()), 2);
    }

    #[test]
    fn test_random_chooser_stays_in_bounds() {
        let mut chooser = RandomChooser::new();
        let list = candidates();
        for _ in 0..100 {
            assert!(chooser.choose(&list) < list.len());
        }
    }

    #[test]
    fn test_seeded_chooser_is_reproducible() {
        let list = candidates();
        let mut a = RandomChooser::seeded(42);
        let mut b = RandomChooser::seeded(42);
        let picks_a: Vec<usize> = (0..20).map(|_| a.choose(&list)).collect();
        let picks_b: Vec<usize> = (0..20).map(|_| b.choose(&list)).collect();
        assert_eq!(picks_a, picks_b);
    }
}
