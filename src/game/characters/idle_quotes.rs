// Non-repeating rotation over idle quotes
//
// Walks the residues of a prime p >= N with a fixed stride coprime to p and
// keeps only the residues below N. One full walk visits every index once, so
// no index repeats within a cycle and the next cycle replays the same order.

use rand::Rng;

/// Cursor over `0..len` that yields every index once per cycle
#[derive(Debug, Clone)]
pub struct IdleQuoteSequencer {
    len: u64,
    prime: u64,
    stride: u64,
    position: u64,
    /// Steps taken in the current cycle
    searches: u64,
}

impl IdleQuoteSequencer {
    /// Create a sequencer over `0..len` with a stride drawn from `rng`
    pub fn new<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let len = len as u64;
        let prime = next_prime(len.max(2));

        let a = rng.gen_range(1..=13u64);
        let b = rng.gen_range(1..=7u64);
        let c = rng.gen_range(1..=5u64);
        let mut stride = (a * len * len + b * len + c) % prime;
        if stride == 0 {
            stride = 1;
        }

        Self {
            len,
            prime,
            stride,
            position: 0,
            searches: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Start a new cycle without moving the cursor
    pub fn restart(&mut self) {
        self.searches = 0;
    }

    /// Draw the next index. Returns None once every index of the current
    /// cycle has been drawn; `force` starts the next cycle first.
    pub fn next_index(&mut self, force: bool) -> Option<usize> {
        if force {
            self.restart();
        }
        if self.len == 0 {
            return None;
        }

        while self.searches < self.prime {
            self.position = (self.position + self.stride) % self.prime;
            self.searches += 1;
            if self.position < self.len {
                return Some(self.position as usize);
            }
        }
        None
    }

    /// Draw the next index, rolling over to a new cycle when exhausted
    pub fn draw(&mut self) -> Option<usize> {
        self.next_index(false).or_else(|| self.next_index(true))
    }
}

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut divisor = 2;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}

/// Smallest prime >= n
fn next_prime(n: u64) -> u64 {
    let mut candidate = n;
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn sequencer(len: usize, seed: u64) -> IdleQuoteSequencer {
        IdleQuoteSequencer::new(len, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_next_prime() {
        assert_eq!(next_prime(2), 2);
        assert_eq!(next_prime(11), 11);
        assert_eq!(next_prime(12), 13);
        assert_eq!(next_prime(14), 17);
    }

    #[test]
    fn test_every_window_is_a_permutation() {
        for seed in 0..20 {
            let mut seq = sequencer(12, seed);
            let draws: Vec<usize> = (0..48).map(|_| seq.draw().unwrap()).collect();

            for window in draws.windows(12) {
                let unique: HashSet<_> = window.iter().collect();
                assert_eq!(unique.len(), 12, "seed {} draws {:?}", seed, draws);
                assert!(window.iter().all(|&idx| idx < 12));
            }
        }
    }

    #[test]
    fn test_no_consecutive_repeats_across_cycles() {
        for seed in 0..20 {
            let mut seq = sequencer(12, seed);
            let mut last = None;
            for _ in 0..100 {
                let idx = seq.draw();
                assert!(idx.is_some());
                assert_ne!(idx, last);
                last = idx;
            }
        }
    }

    #[test]
    fn test_exhaustion_then_forced_draw() {
        let mut seq = sequencer(11, 7);
        for _ in 0..11 {
            assert!(seq.next_index(false).is_some());
        }
        assert_eq!(seq.next_index(false), None);
        assert!(seq.next_index(true).is_some());
    }

    #[test]
    fn test_empty_sequencer() {
        let mut seq = sequencer(0, 1);
        assert!(seq.is_empty());
        assert_eq!(seq.draw(), None);
    }

    #[test]
    fn test_single_item() {
        let mut seq = sequencer(1, 3);
        assert_eq!(seq.draw(), Some(0));
        assert_eq!(seq.draw(), Some(0));
    }
}
