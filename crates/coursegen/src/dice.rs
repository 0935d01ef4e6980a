use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait Dice {
    /// An index in `0..len`. Callers never pass `len == 0`.
    fn pick(&mut self, len: usize) -> usize;

    fn between(&mut self, low: u32, high: u32) -> u32;

    fn weighted(&mut self, weights: &[u32]) -> usize {
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return 0;
        }
        let mut roll = self.between(1, total);
        for (i, w) in weights.iter().enumerate() {
            if roll <= *w {
                return i;
            }
            roll -= w;
        }
        weights.len() - 1
    }
}

pub fn choose<'a, T, D: Dice + ?Sized>(dice: &mut D, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(dice.pick(items.len()))
}

#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: StdRng,
    seed: Option<u64>,
}

impl SeededDice {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng, seed }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Dice for SeededDice {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn between(&mut self, low: u32, high: u32) -> u32 {
        self.rng.random_range(low..=high)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPick;

impl Dice for FirstPick {
    fn pick(&mut self, _len: usize) -> usize {
        0
    }

    fn between(&mut self, low: u32, _high: u32) -> u32 {
        low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_rolls() {
        let mut a = SeededDice::from_seed(42);
        let mut b = SeededDice::from_seed(42);
        let rolls_a: Vec<u32> = (0..32).map(|_| a.between(1000, 1999)).collect();
        let rolls_b: Vec<u32> = (0..32).map(|_| b.between(1000, 1999)).collect();
        assert_eq!(rolls_a, rolls_b);
        assert!(rolls_a.iter().all(|r| (1000..=1999).contains(r)));
        assert_eq!(a.seed(), Some(42));
    }

    #[test]
    fn test_weighted_stays_in_bounds() {
        let mut dice = SeededDice::from_seed(7);
        let weights = [5, 10, 70, 15];
        let mut hits = [0usize; 4];
        for _ in 0..2000 {
            hits[dice.weighted(&weights)] += 1;
        }
        assert!(hits.iter().all(|h| *h > 0), "every option should appear: {hits:?}");
        assert!(hits[2] > hits[0] + hits[1] + hits[3], "heaviest weight should dominate: {hits:?}");
    }

    #[test]
    fn test_weighted_skips_zero_weights() {
        let mut dice = FirstPick;
        assert_eq!(dice.weighted(&[0, 0, 3]), 2);
        assert_eq!(dice.weighted(&[]), 0);
    }

    #[test]
    fn test_first_pick() {
        let mut dice = FirstPick;
        assert_eq!(choose(&mut dice, &["a", "b", "c"]), Some(&"a"));
        assert_eq!(dice.between(8, 15), 8);
        assert_eq!(dice.weighted(&[5, 10, 70, 15]), 0);
        assert_eq!(choose::<&str, _>(&mut dice, &[]), None);
    }
}
