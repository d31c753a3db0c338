use rand::Rng;
use rand::seq::SliceRandom;

/// A uniformly random permutation of `0..len` (Fisher-Yates).
pub fn shuffled_indices<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(rng);
    order
}
