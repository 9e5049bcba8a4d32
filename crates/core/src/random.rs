//! Random value helpers.

use rand::seq::index;
use rand::Rng;

/// A random identifier in `1..10^digits`.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R, digits: u32) -> u64 {
    rng.gen_range(1..10u64.pow(digits))
}

/// `size` distinct items drawn from `items` without replacement, in draw order.
///
/// Asking for more items than exist yields every item, shuffled.
pub fn random_subset<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T], size: usize) -> Vec<&'a T> {
    index::sample(rng, items.len(), size.min(items.len()))
        .into_iter()
        .map(|i| &items[i])
        .collect()
}
