//! Hash combination for types with several identity-bearing fields.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const SEED: u64 = 17;
const FACTOR: u64 = 23;

/// Combines the hashes of `items` into one value.
///
/// Order-sensitive. Absent items contribute `0`. Arithmetic wraps.
pub fn combine_hashes<T, I>(items: I) -> u64
where
    T: Hash,
    I: IntoIterator<Item = Option<T>>,
{
    items.into_iter().fold(SEED, |current, item| {
        let hash = item.map_or(0, |item| hash_one(&item));
        current.wrapping_mul(FACTOR).wrapping_add(hash)
    })
}

fn hash_one<T: Hash>(item: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    item.hash(&mut hasher);
    hasher.finish()
}
