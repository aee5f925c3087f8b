//! Reproducible random sampling without replacement.
//!
//! Draws are taken from an explicit, ordered pool using a seeded ChaCha
//! generator. The pool removes drawn entries with `swap_remove`, so the
//! sequence of draws depends only on the initial pool order and the seed,
//! never on hash or set iteration order.
//!
//! # Example
//!
//! ```
//! use item_sampler::{ItemPool, seeded_rng};
//!
//! let mut rng = seeded_rng(43);
//! let mut pool = ItemPool::from_unordered(vec![5, 3, 9, 1, 7]);
//!
//! let drawn = pool.draw(2, &mut rng).unwrap();
//! assert_eq!(drawn.len(), 2);
//! assert_eq!(pool.len(), 3);
//! ```

use std::collections::BTreeSet;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The generator every sampling stage draws from.
pub type SamplerRng = ChaCha8Rng;

/// Create the generator for a run. The same seed always yields the same draws.
pub fn seeded_rng(seed: u64) -> SamplerRng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot draw {requested} items from a pool of {available}")]
pub struct NotEnoughItems {
    pub requested: usize,
    pub available: usize,
}

/// A pool of items that shrinks as items are drawn from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPool<T> {
    items: Vec<T>,
}

impl<T> ItemPool<T> {
    /// Build a pool that keeps the given order as its starting order.
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Draw a single item uniformly at random, or `None` if the pool is empty.
    pub fn draw_one<R: Rng>(&mut self, rng: &mut R) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.items.len());
        Some(self.items.swap_remove(index))
    }

    /// Draw `count` distinct items uniformly at random, in draw order.
    ///
    /// Fails without touching the pool if it holds fewer than `count` items.
    pub fn draw<R: Rng>(
        &mut self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<T>, NotEnoughItems> {
        if count > self.items.len() {
            return Err(NotEnoughItems {
                requested: count,
                available: self.items.len(),
            });
        }

        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            // the length check above guarantees the pool is non-empty here
            if let Some(item) = self.draw_one(rng) {
                drawn.push(item);
            }
        }
        Ok(drawn)
    }

    /// Whatever has not been drawn yet.
    pub fn into_remaining(self) -> Vec<T> {
        self.items
    }
}

impl<T: Ord> ItemPool<T> {
    /// Build a pool from items in arbitrary order.
    ///
    /// Items are deduplicated and put into ascending order first, so two
    /// callers holding the same set of items get the same draws.
    pub fn from_unordered<I: IntoIterator<Item = T>>(items: I) -> Self {
        let items: BTreeSet<T> = items.into_iter().collect();
        Self {
            items: items.into_iter().collect(),
        }
    }
}

impl<T: Ord> FromIterator<T> for ItemPool<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_unordered(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_deterministic() {
        let items: Vec<u32> = (0..100).collect();

        let mut rng1 = seeded_rng(43);
        let mut pool1 = ItemPool::from_unordered(items.clone());
        let drawn1 = pool1.draw(10, &mut rng1).unwrap();

        let mut rng2 = seeded_rng(43);
        let mut pool2 = ItemPool::from_unordered(items);
        let drawn2 = pool2.draw(10, &mut rng2).unwrap();

        assert_eq!(drawn1, drawn2);
        assert_eq!(pool1, pool2);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let forward: Vec<u32> = (0..50).collect();
        let backward: Vec<u32> = (0..50).rev().collect();

        let mut rng1 = seeded_rng(7);
        let mut rng2 = seeded_rng(7);
        let drawn1 = ItemPool::from_unordered(forward).draw(20, &mut rng1).unwrap();
        let drawn2 = ItemPool::from_unordered(backward)
            .draw(20, &mut rng2)
            .unwrap();

        assert_eq!(drawn1, drawn2);
    }

    #[test]
    fn test_draw_without_replacement() {
        let mut rng = seeded_rng(1);
        let mut pool = ItemPool::from_unordered(0..30u32);
        let mut drawn = pool.draw(30, &mut rng).unwrap();

        assert!(pool.is_empty());
        drawn.sort();
        assert_eq!(drawn, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn test_draw_too_many() {
        let mut rng = seeded_rng(1);
        let mut pool = ItemPool::from_unordered(vec![1u32, 2, 3]);

        let err = pool.draw(4, &mut rng).unwrap_err();
        assert_eq!(
            err,
            NotEnoughItems {
                requested: 4,
                available: 3
            }
        );
        // a failed draw leaves the pool alone
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_duplicates_collapse() {
        let pool = ItemPool::from_unordered(vec![3u32, 1, 3, 2, 1]);
        assert_eq!(pool.into_remaining(), vec![1, 2, 3]);
    }

    #[test]
    fn test_draw_one_empty() {
        let mut rng = seeded_rng(1);
        let mut pool: ItemPool<u32> = ItemPool::new(Vec::new());
        assert_eq!(pool.draw_one(&mut rng), None);
    }
}
