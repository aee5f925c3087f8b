//! Distributing items over the shared list and lists A, B and C.
//!
//! Every frequency bin contributes a few items to the shared list and
//! splits the rest evenly over A, B and C. Items that do not divide evenly
//! are dealt out one at a time by a cursor that keeps rotating across bins,
//! so no list is systematically favored.

use item_sampler::{ItemPool, NotEnoughItems, seeded_rng};
use lexicon_utils::{ItemNumber, ListName};
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::config::ListsConfig;
use crate::error::{ListsError, PoolLabel};
use crate::stratify::Strata;

/// Which of A, B and C receives the next leftover item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundRobin {
    next: usize,
}

impl RoundRobin {
    pub fn current(self) -> ListName {
        ListName::EXPERIMENTAL[self.next]
    }

    #[must_use]
    pub fn advance(self) -> Self {
        Self {
            next: (self.next + 1) % ListName::EXPERIMENTAL.len(),
        }
    }
}

/// The shared list and the three experimental lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lists {
    pub shared: Vec<ItemNumber>,
    pub a: Vec<ItemNumber>,
    pub b: Vec<ItemNumber>,
    pub c: Vec<ItemNumber>,
}

impl Lists {
    pub fn get(&self, list: ListName) -> &[ItemNumber] {
        match list {
            ListName::Shared => &self.shared,
            ListName::A => &self.a,
            ListName::B => &self.b,
            ListName::C => &self.c,
        }
    }

    fn get_mut(&mut self, list: ListName) -> &mut Vec<ItemNumber> {
        match list {
            ListName::Shared => &mut self.shared,
            ListName::A => &mut self.a,
            ListName::B => &mut self.b,
            ListName::C => &mut self.c,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ListName, &[ItemNumber])> {
        [ListName::Shared, ListName::A, ListName::B, ListName::C]
            .into_iter()
            .map(|list| (list, self.get(list)))
    }

    pub fn total(&self) -> usize {
        self.iter().map(|(_, ids)| ids.len()).sum()
    }

    fn sort(&mut self) {
        self.shared.sort_unstable();
        self.a.sort_unstable();
        self.b.sort_unstable();
        self.c.sort_unstable();
    }

    /// Check that no item is on two lists and that A, B and C differ in
    /// length by at most one.
    pub fn verify(&self) -> Result<(), ListsError> {
        let mut seen: FxHashMap<ItemNumber, ListName> = FxHashMap::default();
        for (list, ids) in self.iter() {
            for &item in ids {
                if let Some(first) = seen.insert(item, list) {
                    return Err(ListsError::Overlap {
                        item,
                        first,
                        second: list,
                    });
                }
            }
        }

        let sizes = [self.a.len(), self.b.len(), self.c.len()];
        let (min, max) = (
            sizes.iter().min().copied().unwrap_or(0),
            sizes.iter().max().copied().unwrap_or(0),
        );
        if max - min > 1 {
            return Err(ListsError::Unbalanced { sizes });
        }
        Ok(())
    }
}

/// Distribute one pool of items.
///
/// 1. `shared_count` random items go to the shared list.
/// 2. With `n` items left, `n / 3` random items go to A, then B, then C.
/// 3. The remaining `n % 3` items are drawn one by one and dealt out
///    starting at `cursor`.
///
/// Returns the cursor position for the next pool.
pub fn partition_pool<R: Rng>(
    pool: Vec<ItemNumber>,
    label: PoolLabel,
    shared_count: usize,
    rng: &mut R,
    mut cursor: RoundRobin,
    lists: &mut Lists,
) -> Result<RoundRobin, ListsError> {
    let not_enough = |source: NotEnoughItems| ListsError::NotEnoughItems {
        pool: label,
        source,
    };
    let mut pool = ItemPool::new(pool);

    let shared = pool.draw(shared_count, rng).map_err(not_enough)?;
    lists.shared.extend(shared);

    let remaining = pool.len();
    let per_list = remaining / ListName::EXPERIMENTAL.len();
    for list in ListName::EXPERIMENTAL {
        let drawn = pool.draw(per_list, rng).map_err(not_enough)?;
        lists.get_mut(list).extend(drawn);
    }

    let leftovers = remaining - per_list * ListName::EXPERIMENTAL.len();
    for _ in 0..leftovers {
        let Some(item) = pool.draw_one(rng) else {
            break;
        };
        lists.get_mut(cursor.current()).push(item);
        cursor = cursor.advance();
    }

    if !pool.is_empty() {
        return Err(ListsError::DataIntegrity {
            pool: label,
            remaining: pool.len(),
        });
    }
    log::debug!("finished {label}: {per_list} per list, {leftovers} leftovers");
    Ok(cursor)
}

/// Distribute all items over the shared list and lists A, B and C.
///
/// Bins are processed in order with one generator seeded from the config,
/// followed by the items without a frequency. Lists come back sorted.
pub fn partition_items(strata: &Strata, config: &ListsConfig) -> Result<Lists, ListsError> {
    let mut rng = seeded_rng(config.seed);
    let mut cursor = RoundRobin::default();
    let mut lists = Lists::default();

    for (bin, pool) in strata.bins.iter().enumerate() {
        cursor = partition_pool(
            pool.clone(),
            PoolLabel::FrequencyBin(bin),
            config.shared_per_bin,
            &mut rng,
            cursor,
            &mut lists,
        )?;
    }

    if strata.missing.is_empty() {
        log::info!("no items without frequency");
    } else {
        partition_pool(
            strata.missing.clone(),
            PoolLabel::MissingFrequency,
            config.shared_missing,
            &mut rng,
            cursor,
            &mut lists,
        )?;
    }

    lists.sort();
    lists.verify()?;
    log::info!(
        "list lengths: shared {}, A {}, B {}, C {}",
        lists.shared.len(),
        lists.a.len(),
        lists.b.len(),
        lists.c.len()
    );
    Ok(lists)
}
