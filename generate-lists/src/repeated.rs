//! Choosing the items that are shown twice per list.
//!
//! Only items with a reliable AoA estimate are eligible. One item is drawn
//! from each AoA band so the whole age range is covered, the rest are drawn
//! freely from the eligible items.

use std::collections::{BTreeMap, BTreeSet};

use item_sampler::{ItemPool, NotEnoughItems, seeded_rng};
use lexicon_utils::{AoaNorm, Item, ItemNumber, ListName, normalize_name};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::ListsConfig;
use crate::error::{ListsError, PoolLabel};
use crate::partition::Lists;
use crate::stratify::bin_of;

/// An item joined with its AoA norm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceRow {
    pub item_number: ItemNumber,
    pub aoa_estimate: f64,
    pub aoa_sd: f64,
}

/// Join the norms to the items by normalized name, one row per matching item.
pub fn reference_rows(norms: &[AoaNorm], items: &[Item]) -> Vec<ReferenceRow> {
    let mut by_name: FxHashMap<String, Vec<ItemNumber>> = FxHashMap::default();
    for item in items {
        by_name
            .entry(normalize_name(&item.name))
            .or_default()
            .push(item.item_number);
    }

    norms
        .iter()
        .flat_map(|norm| {
            by_name
                .get(&normalize_name(&norm.word))
                .into_iter()
                .flatten()
                .map(move |&item_number| ReferenceRow {
                    item_number,
                    aoa_estimate: norm.aoa_estimate,
                    aoa_sd: norm.aoa_sd,
                })
        })
        .collect()
}

/// Mean plus sample standard deviation; `NaN` for fewer than two values.
fn dispersion_threshold(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    mean + variance.sqrt()
}

/// `count + 1` evenly spaced values from `start` to `stop`.
fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let step = (stop - start) / count as f64;
    let mut values: Vec<f64> = (0..=count).map(|i| i as f64 * step + start).collect();
    if let Some(last) = values.last_mut() {
        *last = stop;
    }
    values
}

/// Boundaries of `bins` equal-width intervals over the range of `values`.
///
/// The lowest boundary is pushed down by 0.1% of the range so the minimum
/// falls inside the first bin. A zero-width range is widened by 0.1% of its
/// value on both sides.
pub fn equal_width_edges(values: &[f64], bins: usize) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        let pad = if min == 0.0 { 0.001 } else { 0.001 * min.abs() };
        return linspace(min - pad, max + pad, bins);
    }

    let mut edges = linspace(min, max, bins);
    edges[0] -= (max - min) * 0.001;
    edges
}

/// Pick the repeated items of one list.
///
/// Rows are limited to the list's items whose AoA SD is below mean + SD of
/// the SDs, then cut into `aoa_bins` equal-width AoA bins. One item is drawn
/// from every bin and `repeated_random` more from whatever is left. The
/// generator is seeded afresh, so each list's result does not depend on
/// the others. Returns the item numbers in ascending order.
pub fn select_repeated(
    rows: &[ReferenceRow],
    list: ListName,
    list_items: &[ItemNumber],
    config: &ListsConfig,
) -> Result<Vec<ItemNumber>, ListsError> {
    let on_list: FxHashSet<ItemNumber> = list_items.iter().copied().collect();
    let rows: Vec<&ReferenceRow> = rows
        .iter()
        .filter(|row| on_list.contains(&row.item_number))
        .collect();

    let sds: Vec<f64> = rows.iter().map(|row| row.aoa_sd).collect();
    let threshold = dispersion_threshold(&sds);
    let reliable: Vec<&ReferenceRow> = rows
        .into_iter()
        .filter(|row| row.aoa_sd < threshold)
        .collect();
    log::debug!(
        "list {list}: {} of {} norm rows below SD threshold {threshold:.3}",
        reliable.len(),
        sds.len()
    );

    let mut by_bin: Vec<BTreeSet<ItemNumber>> = vec![BTreeSet::new(); config.aoa_bins];
    if !reliable.is_empty() && config.aoa_bins > 0 {
        let estimates: Vec<f64> = reliable.iter().map(|row| row.aoa_estimate).collect();
        let edges = equal_width_edges(&estimates, config.aoa_bins);
        for row in &reliable {
            by_bin[bin_of(&edges, row.aoa_estimate)].insert(row.item_number);
        }
    }

    let mut rng = seeded_rng(config.seed);
    let mut selection = BTreeSet::new();
    for (bin, candidates) in by_bin.iter().enumerate() {
        let mut pool: ItemPool<ItemNumber> = candidates
            .iter()
            .copied()
            .filter(|item| !selection.contains(item))
            .collect();
        let item = pool
            .draw_one(&mut rng)
            .ok_or(ListsError::EmptyAoaBin { list, bin })?;
        selection.insert(item);
    }

    let mut pool: ItemPool<ItemNumber> = reliable
        .iter()
        .map(|row| row.item_number)
        .filter(|item| !selection.contains(item))
        .collect();
    let drawn = pool
        .draw(config.repeated_random, &mut rng)
        .map_err(|source: NotEnoughItems| ListsError::NotEnoughItems {
            pool: PoolLabel::Repeated(list),
            source,
        })?;
    selection.extend(drawn);

    Ok(selection.into_iter().collect())
}

/// Repeated items for lists A, B and C.
pub fn select_all_repeated(
    rows: &[ReferenceRow],
    lists: &Lists,
    config: &ListsConfig,
) -> Result<BTreeMap<ListName, Vec<ItemNumber>>, ListsError> {
    ListName::EXPERIMENTAL
        .into_iter()
        .map(|list| {
            let selection = select_repeated(rows, list, lists.get(list), config)?;
            log::info!("list {list}: {} repeated items", selection.len());
            Ok((list, selection))
        })
        .collect()
}
