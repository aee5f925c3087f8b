use std::collections::BTreeSet;

use lexicon_utils::{Item, ItemNumber};

use crate::error::ListsError;

/// Items grouped into equal-population frequency bins.
#[derive(Debug, Clone, PartialEq)]
pub struct Strata {
    /// Bin boundaries, `bins + 1` values from the lowest to the highest score.
    pub edges: Vec<f64>,
    /// Item numbers per bin in ascending order; bin 0 holds the rarest words.
    pub bins: Vec<Vec<ItemNumber>>,
    /// Items without a frequency score, in ascending order.
    pub missing: Vec<ItemNumber>,
}

/// Linear interpolation the way numpy does it, so boundaries match the
/// published lists to the last bit.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

/// Quantile boundaries splitting `values` into `bins` equally populated bins.
///
/// Quantiles are linearly interpolated between order statistics. Fails if
/// two boundaries coincide, because the bins would no longer be equal in
/// size.
pub fn quantile_edges(values: &[f64], bins: usize) -> Result<Vec<f64>, ListsError> {
    if values.is_empty() || bins == 0 {
        return Err(ListsError::TooFewValues {
            bins,
            values: values.len(),
        });
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let last = sorted.len() - 1;
    let step = 1.0 / bins as f64;

    let edges: Vec<f64> = (0..=bins)
        .map(|i| {
            let p = if i == bins { 1.0 } else { i as f64 * step };
            let position = p * last as f64;
            let lower = position.floor() as usize;
            let upper = (lower + 1).min(last);
            lerp(sorted[lower], sorted[upper], position - lower as f64)
        })
        .collect();

    if edges.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ListsError::DuplicateBinEdges { bins, edges });
    }
    Ok(edges)
}

/// Label of the bin a score falls into.
///
/// Bins are closed on the right; the lowest bin also includes its left edge.
pub fn bin_of(edges: &[f64], score: f64) -> usize {
    let inner = &edges[1..];
    inner
        .partition_point(|&edge| edge < score)
        .min(inner.len().saturating_sub(1))
}

/// Split items into frequency bins plus the pool of items without a score.
///
/// Boundaries are computed once over every item that has a score.
pub fn stratify(items: &[Item], bins: usize) -> Result<Strata, ListsError> {
    let scores: Vec<f64> = items.iter().filter_map(Item::frequency_score).collect();
    let edges = quantile_edges(&scores, bins)?;

    let mut binned = vec![BTreeSet::new(); bins];
    let mut missing = BTreeSet::new();
    for item in items {
        match item.frequency_score() {
            Some(score) => {
                binned[bin_of(&edges, score)].insert(item.item_number);
            }
            None => {
                missing.insert(item.item_number);
            }
        }
    }

    let bins: Vec<Vec<ItemNumber>> = binned
        .into_iter()
        .map(|bin| bin.into_iter().collect())
        .collect();
    log::info!(
        "frequency bins of sizes {:?}, {} items without frequency",
        bins.iter().map(Vec::len).collect::<Vec<_>>(),
        missing.len()
    );

    Ok(Strata {
        edges,
        bins,
        missing: missing.into_iter().collect(),
    })
}
