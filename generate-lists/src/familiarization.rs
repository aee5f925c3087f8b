use lexicon_utils::{AoaNorm, FrequencyInfo, Item, normalize_name};
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::frequencies::FrequencyLookup;

/// A practice word shown before the experiment proper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamiliarizationItem {
    pub word: String,
    pub aoa_estimate: f64,
    pub aoa_sd: f64,
    /// `None` if the word is missing from the frequency source.
    pub frequency: Option<FrequencyInfo>,
}

/// Practice words: normed words that are not among the pictures.
///
/// The words themselves are picked by hand (`curated`); this only checks
/// them against the corpus, adds frequencies and orders them by AoA.
pub fn select_familiarization(
    norms: &[AoaNorm],
    corpus: &[Item],
    lookup: &FrequencyLookup,
    curated: &[String],
) -> Vec<FamiliarizationItem> {
    let corpus_names: FxHashSet<String> =
        corpus.iter().map(|item| normalize_name(&item.name)).collect();
    let curated: FxHashSet<String> = curated.iter().map(|word| normalize_name(word)).collect();

    let mut selected: Vec<FamiliarizationItem> = norms
        .iter()
        .filter(|norm| {
            let word = normalize_name(&norm.word);
            !corpus_names.contains(&word) && curated.contains(&word)
        })
        .map(|norm| {
            let frequency = lookup.get(&norm.word);
            if frequency.is_none() {
                log::debug!("no frequency entry for familiarization word `{}`", norm.word);
            }
            FamiliarizationItem {
                word: norm.word.clone(),
                aoa_estimate: norm.aoa_estimate,
                aoa_sd: norm.aoa_sd,
                frequency,
            }
        })
        .collect();
    selected.sort_by(|a, b| a.aoa_estimate.total_cmp(&b.aoa_estimate));

    let found: FxHashSet<String> = selected.iter().map(|item| normalize_name(&item.word)).collect();
    for word in curated.difference(&found) {
        log::warn!("familiarization word `{word}` is not among the normed non-picture words");
    }
    selected
}
