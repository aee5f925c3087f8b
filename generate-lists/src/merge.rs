//! Building the merged item table from the raw sources.

use std::collections::BTreeMap;

use lexicon_utils::{Item, ItemNumber};
use rustc_hash::FxHashSet;

use crate::frequencies::{FrequencyLookup, LookupReport, attach_frequencies};

/// Attach example sentences by item number.
///
/// A picture with several sentences yields one row per sentence, in sentence
/// order. Pictures without a sentence are kept once. Sentences for unknown
/// item numbers are reported and dropped.
pub fn merge_sentences(
    pictures: Vec<Item>,
    sentences: &BTreeMap<ItemNumber, Vec<String>>,
) -> Vec<Item> {
    let known: FxHashSet<ItemNumber> = pictures.iter().map(|p| p.item_number).collect();
    for item_number in sentences.keys().filter(|&n| !known.contains(n)) {
        log::warn!("example sentence for unknown item {item_number}");
    }

    let mut merged = Vec::with_capacity(pictures.len());
    let mut without_sentence = 0;
    for picture in pictures {
        match sentences.get(&picture.item_number) {
            Some(examples) if !examples.is_empty() => {
                for example in examples {
                    let mut row = picture.clone();
                    row.example_sentence = Some(example.clone());
                    merged.push(row);
                }
            }
            _ => {
                without_sentence += 1;
                merged.push(picture);
            }
        }
    }
    if without_sentence > 0 {
        log::info!("{without_sentence} pictures have no example sentence");
    }
    merged
}

/// Pictures with example sentences and frequencies, ready for list generation.
pub fn merge_sources(
    pictures: Vec<Item>,
    sentences: &BTreeMap<ItemNumber, Vec<String>>,
    lookup: &FrequencyLookup,
) -> (Vec<Item>, LookupReport) {
    let mut items = merge_sentences(pictures, sentences);
    let report = attach_frequencies(&mut items, lookup);
    (items, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexicon_utils::{FrequencyInfo, FrequencyRecord};

    #[test]
    fn test_merge_sources() {
        let pictures = vec![Item::new(1, "apfel"), Item::new(2, "ufo")];
        let sentences = BTreeMap::from([
            (1, vec!["Der Apfel ist rot.".to_string()]),
            (9, vec!["Verwaist.".to_string()]),
        ]);
        let lookup = FrequencyLookup::new(vec![FrequencyRecord {
            word: "Apfel".to_string(),
            spell_check_ok: true,
            info: FrequencyInfo {
                subtlex: 50.0,
                lg_subtlex: 1.7,
                google00pm: 8.0,
                lg_google00: 3.3,
            },
        }]);

        let (items, report) = merge_sources(pictures, &sentences, &lookup);

        assert_eq!(items[0].example_sentence.as_deref(), Some("Der Apfel ist rot."));
        assert_eq!(items[0].frequency_score(), Some(1.7));
        assert_eq!(items[1].example_sentence, None);
        assert_eq!(report.matched, 1);
        assert_eq!(report.missed, vec!["ufo".to_string()]);
    }

    #[test]
    fn test_every_sentence_becomes_a_row() {
        let pictures = vec![Item::new(4, "bank"), Item::new(5, "ufo")];
        let sentences = BTreeMap::from([(
            4,
            vec!["Die Bank ist hart.".to_string(), "Die Bank hat zu.".to_string()],
        )]);

        let items = merge_sentences(pictures, &sentences);

        let rows: Vec<(ItemNumber, Option<&str>)> = items
            .iter()
            .map(|item| (item.item_number, item.example_sentence.as_deref()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (4, Some("Die Bank ist hart.")),
                (4, Some("Die Bank hat zu.")),
                (5, None),
            ]
        );
    }
}
