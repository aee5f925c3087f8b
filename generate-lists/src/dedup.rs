//! Resolving pictures that stand for the same item.
//!
//! The naming database contains several pictures for some names. Rows with
//! the same name *and* the same example sentence are true duplicates; rows
//! that only share a name are homonyms and stay separate.

use indexmap::IndexMap;
use itertools::Itertools;
use lexicon_utils::{Item, ItemNumber};

/// Rows of a duplicate group that tie at the lowest H-index.
///
/// All of them are kept; nothing in the data says which one to prefer.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbiguousDuplicate {
    pub name: String,
    pub example_sentence: Option<String>,
    pub item_numbers: Vec<ItemNumber>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DedupOutcome {
    /// Surviving rows in input order.
    pub items: Vec<Item>,
    /// Number of `(name, example sentence)` keys that had more than one row.
    pub duplicate_groups: usize,
    pub ambiguous: Vec<AmbiguousDuplicate>,
}

/// Row indices per duplicate key, keys in order of first appearance.
fn group_rows(items: &[Item]) -> IndexMap<(&str, Option<&str>), Vec<usize>> {
    let mut groups: IndexMap<(&str, Option<&str>), Vec<usize>> = IndexMap::new();
    for (i, item) in items.iter().enumerate() {
        groups.entry(item.duplicate_key()).or_default().push(i);
    }
    groups
}

/// Keep only the best-named picture of every duplicate group.
///
/// Within a group, the rows with the minimum H-index survive and all others
/// are dropped. A row without an H-index never beats one that has it; if no
/// row of a group has one, the whole group is kept.
pub fn deduplicate(items: Vec<Item>) -> DedupOutcome {
    let mut keep = vec![true; items.len()];
    let mut duplicate_groups = 0;
    let mut ambiguous = Vec::new();

    for ((name, example_sentence), rows) in group_rows(&items) {
        if rows.len() < 2 {
            continue;
        }
        duplicate_groups += 1;

        let Some(h_min) = rows
            .iter()
            .filter_map(|&i| items[i].h_index)
            .filter(|h| !h.is_nan())
            .reduce(f64::min)
        else {
            log::warn!("no H-index for any duplicate of `{name}`, keeping all");
            continue;
        };

        let winners: Vec<usize> = rows
            .iter()
            .copied()
            .filter(|&i| items[i].h_index == Some(h_min))
            .collect();
        for &i in &rows {
            keep[i] = winners.contains(&i);
        }

        if winners.len() > 1 {
            let item_numbers: Vec<ItemNumber> =
                winners.iter().map(|&i| items[i].item_number).collect();
            log::warn!(
                "duplicates of `{name}` tie at H-index {h_min}; keeping items {item_numbers:?}"
            );
            ambiguous.push(AmbiguousDuplicate {
                name: name.to_string(),
                example_sentence: example_sentence.map(str::to_string),
                item_numbers,
            });
        }
    }

    let before = items.len();
    let items: Vec<Item> = items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect();

    log::info!(
        "{duplicate_groups} duplicate groups, {} rows removed, {} unique items",
        before - items.len(),
        items.len()
    );

    DedupOutcome {
        items,
        duplicate_groups,
        ambiguous,
    }
}

/// Names that appear on more than one row, whatever their sentence.
pub fn names_occurring_several_times(items: &[Item]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.name.as_str())
        .counts()
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .sorted()
        .collect()
}

/// Copy AoA estimates between true duplicates.
///
/// Estimates are collected once per unique item, so only one row of each
/// duplicate group carries them. Rows lacking an estimate get the one of
/// the first row in their group that has it. Returns how many rows were filled.
pub fn fill_duplicate_estimates(items: &mut [Item]) -> usize {
    let groups: Vec<Vec<usize>> = group_rows(items)
        .into_values()
        .filter(|rows| rows.len() > 1)
        .collect();

    let mut filled = 0;
    for rows in groups {
        let Some(donor) = rows.iter().copied().find(|&i| items[i].aoa_mean.is_some()) else {
            continue;
        };
        let (aoa_mean, aoa_sd) = (items[donor].aoa_mean, items[donor].aoa_sd);
        for i in rows {
            if items[i].aoa_mean.is_none() {
                items[i].aoa_mean = aoa_mean;
                items[i].aoa_sd = aoa_sd;
                filled += 1;
            }
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(item_number: ItemNumber, name: &str, sentence: &str, h_index: Option<f64>) -> Item {
        let mut item = Item::new(item_number, name);
        item.example_sentence = Some(sentence.to_string());
        item.h_index = h_index;
        item
    }

    fn numbers(items: &[Item]) -> Vec<ItemNumber> {
        items.iter().map(|item| item.item_number).collect()
    }

    #[test]
    fn test_lower_h_index_wins() {
        let outcome = deduplicate(vec![
            item(1, "maus", "Die Maus frisst Käse.", Some(0.9)),
            item(2, "maus", "Die Maus frisst Käse.", Some(0.8)),
        ]);

        assert_eq!(numbers(&outcome.items), vec![2]);
        assert_eq!(outcome.duplicate_groups, 1);
        assert!(outcome.ambiguous.is_empty());
    }

    #[test]
    fn test_homonyms_are_kept() {
        let outcome = deduplicate(vec![
            item(1, "maus", "Die Maus frisst Käse.", Some(0.9)),
            item(2, "maus", "Ich klicke mit der Maus.", Some(0.2)),
        ]);

        assert_eq!(numbers(&outcome.items), vec![1, 2]);
        assert_eq!(outcome.duplicate_groups, 0);
    }

    #[test]
    fn test_ties_are_kept_and_reported() {
        let outcome = deduplicate(vec![
            item(1, "bank", "Ich sitze auf der Bank.", Some(0.5)),
            item(2, "bank", "Ich sitze auf der Bank.", Some(0.5)),
            item(3, "bank", "Ich sitze auf der Bank.", Some(1.1)),
        ]);

        assert_eq!(numbers(&outcome.items), vec![1, 2]);
        assert_eq!(outcome.ambiguous.len(), 1);
        assert_eq!(outcome.ambiguous[0].item_numbers, vec![1, 2]);
        assert_eq!(outcome.ambiguous[0].name, "bank");
    }

    #[test]
    fn test_missing_h_index_loses() {
        let outcome = deduplicate(vec![
            item(1, "ball", "Der Ball rollt.", None),
            item(2, "ball", "Der Ball rollt.", Some(1.4)),
        ]);
        assert_eq!(numbers(&outcome.items), vec![2]);
    }

    #[test]
    fn test_no_h_index_at_all_keeps_group() {
        let outcome = deduplicate(vec![
            item(1, "ball", "Der Ball rollt.", None),
            item(2, "ball", "Der Ball rollt.", None),
        ]);
        assert_eq!(numbers(&outcome.items), vec![1, 2]);
    }

    #[test]
    fn test_rows_without_sentence_are_grouped() {
        let outcome = deduplicate(vec![
            Item {
                h_index: Some(0.3),
                ..Item::new(1, "igel")
            },
            Item {
                h_index: Some(0.1),
                ..Item::new(2, "igel")
            },
        ]);
        assert_eq!(numbers(&outcome.items), vec![2]);
    }

    #[test]
    fn test_keys_unique_after_dedup() {
        let mut items = Vec::new();
        for i in 0..30u32 {
            let name = format!("name{}", i % 7);
            items.push(item(i, &name, "Satz.", Some(f64::from(i))));
        }
        let outcome = deduplicate(items);

        assert_eq!(outcome.items.len(), 7);
        assert!(outcome.items.iter().map(Item::duplicate_key).all_unique());
    }

    #[test]
    fn test_names_occurring_several_times() {
        let items = vec![
            item(1, "maus", "a", None),
            item(2, "bank", "b", None),
            item(3, "maus", "c", None),
            item(4, "ball", "d", None),
            item(5, "bank", "b", None),
        ];
        assert_eq!(
            names_occurring_several_times(&items),
            vec!["bank".to_string(), "maus".to_string()]
        );
    }

    #[test]
    fn test_fill_duplicate_estimates() {
        let mut items = vec![
            item(1, "maus", "a", None),
            Item {
                aoa_mean: Some(3.5),
                aoa_sd: Some(0.7),
                ..item(2, "maus", "a", None)
            },
            item(3, "maus", "other", None),
        ];

        assert_eq!(fill_duplicate_estimates(&mut items), 1);
        assert_eq!(items[0].aoa_mean, Some(3.5));
        assert_eq!(items[0].aoa_sd, Some(0.7));
        assert_eq!(items[2].aoa_mean, None);
    }
}
