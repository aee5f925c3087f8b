use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use lexicon_utils::{AoaNorm, Item, ItemNumber, ListName};

use crate::config::ListsConfig;
use crate::dedup::{DedupOutcome, deduplicate, names_occurring_several_times};
use crate::error::ListsError;
use crate::familiarization::{FamiliarizationItem, select_familiarization};
use crate::frequencies::FrequencyLookup;
use crate::partition::{Lists, partition_items};
use crate::repeated::{reference_rows, select_all_repeated};
use crate::stratify::{Strata, stratify};
use crate::table::{write_id_list, write_jsonl, write_lines};

/// Everything list generation reads.
pub struct Sources {
    /// Merged item table, duplicates included.
    pub items: Vec<Item>,
    pub norms: Vec<AoaNorm>,
    pub frequencies: FrequencyLookup,
}

/// Everything list generation produces.
#[derive(Debug, Clone)]
pub struct Generated {
    pub names_occurring_several_times: Vec<String>,
    pub dedup: DedupOutcome,
    pub strata: Strata,
    pub lists: Lists,
    pub repeated: BTreeMap<ListName, Vec<ItemNumber>>,
    pub familiarization: Vec<FamiliarizationItem>,
}

/// Run every stage in order. Any failure aborts the whole run.
pub fn generate(sources: Sources, config: &ListsConfig) -> Result<Generated, ListsError> {
    let Sources {
        items,
        norms,
        frequencies,
    } = sources;

    println!(">> Remove duplicate items...");
    let names_occurring_several_times = names_occurring_several_times(&items);
    let dedup = deduplicate(items);
    println!(
        "There are {} truly duplicate values, {} unique items.",
        dedup.duplicate_groups,
        dedup.items.len()
    );

    println!(">> Assign items to control items and 3 lists...");
    let strata = stratify(&dedup.items, config.frequency_bins)?;
    let lists = partition_items(&strata, config)?;
    println!(
        "Final list lengths: Controls: {}, A: {}, B: {}, C: {}",
        lists.shared.len(),
        lists.a.len(),
        lists.b.len(),
        lists.c.len()
    );

    println!(">> Select repeated items per list...");
    let rows = reference_rows(&norms, &dedup.items);
    let repeated = select_all_repeated(&rows, &lists, config)?;

    println!(">> Select familiarization items...");
    let familiarization = select_familiarization(
        &norms,
        &dedup.items,
        &frequencies,
        &config.familiarization_words,
    );

    Ok(Generated {
        names_occurring_several_times,
        dedup,
        strata,
        lists,
        repeated,
        familiarization,
    })
}

/// Write all outputs into `dir`, creating it if needed.
pub fn write_outputs(generated: &Generated, dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    write_lines(
        &generated.names_occurring_several_times,
        &dir.join("item_names_occurring_several_times.txt"),
    )?;

    for (list, ids) in generated.lists.iter() {
        write_id_list(ids, &dir.join(format!("{}.csv", list.file_stem())))?;
    }
    for (list, ids) in &generated.repeated {
        write_id_list(ids, &dir.join(format!("{}_repeated.csv", list.file_stem())))?;
    }

    write_jsonl(
        &generated.familiarization,
        &dir.join("familiarisation_items_overview.jsonl"),
    )?;
    Ok(())
}
