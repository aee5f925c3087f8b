//! Readers for the external data sources.
//!
//! Column names follow the published files: the picture naming database
//! (`ITEM`, `NAME1`, `H_INDEX`), the example-sentence sheet (`ITEM`,
//! `EXAMPLE`), the AoA norms (`Word`, `AoAestimate`, `SD`) and the
//! subtitle frequency list (`Word`, `spell-check OK (1/0)`, `SUBTLEX`,
//! `lgSUBTLEX`, `Google00pm`, `lgGoogle00`).

use std::collections::BTreeMap;
use std::path::Path;

use lexicon_utils::{AoaNorm, FrequencyInfo, FrequencyRecord, Item, ItemNumber, normalize_name};

use crate::error::ListsError;
use crate::table::Table;

/// Picture rows without example sentences or frequencies.
pub fn pictures_from_table(table: &Table) -> Result<Vec<Item>, ListsError> {
    let item = table.column("ITEM")?;
    let name = table.column("NAME1")?;
    let h_index = table.column("H_INDEX")?;

    table
        .rows()
        .map(|row| {
            let mut picture = Item::new(row.item_number(item)?, row.text(name));
            picture.h_index = row.number(h_index)?;
            Ok(picture)
        })
        .collect()
}

/// Example sentences by item number, in file order. Rows without a sentence
/// are skipped.
///
/// An item may have several sentences; each one later becomes its own row in
/// the merged table.
pub fn sentences_from_table(
    table: &Table,
) -> Result<BTreeMap<ItemNumber, Vec<String>>, ListsError> {
    let item = table.column("ITEM")?;
    let example = table.column("EXAMPLE")?;

    let mut sentences: BTreeMap<ItemNumber, Vec<String>> = BTreeMap::new();
    for row in table.rows() {
        let sentence = row.text(example);
        if sentence.is_empty() {
            continue;
        }
        let item_number = row.item_number(item)?;
        let entry = sentences.entry(item_number).or_default();
        if !entry.is_empty() {
            log::info!(
                "line {}: item {item_number} has another example sentence",
                row.line()
            );
        }
        entry.push(sentence.to_string());
    }
    Ok(sentences)
}

/// AoA norms with their words already normalized for matching.
///
/// Rows lacking an estimate or SD are dropped.
pub fn aoa_norms_from_table(table: &Table) -> Result<Vec<AoaNorm>, ListsError> {
    let word = table.column("Word")?;
    let estimate = table.column("AoAestimate")?;
    let sd = table.column("SD")?;

    let mut norms = Vec::new();
    for row in table.rows() {
        let (Some(aoa_estimate), Some(aoa_sd)) = (row.number(estimate)?, row.number(sd)?) else {
            log::debug!("line {}: no AoA estimate, skipping", row.line());
            continue;
        };
        norms.push(AoaNorm {
            word: normalize_name(row.text(word)),
            aoa_estimate,
            aoa_sd,
        });
    }
    Ok(norms)
}

/// Frequency records in file order.
pub fn frequency_records_from_table(table: &Table) -> Result<Vec<FrequencyRecord>, ListsError> {
    let word = table.column("Word")?;
    let spell_check = table.column("spell-check OK (1/0)")?;
    let subtlex = table.column("SUBTLEX")?;
    let lg_subtlex = table.column("lgSUBTLEX")?;
    let google00pm = table.column("Google00pm")?;
    let lg_google00 = table.column("lgGoogle00")?;

    table
        .rows()
        .map(|row| {
            Ok(FrequencyRecord {
                word: row.text(word).to_string(),
                spell_check_ok: row.number(spell_check)? == Some(1.0),
                info: FrequencyInfo {
                    subtlex: row.required_number(subtlex)?,
                    lg_subtlex: row.required_number(lg_subtlex)?,
                    google00pm: row.required_number(google00pm)?,
                    lg_google00: row.required_number(lg_google00)?,
                },
            })
        })
        .collect()
}

pub fn read_pictures(path: &Path) -> anyhow::Result<Vec<Item>> {
    Ok(pictures_from_table(&Table::read(path)?)?)
}

pub fn read_sentences(path: &Path) -> anyhow::Result<BTreeMap<ItemNumber, Vec<String>>> {
    Ok(sentences_from_table(&Table::read(path)?)?)
}

pub fn read_aoa_norms(path: &Path) -> anyhow::Result<Vec<AoaNorm>> {
    Ok(aoa_norms_from_table(&Table::read(path)?)?)
}

pub fn read_frequency_records(path: &Path) -> anyhow::Result<Vec<FrequencyRecord>> {
    Ok(frequency_records_from_table(&Table::read(path)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pictures() {
        let table =
            Table::parse("ITEM;PICTURE;NAME1;H_INDEX\n1;PICTURE_1;apfel;0,12\n2;PICTURE_2;ufo;\n")
                .unwrap();
        let pictures = pictures_from_table(&table).unwrap();

        assert_eq!(pictures.len(), 2);
        assert_eq!(pictures[0].name, "apfel");
        assert_eq!(pictures[0].h_index, Some(0.12));
        assert_eq!(pictures[1].h_index, None);
    }

    #[test]
    fn test_sentences_skip_blank() {
        let table = Table::parse("ITEM\tEXAMPLE\n1\tDer Apfel ist rot.\n2\t\n").unwrap();
        let sentences = sentences_from_table(&table).unwrap();

        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[&1], vec!["Der Apfel ist rot.".to_string()]);
    }

    #[test]
    fn test_sentences_keep_every_row_of_an_item() {
        let table =
            Table::parse("ITEM\tEXAMPLE\n4\tDie Bank ist hart.\n4\tDie Bank hat zu.\n").unwrap();
        let sentences = sentences_from_table(&table).unwrap();

        assert_eq!(
            sentences[&4],
            vec!["Die Bank ist hart.".to_string(), "Die Bank hat zu.".to_string()]
        );
    }

    #[test]
    fn test_latin1_norms() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("norms.csv");
        std::fs::write(&path, b"Word,AoAestimate,SD\nM\xE4dchen,3.2,1.1\n").unwrap();

        let norms = read_aoa_norms(&path).unwrap();
        assert_eq!(norms.len(), 1);
        assert_eq!(norms[0].word, "maedchen");
    }

    #[test]
    fn test_latin1_frequencies_with_decimal_comma() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subtlex.txt");
        std::fs::write(
            &path,
            b"Word\tspell-check OK (1/0)\tSUBTLEX\tlgSUBTLEX\tGoogle00pm\tlgGoogle00\n\
              Gr\xFC\xDFe\t1\t2,5\t1,4\t3,1\t2,2\n",
        )
        .unwrap();

        let records = read_frequency_records(&path).unwrap();
        assert_eq!(records[0].word, "Grüße");
        assert_eq!(records[0].info.lg_subtlex, 1.4);
    }

    #[test]
    fn test_norms_are_normalized() {
        let table = Table::parse("Word,AoAestimate,SD\nMädchen,3.2,1.1\nZeugnis,,\n").unwrap();
        let norms = aoa_norms_from_table(&table).unwrap();

        assert_eq!(
            norms,
            vec![AoaNorm {
                word: "maedchen".to_string(),
                aoa_estimate: 3.2,
                aoa_sd: 1.1,
            }]
        );
    }

    #[test]
    fn test_frequency_records() {
        let table = Table::parse(
            "Word\tWFfreqcount\tspell-check OK (1/0)\tCUMfreqcount\tSUBTLEX\tlgSUBTLEX\tGoogle00\tGoogle00pm\tlgGoogle00\n\
             Reis\t10\t1\t10\t1,5\t1,2\t100\t0,8\t2,1\n",
        )
        .unwrap();
        let records = frequency_records_from_table(&table).unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].spell_check_ok);
        assert_eq!(records[0].info.subtlex, 1.5);
        assert_eq!(records[0].info.lg_google00, 2.1);
    }

    #[test]
    fn test_frequency_record_missing_number() {
        let table = Table::parse(
            "Word\tspell-check OK (1/0)\tSUBTLEX\tlgSUBTLEX\tGoogle00pm\tlgGoogle00\nReis\t1\t\t1\t1\t1\n",
        )
        .unwrap();
        assert!(frequency_records_from_table(&table).is_err());
    }
}
