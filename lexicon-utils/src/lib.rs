pub mod normalize;

pub use normalize::normalize_name;

use serde::{Deserialize, Serialize};

/// Identifier of a picture in the naming database.
pub type ItemNumber = u32;

/// Word-frequency measures for one spelling in the frequency source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyInfo {
    /// Raw count in the subtitle corpus.
    pub subtlex: f64,
    /// log10 of the subtitle count; used to stratify items.
    pub lg_subtlex: f64,
    /// Google Books (2000s) frequency per million.
    pub google00pm: f64,
    pub lg_google00: f64,
}

/// One picture/name row of the merged item table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub item_number: ItemNumber,
    pub name: String,
    /// Only used to tell true duplicates apart from homonyms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_sentence: Option<String>,
    /// Name agreement of the picture; lower is better.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_index: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<FrequencyInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aoa_mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aoa_sd: Option<f64>,
}

impl Item {
    pub fn new(item_number: ItemNumber, name: impl Into<String>) -> Self {
        Self {
            item_number,
            name: name.into(),
            example_sentence: None,
            h_index: None,
            frequency: None,
            aoa_mean: None,
            aoa_sd: None,
        }
    }

    /// The score items are stratified by.
    pub fn frequency_score(&self) -> Option<f64> {
        self.frequency
            .map(|frequency| frequency.lg_subtlex)
            .filter(|score| !score.is_nan())
    }

    /// Two rows with the same key describe the same logical item.
    pub fn duplicate_key(&self) -> (&str, Option<&str>) {
        (self.name.as_str(), self.example_sentence.as_deref())
    }
}

/// One row of the frequency source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRecord {
    pub word: String,
    /// Whether the spelling passed the corpus' orthography check.
    pub spell_check_ok: bool,
    pub info: FrequencyInfo,
}

/// One row of the age-of-acquisition norms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AoaNorm {
    pub word: String,
    /// Estimated age (in years) at which the word is learned.
    pub aoa_estimate: f64,
    pub aoa_sd: f64,
}

/// The lists items are distributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ListName {
    /// Control items seen by every participant group.
    Shared,
    A,
    B,
    C,
}

impl ListName {
    /// The lists that receive disjoint shares of every bin.
    pub const EXPERIMENTAL: [ListName; 3] = [ListName::A, ListName::B, ListName::C];

    /// File stem the list is written under.
    pub fn file_stem(&self) -> &'static str {
        match self {
            ListName::Shared => "control_items",
            ListName::A => "list_A",
            ListName::B => "list_B",
            ListName::C => "list_C",
        }
    }
}

impl std::fmt::Display for ListName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListName::Shared => write!(f, "Shared"),
            ListName::A => write!(f, "A"),
            ListName::B => write!(f, "B"),
            ListName::C => write!(f, "C"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_from_json_line() {
        let line = r#"{"item_number":12,"name":"apfel","example_sentence":"Der Apfel ist rot.","h_index":0.8,"frequency":{"subtlex":120.0,"lg_subtlex":2.08,"google00pm":30.5,"lg_google00":4.1}}"#;
        let item: Item = serde_json::from_str(line).unwrap();

        assert_eq!(item.item_number, 12);
        assert_eq!(item.frequency_score(), Some(2.08));
        assert_eq!(item.aoa_mean, None);
        assert_eq!(item.duplicate_key(), ("apfel", Some("Der Apfel ist rot.")));
    }

    #[test]
    fn test_missing_fields_are_null() {
        let item: Item = serde_json::from_str(r#"{"item_number":3,"name":"ufo"}"#).unwrap();
        assert_eq!(item, Item::new(3, "ufo"));
        assert_eq!(item.frequency_score(), None);
    }

    #[test]
    fn test_nan_score_counts_as_missing() {
        let mut item = Item::new(1, "x");
        item.frequency = Some(FrequencyInfo {
            subtlex: f64::NAN,
            lg_subtlex: f64::NAN,
            google00pm: f64::NAN,
            lg_google00: f64::NAN,
        });
        assert_eq!(item.frequency_score(), None);
    }

    #[test]
    fn test_list_names() {
        assert_eq!(ListName::Shared.file_stem(), "control_items");
        assert_eq!(ListName::B.file_stem(), "list_B");
        assert_eq!(ListName::C.to_string(), "C");
    }
}
