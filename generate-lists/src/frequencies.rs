use indexmap::IndexMap;
use lexicon_utils::{FrequencyInfo, FrequencyRecord, Item, normalize_name};

/// Frequency records indexed by normalized spelling.
///
/// Several spellings can normalize to the same name (`Masse` and `Maße`
/// both become `masse`). Variants keep the order they appear in the source.
pub struct FrequencyLookup {
    records: Vec<FrequencyRecord>,
    variants: IndexMap<String, Vec<usize>>,
}

/// Outcome of attaching frequencies to a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupReport {
    pub matched: usize,
    /// Names that had no frequency entry; their frequency stays null.
    pub missed: Vec<String>,
}

impl FrequencyLookup {
    pub fn new(records: Vec<FrequencyRecord>) -> Self {
        let mut variants: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (i, record) in records.iter().enumerate() {
            variants
                .entry(normalize_name(&record.word))
                .or_default()
                .push(i);
        }
        Self { records, variants }
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// The record a name resolves to.
    ///
    /// If exactly one variant passed the spell check it wins; otherwise the
    /// first variant in source order is used.
    pub fn record(&self, name: &str) -> Option<&FrequencyRecord> {
        let indices = self.variants.get(&normalize_name(name))?;

        let mut verified = indices
            .iter()
            .filter(|&&i| self.records[i].spell_check_ok);
        let chosen = match (verified.next(), verified.next()) {
            (Some(&i), None) => i,
            _ => *indices.first()?,
        };
        self.records.get(chosen)
    }

    pub fn get(&self, name: &str) -> Option<FrequencyInfo> {
        self.record(name).map(|record| record.info)
    }
}

/// Fill in the frequency of every item by name.
///
/// Hyphens are dropped before the lookup, so `t-shirt` matches `TShirt`.
/// Items without a match keep a null frequency.
pub fn attach_frequencies(items: &mut [Item], lookup: &FrequencyLookup) -> LookupReport {
    let mut report = LookupReport::default();

    for item in items.iter_mut() {
        let name = item.name.replace('-', "");
        match lookup.get(&name) {
            Some(info) => {
                item.frequency = Some(info);
                report.matched += 1;
            }
            None => {
                log::debug!("no frequency entry for `{}`", item.name);
                item.frequency = None;
                report.missed.push(item.name.clone());
            }
        }
    }

    if !report.missed.is_empty() {
        log::warn!(
            "{} of {} names have no frequency entry",
            report.missed.len(),
            items.len()
        );
    }
    report
}
