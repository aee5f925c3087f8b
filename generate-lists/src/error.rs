use item_sampler::NotEnoughItems;
use lexicon_utils::{ItemNumber, ListName};

/// Failures that abort list generation.
///
/// Lookup misses and ties between duplicates are not errors; they are
/// logged and reported alongside the result instead.
#[derive(Debug, thiserror::Error)]
pub enum ListsError {
    #[error("{remaining} items left unassigned in {pool}")]
    DataIntegrity { pool: PoolLabel, remaining: usize },

    #[error("item {item} is on list {first} and on list {second}")]
    Overlap {
        item: ItemNumber,
        first: ListName,
        second: ListName,
    },

    #[error("lists A, B and C differ by more than one item: {sizes:?}")]
    Unbalanced { sizes: [usize; 3] },

    #[error("AoA bin {bin} has no candidates for list {list}")]
    EmptyAoaBin { list: ListName, bin: usize },

    #[error("not enough items in {pool}: {source}")]
    NotEnoughItems {
        pool: PoolLabel,
        #[source]
        source: NotEnoughItems,
    },

    #[error("frequency quantiles {edges:?} are not strictly increasing; cannot form {bins} bins")]
    DuplicateBinEdges { bins: usize, edges: Vec<f64> },

    #[error("cannot form {bins} bins from {values} values")]
    TooFewValues { bins: usize, values: usize },

    #[error("line {line}: {message}")]
    Table { line: usize, message: String },
}

/// Which pool an error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolLabel {
    FrequencyBin(usize),
    MissingFrequency,
    Repeated(ListName),
}

impl std::fmt::Display for PoolLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolLabel::FrequencyBin(bin) => write!(f, "frequency bin {bin}"),
            PoolLabel::MissingFrequency => write!(f, "the missing-frequency pool"),
            PoolLabel::Repeated(list) => write!(f, "the repeated-item pool of list {list}"),
        }
    }
}
