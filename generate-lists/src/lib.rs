pub mod config;
pub mod dedup;
pub mod error;
pub mod familiarization;
pub mod frequencies;
pub mod merge;
pub mod partition;
pub mod pipeline;
pub mod repeated;
pub mod sources;
pub mod stratify;
pub mod table;

pub use config::ListsConfig;
pub use error::ListsError;
