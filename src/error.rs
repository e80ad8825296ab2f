use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    /// The page source could not be opened or read. Aborts the run.
    #[error("cannot read source {path:?}: {source}")]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed page file {path:?}: {source}")]
    MalformedPages {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No usable headword in a block. Recovered locally: the block is dropped.
    #[error("block on page {page} has no usable headword: {snippet:?}")]
    MalformedBlock { page: usize, snippet: String },

    #[error("no entries survived extraction")]
    EmptyDocument,
}
