pub mod cisa;

/// A feed fetch fails as a whole: the caller degrades to an empty report
/// instead of aborting the run.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("could not reach feed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("feed returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed feed document: {0}")]
    Malformed(#[from] serde_json::Error),
}
