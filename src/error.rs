use thiserror::Error;

/// Recoverable failures surfaced by asset loading and startup.
///
/// None of these stop the render loop: asset errors are logged and replaced
/// by a fallback subtree, missing DOM pieces disable the feature that needs them.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("fetch {url} failed: {reason}")]
    AssetFetch { url: String, reason: String },
    #[error("parse {url} failed: {reason}")]
    AssetParse { url: String, reason: String },
    #[error("missing #{0}")]
    MissingElement(&'static str),
    #[error("gpu: {0}")]
    Gpu(String),
}

impl ViewerError {
    pub fn parse(url: &str, reason: impl ToString) -> Self {
        Self::AssetParse {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn fetch(url: &str, reason: impl ToString) -> Self {
        Self::AssetFetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
