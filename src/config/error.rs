//! Load errors

use std::path::PathBuf;

use super::loader::Format;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The destination does not serialize to a struct or map, so it has no
    /// fields to bind.
    #[error("invalid destination: {0}")]
    InvalidDestination(String),

    #[error("failed reading config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {format} in config file {}: {message}", path.display())]
    Parse { path: PathBuf, format: Format, message: String },

    /// A merged value could not be converted into its field's type.
    #[error(transparent)]
    Bind(#[from] figment::Error),

    /// Returned verbatim from [`Config::validate`](super::Config::validate).
    #[error(transparent)]
    Validation(anyhow::Error),
}
