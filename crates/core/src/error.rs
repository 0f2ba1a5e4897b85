use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    /// No builtin, resource, or extension matched. Carries the originally
    /// requested name verbatim (for a compound locator, the full locator).
    #[error("no such file to load -- {0}")]
    NotFound(String),
    /// A `~/`-prefixed name was requested but the environment defines no
    /// home directory. Fails the whole resolution; there is no load-path
    /// fallback for home-relative names.
    #[error("couldn't find HOME environment while expanding `{0}`")]
    HomeNotSet(String),
    /// I/O failure opening or decoding a base or nested archive. Distinct
    /// from a missing entry, which is reported as [`LoadError::NotFound`].
    #[error("error reading archive `{path}`: {source}")]
    ArchiveRead {
        path: String,
        source: std::io::Error,
    },
    /// A derived extension class exists but could not be constructed.
    #[error("exception loading extension `{class_name}`: {reason}")]
    Extension { class_name: String, reason: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("host error: {0}")]
    Host(String),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for LoadError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        LoadError::Host(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
