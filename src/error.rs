use std::path::PathBuf;

/// Fatal errors. All of these abort a run before the first probe is sent.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Error reading the {list} file {}: {source}", .path.display())]
    Config {
        list: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl ScanError {
    pub fn config(list: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Config { list, path: path.into(), source }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Network or protocol failure of a single probe. Never fatal to the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{description}")]
pub struct TransportError {
    pub description: String,
}

impl TransportError {
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into() }
    }

    /// Flatten an error and its `source()` chain into one line.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut parts = vec![err.to_string()];
        let mut cause = err.source();
        while let Some(c) = cause {
            let text = c.to_string();
            // hyper and reqwest sometimes repeat the same message one level down
            if parts.last() != Some(&text) {
                parts.push(text);
            }
            cause = c.source();
        }
        Self::new(parts.join(": "))
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
