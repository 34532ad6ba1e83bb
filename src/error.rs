use std::path::PathBuf;
use thiserror::Error;

pub type SessionResult<T> = Result<T, SessionError>;

/// Failure classes a user can be shown. Nothing here is fatal to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Missing file or selections; reported before any network call.
    UserInput,
    /// Network failure or a body that is not JSON.
    Transport,
    /// JSON body without the expected success key.
    Semantic,
    /// A request is already in flight.
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("selection {index} does not exist (list has {len} entries)")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserInputError {
    #[error("Please upload a file before fetching graph options.")]
    NoDataset,
    #[error("Please select at least one graph.")]
    NoSelections,
    #[error("Fetch the graph options before generating graphs.")]
    CatalogNotLoaded,
    #[error("File not found: {}", .0.display())]
    DatasetNotFound(PathBuf),
    #[error("Unsupported file type: {}. Accepted: {accepted}", .path.display())]
    UnsupportedFormat { path: PathBuf, accepted: String },
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("could not read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("server returned a non-JSON response (HTTP {status}): {source}")]
    InvalidBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] UserInputError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("server response has no `{key}`{}", .detail.as_ref().map(|d| format!(": {d}")).unwrap_or_default())]
    Semantic {
        key: &'static str,
        detail: Option<String>,
    },
    #[error("another request is still in flight")]
    Busy,
}

impl SessionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Input(_) | Self::Selection(_) => FailureKind::UserInput,
            Self::Transport(_) => FailureKind::Transport,
            Self::Semantic { .. } => FailureKind::Semantic,
            Self::Busy => FailureKind::Busy,
        }
    }
}
