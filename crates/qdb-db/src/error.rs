use std::path::PathBuf;

/// Failures that affect a whole query batch against the container.
///
/// Per-message problems never surface here; the decoder turns them into
/// sentinel text instead.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("container file {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("container query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
