use std::path::PathBuf;

use thiserror::Error;

/// Why a reaction or name-table line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// The line has no `": "` between the reaction name and the equation.
    MissingSeparator,
    /// The equation has no `<=>`/`=>` arrow, or has text the parser cannot read.
    InvalidEquation,
    /// A name-table line has no tab between the id and its names.
    MissingTab,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            MalformedReason::MissingSeparator => "missing \": \" separator",
            MalformedReason::InvalidEquation => "expected `<=>` or `=>` between two sides",
            MalformedReason::MissingTab => "missing tab between id and names",
        };
        f.write_str(msg)
    }
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Invalid line {line} ({reason}): \"{content}\"")]
    MalformedInput {
        /// 1-based line number within the batch or file.
        line: usize,
        content: String,
        reason: MalformedReason,
    },
    #[error("Vertex not found: {0}")]
    VertexNotFound(String),
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
    #[error("Failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
