// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a summary run. All of them are fatal.
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{kind} file not found: {}", .path.display())]
    FileNotFound { kind: &'static str, path: PathBuf },

    #[error("failed to parse FASTA {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No contig passed the size cutoff *and* had a taxonomy entry.
    #[error(
        "no overlapping data: none of the {assignments} taxonomy entries matched any of the {contigs} contigs passing the size cutoff"
    )]
    NoOverlap { assignments: usize, contigs: usize },

    /// Ids overlap, but every matched contig is empty.
    #[error("no overlapping data: the {matched} contigs with a taxonomy entry contain no bases")]
    NoAssignedBases { matched: usize },
}

pub type SummaryResult<T> = Result<T, SummaryError>;
