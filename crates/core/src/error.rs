//! Record error model.

use thiserror::Error;

use crate::record::RecordKind;

/// Result type used when encoding records.
pub type RecordResult<T> = Result<T, RecordError>;

/// Failure to turn a record into its wire format.
///
/// This never crosses the logger boundary: the logger reports it through its
/// printer and drops the record.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The record could not be converted to JSON.
    #[error("unable to marshal {kind} json: {source}")]
    Serialization {
        kind: RecordKind,
        #[source]
        source: serde_json::Error,
    },
}

impl RecordError {
    pub fn serialization(kind: RecordKind, source: serde_json::Error) -> Self {
        Self::Serialization { kind, source }
    }

    /// Kind of the record that failed to encode.
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Serialization { kind, .. } => *kind,
        }
    }
}
