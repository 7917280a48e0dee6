use mongodb::error::{Error as StoreError, ErrorKind, WriteFailure};
use thiserror::Error;

/// Server error code returned when creating a collection that exists.
pub(crate) const NAMESPACE_EXISTS: i32 = 48;
/// Server error code returned when a write fails collection validation.
pub(crate) const DOCUMENT_VALIDATION_FAILURE: i32 = 121;

/// Errors surfaced by migration steps. No local recovery happens here;
/// every failure propagates verbatim to whoever sequences the steps.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("collection `{collection}` already exists")]
    CollectionAlreadyExists { collection: String },

    #[error("document rejected by the collection validator: {detail}")]
    SchemaViolation { detail: String },

    #[error("store unavailable")]
    StoreUnavailable {
        #[source]
        source: StoreError,
    },

    #[error("refusing to drop database `{database}` without explicit confirmation")]
    RevertNotConfirmed { database: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl MigrationError {
    /// Map a driver error onto the taxonomy. Server codes we recognize get
    /// a dedicated variant, transport-level failures become
    /// `StoreUnavailable`, everything else passes through untouched.
    pub fn from_store(err: StoreError, collection: &str) -> Self {
        if let Some((code, message)) = server_code(&err) {
            if let Some(classified) = classify_code(code, collection, &message) {
                return classified;
            }
        }
        if is_unavailable(&err) {
            return Self::StoreUnavailable { source: err };
        }
        Self::Store(err)
    }
}

fn server_code(err: &StoreError) -> Option<(i32, String)> {
    match err.kind.as_ref() {
        ErrorKind::Command(c) => Some((c.code, c.message.clone())),
        ErrorKind::Write(WriteFailure::WriteError(w)) => Some((w.code, w.message.clone())),
        ErrorKind::Write(WriteFailure::WriteConcernError(w)) => Some((w.code, w.message.clone())),
        _ => None,
    }
}

fn is_unavailable(err: &StoreError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::Authentication { .. }
    )
}

fn classify_code(code: i32, collection: &str, message: &str) -> Option<MigrationError> {
    match code {
        NAMESPACE_EXISTS => Some(MigrationError::CollectionAlreadyExists {
            collection: collection.to_string(),
        }),
        DOCUMENT_VALIDATION_FAILURE => Some(MigrationError::SchemaViolation {
            detail: message.to_string(),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_48_maps_to_collection_already_exists() {
        let err = classify_code(NAMESPACE_EXISTS, "users", "Collection already exists")
            .expect("code 48 should classify");
        assert!(
            matches!(err, MigrationError::CollectionAlreadyExists { collection } if collection == "users")
        );
    }

    #[test]
    fn code_121_maps_to_schema_violation() {
        let err = classify_code(DOCUMENT_VALIDATION_FAILURE, "users", "Document failed validation")
            .expect("code 121 should classify");
        assert!(
            matches!(err, MigrationError::SchemaViolation { detail } if detail.contains("failed validation"))
        );
    }

    #[test]
    fn unknown_codes_pass_through() {
        assert!(classify_code(11000, "users", "duplicate key").is_none());
        assert!(classify_code(0, "users", "").is_none());
    }
}
