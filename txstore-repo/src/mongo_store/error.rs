use crate::transaction_store::StoreError;
use mongodb::error::{Error, ErrorKind};

pub(crate) const NAMESPACE_NOT_FOUND: i32 = 26;
pub(crate) const NAMESPACE_EXISTS: i32 = 48;
const INDEX_OPTIONS_CONFLICT: i32 = 85;
const INDEX_KEY_SPECS_CONFLICT: i32 = 86;

pub(crate) fn command_code(err: &Error) -> Option<i32> {
    match err.kind.as_ref() {
        ErrorKind::Command(command_error) => Some(command_error.code),
        _ => None,
    }
}

fn is_unreachable(err: &Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::Authentication { .. }
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::DnsResolve { .. }
    )
}

/// Maps a driver error onto the store taxonomy, keeping `context` in the chain.
pub(crate) fn classify(err: Error, context: String) -> StoreError {
    if is_unreachable(&err) {
        StoreError::Unreachable(anyhow::Error::new(err).context(context))
    } else {
        StoreError::Other(anyhow::Error::new(err).context(context))
    }
}

pub(crate) fn classify_index(err: Error, index_name: &str) -> StoreError {
    match command_code(&err) {
        Some(INDEX_OPTIONS_CONFLICT | INDEX_KEY_SPECS_CONFLICT) => {
            StoreError::IndexConflict(index_name.to_owned())
        }
        _ => classify(err, format!("Unable to create index {}", index_name)),
    }
}
