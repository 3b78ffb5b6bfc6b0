use thiserror::Error;

use crate::store::StoreError;
use crate::types::{AmountInputError, DecodeError, SessionError};

/// Unified error type covering decoding, amount-input conversion, session
/// transitions, and the policy store.
///
/// Convenient for callers driving a whole edit flow with `?`; each variant
/// keeps its own human-readable message.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    AmountInput(#[from] AmountInputError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
