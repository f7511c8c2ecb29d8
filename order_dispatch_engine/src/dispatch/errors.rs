use thiserror::Error;

use crate::traits::StoreError;

/// Failures that escape the per-order rule branches and reach the outer batch boundary.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
}
