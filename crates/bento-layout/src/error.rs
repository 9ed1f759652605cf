//! Layout engine errors.

use bento_store::StoreError;
use thiserror::Error;

/// Errors from the layout editor.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A snap catalog needs at least one preset.
    #[error("size preset catalog is empty")]
    EmptyCatalog,

    /// The store rejected a committed gesture.
    #[error("store rejected layout change: {0}")]
    Store(#[from] StoreError),
}
