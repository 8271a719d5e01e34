use thiserror::Error;

use crate::SlotId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The requested anchor is not part of the current window. The view model and the rendered
    /// elements have desynchronised.
    #[error("anchor slot {0} not found in the current window")]
    AnchorNotFound(SlotId),

    #[error("item size must be positive, got {0}")]
    InvalidItemSize(f64),

    /// The strategy asks for more slots than [`crate::RebalanceStrategy::MAX_WINDOW`].
    #[error("rebalance would produce {0} slots")]
    WindowTooLarge(f64),

    #[error("view model has no source items")]
    EmptyView,
}

pub type Result<T> = core::result::Result<T, Error>;
