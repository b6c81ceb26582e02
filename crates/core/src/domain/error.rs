use thiserror::Error;

/// Reasons a submitted receipt is rejected before it reaches scoring or identity.
///
/// The `Display` output is the exact message returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("At least one of the required categories doesn't exist")]
    MissingFields,

    #[error("Invalid items array. Make sure that there are items in receipt.")]
    InvalidItems,

    #[error("Make sure that item details are in correct format")]
    InvalidItem,

    #[error("Make sure that total is in the correct format.")]
    InvalidTotal,

    #[error("Make sure that purchase date and time are in the correct format.")]
    InvalidPurchaseDateTime,
}
