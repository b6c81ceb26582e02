pub mod amount;
pub mod error;
pub mod receipt;
