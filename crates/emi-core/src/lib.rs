pub mod currency;
pub mod error;
pub mod loan;
pub mod types;

pub use error::EmiCoreError;
pub use types::*;

/// Standard result type for fallible emi-core operations.
///
/// The EMI computation itself is infallible; this covers the ambient
/// surfaces (JSON decoding) only.
pub type EmiCoreResult<T> = Result<T, EmiCoreError>;
