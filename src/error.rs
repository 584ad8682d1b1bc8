use sea_orm::DbErr;
use thiserror::Error;

/// Failures of a storefront action. None of them are fatal to the process;
/// each one is reported back to whoever triggered the action.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Please log in to continue")]
    NotAuthenticated,
    #[error("Invalid registration: {0}")]
    InvalidRegistration(String),
    #[error("Invalid username: {0}")]
    InvalidUsername(String),
    #[error("Quantity should be at least 1, got {0}")]
    InvalidQuantity(u32),
    #[error("A cart line holds at most {limit} units, this would make it {requested}")]
    QuantityLimit { requested: u64, limit: u32 },
    #[error("No product named '{0}' was found")]
    ProductNotFound(String),
    #[error("Restricted access: administrators only")]
    AccessDenied,
    #[error("Stored favorites could not be read: {0}")]
    CorruptFavorites(String),
    #[error("Persistence failure: {0}")]
    PersistenceFailure(#[from] DbErr),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::CorruptFavorites(err.to_string())
    }
}
