//! Storefront actions. Each one takes the caller's [`Session`](crate::domain::Session)
//! and a database connection, applies one state change and returns its result.

pub mod accounts;
pub mod catalog;
pub mod checkout;
pub mod reporting;

#[cfg(test)]
pub(crate) mod test_support;
