pub mod cart;
pub mod catalog;
pub mod favorites;
pub mod report;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use cart::{Cart, CartLine, MAX_LINE_QUANTITY};
pub use catalog::{CatalogQuery, Facets, SortMode};
pub use favorites::{FavoriteOutcome, Favorites};
pub use report::Granularity;
pub use session::Session;
