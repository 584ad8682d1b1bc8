use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Result of favoriting a product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteOutcome {
    Added,
    AlreadyFavorited,
}

/// Ordered set of favorited product names, in the order they were added.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(Vec<String>);

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, product_name: &str) -> FavoriteOutcome {
        if self.contains(product_name) {
            return FavoriteOutcome::AlreadyFavorited;
        }
        self.0.push(product_name.to_owned());
        FavoriteOutcome::Added
    }

    pub fn remove(&mut self, product_name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|name| name != product_name);
        self.0.len() != before
    }

    pub fn contains(&self, product_name: &str) -> bool {
        self.0.iter().any(|name| name == product_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Encodes the set for the `users.favorites` column.
    pub fn to_stored(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Decodes the `users.favorites` column.
    ///
    /// A JSON array is the current format. Anything else is read as the older
    /// comma-delimited list, which cannot represent names containing a comma.
    pub fn from_stored(stored: Option<&str>) -> Result<Self, StoreError> {
        let raw = match stored.map(str::trim) {
            None | Some("") => return Ok(Self::new()),
            Some(raw) => raw,
        };

        let names: Vec<String> = if raw.starts_with('[') {
            serde_json::from_str(raw)?
        } else {
            raw.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect()
        };

        let mut favorites = Self::new();
        for name in &names {
            favorites.add(name);
        }
        Ok(favorites)
    }
}

impl<'a> FromIterator<&'a str> for Favorites {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut favorites = Favorites::new();
        for name in iter {
            favorites.add(name);
        }
        favorites
    }
}
