use serde::Serialize;

use crate::domain::{cart::Cart, favorites::Favorites};
use crate::error::StoreError;

/// State owned by one visitor between requests.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Session {
    pub user: Option<String>,
    pub cart: Cart,
    pub favorites: Favorites,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the logged-in user, or `NotAuthenticated`.
    pub fn require_user(&self) -> Result<&str, StoreError> {
        match self.user.as_deref() {
            Some(name) if !name.trim().is_empty() => Ok(name),
            _ => Err(StoreError::NotAuthenticated),
        }
    }

    /// Returns the session to its anonymous, empty state.
    pub fn reset(&mut self) {
        self.user = None;
        self.cart.clear();
        self.favorites.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_user_is_not_authenticated() {
        let mut session = Session::new();
        assert!(matches!(
            session.require_user(),
            Err(StoreError::NotAuthenticated)
        ));

        session.user = Some(String::new());
        assert!(session.require_user().is_err());

        session.user = Some("maria".to_owned());
        assert_eq!(session.require_user().unwrap(), "maria");
    }
}
