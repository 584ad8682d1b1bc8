use sea_orm::{
    sea_query::OnConflict, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};
use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{Favorites, Session};
use crate::entities::user::{self, Entity as UserEntity};
use crate::error::StoreError;

const MIN_USERNAME_CHARS: usize = 3;

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct Registration {
    #[validate(length(min = 3, message = "username needs at least 3 characters"))]
    pub username: String,
    #[validate(contains(pattern = "@", message = "email must contain '@'"))]
    pub email: String,
}

fn normalize_username(raw: &str) -> Result<String, StoreError> {
    let name = raw.trim();
    if name.chars().count() < MIN_USERNAME_CHARS {
        return Err(StoreError::InvalidUsername(format!(
            "'{name}' is shorter than {MIN_USERNAME_CHARS} characters"
        )));
    }
    Ok(name.to_owned())
}

/// Inserts the user row unless the name is already taken.
async fn ensure_user<C: ConnectionTrait>(
    db: &C,
    name: &str,
    email: Option<&str>,
) -> Result<(), StoreError> {
    let new_user = user::ActiveModel {
        name: Set(name.to_owned()),
        email: Set(email.map(str::to_owned)),
        favorites: Set(None),
        ..Default::default()
    };

    UserEntity::insert(new_user)
        .on_conflict(OnConflict::column(user::Column::Name).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    Ok(())
}

/// Binds `name` to the session. A session that already belongs to `name` is
/// left as it is. One that belongs to someone else is logged out first, so the
/// previous user's favorites are saved and their cart does not carry over.
async fn attach_user<C: ConnectionTrait>(
    db: &C,
    session: &mut Session,
    name: String,
) -> Result<(), StoreError> {
    match session.user.as_deref() {
        Some(current) if current == name => return Ok(()),
        Some(current) => {
            info!(from = %current, to = %name, "Switching session user");
            logout(db, session).await?;
        }
        None => {}
    }

    let favorites = load_favorites(db, &name).await?;
    session.favorites = favorites;
    session.user = Some(name);
    Ok(())
}

/// Logs `username` into the session. There is no password: the name is the
/// identity. Unknown names get a user row on the spot.
pub async fn login<C: ConnectionTrait>(
    db: &C,
    session: &mut Session,
    username: &str,
) -> Result<(), StoreError> {
    let name = normalize_username(username).inspect_err(|err| warn!(%err, "Rejected login"))?;
    ensure_user(db, &name, None).await?;
    attach_user(db, session, name).await
}

/// Registers a user and logs them in. Registering an existing name keeps the
/// stored row as it is.
pub async fn register<C: ConnectionTrait>(
    db: &C,
    session: &mut Session,
    registration: Registration,
) -> Result<(), StoreError> {
    let registration = Registration {
        username: registration.username.trim().to_owned(),
        email: registration.email.trim().to_owned(),
    };
    if let Err(err) = registration.validate() {
        warn!(username = %registration.username, %err, "Rejected registration");
        return Err(StoreError::InvalidRegistration(err.to_string()));
    }

    ensure_user(db, &registration.username, Some(&registration.email)).await?;
    info!(username = %registration.username, "Registered user");
    attach_user(db, session, registration.username).await
}

/// Saves the session's favorites and returns it to the anonymous state. When
/// saving fails the session is left logged in so the user can retry.
pub async fn logout<C: ConnectionTrait>(db: &C, session: &mut Session) -> Result<(), StoreError> {
    if let Some(name) = session.user.as_deref() {
        save_favorites(db, name, &session.favorites).await?;
    }
    session.reset();
    Ok(())
}

/// Stored favorites of `username`; empty when the user or the column is missing.
pub async fn load_favorites<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> Result<Favorites, StoreError> {
    let stored = UserEntity::find()
        .filter(user::Column::Name.eq(username))
        .one(db)
        .await?;

    match stored {
        Some(model) => Favorites::from_stored(model.favorites.as_deref()),
        None => Ok(Favorites::new()),
    }
}

/// Writes `favorites` for `username`, touching no other column of an existing row.
pub async fn save_favorites<C: ConnectionTrait>(
    db: &C,
    username: &str,
    favorites: &Favorites,
) -> Result<(), StoreError> {
    let row = user::ActiveModel {
        name: Set(username.to_owned()),
        favorites: Set(Some(favorites.to_stored()?)),
        ..Default::default()
    };

    UserEntity::insert(row)
        .on_conflict(
            OnConflict::column(user::Column::Name)
                .update_column(user::Column::Favorites)
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}
