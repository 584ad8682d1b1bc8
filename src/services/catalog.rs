use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use crate::domain::{CartLine, CatalogQuery, Facets, FavoriteOutcome, Session};
use crate::entities::product::{self, Entity as ProductEntity};
use crate::error::StoreError;

/// All products in catalog order.
pub async fn load_products<C: ConnectionTrait>(db: &C) -> Result<Vec<product::Model>, StoreError> {
    Ok(ProductEntity::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?)
}

pub async fn find_by_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<Option<product::Model>, StoreError> {
    Ok(ProductEntity::find()
        .filter(product::Column::Name.eq(name))
        .one(db)
        .await?)
}

async fn require_product<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<product::Model, StoreError> {
    find_by_name(db, name)
        .await?
        .ok_or_else(|| StoreError::ProductNotFound(name.to_owned()))
}

pub async fn browse<C: ConnectionTrait>(
    db: &C,
    query: &CatalogQuery,
) -> Result<Vec<product::Model>, StoreError> {
    let catalog = load_products(db).await?;
    Ok(query.apply(&catalog))
}

/// Products highlighted on the storefront's home page.
pub const FEATURED_PRODUCTS: [&str; 3] =
    ["Shampoo Sólido", "Condicionador Natural", "Polpa Hidratante"];

/// The featured products still in the catalog, in catalog order.
pub async fn featured_products<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<product::Model>, StoreError> {
    Ok(ProductEntity::find()
        .filter(product::Column::Name.is_in(FEATURED_PRODUCTS))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?)
}

pub async fn facets<C: ConnectionTrait>(db: &C) -> Result<Facets, StoreError> {
    let catalog = load_products(db).await?;
    Ok(Facets::from_catalog(&catalog))
}

/// Puts `quantity` units of the named product in the session cart at its
/// current catalog price. Stock is shown to shoppers but never checked.
pub async fn add_to_cart<C: ConnectionTrait>(
    db: &C,
    session: &mut Session,
    product_name: &str,
    quantity: u32,
) -> Result<CartLine, StoreError> {
    if quantity == 0 {
        return Err(StoreError::InvalidQuantity(quantity));
    }
    let product = require_product(db, product_name).await?;
    let line = session
        .cart
        .add_item(&product.name, product.price, quantity)?
        .clone();

    debug!(product = %line.product_name, quantity = line.quantity, "Cart line updated");
    Ok(line)
}

pub fn remove_from_cart(session: &mut Session, product_name: &str) -> bool {
    session.cart.remove_item(product_name)
}

pub async fn add_favorite<C: ConnectionTrait>(
    db: &C,
    session: &mut Session,
    product_name: &str,
) -> Result<FavoriteOutcome, StoreError> {
    session.require_user()?;
    let product = require_product(db, product_name).await?;
    Ok(session.favorites.add(&product.name))
}

pub fn remove_favorite(session: &mut Session, product_name: &str) -> Result<bool, StoreError> {
    session.require_user()?;
    Ok(session.favorites.remove(product_name))
}

/// Favorited products that are still in the catalog, in catalog order.
pub async fn favorite_products<C: ConnectionTrait>(
    db: &C,
    session: &Session,
) -> Result<Vec<product::Model>, StoreError> {
    session.require_user()?;
    let catalog = load_products(db).await?;
    Ok(catalog
        .into_iter()
        .filter(|product| session.favorites.contains(&product.name))
        .collect())
}
