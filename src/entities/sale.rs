use sea_orm::entity::prelude::*;
use serde::Serialize;

/// One line of a completed checkout. Rows are only ever appended.
///
/// `product_name` and `username` are soft references: the product may have been
/// repriced or removed since, so the sold `unit_price` is kept on the row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub subtotal: f64,
    #[sea_orm(indexed)]
    pub username: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
