pub mod product;
pub mod sale;
pub mod user;

use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, Schema, Set, TransactionTrait,
};
use tracing::info;

use crate::entities::{
    product::Entity as Product, sale::Entity as Sale, user::Entity as User,
};

/// Creates the three storefront tables unless they already exist.
pub async fn setup_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut create_product_table = schema.create_table_from_entity(Product);
    let mut create_user_table = schema.create_table_from_entity(User);
    let mut create_sale_table = schema.create_table_from_entity(Sale);

    for statement in [
        create_product_table.if_not_exists(),
        create_user_table.if_not_exists(),
        create_sale_table.if_not_exists(),
    ] {
        db.execute(backend.build(&*statement)).await?;
    }

    Ok(())
}

/// `(name, price, stock, category, description, image)` of the starter catalog.
pub const SEED_PRODUCTS: [(&str, f64, i32, &str, &str, &str); 5] = [
    (
        "Shampoo Sólido",
        42.50,
        15,
        "Higiene",
        "Shampoo livre de sulfatos em barra",
        "https://via.placeholder.com/300?text=Shampoo",
    ),
    (
        "Condicionador Natural",
        45.75,
        20,
        "Higiene",
        "Condicionador com óleo de argan",
        "https://via.placeholder.com/300?text=Condicionador",
    ),
    (
        "Polpa Hidratante",
        56.90,
        37,
        "Tratamento",
        "Hidratante corporal com manteiga de karité",
        "https://via.placeholder.com/300?text=Polpa+Hidratante",
    ),
    (
        "Sabonete Líquido",
        47.90,
        17,
        "Higiene",
        "Sabonete vegano com extrato de camomila",
        "https://via.placeholder.com/300?text=Sabonete",
    ),
    (
        "Polpa Esfoliante",
        57.10,
        28,
        "Tratamento",
        "Esfoliante natural com cristais de açúcar",
        "https://via.placeholder.com/300?text=Polpa+Esfoliante",
    ),
];

fn seed_products() -> Vec<product::ActiveModel> {
    SEED_PRODUCTS
        .into_iter()
        .map(
            |(name, price, stock, category, description, image)| product::ActiveModel {
                name: Set(name.to_owned()),
                price: Set(price),
                stock: Set(stock),
                category: Set(category.to_owned()),
                description: Set(description.to_owned()),
                image: Set(image.to_owned()),
                ..Default::default()
            },
        )
        .collect()
}

/// Seeds the catalog on first run. Returns how many products were inserted.
pub async fn seed_catalog<C>(db: &C) -> Result<usize, DbErr>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    if Product::find().count(&txn).await? > 0 {
        txn.rollback().await?;
        return Ok(0);
    }

    let products = seed_products();
    let inserted = products.len();
    Product::insert_many(products).exec(&txn).await?;
    txn.commit().await?;

    info!(inserted, "Seeded empty catalog");
    Ok(inserted)
}
