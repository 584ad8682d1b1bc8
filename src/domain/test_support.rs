use chrono::{DateTime, TimeZone, Utc};

use crate::entities::{product, sale, SEED_PRODUCTS};

/// The starter catalog as stored rows, ids in insertion order.
pub fn seed_catalog() -> Vec<product::Model> {
    SEED_PRODUCTS
        .into_iter()
        .zip(1..)
        .map(
            |((name, price, stock, category, description, image), id)| product::Model {
                id,
                name: name.to_owned(),
                price,
                stock,
                category: category.to_owned(),
                description: description.to_owned(),
                image: image.to_owned(),
            },
        )
        .collect()
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

pub fn sale_record(
    id: i32,
    product_name: &str,
    quantity: i32,
    unit_price: f64,
    username: &str,
    created_at: DateTime<Utc>,
) -> sale::Model {
    sale::Model {
        id,
        product_name: product_name.to_owned(),
        quantity,
        unit_price,
        subtotal: unit_price * f64::from(quantity),
        username: username.to_owned(),
        created_at,
    }
}
