use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, TransactionTrait};
use serde::Serialize;
use tracing::{error, info};

use crate::domain::{CartLine, Session, MAX_LINE_QUANTITY};
use crate::entities::sale;
use crate::error::StoreError;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Receipt {
    pub username: String,
    pub records: Vec<sale::Model>,
    pub total: f64,
}

/// Moves the session cart into the sales ledger for the logged-in user.
///
/// All lines are written in one transaction. On any failure nothing is
/// recorded and the cart is left as it was. Product stock is not touched.
pub async fn checkout<C>(db: &C, session: &mut Session) -> Result<Receipt, StoreError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let username = session.require_user()?.to_owned();
    let records = record_sales(db, session.cart.lines(), &username, Utc::now()).await?;
    let total = session.cart.total();
    session.cart.clear();

    info!(%username, lines = records.len(), total, "Checkout completed");
    Ok(Receipt {
        username,
        records,
        total,
    })
}

/// Appends one ledger row per cart line, all stamped with `at`.
pub async fn record_sales<C>(
    db: &C,
    lines: &[CartLine],
    username: &str,
    at: DateTime<Utc>,
) -> Result<Vec<sale::Model>, StoreError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let rows = lines
        .iter()
        .map(|line| {
            let quantity =
                i32::try_from(line.quantity).map_err(|_| StoreError::QuantityLimit {
                    requested: u64::from(line.quantity),
                    limit: MAX_LINE_QUANTITY,
                })?;
            Ok(sale::ActiveModel {
                product_name: Set(line.product_name.clone()),
                quantity: Set(quantity),
                unit_price: Set(line.unit_price),
                subtotal: Set(line.subtotal),
                username: Set(username.to_owned()),
                created_at: Set(at),
                ..Default::default()
            })
        })
        .collect::<Result<Vec<_>, StoreError>>()?;

    let txn = db.begin().await?;
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        match row.insert(&txn).await {
            Ok(record) => records.push(record),
            Err(err) => {
                error!(%username, %err, "Failed to record sale, rolling back checkout");
                let _ = txn.rollback().await;
                return Err(err.into());
            }
        }
    }
    txn.commit().await?;

    Ok(records)
}
