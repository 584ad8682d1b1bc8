use std::collections::HashMap;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use crate::domain::report::{
    self, CustomerRanking, Granularity, PeriodBucket, ProductRanking, Totals,
};
use crate::domain::Session;
use crate::entities::sale::{self, Entity as SaleEntity};
use crate::error::StoreError;
use crate::services::catalog::load_products;

/// Rankings shown on the dashboard are capped at this many entries.
pub const TOP_N: usize = 5;

/// Ledger rows in insertion order, optionally for a single user.
pub async fn load_ledger<C: ConnectionTrait>(
    db: &C,
    username: Option<&str>,
) -> Result<Vec<sale::Model>, StoreError> {
    let mut query = SaleEntity::find();
    if let Some(username) = username {
        query = query.filter(sale::Column::Username.eq(username));
    }
    Ok(query.order_by_asc(sale::Column::Id).all(db).await?)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PurchaseHistory {
    pub username: String,
    pub totals: Totals,
    /// Spending per month, oldest first.
    pub monthly: Vec<PeriodBucket>,
    /// Newest first.
    pub purchases: Vec<sale::Model>,
}

pub async fn purchase_history<C: ConnectionTrait>(
    db: &C,
    session: &Session,
) -> Result<PurchaseHistory, StoreError> {
    let username = session.require_user()?;
    let mut purchases = load_ledger(db, Some(username)).await?;

    let totals = report::totals(&purchases);
    let monthly = report::by_period(&purchases, Granularity::Month);
    purchases.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    Ok(PurchaseHistory {
        username: username.to_owned(),
        totals,
        monthly,
        purchases,
    })
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub sales: usize,
    pub revenue: f64,
    pub quantity: i64,
    pub unique_customers: usize,
}

/// A ledger row next to the product's price today.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SaleDetail {
    #[serde(flatten)]
    pub sale: sale::Model,
    /// `None` once the product has left the catalog.
    pub current_price: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dashboard {
    pub summary: DashboardSummary,
    pub daily: Vec<PeriodBucket>,
    pub top_products: Vec<ProductRanking>,
    pub top_customers: Vec<CustomerRanking>,
    pub sales: Vec<SaleDetail>,
}

/// Store-wide sales report. Only `admin_username` may open it; the check is a
/// name comparison, not an access-control system.
pub async fn dashboard<C: ConnectionTrait>(
    db: &C,
    session: &Session,
    admin_username: &str,
) -> Result<Dashboard, StoreError> {
    if session.require_user()? != admin_username {
        return Err(StoreError::AccessDenied);
    }

    let ledger = load_ledger(db, None).await?;
    let prices: HashMap<String, f64> = load_products(db)
        .await?
        .into_iter()
        .map(|product| (product.name, product.price))
        .collect();

    let totals = report::totals(&ledger);
    let summary = DashboardSummary {
        sales: totals.sales,
        revenue: totals.revenue,
        quantity: totals.quantity,
        unique_customers: report::unique_customers(&ledger),
    };

    Ok(Dashboard {
        summary,
        daily: report::by_period(&ledger, Granularity::Day),
        top_products: report::top_products(&ledger, TOP_N),
        top_customers: report::top_customers(&ledger, TOP_N),
        sales: ledger
            .into_iter()
            .map(|sale| SaleDetail {
                current_price: prices.get(&sale.product_name).copied(),
                sale,
            })
            .collect(),
    })
}
