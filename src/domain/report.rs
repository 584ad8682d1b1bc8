//! Read-only aggregations over ledger rows.
//!
//! Every function accepts an empty slice and returns zero totals or empty
//! sequences for it.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::entities::sale;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Totals {
    /// Number of ledger rows.
    pub sales: usize,
    pub revenue: f64,
    pub quantity: i64,
}

pub fn totals(records: &[sale::Model]) -> Totals {
    records.iter().fold(Totals::default(), |mut acc, record| {
        acc.sales += 1;
        acc.revenue += record.subtotal;
        acc.quantity += i64::from(record.quantity);
        acc
    })
}

/// Number of distinct buyers.
pub fn unique_customers(records: &[sale::Model]) -> usize {
    records
        .iter()
        .map(|record| record.username.as_str())
        .collect::<HashSet<_>>()
        .len()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Month,
}

impl Granularity {
    fn truncate(self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Month => date.with_day(1).unwrap_or(date),
        }
    }

    fn label(self, date: NaiveDate) -> String {
        match self {
            Granularity::Day => date.format("%Y-%m-%d").to_string(),
            Granularity::Month => date.format("%Y-%m").to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PeriodBucket {
    pub period: String,
    pub revenue: f64,
    pub quantity: i64,
}

/// Sums revenue and units per UTC day or month, oldest bucket first.
pub fn by_period(records: &[sale::Model], granularity: Granularity) -> Vec<PeriodBucket> {
    let mut buckets: BTreeMap<NaiveDate, (f64, i64)> = BTreeMap::new();
    for record in records {
        let key = granularity.truncate(record.created_at.date_naive());
        let bucket = buckets.entry(key).or_default();
        bucket.0 += record.subtotal;
        bucket.1 += i64::from(record.quantity);
    }

    buckets
        .into_iter()
        .map(|(date, (revenue, quantity))| PeriodBucket {
            period: granularity.label(date),
            revenue,
            quantity,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductRanking {
    pub product_name: String,
    pub quantity: i64,
    pub revenue: f64,
}

/// Best sellers by units sold. Equal quantities keep the order in which the
/// products first appear in `records`.
pub fn top_products(records: &[sale::Model], n: usize) -> Vec<ProductRanking> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut ranking: Vec<ProductRanking> = Vec::new();

    for record in records {
        let slot = *index
            .entry(record.product_name.as_str())
            .or_insert_with(|| {
                ranking.push(ProductRanking {
                    product_name: record.product_name.clone(),
                    quantity: 0,
                    revenue: 0.0,
                });
                ranking.len() - 1
            });
        let entry = &mut ranking[slot];
        entry.quantity += i64::from(record.quantity);
        entry.revenue += record.subtotal;
    }

    ranking.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    ranking.truncate(n);
    ranking
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CustomerRanking {
    pub username: String,
    pub revenue: f64,
    pub quantity: i64,
    /// Ledger rows attributed to the customer.
    pub purchases: usize,
}

/// Biggest spenders by revenue, ties in first-appearance order.
pub fn top_customers(records: &[sale::Model], n: usize) -> Vec<CustomerRanking> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut ranking: Vec<CustomerRanking> = Vec::new();

    for record in records {
        let slot = *index.entry(record.username.as_str()).or_insert_with(|| {
            ranking.push(CustomerRanking {
                username: record.username.clone(),
                revenue: 0.0,
                quantity: 0,
                purchases: 0,
            });
            ranking.len() - 1
        });
        let entry = &mut ranking[slot];
        entry.revenue += record.subtotal;
        entry.quantity += i64::from(record.quantity);
        entry.purchases += 1;
    }

    ranking.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    ranking.truncate(n);
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{at, sale_record};

    fn ledger() -> Vec<sale::Model> {
        vec![
            sale_record(1, "A", 4, 10.0, "maria", at(2024, 5, 1, 9)),
            sale_record(2, "B", 3, 20.0, "joao", at(2024, 5, 1, 18)),
            sale_record(3, "C", 10, 1.0, "maria", at(2024, 5, 20, 12)),
            sale_record(4, "A", 6, 10.0, "ana", at(2024, 6, 2, 8)),
        ]
    }

    #[test]
    fn empty_ledger_aggregates_to_nothing() {
        assert_eq!(totals(&[]), Totals::default());
        assert_eq!(unique_customers(&[]), 0);
        assert!(by_period(&[], Granularity::Day).is_empty());
        assert!(top_products(&[], 5).is_empty());
        assert!(top_customers(&[], 5).is_empty());
    }

    #[test]
    fn totals_sum_subtotal_and_quantity() {
        let totals = totals(&ledger());
        assert_eq!(totals.sales, 4);
        assert_eq!(totals.revenue, 40.0 + 60.0 + 10.0 + 60.0);
        assert_eq!(totals.quantity, 23);
        assert_eq!(unique_customers(&ledger()), 3);
    }

    #[test]
    fn daily_and_monthly_buckets_are_chronological() {
        let mut records = ledger();
        records.reverse();

        let daily = by_period(&records, Granularity::Day);
        let labels: Vec<&str> = daily.iter().map(|bucket| bucket.period.as_str()).collect();
        assert_eq!(labels, ["2024-05-01", "2024-05-20", "2024-06-02"]);
        assert_eq!(daily[0].revenue, 100.0);
        assert_eq!(daily[0].quantity, 7);

        let monthly = by_period(&records, Granularity::Month);
        assert_eq!(
            monthly,
            vec![
                PeriodBucket {
                    period: "2024-05".to_owned(),
                    revenue: 110.0,
                    quantity: 17,
                },
                PeriodBucket {
                    period: "2024-06".to_owned(),
                    revenue: 60.0,
                    quantity: 6,
                },
            ]
        );
    }

    #[test]
    fn top_products_ties_keep_group_order() {
        let when = at(2024, 1, 1, 0);
        let records = vec![
            sale_record(1, "A", 10, 1.0, "u", when),
            sale_record(2, "B", 3, 1.0, "u", when),
            sale_record(3, "C", 10, 1.0, "u", when),
        ];

        let top: Vec<String> = top_products(&records, 5)
            .into_iter()
            .map(|ranking| ranking.product_name)
            .collect();
        assert_eq!(top, ["A", "C", "B"]);
        assert_eq!(top_products(&records, 2).len(), 2);
    }

    #[test]
    fn top_products_groups_by_name() {
        let top = top_products(&ledger(), 5);
        assert_eq!(top[0].product_name, "A");
        assert_eq!(top[0].quantity, 10);
        assert_eq!(top[0].revenue, 100.0);
        assert_eq!(top.len(), 3);
    }

    #[test]
    fn top_customers_rank_by_revenue() {
        let top = top_customers(&ledger(), 5);
        let order: Vec<&str> = top.iter().map(|c| c.username.as_str()).collect();
        // joao and ana tie on 60.0; joao bought first.
        assert_eq!(order, ["joao", "ana", "maria"]);
        assert_eq!(
            top[2],
            CustomerRanking {
                username: "maria".to_owned(),
                revenue: 50.0,
                quantity: 14,
                purchases: 2,
            }
        );
        assert_eq!(top_customers(&ledger(), 1).len(), 1);
    }
}
