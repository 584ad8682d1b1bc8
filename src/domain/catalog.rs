use serde::{Deserialize, Serialize};

use crate::entities::product;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Catalog (insertion) order.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    StockDesc,
}

/// Filter and ordering applied to a catalog listing.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CatalogQuery {
    /// Exact category name; `None` or a blank name matches any category.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min: Option<f64>,
    /// Inclusive upper price bound.
    pub max: Option<f64>,
    #[serde(default)]
    pub sort: SortMode,
}

impl CatalogQuery {
    fn matches(&self, product: &product::Model) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .filter(|category| !category.trim().is_empty())
            .map_or(true, |category| product.category == category);
        let min_ok = self.min.map_or(true, |min| product.price >= min);
        let max_ok = self.max.map_or(true, |max| product.price <= max);

        category_ok && min_ok && max_ok
    }

    /// Returns the matching products in the requested order. Ties keep their
    /// catalog order.
    pub fn apply(&self, catalog: &[product::Model]) -> Vec<product::Model> {
        let mut selected: Vec<product::Model> = catalog
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect();

        // `sort_by` is stable.
        match self.sort {
            SortMode::Default => {}
            SortMode::PriceAsc => selected.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortMode::PriceDesc => selected.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortMode::StockDesc => selected.sort_by(|a, b| b.stock.cmp(&a.stock)),
        }

        selected
    }
}

/// Values a catalog filter can choose from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Facets {
    /// Distinct categories in order of first appearance.
    pub categories: Vec<String>,
    pub min_price: f64,
    pub max_price: f64,
}

impl Facets {
    pub fn from_catalog(catalog: &[product::Model]) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for product in catalog {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }

        let prices = catalog.iter().map(|product| product.price);
        let min_price = prices.clone().reduce(f64::min).unwrap_or(0.0);
        let max_price = prices.reduce(f64::max).unwrap_or(0.0);

        Facets {
            categories,
            min_price,
            max_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::seed_catalog;

    fn names(products: &[product::Model]) -> Vec<&str> {
        products.iter().map(|product| product.name.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_whole_catalog_in_order() {
        let catalog = seed_catalog();
        let result = CatalogQuery::default().apply(&catalog);
        assert_eq!(result, catalog);
    }

    #[test]
    fn category_filter_on_seed_catalog() {
        let catalog = seed_catalog();
        let query = CatalogQuery {
            category: Some("Higiene".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            names(&query.apply(&catalog)),
            ["Shampoo Sólido", "Condicionador Natural", "Sabonete Líquido"]
        );

        let sorted = CatalogQuery {
            sort: SortMode::PriceAsc,
            ..query
        }
        .apply(&catalog);
        assert_eq!(
            names(&sorted),
            ["Shampoo Sólido", "Condicionador Natural", "Sabonete Líquido"]
        );
        let prices: Vec<f64> = sorted.iter().map(|product| product.price).collect();
        assert_eq!(prices, [42.50, 45.75, 47.90]);
    }

    #[test]
    fn price_interval_is_closed() {
        let catalog = seed_catalog();
        let query = CatalogQuery {
            min: Some(45.75),
            max: Some(56.90),
            sort: SortMode::PriceDesc,
            ..Default::default()
        };
        assert_eq!(
            names(&query.apply(&catalog)),
            ["Polpa Hidratante", "Sabonete Líquido", "Condicionador Natural"]
        );
    }

    #[test]
    fn stock_sort_breaks_ties_by_catalog_order() {
        let mut catalog = seed_catalog();
        catalog[1].stock = 37;
        let query = CatalogQuery {
            sort: SortMode::StockDesc,
            ..Default::default()
        };
        assert_eq!(
            names(&query.apply(&catalog)),
            [
                "Condicionador Natural",
                "Polpa Hidratante",
                "Polpa Esfoliante",
                "Sabonete Líquido",
                "Shampoo Sólido"
            ]
        );
    }

    #[test]
    fn unknown_category_yields_nothing() {
        let catalog = seed_catalog();
        let query = CatalogQuery {
            category: Some("Maquiagem".to_owned()),
            ..Default::default()
        };
        assert!(query.apply(&catalog).is_empty());
    }

    #[test]
    fn blank_category_means_any() {
        let catalog = seed_catalog();
        for blank in ["", "  "] {
            let query = CatalogQuery {
                category: Some(blank.to_owned()),
                ..Default::default()
            };
            assert_eq!(query.apply(&catalog), catalog);
        }
    }

    #[test]
    fn facets_of_seed_catalog() {
        let facets = Facets::from_catalog(&seed_catalog());
        assert_eq!(facets.categories, ["Higiene", "Tratamento"]);
        assert_eq!(facets.min_price, 42.50);
        assert_eq!(facets.max_price, 57.10);

        let empty = Facets::from_catalog(&[]);
        assert!(empty.categories.is_empty());
        assert_eq!(empty.min_price, 0.0);
    }
}
