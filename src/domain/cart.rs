use serde::Serialize;

use crate::error::StoreError;

/// Largest quantity a single line may hold, bounded by the ledger's integer column.
pub const MAX_LINE_QUANTITY: u32 = i32::MAX as u32;

/// A pending purchase of one product. `unit_price` is the price seen on the
/// first add and is never refreshed while the line lives.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CartLine {
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub subtotal: f64,
}

impl CartLine {
    fn new(product_name: &str, unit_price: f64, quantity: u32) -> Self {
        CartLine {
            product_name: product_name.to_owned(),
            unit_price,
            quantity,
            subtotal: unit_price * f64::from(quantity),
        }
    }
}

/// Session-scoped collection of cart lines, at most one per product name.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of a product, merging into an existing line. A line
    /// never grows past [`MAX_LINE_QUANTITY`]; such an add is rejected whole.
    pub fn add_item(
        &mut self,
        product_name: &str,
        unit_price: f64,
        quantity: u32,
    ) -> Result<&CartLine, StoreError> {
        if quantity == 0 {
            return Err(StoreError::InvalidQuantity(quantity));
        }

        let position = self
            .lines
            .iter()
            .position(|line| line.product_name == product_name);

        let current = position.map_or(0, |index| self.lines[index].quantity);
        let requested = u64::from(current) + u64::from(quantity);
        if requested > u64::from(MAX_LINE_QUANTITY) {
            return Err(StoreError::QuantityLimit {
                requested,
                limit: MAX_LINE_QUANTITY,
            });
        }

        let index = match position {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity += quantity;
                line.subtotal = line.unit_price * f64::from(line.quantity);
                index
            }
            None => {
                self.lines
                    .push(CartLine::new(product_name, unit_price, quantity));
                self.lines.len() - 1
            }
        };

        Ok(&self.lines[index])
    }

    /// Drops the line for `product_name`. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_name: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_name != product_name);
        self.lines.len() != before
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(|line| line.subtotal).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
