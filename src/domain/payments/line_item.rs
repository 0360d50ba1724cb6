use serde::{Deserialize, Serialize};

use crate::domain::foundation::Money;

/// One priced component of a transaction.
///
/// The total is never stored; it is derived on read as
/// `quantity * unit_price + tax`, so it cannot drift from the priced
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub quantity: u32,
    pub unit_price: Money,
    pub tax: Money,
}

impl LineItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
        tax: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            quantity,
            unit_price,
            tax,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn total_price(&self) -> Money {
        self.unit_price * self.quantity + self.tax
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_includes_quantity_and_tax() {
        let item = LineItem::new("sku-1", "Widget", 3, Money::from_major(50), Money::from_major(27));
        assert_eq!(item.total_price(), Money::from_major(177));
    }

    #[test]
    fn total_tracks_field_mutation() {
        let mut item =
            LineItem::new("sku-1", "Widget", 1, Money::from_major(50), Money::ZERO);
        item.quantity = 4;
        assert_eq!(item.total_price(), Money::from_major(200));
    }

    #[test]
    fn tax_free_item() {
        let item = LineItem::new("sku-2", "Service", 1, Money::from_major(200), Money::ZERO);
        assert_eq!(item.total_price(), Money::from_major(200));
    }
}
