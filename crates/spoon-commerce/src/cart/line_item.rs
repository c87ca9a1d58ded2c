//! Cart line items.

use crate::cart::identity::fingerprint;
use crate::error::CartError;
use crate::ids::LineId;
use crate::menu::{MenuItem, SelectedOptions};
use crate::money::Money;
use std::sync::Arc;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 99;

/// One row of the cart: a menu item, its chosen options, and a quantity.
///
/// The option selection is immutable once the line exists; a different
/// selection produces a different fingerprint and therefore a different
/// line. Only the quantity changes in place, and `line_total` is
/// recomputed whenever it does.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Merge key derived from the item id and options.
    pub id: LineId,
    /// The catalog item, shared and read-only.
    pub menu_item: Arc<MenuItem>,
    /// Quantity in `[1, 99]`.
    pub quantity: u32,
    /// Chosen customization, if any.
    pub selected_options: Option<SelectedOptions>,
    /// Base price plus option deltas.
    pub unit_price: Money,
    /// `unit_price * quantity`.
    pub line_total: Money,
}

impl LineItem {
    /// Create a new line item.
    ///
    /// Returns `InvalidQuantity` outside `[1, 99]`, `Overflow` if the
    /// line total cannot be represented.
    pub fn new(
        menu_item: Arc<MenuItem>,
        quantity: u32,
        selected_options: Option<SelectedOptions>,
    ) -> Result<Self, CartError> {
        if !(1..=MAX_QUANTITY_PER_ITEM).contains(&quantity) {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let id = fingerprint(&menu_item.id, selected_options.as_ref());
        let unit_price = unit_price(&menu_item, selected_options.as_ref());
        let line_total = unit_price
            .checked_mul(quantity as i64)
            .ok_or(CartError::Overflow)?;

        Ok(Self {
            id,
            menu_item,
            quantity,
            selected_options,
            unit_price,
            line_total,
        })
    }

    /// Update the line total after a quantity change.
    pub(crate) fn update_total(&mut self) -> Result<(), CartError> {
        self.line_total = self
            .unit_price
            .checked_mul(self.quantity as i64)
            .ok_or(CartError::Overflow)?;
        Ok(())
    }
}

/// Unit price for a menu item with the given option selection.
pub fn unit_price(item: &MenuItem, options: Option<&SelectedOptions>) -> Money {
    let mut price = item.price;
    if let Some(options) = options {
        for choice in options.values() {
            price = price + choice.price;
        }
    }
    price
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::OptionChoice;

    fn margherita() -> Arc<MenuItem> {
        Arc::new(MenuItem::new(
            "dish-1",
            "Margherita Pizza",
            "Pizza",
            Money::from_rupees(299),
        ))
    }

    fn large_size() -> SelectedOptions {
        let mut options = SelectedOptions::new();
        options.insert(
            "Size".to_string(),
            OptionChoice::new("Large", Money::from_rupees(50)),
        );
        options
    }

    #[test]
    fn test_new_computes_totals() {
        let line = LineItem::new(margherita(), 2, None).unwrap();
        assert_eq!(line.unit_price, Money::from_rupees(299));
        assert_eq!(line.line_total, Money::from_rupees(598));
        assert_eq!(line.id.as_str(), "dish-1");
    }

    #[test]
    fn test_options_feed_unit_price() {
        let line = LineItem::new(margherita(), 1, Some(large_size())).unwrap();
        assert_eq!(line.unit_price, Money::from_rupees(349));
        assert_eq!(line.id.as_str(), "dish-1-Size:Large");
    }

    #[test]
    fn test_quantity_bounds() {
        assert_eq!(
            LineItem::new(margherita(), 0, None),
            Err(CartError::InvalidQuantity(0))
        );
        assert_eq!(
            LineItem::new(margherita(), 100, None),
            Err(CartError::InvalidQuantity(100))
        );
        assert!(LineItem::new(margherita(), 99, None).is_ok());
    }

    #[test]
    fn test_update_total_tracks_quantity() {
        let mut line = LineItem::new(margherita(), 1, None).unwrap();
        line.quantity = 3;
        line.update_total().unwrap();
        assert_eq!(line.line_total, Money::from_rupees(897));
    }
}
