//! Shopping cart state and its reducer.
//!
//! The cart is a plain value: handlers load it from the visitor's session,
//! apply one [`CartAction`], and store it back. Every transition recomputes
//! the total, so `total == sum(unit_price * quantity)` always holds.

use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::{Price, ProductId};

/// Largest quantity a single line can hold.
pub const MAX_QUANTITY: u32 = 999;

/// One product-and-quantity pair in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub image: String,
    /// Between 1 and [`MAX_QUANTITY`]; a line that would drop to 0 is
    /// removed instead.
    pub quantity: u32,
}

impl LineItem {
    fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Transitions accepted by [`Cart::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit; appends a new line if the product is not in the cart.
    AddItem(Product),
    /// Set a line's quantity; zero or below removes the line.
    UpdateQuantity { id: ProductId, quantity: i64 },
    RemoveItem(ProductId),
    ClearCart,
}

/// Ordered line items (insertion order) plus the derived total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
    total: Price,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines (the header badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |count, item| count.saturating_add(item.quantity))
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.product_id == id)
    }

    /// Apply one transition in place.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::AddItem(product) => {
                if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
                    item.quantity = item.quantity.saturating_add(1).min(MAX_QUANTITY);
                } else {
                    self.items.push(LineItem::from_product(&product));
                }
            }
            CartAction::UpdateQuantity { id, quantity } => {
                if quantity <= 0 {
                    self.items.retain(|item| item.product_id != id);
                } else if let Some(item) = self.items.iter_mut().find(|i| i.product_id == id) {
                    item.quantity = u32::try_from(quantity)
                        .unwrap_or(MAX_QUANTITY)
                        .min(MAX_QUANTITY);
                }
            }
            CartAction::RemoveItem(id) => {
                self.items.retain(|item| item.product_id != id);
            }
            CartAction::ClearCart => {
                self.items.clear();
            }
        }
        self.recompute_total();
    }

    /// Consuming form of [`Cart::apply`].
    #[must_use]
    pub fn reduce(mut self, action: CartAction) -> Self {
        self.apply(action);
        self
    }

    /// Human-readable line summary for the order sheet:
    /// `"Bengal Tiger Portrait (Qty: 2), Leopard Close-Up (Qty: 1)"`.
    #[must_use]
    pub fn summary(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("{} (Qty: {})", item.name, item.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn recompute_total(&mut self) {
        self.total = self.items.iter().map(LineItem::line_total).sum();
    }
}
