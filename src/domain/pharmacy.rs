//! Pharmacy types: catalog entries, cart and orders.
//!
//! Prices are kept in cents to keep totals exact.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Subtotals strictly above this ship for free.
pub const FREE_DELIVERY_THRESHOLD_CENTS: u64 = 5000;

/// Flat delivery fee below the threshold.
pub const DELIVERY_FEE_CENTS: u64 = 599;

/// Quantity bounds accepted on the detail screen.
pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 10;

/// Category filter values. `all` disables the filter.
pub const CATEGORIES: [&str; 6] = [
    "all",
    "pain relief",
    "antibiotics",
    "vitamins",
    "heart",
    "diabetes",
];

/// Format cents as `$12.99`.
#[must_use]
pub fn format_cents(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: String,
    pub name: String,
    pub generic_name: String,
    pub price_cents: u64,
    pub category: String,
    pub in_stock: bool,
    pub prescription: bool,
}

impl Medicine {
    /// Search on name or generic name, then filter by category.
    #[must_use]
    pub fn matches(&self, query: &str, category: &str) -> bool {
        let q = query.trim().to_lowercase();
        let matches_search = q.is_empty()
            || self.name.to_lowercase().contains(&q)
            || self.generic_name.to_lowercase().contains(&q);
        let matches_category = category == "all" || self.category == category;
        matches_search && matches_category
    }
}

/// Long-form product information for the detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineDetail {
    pub description: String,
    pub dosage: String,
    pub side_effects: Vec<String>,
    pub warnings: Vec<String>,
    pub ingredients: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub medicine_id: String,
    pub name: String,
    pub unit_price_cents: u64,
    pub quantity: u32,
    pub prescription: bool,
}

impl CartItem {
    #[must_use]
    pub fn line_total_cents(&self) -> u64 {
        self.unit_price_cents * u64::from(self.quantity)
    }
}

/// Errors from cart manipulation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("Quantity {0} must be between {MIN_QUANTITY} and {MAX_QUANTITY}")]
    InvalidQuantity(u32),

    #[error("{0} is out of stock")]
    OutOfStock(String),

    #[error("Your cart is empty")]
    Empty,
}

/// Shopping cart. Lives for the patient dashboard session only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` of `medicine`, merging with an existing line.
    ///
    /// # Errors
    /// Rejects quantities outside 1..=10 and out-of-stock medicines.
    pub fn add(&mut self, medicine: &Medicine, quantity: u32) -> Result<(), CartError> {
        if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
            return Err(CartError::InvalidQuantity(quantity));
        }
        if !medicine.in_stock {
            return Err(CartError::OutOfStock(medicine.name.clone()));
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.medicine_id == medicine.id) {
            item.quantity += quantity;
        } else {
            self.items.push(CartItem {
                medicine_id: medicine.id.clone(),
                name: medicine.name.clone(),
                unit_price_cents: medicine.price_cents,
                quantity,
                prescription: medicine.prescription,
            });
        }
        Ok(())
    }

    /// Adjust a line's quantity by `delta`; lines that reach zero are dropped.
    pub fn update_quantity(&mut self, medicine_id: &str, delta: i32) {
        if let Some(item) = self.items.iter_mut().find(|i| i.medicine_id == medicine_id) {
            let next = i64::from(item.quantity) + i64::from(delta);
            item.quantity = u32::try_from(next.max(0)).unwrap_or(0);
        }
        self.items.retain(|i| i.quantity > 0);
    }

    pub fn remove(&mut self, medicine_id: &str) {
        self.items.retain(|i| i.medicine_id != medicine_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn subtotal_cents(&self) -> u64 {
        self.items.iter().map(CartItem::line_total_cents).sum()
    }

    #[must_use]
    pub fn delivery_fee_cents(&self) -> u64 {
        if self.subtotal_cents() > FREE_DELIVERY_THRESHOLD_CENTS {
            0
        } else {
            DELIVERY_FEE_CENTS
        }
    }

    #[must_use]
    pub fn total_cents(&self) -> u64 {
        self.subtotal_cents() + self.delivery_fee_cents()
    }

    /// True if any line needs a prescription upload before dispatch.
    #[must_use]
    pub fn requires_prescription(&self) -> bool {
        self.items.iter().any(|i| i.prescription)
    }
}

/// A placed order. Nothing is fulfilled; this is the confirmation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub items: Vec<CartItem>,
    pub total_cents: u64,
    pub placed_at: DateTime<Utc>,
    pub estimated_delivery: DateTime<Utc>,
}

impl Order {
    /// Take the cart contents as an order placed at `now`.
    ///
    /// # Errors
    /// Returns `CartError::Empty` for an empty cart.
    pub fn from_cart(cart: &Cart, now: DateTime<Utc>) -> Result<Self, CartError> {
        if cart.is_empty() {
            return Err(CartError::Empty);
        }
        Ok(Self {
            id: format!("ORD-{}", now.timestamp_millis()),
            items: cart.items().to_vec(),
            total_cents: cart.total_cents(),
            placed_at: now,
            estimated_delivery: now + Duration::days(2),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medicine(id: &str, price_cents: u64, in_stock: bool) -> Medicine {
        Medicine {
            id: id.to_string(),
            name: format!("Med {id}"),
            generic_name: "Generic".to_string(),
            price_cents,
            category: "vitamins".to_string(),
            in_stock,
            prescription: id == "rx",
        }
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(1299), "$12.99");
        assert_eq!(format_cents(5), "$0.05");
    }

    #[test]
    fn test_add_merges_lines() {
        let mut cart = Cart::default();
        let m = medicine("1", 1299, true);
        cart.add(&m, 2).expect("add");
        cart.add(&m, 1).expect("add");
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_add_rejects_bad_quantity_and_stock() {
        let mut cart = Cart::default();
        assert_eq!(
            cart.add(&medicine("1", 100, true), 0),
            Err(CartError::InvalidQuantity(0))
        );
        assert_eq!(
            cart.add(&medicine("1", 100, true), 11),
            Err(CartError::InvalidQuantity(11))
        );
        assert!(matches!(
            cart.add(&medicine("4", 2200, false), 1),
            Err(CartError::OutOfStock(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_delivery_fee_threshold() {
        let mut cart = Cart::default();
        cart.add(&medicine("1", 2500, true), 2).expect("add");
        // Exactly $50.00 still pays delivery.
        assert_eq!(cart.delivery_fee_cents(), DELIVERY_FEE_CENTS);
        assert_eq!(cart.total_cents(), 5000 + 599);

        cart.add(&medicine("2", 1, true), 1).expect("add");
        assert_eq!(cart.delivery_fee_cents(), 0);
        assert_eq!(cart.total_cents(), 5001);
    }

    #[test]
    fn test_update_quantity_drops_empty_lines() {
        let mut cart = Cart::default();
        cart.add(&medicine("1", 100, true), 1).expect("add");
        cart.add(&medicine("rx", 100, true), 2).expect("add");
        assert!(cart.requires_prescription());

        cart.update_quantity("1", -1);
        assert_eq!(cart.len(), 1);

        cart.remove("rx");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_order_from_cart() {
        let now = Utc::now();
        assert_eq!(Order::from_cart(&Cart::default(), now), Err(CartError::Empty));

        let mut cart = Cart::default();
        cart.add(&medicine("1", 1575, true), 1).expect("add");
        let order = Order::from_cart(&cart, now).expect("order");
        assert!(order.id.starts_with("ORD-"));
        assert_eq!(order.total_cents, 1575 + DELIVERY_FEE_CENTS);
        assert_eq!(order.estimated_delivery - order.placed_at, Duration::days(2));
    }
}
