use crate::domain::model::{CartCustomization, CartItemInput, CartLineItem, Money};
use serde::{Deserialize, Serialize};

/// Fees applied on top of the items subtotal at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    pub delivery_fee: Money,
    pub discount: Money,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            delivery_fee: Money::from_cents(500),
            discount: Money::from_cents(50),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentSummary {
    pub total_items: u32,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub discount: Money,
    pub total: Money,
}

/// The user's shopping cart.
///
/// Lines are identified by item id plus customization set. The set is
/// compared without regard to order, so `[cheese, bacon]` and
/// `[bacon, cheese]` land on the same line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CartSnapshot")]
pub struct Cart {
    items: Vec<CartLineItem>,
    #[serde(skip)]
    revision: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Bumped on every mutation that changed the cart.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn add_item(&mut self, item: CartItemInput) {
        let key = customization_key(&item.customizations);
        let existing = self
            .items
            .iter_mut()
            .find(|line| line.id == item.id && customization_key(&line.customizations) == key);

        match existing {
            Some(line) => line.quantity += 1,
            None => self.items.push(CartLineItem {
                id: item.id,
                name: item.name,
                price: item.price,
                image_url: item.image_url,
                quantity: 1,
                customizations: item.customizations,
            }),
        }
        self.touch();
    }

    pub fn remove_item(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|line| line.id != id);
        if self.items.len() != before {
            self.touch();
        }
    }

    pub fn increase_quantity(&mut self, id: &str) {
        let mut changed = false;
        for line in self.items.iter_mut().filter(|line| line.id == id) {
            line.quantity += 1;
            changed = true;
        }
        if changed {
            self.touch();
        }
    }

    /// Lines that drop below one are removed.
    pub fn decrease_quantity(&mut self, id: &str) {
        let mut changed = false;
        self.items.retain_mut(|line| {
            if line.id != id {
                return true;
            }
            changed = true;
            line.quantity -= 1;
            line.quantity > 0
        });
        if changed {
            self.touch();
        }
    }

    pub fn clear_cart(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.touch();
        }
    }

    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Checkout breakdown; `None` while the cart is empty.
    pub fn payment_summary(&self, policy: &PricingPolicy) -> Option<PaymentSummary> {
        let total_items = self.total_items();
        if total_items == 0 {
            return None;
        }

        let subtotal = self.total_price();
        Some(PaymentSummary {
            total_items,
            subtotal,
            delivery_fee: policy.delivery_fee,
            discount: policy.discount,
            total: (subtotal + policy.delivery_fee).saturating_sub(policy.discount),
        })
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

/// Serialized form of a cart. Restoring one goes through the same line
/// identity rules as `add_item`.
#[derive(Deserialize)]
struct CartSnapshot {
    #[serde(default)]
    items: Vec<CartLineItem>,
}

impl TryFrom<CartSnapshot> for Cart {
    type Error = String;

    fn try_from(snapshot: CartSnapshot) -> Result<Self, Self::Error> {
        let mut items: Vec<CartLineItem> = Vec::with_capacity(snapshot.items.len());
        for line in snapshot.items {
            if line.quantity == 0 {
                return Err(format!("cart line '{}' has quantity 0", line.id));
            }
            let position = {
                let key = customization_key(&line.customizations);
                items.iter().position(|existing| {
                    existing.id == line.id && customization_key(&existing.customizations) == key
                })
            };
            match position {
                Some(index) => items[index].quantity += line.quantity,
                None => items.push(line),
            }
        }
        Ok(Self { items, revision: 0 })
    }
}

fn customization_key(customizations: &[CartCustomization]) -> Vec<&str> {
    let mut ids: Vec<&str> = customizations.iter().map(|c| c.id.as_str()).collect();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(id: &str, cents: u64) -> CartCustomization {
        CartCustomization {
            id: id.to_string(),
            name: id.to_string(),
            price: Money::from_cents(cents),
        }
    }

    fn item(id: &str, cents: u64, customizations: Vec<CartCustomization>) -> CartItemInput {
        CartItemInput {
            id: id.to_string(),
            name: format!("Item {}", id),
            price: Money::from_cents(cents),
            image_url: format!("https://img.example/{}.png", id),
            customizations,
        }
    }

    #[test]
    fn test_same_item_and_customizations_merge() {
        let mut cart = Cart::new();
        cart.add_item(item("burger", 1000, vec![custom("cheese", 250)]));
        cart.add_item(item("burger", 1000, vec![custom("cheese", 250)]));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_different_customizations_make_separate_lines() {
        let mut cart = Cart::new();
        cart.add_item(item("burger", 1000, vec![custom("cheese", 250)]));
        cart.add_item(item("burger", 1000, vec![custom("bacon", 300)]));
        cart.add_item(item("burger", 1000, vec![]));

        assert_eq!(cart.line_count(), 3);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_customization_order_does_not_matter() {
        let mut cart = Cart::new();
        cart.add_item(item(
            "burger",
            1000,
            vec![custom("cheese", 250), custom("bacon", 300)],
        ));
        cart.add_item(item(
            "burger",
            1000,
            vec![custom("bacon", 300), custom("cheese", 250)],
        ));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_total_price_includes_customizations() {
        let mut cart = Cart::new();
        cart.add_item(item("burger", 1000, vec![custom("cheese", 250)]));
        cart.add_item(item("burger", 1000, vec![custom("cheese", 250)]));
        assert_eq!(cart.total_price(), Money::from_cents(2500));

        cart.add_item(item("coke", 299, vec![]));
        assert_eq!(cart.total_price(), Money::from_cents(2799));
    }

    #[test]
    fn test_decrease_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(item("burger", 1000, vec![]));
        cart.add_item(item("fries", 350, vec![]));

        cart.decrease_quantity("burger");

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].id, "fries");
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_increase_and_decrease_touch_every_matching_line() {
        let mut cart = Cart::new();
        cart.add_item(item("burger", 1000, vec![custom("cheese", 250)]));
        cart.add_item(item("burger", 1000, vec![]));
        cart.add_item(item("burger", 1000, vec![]));

        cart.increase_quantity("burger");
        assert_eq!(cart.total_items(), 5);

        cart.decrease_quantity("burger");
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total_items(), 3);

        cart.decrease_quantity("burger");
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].customizations.len(), 0);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_remove_item_drops_all_lines_for_id() {
        let mut cart = Cart::new();
        cart.add_item(item("burger", 1000, vec![custom("cheese", 250)]));
        cart.add_item(item("burger", 1000, vec![]));
        cart.add_item(item("fries", 350, vec![]));

        cart.remove_item("burger");

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_price(), Money::from_cents(350));
    }

    #[test]
    fn test_missing_id_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add_item(item("burger", 1000, vec![]));
        let snapshot = cart.clone();

        cart.remove_item("pizza");
        cart.increase_quantity("pizza");
        cart.decrease_quantity("pizza");

        assert_eq!(cart, snapshot);
        assert_eq!(cart.revision(), snapshot.revision());
    }

    #[test]
    fn test_clear_cart() {
        let mut cart = Cart::new();
        cart.add_item(item("burger", 1000, vec![custom("cheese", 250)]));
        cart.add_item(item("fries", 350, vec![]));

        cart.clear_cart();

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Money::ZERO);
    }

    #[test]
    fn test_revision_tracks_changes() {
        let mut cart = Cart::new();
        assert_eq!(cart.revision(), 0);

        cart.add_item(item("burger", 1000, vec![]));
        cart.increase_quantity("burger");
        assert_eq!(cart.revision(), 2);

        cart.clear_cart();
        cart.clear_cart();
        assert_eq!(cart.revision(), 3);
    }

    #[test]
    fn test_payment_summary() {
        let mut cart = Cart::new();
        assert!(cart.payment_summary(&PricingPolicy::default()).is_none());

        cart.add_item(item("burger", 2599, vec![]));
        cart.add_item(item("burger", 2599, vec![]));

        let summary = cart.payment_summary(&PricingPolicy::default()).unwrap();
        assert_eq!(summary.total_items, 2);
        assert_eq!(summary.subtotal, Money::from_cents(5198));
        assert_eq!(summary.total, Money::from_cents(5198 + 500 - 50));
    }

    #[test]
    fn test_deserialize_rejects_zero_quantity() {
        let json = r#"{"items":[{"id":"b","name":"B","price":100,"image_url":"","quantity":0,"customizations":[]}]}"#;
        let err = serde_json::from_str::<Cart>(json).unwrap_err();
        assert!(err.to_string().contains("quantity 0"));
    }

    #[test]
    fn test_deserialize_merges_duplicate_lines() {
        let mut cart = Cart::new();
        cart.add_item(item("burger", 1000, vec![custom("cheese", 250), custom("bacon", 300)]));
        cart.add_item(item("fries", 350, vec![]));
        cart.increase_quantity("fries");

        let restored: Cart = serde_json::from_str(&serde_json::to_string(&cart).unwrap()).unwrap();
        assert_eq!(restored.items(), cart.items());
        assert_eq!(restored.revision(), 0);

        let json = r#"{"items":[
            {"id":"burger","name":"Burger","price":1000,"image_url":"","quantity":2,
             "customizations":[{"id":"cheese","name":"Cheese","price":250},{"id":"bacon","name":"Bacon","price":300}]},
            {"id":"burger","name":"Burger","price":1000,"image_url":"","quantity":1,
             "customizations":[{"id":"bacon","name":"Bacon","price":300},{"id":"cheese","name":"Cheese","price":250}]}
        ]}"#;
        let merged: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(merged.line_count(), 1);
        assert_eq!(merged.total_items(), 3);
        assert!(merged.items().iter().all(|line| line.quantity >= 1));
    }

    #[test]
    fn test_discount_never_drives_total_negative() {
        let mut cart = Cart::new();
        cart.add_item(item("water", 0, vec![]));
        let policy = PricingPolicy {
            delivery_fee: Money::ZERO,
            discount: Money::from_cents(100),
        };

        let summary = cart.payment_summary(&policy).unwrap();
        assert_eq!(summary.total, Money::ZERO);
    }
}
