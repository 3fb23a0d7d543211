use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// Amount in minor currency units (cents).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Rounds a decimal amount to the nearest cent. Negative and non-finite
    /// inputs clamp to zero.
    pub fn from_decimal(amount: f64) -> Self {
        if !amount.is_finite() || amount <= 0.0 {
            return Self::ZERO;
        }
        Self((amount * 100.0).round() as u64)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(self.0 * u64::from(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCustomization {
    pub id: String,
    pub name: String,
    pub price: Money,
}

/// What a screen hands to `Cart::add_item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemInput {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub image_url: String,
    #[serde(default)]
    pub customizations: Vec<CartCustomization>,
}

impl CartItemInput {
    /// The payload the item detail screen adds: the menu item as-is, no add-ons.
    pub fn from_menu_item(item: &MenuItem, image_url: impl Into<String>) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: Money::from_decimal(item.price),
            image_url: image_url.into(),
            customizations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub image_url: String,
    pub quantity: u32,
    pub customizations: Vec<CartCustomization>,
}

impl CartLineItem {
    /// Base price plus every customization, for a single unit.
    pub fn unit_price(&self) -> Money {
        self.price + self.customizations.iter().map(|c| c.price).sum::<Money>()
    }

    pub fn line_total(&self) -> Money {
        self.unit_price() * self.quantity
    }
}

/// Menu document as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub price: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub calories: u32,
    #[serde(default)]
    pub protein: u32,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(
        default,
        alias = "categories",
        deserialize_with = "deserialize_related_id"
    )]
    pub category: Option<String>,
}

/// Relationship attributes come back either as a bare id or as the nested document.
fn deserialize_related_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(id)) => Some(id),
        Some(serde_json::Value::Object(doc)) => doc
            .get("$id")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        _ => None,
    })
}

/// Metadata of a document the store just created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedDocument {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$collectionId", default)]
    pub collection_id: Option<String>,
    #[serde(rename = "$createdAt", default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomizationKind {
    Topping,
    Side,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedCategory {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedCustomization {
    pub name: String,
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: CustomizationKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedMenuItem {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: f64,
    pub rating: f64,
    pub calories: u32,
    pub protein: u32,
    pub category_name: String,
    #[serde(default)]
    pub customizations: Vec<String>,
}
