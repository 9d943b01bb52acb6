use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{OrderId, OrderItemId, StatusCode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    /// Server computed, equals `quantity * unit_price`.
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub order_date: String,
    pub status: StatusCode,
    pub total_amount: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub order_items: Vec<OrderItem>,
}

impl Order {
    pub fn placed_at(&self) -> Option<OrderTimestamp> {
        OrderTimestamp::parse(&self.order_date)
    }
}

/// `orderDate` as sent by the backend: either offset-qualified or a bare
/// local timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderTimestamp {
    Offset(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl OrderTimestamp {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self::Offset(ts));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(Self::Naive)
    }

    pub fn naive(&self) -> NaiveDateTime {
        match self {
            Self::Offset(ts) => ts.naive_local(),
            Self::Naive(ts) => *ts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItem {
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<CreateOrderItem>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
