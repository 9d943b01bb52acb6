//! Create-order form: draft editing, derived totals, client-side validation.

use shared::protocol::{CreateOrderItem, CreateOrderRequest};
use thiserror::Error;

use crate::backend_bridge::commands::{BackendCommand, RequestId, RequestIds};

pub const CREATE_FAILED: &str = "Failed to create order. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub struct DraftItem {
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl DraftItem {
    pub fn blank() -> Self {
        Self {
            product_name: String::new(),
            quantity: 1,
            unit_price: 0.0,
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    ProductName,
    Quantity,
    UnitPrice,
}

/// Client-side rejections, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Customer name is required")]
    MissingCustomerName,
    #[error("Valid email is required")]
    InvalidCustomerEmail,
    #[error("All items must have a product name")]
    MissingProductName,
    #[error("Quantity and price must be greater than 0")]
    NonPositiveAmount,
}

#[derive(Debug)]
pub struct CreateOrderView {
    customer_name: String,
    customer_email: String,
    items: Vec<DraftItem>,
    loading: bool,
    error: Option<String>,
    pending: Option<RequestId>,
}

impl Default for CreateOrderView {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            customer_email: String::new(),
            items: vec![DraftItem::blank()],
            loading: false,
            error: None,
            pending: None,
        }
    }
}

impl CreateOrderView {
    pub fn set_customer_name(&mut self, value: impl Into<String>) {
        if !self.loading {
            self.customer_name = value.into();
        }
    }

    pub fn set_customer_email(&mut self, value: impl Into<String>) {
        if !self.loading {
            self.customer_email = value.into();
        }
    }

    pub fn add_item(&mut self) {
        if !self.loading {
            self.items.push(DraftItem::blank());
        }
    }

    /// The last remaining row can never be removed.
    pub fn remove_item(&mut self, index: usize) -> bool {
        if self.loading || self.items.len() <= 1 || index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        true
    }

    /// Sets one field of one row from raw input; numeric fields are coerced.
    pub fn update_item(&mut self, index: usize, field: ItemField, value: &str) -> bool {
        if self.loading {
            return false;
        }
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        match field {
            ItemField::ProductName => item.product_name = value.to_string(),
            ItemField::Quantity => item.quantity = coerce_quantity(value),
            ItemField::UnitPrice => item.unit_price = coerce_price(value),
        }
        true
    }

    /// Saturates at `i64::MAX` rather than overflowing on huge quantities.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.quantity))
    }

    pub fn grand_total(&self) -> f64 {
        self.items.iter().map(DraftItem::subtotal).sum()
    }

    /// Validates the draft and returns the trimmed wire request.
    pub fn validate(&self) -> Result<CreateOrderRequest, DraftError> {
        let customer_name = self.customer_name.trim();
        if customer_name.is_empty() {
            return Err(DraftError::MissingCustomerName);
        }
        let customer_email = self.customer_email.trim();
        if customer_email.is_empty() || !customer_email.contains('@') {
            return Err(DraftError::InvalidCustomerEmail);
        }
        if self
            .items
            .iter()
            .any(|item| item.product_name.trim().is_empty())
        {
            return Err(DraftError::MissingProductName);
        }
        if self
            .items
            .iter()
            .any(|item| item.quantity <= 0 || item.unit_price <= 0.0)
        {
            return Err(DraftError::NonPositiveAmount);
        }

        Ok(CreateOrderRequest {
            customer_name: customer_name.to_string(),
            customer_email: customer_email.to_string(),
            items: self
                .items
                .iter()
                .map(|item| CreateOrderItem {
                    product_name: item.product_name.trim().to_string(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect(),
        })
    }

    pub fn submit(&mut self, requests: &mut RequestIds) -> Option<BackendCommand> {
        if self.loading {
            return None;
        }
        let draft = match self.validate() {
            Ok(draft) => draft,
            Err(err) => {
                tracing::debug!(error = %err, "order draft rejected");
                self.error = Some(err.to_string());
                return None;
            }
        };
        let request = requests.next_id();
        self.loading = true;
        self.error = None;
        self.pending = Some(request);
        Some(BackendCommand::CreateOrder { request, draft })
    }

    /// Resets the form to a single blank row.
    pub fn on_created(&mut self, request: RequestId) -> bool {
        if self.pending != Some(request) {
            return false;
        }
        *self = Self::default();
        true
    }

    /// Keeps every field so the user can correct and resubmit.
    pub fn on_failed(&mut self, request: RequestId) -> bool {
        if self.pending != Some(request) {
            return false;
        }
        self.pending = None;
        self.loading = false;
        self.error = Some(CREATE_FAILED.to_string());
        true
    }

    pub fn can_cancel(&self) -> bool {
        !self.loading
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    pub fn items(&self) -> &[DraftItem] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

fn coerce_quantity(raw: &str) -> i64 {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return value;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => 0,
    }
}

fn coerce_price(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

#[cfg(test)]
#[path = "tests/create_order_tests.rs"]
mod tests;
