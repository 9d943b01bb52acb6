//! Order details view: single order, line items, and the status editor.

use shared::{
    domain::{OrderId, StatusCode},
    error::ErrorCode,
    protocol::Order,
};

use crate::backend_bridge::commands::{BackendCommand, RequestId, RequestIds};
use crate::controller::events::UiError;

pub const STATUS_UPDATE_FAILED: &str = "Failed to update order status";

#[derive(Debug)]
pub struct OrderDetailsView {
    order_id: OrderId,
    order: Option<Order>,
    loading: bool,
    load_error: Option<String>,
    /// Pending choice in the status select, committed only by `commit`.
    selected_status: StatusCode,
    saving: bool,
    alert: Option<String>,
    pending_load: Option<RequestId>,
    pending_save: Option<(RequestId, StatusCode)>,
}

impl OrderDetailsView {
    pub fn open(order_id: OrderId, requests: &mut RequestIds) -> (Self, BackendCommand) {
        let mut view = Self {
            order_id,
            order: None,
            loading: true,
            load_error: None,
            selected_status: StatusCode(0),
            saving: false,
            alert: None,
            pending_load: None,
            pending_save: None,
        };
        let cmd = view.reload(requests);
        (view, cmd)
    }

    pub fn reload(&mut self, requests: &mut RequestIds) -> BackendCommand {
        let request = requests.next_id();
        self.pending_load = Some(request);
        self.loading = true;
        self.load_error = None;
        BackendCommand::GetOrder {
            request,
            order_id: self.order_id,
        }
    }

    pub fn on_loaded(&mut self, request: RequestId, order: Order) -> bool {
        if self.pending_load != Some(request) {
            return false;
        }
        self.pending_load = None;
        self.loading = false;
        self.selected_status = order.status;
        self.order = Some(order);
        true
    }

    pub fn on_load_failed(&mut self, request: RequestId, error: &UiError) -> bool {
        if self.pending_load != Some(request) {
            return false;
        }
        self.pending_load = None;
        self.loading = false;
        self.order = None;
        self.load_error = Some(if error.code() == Some(ErrorCode::NotFound) {
            "Order not found.".to_string()
        } else {
            format!("Failed to load order: {}", error.message())
        });
        true
    }

    /// Ignored while a save is in flight.
    pub fn select_status(&mut self, status: StatusCode) {
        if !self.saving {
            self.selected_status = status;
        }
    }

    pub fn can_update(&self) -> bool {
        match &self.order {
            Some(order) => !self.saving && self.selected_status != order.status,
            None => false,
        }
    }

    pub fn commit(&mut self, requests: &mut RequestIds) -> Option<BackendCommand> {
        if !self.can_update() {
            return None;
        }
        let order_id = self.order.as_ref()?.id;
        let request = requests.next_id();
        let status = self.selected_status;
        self.saving = true;
        self.pending_save = Some((request, status));
        Some(BackendCommand::UpdateOrderStatus {
            request,
            order_id,
            status,
        })
    }

    /// Merges the committed status into the local copy without re-fetching.
    pub fn on_status_updated(&mut self, request: RequestId) -> bool {
        let Some((pending, status)) = self.pending_save else {
            return false;
        };
        if pending != request {
            return false;
        }
        self.pending_save = None;
        self.saving = false;
        if let Some(order) = self.order.as_mut() {
            order.status = status;
        }
        true
    }

    /// Leaves `order.status` untouched; the select keeps the attempted value.
    pub fn on_status_update_failed(&mut self, request: RequestId, error: &UiError) -> bool {
        match self.pending_save {
            Some((pending, _)) if pending == request => {}
            _ => return false,
        }
        self.pending_save = None;
        self.saving = false;
        self.alert = Some(format!("{STATUS_UPDATE_FAILED}: {}", error.message()));
        true
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn saving(&self) -> bool {
        self.saving
    }

    pub fn selected_status(&self) -> StatusCode {
        self.selected_status
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }
}

#[cfg(test)]
#[path = "tests/order_details_tests.rs"]
mod tests;
