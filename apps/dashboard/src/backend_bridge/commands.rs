//! Backend commands queued from UI to backend worker.

use shared::{
    domain::{OrderId, StatusCode},
    protocol::CreateOrderRequest,
};

/// Correlates a queued command with the event that answers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

#[derive(Debug, Default)]
pub struct RequestIds {
    last: u64,
}

impl RequestIds {
    pub fn next_id(&mut self) -> RequestId {
        self.last += 1;
        RequestId(self.last)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    ListOrders {
        request: RequestId,
    },
    GetOrder {
        request: RequestId,
        order_id: OrderId,
    },
    CreateOrder {
        request: RequestId,
        draft: CreateOrderRequest,
    },
    UpdateOrderStatus {
        request: RequestId,
        order_id: OrderId,
        status: StatusCode,
    },
    DeleteOrder {
        request: RequestId,
        order_id: OrderId,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::ListOrders { .. } => "list_orders",
            BackendCommand::GetOrder { .. } => "get_order",
            BackendCommand::CreateOrder { .. } => "create_order",
            BackendCommand::UpdateOrderStatus { .. } => "update_order_status",
            BackendCommand::DeleteOrder { .. } => "delete_order",
        }
    }

    pub fn request(&self) -> RequestId {
        match self {
            BackendCommand::ListOrders { request }
            | BackendCommand::GetOrder { request, .. }
            | BackendCommand::CreateOrder { request, .. }
            | BackendCommand::UpdateOrderStatus { request, .. }
            | BackendCommand::DeleteOrder { request, .. } => *request,
        }
    }
}
