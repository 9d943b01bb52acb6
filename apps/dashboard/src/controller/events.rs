//! Backend-to-UI events and error modeling for the dashboard controller.

use client_core::GatewayError;
use shared::{
    domain::{OrderId, StatusCode},
    error::ErrorCode,
    protocol::Order,
};

use crate::backend_bridge::commands::RequestId;

#[derive(Debug, Clone)]
pub enum UiEvent {
    OrdersLoaded {
        request: RequestId,
        orders: Vec<Order>,
    },
    OrderLoaded {
        request: RequestId,
        order: Order,
    },
    OrderCreated {
        request: RequestId,
        order: Order,
    },
    OrderStatusUpdated {
        request: RequestId,
        order_id: OrderId,
        status: StatusCode,
    },
    OrderDeleted {
        request: RequestId,
        order_id: OrderId,
    },
    Failed {
        request: Option<RequestId>,
        error: UiError,
    },
}

/// Which operation an error belongs to; decides where it is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadOrders,
    LoadOrder,
    CreateOrder,
    UpdateStatus,
    DeleteOrder,
}

#[derive(Debug, Clone)]
pub struct UiError {
    /// `None` for failures inside the dashboard itself.
    code: Option<ErrorCode>,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(code: ErrorCode, context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            context,
            message: message.into(),
        }
    }

    pub fn local(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            code: None,
            context,
            message: message.into(),
        }
    }

    pub fn from_gateway(context: UiErrorContext, err: &GatewayError) -> Self {
        Self::new(err.code(), context, err.to_string())
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_transport(&self) -> bool {
        self.code == Some(ErrorCode::Network)
    }
}
