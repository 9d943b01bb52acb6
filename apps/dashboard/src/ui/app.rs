//! Root coordinator: owns the active view and the list refresh token.

use shared::domain::{OrderId, StatusCode};

use crate::backend_bridge::commands::{BackendCommand, RequestId, RequestIds};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::ui::{
    create_order::{CreateOrderView, ItemField},
    order_details::OrderDetailsView,
    order_list::OrderListView,
};

/// Monotonic "re-fetch the list" signal. Every event bumps it by one, so two
/// quick events are never collapsed into one observed change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshToken(u64);

impl RefreshToken {
    pub fn bump(&mut self) {
        self.0 += 1;
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub enum ActiveView {
    List(OrderListView),
    Details(OrderDetailsView),
    Create(CreateOrderView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    List,
    Details,
    Create,
}

impl ActiveView {
    pub fn kind(&self) -> ViewKind {
        match self {
            ActiveView::List(_) => ViewKind::List,
            ActiveView::Details(_) => ViewKind::Details,
            ActiveView::Create(_) => ViewKind::Create,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Refresh,
    OpenCreate,
    ViewDetails { row: usize },
    DeleteOrder { row: usize },
    CloseDetails,
    SelectStatus(StatusCode),
    CommitStatus,
    ReloadDetails,
    DismissAlert,
    SetCustomerName(String),
    SetCustomerEmail(String),
    AddItem,
    RemoveItem { row: usize },
    UpdateItem {
        row: usize,
        field: ItemField,
        value: String,
    },
    SubmitOrder,
    CancelCreate,
}

#[derive(Debug)]
pub struct DashboardApp {
    api_url: String,
    active: ActiveView,
    refresh: RefreshToken,
    requests: RequestIds,
    status_line: Option<String>,
}

impl DashboardApp {
    /// Starts on the order list; the returned commands perform its first load.
    pub fn new(api_url: impl Into<String>) -> (Self, Vec<BackendCommand>) {
        let mut app = Self {
            api_url: api_url.into(),
            active: ActiveView::List(OrderListView::default()),
            refresh: RefreshToken::default(),
            requests: RequestIds::default(),
            status_line: None,
        };
        let cmds = app.observe_refresh();
        (app, cmds)
    }

    pub fn handle(&mut self, action: Action) -> Vec<BackendCommand> {
        match action {
            Action::Refresh => {
                if matches!(self.active, ActiveView::List(_)) {
                    return self.signal_refresh();
                }
            }
            Action::OpenCreate => {
                if matches!(self.active, ActiveView::List(_)) {
                    self.active = ActiveView::Create(CreateOrderView::default());
                }
            }
            Action::ViewDetails { row } => {
                let ActiveView::List(list) = &self.active else {
                    return Vec::new();
                };
                match list.order_at_row(row) {
                    Some(order_id) => return self.open_details(order_id),
                    None => self.status_line = Some(format!("No order in row {row}")),
                }
            }
            Action::DeleteOrder { row } => {
                let ActiveView::List(list) = &self.active else {
                    return Vec::new();
                };
                match list.order_at_row(row) {
                    Some(order_id) => {
                        let request = self.requests.next_id();
                        self.status_line = Some(format!("Deleting order {order_id}..."));
                        return vec![BackendCommand::DeleteOrder { request, order_id }];
                    }
                    None => self.status_line = Some(format!("No order in row {row}")),
                }
            }
            Action::CloseDetails => {
                if matches!(self.active, ActiveView::Details(_)) {
                    return self.show_list();
                }
            }
            Action::SelectStatus(status) => {
                if let ActiveView::Details(details) = &mut self.active {
                    details.select_status(status);
                }
            }
            Action::CommitStatus => {
                if let ActiveView::Details(details) = &mut self.active {
                    return details.commit(&mut self.requests).into_iter().collect();
                }
            }
            Action::ReloadDetails => {
                if let ActiveView::Details(details) = &mut self.active {
                    if !details.loading() {
                        return vec![details.reload(&mut self.requests)];
                    }
                }
            }
            Action::DismissAlert => {
                if let ActiveView::Details(details) = &mut self.active {
                    details.dismiss_alert();
                }
            }
            Action::SetCustomerName(value) => {
                if let ActiveView::Create(form) = &mut self.active {
                    form.set_customer_name(value);
                }
            }
            Action::SetCustomerEmail(value) => {
                if let ActiveView::Create(form) = &mut self.active {
                    form.set_customer_email(value);
                }
            }
            Action::AddItem => {
                if let ActiveView::Create(form) = &mut self.active {
                    form.add_item();
                }
            }
            Action::RemoveItem { row } => {
                if let ActiveView::Create(form) = &mut self.active {
                    if !form.remove_item(row.wrapping_sub(1)) {
                        self.status_line = Some(format!("Cannot remove item {row}"));
                    }
                }
            }
            Action::UpdateItem { row, field, value } => {
                if let ActiveView::Create(form) = &mut self.active {
                    if !form.update_item(row.wrapping_sub(1), field, &value) {
                        self.status_line = Some(format!("No item in row {row}"));
                    }
                }
            }
            Action::SubmitOrder => {
                if let ActiveView::Create(form) = &mut self.active {
                    return form.submit(&mut self.requests).into_iter().collect();
                }
            }
            Action::CancelCreate => {
                if let ActiveView::Create(form) = &self.active {
                    if form.can_cancel() {
                        return self.show_list();
                    }
                }
            }
        }
        Vec::new()
    }

    pub fn apply(&mut self, event: UiEvent) -> Vec<BackendCommand> {
        match event {
            UiEvent::OrdersLoaded { request, orders } => {
                if let ActiveView::List(list) = &mut self.active {
                    list.on_loaded(request, orders);
                }
            }
            UiEvent::OrderLoaded { request, order } => {
                if let ActiveView::Details(details) = &mut self.active {
                    details.on_loaded(request, order);
                }
            }
            UiEvent::OrderCreated { request, order } => {
                let ActiveView::Create(form) = &mut self.active else {
                    tracing::debug!(order_id = order.id.0, "order created after form closed");
                    return self.signal_refresh();
                };
                if !form.on_created(request) {
                    return Vec::new();
                }
                self.status_line = Some(format!("Created order {}", order.order_number));
                self.active = ActiveView::List(OrderListView::default());
                return self.signal_refresh();
            }
            UiEvent::OrderStatusUpdated {
                request,
                order_id,
                status,
            } => {
                if let ActiveView::Details(details) = &mut self.active {
                    details.on_status_updated(request);
                }
                self.status_line = Some(format!("Order {order_id} is now {}", status.label()));
                return self.signal_refresh();
            }
            UiEvent::OrderDeleted { order_id, .. } => {
                self.status_line = Some(format!("Deleted order {order_id}"));
                return self.signal_refresh();
            }
            UiEvent::Failed { request, error } => self.apply_failure(request, error),
        }
        Vec::new()
    }

    fn apply_failure(&mut self, request: Option<RequestId>, error: UiError) {
        let Some(request) = request else {
            self.status_line = Some(error.message().to_string());
            return;
        };
        match (&mut self.active, error.context()) {
            (ActiveView::List(list), UiErrorContext::LoadOrders) => {
                let message = OrderListView::load_failure_message(&error, &self.api_url);
                list.on_failed(request, message);
            }
            (ActiveView::Details(details), UiErrorContext::LoadOrder) => {
                details.on_load_failed(request, &error);
            }
            (ActiveView::Details(details), UiErrorContext::UpdateStatus) => {
                details.on_status_update_failed(request, &error);
            }
            (ActiveView::Create(form), UiErrorContext::CreateOrder) => {
                form.on_failed(request);
            }
            (_, UiErrorContext::DeleteOrder) => {
                self.status_line = Some(format!("Failed to delete order: {}", error.message()));
            }
            (_, context) => {
                tracing::debug!(?context, request = request.0, "dropping error for closed view");
            }
        }
    }

    fn open_details(&mut self, order_id: OrderId) -> Vec<BackendCommand> {
        let (details, cmd) = OrderDetailsView::open(order_id, &mut self.requests);
        self.active = ActiveView::Details(details);
        vec![cmd]
    }

    /// Mounts a fresh list, which loads on mount.
    fn show_list(&mut self) -> Vec<BackendCommand> {
        self.active = ActiveView::List(OrderListView::default());
        self.observe_refresh()
    }

    fn signal_refresh(&mut self) -> Vec<BackendCommand> {
        self.refresh.bump();
        tracing::debug!(token = self.refresh.value(), "order list refresh signalled");
        self.observe_refresh()
    }

    fn observe_refresh(&mut self) -> Vec<BackendCommand> {
        match &mut self.active {
            ActiveView::List(list) => list
                .observe(self.refresh, &mut self.requests)
                .into_iter()
                .collect(),
            _ => Vec::new(),
        }
    }

    /// True while the active view waits on the backend and takes no input.
    pub fn is_busy(&self) -> bool {
        match &self.active {
            ActiveView::List(list) => list.loading(),
            ActiveView::Details(details) => details.loading() || details.saving(),
            ActiveView::Create(form) => form.loading(),
        }
    }

    pub fn blocking_alert(&self) -> Option<&str> {
        match &self.active {
            ActiveView::Details(details) => details.alert(),
            _ => None,
        }
    }

    pub fn active(&self) -> &ActiveView {
        &self.active
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn status_line(&self) -> Option<&str> {
        self.status_line.as_deref()
    }

    pub fn set_status_line(&mut self, message: impl Into<String>) {
        self.status_line = Some(message.into());
    }

    pub fn clear_status_line(&mut self) {
        self.status_line = None;
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
