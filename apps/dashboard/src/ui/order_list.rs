//! Order list view state.

use shared::{domain::OrderId, protocol::Order};

use crate::backend_bridge::commands::{BackendCommand, RequestId, RequestIds};
use crate::controller::events::UiError;
use crate::ui::app::RefreshToken;

#[derive(Debug)]
pub struct OrderListView {
    orders: Vec<Order>,
    loading: bool,
    error: Option<String>,
    observed: Option<RefreshToken>,
    pending: Option<RequestId>,
}

impl Default for OrderListView {
    fn default() -> Self {
        Self {
            orders: Vec::new(),
            loading: true,
            error: None,
            observed: None,
            pending: None,
        }
    }
}

impl OrderListView {
    /// Fetches on first observation and whenever `token` differs from the
    /// last one seen.
    pub fn observe(
        &mut self,
        token: RefreshToken,
        requests: &mut RequestIds,
    ) -> Option<BackendCommand> {
        if self.observed == Some(token) {
            return None;
        }
        self.observed = Some(token);
        let request = requests.next_id();
        self.pending = Some(request);
        self.loading = true;
        Some(BackendCommand::ListOrders { request })
    }

    pub fn on_loaded(&mut self, request: RequestId, orders: Vec<Order>) -> bool {
        if self.pending != Some(request) {
            return false;
        }
        self.pending = None;
        self.loading = false;
        self.orders = orders;
        self.error = None;
        true
    }

    pub fn on_failed(&mut self, request: RequestId, message: String) -> bool {
        if self.pending != Some(request) {
            return false;
        }
        self.pending = None;
        self.loading = false;
        self.orders.clear();
        self.error = Some(message);
        true
    }

    pub fn load_failure_message(error: &UiError, api_url: &str) -> String {
        if error.is_transport() {
            format!("Failed to load orders. Make sure your API is running on {api_url}")
        } else {
            format!("Failed to load orders: {}", error.message())
        }
    }

    /// Order id for a 1-based row number as displayed.
    pub fn order_at_row(&self, row: usize) -> Option<OrderId> {
        row.checked_sub(1)
            .and_then(|idx| self.orders.get(idx))
            .map(|order| order.id)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use shared::{domain::OrderStatus, error::ErrorCode};

    use super::*;
    use crate::controller::events::UiErrorContext;

    fn order(id: i64) -> Order {
        Order {
            id: OrderId(id),
            order_number: format!("ORD-{id}"),
            customer_name: "Grace".to_string(),
            customer_email: "grace@example.com".to_string(),
            order_date: "2024-03-01T09:00:00".to_string(),
            status: OrderStatus::Processing.code(),
            total_amount: 12.5,
            order_items: Vec::new(),
        }
    }

    fn list_request(cmd: Option<BackendCommand>) -> RequestId {
        match cmd {
            Some(BackendCommand::ListOrders { request }) => request,
            other => panic!("expected list request, got {other:?}"),
        }
    }

    #[test]
    fn starts_loading_and_fetches_on_first_observation() {
        let mut requests = RequestIds::default();
        let mut view = OrderListView::default();
        assert!(view.loading());
        assert!(view.orders().is_empty());

        list_request(view.observe(RefreshToken::default(), &mut requests));
        assert!(view
            .observe(RefreshToken::default(), &mut requests)
            .is_none());
    }

    #[test]
    fn refetches_when_token_changes() {
        let mut requests = RequestIds::default();
        let mut view = OrderListView::default();
        let mut token = RefreshToken::default();
        list_request(view.observe(token, &mut requests));
        token.bump();
        list_request(view.observe(token, &mut requests));
    }

    #[test]
    fn failure_then_success_clears_error_and_populates() {
        let mut requests = RequestIds::default();
        let mut view = OrderListView::default();
        let mut token = RefreshToken::default();

        let first = list_request(view.observe(token, &mut requests));
        assert!(view.on_failed(first, "Failed to load orders".to_string()));
        assert!(view.orders().is_empty());
        assert!(!view.loading());
        assert!(!view.error().unwrap_or_default().is_empty());

        token.bump();
        let second = list_request(view.observe(token, &mut requests));
        assert!(view.on_loaded(second, vec![order(3), order(1)]));
        assert_eq!(view.error(), None);
        assert_eq!(view.orders().len(), 2);
        assert_eq!(view.order_at_row(1), Some(OrderId(3)));
        assert_eq!(view.order_at_row(2), Some(OrderId(1)));
        assert_eq!(view.order_at_row(0), None);
        assert_eq!(view.order_at_row(3), None);
    }

    #[test]
    fn success_replaces_whole_collection() {
        let mut requests = RequestIds::default();
        let mut view = OrderListView::default();
        let mut token = RefreshToken::default();

        let first = list_request(view.observe(token, &mut requests));
        view.on_loaded(first, vec![order(1), order(2)]);
        token.bump();
        let second = list_request(view.observe(token, &mut requests));
        view.on_loaded(second, vec![order(5)]);

        let ids: Vec<OrderId> = view.orders().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![OrderId(5)]);
    }

    #[test]
    fn ignores_superseded_responses() {
        let mut requests = RequestIds::default();
        let mut view = OrderListView::default();
        let mut token = RefreshToken::default();

        let stale = list_request(view.observe(token, &mut requests));
        token.bump();
        let current = list_request(view.observe(token, &mut requests));

        assert!(!view.on_loaded(stale, vec![order(1)]));
        assert!(view.loading());
        assert!(view.on_loaded(current, vec![order(2)]));
        assert_eq!(view.orders()[0].id, OrderId(2));
    }

    #[test]
    fn transport_failures_point_at_the_api_url() {
        let network = UiError::new(ErrorCode::Network, UiErrorContext::LoadOrders, "refused");
        let server = UiError::new(ErrorCode::Server, UiErrorContext::LoadOrders, "boom");
        assert_eq!(
            OrderListView::load_failure_message(&network, "https://localhost:7043"),
            "Failed to load orders. Make sure your API is running on https://localhost:7043"
        );
        assert_eq!(
            OrderListView::load_failure_message(&server, "https://localhost:7043"),
            "Failed to load orders: boom"
        );
    }
}
