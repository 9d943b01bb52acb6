use shared::{
    domain::{OrderStatus, StatusCode},
    error::ErrorCode,
    protocol::Order,
};

use super::*;

const API_URL: &str = "https://localhost:7043";

fn order(id: i64, status: StatusCode) -> Order {
    Order {
        id: OrderId(id),
        order_number: format!("ORD-{id:04}"),
        customer_name: "Ada".to_string(),
        customer_email: "ada@example.com".to_string(),
        order_date: "2024-01-05T10:15:00".to_string(),
        status,
        total_amount: 10.0,
        order_items: Vec::new(),
    }
}

fn single(cmds: Vec<BackendCommand>) -> BackendCommand {
    assert_eq!(cmds.len(), 1, "expected exactly one command: {cmds:?}");
    cmds.into_iter().next().expect("one command")
}

fn loaded_list_app() -> DashboardApp {
    let (mut app, cmds) = DashboardApp::new(API_URL);
    let request = single(cmds).request();
    app.apply(UiEvent::OrdersLoaded {
        request,
        orders: vec![
            order(1, OrderStatus::Pending.code()),
            order(2, OrderStatus::Shipped.code()),
        ],
    });
    app
}

fn fill_valid_form(app: &mut DashboardApp) {
    app.handle(Action::SetCustomerName(" Ada ".to_string()));
    app.handle(Action::SetCustomerEmail("ada@example.com".to_string()));
    app.handle(Action::UpdateItem {
        row: 1,
        field: ItemField::ProductName,
        value: "Widget".to_string(),
    });
    app.handle(Action::UpdateItem {
        row: 1,
        field: ItemField::UnitPrice,
        value: "2.5".to_string(),
    });
}

#[test]
fn starts_on_list_and_loads_it() {
    let (app, cmds) = DashboardApp::new(API_URL);
    assert!(matches!(single(cmds), BackendCommand::ListOrders { .. }));
    assert!(matches!(app.active(), ActiveView::List(_)));
    assert!(app.is_busy());
}

#[test]
fn creation_returns_to_list_with_higher_token() {
    let mut app = loaded_list_app();
    let before = app.refresh;

    assert!(app.handle(Action::OpenCreate).is_empty());
    assert!(matches!(app.active(), ActiveView::Create(_)));
    fill_valid_form(&mut app);
    let create = single(app.handle(Action::SubmitOrder));
    let BackendCommand::CreateOrder { request, draft } = create else {
        panic!("expected create command");
    };
    assert_eq!(draft.customer_name, "Ada");
    assert!(app.is_busy());

    let cmds = app.apply(UiEvent::OrderCreated {
        request,
        order: order(3, OrderStatus::Pending.code()),
    });
    assert!(matches!(app.active(), ActiveView::List(_)));
    assert!(app.refresh > before);
    assert!(matches!(single(cmds), BackendCommand::ListOrders { .. }));
    assert_eq!(app.status_line(), Some("Created order ORD-0003"));
}

#[test]
fn failed_creation_stays_on_form() {
    let mut app = loaded_list_app();
    app.handle(Action::OpenCreate);
    fill_valid_form(&mut app);
    let request = single(app.handle(Action::SubmitOrder)).request();

    assert!(app.handle(Action::CancelCreate).is_empty());
    assert!(matches!(app.active(), ActiveView::Create(_)));

    app.apply(UiEvent::Failed {
        request: Some(request),
        error: UiError::new(ErrorCode::Network, UiErrorContext::CreateOrder, "refused"),
    });
    let ActiveView::Create(form) = app.active() else {
        panic!("expected create view");
    };
    assert_eq!(form.error(), Some(crate::ui::create_order::CREATE_FAILED));
    assert_eq!(form.customer_email(), "ada@example.com");

    assert!(matches!(
        single(app.handle(Action::CancelCreate)),
        BackendCommand::ListOrders { .. }
    ));
}

#[test]
fn details_selection_and_creation_are_exclusive() {
    let mut app = loaded_list_app();
    let cmd = single(app.handle(Action::ViewDetails { row: 2 }));
    assert!(matches!(
        cmd,
        BackendCommand::GetOrder {
            order_id: OrderId(2),
            ..
        }
    ));
    assert!(matches!(app.active(), ActiveView::Details(_)));

    assert!(app.handle(Action::OpenCreate).is_empty());
    assert!(matches!(app.active(), ActiveView::Details(_)));
}

#[test]
fn unknown_row_reports_on_status_line() {
    let mut app = loaded_list_app();
    assert!(app.handle(Action::ViewDetails { row: 9 }).is_empty());
    assert_eq!(app.status_line(), Some("No order in row 9"));
    assert!(matches!(app.active(), ActiveView::List(_)));
}

#[test]
fn status_update_bumps_token_and_close_reloads_list() {
    let mut app = loaded_list_app();
    let get = single(app.handle(Action::ViewDetails { row: 1 }));
    app.apply(UiEvent::OrderLoaded {
        request: get.request(),
        order: order(1, OrderStatus::Pending.code()),
    });

    assert!(app.handle(Action::CommitStatus).is_empty());
    app.handle(Action::SelectStatus(OrderStatus::Shipped.code()));
    let update = single(app.handle(Action::CommitStatus));
    let before = app.refresh;

    let cmds = app.apply(UiEvent::OrderStatusUpdated {
        request: update.request(),
        order_id: OrderId(1),
        status: OrderStatus::Shipped.code(),
    });
    assert!(cmds.is_empty());
    assert!(app.refresh > before);
    let ActiveView::Details(details) = app.active() else {
        panic!("expected details view");
    };
    assert_eq!(
        details.order().map(|order| order.status),
        Some(OrderStatus::Shipped.code())
    );

    assert!(matches!(
        single(app.handle(Action::CloseDetails)),
        BackendCommand::ListOrders { .. }
    ));
}

#[test]
fn status_update_failure_blocks_until_dismissed() {
    let mut app = loaded_list_app();
    let get = single(app.handle(Action::ViewDetails { row: 1 }));
    app.apply(UiEvent::OrderLoaded {
        request: get.request(),
        order: order(1, OrderStatus::Pending.code()),
    });
    app.handle(Action::SelectStatus(OrderStatus::Cancelled.code()));
    let update = single(app.handle(Action::CommitStatus));
    let before = app.refresh;

    app.apply(UiEvent::Failed {
        request: Some(update.request()),
        error: UiError::new(ErrorCode::Server, UiErrorContext::UpdateStatus, "boom"),
    });
    assert!(app.blocking_alert().is_some());
    assert_eq!(app.refresh, before);

    app.handle(Action::DismissAlert);
    assert_eq!(app.blocking_alert(), None);
    assert!(!app.is_busy());
}

#[test]
fn late_status_update_after_close_still_refreshes_list() {
    let mut app = loaded_list_app();
    let get = single(app.handle(Action::ViewDetails { row: 1 }));
    app.apply(UiEvent::OrderLoaded {
        request: get.request(),
        order: order(1, OrderStatus::Pending.code()),
    });
    app.handle(Action::SelectStatus(OrderStatus::Processing.code()));
    let update = single(app.handle(Action::CommitStatus));

    let reload = single(app.handle(Action::CloseDetails));
    app.apply(UiEvent::OrdersLoaded {
        request: reload.request(),
        orders: vec![order(1, OrderStatus::Pending.code())],
    });

    let cmds = app.apply(UiEvent::OrderStatusUpdated {
        request: update.request(),
        order_id: OrderId(1),
        status: OrderStatus::Processing.code(),
    });
    assert!(matches!(single(cmds), BackendCommand::ListOrders { .. }));
}

#[test]
fn list_failure_then_refresh_recovers() {
    let (mut app, cmds) = DashboardApp::new(API_URL);
    let first = single(cmds).request();
    app.apply(UiEvent::Failed {
        request: Some(first),
        error: UiError::new(ErrorCode::Network, UiErrorContext::LoadOrders, "refused"),
    });
    let ActiveView::List(list) = app.active() else {
        panic!("expected list view");
    };
    assert!(list.orders().is_empty());
    assert!(list.error().unwrap_or_default().contains(API_URL));
    assert!(!app.is_busy());

    let second = single(app.handle(Action::Refresh)).request();
    app.apply(UiEvent::OrdersLoaded {
        request: second,
        orders: vec![order(4, StatusCode(7))],
    });
    let ActiveView::List(list) = app.active() else {
        panic!("expected list view");
    };
    assert_eq!(list.error(), None);
    assert_eq!(list.orders().len(), 1);
}

#[test]
fn delete_is_explicit_and_refreshes_on_success() {
    let mut app = loaded_list_app();
    let cmd = single(app.handle(Action::DeleteOrder { row: 2 }));
    let BackendCommand::DeleteOrder { request, order_id } = cmd else {
        panic!("expected delete command");
    };
    assert_eq!(order_id, OrderId(2));
    assert!(matches!(app.active(), ActiveView::List(_)));
    let before = app.refresh;

    let cmds = app.apply(UiEvent::OrderDeleted { request, order_id });
    assert!(app.refresh > before);
    assert!(matches!(single(cmds), BackendCommand::ListOrders { .. }));
}

#[test]
fn delete_failure_is_reported_without_leaving_list() {
    let mut app = loaded_list_app();
    let request = single(app.handle(Action::DeleteOrder { row: 1 })).request();
    app.apply(UiEvent::Failed {
        request: Some(request),
        error: UiError::new(ErrorCode::NotFound, UiErrorContext::DeleteOrder, "order 1 not found"),
    });
    assert_eq!(
        app.status_line(),
        Some("Failed to delete order: order 1 not found")
    );
    let ActiveView::List(list) = app.active() else {
        panic!("expected list view");
    };
    assert_eq!(list.orders().len(), 2);
}

#[test]
fn rapid_refreshes_each_bump_the_token() {
    let mut app = loaded_list_app();
    let start = app.refresh.value();
    app.handle(Action::Refresh);
    app.handle(Action::Refresh);
    assert_eq!(app.refresh.value(), start + 2);
}
