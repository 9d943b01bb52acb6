//! Plain-text rendering of the active view.

use shared::{domain::OrderStatus, protocol::Order};

use crate::ui::{
    app::{ActiveView, DashboardApp, ViewKind},
    create_order::CreateOrderView,
    order_details::OrderDetailsView,
    order_list::OrderListView,
    theme::status_badge,
};

const RULE: &str = "------------------------------------------------------------------------------";

pub fn render(app: &DashboardApp, ansi: bool) -> String {
    let mut lines = vec![
        String::new(),
        "=== Order Management Dashboard ===".to_string(),
        format!("API: {}", app.api_url()),
    ];
    if let Some(status) = app.status_line() {
        lines.push(format!("> {status}"));
    }
    lines.push(String::new());

    match app.active() {
        ActiveView::List(list) => render_list(list, ansi, &mut lines),
        ActiveView::Details(details) => render_details(details, ansi, &mut lines),
        ActiveView::Create(form) => render_create(form, &mut lines),
    }

    lines.push(RULE.to_string());
    lines.push(help_line(app.active().kind()).to_string());
    lines.push(String::new());
    lines.join("\n")
}

pub fn help_line(kind: ViewKind) -> &'static str {
    match kind {
        ViewKind::List => "new | open N | delete N | refresh | help | quit",
        ViewKind::Details => "status CODE|NAME | update | reload | close | help | quit",
        ViewKind::Create => {
            "name TEXT | email TEXT | add | remove N | product N TEXT | qty N V | price N V | submit | cancel | help | quit"
        }
    }
}

fn render_list(list: &OrderListView, ansi: bool, lines: &mut Vec<String>) {
    if list.loading() {
        lines.push("Loading orders...".to_string());
        return;
    }
    if let Some(error) = list.error() {
        lines.push(format!("Error: {error}"));
        return;
    }

    lines.push(format!("Orders ({})", list.orders().len()));
    if list.orders().is_empty() {
        lines.push("No orders found.".to_string());
        return;
    }
    lines.push(format!(
        "{:>3}  {:<18} {:<18} {:<24} {:<10}  {:<12} {:>10}",
        "#", "Order #", "Customer", "Email", "Date", "Status", "Total"
    ));
    for (idx, order) in list.orders().iter().enumerate() {
        lines.push(format!(
            "{:>3}  {:<18} {:<18} {:<24} {:<10}  {} {:>10}",
            idx + 1,
            fit(&order.order_number, 18),
            fit(&order.customer_name, 18),
            fit(&order.customer_email, 24),
            order_date(order, false),
            status_badge(order.status, ansi),
            money(order.total_amount),
        ));
    }
}

fn render_details(details: &OrderDetailsView, ansi: bool, lines: &mut Vec<String>) {
    if details.loading() {
        lines.push("Loading details...".to_string());
        return;
    }
    let Some(order) = details.order() else {
        lines.push(
            details
                .load_error()
                .unwrap_or("Order not found.")
                .to_string(),
        );
        return;
    };

    lines.push(format!("Order Details - {}", order.order_number));
    lines.push(String::new());
    lines.push("Customer Information".to_string());
    lines.push(format!("  Name:       {}", order.customer_name));
    lines.push(format!("  Email:      {}", order.customer_email));
    lines.push(format!("  Order Date: {}", order_date(order, true)));
    lines.push(format!("  Status:     {}", status_badge(order.status, ansi)));
    lines.push(String::new());

    lines.push("Update Order Status".to_string());
    let options: Vec<String> = OrderStatus::ALL
        .into_iter()
        .map(|status| {
            let marker = if status.code() == details.selected_status() {
                "*"
            } else {
                " "
            };
            format!("{marker}{} {}", status.code(), status.label())
        })
        .collect();
    lines.push(format!("  {}", options.join("  ")));
    let control = if details.saving() {
        "Saving..."
    } else if details.can_update() {
        "Update Status: ready (type `update`)"
    } else {
        "Update Status: unchanged"
    };
    lines.push(format!("  {control}"));
    lines.push(String::new());

    lines.push("Order Items".to_string());
    if order.order_items.is_empty() {
        lines.push("  No items in this order.".to_string());
        return;
    }
    lines.push(format!(
        "  {:<24} {:>8} {:>12} {:>12}",
        "Product", "Quantity", "Unit Price", "Subtotal"
    ));
    for item in &order.order_items {
        lines.push(format!(
            "  {:<24} {:>8} {:>12} {:>12}",
            fit(&item.product_name, 24),
            item.quantity,
            money(item.unit_price),
            money(item.subtotal),
        ));
    }
    lines.push(format!("  Total Amount: {}", money(order.total_amount)));
}

fn render_create(form: &CreateOrderView, lines: &mut Vec<String>) {
    lines.push("Create New Order".to_string());
    if let Some(error) = form.error() {
        lines.push(format!("! {error}"));
    }
    lines.push(String::new());
    lines.push("Customer Information".to_string());
    lines.push(format!("  Customer Name *:  {}", form.customer_name()));
    lines.push(format!("  Customer Email *: {}", form.customer_email()));
    lines.push(String::new());
    lines.push("Order Items".to_string());
    for (idx, item) in form.items().iter().enumerate() {
        lines.push(format!(
            "  {:>2}. {:<24} qty {:>4}  price {:>10}  subtotal {:>10}",
            idx + 1,
            fit(&item.product_name, 24),
            item.quantity,
            format!("{:.2}", item.unit_price),
            money(item.subtotal()),
        ));
    }
    lines.push(String::new());
    lines.push(format!("Total Items:  {}", form.item_count()));
    lines.push(format!("Total Amount: {}", money(form.grand_total())));
    if form.loading() {
        lines.push("Creating Order...".to_string());
    }
}

pub fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

fn order_date(order: &Order, with_time: bool) -> String {
    match order.placed_at().map(|ts| ts.naive()) {
        Some(ts) if with_time => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        Some(ts) => ts.format("%Y-%m-%d").to_string(),
        None => order.order_date.clone(),
    }
}

fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}
