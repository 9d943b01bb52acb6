//! UI layer: root coordinator, views, rendering, and the terminal loop.

pub mod app;
pub mod create_order;
pub mod order_details;
pub mod order_list;
pub mod render;
pub mod terminal;
pub mod theme;

pub use app::DashboardApp;
