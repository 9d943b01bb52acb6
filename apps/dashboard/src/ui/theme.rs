//! Status badge palette.

use shared::domain::{OrderStatus, StatusCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusColor {
    pub hex: &'static str,
    rgb: (u8, u8, u8),
}

impl StatusColor {
    const fn new(hex: &'static str, rgb: (u8, u8, u8)) -> Self {
        Self { hex, rgb }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        self.rgb
    }
}

pub const PENDING_AMBER: StatusColor = StatusColor::new("#ffc107", (0xff, 0xc1, 0x07));
pub const PROCESSING_BLUE: StatusColor = StatusColor::new("#2196F3", (0x21, 0x96, 0xf3));
pub const SHIPPED_PURPLE: StatusColor = StatusColor::new("#9c27b0", (0x9c, 0x27, 0xb0));
pub const DELIVERED_GREEN: StatusColor = StatusColor::new("#4caf50", (0x4c, 0xaf, 0x50));
pub const CANCELLED_RED: StatusColor = StatusColor::new("#f44336", (0xf4, 0x43, 0x36));
pub const DEFAULT_GRAY: StatusColor = StatusColor::new("#999999", (0x99, 0x99, 0x99));

pub fn status_color(code: StatusCode) -> StatusColor {
    match code.status() {
        Some(OrderStatus::Pending) => PENDING_AMBER,
        Some(OrderStatus::Processing) => PROCESSING_BLUE,
        Some(OrderStatus::Shipped) => SHIPPED_PURPLE,
        Some(OrderStatus::Delivered) => DELIVERED_GREEN,
        Some(OrderStatus::Cancelled) => CANCELLED_RED,
        None => DEFAULT_GRAY,
    }
}

/// Status label, padded and painted on its palette colour when `ansi` is set.
pub fn status_badge(code: StatusCode, ansi: bool) -> String {
    let label = format!(" {:<10} ", code.label());
    if !ansi {
        return label;
    }
    let (r, g, b) = status_color(code).rgb();
    format!("\x1b[48;2;{r};{g};{b}m\x1b[38;2;255;255;255m{label}\x1b[0m")
}
