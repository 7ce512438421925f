//! Order aggregation into a chat-ready summary.

pub mod format;
pub mod service;

pub use format::{NO_ORDERS_SENTINEL, SummaryEntry, format_order_summary};
pub use service::{load_summary_entries, render_menu_summary};
