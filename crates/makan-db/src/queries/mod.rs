//! Per-table query modules.

pub mod menu_items;
pub mod menus;
pub mod order_details;
pub mod orders;
