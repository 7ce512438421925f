//! Menu extraction and creation.

pub mod extract;
pub mod service;

pub use extract::{ExtractRules, extract_menu_items, extract_with_rules};
pub use service::{MenuExport, MenuOverview, create_menu_from_text, menu_export, menu_overview};
