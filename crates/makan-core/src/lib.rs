//! Core logic for makan: turning pasted chat messages into menus, validating
//! order submissions, and rendering chat-ready order summaries.

pub mod menu;
pub mod order;
pub mod summary;
