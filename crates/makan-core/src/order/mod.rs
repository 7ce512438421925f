//! Order intake: form validation and persistence.

pub mod form;
pub mod service;

pub use form::{OrderForm, OrderFormError, OrderLine, validate_order_form};
pub use service::{insert_order_with_details, submit_order};
