//! Order form validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One requested line: a dish and how many of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_name: String,
    pub quantity: i32,
}

/// A customer's submission before it is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderForm {
    pub customer_name: String,
    pub lines: Vec<OrderLine>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Why an order form was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderFormError {
    #[error("customer name must not be empty")]
    EmptyCustomerName,

    #[error("select at least one item")]
    NoItems,

    #[error("{0:?} is not on this menu")]
    UnknownItem(String),

    #[error("{0:?} appears more than once")]
    DuplicateItem(String),

    #[error("quantity for {0:?} must not be negative")]
    NegativeQuantity(String),
}

/// Check a form against a menu's dish list (exact name match).
///
/// A form passes when the customer name is non-blank, every line names a
/// distinct known dish with a non-negative quantity, and at least one line
/// asks for a quantity above zero. Zero-quantity lines are legal here;
/// persistence drops them.
pub fn validate_order_form(
    form: &OrderForm,
    menu_item_names: &[String],
) -> Result<(), OrderFormError> {
    if form.customer_name.trim().is_empty() {
        return Err(OrderFormError::EmptyCustomerName);
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for line in &form.lines {
        if !menu_item_names.iter().any(|name| *name == line.item_name) {
            return Err(OrderFormError::UnknownItem(line.item_name.clone()));
        }
        if line.quantity < 0 {
            return Err(OrderFormError::NegativeQuantity(line.item_name.clone()));
        }
        if !seen.insert(line.item_name.as_str()) {
            return Err(OrderFormError::DuplicateItem(line.item_name.clone()));
        }
    }

    if !form.lines.iter().any(|line| line.quantity > 0) {
        return Err(OrderFormError::NoItems);
    }

    Ok(())
}
