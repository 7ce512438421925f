//! Row types for the lunch-order schema.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One day's menu: a date plus an open/closed ordering flag.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Menu {
    pub id: Uuid,
    pub menu_date: NaiveDate,
    pub is_closed: bool,
    pub created_at: DateTime<Utc>,
}

impl Menu {
    /// Human label for the ordering flag.
    pub fn status_label(&self) -> &'static str {
        if self.is_closed { "closed" } else { "open" }
    }
}

/// A dish offered on a menu. Insertion order (the extraction order) is
/// carried by the serial `id`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MenuItem {
    pub id: i64,
    pub menu_id: Uuid,
    pub item_name: String,
}

/// One customer's submission against a menu.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: Uuid,
    pub menu_id: Uuid,
    pub customer_name: String,
    pub remarks: Option<String>,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
}

/// A line item within an order. Zero quantities are stored as submitted;
/// rendering decides what to show.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderDetail {
    pub id: i64,
    pub order_id: Uuid,
    pub item_name: String,
    pub quantity: i32,
}
