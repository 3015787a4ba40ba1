use std::io::Write;

use chrono::{DateTime, Utc};
use diesel::deserialize::{self, FromSql};
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsChangeset, AsExpression, FromSqlRow, Identifiable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Order lifecycle states. `Delivered` and `Cancelled` are terminal: a
/// cancel request against either is rejected. No other transition rule is
/// enforced on update.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow, Serialize, Deserialize, ToSchema,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    ReadyForPickup,
    OutForDelivery,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::ReadyForPickup => "ready_for_pickup",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }

    pub fn get_enum_from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(OrderStatus::Pending),
            "confirmed" => Some(OrderStatus::Confirmed),
            "preparing" => Some(OrderStatus::Preparing),
            "ready_for_pickup" => Some(OrderStatus::ReadyForPickup),
            "out_for_delivery" => Some(OrderStatus::OutForDelivery),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            "refunded" => Some(OrderStatus::Refunded),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl ToSql<Text, Pg> for OrderStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for OrderStatus {
    fn from_sql(value: PgValue<'_>) -> deserialize::Result<Self> {
        let raw = std::str::from_utf8(value.as_bytes())?;
        OrderStatus::get_enum_from_str(raw)
            .ok_or_else(|| format!("unrecognized order status '{raw}'").into())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow, Serialize, Deserialize, ToSchema,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn get_enum_from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

impl ToSql<Text, Pg> for PaymentStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for PaymentStatus {
    fn from_sql(value: PgValue<'_>) -> deserialize::Result<Self> {
        let raw = std::str::from_utf8(value.as_bytes())?;
        PaymentStatus::get_enum_from_str(raw)
            .ok_or_else(|| format!("unrecognized payment status '{raw}'").into())
    }
}

#[derive(Queryable, Selectable, Debug, Clone, Identifiable, Serialize, ToSchema)]
#[diesel(table_name = crate::db::schema::orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    pub id: i32,
    pub customer_id: i32,
    pub restaurant_id: i32,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub delivery_address: Option<String>,
    pub delivery_latitude: Option<f64>,
    pub delivery_longitude: Option<f64>,
    pub payment_method: Option<String>,
    pub payment_status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    pub estimated_delivery_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug, Clone, Identifiable, Serialize, ToSchema)]
#[diesel(table_name = crate::db::schema::order_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub menu_item_id: i32,
    pub quantity: i32,
    pub price_at_order: f64,
    pub notes: Option<String>,
}

#[derive(AsChangeset, Debug, Clone, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::orders)]
pub struct UpdateOrder {
    pub status: Option<OrderStatus>,
    pub estimated_delivery_time: Option<DateTime<Utc>>,
}

impl UpdateOrder {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.estimated_delivery_time.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_round_trips_through_text() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::ReadyForPickup,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Refunded,
        ] {
            assert_eq!(OrderStatus::get_enum_from_str(status.as_str()), Some(status));
        }
    }

    #[test]
    fn order_status_rejects_unknown_values() {
        assert_eq!(OrderStatus::get_enum_from_str("shipped"), None);
        assert_eq!(OrderStatus::get_enum_from_str(""), None);
        assert_eq!(PaymentStatus::get_enum_from_str("declined"), None);
    }

    #[test]
    fn only_delivered_and_cancelled_are_terminal() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Refunded.is_terminal());
        assert!(!OrderStatus::OutForDelivery.is_terminal());
    }

    #[test]
    fn update_order_is_empty_only_without_fields() {
        let empty = UpdateOrder {
            status: None,
            estimated_delivery_time: None,
        };
        assert!(empty.is_empty());

        let with_status = UpdateOrder {
            status: Some(OrderStatus::Confirmed),
            estimated_delivery_time: None,
        };
        assert!(!with_status.is_empty());
    }
}
