//! Order entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use super::pincode::Pincode;

/// A customer order, scoped to the pincode it was placed for.
///
/// `created_at` is set once at placement and never changes. Orders are never
/// deleted in normal operation; only `status` moves after placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub product_name: String,
    pub customer_address: String,
    pub pincode: Pincode,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new PENDING order. Inputs are trimmed; blank fields are
    /// rejected upstream before this is reached.
    pub fn place(
        product_name: impl Into<String>,
        customer_address: impl Into<String>,
        pincode: Pincode,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            product_name: product_name.into().trim().to_string(),
            customer_address: customer_address.into().trim().to_string(),
            pincode,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Processing => "PROCESSING",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "PROCESSING" => Ok(Self::Processing),
            "SHIPPED" => Ok(Self::Shipped),
            "DELIVERED" => Ok(Self::Delivered),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown order status {0:?}")]
pub struct UnknownStatus(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placed_order_starts_pending() {
        let order = Order::place("Atta", "123 Lake Rd", Pincode::parse("313001").unwrap());
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.pincode.as_str(), "313001");
    }

    #[test]
    fn place_trims_inputs() {
        let order = Order::place("  Atta ", " 123 Lake Rd ", Pincode::parse("313001").unwrap());
        assert_eq!(order.product_name, "Atta");
        assert_eq!(order.customer_address, "123 Lake Rd");
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("REFUNDED".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn serializes_camel_case_with_uppercase_status() {
        let order = Order::place("Atta", "123 Lake Rd", Pincode::parse("313001").unwrap());
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["productName"], "Atta");
        assert_eq!(json["status"], "PENDING");
    }
}
