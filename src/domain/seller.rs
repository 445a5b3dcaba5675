//! Seller entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::pincode::Pincode;

/// A seller registered for one pincode. A pincode is serviceable exactly
/// when at least one seller is registered for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: Uuid,
    pub name: String,
    pub pincode: Pincode,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Seller {
    pub fn register(
        name: impl Into<String>,
        pincode: Pincode,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into().trim().to_string(),
            pincode,
            category: category.into().trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
