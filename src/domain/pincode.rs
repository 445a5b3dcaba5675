//! Pincode value object

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Postal code used as the exact-match routing key for both product
/// visibility and order notification.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pincode(String);

impl Pincode {
    pub fn parse(value: &str) -> Result<Self, PincodeError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(PincodeError::Empty);
        }
        if value.len() != 6 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PincodeError::Malformed(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Pincode {
    type Err = PincodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Pincode {
    type Error = PincodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Pincode> for String {
    fn from(pincode: Pincode) -> Self {
        pincode.0
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PincodeError {
    #[error("pincode is required")]
    Empty,
    #[error("pincode must be exactly 6 digits, got {0:?}")]
    Malformed(String),
}
