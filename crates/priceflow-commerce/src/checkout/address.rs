//! Address types.

use serde::{Deserialize, Serialize};

/// Country every placeholder address starts with.
pub const DEFAULT_COUNTRY: &str = "India";

/// A postal address as the orders endpoint expects it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

impl Address {
    /// Empty address for checkout to fill in.
    pub fn placeholder() -> Self {
        Self {
            full_name: String::new(),
            phone: String::new(),
            email: String::new(),
            street: String::new(),
            city: String::new(),
            state: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            postal_code: String::new(),
        }
    }

    /// Check if nothing but the country has been filled in.
    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }

    /// Format as single line, skipping empty parts.
    pub fn one_line(&self) -> String {
        [
            &self.street,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .map(|part| part.as_str())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::placeholder()
    }
}
