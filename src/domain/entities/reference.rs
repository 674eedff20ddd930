//! Reference data that products and wishlist entries point at.

use chrono::{DateTime, Utc};
use std::fmt;

/// Tables that can be the target of a foreign-key existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reference {
    Users,
    Categories,
    Products,
}

impl Reference {
    /// Table name in storage.
    pub fn table(&self) -> &'static str {
        match self {
            Reference::Users => "users",
            Reference::Categories => "categories",
            Reference::Products => "products",
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// A marketplace user (seller or buyer).
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A product category.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
