//! Domain entities: typed records for every managed resource
//!
//! Field names follow the remote table schema (snake_case), so serialized
//! rows are interchangeable with what the hosted backend stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Insurance company carried by the brokerage network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub classification: Option<String>,
    pub contact_email: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,
    pub agent_access_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Free-form specification block attached to a company (commissions,
/// claim handling, contact protocol, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySpecification {
    pub id: String,
    pub company_id: String,
    pub category: String,
    pub content: String,
}

/// Product classification node. `parent_id` references another category's
/// id; `None` marks a root. The nested tree shape is assembled at read time
/// by [`crate::domain::CategoryForest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Product lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Inactive,
    Pending,
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(ProductStatus::Active),
            "inactive" => Ok(ProductStatus::Inactive),
            "pending" => Ok(ProductStatus::Pending),
            other => Err(format!(
                "unknown product status: {other} (expected active, inactive or pending)"
            )),
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Active => write!(f, "active"),
            ProductStatus::Inactive => write!(f, "inactive"),
            ProductStatus::Pending => write!(f, "pending"),
        }
    }
}

/// Insurance product offered by a company, classified by category and
/// optional subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub subcategory_id: Option<String>,
    pub company_id: String,
    pub description: Option<String>,
    pub status: ProductStatus,
    pub strengths: Option<String>,
    pub weaknesses: Option<String>,
    pub processes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Stored document record. `file_url` points into the file store; the bytes
/// themselves never pass through the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category_id: String,
    pub company_id: Option<String>,
    pub product_id: Option<String>,
    pub product_category_id: Option<String>,
    pub product_subcategory_id: Option<String>,
    pub file_url: String,
    pub file_type: String,
    pub file_size: u64,
    #[serde(default)]
    pub tags: Vec<String>,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Network member account. Authentication lives with the hosted provider;
/// this record only carries the directory profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub position: Option<String>,
    pub extension: Option<String>,
    pub social_contact: Option<String>,
    pub branch_id: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Physical branch office of the brokerage network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub contact_person: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// News article or announcement published on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: String,
    pub company_id: Option<String>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: String,
    pub published_at: DateTime<Utc>,
}

/// Calendar entry owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub user_id: String,
}
