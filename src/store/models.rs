//! Store Models - record types held by the session store (serde/JSON).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Internal account record. Holds the plaintext password of the simulated
/// store and therefore never crosses the service boundary; call `public()`
/// to get the exposable view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: u64,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub password: String,
}

impl UserRecord {
    /// Password-stripped view of the record.
    pub fn public(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            phone: self.phone.clone(),
            created_at: self.created_at,
        }
    }
}

/// User as returned by the store - no password field exists on this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Successful authentication result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// Single gallery photo. The url is either an external link (seed data) or
/// an inline data URL (uploads), so the record is self-contained across the
/// storage serialize/deserialize round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: u64,
    pub url: String,
}

/// Portfolio category, identified by slug. Categories are fixed at seed
/// time; only their photo lists change at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioCategory {
    pub id: String,
    pub name: String,
    pub subcategories: Vec<String>,
    pub cover_image: String,
    pub photos: Vec<Photo>,
}

/// Service package offered by the studio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: u64,
    pub name: String,
    pub base_price: i64,
    pub discount: u32,
    pub description: String,
    pub final_price: i64,
}

impl Service {
    /// Derived-price rule. Recomputed on every create and update so a stored
    /// `final_price` can never drift from `base_price` and `discount`.
    pub fn final_price_for(base_price: i64, discount: u32) -> i64 {
        (base_price as f64 * (1.0 - f64::from(discount) / 100.0)).round() as i64
    }
}

/// Fields for a new service; id and final price are assigned by the store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    pub name: String,
    pub base_price: i64,
    pub discount: u32,
    pub description: String,
}

/// Contact form submission (append-only log)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Fields for a new contact submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEnquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Customer review
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: u64,
    pub name: String,
    pub rating: u8,
    pub review: String,
    pub timestamp: DateTime<Utc>,
}

/// Fields for a new review
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    pub name: String,
    pub rating: u8,
    pub review: String,
}

/// Singleton editable site copy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub about_intro: String,
    pub home_hero_title: String,
    pub home_hero_subtitle: String,
}

/// Partial site-content update; provided fields overwrite, missing fields
/// are retained.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContentPatch {
    pub about_intro: Option<String>,
    pub home_hero_title: Option<String>,
    pub home_hero_subtitle: Option<String>,
}

/// Partial profile update applied by an admin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub phone: Option<String>,
}
