pub mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};
pub use reqwest::StatusCode;

use derive_more::Display;
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Largest single file accepted by the upload endpoint.
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;
/// Most files accepted in one upload request.
pub const MAX_UPLOAD_FILES: usize = 10;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LocationId(pub Uuid);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AttractionId(pub Uuid);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ActivityId(pub Uuid);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DetailPageId(pub Uuid);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GalleryImageId(pub Uuid);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PostId(pub Uuid);

/// Per-location theme token. Only used for styling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    #[default]
    Orange,
    Cyan,
    Green,
}

impl AccentColor {
    pub const ALL: [AccentColor; 3] =
        [AccentColor::Orange, AccentColor::Cyan, AccentColor::Green];
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatus {
    pub const ALL: [ModerationStatus; 3] = [
        ModerationStatus::Pending,
        ModerationStatus::Approved,
        ModerationStatus::Rejected,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Approved => "Aprobada",
            Self::Rejected => "Rechazada",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    Admin,
    #[serde(rename = "SUPERADMIN")]
    SuperAdmin,
}

impl Role {
    /// Admins and superadmins moderate reviews and edit content.
    pub fn is_admin(&self) -> bool {
        *self >= Role::Admin
    }

    /// Only superadmins create other admin accounts.
    pub fn can_manage_admins(&self) -> bool {
        *self == Role::SuperAdmin
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeroImage {
    pub url: String,
    pub alt: String,
}

/// One of the promoted municipalities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub slug: String,
    pub accent: AccentColor,
    pub hero: HeroImage,
    pub center: Coordinates,
    pub zoom: u8,
    pub tagline: String,
    pub description: String,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttractionCategory {
    #[default]
    Attraction,
    Hotel,
    Restaurant,
}

impl AttractionCategory {
    pub const ALL: [AttractionCategory; 3] = [
        AttractionCategory::Attraction,
        AttractionCategory::Hotel,
        AttractionCategory::Restaurant,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Attraction => "Atractivo",
            Self::Hotel => "Hotel",
            Self::Restaurant => "Restaurante",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub id: AttractionId,
    pub location_id: LocationId,
    pub category: AttractionCategory,
    pub title: String,
    pub description: String,
    pub image_urls: Vec<String>,
    pub position: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub location_id: LocationId,
    pub title: String,
    pub description: String,
    pub price: Option<Decimal>,
    pub duration: Option<String>,
    pub image_urls: Vec<String>,
}

/// An ad-hoc HTML content page scoped to a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailPage {
    pub id: DetailPageId,
    pub location_id: LocationId,
    pub slug: String,
    pub title: String,
    pub html: String,
    pub hero_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: GalleryImageId,
    pub location_id: LocationId,
    pub url: String,
    pub caption: String,
}

/// A visitor review. Only approved posts are shown publicly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: PostId,
    pub author: String,
    pub rating: u8,
    pub body: String,
    pub image_urls: Vec<String>,
    pub status: ModerationStatus,
    pub user_id: UserId,
    pub location_id: LocationId,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_permissions_are_ordered() {
        assert!(!Role::User.is_admin());
        assert!(Role::Admin.is_admin());
        assert!(Role::SuperAdmin.is_admin());
        assert!(!Role::Admin.can_manage_admins());
        assert!(Role::SuperAdmin.can_manage_admins());
    }

    #[test]
    fn enums_use_backend_casing() {
        assert_eq!(
            serde_json::to_string(&ModerationStatus::Pending).unwrap(),
            r#""PENDING""#
        );
        assert_eq!(
            serde_json::to_string(&Role::SuperAdmin).unwrap(),
            r#""SUPERADMIN""#
        );
        assert_eq!(
            serde_json::to_string(&AccentColor::Cyan).unwrap(),
            r#""cyan""#
        );
        assert_eq!(
            serde_json::from_str::<AttractionCategory>(r#""RESTAURANT""#)
                .unwrap(),
            AttractionCategory::Restaurant
        );
    }
}
