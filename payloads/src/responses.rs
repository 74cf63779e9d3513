use serde::{Deserialize, Serialize};

use crate::User;

/// Returned by login and register. The token is sent back as a bearer
/// header on later requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Hosted URLs for uploaded images, in upload order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImages {
    pub urls: Vec<String>,
}
