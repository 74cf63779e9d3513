use crate::{
    AccentColor, AttractionCategory, Coordinates, HeroImage, LocationId,
    ModerationStatus,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const PASSWORD_MIN_LEN: usize = 8;
pub const NAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 255;
pub const REVIEW_MAX_LEN: usize = 2000;
pub const SLUG_MAX_LEN: usize = 80;
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Register {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Register {
    /// Client-side checks before sending the request. Returns the first
    /// problem found as a user-facing message.
    pub fn validate(&self) -> Result<(), &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Ingresa tu nombre");
        }
        if name.len() > NAME_MAX_LEN {
            return Err("El nombre es demasiado largo");
        }
        if !is_valid_email(&self.email) {
            return Err("Ingresa un correo electrónico válido");
        }
        if self.password.len() < PASSWORD_MIN_LEN {
            return Err("La contraseña debe tener al menos 8 caracteres");
        }
        Ok(())
    }
}

/// Loose email shape check: one `@` with something on both sides and a dot
/// in the domain. The backend owns real validation.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > EMAIL_MAX_LEN {
        return false;
    }
    let Some((local, domain)) = email.trim().split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Slugs address locations and detail pages in routes.
///
/// Rules:
/// - 1-80 characters
/// - lowercase ASCII letters, digits and `-`
/// - no leading or trailing `-`
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.len() > SLUG_MAX_LEN {
        return false;
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return false;
    }
    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Turn a title into a slug candidate ("Cascada El Salto" ->
/// "cascada-el-salto"). Accented vowels are folded to ASCII.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;
    for c in title.chars().flat_map(char::to_lowercase) {
        let c = match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        };
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.truncate(SLUG_MAX_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub name: String,
    pub accent: AccentColor,
    pub hero: HeroImage,
    pub center: Coordinates,
    pub zoom: u8,
    pub tagline: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttractionInput {
    pub location_id: Option<LocationId>,
    pub category: AttractionCategory,
    pub title: String,
    pub description: String,
    pub image_urls: Vec<String>,
    pub position: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActivityInput {
    pub location_id: Option<LocationId>,
    pub title: String,
    pub description: String,
    pub price: Option<Decimal>,
    pub duration: Option<String>,
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetailPageInput {
    pub location_id: Option<LocationId>,
    pub slug: String,
    pub title: String,
    pub html: String,
    pub hero_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GalleryImageInput {
    pub location_id: Option<LocationId>,
    pub url: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewForumPost {
    pub location_id: LocationId,
    pub rating: u8,
    pub body: String,
    pub image_urls: Vec<String>,
}

impl NewForumPost {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(RATING_MIN..=RATING_MAX).contains(&self.rating) {
            return Err("La calificación debe estar entre 1 y 5");
        }
        let body = self.body.trim();
        if body.is_empty() {
            return Err("Escribe tu reseña");
        }
        if body.chars().count() > REVIEW_MAX_LEN {
            return Err("La reseña no puede superar los 2000 caracteres");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeratePost {
    pub status: ModerationStatus,
}

/// Filter for list endpoints scoped to a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ForumQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ModerationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadImages {
    pub files: Vec<UploadFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_rules() {
        assert!(is_valid_slug("playa-blanca"));
        assert!(is_valid_slug("ruta-2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-playa"));
        assert!(!is_valid_slug("playa-"));
        assert!(!is_valid_slug("Playa"));
        assert!(!is_valid_slug("playa blanca"));
    }

    #[test]
    fn slugify_folds_accents_and_spaces() {
        assert_eq!(slugify("Cascada El Salto"), "cascada-el-salto");
        assert_eq!(slugify("  Peñón de Aguas Frías! "), "penon-de-aguas-frias");
        assert!(is_valid_slug(&slugify("Museo Histórico (Centro)")));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ana@example.com"));
        assert!(!is_valid_email("ana.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana@@example.com"));
    }

    #[test]
    fn review_validation() {
        let mut post = NewForumPost {
            location_id: LocationId(uuid::Uuid::new_v4()),
            rating: 5,
            body: "Excelente lugar".into(),
            image_urls: vec![],
        };
        assert!(post.validate().is_ok());

        post.rating = 0;
        assert!(post.validate().is_err());
        post.rating = 6;
        assert!(post.validate().is_err());

        post.rating = 3;
        post.body = "   ".into();
        assert!(post.validate().is_err());

        post.body = "x".repeat(REVIEW_MAX_LEN + 1);
        assert!(post.validate().is_err());
    }

    #[test]
    fn register_validation() {
        let mut details = Register {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "contrasena".into(),
        };
        assert!(details.validate().is_ok());

        details.password = "corta".into();
        assert!(details.validate().is_err());

        details.password = "contrasena".into();
        details.name = " ".into();
        assert!(details.validate().is_err());
    }
}
