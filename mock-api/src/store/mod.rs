//! In-memory persistence for the mock api.
//!
//! Everything lives behind one mutex. Handlers never hold the lock across an
//! await point; every method here is synchronous.

mod records;
pub mod seed;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use jiff::Timestamp;
use payloads::{
    ForumPost, Location, LocationId, ModerationStatus, PostId, Role, User,
    UserId,
    requests::{self, ForumQuery, LocationFilter, LocationUpdate, NewForumPost},
};
use secrecy::{ExposeSecret, SecretBox};
use uuid::Uuid;

pub use records::Record;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Session not found")]
    SessionNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("Location not found")]
    LocationNotFound,
    #[error("Attraction not found")]
    AttractionNotFound,
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Gallery image not found")]
    GalleryImageNotFound,
    #[error("Detail page not found")]
    DetailPageNotFound,
    #[error("Post not found")]
    PostNotFound,
    #[error("Upload not found")]
    UploadNotFound,
    #[error("An account with this email already exists")]
    EmailTaken,
    #[error("A page with the slug '{slug}' already exists for this location")]
    SlugTaken { slug: String },
    #[error("Missing required field: {0}")]
    FieldRequired(&'static str),
    #[error("Invalid value for field: {0}")]
    InvalidField(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("Admin permissions required")]
    RequiresAdmin,
    #[error("Superadmin permissions required")]
    RequiresSuperAdmin,
    #[error("Only the author or an admin can do this")]
    NotOwner,
    #[error("Unexpected error")]
    UnexpectedError(#[from] anyhow::Error),
}

struct StoredUser {
    user: User,
    password_hash: SecretBox<String>,
}

/// Opaque to callers outside the store.
#[derive(Default)]
pub struct Data {
    users: Vec<StoredUser>,
    sessions: HashMap<String, UserId>,
    locations: Vec<Location>,
    attractions: Vec<payloads::Attraction>,
    activities: Vec<payloads::Activity>,
    gallery: Vec<payloads::GalleryImage>,
    detail_pages: Vec<payloads::DetailPage>,
    /// Newest first.
    posts: Vec<ForumPost>,
    uploads: HashMap<String, Vec<u8>>,
}

#[derive(Default)]
pub struct Store {
    data: Mutex<Data>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn data(&self) -> MutexGuard<'_, Data> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: SecretBox<String>,
        role: Role,
    ) -> Result<User, StoreError> {
        let name = name.trim();
        let email = email.trim().to_lowercase();
        if name.is_empty() {
            return Err(StoreError::FieldRequired("name"));
        }
        if name.len() > requests::NAME_MAX_LEN {
            return Err(StoreError::InvalidField("name"));
        }
        if !requests::is_valid_email(&email) {
            return Err(StoreError::InvalidField("email"));
        }

        let mut data = self.data();
        if data.users.iter().any(|stored| stored.user.email == email) {
            return Err(StoreError::EmailTaken);
        }
        let user = User {
            id: UserId(Uuid::new_v4()),
            name: name.to_string(),
            email,
            role,
        };
        data.users.push(StoredUser {
            user: user.clone(),
            password_hash,
        });
        Ok(user)
    }

    /// The user with this email and a copy of their password hash.
    pub fn credentials(
        &self,
        email: &str,
    ) -> Option<(User, SecretBox<String>)> {
        let email = email.trim().to_lowercase();
        self.data()
            .users
            .iter()
            .find(|stored| stored.user.email == email)
            .map(|stored| {
                (
                    stored.user.clone(),
                    SecretBox::new(Box::new(
                        stored.password_hash.expose_secret().clone(),
                    )),
                )
            })
    }

    pub fn users(&self) -> Vec<User> {
        self.data()
            .users
            .iter()
            .map(|stored| stored.user.clone())
            .collect()
    }

    pub fn start_session(&self, user_id: UserId) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.data().sessions.insert(token.clone(), user_id);
        token
    }

    pub fn session_user(&self, token: &str) -> Result<User, StoreError> {
        let data = self.data();
        let user_id = data
            .sessions
            .get(token)
            .ok_or(StoreError::SessionNotFound)?;
        data.users
            .iter()
            .find(|stored| stored.user.id == *user_id)
            .map(|stored| stored.user.clone())
            .ok_or(StoreError::UserNotFound)
    }

    pub fn locations(&self) -> Vec<Location> {
        self.data().locations.clone()
    }

    pub fn location_by_slug(&self, slug: &str) -> Result<Location, StoreError> {
        self.data()
            .locations
            .iter()
            .find(|location| location.slug == slug)
            .cloned()
            .ok_or(StoreError::LocationNotFound)
    }

    pub fn update_location(
        &self,
        location_id: LocationId,
        details: LocationUpdate,
    ) -> Result<Location, StoreError> {
        if details.name.trim().is_empty() {
            return Err(StoreError::FieldRequired("name"));
        }
        if !(-90.0..=90.0).contains(&details.center.lat)
            || !(-180.0..=180.0).contains(&details.center.lng)
        {
            return Err(StoreError::InvalidField("center"));
        }
        let mut data = self.data();
        let location = data
            .locations
            .iter_mut()
            .find(|location| location.id == location_id)
            .ok_or(StoreError::LocationNotFound)?;
        location.name = details.name.trim().to_string();
        location.accent = details.accent;
        location.hero = details.hero;
        location.center = details.center;
        location.zoom = details.zoom;
        location.tagline = details.tagline;
        location.description = details.description;
        Ok(location.clone())
    }

    pub(crate) fn insert_location(&self, location: Location) {
        self.data().locations.push(location);
    }

    pub fn list<R: Record>(&self, filter: &LocationFilter) -> Vec<R> {
        let mut data = self.data();
        R::collection(&mut data)
            .iter()
            .filter(|record| {
                filter
                    .location_id
                    .is_none_or(|id| record.location_id() == id)
            })
            .cloned()
            .collect()
    }

    pub fn get<R: Record>(&self, id: R::Id) -> Result<R, StoreError> {
        let mut data = self.data();
        R::collection(&mut data)
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(R::not_found)
    }

    pub fn create<R: Record>(&self, input: R::Input) -> Result<R, StoreError> {
        R::validate(&input)?;
        let location_id = R::input_location(&input)
            .ok_or(StoreError::FieldRequired("location_id"))?;
        let mut data = self.data();
        if !data.locations.iter().any(|l| l.id == location_id) {
            return Err(StoreError::LocationNotFound);
        }
        let record = R::build(R::new_id(), location_id, input);
        record.check_unique(R::collection(&mut data))?;
        R::collection(&mut data).push(record.clone());
        Ok(record)
    }

    /// Replace a record's fields. A missing `location_id` keeps the current
    /// location.
    pub fn update<R: Record>(
        &self,
        id: R::Id,
        input: R::Input,
    ) -> Result<R, StoreError> {
        R::validate(&input)?;
        let mut data = self.data();
        let current = R::collection(&mut data)
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(R::not_found)?;
        let location_id =
            R::input_location(&input).unwrap_or(current.location_id());
        if !data.locations.iter().any(|l| l.id == location_id) {
            return Err(StoreError::LocationNotFound);
        }
        let updated = R::build(id, location_id, input);
        let others: Vec<R> = R::collection(&mut data)
            .iter()
            .filter(|record| record.id() != id)
            .cloned()
            .collect();
        updated.check_unique(&others)?;
        let records = R::collection(&mut data);
        if let Some(slot) = records.iter_mut().find(|record| record.id() == id)
        {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    pub fn delete<R: Record>(&self, id: R::Id) -> Result<(), StoreError> {
        let mut data = self.data();
        let records = R::collection(&mut data);
        let before = records.len();
        records.retain(|record| record.id() != id);
        if records.len() == before {
            return Err(R::not_found());
        }
        Ok(())
    }

    pub fn detail_page(
        &self,
        location_slug: &str,
        page_slug: &str,
    ) -> Result<payloads::DetailPage, StoreError> {
        let location = self.location_by_slug(location_slug)?;
        self.data()
            .detail_pages
            .iter()
            .find(|page| page.location_id == location.id && page.slug == page_slug)
            .cloned()
            .ok_or(StoreError::DetailPageNotFound)
    }

    /// Posts matching the query, newest first. Callers that are not admins
    /// only ever see approved posts.
    pub fn posts(
        &self,
        query: &ForumQuery,
        viewer: Option<&User>,
    ) -> Result<Vec<ForumPost>, StoreError> {
        let is_admin = viewer.is_some_and(|user| user.role.is_admin());
        let status = match query.status {
            Some(ModerationStatus::Approved) => Some(ModerationStatus::Approved),
            Some(_) if !is_admin => return Err(StoreError::RequiresAdmin),
            Some(status) => Some(status),
            None if is_admin => None,
            None => Some(ModerationStatus::Approved),
        };
        let posts = self
            .data()
            .posts
            .iter()
            .filter(|post| status.is_none_or(|s| post.status == s))
            .filter(|post| {
                query.location_id.is_none_or(|id| post.location_id == id)
            })
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(posts)
    }

    pub fn posts_by(&self, user_id: UserId) -> Vec<ForumPost> {
        self.data()
            .posts
            .iter()
            .filter(|post| post.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn create_post(
        &self,
        author: &User,
        details: NewForumPost,
        now: Timestamp,
    ) -> Result<ForumPost, StoreError> {
        details.validate().map_err(StoreError::InvalidInput)?;
        let mut data = self.data();
        if !data.locations.iter().any(|l| l.id == details.location_id) {
            return Err(StoreError::LocationNotFound);
        }
        let post = ForumPost {
            id: PostId(Uuid::new_v4()),
            author: author.name.clone(),
            rating: details.rating,
            body: details.body.trim().to_string(),
            image_urls: details.image_urls,
            status: ModerationStatus::Pending,
            user_id: author.id,
            location_id: details.location_id,
            created_at: now,
        };
        data.posts.insert(0, post.clone());
        Ok(post)
    }

    /// Authors may delete their own posts; admins may delete any.
    pub fn delete_post(
        &self,
        actor: &User,
        post_id: PostId,
    ) -> Result<(), StoreError> {
        let mut data = self.data();
        let index = data
            .posts
            .iter()
            .position(|post| post.id == post_id)
            .ok_or(StoreError::PostNotFound)?;
        if !actor.role.is_admin() && data.posts[index].user_id != actor.id {
            return Err(StoreError::NotOwner);
        }
        data.posts.remove(index);
        Ok(())
    }

    pub fn set_post_status(
        &self,
        post_id: PostId,
        status: ModerationStatus,
    ) -> Result<ForumPost, StoreError> {
        let mut data = self.data();
        let post = data
            .posts
            .iter_mut()
            .find(|post| post.id == post_id)
            .ok_or(StoreError::PostNotFound)?;
        post.status = status;
        Ok(post.clone())
    }

    pub(crate) fn insert_post(&self, post: ForumPost) {
        self.data().posts.insert(0, post);
    }

    /// Keep an uploaded file under a fresh name, returning that name.
    pub fn save_upload(&self, extension: &str, bytes: Vec<u8>) -> String {
        let name = format!("{}.{extension}", Uuid::new_v4().simple());
        self.data().uploads.insert(name.clone(), bytes);
        name
    }

    pub fn upload(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        self.data()
            .uploads
            .get(name)
            .cloned()
            .ok_or(StoreError::UploadNotFound)
    }
}

#[cfg(test)]
mod tests {
    use payloads::{
        AttractionCategory, GalleryImage,
        requests::{AttractionInput, DetailPageInput, GalleryImageInput},
    };

    use super::*;

    fn hash() -> SecretBox<String> {
        SecretBox::new(Box::new("not-a-real-hash".to_string()))
    }

    fn seeded() -> Store {
        let store = Store::new();
        seed::locations(&store);
        store
    }

    #[test]
    fn emails_are_unique_ignoring_case() {
        let store = Store::new();
        store
            .insert_user("Ana", "ana@example.com", hash(), Role::User)
            .unwrap();
        let err = store
            .insert_user("Ana 2", "ANA@example.com", hash(), Role::User)
            .unwrap_err();
        assert!(matches!(err, StoreError::EmailTaken));
    }

    #[test]
    fn sessions_resolve_to_users() {
        let store = Store::new();
        let user = store
            .insert_user("Ana", "ana@example.com", hash(), Role::Admin)
            .unwrap();
        let token = store.start_session(user.id);
        assert_eq!(store.session_user(&token).unwrap(), user);
        assert!(matches!(
            store.session_user("nope"),
            Err(StoreError::SessionNotFound)
        ));
    }

    #[test]
    fn content_requires_an_existing_location() {
        let store = seeded();
        let err = store
            .create::<payloads::Attraction>(AttractionInput {
                title: "Faro".into(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::FieldRequired("location_id")));

        let err = store
            .create::<payloads::Attraction>(AttractionInput {
                location_id: Some(LocationId(Uuid::new_v4())),
                title: "Faro".into(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::LocationNotFound));
    }

    #[test]
    fn list_filters_by_location() {
        let store = seeded();
        let [first, second] = [0, 1].map(|i| store.locations()[i].id);
        for location_id in [first, second, second] {
            store
                .create::<GalleryImage>(GalleryImageInput {
                    location_id: Some(location_id),
                    url: "/img.jpg".into(),
                    caption: String::new(),
                })
                .unwrap();
        }
        let scoped = store.list::<GalleryImage>(&LocationFilter {
            location_id: Some(second),
        });
        assert_eq!(scoped.len(), 2);
        assert!(scoped.iter().all(|image| image.location_id == second));
        assert_eq!(store.list::<GalleryImage>(&LocationFilter::default()).len(), 3);
    }

    #[test]
    fn update_keeps_location_when_omitted() {
        let store = seeded();
        let location_id = store.locations()[0].id;
        let created = store
            .create::<payloads::Attraction>(AttractionInput {
                location_id: Some(location_id),
                title: "Hotel Mar".into(),
                category: AttractionCategory::Hotel,
                ..Default::default()
            })
            .unwrap();
        let updated = store
            .update::<payloads::Attraction>(
                created.id,
                AttractionInput {
                    title: "Hotel Mar Azul".into(),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.location_id, location_id);
        assert_eq!(updated.title, "Hotel Mar Azul");
        assert_eq!(
            store.get::<payloads::Attraction>(created.id).unwrap(),
            updated
        );
    }

    #[test]
    fn detail_page_slugs_are_unique_per_location() {
        let store = seeded();
        let location = store.locations()[0].clone();
        let input = DetailPageInput {
            location_id: Some(location.id),
            slug: "gastronomia".into(),
            title: "Gastronomía".into(),
            html: "<p>Mole</p>".into(),
            hero_image: None,
        };
        store.create::<payloads::DetailPage>(input.clone()).unwrap();
        let err = store
            .create::<payloads::DetailPage>(input)
            .unwrap_err();
        assert!(matches!(err, StoreError::SlugTaken { .. }));

        let page = store.detail_page(&location.slug, "gastronomia").unwrap();
        assert_eq!(page.title, "Gastronomía");
    }

    #[test]
    fn public_viewers_only_see_approved_posts() {
        let store = seeded();
        let author = store
            .insert_user("Ana", "ana@example.com", hash(), Role::User)
            .unwrap();
        let post = store
            .create_post(
                &author,
                NewForumPost {
                    location_id: store.locations()[0].id,
                    rating: 4,
                    body: "Excelente".into(),
                    image_urls: vec![],
                },
                Timestamp::now(),
            )
            .unwrap();
        assert_eq!(post.status, ModerationStatus::Pending);

        let public = store.posts(&ForumQuery::default(), None).unwrap();
        assert!(public.iter().all(|p| p.id != post.id));

        let pending = ForumQuery {
            status: Some(ModerationStatus::Pending),
            ..Default::default()
        };
        assert!(matches!(
            store.posts(&pending, Some(&author)),
            Err(StoreError::RequiresAdmin)
        ));
        assert_eq!(store.posts_by(author.id).len(), 1);
    }

    #[test]
    fn only_authors_and_admins_delete_posts() {
        let store = seeded();
        let author = store
            .insert_user("Ana", "ana@example.com", hash(), Role::User)
            .unwrap();
        let other = store
            .insert_user("Luis", "luis@example.com", hash(), Role::User)
            .unwrap();
        let post = store
            .create_post(
                &author,
                NewForumPost {
                    location_id: store.locations()[1].id,
                    rating: 5,
                    body: "Volveremos".into(),
                    image_urls: vec![],
                },
                Timestamp::now(),
            )
            .unwrap();
        assert!(matches!(
            store.delete_post(&other, post.id),
            Err(StoreError::NotOwner)
        ));
        store.delete_post(&author, post.id).unwrap();
        assert!(matches!(
            store.delete_post(&author, post.id),
            Err(StoreError::PostNotFound)
        ));
    }
}
