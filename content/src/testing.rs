//! In-memory `ContentSource` for unit tests.

use std::cell::{Cell, RefCell};

use jiff::Timestamp;
use payloads::{
    AccentColor, Activity, ActivityId, Attraction, AttractionCategory,
    AttractionId, ClientError, Coordinates, DetailPage, DetailPageId,
    ForumPost, GalleryImage, GalleryImageId, HeroImage, Location, LocationId,
    ModerationStatus, PostId, StatusCode, UserId,
};
use uuid::Uuid;

use crate::source::ContentSource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calls {
    pub locations: usize,
    pub location: usize,
    pub posts: usize,
    pub attractions: usize,
    pub activities: usize,
    pub gallery: usize,
    pub detail_pages: usize,
}

pub struct FakeSource {
    locations: Vec<Location>,
    posts: Vec<ForumPost>,
    attractions: Vec<Attraction>,
    activities: Vec<Activity>,
    gallery: Vec<GalleryImage>,
    detail_pages: Vec<DetailPage>,
    calls: RefCell<Calls>,
    fail_posts: Cell<bool>,
    fail_gallery: Cell<bool>,
}

fn server_error() -> ClientError {
    ClientError::APIError(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Something went wrong".into(),
    )
}

pub fn location(name: &str, slug: &str, accent: AccentColor) -> Location {
    Location {
        id: LocationId(Uuid::new_v4()),
        name: name.into(),
        slug: slug.into(),
        accent,
        hero: HeroImage {
            url: format!("/img/{slug}/hero.jpg"),
            alt: name.into(),
        },
        center: Coordinates {
            lat: 20.5,
            lng: -105.2,
        },
        zoom: 13,
        tagline: format!("Descubre {name}"),
        description: String::new(),
    }
}

impl FakeSource {
    /// Two locations, five approved reviews, six gallery images per location
    /// and one attraction of each category per location.
    pub fn two_locations() -> Self {
        let locations = vec![
            location("Puerto Sol", "puerto-sol", AccentColor::Orange),
            location("Valle Verde", "valle-verde", AccentColor::Green),
        ];

        let base: Timestamp = "2025-05-01T00:00:00Z".parse().unwrap();
        let posts = (0..5)
            .map(|i| ForumPost {
                id: PostId(Uuid::new_v4()),
                author: format!("visitante {i}"),
                rating: 5 - (i % 5) as u8,
                body: format!("reseña {i}"),
                image_urls: vec![],
                status: ModerationStatus::Approved,
                user_id: UserId(Uuid::new_v4()),
                location_id: locations[i % 2].id,
                created_at: base,
            })
            .collect();

        let mut attractions = Vec::new();
        let mut activities = Vec::new();
        let mut gallery = Vec::new();
        let mut detail_pages = Vec::new();
        for location in &locations {
            for (i, category) in AttractionCategory::ALL.into_iter().enumerate()
            {
                attractions.push(Attraction {
                    id: AttractionId(Uuid::new_v4()),
                    location_id: location.id,
                    category,
                    title: format!("{} {}", category.label(), location.name),
                    description: String::new(),
                    image_urls: vec![],
                    position: (i != 2).then_some(Coordinates {
                        lat: 20.0 + i as f64,
                        lng: -105.0,
                    }),
                });
            }
            activities.push(Activity {
                id: ActivityId(Uuid::new_v4()),
                location_id: location.id,
                title: format!("Kayak en {}", location.name),
                description: String::new(),
                price: None,
                duration: Some("2 horas".into()),
                image_urls: vec![],
            });
            for i in 0..6 {
                gallery.push(GalleryImage {
                    id: GalleryImageId(Uuid::new_v4()),
                    location_id: location.id,
                    url: format!("/img/{}/{i}.jpg", location.slug),
                    caption: String::new(),
                });
            }
            detail_pages.push(DetailPage {
                id: DetailPageId(Uuid::new_v4()),
                location_id: location.id,
                slug: "historia".into(),
                title: "Historia".into(),
                html: "<p>Fundada en 1850</p>".into(),
                hero_image: None,
            });
        }

        Self {
            locations,
            posts,
            attractions,
            activities,
            gallery,
            detail_pages,
            calls: RefCell::default(),
            fail_posts: Cell::new(false),
            fail_gallery: Cell::new(false),
        }
    }

    pub fn calls(&self) -> Calls {
        *self.calls.borrow()
    }

    pub fn fail_posts(&self, fail: bool) {
        self.fail_posts.set(fail);
    }

    pub fn fail_gallery(&self, fail: bool) {
        self.fail_gallery.set(fail);
    }

    pub fn locations_data(&self) -> &[Location] {
        &self.locations
    }

    pub fn posts(&self) -> Vec<ForumPost> {
        self.posts.clone()
    }

    pub fn gallery_urls(&self) -> Vec<String> {
        self.gallery.iter().map(|image| image.url.clone()).collect()
    }

    fn scoped<T: Clone>(
        items: &[T],
        location_id: LocationId,
        owner: impl Fn(&T) -> LocationId,
    ) -> Vec<T> {
        items
            .iter()
            .filter(|item| owner(item) == location_id)
            .cloned()
            .collect()
    }
}

impl ContentSource for FakeSource {
    async fn locations(&self) -> Result<Vec<Location>, ClientError> {
        self.calls.borrow_mut().locations += 1;
        Ok(self.locations.clone())
    }

    async fn location(&self, slug: &str) -> Result<Location, ClientError> {
        self.calls.borrow_mut().location += 1;
        self.locations
            .iter()
            .find(|l| l.slug == slug)
            .cloned()
            .ok_or_else(|| {
                ClientError::APIError(StatusCode::NOT_FOUND, "Not found".into())
            })
    }

    async fn recent_posts(&self) -> Result<Vec<ForumPost>, ClientError> {
        self.calls.borrow_mut().posts += 1;
        if self.fail_posts.get() {
            return Err(server_error());
        }
        Ok(self.posts.clone())
    }

    async fn attractions(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<Attraction>, ClientError> {
        self.calls.borrow_mut().attractions += 1;
        Ok(Self::scoped(&self.attractions, location_id, |a| a.location_id))
    }

    async fn activities(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<Activity>, ClientError> {
        self.calls.borrow_mut().activities += 1;
        Ok(Self::scoped(&self.activities, location_id, |a| a.location_id))
    }

    async fn gallery(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<GalleryImage>, ClientError> {
        self.calls.borrow_mut().gallery += 1;
        if self.fail_gallery.get() {
            return Err(server_error());
        }
        Ok(Self::scoped(&self.gallery, location_id, |g| g.location_id))
    }

    async fn detail_pages(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<DetailPage>, ClientError> {
        self.calls.borrow_mut().detail_pages += 1;
        Ok(Self::scoped(&self.detail_pages, location_id, |d| d.location_id))
    }
}
