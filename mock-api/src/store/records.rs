use payloads::{
    Activity, ActivityId, Attraction, AttractionId, DetailPage, DetailPageId,
    GalleryImage, GalleryImageId, LocationId,
    requests::{
        self, ActivityInput, AttractionInput, DetailPageInput,
        GalleryImageInput,
    },
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::{Data, StoreError};

/// Location-scoped content kept in the store and served by the generic
/// content routes.
pub trait Record: Clone + serde::Serialize + Send + 'static {
    type Id: Copy + Eq + std::fmt::Debug + DeserializeOwned + Send + 'static;
    type Input: DeserializeOwned + Send + 'static;

    fn collection(data: &mut Data) -> &mut Vec<Self>;
    fn not_found() -> StoreError;
    fn new_id() -> Self::Id;
    fn id(&self) -> Self::Id;
    fn location_id(&self) -> LocationId;
    fn input_location(input: &Self::Input) -> Option<LocationId>;
    fn validate(input: &Self::Input) -> Result<(), StoreError>;
    fn build(id: Self::Id, location_id: LocationId, input: Self::Input)
    -> Self;

    /// Reject the record if it clashes with one of `others`.
    fn check_unique(&self, _others: &[Self]) -> Result<(), StoreError> {
        Ok(())
    }
}

fn require_title(title: &str) -> Result<(), StoreError> {
    if title.trim().is_empty() {
        return Err(StoreError::FieldRequired("title"));
    }
    if title.len() > requests::NAME_MAX_LEN * 2 {
        return Err(StoreError::InvalidField("title"));
    }
    Ok(())
}

impl Record for Attraction {
    type Id = AttractionId;
    type Input = AttractionInput;

    fn collection(data: &mut Data) -> &mut Vec<Self> {
        &mut data.attractions
    }

    fn not_found() -> StoreError {
        StoreError::AttractionNotFound
    }

    fn new_id() -> Self::Id {
        AttractionId(Uuid::new_v4())
    }

    fn id(&self) -> Self::Id {
        self.id
    }

    fn location_id(&self) -> LocationId {
        self.location_id
    }

    fn input_location(input: &Self::Input) -> Option<LocationId> {
        input.location_id
    }

    fn validate(input: &Self::Input) -> Result<(), StoreError> {
        require_title(&input.title)?;
        let out_of_range = input.position.is_some_and(|position| {
            !(-90.0..=90.0).contains(&position.lat)
                || !(-180.0..=180.0).contains(&position.lng)
        });
        if out_of_range {
            return Err(StoreError::InvalidField("position"));
        }
        Ok(())
    }

    fn build(id: Self::Id, location_id: LocationId, input: Self::Input) -> Self {
        Attraction {
            id,
            location_id,
            category: input.category,
            title: input.title.trim().to_string(),
            description: input.description,
            image_urls: input.image_urls,
            position: input.position,
        }
    }
}

impl Record for Activity {
    type Id = ActivityId;
    type Input = ActivityInput;

    fn collection(data: &mut Data) -> &mut Vec<Self> {
        &mut data.activities
    }

    fn not_found() -> StoreError {
        StoreError::ActivityNotFound
    }

    fn new_id() -> Self::Id {
        ActivityId(Uuid::new_v4())
    }

    fn id(&self) -> Self::Id {
        self.id
    }

    fn location_id(&self) -> LocationId {
        self.location_id
    }

    fn input_location(input: &Self::Input) -> Option<LocationId> {
        input.location_id
    }

    fn validate(input: &Self::Input) -> Result<(), StoreError> {
        require_title(&input.title)?;
        if input.price.is_some_and(|price| price.is_sign_negative()) {
            return Err(StoreError::InvalidField("price"));
        }
        Ok(())
    }

    fn build(id: Self::Id, location_id: LocationId, input: Self::Input) -> Self {
        Activity {
            id,
            location_id,
            title: input.title.trim().to_string(),
            description: input.description,
            price: input.price,
            duration: input.duration.filter(|d| !d.trim().is_empty()),
            image_urls: input.image_urls,
        }
    }
}

impl Record for GalleryImage {
    type Id = GalleryImageId;
    type Input = GalleryImageInput;

    fn collection(data: &mut Data) -> &mut Vec<Self> {
        &mut data.gallery
    }

    fn not_found() -> StoreError {
        StoreError::GalleryImageNotFound
    }

    fn new_id() -> Self::Id {
        GalleryImageId(Uuid::new_v4())
    }

    fn id(&self) -> Self::Id {
        self.id
    }

    fn location_id(&self) -> LocationId {
        self.location_id
    }

    fn input_location(input: &Self::Input) -> Option<LocationId> {
        input.location_id
    }

    fn validate(input: &Self::Input) -> Result<(), StoreError> {
        if input.url.trim().is_empty() {
            return Err(StoreError::FieldRequired("url"));
        }
        Ok(())
    }

    fn build(id: Self::Id, location_id: LocationId, input: Self::Input) -> Self {
        GalleryImage {
            id,
            location_id,
            url: input.url.trim().to_string(),
            caption: input.caption,
        }
    }
}

impl Record for DetailPage {
    type Id = DetailPageId;
    type Input = DetailPageInput;

    fn collection(data: &mut Data) -> &mut Vec<Self> {
        &mut data.detail_pages
    }

    fn not_found() -> StoreError {
        StoreError::DetailPageNotFound
    }

    fn new_id() -> Self::Id {
        DetailPageId(Uuid::new_v4())
    }

    fn id(&self) -> Self::Id {
        self.id
    }

    fn location_id(&self) -> LocationId {
        self.location_id
    }

    fn input_location(input: &Self::Input) -> Option<LocationId> {
        input.location_id
    }

    fn validate(input: &Self::Input) -> Result<(), StoreError> {
        require_title(&input.title)?;
        if !requests::is_valid_slug(&input.slug) {
            return Err(StoreError::InvalidField("slug"));
        }
        Ok(())
    }

    fn build(id: Self::Id, location_id: LocationId, input: Self::Input) -> Self {
        DetailPage {
            id,
            location_id,
            slug: input.slug,
            title: input.title.trim().to_string(),
            html: input.html,
            hero_image: input.hero_image,
        }
    }

    fn check_unique(&self, others: &[Self]) -> Result<(), StoreError> {
        let taken = others.iter().any(|page| {
            page.id != self.id
                && page.location_id == self.location_id
                && page.slug == self.slug
        });
        if taken {
            return Err(StoreError::SlugTaken {
                slug: self.slug.clone(),
            });
        }
        Ok(())
    }
}
