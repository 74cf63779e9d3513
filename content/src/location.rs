use payloads::{
    Activity, Attraction, AttractionCategory, ClientError, DetailPage,
    GalleryImage, Location,
};

use crate::{
    map::{MapMarker, markers_for},
    source::ContentSource,
};

/// Everything a location page renders, merged from several endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationPage {
    pub location: Location,
    pub attractions: Vec<Attraction>,
    pub hotels: Vec<Attraction>,
    pub restaurants: Vec<Attraction>,
    pub activities: Vec<Activity>,
    pub gallery: Vec<GalleryImage>,
    pub detail_pages: Vec<DetailPage>,
}

impl LocationPage {
    pub fn assemble(
        location: Location,
        attractions: Vec<Attraction>,
        activities: Vec<Activity>,
        gallery: Vec<GalleryImage>,
        detail_pages: Vec<DetailPage>,
    ) -> Self {
        let mut page = Self {
            location,
            attractions: Vec::new(),
            hotels: Vec::new(),
            restaurants: Vec::new(),
            activities,
            gallery,
            detail_pages,
        };
        for attraction in attractions {
            match attraction.category {
                AttractionCategory::Attraction => {
                    page.attractions.push(attraction)
                }
                AttractionCategory::Hotel => page.hotels.push(attraction),
                AttractionCategory::Restaurant => {
                    page.restaurants.push(attraction)
                }
            }
        }
        page
    }

    /// Markers for every place on the page that has coordinates.
    pub fn markers(&self) -> Vec<MapMarker> {
        let places: Vec<Attraction> = self
            .attractions
            .iter()
            .chain(&self.hotels)
            .chain(&self.restaurants)
            .cloned()
            .collect();
        markers_for(&places)
    }
}

/// Load the full page for a location slug. The location is resolved first,
/// then its content is requested concurrently.
pub async fn load_location_page<S: ContentSource>(
    source: &S,
    slug: &str,
) -> Result<LocationPage, ClientError> {
    let location = source.location(slug).await?;
    let (attractions, activities, gallery, detail_pages) = futures::try_join!(
        source.attractions(location.id),
        source.activities(location.id),
        source.gallery(location.id),
        source.detail_pages(location.id),
    )?;
    tracing::debug!(
        slug,
        attractions = attractions.len(),
        activities = activities.len(),
        "loaded location page"
    );
    Ok(LocationPage::assemble(
        location,
        attractions,
        activities,
        gallery,
        detail_pages,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSource;

    #[tokio::test]
    async fn merges_content_by_category() {
        let source = FakeSource::two_locations();
        let page = load_location_page(&source, "valle-verde").await.unwrap();

        assert_eq!(page.location.name, "Valle Verde");
        assert_eq!(page.attractions.len(), 1);
        assert_eq!(page.hotels.len(), 1);
        assert_eq!(page.restaurants.len(), 1);
        assert!(
            page.hotels
                .iter()
                .all(|h| h.category == AttractionCategory::Hotel)
        );
        assert_eq!(page.activities.len(), 1);
        assert_eq!(page.gallery.len(), 6);
        assert_eq!(page.detail_pages.len(), 1);
        assert!(
            page.gallery
                .iter()
                .all(|g| g.location_id == page.location.id)
        );

        let calls = source.calls();
        assert_eq!(calls.location, 1);
        assert_eq!(calls.attractions, 1);
        assert_eq!(calls.activities, 1);
        assert_eq!(calls.gallery, 1);
        assert_eq!(calls.detail_pages, 1);
    }

    #[tokio::test]
    async fn every_load_hits_the_network() {
        let source = FakeSource::two_locations();
        load_location_page(&source, "puerto-sol").await.unwrap();
        load_location_page(&source, "puerto-sol").await.unwrap();
        assert_eq!(source.calls().location, 2);
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let source = FakeSource::two_locations();
        let err = load_location_page(&source, "atlantida").await.unwrap_err();
        assert!(err.is_not_found());
        // content is never requested for a missing location
        assert_eq!(source.calls().attractions, 0);
    }

    #[tokio::test]
    async fn gallery_failure_fails_the_page() {
        let source = FakeSource::two_locations();
        source.fail_gallery(true);
        assert!(load_location_page(&source, "puerto-sol").await.is_err());
    }

    #[tokio::test]
    async fn markers_skip_places_without_coordinates() {
        let source = FakeSource::two_locations();
        let page = load_location_page(&source, "puerto-sol").await.unwrap();
        // the fake restaurant has no position
        assert_eq!(page.markers().len(), 2);
    }
}
