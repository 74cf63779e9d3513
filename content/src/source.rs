use payloads::{
    APIClient, Activity, Attraction, ClientError, DetailPage, ForumPost,
    GalleryImage, Location, LocationId, ModerationStatus,
    requests::{ForumQuery, LocationFilter},
};

/// Read-only view of the backend used by the page loaders.
///
/// `APIClient` is the production implementation; tests substitute in-memory
/// sources to count calls or inject failures.
#[allow(async_fn_in_trait)]
pub trait ContentSource {
    async fn locations(&self) -> Result<Vec<Location>, ClientError>;

    async fn location(&self, slug: &str) -> Result<Location, ClientError>;

    /// Approved reviews, most recent first.
    async fn recent_posts(&self) -> Result<Vec<ForumPost>, ClientError>;

    async fn attractions(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<Attraction>, ClientError>;

    async fn activities(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<Activity>, ClientError>;

    async fn gallery(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<GalleryImage>, ClientError>;

    async fn detail_pages(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<DetailPage>, ClientError>;
}

fn scoped(location_id: LocationId) -> LocationFilter {
    LocationFilter {
        location_id: Some(location_id),
    }
}

impl ContentSource for APIClient {
    async fn locations(&self) -> Result<Vec<Location>, ClientError> {
        self.list_locations().await
    }

    async fn location(&self, slug: &str) -> Result<Location, ClientError> {
        self.get_location(slug).await
    }

    async fn recent_posts(&self) -> Result<Vec<ForumPost>, ClientError> {
        self.list_posts(&ForumQuery {
            status: Some(ModerationStatus::Approved),
            ..Default::default()
        })
        .await
    }

    async fn attractions(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<Attraction>, ClientError> {
        self.list_attractions(&scoped(location_id)).await
    }

    async fn activities(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<Activity>, ClientError> {
        self.list_activities(&scoped(location_id)).await
    }

    async fn gallery(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<GalleryImage>, ClientError> {
        self.list_gallery(&scoped(location_id)).await
    }

    async fn detail_pages(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<DetailPage>, ClientError> {
        self.list_detail_pages(&scoped(location_id)).await
    }
}
