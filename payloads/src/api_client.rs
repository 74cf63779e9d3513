use crate::{
    Activity, ActivityId, Attraction, AttractionId, DetailPage, DetailPageId,
    ForumPost, GalleryImage, GalleryImageId, Location, LocationId, PostId,
    User, requests, responses,
};
use reqwest::{RequestBuilder, StatusCode, header::AUTHORIZATION};
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the tourism backend.
#[derive(Clone)]
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
    /// Bearer token attached to every request when present.
    pub token: Option<String>,
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            inner_client: reqwest::Client::new(),
            token: None,
        }
    }

    /// A copy of this client that authenticates as the given session.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            address: self.address.clone(),
            inner_client: self.inner_client.clone(),
            token: Some(token.into()),
        }
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => {
                request.header(AUTHORIZATION, format!("Bearer {token}"))
            }
            None => request,
        }
    }

    async fn get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));
        self.authorize(request).send().await
    }

    async fn get_with_query(
        &self,
        path: &str,
        query: &impl Serialize,
    ) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path)).query(query);
        self.authorize(request).send().await
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path)).json(body);
        self.authorize(request).send().await
    }

    async fn put(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.put(self.format_url(path)).json(body);
        self.authorize(request).send().await
    }

    async fn patch(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.patch(self.format_url(path)).json(body);
        self.authorize(request).send().await
    }

    async fn delete(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.delete(self.format_url(path));
        self.authorize(request).send().await
    }
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.get("health_check").await?;
        ok_empty(response).await
    }

    pub async fn login(
        &self,
        details: &requests::LoginCredentials,
    ) -> Result<responses::AuthSession, ClientError> {
        let response = self.post("auth/login", details).await?;
        ok_body(response).await
    }

    pub async fn register(
        &self,
        details: &requests::Register,
    ) -> Result<responses::AuthSession, ClientError> {
        let response = self.post("auth/register", details).await?;
        ok_body(response).await
    }

    /// Create an admin account (superadmin only).
    pub async fn register_admin(
        &self,
        details: &requests::Register,
    ) -> Result<User, ClientError> {
        let response = self.post("auth/register-admin", details).await?;
        ok_body(response).await
    }

    /// List every account (admin+).
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let response = self.get("auth/users").await?;
        ok_body(response).await
    }

    pub async fn list_locations(&self) -> Result<Vec<Location>, ClientError> {
        let response = self.get("locations").await?;
        ok_body(response).await
    }

    pub async fn get_location(
        &self,
        slug: &str,
    ) -> Result<Location, ClientError> {
        let response = self.get(&format!("locations/{slug}")).await?;
        ok_body(response).await
    }

    pub async fn update_location(
        &self,
        location_id: &LocationId,
        details: &requests::LocationUpdate,
    ) -> Result<Location, ClientError> {
        let response =
            self.put(&format!("locations/{location_id}"), details).await?;
        ok_body(response).await
    }

    pub async fn list_attractions(
        &self,
        filter: &requests::LocationFilter,
    ) -> Result<Vec<Attraction>, ClientError> {
        let response = self.get_with_query("attractions", filter).await?;
        ok_body(response).await
    }

    pub async fn create_attraction(
        &self,
        details: &requests::AttractionInput,
    ) -> Result<Attraction, ClientError> {
        let response = self.post("attractions", details).await?;
        ok_body(response).await
    }

    pub async fn update_attraction(
        &self,
        attraction_id: &AttractionId,
        details: &requests::AttractionInput,
    ) -> Result<Attraction, ClientError> {
        let response =
            self.put(&format!("attractions/{attraction_id}"), details).await?;
        ok_body(response).await
    }

    pub async fn delete_attraction(
        &self,
        attraction_id: &AttractionId,
    ) -> Result<(), ClientError> {
        let response =
            self.delete(&format!("attractions/{attraction_id}")).await?;
        ok_empty(response).await
    }

    pub async fn list_activities(
        &self,
        filter: &requests::LocationFilter,
    ) -> Result<Vec<Activity>, ClientError> {
        let response = self.get_with_query("activities", filter).await?;
        ok_body(response).await
    }

    pub async fn create_activity(
        &self,
        details: &requests::ActivityInput,
    ) -> Result<Activity, ClientError> {
        let response = self.post("activities", details).await?;
        ok_body(response).await
    }

    pub async fn update_activity(
        &self,
        activity_id: &ActivityId,
        details: &requests::ActivityInput,
    ) -> Result<Activity, ClientError> {
        let response =
            self.put(&format!("activities/{activity_id}"), details).await?;
        ok_body(response).await
    }

    pub async fn delete_activity(
        &self,
        activity_id: &ActivityId,
    ) -> Result<(), ClientError> {
        let response = self.delete(&format!("activities/{activity_id}")).await?;
        ok_empty(response).await
    }

    pub async fn list_gallery(
        &self,
        filter: &requests::LocationFilter,
    ) -> Result<Vec<GalleryImage>, ClientError> {
        let response = self.get_with_query("gallery", filter).await?;
        ok_body(response).await
    }

    pub async fn create_gallery_image(
        &self,
        details: &requests::GalleryImageInput,
    ) -> Result<GalleryImage, ClientError> {
        let response = self.post("gallery", details).await?;
        ok_body(response).await
    }

    pub async fn update_gallery_image(
        &self,
        image_id: &GalleryImageId,
        details: &requests::GalleryImageInput,
    ) -> Result<GalleryImage, ClientError> {
        let response = self.put(&format!("gallery/{image_id}"), details).await?;
        ok_body(response).await
    }

    pub async fn delete_gallery_image(
        &self,
        image_id: &GalleryImageId,
    ) -> Result<(), ClientError> {
        let response = self.delete(&format!("gallery/{image_id}")).await?;
        ok_empty(response).await
    }

    pub async fn list_detail_pages(
        &self,
        filter: &requests::LocationFilter,
    ) -> Result<Vec<DetailPage>, ClientError> {
        let response = self.get_with_query("detail-pages", filter).await?;
        ok_body(response).await
    }

    /// Fetch a detail page by the slugs used in its route.
    pub async fn get_detail_page(
        &self,
        location_slug: &str,
        page_slug: &str,
    ) -> Result<DetailPage, ClientError> {
        let response = self
            .get(&format!("detail-pages/{location_slug}/{page_slug}"))
            .await?;
        ok_body(response).await
    }

    pub async fn create_detail_page(
        &self,
        details: &requests::DetailPageInput,
    ) -> Result<DetailPage, ClientError> {
        let response = self.post("detail-pages", details).await?;
        ok_body(response).await
    }

    pub async fn update_detail_page(
        &self,
        page_id: &DetailPageId,
        details: &requests::DetailPageInput,
    ) -> Result<DetailPage, ClientError> {
        let response =
            self.put(&format!("detail-pages/{page_id}"), details).await?;
        ok_body(response).await
    }

    pub async fn delete_detail_page(
        &self,
        page_id: &DetailPageId,
    ) -> Result<(), ClientError> {
        let response = self.delete(&format!("detail-pages/{page_id}")).await?;
        ok_empty(response).await
    }

    /// List forum posts. Anything other than approved posts requires an
    /// admin session.
    pub async fn list_posts(
        &self,
        query: &requests::ForumQuery,
    ) -> Result<Vec<ForumPost>, ClientError> {
        let response = self.get_with_query("forum", query).await?;
        ok_body(response).await
    }

    /// Posts written by the current user, in any moderation state.
    pub async fn my_posts(&self) -> Result<Vec<ForumPost>, ClientError> {
        let response = self.get("forum/mine").await?;
        ok_body(response).await
    }

    pub async fn create_post(
        &self,
        details: &requests::NewForumPost,
    ) -> Result<ForumPost, ClientError> {
        let response = self.post("forum", details).await?;
        ok_body(response).await
    }

    pub async fn delete_post(&self, post_id: &PostId) -> Result<(), ClientError> {
        let response = self.delete(&format!("forum/{post_id}")).await?;
        ok_empty(response).await
    }

    pub async fn moderate_post(
        &self,
        post_id: &PostId,
        details: &requests::ModeratePost,
    ) -> Result<ForumPost, ClientError> {
        let response =
            self.patch(&format!("forum/{post_id}/status"), details).await?;
        ok_body(response).await
    }

    /// Upload images, returning their hosted URLs in the same order.
    pub async fn upload_images(
        &self,
        details: &requests::UploadImages,
    ) -> Result<responses::UploadedImages, ClientError> {
        let response = self.post("uploads", details).await?;
        ok_body(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::APIError(status, _) => Some(*status),
            Self::Network(e) => e.status(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.json::<T>().await?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(())
}
