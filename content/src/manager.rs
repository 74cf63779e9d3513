//! Admin CRUD managers.
//!
//! Every manager in the back-office has the same shape: a list, an optional
//! draft being edited, and a save that creates or updates depending on
//! whether the draft already has an id. After any mutation the list is
//! reloaded wholesale.

use std::fmt::Debug;

use payloads::{
    APIClient, Activity, ActivityId, Attraction, AttractionId, ClientError,
    DetailPage, DetailPageId, GalleryImage, GalleryImageId, LocationId,
    requests::{
        ActivityInput, AttractionInput, DetailPageInput, GalleryImageInput,
        LocationFilter, UploadFile, UploadImages,
    },
};

pub const SAVE_ERROR_MESSAGE: &str = "Error al guardar los cambios";
pub const LIST_ERROR_MESSAGE: &str = "No se pudo cargar la lista";
pub const DELETE_ERROR_MESSAGE: &str = "No se pudo eliminar el elemento";
pub const UPLOAD_ERROR_MESSAGE: &str = "No se pudieron subir las imágenes";

/// A record managed from the back-office.
pub trait Resource: Clone + PartialEq + Debug + 'static {
    type Id: Copy + Eq + Debug + 'static;
    type Input: Clone + PartialEq + Debug + Default + 'static;

    fn id(&self) -> Self::Id;
    fn title(&self) -> &str;
    fn to_input(&self) -> Self::Input;
    /// Blank input for a new record, pre-scoped to a location when the
    /// manager has one.
    fn new_input(location_id: Option<LocationId>) -> Self::Input;
}

/// Inputs that hold hosted image URLs.
pub trait AcceptsUploads {
    fn attach_urls(&mut self, urls: Vec<String>);
}

#[allow(async_fn_in_trait)]
pub trait CrudBackend<R: Resource> {
    async fn list(&self, filter: &LocationFilter) -> Result<Vec<R>, ClientError>;
    async fn create(&self, input: &R::Input) -> Result<R, ClientError>;
    async fn update(&self, id: R::Id, input: &R::Input)
    -> Result<R, ClientError>;
    async fn delete(&self, id: R::Id) -> Result<(), ClientError>;
}

#[allow(async_fn_in_trait)]
pub trait ImageUploader {
    async fn upload(&self, files: Vec<UploadFile>)
    -> Result<Vec<String>, ClientError>;
}

impl ImageUploader for APIClient {
    async fn upload(
        &self,
        files: Vec<UploadFile>,
    ) -> Result<Vec<String>, ClientError> {
        let uploaded = self.upload_images(&UploadImages { files }).await?;
        Ok(uploaded.urls)
    }
}

/// Draft being edited. `id` is `None` for records not created yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft<R: Resource> {
    pub id: Option<R::Id>,
    pub input: R::Input,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrudManager<R: Resource> {
    pub scope: Option<LocationId>,
    pub items: Vec<R>,
    pub editing: Option<Draft<R>>,
    pub error: Option<String>,
}

impl<R: Resource> Default for CrudManager<R> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<R: Resource> CrudManager<R> {
    pub fn new(scope: Option<LocationId>) -> Self {
        Self {
            scope,
            items: Vec::new(),
            editing: None,
            error: None,
        }
    }

    fn filter(&self) -> LocationFilter {
        LocationFilter {
            location_id: self.scope,
        }
    }

    pub fn start_create(&mut self) {
        self.error = None;
        self.editing = Some(Draft {
            id: None,
            input: R::new_input(self.scope),
        });
    }

    /// Open the edit form for a listed item. Returns false if it is not in
    /// the list.
    pub fn start_edit(&mut self, id: R::Id) -> bool {
        let Some(item) = self.items.iter().find(|item| item.id() == id) else {
            return false;
        };
        self.error = None;
        self.editing = Some(Draft {
            id: Some(id),
            input: item.to_input(),
        });
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.error = None;
    }

    /// Adopt the state an operation produced from a copy of this manager.
    /// Results for another scope are dropped. Returns whether it was kept.
    pub fn absorb(&mut self, finished: Self) -> bool {
        if finished.scope != self.scope {
            tracing::debug!(
                "dropping result for {:?}, now showing {:?}",
                finished.scope,
                self.scope
            );
            return false;
        }
        *self = finished;
        true
    }

    pub fn update_draft(&mut self, edit: impl FnOnce(&mut R::Input)) {
        if let Some(draft) = self.editing.as_mut() {
            edit(&mut draft.input);
        }
    }

    pub async fn reload<B: CrudBackend<R>>(
        &mut self,
        backend: &B,
    ) -> Result<(), ClientError> {
        match backend.list(&self.filter()).await {
            Ok(items) => {
                self.items = items;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("failed to list records: {e}");
                self.error = Some(LIST_ERROR_MESSAGE.to_string());
                Err(e)
            }
        }
    }

    /// Save the current draft. Creates when the draft has no id, updates
    /// otherwise. On failure the draft stays open with an error message.
    pub async fn submit<B: CrudBackend<R>>(
        &mut self,
        backend: &B,
    ) -> Result<R, ClientError> {
        let Some(draft) = self.editing.clone() else {
            return Err(ClientError::APIError(
                payloads::StatusCode::BAD_REQUEST,
                "Nothing to save".into(),
            ));
        };

        let saved = match draft.id {
            None => backend.create(&draft.input).await,
            Some(id) => backend.update(id, &draft.input).await,
        };

        match saved {
            Ok(record) => {
                self.editing = None;
                self.error = None;
                // a failed reload leaves its own error; the save succeeded
                let _ = self.reload(backend).await;
                Ok(record)
            }
            Err(e) => {
                tracing::warn!("failed to save {:?}: {e}", draft.id);
                self.error = Some(SAVE_ERROR_MESSAGE.to_string());
                Err(e)
            }
        }
    }

    pub async fn delete<B: CrudBackend<R>>(
        &mut self,
        backend: &B,
        id: R::Id,
    ) -> Result<(), ClientError> {
        if let Err(e) = backend.delete(id).await {
            tracing::warn!("failed to delete {id:?}: {e}");
            self.error = Some(DELETE_ERROR_MESSAGE.to_string());
            return Err(e);
        }
        if self
            .editing
            .as_ref()
            .is_some_and(|draft| draft.id == Some(id))
        {
            self.editing = None;
        }
        self.error = None;
        let _ = self.reload(backend).await;
        Ok(())
    }

    /// Create one record per input, then reload. Stops at the first failure.
    pub async fn create_each<B: CrudBackend<R>>(
        &mut self,
        backend: &B,
        inputs: Vec<R::Input>,
    ) -> Result<usize, ClientError> {
        let mut created = 0;
        for input in &inputs {
            if let Err(e) = backend.create(input).await {
                tracing::warn!("failed to create record: {e}");
                self.error = Some(SAVE_ERROR_MESSAGE.to_string());
                let _ = self.reload(backend).await;
                return Err(e);
            }
            created += 1;
        }
        let _ = self.reload(backend).await;
        Ok(created)
    }
}

impl<R: Resource> CrudManager<R>
where
    R::Input: AcceptsUploads,
{
    /// Upload files and splice their URLs into the open draft. Nothing is
    /// saved until the draft is submitted.
    pub async fn upload_into_draft<U: ImageUploader>(
        &mut self,
        uploader: &U,
        files: Vec<UploadFile>,
    ) -> Result<usize, ClientError> {
        if files.is_empty() || self.editing.is_none() {
            return Ok(0);
        }
        match uploader.upload(files).await {
            Ok(urls) => {
                let count = urls.len();
                self.update_draft(|input| input.attach_urls(urls));
                Ok(count)
            }
            Err(e) => {
                tracing::warn!("image upload failed: {e}");
                self.error = Some(UPLOAD_ERROR_MESSAGE.to_string());
                Err(e)
            }
        }
    }
}

impl Resource for Attraction {
    type Id = AttractionId;
    type Input = AttractionInput;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn to_input(&self) -> Self::Input {
        AttractionInput {
            location_id: Some(self.location_id),
            category: self.category,
            title: self.title.clone(),
            description: self.description.clone(),
            image_urls: self.image_urls.clone(),
            position: self.position,
        }
    }

    fn new_input(location_id: Option<LocationId>) -> Self::Input {
        AttractionInput {
            location_id,
            ..Default::default()
        }
    }
}

impl Resource for Activity {
    type Id = ActivityId;
    type Input = ActivityInput;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn to_input(&self) -> Self::Input {
        ActivityInput {
            location_id: Some(self.location_id),
            title: self.title.clone(),
            description: self.description.clone(),
            price: self.price,
            duration: self.duration.clone(),
            image_urls: self.image_urls.clone(),
        }
    }

    fn new_input(location_id: Option<LocationId>) -> Self::Input {
        ActivityInput {
            location_id,
            ..Default::default()
        }
    }
}

impl Resource for GalleryImage {
    type Id = GalleryImageId;
    type Input = GalleryImageInput;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn title(&self) -> &str {
        if self.caption.is_empty() {
            &self.url
        } else {
            &self.caption
        }
    }

    fn to_input(&self) -> Self::Input {
        GalleryImageInput {
            location_id: Some(self.location_id),
            url: self.url.clone(),
            caption: self.caption.clone(),
        }
    }

    fn new_input(location_id: Option<LocationId>) -> Self::Input {
        GalleryImageInput {
            location_id,
            ..Default::default()
        }
    }
}

impl Resource for DetailPage {
    type Id = DetailPageId;
    type Input = DetailPageInput;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn to_input(&self) -> Self::Input {
        DetailPageInput {
            location_id: Some(self.location_id),
            slug: self.slug.clone(),
            title: self.title.clone(),
            html: self.html.clone(),
            hero_image: self.hero_image.clone(),
        }
    }

    fn new_input(location_id: Option<LocationId>) -> Self::Input {
        DetailPageInput {
            location_id,
            ..Default::default()
        }
    }
}

impl AcceptsUploads for AttractionInput {
    fn attach_urls(&mut self, urls: Vec<String>) {
        self.image_urls.extend(urls);
    }
}

impl AcceptsUploads for ActivityInput {
    fn attach_urls(&mut self, urls: Vec<String>) {
        self.image_urls.extend(urls);
    }
}

/// A gallery record holds one image; the last upload wins.
impl AcceptsUploads for GalleryImageInput {
    fn attach_urls(&mut self, urls: Vec<String>) {
        if let Some(url) = urls.into_iter().last() {
            self.url = url;
        }
    }
}

/// Detail pages take the upload as their hero image.
impl AcceptsUploads for DetailPageInput {
    fn attach_urls(&mut self, urls: Vec<String>) {
        if let Some(url) = urls.into_iter().last() {
            self.hero_image = Some(url);
        }
    }
}

impl CrudBackend<Attraction> for APIClient {
    async fn list(
        &self,
        filter: &LocationFilter,
    ) -> Result<Vec<Attraction>, ClientError> {
        self.list_attractions(filter).await
    }

    async fn create(
        &self,
        input: &AttractionInput,
    ) -> Result<Attraction, ClientError> {
        self.create_attraction(input).await
    }

    async fn update(
        &self,
        id: AttractionId,
        input: &AttractionInput,
    ) -> Result<Attraction, ClientError> {
        self.update_attraction(&id, input).await
    }

    async fn delete(&self, id: AttractionId) -> Result<(), ClientError> {
        self.delete_attraction(&id).await
    }
}

impl CrudBackend<Activity> for APIClient {
    async fn list(
        &self,
        filter: &LocationFilter,
    ) -> Result<Vec<Activity>, ClientError> {
        self.list_activities(filter).await
    }

    async fn create(
        &self,
        input: &ActivityInput,
    ) -> Result<Activity, ClientError> {
        self.create_activity(input).await
    }

    async fn update(
        &self,
        id: ActivityId,
        input: &ActivityInput,
    ) -> Result<Activity, ClientError> {
        self.update_activity(&id, input).await
    }

    async fn delete(&self, id: ActivityId) -> Result<(), ClientError> {
        self.delete_activity(&id).await
    }
}

impl CrudBackend<GalleryImage> for APIClient {
    async fn list(
        &self,
        filter: &LocationFilter,
    ) -> Result<Vec<GalleryImage>, ClientError> {
        self.list_gallery(filter).await
    }

    async fn create(
        &self,
        input: &GalleryImageInput,
    ) -> Result<GalleryImage, ClientError> {
        self.create_gallery_image(input).await
    }

    async fn update(
        &self,
        id: GalleryImageId,
        input: &GalleryImageInput,
    ) -> Result<GalleryImage, ClientError> {
        self.update_gallery_image(&id, input).await
    }

    async fn delete(&self, id: GalleryImageId) -> Result<(), ClientError> {
        self.delete_gallery_image(&id).await
    }
}

impl CrudBackend<DetailPage> for APIClient {
    async fn list(
        &self,
        filter: &LocationFilter,
    ) -> Result<Vec<DetailPage>, ClientError> {
        self.list_detail_pages(filter).await
    }

    async fn create(
        &self,
        input: &DetailPageInput,
    ) -> Result<DetailPage, ClientError> {
        self.create_detail_page(input).await
    }

    async fn update(
        &self,
        id: DetailPageId,
        input: &DetailPageInput,
    ) -> Result<DetailPage, ClientError> {
        self.update_detail_page(&id, input).await
    }

    async fn delete(&self, id: DetailPageId) -> Result<(), ClientError> {
        self.delete_detail_page(&id).await
    }
}
