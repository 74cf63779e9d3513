use actix_web::{HttpRequest, HttpResponse, get, post, web};
use payloads::{
    MAX_IMAGE_SIZE, MAX_UPLOAD_FILES, requests::UploadImages,
    responses::UploadedImages,
};

use crate::PublicUrl;
use crate::store::Store;

use super::{APIError, get_user};

/// Store a batch of images for any signed-in user, returning their URLs in
/// upload order. The whole batch is rejected if any file is invalid.
#[tracing::instrument(
    skip(request, details, store, public_url),
    fields(user_id = tracing::field::Empty, files = details.files.len())
)]
#[post("/uploads")]
pub async fn upload_images(
    request: HttpRequest,
    details: web::Json<UploadImages>,
    store: web::Data<Store>,
    public_url: web::Data<PublicUrl>,
) -> Result<HttpResponse, APIError> {
    get_user(&request, &store)?;
    let files = details.into_inner().files;
    if files.is_empty() {
        return Err(APIError::BadRequest(anyhow::anyhow!("No files sent")));
    }
    if files.len() > MAX_UPLOAD_FILES {
        return Err(APIError::BadRequest(anyhow::anyhow!(
            "At most {MAX_UPLOAD_FILES} files per upload"
        )));
    }

    let mut checked = Vec::with_capacity(files.len());
    for file in files {
        if file.data.len() > MAX_IMAGE_SIZE {
            return Err(APIError::BadRequest(anyhow::anyhow!(
                "{} exceeds the 5 MB limit",
                file.name
            )));
        }
        let kind = infer::get(&file.data)
            .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
            .ok_or_else(|| {
                APIError::BadRequest(anyhow::anyhow!(
                    "{} is not an image",
                    file.name
                ))
            })?;
        checked.push((kind.extension(), file.data));
    }

    let urls = checked
        .into_iter()
        .map(|(extension, data)| {
            let name = store.save_upload(extension, data);
            format!("{}/api/uploads/{name}", public_url.0)
        })
        .collect();
    Ok(HttpResponse::Ok().json(UploadedImages { urls }))
}

#[tracing::instrument(skip(store))]
#[get("/uploads/{name}")]
pub async fn get_upload(
    name: web::Path<String>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let data = store.upload(&name)?;
    let mime = infer::get(&data)
        .map(|kind| kind.mime_type())
        .unwrap_or("application/octet-stream");
    Ok(HttpResponse::Ok().content_type(mime).body(data))
}
