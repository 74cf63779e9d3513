use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};
use jiff::Timestamp;
use payloads::{
    PostId,
    requests::{ForumQuery, ModeratePost, NewForumPost},
};

use crate::store::Store;

use super::{APIError, get_admin, get_optional_user, get_user};

/// Approved posts for everyone; admins may ask for other statuses.
#[tracing::instrument(skip(request, store))]
#[get("/forum")]
pub async fn list_posts(
    request: HttpRequest,
    query: web::Query<ForumQuery>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let viewer = get_optional_user(&request, &store);
    let posts = store.posts(&query, viewer.as_ref())?;
    Ok(HttpResponse::Ok().json(posts))
}

#[tracing::instrument(
    skip(request, store),
    fields(user_id = tracing::field::Empty)
)]
#[get("/forum/mine")]
pub async fn my_posts(
    request: HttpRequest,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let user = get_user(&request, &store)?;
    Ok(HttpResponse::Ok().json(store.posts_by(user.id)))
}

/// New posts wait for moderation before they are shown.
#[tracing::instrument(
    skip(request, details, store),
    fields(user_id = tracing::field::Empty)
)]
#[post("/forum")]
pub async fn create_post(
    request: HttpRequest,
    details: web::Json<NewForumPost>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let user = get_user(&request, &store)?;
    let post =
        store.create_post(&user, details.into_inner(), Timestamp::now())?;
    Ok(HttpResponse::Ok().json(post))
}

#[tracing::instrument(
    skip(request, store),
    fields(user_id = tracing::field::Empty)
)]
#[delete("/forum/{post_id}")]
pub async fn delete_post(
    request: HttpRequest,
    post_id: web::Path<PostId>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let user = get_user(&request, &store)?;
    store.delete_post(&user, post_id.into_inner())?;
    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(
    skip(request, store),
    fields(user_id = tracing::field::Empty),
    ret
)]
#[patch("/forum/{post_id}/status")]
pub async fn moderate_post(
    request: HttpRequest,
    post_id: web::Path<PostId>,
    details: web::Json<ModeratePost>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    get_admin(&request, &store)?;
    let post = store.set_post_status(post_id.into_inner(), details.status)?;
    Ok(HttpResponse::Ok().json(post))
}
