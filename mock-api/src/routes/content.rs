//! CRUD routes shared by attractions, activities, gallery images and detail
//! pages. Listing is public; writes need an admin session.

use actix_web::{HttpRequest, HttpResponse, get, web};
use payloads::requests::LocationFilter;

use crate::store::{Record, Store};

use super::{APIError, get_admin};

/// Register `/{path}` (list, create) and `/{path}/{id}` (update, delete)
/// for one record type.
pub fn configure<R: Record>(cfg: &mut web::ServiceConfig, path: &str) {
    cfg.service(
        web::resource(format!("/{path}"))
            .route(web::get().to(list::<R>))
            .route(web::post().to(create::<R>)),
    )
    .service(
        web::resource(format!("/{path}/{{id}}"))
            .route(web::put().to(update::<R>))
            .route(web::delete().to(delete::<R>)),
    );
}

#[tracing::instrument(skip_all, fields(kind = std::any::type_name::<R>()))]
async fn list<R: Record>(
    filter: web::Query<LocationFilter>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    Ok(HttpResponse::Ok().json(store.list::<R>(&filter)))
}

#[tracing::instrument(
    skip_all,
    fields(kind = std::any::type_name::<R>(), user_id = tracing::field::Empty)
)]
async fn create<R: Record>(
    request: HttpRequest,
    input: web::Json<R::Input>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    get_admin(&request, &store)?;
    let record = store.create::<R>(input.into_inner())?;
    Ok(HttpResponse::Ok().json(record))
}

#[tracing::instrument(
    skip_all,
    fields(kind = std::any::type_name::<R>(), user_id = tracing::field::Empty)
)]
async fn update<R: Record>(
    request: HttpRequest,
    id: web::Path<R::Id>,
    input: web::Json<R::Input>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    get_admin(&request, &store)?;
    let record = store.update::<R>(id.into_inner(), input.into_inner())?;
    Ok(HttpResponse::Ok().json(record))
}

#[tracing::instrument(
    skip_all,
    fields(kind = std::any::type_name::<R>(), user_id = tracing::field::Empty)
)]
async fn delete<R: Record>(
    request: HttpRequest,
    id: web::Path<R::Id>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    get_admin(&request, &store)?;
    store.delete::<R>(id.into_inner())?;
    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(skip(store))]
#[get("/detail-pages/{location_slug}/{page_slug}")]
pub async fn get_detail_page(
    path: web::Path<(String, String)>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let (location_slug, page_slug) = path.into_inner();
    let page = store.detail_page(&location_slug, &page_slug)?;
    Ok(HttpResponse::Ok().json(page))
}
