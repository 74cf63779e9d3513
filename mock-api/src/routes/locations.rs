use actix_web::{HttpRequest, HttpResponse, get, put, web};
use payloads::{LocationId, requests::LocationUpdate};

use crate::store::Store;

use super::{APIError, get_admin};

#[tracing::instrument(skip(store))]
#[get("/locations")]
pub async fn list_locations(
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    Ok(HttpResponse::Ok().json(store.locations()))
}

#[tracing::instrument(skip(store))]
#[get("/locations/{slug}")]
pub async fn get_location(
    slug: web::Path<String>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let location = store.location_by_slug(&slug)?;
    Ok(HttpResponse::Ok().json(location))
}

#[tracing::instrument(
    skip(request, details, store),
    fields(user_id = tracing::field::Empty),
    ret
)]
#[put("/locations/{location_id}")]
pub async fn update_location(
    request: HttpRequest,
    location_id: web::Path<LocationId>,
    details: web::Json<LocationUpdate>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    get_admin(&request, &store)?;
    let location =
        store.update_location(location_id.into_inner(), details.into_inner())?;
    Ok(HttpResponse::Ok().json(location))
}
