pub mod auth;
pub mod content;
pub mod forum;
pub mod locations;
pub mod uploads;

use actix_web::{
    HttpRequest, HttpResponse, Responder, ResponseError, body::BoxBody,
    dev::HttpServiceFactory, get, http::header::AUTHORIZATION, web,
};
use payloads::{Activity, Attraction, DetailPage, GalleryImage, User};

use crate::store::{Store, StoreError};

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api")
        .service(health_check)
        .service(auth::login)
        .service(auth::register)
        .service(auth::register_admin)
        .service(auth::list_users)
        .service(locations::list_locations)
        .service(locations::get_location)
        .service(locations::update_location)
        .service(content::get_detail_page)
        .configure(|cfg| {
            content::configure::<Attraction>(cfg, "attractions");
            content::configure::<Activity>(cfg, "activities");
            content::configure::<GalleryImage>(cfg, "gallery");
            content::configure::<DetailPage>(cfg, "detail-pages");
        })
        .service(forum::my_posts)
        .service(forum::list_posts)
        .service(forum::create_post)
        .service(forum::delete_post)
        .service(forum::moderate_post)
        .service(uploads::upload_images)
        .service(uploads::get_upload)
}

#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("healthy")
}

#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("Authentication failed")]
    AuthError(#[source] anyhow::Error),
    #[error("Forbidden")]
    Forbidden(#[source] anyhow::Error),
    #[error("Bad request")]
    BadRequest(#[source] anyhow::Error),
    #[error("Not found")]
    NotFound(#[source] anyhow::Error),
    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl ResponseError for APIError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::AuthError(e) => {
                HttpResponse::Unauthorized().body(format!("{self}: {e}"))
            }
            Self::Forbidden(e) => {
                HttpResponse::Forbidden().body(format!("{self}: {e}"))
            }
            Self::BadRequest(e) => {
                HttpResponse::BadRequest().body(format!("{self}: {e}"))
            }
            Self::NotFound(e) => {
                HttpResponse::NotFound().body(format!("{self}: {e}"))
            }
            Self::UnexpectedError(_) => {
                HttpResponse::InternalServerError().body(self.to_string())
            }
        }
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::SessionNotFound => APIError::AuthError(e.into()),
            StoreError::UserNotFound
            | StoreError::LocationNotFound
            | StoreError::AttractionNotFound
            | StoreError::ActivityNotFound
            | StoreError::GalleryImageNotFound
            | StoreError::DetailPageNotFound
            | StoreError::PostNotFound
            | StoreError::UploadNotFound => APIError::NotFound(e.into()),
            StoreError::RequiresAdmin
            | StoreError::RequiresSuperAdmin
            | StoreError::NotOwner => APIError::Forbidden(e.into()),
            StoreError::UnexpectedError(_) => {
                APIError::UnexpectedError(e.into())
            }
            _ => APIError::BadRequest(e.into()),
        }
    }
}

fn bearer_token(request: &HttpRequest) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// The signed-in user. The user id is recorded on the route's span.
fn get_user(request: &HttpRequest, store: &Store) -> Result<User, APIError> {
    let token = bearer_token(request).ok_or_else(|| {
        APIError::AuthError(anyhow::anyhow!("Missing bearer token"))
    })?;
    let user = store.session_user(token)?;
    tracing::Span::current()
        .record("user_id", tracing::field::display(&user.id));
    Ok(user)
}

/// The signed-in user, if the request carries a valid session.
fn get_optional_user(request: &HttpRequest, store: &Store) -> Option<User> {
    bearer_token(request).and_then(|token| store.session_user(token).ok())
}

fn get_admin(request: &HttpRequest, store: &Store) -> Result<User, APIError> {
    let user = get_user(request, store)?;
    if !user.role.is_admin() {
        return Err(StoreError::RequiresAdmin.into());
    }
    Ok(user)
}
