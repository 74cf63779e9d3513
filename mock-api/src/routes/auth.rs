use actix_web::{HttpRequest, HttpResponse, get, post, web};
use payloads::{
    Role,
    requests::{LoginCredentials, Register},
    responses::AuthSession,
};

use crate::password::{AuthError, create_user, validate_credentials};
use crate::store::{Store, StoreError};

use super::{APIError, get_admin, get_user};

#[tracing::instrument(
    skip(credentials, store),
    fields(email = %credentials.email, user_id = tracing::field::Empty)
)]
#[post("/auth/login")]
pub async fn login(
    credentials: web::Json<LoginCredentials>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    match validate_credentials(credentials.into_inner().into(), &store).await {
        Ok(user) => {
            tracing::Span::current()
                .record("user_id", tracing::field::display(&user.id));
            let token = store.start_session(user.id);
            Ok(HttpResponse::Ok().json(AuthSession { token, user }))
        }
        Err(e) => Err(match e {
            AuthError::InvalidCredentials(_) => APIError::AuthError(e.into()),
            AuthError::UnexpectedError(_) => {
                APIError::UnexpectedError(e.into())
            }
        }),
    }
}

/// Public sign-up. New accounts are regular users and are signed in
/// immediately.
#[tracing::instrument(skip(details, store), fields(email = %details.email))]
#[post("/auth/register")]
pub async fn register(
    details: web::Json<Register>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let user = create_user(details.into_inner(), Role::User, &store).await?;
    let token = store.start_session(user.id);
    Ok(HttpResponse::Ok().json(AuthSession { token, user }))
}

#[tracing::instrument(
    skip(request, details, store),
    fields(user_id = tracing::field::Empty, email = %details.email)
)]
#[post("/auth/register-admin")]
pub async fn register_admin(
    request: HttpRequest,
    details: web::Json<Register>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let actor = get_user(&request, &store)?;
    if !actor.role.can_manage_admins() {
        return Err(StoreError::RequiresSuperAdmin.into());
    }
    let admin = create_user(details.into_inner(), Role::Admin, &store).await?;
    tracing::info!(admin_id = %admin.id, "admin account created");
    Ok(HttpResponse::Ok().json(admin))
}

#[tracing::instrument(
    skip(request, store),
    fields(user_id = tracing::field::Empty)
)]
#[get("/auth/users")]
pub async fn list_users(
    request: HttpRequest,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    get_admin(&request, &store)?;
    Ok(HttpResponse::Ok().json(store.users()))
}
