pub mod use_crud_manager;
pub mod use_fetch;
pub mod use_home_data;
pub mod use_location_page;
pub mod use_logout;
pub mod use_push_route;
pub mod use_require_auth;
pub mod use_title;

pub use use_crud_manager::{CrudHandle, use_crud_manager};
pub use use_fetch::{FetchError, FetchHookReturn, use_fetch};
pub use use_home_data::use_home_data;
pub use use_location_page::{use_detail_page, use_location_page};
pub use use_logout::use_logout;
pub use use_push_route::use_push_route;
pub use use_require_auth::{use_require_admin, use_require_auth};
pub use use_title::use_title;

/// Distinguishes "not fetched yet" from "fetched and empty".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    NotFetched,
    Fetched(T),
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Fetched(data) => Some(data),
            Self::NotFetched => None,
        }
    }
}
