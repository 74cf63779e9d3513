//! Content loading and admin logic behind the ui. Nothing here depends on
//! the browser, so it runs the same under wasm and in native tests.

pub mod forum;
pub mod home;
pub mod location;
pub mod manager;
pub mod map;
pub mod source;
pub mod time;

#[cfg(test)]
mod testing;

pub use home::{HomeCache, HomeData, HomeState};
pub use location::{LocationPage, load_location_page};
pub use manager::{CrudBackend, CrudManager, ImageUploader, Resource};
pub use source::ContentSource;
pub use time::TimeSource;
