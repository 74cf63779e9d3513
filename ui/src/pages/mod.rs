pub mod activities;
pub mod admin;
pub mod detail_page;
pub mod forum;
pub mod home;
pub mod location;
pub mod login;
pub mod not_found;
pub mod profile;
pub mod register;

pub use activities::ActivitiesPage;
pub use admin::AdminPage;
pub use detail_page::DetailPageView;
pub use forum::ForumPage;
pub use home::HomePage;
pub use location::LocationPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;

use payloads::{AccentColor, Location};

/// Tailwind classes for a location's accent color. Listed in full so the
/// stylesheet build picks them up.
pub fn accent_classes(accent: AccentColor) -> &'static str {
    match accent {
        AccentColor::Orange => "bg-orange-600 text-white",
        AccentColor::Cyan => "bg-cyan-600 text-white",
        AccentColor::Green => "bg-green-600 text-white",
    }
}

pub fn location_name(locations: &[Location], id: payloads::LocationId) -> String {
    locations
        .iter()
        .find(|location| location.id == id)
        .map(|location| location.name.clone())
        .unwrap_or_default()
}
