pub mod confirmation_modal;
pub mod fields;
pub mod image_upload;
pub mod layout;
pub mod map_view;
pub mod modal;
pub mod place_card;
pub mod review_card;
pub mod spinner;
pub mod star_rating;
pub mod toast;

pub use confirmation_modal::ConfirmationModal;
pub use fields::{SelectField, TextField};
pub use image_upload::ImageUpload;
pub use map_view::{MapHandle, MapView, use_map_handle};
pub use modal::Modal;
pub use place_card::PlaceCard;
pub use review_card::ReviewCard;
pub use spinner::Spinner;
pub use star_rating::{StarRating, StarRatingInput};
pub use toast::ToastContainer;
