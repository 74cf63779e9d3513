use content::{LocationPage, load_location_page};
use payloads::DetailPage;
use yew::prelude::*;

use super::{FetchHookReturn, use_fetch};
use crate::get_api_client;

/// Everything shown on a location page, refetched on every slug change.
#[hook]
pub fn use_location_page(slug: AttrValue) -> FetchHookReturn<LocationPage> {
    use_fetch(slug, |slug| async move {
        load_location_page(&get_api_client(), &slug).await
    })
}

#[hook]
pub fn use_detail_page(
    location: AttrValue,
    page: AttrValue,
) -> FetchHookReturn<DetailPage> {
    use_fetch((location, page), |(location, page)| async move {
        get_api_client().get_detail_page(&location, &page).await
    })
}
