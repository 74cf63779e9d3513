use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::{Route, State};

/// Forget the session and go back to the home page. Tokens are not revoked
/// server side.
#[hook]
pub fn use_logout() -> Callback<MouseEvent> {
    let (_, dispatch) = use_store::<State>();
    let navigator = use_navigator();

    Callback::from(move |_| {
        dispatch.reduce_mut(|state| state.logout());
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Home);
        }
    })
}
