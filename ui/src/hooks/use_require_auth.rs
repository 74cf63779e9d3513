use payloads::User;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::State;

/// The signed-in user, or None for visitors.
#[hook]
pub fn use_require_auth() -> Option<User> {
    let (state, _) = use_store::<State>();
    state.user().cloned()
}

/// The signed-in user if they are an admin or superadmin.
#[hook]
pub fn use_require_admin() -> Option<User> {
    use_require_auth().filter(|user| user.role.is_admin())
}
