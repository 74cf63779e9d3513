use payloads::{APIClient, User, responses::AuthSession};
use serde::{Deserialize, Serialize};
use yewdux::prelude::*;

/// Signed-in session, kept in `sessionStorage` so a reload keeps the user
/// signed in until the tab closes.
#[derive(Default, Clone, PartialEq, Serialize, Deserialize, Store)]
#[store(storage = "session")]
pub struct State {
    pub session: Option<AuthSession>,
}

impl State {
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|session| &session.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// API client carrying the session's bearer token, if any.
    pub fn client(&self) -> APIClient {
        let client = crate::get_api_client();
        match &self.session {
            Some(session) => client.with_token(&session.token),
            None => client,
        }
    }

    pub fn sign_in(&mut self, session: AuthSession) {
        tracing::info!(user_id = %session.user.id, "signed in");
        self.session = Some(session);
    }

    pub fn logout(&mut self) {
        self.session = None;
    }
}
