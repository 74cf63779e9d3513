use std::future::Future;
use std::rc::Rc;

use payloads::ClientError;
use yew::prelude::*;

use super::FetchState;

/// A failed fetch, reduced to what the views need. `ClientError` itself is
/// not `Clone`, so it cannot live in component state.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchError {
    pub message: String,
    pub not_found: bool,
}

impl From<ClientError> for FetchError {
    fn from(e: ClientError) -> Self {
        Self {
            not_found: e.is_not_found(),
            message: e.to_string(),
        }
    }
}

pub struct FetchHookReturn<T> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<FetchError>,
    pub refetch: Callback<()>,
}

impl<T> FetchHookReturn<T> {
    pub fn is_not_found(&self) -> bool {
        self.error.as_ref().is_some_and(|e| e.not_found)
    }

    /// Render the data once it is available, a spinner while the first
    /// load runs, and a generic message if it failed.
    ///
    /// The render function also gets the error of a failed refetch, so
    /// previously fetched data stays on screen.
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool, Option<&FetchError>) -> Html,
    {
        match self.data.as_ref() {
            Some(data) => render_fn(data, self.is_loading, self.error.as_ref()),
            None if self.error.is_some() => html! {
                <div class="p-4 rounded-md bg-red-50 border border-red-200">
                    <p class="text-sm text-red-700">
                        {format!("No se pudo cargar {context}")}
                    </p>
                </div>
            },
            None => html! { <crate::components::Spinner /> },
        }
    }
}

/// Fetch on mount and whenever `deps` change, with a manual refetch.
///
/// Results that arrive after the component unmounted are dropped by yew's
/// state handles.
#[hook]
pub fn use_fetch<T, D, F, Fut>(deps: D, fetch_fn: F) -> FetchHookReturn<T>
where
    T: Clone + 'static,
    D: PartialEq + Clone + 'static,
    F: Fn(D) -> Fut + 'static,
    Fut: Future<Output = Result<T, ClientError>> + 'static,
{
    let data = use_state(|| FetchState::NotFetched);
    let error = use_state(|| None::<FetchError>);
    let is_loading = use_state(|| true);

    let refetch = {
        let data = data.clone();
        let error = error.clone();
        let is_loading = is_loading.clone();
        let fetch_fn = Rc::new(fetch_fn);

        use_callback(deps.clone(), move |_, deps: &D| {
            let data = data.clone();
            let error = error.clone();
            let is_loading = is_loading.clone();
            let request = fetch_fn(deps.clone());

            yew::platform::spawn_local(async move {
                is_loading.set(true);
                match request.await {
                    Ok(result) => {
                        data.set(FetchState::Fetched(result));
                        error.set(None);
                    }
                    Err(e) => {
                        tracing::warn!("fetch failed: {e}");
                        error.set(Some(e.into()));
                    }
                }
                is_loading.set(false);
            });
        })
    };

    {
        let refetch = refetch.clone();
        let data = data.clone();
        use_effect_with(deps, move |_| {
            // a new key must not show the previous key's data
            data.set(FetchState::NotFetched);
            refetch.emit(());
        });
    }

    FetchHookReturn {
        data: (*data).clone(),
        is_loading: *is_loading,
        error: (*error).clone(),
        refetch,
    }
}
