use content::{HomeCache, TimeSource};
use payloads::APIClient;
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod contexts;
mod hooks;
mod logs;
mod pages;
mod state;

pub use state::State;

use components::{ToastContainer, layout::MainLayout};
use contexts::toast::ToastProvider;

/// Anonymous API client. Signed-in calls go through `State::client`.
///
/// The backend address comes from `BACKEND_URL` at build time, falling back
/// to the page's own origin.
pub fn get_api_client() -> APIClient {
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .or_else(|| web_sys::window()?.location().origin().ok())
        .unwrap_or_default();
    APIClient::new(address)
}

#[function_component]
pub fn App() -> Html {
    use_effect_with((), |_| logs::init_logging());
    // one cache per app instance, shared by every mount of the home page
    let home_cache = use_memo((), |_| HomeCache::new(TimeSource::default()));

    html! {
        <BrowserRouter>
            <ContextProvider<HomeCache> context={(*home_cache).clone()}>
                <ToastProvider>
                    <MainLayout>
                        <Switch<Route> render={switch} />
                    </MainLayout>
                    <ToastContainer />
                </ToastProvider>
            </ContextProvider<HomeCache>>
        </BrowserRouter>
    }
}

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/admin")]
    Admin,
    #[at("/foro")]
    Forum,
    #[at("/actividades")]
    Activities,
    #[at("/perfil")]
    Profile,
    #[at("/:location")]
    Location { location: String },
    #[at("/:location/:page")]
    DetailPage { location: String, page: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <pages::HomePage /> },
        Route::Login => html! { <pages::LoginPage /> },
        Route::Register => html! { <pages::RegisterPage /> },
        Route::Admin => html! { <pages::AdminPage /> },
        Route::Forum => html! { <pages::ForumPage /> },
        Route::Activities => html! { <pages::ActivitiesPage /> },
        Route::Profile => html! { <pages::ProfilePage /> },
        Route::Location { location } => {
            html! { <pages::LocationPage slug={location} /> }
        }
        Route::DetailPage { location, page } => html! {
            <pages::DetailPageView location={location} page={page} />
        },
        Route::NotFound => html! { <pages::NotFoundPage /> },
    }
}
