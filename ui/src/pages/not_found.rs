use yew::prelude::*;
use yew_router::prelude::*;

use crate::{Route, hooks::use_title};

#[function_component]
pub fn NotFoundPage() -> Html {
    use_title("Página no encontrada");

    html! {
        <div class="max-w-7xl mx-auto px-4 py-24 text-center space-y-4">
            <h1 class="text-4xl font-bold text-neutral-900">{"404"}</h1>
            <p class="text-neutral-600">{"No encontramos esta página."}</p>
            <Link<Route> to={Route::Home} classes="underline">
                {"Volver al inicio"}
            </Link<Route>>
        </div>
    }
}
