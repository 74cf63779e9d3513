use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::{Route, State, hooks::use_logout};

const LINK_CLASS: &str = "text-sm font-medium text-neutral-700 \
                          hover:text-neutral-900";

#[function_component]
pub fn Header() -> Html {
    let (state, _) = use_store::<State>();
    let logout = use_logout();

    let account = match state.user() {
        Some(user) => html! {
            <>
                if user.role.is_admin() {
                    <Link<Route> to={Route::Admin} classes={LINK_CLASS}>
                        {"Administración"}
                    </Link<Route>>
                }
                <Link<Route> to={Route::Profile} classes={LINK_CLASS}>
                    {&user.name}
                </Link<Route>>
                <button onclick={logout} class={LINK_CLASS}>{"Salir"}</button>
            </>
        },
        None => html! {
            <>
                <Link<Route> to={Route::Login} classes={LINK_CLASS}>
                    {"Iniciar sesión"}
                </Link<Route>>
                <Link<Route> to={Route::Register} classes={LINK_CLASS}>
                    {"Crear cuenta"}
                </Link<Route>>
            </>
        },
    };

    html! {
        <header class="bg-white border-b border-neutral-200">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <Link<Route> to={Route::Home}
                        classes="text-xl font-semibold text-neutral-900">
                        {"Puerto Sol · Valle Verde"}
                    </Link<Route>>
                    <nav class="flex items-center space-x-6">
                        <Link<Route> to={Route::Activities} classes={LINK_CLASS}>
                            {"Actividades"}
                        </Link<Route>>
                        <Link<Route> to={Route::Forum} classes={LINK_CLASS}>
                            {"Foro"}
                        </Link<Route>>
                        {account}
                    </nav>
                </div>
            </div>
        </header>
    }
}
