use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component]
pub fn Footer() -> Html {
    html! {
        <footer class="bg-white border-t border-neutral-200 mt-auto">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-6 flex
                        justify-between text-sm text-neutral-600">
                <span>{"Turismo municipal"}</span>
                <div class="space-x-4">
                    <Link<Route> to={Route::Location {
                        location: "puerto-sol".into(),
                    }}>
                        {"Puerto Sol"}
                    </Link<Route>>
                    <Link<Route> to={Route::Location {
                        location: "valle-verde".into(),
                    }}>
                        {"Valle Verde"}
                    </Link<Route>>
                </div>
            </div>
        </footer>
    }
}
