use yew::prelude::*;

#[function_component]
pub fn Spinner() -> Html {
    html! {
        <div class="text-center py-12">
            <div class="inline-block animate-spin rounded-full h-8 w-8 border-2
                        border-neutral-900 border-t-transparent"></div>
        </div>
    }
}
