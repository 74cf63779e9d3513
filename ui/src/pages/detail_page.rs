use yew::prelude::*;
use yew_router::prelude::*;

use super::NotFoundPage;
use crate::{
    Route,
    hooks::{use_detail_page, use_title},
};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub location: AttrValue,
    pub page: AttrValue,
}

/// Free-form content page written by admins. The HTML comes from the
/// back-office and is rendered as is.
#[function_component]
pub fn DetailPageView(props: &Props) -> Html {
    let page = use_detail_page(props.location.clone(), props.page.clone());
    let title = page
        .data
        .as_ref()
        .map(|page| page.title.clone())
        .unwrap_or_default();
    use_title(&title);

    if page.is_not_found() {
        return html! { <NotFoundPage /> };
    }

    let location = props.location.to_string();
    page.render("la página", move |page, _, _| {
        html! {
            <article class="max-w-3xl mx-auto px-4 py-8 space-y-6">
                <Link<Route>
                    to={Route::Location { location: location.clone() }}
                    classes="text-sm underline"
                >
                    {"← Volver"}
                </Link<Route>>
                if let Some(hero) = &page.hero_image {
                    <img src={hero.clone()} alt={page.title.clone()}
                        class="w-full h-72 object-cover rounded-xl" />
                }
                <h1 class="text-4xl font-bold">{&page.title}</h1>
                <div class="prose max-w-none">
                    {Html::from_html_unchecked(AttrValue::from(page.html.clone()))}
                </div>
            </article>
        }
    })
}
