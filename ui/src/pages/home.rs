use yew::prelude::*;
use yew_router::prelude::*;

use super::{accent_classes, location_name};
use crate::{
    Route,
    components::{ReviewCard, Spinner},
    hooks::{use_home_data, use_title},
};

#[function_component]
pub fn HomePage() -> Html {
    use_title("");
    let home = use_home_data();
    let data = &home.data;

    let locations = data.locations.iter().map(|location| {
        html! {
            <Link<Route>
                to={Route::Location { location: location.slug.clone() }}
                classes="block rounded-xl overflow-hidden shadow-md group"
            >
                <div class="relative h-64">
                    <img src={location.hero.url.clone()}
                        alt={location.hero.alt.clone()}
                        class="absolute inset-0 h-full w-full object-cover" />
                    <div class={classes!("absolute", "bottom-0", "w-full",
                                         "p-4", accent_classes(location.accent))}>
                        <h2 class="text-2xl font-bold">{&location.name}</h2>
                        <p class="text-sm">{&location.tagline}</p>
                    </div>
                </div>
            </Link<Route>>
        }
    });

    html! {
        <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8 space-y-12">
            <section class="text-center space-y-2">
                <h1 class="text-4xl font-bold">{"Descubre nuestros destinos"}</h1>
                <p class="text-neutral-600">
                    {"Playas, montaña, gastronomía y cultura en dos municipios."}
                </p>
            </section>

            if let Some(error) = &home.error {
                <div class="p-4 rounded-md bg-red-50 border border-red-200
                            text-sm text-red-700">
                    {error}
                </div>
            }

            if home.loading && data.locations.is_empty() {
                <Spinner />
            }

            <section class="grid gap-6 md:grid-cols-2">
                {for locations}
            </section>

            if !data.adventure_images.is_empty() {
                <section class="space-y-4">
                    <h2 class="text-2xl font-semibold">{"Aventuras"}</h2>
                    <div class="grid grid-cols-2 md:grid-cols-4 gap-3">
                        {for data.adventure_images.iter().map(|url| html! {
                            <img src={url.clone()} alt=""
                                class="h-40 w-full object-cover rounded-lg" />
                        })}
                    </div>
                </section>
            }

            if !data.posts.is_empty() {
                <section class="space-y-4">
                    <div class="flex items-baseline justify-between">
                        <h2 class="text-2xl font-semibold">
                            {"Lo que dicen nuestros visitantes"}
                        </h2>
                        <Link<Route> to={Route::Forum} classes="underline text-sm">
                            {"Ver el foro"}
                        </Link<Route>>
                    </div>
                    <div class="grid gap-4 md:grid-cols-3">
                        {for data.posts.iter().map(|post| html! {
                            <ReviewCard
                                post={post.clone()}
                                location_name={location_name(
                                    &data.locations, post.location_id,
                                )}
                            />
                        })}
                    </div>
                </section>
            }
        </div>
    }
}
