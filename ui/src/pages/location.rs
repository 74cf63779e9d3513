use content::map::{MapMarker, markers_for};
use payloads::{Activity, Attraction};
use yew::prelude::*;
use yew_router::prelude::*;

use super::{NotFoundPage, accent_classes, activities::ActivityCard};
use crate::{
    Route,
    components::{MapHandle, MapView, PlaceCard, use_map_handle},
    hooks::{use_location_page, use_title},
};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub slug: AttrValue,
}

fn place_section(
    title: &str,
    places: &[Attraction],
    markers: &[MapMarker],
    handle: &MapHandle,
) -> Html {
    if places.is_empty() {
        return html! {};
    }
    html! {
        <section class="space-y-4">
            <h2 class="text-2xl font-semibold">{title}</h2>
            <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                {for places.iter().map(|place| {
                    let marker =
                        markers.iter().find(|m| m.id == place.id).cloned();
                    let on_locate = marker.map(|marker| {
                        let handle = handle.clone();
                        Callback::from(move |_: ()| handle.focus(&marker))
                    });
                    html! {
                        <PlaceCard place={place.clone()} {on_locate} />
                    }
                })}
            </div>
        </section>
    }
}

fn activities_section(activities: &[Activity]) -> Html {
    if activities.is_empty() {
        return html! {};
    }
    html! {
        <section class="space-y-4">
            <h2 class="text-2xl font-semibold">{"Actividades"}</h2>
            <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                {for activities.iter().map(|activity| html! {
                    <ActivityCard activity={activity.clone()} />
                })}
            </div>
        </section>
    }
}

#[function_component]
pub fn LocationPage(props: &Props) -> Html {
    let page = use_location_page(props.slug.clone());
    let handle = use_map_handle();
    let title = page
        .data
        .as_ref()
        .map(|page| page.location.name.clone())
        .unwrap_or_default();
    use_title(&title);

    if page.is_not_found() {
        return html! { <NotFoundPage /> };
    }

    page.render("el destino", |page, _, _| {
        let location = &page.location;
        let markers = page.markers();
        let slug = location.slug.clone();

        html! {
            <div>
                <section class="relative h-80">
                    <img src={location.hero.url.clone()}
                        alt={location.hero.alt.clone()}
                        class="absolute inset-0 h-full w-full object-cover" />
                    <div class={classes!("absolute", "bottom-0", "w-full",
                                         "p-8", accent_classes(location.accent))}>
                        <h1 class="text-4xl font-bold">{&location.name}</h1>
                        <p>{&location.tagline}</p>
                    </div>
                </section>

                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8
                            space-y-12">
                    <p class="text-lg text-neutral-700 whitespace-pre-line">
                        {&location.description}
                    </p>

                    if !page.detail_pages.is_empty() {
                        <nav class="flex flex-wrap gap-3">
                            {for page.detail_pages.iter().map(|detail| html! {
                                <Link<Route>
                                    to={Route::DetailPage {
                                        location: slug.clone(),
                                        page: detail.slug.clone(),
                                    }}
                                    classes="px-4 py-2 rounded-full border
                                             border-neutral-300 text-sm
                                             hover:bg-neutral-100"
                                >
                                    {&detail.title}
                                </Link<Route>>
                            })}
                        </nav>
                    }

                    <MapView
                        center={location.center}
                        zoom={location.zoom}
                        markers={markers.clone()}
                        handle={handle.clone()}
                    />

                    {place_section("Atractivos", &page.attractions, &markers, &handle)}
                    {place_section("Hoteles", &page.hotels, &markers, &handle)}
                    {place_section("Restaurantes", &page.restaurants, &markers, &handle)}
                    {activities_section(&page.activities)}

                    if !page.gallery.is_empty() {
                        <section class="space-y-4">
                            <h2 class="text-2xl font-semibold">{"Galería"}</h2>
                            <div class="grid grid-cols-2 md:grid-cols-4 gap-3">
                                {for page.gallery.iter().map(|image| html! {
                                    <figure>
                                        <img src={image.url.clone()}
                                            alt={image.caption.clone()}
                                            class="h-40 w-full object-cover
                                                   rounded-lg" />
                                        <figcaption class="text-xs
                                                           text-neutral-500">
                                            {&image.caption}
                                        </figcaption>
                                    </figure>
                                })}
                            </div>
                        </section>
                    }
                </div>
            </div>
        }
    })
}
