use payloads::Attraction;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PlaceCardProps {
    pub place: Attraction,
    /// Set for places with coordinates; shows them on the map.
    #[prop_or_default]
    pub on_locate: Option<Callback<()>>,
}

#[function_component]
pub fn PlaceCard(props: &PlaceCardProps) -> Html {
    let place = &props.place;
    let cover = place.image_urls.first().cloned();

    html! {
        <div class="bg-white border border-neutral-200 rounded-lg overflow-hidden
                    shadow-sm">
            if let Some(src) = cover {
                <img src={src} alt={place.title.clone()}
                    class="h-40 w-full object-cover" />
            }
            <div class="p-4 space-y-2">
                <p class="text-xs uppercase tracking-wide text-neutral-500">
                    {place.category.label()}
                </p>
                <h3 class="font-semibold text-neutral-900">{&place.title}</h3>
                <p class="text-sm text-neutral-600">{&place.description}</p>
                if let Some(on_locate) = &props.on_locate {
                    <button
                        type="button"
                        onclick={on_locate.reform(|_: MouseEvent| ())}
                        class="text-sm font-medium underline"
                    >
                        {"Ver en el mapa"}
                    </button>
                }
            </div>
        </div>
    }
}
