//! Per-type edit forms for the back-office managers.

use std::str::FromStr;

use content::Resource;
use payloads::{
    Activity, Attraction, AttractionCategory, Coordinates, DetailPage,
    GalleryImage, Location, LocationId,
    requests::{
        ActivityInput, AttractionInput, DetailPageInput, GalleryImageInput,
        slugify,
    },
};
use rust_decimal::Decimal;
use yew::prelude::*;

use crate::components::{MapView, SelectField, TextField, use_map_handle};

/// How a content type is listed and edited on the admin dashboard.
pub trait EditableResource: Resource {
    const LABEL: &'static str;
    /// Whether one upload may attach several images to a draft.
    const MULTIPLE_IMAGES: bool = true;
    const BULK_UPLOAD: bool = false;

    fn subtitle(&self) -> String;
    fn thumbnail(&self) -> Option<&str>;
    fn form(
        input: &Self::Input,
        location: Option<&Location>,
        on_change: Callback<Self::Input>,
    ) -> Html;

    /// Record input for one image of a bulk upload.
    fn input_from_upload(
        _location_id: LocationId,
        _url: String,
    ) -> Option<Self::Input> {
        None
    }
}

/// Callback for one text field: copies the input, applies `set` and emits
/// the edited copy.
fn field<I: Clone + 'static>(
    input: &I,
    on_change: &Callback<I>,
    set: impl Fn(&mut I, String) + 'static,
) -> Callback<String> {
    let input = input.clone();
    on_change.reform(move |value: String| {
        let mut next = input.clone();
        set(&mut next, value);
        next
    })
}

#[derive(Properties, PartialEq)]
struct ImageListProps {
    urls: Vec<String>,
    on_change: Callback<Vec<String>>,
}

#[function_component]
fn ImageList(props: &ImageListProps) -> Html {
    if props.urls.is_empty() {
        return html! {
            <p class="text-sm text-neutral-500">{"Sin imágenes"}</p>
        };
    }
    html! {
        <div class="flex flex-wrap gap-2">
            {for props.urls.iter().enumerate().map(|(index, url)| {
                let on_remove = {
                    let urls = props.urls.clone();
                    props.on_change.reform(move |_: MouseEvent| {
                        let mut urls = urls.clone();
                        urls.remove(index);
                        urls
                    })
                };
                html! {
                    <div class="relative">
                        <img src={url.clone()} alt=""
                            class="w-24 h-24 object-cover rounded-md" />
                        <button type="button" onclick={on_remove}
                            class="absolute top-1 right-1 px-1 text-xs
                                   bg-white/90 rounded">
                            {"Quitar"}
                        </button>
                    </div>
                }
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AttractionFormProps {
    pub input: AttractionInput,
    pub center: Coordinates,
    pub zoom: u8,
    pub on_change: Callback<AttractionInput>,
}

#[function_component]
pub fn AttractionForm(props: &AttractionFormProps) -> Html {
    let map = use_map_handle();
    let input = &props.input;
    let on_change = &props.on_change;

    let options = AttractionCategory::ALL
        .iter()
        .map(|category| {
            (
                AttrValue::from(category.to_string()),
                AttrValue::from(category.label()),
            )
        })
        .collect::<Vec<_>>();
    let on_category = field(input, on_change, |next, value| {
        if let Some(category) = AttractionCategory::ALL
            .into_iter()
            .find(|category| category.to_string() == value)
        {
            next.category = category;
        }
    });
    let on_pick = {
        let input = input.clone();
        on_change.reform(move |position: Coordinates| AttractionInput {
            position: Some(position),
            ..input.clone()
        })
    };
    let on_clear_position = {
        let input = input.clone();
        on_change.reform(move |_: MouseEvent| AttractionInput {
            position: None,
            ..input.clone()
        })
    };
    let on_images = {
        let input = input.clone();
        on_change.reform(move |image_urls: Vec<String>| AttractionInput {
            image_urls,
            ..input.clone()
        })
    };
    let position_text = input
        .position
        .map(|p| format!("{:.6}, {:.6}", p.lat, p.lng))
        .unwrap_or_else(|| "Sin ubicación: haz clic en el mapa".into());

    html! {
        <div class="space-y-4">
            <SelectField label="Categoría" {options}
                selected={input.category.to_string()} on_change={on_category} />
            <TextField label="Nombre" value={input.title.clone()}
                on_change={field(input, on_change, |next, value| next.title = value)} />
            <TextField label="Descripción" rows={Some(4)}
                value={input.description.clone()}
                on_change={field(input, on_change, |next, value| {
                    next.description = value
                })} />
            <ImageList urls={input.image_urls.clone()} on_change={on_images} />
            <div class="space-y-2">
                <div class="flex items-center justify-between text-sm">
                    <span class="text-neutral-700">{position_text}</span>
                    if input.position.is_some() {
                        <button type="button" onclick={on_clear_position}
                            class="underline">
                            {"Quitar ubicación"}
                        </button>
                    }
                </div>
                <MapView
                    center={input.position.unwrap_or(props.center)}
                    zoom={props.zoom}
                    handle={map}
                    on_pick={Some(on_pick)}
                    picked={input.position}
                    height="h-64"
                />
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ActivityFormProps {
    pub input: ActivityInput,
    pub on_change: Callback<ActivityInput>,
}

/// Price is typed as free text and only copied into the draft once it
/// parses, so partial entries like "12." do not lose keystrokes.
#[function_component]
pub fn ActivityForm(props: &ActivityFormProps) -> Html {
    let input = &props.input;
    let on_change = &props.on_change;
    let price_text = use_state(|| {
        input.price.map(|price| price.to_string()).unwrap_or_default()
    });
    let price_invalid = use_state(|| false);

    let on_price = {
        let input = input.clone();
        let on_change = on_change.clone();
        let (price_text, price_invalid) =
            (price_text.clone(), price_invalid.clone());
        Callback::from(move |value: String| {
            price_text.set(value.clone());
            let trimmed = value.trim();
            let price = if trimmed.is_empty() {
                Ok(None)
            } else {
                Decimal::from_str(trimmed).map(Some)
            };
            match price {
                Ok(price) if price.is_none_or(|p| !p.is_sign_negative()) => {
                    price_invalid.set(false);
                    on_change.emit(ActivityInput {
                        price,
                        ..input.clone()
                    });
                }
                _ => price_invalid.set(true),
            }
        })
    };
    let on_images = {
        let input = input.clone();
        on_change.reform(move |image_urls: Vec<String>| ActivityInput {
            image_urls,
            ..input.clone()
        })
    };

    html! {
        <div class="space-y-4">
            <TextField label="Nombre" value={input.title.clone()}
                on_change={field(input, on_change, |next, value| next.title = value)} />
            <TextField label="Descripción" rows={Some(4)}
                value={input.description.clone()}
                on_change={field(input, on_change, |next, value| {
                    next.description = value
                })} />
            <div class="grid grid-cols-2 gap-4">
                <div>
                    <TextField label="Precio (MXN)" value={(*price_text).clone()}
                        placeholder="Opcional" on_change={on_price} />
                    if *price_invalid {
                        <p class="mt-1 text-xs text-red-600">{"Precio inválido"}</p>
                    }
                </div>
                <TextField label="Duración" placeholder="Ej. 3 horas"
                    value={input.duration.clone().unwrap_or_default()}
                    on_change={field(input, on_change, |next, value| {
                        next.duration = Some(value).filter(|d| !d.trim().is_empty())
                    })} />
            </div>
            <ImageList urls={input.image_urls.clone()} on_change={on_images} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DetailPageFormProps {
    pub input: DetailPageInput,
    pub on_change: Callback<DetailPageInput>,
}

/// The slug follows the title until it is edited by hand.
#[function_component]
pub fn DetailPageForm(props: &DetailPageFormProps) -> Html {
    let input = &props.input;
    let on_change = &props.on_change;

    let on_title = field(input, on_change, |next, value| {
        if next.slug.is_empty() || next.slug == slugify(&next.title) {
            next.slug = slugify(&value);
        }
        next.title = value;
    });
    let on_remove_hero = {
        let input = input.clone();
        on_change.reform(move |_: MouseEvent| DetailPageInput {
            hero_image: None,
            ..input.clone()
        })
    };

    html! {
        <div class="space-y-4">
            <TextField label="Título" value={input.title.clone()} on_change={on_title} />
            <TextField label="Dirección (slug)" value={input.slug.clone()}
                on_change={field(input, on_change, |next, value| next.slug = value)} />
            <TextField label="Contenido HTML" rows={Some(12)}
                value={input.html.clone()}
                on_change={field(input, on_change, |next, value| next.html = value)} />
            if let Some(hero) = &input.hero_image {
                <div class="flex items-center gap-4">
                    <img src={hero.clone()} alt=""
                        class="w-40 h-24 object-cover rounded-md" />
                    <button type="button" onclick={on_remove_hero}
                        class="text-sm underline">
                        {"Quitar portada"}
                    </button>
                </div>
            }
        </div>
    }
}

impl EditableResource for Attraction {
    const LABEL: &'static str = "Lugares";

    fn subtitle(&self) -> String {
        let placed = if self.position.is_some() { "" } else { " · sin ubicación" };
        format!("{}{placed}", self.category.label())
    }

    fn thumbnail(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    fn form(
        input: &AttractionInput,
        location: Option<&Location>,
        on_change: Callback<AttractionInput>,
    ) -> Html {
        let (center, zoom) = location
            .map(|location| (location.center, location.zoom))
            .unwrap_or_default();
        html! {
            <AttractionForm input={input.clone()} {center} {zoom} {on_change} />
        }
    }
}

impl EditableResource for Activity {
    const LABEL: &'static str = "Actividades";

    fn subtitle(&self) -> String {
        match (&self.price, &self.duration) {
            (Some(price), Some(duration)) => format!("${price} · {duration}"),
            (Some(price), None) => format!("${price}"),
            (None, Some(duration)) => duration.clone(),
            (None, None) => String::new(),
        }
    }

    fn thumbnail(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    fn form(
        input: &ActivityInput,
        _location: Option<&Location>,
        on_change: Callback<ActivityInput>,
    ) -> Html {
        html! { <ActivityForm input={input.clone()} {on_change} /> }
    }
}

impl EditableResource for GalleryImage {
    const LABEL: &'static str = "Galería";
    const MULTIPLE_IMAGES: bool = false;
    const BULK_UPLOAD: bool = true;

    fn subtitle(&self) -> String {
        self.caption.clone()
    }

    fn thumbnail(&self) -> Option<&str> {
        Some(&self.url)
    }

    fn form(
        input: &GalleryImageInput,
        _location: Option<&Location>,
        on_change: Callback<GalleryImageInput>,
    ) -> Html {
        html! {
            <div class="space-y-4">
                if !input.url.is_empty() {
                    <img src={input.url.clone()} alt=""
                        class="w-full max-h-64 object-cover rounded-md" />
                }
                <TextField label="URL de la imagen" value={input.url.clone()}
                    placeholder="Sube una imagen o pega una URL"
                    on_change={field(input, &on_change, |next, value| next.url = value)} />
                <TextField label="Pie de foto" value={input.caption.clone()}
                    on_change={field(input, &on_change, |next, value| {
                        next.caption = value
                    })} />
            </div>
        }
    }

    fn input_from_upload(
        location_id: LocationId,
        url: String,
    ) -> Option<GalleryImageInput> {
        Some(GalleryImageInput {
            location_id: Some(location_id),
            url,
            caption: String::new(),
        })
    }
}

impl EditableResource for DetailPage {
    const LABEL: &'static str = "Páginas";
    const MULTIPLE_IMAGES: bool = false;

    fn subtitle(&self) -> String {
        format!("/{}", self.slug)
    }

    fn thumbnail(&self) -> Option<&str> {
        self.hero_image.as_deref()
    }

    fn form(
        input: &DetailPageInput,
        _location: Option<&Location>,
        on_change: Callback<DetailPageInput>,
    ) -> Html {
        html! { <DetailPageForm input={input.clone()} {on_change} /> }
    }
}
