use content::HomeCache;
use payloads::{
    AccentColor, Coordinates, Location,
    requests::{LocationUpdate, UploadFile, UploadImages},
};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{
    State,
    components::{ImageUpload, MapView, SelectField, TextField, use_map_handle},
    contexts::toast::use_toast,
};

fn update_from(location: &Location) -> LocationUpdate {
    LocationUpdate {
        name: location.name.clone(),
        accent: location.accent,
        hero: location.hero.clone(),
        center: location.center,
        zoom: location.zoom,
        tagline: location.tagline.clone(),
        description: location.description.clone(),
    }
}

#[derive(Properties, PartialEq)]
pub struct LocationEditorProps {
    pub location: Location,
    /// Receives the server's copy after a successful save.
    pub on_saved: Callback<Location>,
}

/// Editor for one location's texts, theme, hero image and map center.
/// Mount it keyed by location id so switching locations resets the draft.
#[function_component]
pub fn LocationEditor(props: &LocationEditorProps) -> Html {
    let (state, _) = use_store::<State>();
    let home_cache = use_context::<HomeCache>();
    let toast = use_toast();
    let map = use_map_handle();
    let draft = use_state(|| update_from(&props.location));
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);

    let edit = |change: fn(&mut LocationUpdate, String)| {
        let draft = draft.clone();
        Callback::from(move |value: String| {
            let mut next = (*draft).clone();
            change(&mut next, value);
            draft.set(next);
        })
    };

    let on_accent = edit(|next, value| {
        if let Some(accent) =
            AccentColor::ALL.into_iter().find(|a| a.to_string() == value)
        {
            next.accent = accent;
        }
    });
    let on_zoom = edit(|next, value| {
        if let Ok(zoom) = value.trim().parse::<u8>() {
            next.zoom = zoom.clamp(1, 19);
        }
    });
    let on_pick = {
        let draft = draft.clone();
        Callback::from(move |center: Coordinates| {
            draft.set(LocationUpdate {
                center,
                ..(*draft).clone()
            });
        })
    };

    let on_hero_upload = {
        let client = state.client();
        let (draft, saving) = (draft.clone(), saving.clone());
        let toast = toast.clone();
        Callback::from(move |files: Vec<UploadFile>| {
            let client = client.clone();
            let (draft, saving) = (draft.clone(), saving.clone());
            let toast = toast.clone();
            yew::platform::spawn_local(async move {
                saving.set(true);
                match client.upload_images(&UploadImages { files }).await {
                    Ok(uploaded) => {
                        if let Some(url) = uploaded.urls.into_iter().next() {
                            let mut next = (*draft).clone();
                            next.hero.url = url;
                            draft.set(next);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("hero upload failed: {e}");
                        toast.error(content::manager::UPLOAD_ERROR_MESSAGE);
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_submit = {
        let client = state.client();
        let location_id = props.location.id;
        let on_saved = props.on_saved.clone();
        let (draft, saving, error) =
            (draft.clone(), saving.clone(), error.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if draft.name.trim().is_empty() {
                error.set(Some("El nombre es obligatorio".into()));
                return;
            }
            let update = (*draft).clone();
            let client = client.clone();
            let on_saved = on_saved.clone();
            let home_cache = home_cache.clone();
            let toast = toast.clone();
            let (saving, error) = (saving.clone(), error.clone());
            yew::platform::spawn_local(async move {
                saving.set(true);
                match client.update_location(&location_id, &update).await {
                    Ok(location) => {
                        error.set(None);
                        if let Some(cache) = &home_cache {
                            cache.invalidate();
                        }
                        toast.success("Destino actualizado");
                        on_saved.emit(location);
                    }
                    Err(e) => {
                        tracing::warn!("failed to update location: {e}");
                        error.set(Some(
                            content::manager::SAVE_ERROR_MESSAGE.into(),
                        ));
                    }
                }
                saving.set(false);
            });
        })
    };

    let accent_options = AccentColor::ALL
        .iter()
        .map(|accent| {
            let name = accent.to_string();
            (AttrValue::from(name.clone()), AttrValue::from(name))
        })
        .collect::<Vec<_>>();

    html! {
        <form onsubmit={on_submit}
            class="p-6 bg-white border border-neutral-200 rounded-lg space-y-4">
            <h2 class="text-2xl font-semibold">{&props.location.name}</h2>
            <div class="grid gap-4 sm:grid-cols-2">
                <TextField label="Nombre" value={draft.name.clone()}
                    on_change={edit(|next, value| next.name = value)} />
                <SelectField label="Color" options={accent_options}
                    selected={draft.accent.to_string()} on_change={on_accent} />
            </div>
            <TextField label="Lema" value={draft.tagline.clone()}
                on_change={edit(|next, value| next.tagline = value)} />
            <TextField label="Descripción" rows={Some(5)}
                value={draft.description.clone()}
                on_change={edit(|next, value| next.description = value)} />

            <div class="space-y-2">
                <h3 class="font-medium">{"Imagen principal"}</h3>
                if !draft.hero.url.is_empty() {
                    <img src={draft.hero.url.clone()} alt={draft.hero.alt.clone()}
                        class="w-full max-h-64 object-cover rounded-md" />
                }
                <ImageUpload label="Cambiar imagen" multiple=false
                    disabled={*saving} on_files={on_hero_upload} />
                <TextField label="Texto alternativo" value={draft.hero.alt.clone()}
                    on_change={edit(|next, value| next.hero.alt = value)} />
            </div>

            <div class="space-y-2">
                <div class="flex items-end justify-between gap-4">
                    <h3 class="font-medium">{"Centro del mapa"}</h3>
                    <span class="text-sm text-neutral-600">
                        {format!("{:.6}, {:.6}", draft.center.lat, draft.center.lng)}
                    </span>
                </div>
                <MapView
                    center={props.location.center}
                    zoom={props.location.zoom}
                    handle={map}
                    on_pick={Some(on_pick)}
                    picked={Some(draft.center)}
                    height="h-72"
                />
                <div class="w-32">
                    <TextField label="Zoom" input_type="number"
                        value={draft.zoom.to_string()} on_change={on_zoom} />
                </div>
            </div>

            if let Some(message) = &*error {
                <p class="text-sm text-red-600">{message}</p>
            }
            <button type="submit" disabled={*saving}
                class="px-4 py-2 rounded-md bg-neutral-900 text-white
                       disabled:opacity-50">
                {if *saving { "Guardando..." } else { "Guardar destino" }}
            </button>
        </form>
    }
}
