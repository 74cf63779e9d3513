use std::marker::PhantomData;

use content::{CrudBackend, manager::AcceptsUploads};
use payloads::{
    APIClient, Location, LocationId,
    requests::{UploadFile, UploadImages},
};
use yew::prelude::*;
use yewdux::prelude::*;

use super::forms::EditableResource;
use crate::{
    State,
    components::{ConfirmationModal, ImageUpload, Spinner},
    contexts::toast::use_toast,
    hooks::use_crud_manager,
};

#[derive(Properties, PartialEq)]
pub struct ManagerPanelProps<R: EditableResource> {
    /// Location whose records are listed. `None` lists every location and
    /// disables creation.
    pub scope: Option<LocationId>,
    pub locations: Vec<Location>,
    #[prop_or_default]
    pub resource: PhantomData<R>,
}

/// List, edit form and delete confirmation for one content type.
#[function_component]
pub fn ManagerPanel<R>(props: &ManagerPanelProps<R>) -> Html
where
    R: EditableResource,
    R::Input: AcceptsUploads,
    APIClient: CrudBackend<R>,
{
    let handle = use_crud_manager::<R>(props.scope);
    let (state, _) = use_store::<State>();
    let toast = use_toast();
    let to_delete = use_state(|| None::<R::Id>);
    let bulk_uploading = use_state(|| false);

    let location = props
        .scope
        .and_then(|id| props.locations.iter().find(|l| l.id == id));
    let manager = &handle.manager;
    let busy = handle.busy || *bulk_uploading;

    let on_bulk_upload = {
        let client = state.client();
        let create_many = handle.create_many.clone();
        let bulk_uploading = bulk_uploading.clone();
        let scope = props.scope;
        Callback::from(move |files: Vec<UploadFile>| {
            let Some(location_id) = scope else {
                return;
            };
            let client = client.clone();
            let create_many = create_many.clone();
            let bulk_uploading = bulk_uploading.clone();
            let toast = toast.clone();
            yew::platform::spawn_local(async move {
                bulk_uploading.set(true);
                match client.upload_images(&UploadImages { files }).await {
                    Ok(uploaded) => {
                        let inputs = uploaded
                            .urls
                            .into_iter()
                            .filter_map(|url| {
                                R::input_from_upload(location_id, url)
                            })
                            .collect::<Vec<_>>();
                        create_many.emit(inputs);
                    }
                    Err(e) => {
                        tracing::warn!("bulk upload failed: {e}");
                        toast.error(content::manager::UPLOAD_ERROR_MESSAGE);
                    }
                }
                bulk_uploading.set(false);
            });
        })
    };

    let on_confirm_delete = {
        let delete = handle.delete.clone();
        let to_delete = to_delete.clone();
        Callback::from(move |_: ()| {
            if let Some(id) = *to_delete {
                delete.emit(id);
            }
            to_delete.set(None);
        })
    };

    let supports_bulk = R::BULK_UPLOAD && props.scope.is_some();

    let form = manager.editing.as_ref().map(|draft| {
        let heading = if draft.id.is_some() { "Editar" } else { "Nuevo" };
        html! {
            <div key={format!("{:?}", draft.id)}
                class="p-6 bg-white border border-neutral-200 rounded-lg space-y-4">
                <h3 class="text-lg font-semibold">{heading}</h3>
                {R::form(&draft.input, location, handle.edit_draft.clone())}
                <ImageUpload
                    on_files={handle.upload.clone()}
                    multiple={R::MULTIPLE_IMAGES}
                    disabled={busy}
                />
                if let Some(error) = &manager.error {
                    <p class="text-sm text-red-600">{error}</p>
                }
                <div class="flex gap-2">
                    <button onclick={handle.submit.reform(|_: MouseEvent| ())}
                        disabled={busy}
                        class="px-4 py-2 rounded-md bg-neutral-900 text-white
                               disabled:opacity-50">
                        {if busy { "Guardando..." } else { "Guardar" }}
                    </button>
                    <button onclick={handle.cancel.reform(|_: MouseEvent| ())}
                        class="px-4 py-2 rounded-md border border-neutral-300">
                        {"Cancelar"}
                    </button>
                </div>
            </div>
        }
    });

    html! {
        <section class="space-y-6">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-semibold">{R::LABEL}</h2>
                <button onclick={handle.start_create.reform(|_: MouseEvent| ())}
                    disabled={props.scope.is_none() || busy}
                    title={props.scope.is_none()
                        .then_some("Elige un destino para crear elementos")}
                    class="px-4 py-2 rounded-md bg-neutral-900 text-white
                           disabled:opacity-50">
                    {"Nuevo"}
                </button>
            </div>

            if supports_bulk {
                <div class="p-4 bg-neutral-50 border border-dashed
                            border-neutral-300 rounded-lg">
                    <ImageUpload label="Agregar varias imágenes a la galería"
                        on_files={on_bulk_upload} disabled={busy} />
                </div>
            }

            {form.unwrap_or_default()}

            if manager.editing.is_none() {
                if let Some(error) = &manager.error {
                    <p class="text-sm text-red-600">{error}</p>
                }
            }

            if busy && manager.items.is_empty() {
                <Spinner />
            } else if manager.items.is_empty() {
                <p class="text-neutral-500">{"No hay elementos todavía."}</p>
            } else {
                <ul class="divide-y divide-neutral-200 bg-white border
                           border-neutral-200 rounded-lg">
                    {for manager.items.iter().map(|item| {
                        let id = item.id();
                        html! {
                            <li class="flex items-center gap-4 p-4">
                                if let Some(src) = item.thumbnail() {
                                    <img src={src.to_string()} alt=""
                                        class="w-16 h-16 object-cover rounded" />
                                }
                                <div class="flex-1 min-w-0">
                                    <p class="font-medium truncate">{item.title()}</p>
                                    <p class="text-sm text-neutral-500 truncate">
                                        {item.subtitle()}
                                    </p>
                                </div>
                                <button class="text-sm underline" disabled={busy}
                                    onclick={handle.start_edit.reform(move |_: MouseEvent| id)}>
                                    {"Editar"}
                                </button>
                                <button class="text-sm text-red-600 underline"
                                    disabled={busy}
                                    onclick={
                                        let to_delete = to_delete.clone();
                                        Callback::from(move |_: MouseEvent| {
                                            to_delete.set(Some(id))
                                        })
                                    }>
                                    {"Eliminar"}
                                </button>
                            </li>
                        }
                    })}
                </ul>
            }

            if to_delete.is_some() {
                <ConfirmationModal
                    title="Eliminar elemento"
                    message="Se eliminará de forma permanente."
                    confirm_text="Eliminar"
                    on_confirm={on_confirm_delete}
                    on_close={
                        let to_delete = to_delete.clone();
                        Callback::from(move |_: ()| to_delete.set(None))
                    }
                />
            }
        </section>
    }
}
