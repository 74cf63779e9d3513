use content::forum::{average_rating, can_delete};
use payloads::{
    ForumPost, Location, LocationId, ModerationStatus, PostId,
    requests::{ForumQuery, NewForumPost, UploadFile, UploadImages},
};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use super::location_name;
use crate::{
    Route, State,
    components::{
        ConfirmationModal, ImageUpload, ReviewCard, SelectField, StarRatingInput,
        TextField,
    },
    contexts::toast::use_toast,
    get_api_client,
    hooks::{use_fetch, use_title},
};

const SUBMITTED_MESSAGE: &str =
    "Gracias. Tu reseña se publicará cuando la revise un moderador.";

#[derive(Properties, PartialEq)]
struct ReviewFormProps {
    locations: Vec<Location>,
}

/// New review. Client-side checks run before anything is sent; images are
/// uploaded first and the post goes out with their URLs.
#[function_component]
fn ReviewForm(props: &ReviewFormProps) -> Html {
    let (state, _) = use_store::<State>();
    let toast = use_toast();
    let location_id = use_state(|| props.locations.first().map(|l| l.id));
    let rating = use_state(|| 5u8);
    let body = use_state(String::new);
    let files = use_state(Vec::<UploadFile>::new);
    let error = use_state(|| None::<String>);
    let sending = use_state(|| false);

    let on_location = {
        let location_id = location_id.clone();
        let locations = props.locations.clone();
        Callback::from(move |slug: String| {
            let id = locations.iter().find(|l| l.slug == slug).map(|l| l.id);
            location_id.set(id);
        })
    };

    let on_submit = {
        let client = state.client();
        let location_id = location_id.clone();
        let rating = rating.clone();
        let body = body.clone();
        let files = files.clone();
        let error = error.clone();
        let sending = sending.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(location_id) = *location_id else {
                error.set(Some("Elige un destino".into()));
                return;
            };
            let mut post = NewForumPost {
                location_id,
                rating: *rating,
                body: (*body).clone(),
                image_urls: vec![],
            };
            if let Err(message) = post.validate() {
                error.set(Some(message.into()));
                return;
            }

            let client = client.clone();
            let toast = toast.clone();
            let (body, files, error, sending) =
                (body.clone(), files.clone(), error.clone(), sending.clone());
            yew::platform::spawn_local(async move {
                sending.set(true);
                let pending = (*files).clone();
                if !pending.is_empty() {
                    match client
                        .upload_images(&UploadImages { files: pending })
                        .await
                    {
                        Ok(uploaded) => post.image_urls = uploaded.urls,
                        Err(e) => {
                            tracing::warn!("review image upload failed: {e}");
                            error.set(Some(
                                content::manager::UPLOAD_ERROR_MESSAGE.into(),
                            ));
                            sending.set(false);
                            return;
                        }
                    }
                }
                match client.create_post(&post).await {
                    Ok(_) => {
                        body.set(String::new());
                        files.set(vec![]);
                        error.set(None);
                        toast.success(SUBMITTED_MESSAGE);
                    }
                    Err(e) => {
                        tracing::warn!("failed to create review: {e}");
                        error.set(Some("No se pudo enviar tu reseña".into()));
                    }
                }
                sending.set(false);
            });
        })
    };

    let selected_slug = props
        .locations
        .iter()
        .find(|l| Some(l.id) == *location_id)
        .map(|l| l.slug.clone())
        .unwrap_or_default();
    let options = props
        .locations
        .iter()
        .map(|l| (AttrValue::from(l.slug.clone()), AttrValue::from(l.name.clone())))
        .collect::<Vec<_>>();

    html! {
        <form onsubmit={on_submit}
            class="p-6 bg-white border border-neutral-200 rounded-lg space-y-4">
            <h2 class="text-xl font-semibold">{"Escribe una reseña"}</h2>
            <SelectField label="Destino" {options} selected={selected_slug}
                on_change={on_location} />
            <StarRatingInput rating={*rating} on_change={
                let rating = rating.clone();
                Callback::from(move |value: u8| rating.set(value))
            } />
            <TextField label="Tu experiencia" rows={Some(4)}
                value={(*body).clone()}
                on_change={
                    let body = body.clone();
                    Callback::from(move |value: String| body.set(value))
                } />
            <ImageUpload
                disabled={*sending}
                on_files={
                    let files = files.clone();
                    Callback::from(move |selected: Vec<UploadFile>| {
                        files.set(selected)
                    })
                } />
            if let Some(message) = &*error {
                <p class="text-sm text-red-600">{message}</p>
            }
            <button type="submit" disabled={*sending}
                class="px-4 py-2 rounded-md bg-neutral-900 text-white
                       disabled:opacity-50">
                {if *sending { "Enviando..." } else { "Publicar" }}
            </button>
        </form>
    }
}

/// Approved reviews, optionally filtered by destination.
#[function_component]
pub fn ForumPage() -> Html {
    use_title("Foro");
    let (state, _) = use_store::<State>();
    let filter = use_state(|| None::<LocationId>);
    let to_delete = use_state(|| None::<PostId>);
    let toast = use_toast();

    let locations = use_fetch((), |_| async move {
        get_api_client().list_locations().await
    });
    let posts = {
        let client = state.client();
        use_fetch(*filter, move |location_id| {
            let client = client.clone();
            async move {
                client
                    .list_posts(&ForumQuery {
                        status: Some(ModerationStatus::Approved),
                        location_id,
                        ..Default::default()
                    })
                    .await
            }
        })
    };

    let all_locations =
        locations.data.as_ref().cloned().unwrap_or_default();

    let on_filter = {
        let filter = filter.clone();
        let all_locations = all_locations.clone();
        Callback::from(move |slug: String| {
            filter.set(
                all_locations.iter().find(|l| l.slug == slug).map(|l| l.id),
            );
        })
    };

    let on_confirm_delete = {
        let client = state.client();
        let to_delete = to_delete.clone();
        let refetch = posts.refetch.clone();
        Callback::from(move |_: ()| {
            let Some(post_id) = *to_delete else {
                return;
            };
            let client = client.clone();
            let to_delete = to_delete.clone();
            let refetch = refetch.clone();
            let toast = toast.clone();
            yew::platform::spawn_local(async move {
                match client.delete_post(&post_id).await {
                    Ok(()) => toast.success("Reseña eliminada"),
                    Err(e) => {
                        tracing::warn!("failed to delete review: {e}");
                        toast.error(content::manager::DELETE_ERROR_MESSAGE);
                    }
                }
                to_delete.set(None);
                refetch.emit(());
            });
        })
    };

    let mut options = vec![(AttrValue::from(""), AttrValue::from("Todos"))];
    options.extend(all_locations.iter().map(|l| {
        (AttrValue::from(l.slug.clone()), AttrValue::from(l.name.clone()))
    }));
    let selected = all_locations
        .iter()
        .find(|l| Some(l.id) == *filter)
        .map(|l| l.slug.clone())
        .unwrap_or_default();

    let user = state.user().cloned();
    let render_post = |post: &ForumPost| {
        let deletable = can_delete(user.as_ref(), post);
        let on_delete = {
            let to_delete = to_delete.clone();
            let id = post.id;
            Callback::from(move |_: MouseEvent| to_delete.set(Some(id)))
        };
        html! {
            <ReviewCard
                post={post.clone()}
                location_name={location_name(&all_locations, post.location_id)}
            >
                if deletable {
                    <button onclick={on_delete}
                        class="text-sm text-red-600 underline">
                        {"Eliminar"}
                    </button>
                }
            </ReviewCard>
        }
    };

    html! {
        <div class="max-w-5xl mx-auto px-4 py-8 space-y-8">
            <div class="flex items-end justify-between gap-4">
                <h1 class="text-4xl font-bold">{"Foro de visitantes"}</h1>
                <div class="w-56">
                    <SelectField label="Destino" {options} {selected}
                        on_change={on_filter} />
                </div>
            </div>

            if state.is_authenticated() {
                if !all_locations.is_empty() {
                    <ReviewForm locations={all_locations.clone()} />
                }
            } else {
                <p class="text-sm text-neutral-600">
                    <Link<Route> to={Route::Login} classes="underline">
                        {"Inicia sesión"}
                    </Link<Route>>
                    {" para compartir tu experiencia."}
                </p>
            }

            {posts.render("las reseñas", |posts, _, _| {
                let average = average_rating(posts)
                    .map(|avg| format!("{avg:.1} de 5"))
                    .unwrap_or_else(|| "Sin reseñas todavía".into());
                html! {
                    <section class="space-y-4">
                        <p class="text-sm text-neutral-600">
                            {format!("{} reseñas · {average}", posts.len())}
                        </p>
                        {for posts.iter().map(&render_post)}
                    </section>
                }
            })}

            if to_delete.is_some() {
                <ConfirmationModal
                    title="Eliminar reseña"
                    message="La reseña dejará de mostrarse en el foro."
                    confirm_text="Eliminar"
                    on_confirm={on_confirm_delete}
                    on_close={
                        let to_delete = to_delete.clone();
                        Callback::from(move |_: ()| to_delete.set(None))
                    }
                />
            }
        </div>
    }
}
