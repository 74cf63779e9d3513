use payloads::{ForumPost, PostId};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use super::location_name;
use crate::{
    Route, State,
    components::{ConfirmationModal, ReviewCard},
    contexts::toast::use_toast,
    get_api_client,
    hooks::{use_fetch, use_require_auth, use_title},
};

/// The signed-in user's account details and their reviews in every
/// moderation state.
#[function_component]
pub fn ProfilePage() -> Html {
    use_title("Mi perfil");
    let Some(user) = use_require_auth() else {
        return html! {
            <div class="max-w-md mx-auto px-4 py-16 text-center space-y-4">
                <p class="text-neutral-700">
                    {"Inicia sesión para ver tu perfil."}
                </p>
                <Link<Route> to={Route::Login} classes="underline">
                    {"Iniciar sesión"}
                </Link<Route>>
            </div>
        };
    };
    html! { <Profile {user} /> }
}

#[derive(Properties, PartialEq)]
struct ProfileProps {
    user: payloads::User,
}

#[function_component]
fn Profile(props: &ProfileProps) -> Html {
    let (state, _) = use_store::<State>();
    let toast = use_toast();
    let to_delete = use_state(|| None::<PostId>);
    let deleting = use_state(|| false);

    let locations = use_fetch((), |_| async move {
        get_api_client().list_locations().await
    });
    let posts = {
        let client = state.client();
        use_fetch(props.user.id, move |_| {
            let client = client.clone();
            async move { client.my_posts().await }
        })
    };
    let all_locations = locations.data.as_ref().cloned().unwrap_or_default();

    let on_confirm_delete = {
        let client = state.client();
        let to_delete = to_delete.clone();
        let deleting = deleting.clone();
        let refetch = posts.refetch.clone();
        Callback::from(move |_: ()| {
            let Some(post_id) = *to_delete else {
                return;
            };
            let client = client.clone();
            let (to_delete, deleting) = (to_delete.clone(), deleting.clone());
            let refetch = refetch.clone();
            let toast = toast.clone();
            yew::platform::spawn_local(async move {
                deleting.set(true);
                match client.delete_post(&post_id).await {
                    Ok(()) => toast.success("Reseña eliminada"),
                    Err(e) => {
                        tracing::warn!("failed to delete review: {e}");
                        toast.error(content::manager::DELETE_ERROR_MESSAGE);
                    }
                }
                deleting.set(false);
                to_delete.set(None);
                refetch.emit(());
            });
        })
    };

    let render_post = |post: &ForumPost| {
        let on_delete = {
            let to_delete = to_delete.clone();
            let id = post.id;
            Callback::from(move |_: MouseEvent| to_delete.set(Some(id)))
        };
        html! {
            <ReviewCard
                post={post.clone()}
                location_name={location_name(&all_locations, post.location_id)}
                show_status=true
            >
                <button onclick={on_delete} class="text-sm text-red-600 underline">
                    {"Eliminar"}
                </button>
            </ReviewCard>
        }
    };

    html! {
        <div class="max-w-3xl mx-auto px-4 py-8 space-y-8">
            <section class="p-6 bg-white border border-neutral-200 rounded-lg">
                <h1 class="text-3xl font-bold">{&props.user.name}</h1>
                <p class="text-neutral-600">{&props.user.email}</p>
                if props.user.role.is_admin() {
                    <Link<Route> to={Route::Admin}
                        classes="inline-block mt-4 text-sm underline">
                        {"Ir al panel de administración"}
                    </Link<Route>>
                }
            </section>

            <section class="space-y-4">
                <h2 class="text-2xl font-semibold">{"Mis reseñas"}</h2>
                {posts.render("tus reseñas", |posts, _, _| {
                    if posts.is_empty() {
                        return html! {
                            <p class="text-neutral-600">
                                {"Todavía no has escrito reseñas. "}
                                <Link<Route> to={Route::Forum} classes="underline">
                                    {"Ir al foro"}
                                </Link<Route>>
                            </p>
                        };
                    }
                    html! { <>{for posts.iter().map(&render_post)}</> }
                })}
            </section>

            if to_delete.is_some() {
                <ConfirmationModal
                    title="Eliminar reseña"
                    message="Esta acción no se puede deshacer."
                    confirm_text="Eliminar"
                    is_loading={*deleting}
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
