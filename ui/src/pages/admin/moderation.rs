use std::rc::Rc;

use content::{
    HomeCache,
    forum::{ModerationQueue, transitions},
};
use payloads::{
    ForumPost, Location, ModerationStatus, PostId,
    requests::{ForumQuery, ModeratePost},
};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{
    State,
    components::{ConfirmationModal, ReviewCard, Spinner},
    contexts::toast::use_toast,
    pages::location_name,
};

enum QueueAction {
    Loaded(Vec<ForumPost>),
    Moderated(ForumPost),
    Deleted(PostId),
}

#[derive(Default, PartialEq)]
struct QueueState {
    queue: Option<ModerationQueue>,
}

impl Reducible for QueueState {
    type Action = QueueAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut queue = self.queue.clone().unwrap_or_default();
        match action {
            QueueAction::Loaded(posts) => queue = ModerationQueue::new(posts),
            QueueAction::Moderated(post) => queue.apply(post),
            QueueAction::Deleted(id) => queue.remove(id),
        }
        Rc::new(QueueState { queue: Some(queue) })
    }
}

#[derive(Properties, PartialEq)]
pub struct ModerationPanelProps {
    pub locations: Vec<Location>,
}

/// Every review grouped by moderation status, with actions to move a review
/// to another status or delete it.
#[function_component]
pub fn ModerationPanel(props: &ModerationPanelProps) -> Html {
    let (state, _) = use_store::<State>();
    let home_cache = use_context::<HomeCache>();
    let toast = use_toast();
    let queue = use_reducer(QueueState::default);
    let tab = use_state(|| ModerationStatus::Pending);
    let load_failed = use_state(|| false);
    let to_delete = use_state(|| None::<PostId>);

    {
        let client = state.client();
        let queue = queue.dispatcher();
        let load_failed = load_failed.clone();
        use_effect_with((), move |_| {
            yew::platform::spawn_local(async move {
                // no status filter: admins get every review
                match client.list_posts(&ForumQuery::default()).await {
                    Ok(posts) => queue.dispatch(QueueAction::Loaded(posts)),
                    Err(e) => {
                        tracing::warn!("failed to load reviews: {e}");
                        load_failed.set(true);
                    }
                }
            });
        });
    }

    let changed = Rc::new(move || {
        if let Some(cache) = &home_cache {
            cache.invalidate();
        }
    });

    let moderate = {
        let client = state.client();
        let dispatcher = queue.dispatcher();
        let toast = toast.clone();
        let changed = changed.clone();
        Callback::from(move |(id, status): (PostId, ModerationStatus)| {
            let client = client.clone();
            let dispatcher = dispatcher.clone();
            let toast = toast.clone();
            let changed = changed.clone();
            yew::platform::spawn_local(async move {
                match client.moderate_post(&id, &ModeratePost { status }).await {
                    Ok(post) => {
                        dispatcher.dispatch(QueueAction::Moderated(post));
                        changed();
                        toast.success(format!("Reseña marcada como {}", status.label()));
                    }
                    Err(e) => {
                        tracing::warn!("failed to moderate {id}: {e}");
                        toast.error(content::manager::SAVE_ERROR_MESSAGE);
                    }
                }
            });
        })
    };

    let on_confirm_delete = {
        let client = state.client();
        let dispatcher = queue.dispatcher();
        let to_delete = to_delete.clone();
        Callback::from(move |_: ()| {
            let Some(id) = *to_delete else {
                return;
            };
            to_delete.set(None);
            let client = client.clone();
            let dispatcher = dispatcher.clone();
            let toast = toast.clone();
            let changed = changed.clone();
            yew::platform::spawn_local(async move {
                match client.delete_post(&id).await {
                    Ok(()) => {
                        dispatcher.dispatch(QueueAction::Deleted(id));
                        changed();
                        toast.success("Reseña eliminada");
                    }
                    Err(e) => {
                        tracing::warn!("failed to delete {id}: {e}");
                        toast.error(content::manager::DELETE_ERROR_MESSAGE);
                    }
                }
            });
        })
    };

    let Some(current) = queue.queue.as_ref() else {
        return if *load_failed {
            html! {
                <p class="text-red-600">{"No se pudieron cargar las reseñas"}</p>
            }
        } else {
            html! { <Spinner /> }
        };
    };

    let tabs = ModerationStatus::ALL.iter().map(|status| {
        let status = *status;
        let active = *tab == status;
        let onclick = {
            let tab = tab.clone();
            Callback::from(move |_: MouseEvent| tab.set(status))
        };
        html! {
            <button {onclick}
                class={classes!(
                    "px-4", "py-2", "rounded-md", "text-sm",
                    if active { "bg-neutral-900 text-white" } else { "bg-neutral-100" }
                )}>
                {format!("{} ({})", status.label(), current.count(status))}
            </button>
        }
    });

    let posts = current.with_status(*tab);
    html! {
        <section class="space-y-6">
            <h2 class="text-2xl font-semibold">{"Moderación de reseñas"}</h2>
            <div class="flex gap-2">{for tabs}</div>
            if posts.is_empty() {
                <p class="text-neutral-500">{"No hay reseñas en este estado."}</p>
            }
            {for posts.into_iter().map(|post| {
                let id = post.id;
                html! {
                    <ReviewCard
                        post={post.clone()}
                        location_name={location_name(&props.locations, post.location_id)}
                        show_status=true
                    >
                        <div class="flex gap-2">
                            {for transitions(post.status).into_iter().map(|next| html! {
                                <button
                                    onclick={moderate.reform(move |_: MouseEvent| (id, next))}
                                    class="px-3 py-1 text-sm rounded-md border
                                           border-neutral-300">
                                    {match next {
                                        ModerationStatus::Approved => "Aprobar",
                                        ModerationStatus::Rejected => "Rechazar",
                                        ModerationStatus::Pending => "Devolver a pendiente",
                                    }}
                                </button>
                            })}
                            <button
                                onclick={
                                    let to_delete = to_delete.clone();
                                    Callback::from(move |_: MouseEvent| to_delete.set(Some(id)))
                                }
                                class="px-3 py-1 text-sm text-red-600 underline">
                                {"Eliminar"}
                            </button>
                        </div>
                    </ReviewCard>
                }
            })}

            if to_delete.is_some() {
                <ConfirmationModal
                    title="Eliminar reseña"
                    message="La reseña se eliminará de forma permanente."
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
