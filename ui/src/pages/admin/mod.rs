//! Back-office: content managers, location editor, review moderation and
//! accounts. Reachable by admins and superadmins only.

mod forms;
mod locations;
mod managers;
mod moderation;
mod users;

use payloads::{
    Activity, Attraction, DetailPage, GalleryImage, Location, LocationId, User,
};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    Route,
    components::SelectField,
    get_api_client,
    hooks::{use_fetch, use_require_admin, use_require_auth, use_title},
};
use locations::LocationEditor;
use managers::ManagerPanel;
use moderation::ModerationPanel;
use users::UsersPanel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Attractions,
    Activities,
    Gallery,
    DetailPages,
    Locations,
    Moderation,
    Users,
}

impl Tab {
    const ALL: [Tab; 7] = [
        Tab::Attractions,
        Tab::Activities,
        Tab::Gallery,
        Tab::DetailPages,
        Tab::Locations,
        Tab::Moderation,
        Tab::Users,
    ];

    fn label(&self) -> &'static str {
        match self {
            Tab::Attractions => "Lugares",
            Tab::Activities => "Actividades",
            Tab::Gallery => "Galería",
            Tab::DetailPages => "Páginas",
            Tab::Locations => "Destinos",
            Tab::Moderation => "Moderación",
            Tab::Users => "Usuarios",
        }
    }

    /// Tabs whose content belongs to one location.
    fn is_scoped(&self) -> bool {
        matches!(
            self,
            Tab::Attractions
                | Tab::Activities
                | Tab::Gallery
                | Tab::DetailPages
                | Tab::Locations
        )
    }
}

#[function_component]
pub fn AdminPage() -> Html {
    use_title("Administración");
    let signed_in = use_require_auth().is_some();
    let admin = use_require_admin();

    match admin {
        Some(user) => html! { <Dashboard {user} /> },
        None if signed_in => html! {
            <div class="max-w-md mx-auto px-4 py-16 text-center">
                <p class="text-neutral-700">
                    {"No tienes permisos para ver esta página."}
                </p>
            </div>
        },
        None => html! {
            <div class="max-w-md mx-auto px-4 py-16 text-center space-y-4">
                <p class="text-neutral-700">
                    {"Inicia sesión con una cuenta de administrador."}
                </p>
                <Link<Route> to={Route::Login} classes="underline">
                    {"Iniciar sesión"}
                </Link<Route>>
            </div>
        },
    }
}

#[derive(Properties, PartialEq)]
struct DashboardProps {
    user: User,
}

#[function_component]
fn Dashboard(props: &DashboardProps) -> Html {
    let tab = use_state(|| Tab::Attractions);
    let scope = use_state(|| None::<LocationId>);
    let locations = use_fetch((), |_| async move {
        get_api_client().list_locations().await
    });
    let all_locations = locations.data.as_ref().cloned().unwrap_or_default();

    {
        // default to the first location once they arrive
        let scope = scope.clone();
        use_effect_with(all_locations.first().map(|l| l.id), move |first| {
            if scope.is_none() {
                scope.set(*first);
            }
        });
    }

    let tab_bar = Tab::ALL.iter().map(|candidate| {
        let candidate = *candidate;
        let onclick = {
            let tab = tab.clone();
            Callback::from(move |_: MouseEvent| tab.set(candidate))
        };
        let style = if *tab == candidate {
            "border-neutral-900 text-neutral-900"
        } else {
            "border-transparent text-neutral-500"
        };
        html! {
            <button {onclick}
                class={classes!("px-3", "py-2", "border-b-2", "text-sm", style)}>
                {candidate.label()}
            </button>
        }
    });

    let scope_options = all_locations
        .iter()
        .map(|l| (AttrValue::from(l.id.to_string()), AttrValue::from(l.name.clone())))
        .collect::<Vec<_>>();
    let on_scope = {
        let scope = scope.clone();
        let all_locations = all_locations.clone();
        Callback::from(move |id: String| {
            scope.set(
                all_locations
                    .iter()
                    .find(|l| l.id.to_string() == id)
                    .map(|l| l.id),
            );
        })
    };
    let selected_scope = (*scope).map(|id| id.to_string()).unwrap_or_default();
    let selected_location =
        all_locations.iter().find(|l| Some(l.id) == *scope).cloned();

    // remount managers on a scope change so nothing from the old one lingers
    let scope_key = selected_scope.clone();
    let content = match *tab {
        Tab::Attractions => html! {
            <ManagerPanel<Attraction> key={scope_key.clone()} scope={*scope} locations={all_locations.clone()} />
        },
        Tab::Activities => html! {
            <ManagerPanel<Activity> key={scope_key.clone()} scope={*scope} locations={all_locations.clone()} />
        },
        Tab::Gallery => html! {
            <ManagerPanel<GalleryImage> key={scope_key.clone()} scope={*scope} locations={all_locations.clone()} />
        },
        Tab::DetailPages => html! {
            <ManagerPanel<DetailPage> key={scope_key.clone()} scope={*scope} locations={all_locations.clone()} />
        },
        Tab::Locations => match selected_location {
            Some(location) => html! {
                <LocationEditor
                    key={location.id.to_string()}
                    location={location.clone()}
                    on_saved={locations.refetch.reform(|_: Location| ())}
                />
            },
            None => html! {},
        },
        Tab::Moderation => html! {
            <ModerationPanel locations={all_locations.clone()} />
        },
        Tab::Users => html! { <UsersPanel current_user={props.user.clone()} /> },
    };

    html! {
        <div class="max-w-6xl mx-auto px-4 py-8 space-y-6">
            <div class="flex flex-wrap items-end justify-between gap-4">
                <div>
                    <h1 class="text-4xl font-bold">{"Administración"}</h1>
                    <p class="text-neutral-600">{format!("Hola, {}", props.user.name)}</p>
                </div>
                if tab.is_scoped() && !scope_options.is_empty() {
                    <div class="w-64">
                        <SelectField label="Destino" options={scope_options}
                            selected={selected_scope} on_change={on_scope} />
                    </div>
                }
            </div>
            <nav class="flex flex-wrap gap-2 border-b border-neutral-200">
                {for tab_bar}
            </nav>
            {content}
        </div>
    }
}
