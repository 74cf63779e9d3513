use payloads::{Role, User, requests::Register};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{
    State, contexts::toast::use_toast, hooks::use_fetch,
    pages::register::RegisterForm,
};

fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "Visitante",
        Role::Admin => "Administrador",
        Role::SuperAdmin => "Superadministrador",
    }
}

#[derive(Properties, PartialEq)]
pub struct UsersPanelProps {
    pub current_user: User,
}

/// Account list. Superadmins also get a form to create admins.
#[function_component]
pub fn UsersPanel(props: &UsersPanelProps) -> Html {
    let (state, _) = use_store::<State>();
    let toast = use_toast();
    let creating = use_state(|| false);
    let create_error = use_state(|| None::<AttrValue>);
    // bumped after an admin is created so the list reloads
    let form_key = use_state(|| 0u32);

    let users = {
        let client = state.client();
        use_fetch(*form_key, move |_| {
            let client = client.clone();
            async move { client.list_users().await }
        })
    };

    let on_create = {
        let client = state.client();
        let (creating, create_error) = (creating.clone(), create_error.clone());
        let form_key = form_key.clone();
        Callback::from(move |details: Register| {
            let client = client.clone();
            let (creating, create_error) =
                (creating.clone(), create_error.clone());
            let form_key = form_key.clone();
            let toast = toast.clone();
            yew::platform::spawn_local(async move {
                creating.set(true);
                match client.register_admin(&details).await {
                    Ok(user) => {
                        create_error.set(None);
                        toast.success(format!("{} ahora es administrador", user.name));
                        form_key.set(*form_key + 1);
                    }
                    Err(e) => {
                        tracing::warn!("failed to create admin: {e}");
                        create_error.set(Some(e.to_string().into()));
                    }
                }
                creating.set(false);
            });
        })
    };

    html! {
        <section class="space-y-6">
            <h2 class="text-2xl font-semibold">{"Usuarios"}</h2>
            {users.render("los usuarios", |users, _, _| html! {
                <table class="w-full text-sm bg-white border border-neutral-200 rounded-lg">
                    <thead class="text-left text-neutral-500">
                        <tr>
                            <th class="p-3">{"Nombre"}</th>
                            <th class="p-3">{"Correo"}</th>
                            <th class="p-3">{"Rol"}</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-neutral-200">
                        {for users.iter().map(|user| html! {
                            <tr key={user.id.to_string()}>
                                <td class="p-3">{&user.name}</td>
                                <td class="p-3">{&user.email}</td>
                                <td class="p-3">{role_label(user.role)}</td>
                            </tr>
                        })}
                    </tbody>
                </table>
            })}
            if props.current_user.role.can_manage_admins() {
                <RegisterForm
                    key={*form_key}
                    title="Nuevo administrador"
                    submit_text="Crear administrador"
                    on_submit={on_create}
                    loading={*creating}
                    error={(*create_error).clone()}
                />
            }
        </section>
    }
}
