use payloads::requests::LoginCredentials;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::{
    Route, State,
    components::TextField,
    get_api_client,
    hooks::{use_push_route, use_title},
};

#[function_component]
pub fn LoginPage() -> Html {
    use_title("Iniciar sesión");
    let (_, dispatch) = use_store::<State>();
    let push_route = use_push_route();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let (email, password) = (email.clone(), password.clone());
        let (error, loading) = (error.clone(), loading.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if email.trim().is_empty() || password.is_empty() {
                error.set(Some("Ingresa tu correo y contraseña".into()));
                return;
            }
            let credentials = LoginCredentials {
                email: email.trim().to_string(),
                password: (*password).clone(),
            };
            let dispatch = dispatch.clone();
            let push_route = push_route.clone();
            let (error, loading) = (error.clone(), loading.clone());
            yew::platform::spawn_local(async move {
                loading.set(true);
                match get_api_client().login(&credentials).await {
                    Ok(session) => {
                        let admin = session.user.role.is_admin();
                        dispatch.reduce_mut(|state| state.sign_in(session));
                        push_route.emit(if admin {
                            Route::Admin
                        } else {
                            Route::Home
                        });
                    }
                    Err(e) => {
                        tracing::warn!("login failed: {e}");
                        let message = if e.is_unauthorized() {
                            "Correo o contraseña incorrectos"
                        } else {
                            "No se pudo iniciar sesión"
                        };
                        error.set(Some(message.into()));
                    }
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="flex items-center justify-center min-h-[60vh] px-4">
            <form onsubmit={on_submit}
                class="max-w-md w-full p-8 bg-white rounded-lg shadow space-y-4">
                <h1 class="text-2xl font-bold">{"Iniciar sesión"}</h1>
                <TextField label="Correo electrónico" input_type="email"
                    value={(*email).clone()}
                    on_change={
                        let email = email.clone();
                        Callback::from(move |value: String| email.set(value))
                    } />
                <TextField label="Contraseña" input_type="password"
                    value={(*password).clone()}
                    on_change={
                        let password = password.clone();
                        Callback::from(move |value: String| password.set(value))
                    } />
                if let Some(message) = &*error {
                    <p class="text-sm text-red-600">{message}</p>
                }
                <button type="submit" disabled={*loading}
                    class="w-full py-2 rounded-md bg-neutral-900 text-white
                           disabled:opacity-50">
                    {if *loading { "Entrando..." } else { "Entrar" }}
                </button>
                <p class="text-sm text-neutral-600 text-center">
                    {"¿No tienes cuenta? "}
                    <Link<Route> to={Route::Register} classes="underline">
                        {"Regístrate"}
                    </Link<Route>>
                </p>
            </form>
        </div>
    }
}
