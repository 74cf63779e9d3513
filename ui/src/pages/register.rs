use payloads::{StatusCode, requests::Register};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{
    Route, State,
    components::TextField,
    get_api_client,
    hooks::{use_push_route, use_title},
};

#[derive(Properties, PartialEq)]
pub struct RegisterFormProps {
    pub title: AttrValue,
    pub submit_text: AttrValue,
    /// Receives validated details; the parent performs the request.
    pub on_submit: Callback<Register>,
    #[prop_or_default]
    pub loading: bool,
    #[prop_or_default]
    pub error: Option<AttrValue>,
}

/// Name, email and password form shared by sign-up and admin creation.
#[function_component]
pub fn RegisterForm(props: &RegisterFormProps) -> Html {
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let invalid = use_state(|| None::<&'static str>);

    let on_submit = {
        let (name, email, password) =
            (name.clone(), email.clone(), password.clone());
        let invalid = invalid.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let details = Register {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                password: (*password).clone(),
            };
            match details.validate() {
                Ok(()) => {
                    invalid.set(None);
                    on_submit.emit(details);
                }
                Err(message) => invalid.set(Some(message)),
            }
        })
    };

    let setter = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |value: String| state.set(value))
    };
    let error = (*invalid)
        .map(AttrValue::from)
        .or_else(|| props.error.clone());

    html! {
        <form onsubmit={on_submit}
            class="max-w-md w-full p-8 bg-white rounded-lg shadow space-y-4">
            <h1 class="text-2xl font-bold">{&props.title}</h1>
            <TextField label="Nombre" value={(*name).clone()}
                on_change={setter(&name)} />
            <TextField label="Correo electrónico" input_type="email"
                value={(*email).clone()} on_change={setter(&email)} />
            <TextField label="Contraseña" input_type="password"
                placeholder="Mínimo 8 caracteres"
                value={(*password).clone()} on_change={setter(&password)} />
            if let Some(message) = error {
                <p class="text-sm text-red-600">{message}</p>
            }
            <button type="submit" disabled={props.loading}
                class="w-full py-2 rounded-md bg-neutral-900 text-white
                       disabled:opacity-50">
                {&props.submit_text}
            </button>
        </form>
    }
}

#[function_component]
pub fn RegisterPage() -> Html {
    use_title("Crear cuenta");
    let (_, dispatch) = use_store::<State>();
    let push_route = use_push_route();
    let error = use_state(|| None::<AttrValue>);
    let loading = use_state(|| false);

    let on_submit = {
        let (error, loading) = (error.clone(), loading.clone());
        Callback::from(move |details: Register| {
            let dispatch = dispatch.clone();
            let push_route = push_route.clone();
            let (error, loading) = (error.clone(), loading.clone());
            yew::platform::spawn_local(async move {
                loading.set(true);
                match get_api_client().register(&details).await {
                    Ok(session) => {
                        dispatch.reduce_mut(|state| state.sign_in(session));
                        push_route.emit(Route::Home);
                    }
                    Err(e) => {
                        tracing::warn!("registration failed: {e}");
                        let message = match e.status() {
                            Some(StatusCode::BAD_REQUEST) => e.to_string(),
                            _ => "No se pudo crear la cuenta".to_string(),
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
            <RegisterForm
                title="Crear cuenta"
                submit_text="Registrarme"
                {on_submit}
                loading={*loading}
                error={(*error).clone()}
            />
        </div>
    }
}
