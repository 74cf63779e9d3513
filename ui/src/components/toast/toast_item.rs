use yew::prelude::*;

use crate::contexts::toast::{Toast, ToastType, use_toast};

#[derive(Properties, PartialEq)]
pub struct ToastItemProps {
    pub toast: Toast,
}

#[function_component]
pub fn ToastItem(props: &ToastItemProps) -> Html {
    let toast_handle = use_toast();
    let toast = &props.toast;

    let (colors, icon) = match toast.toast_type {
        ToastType::Error => ("bg-red-50 border-red-200 text-red-700", "✕"),
        ToastType::Success => {
            ("bg-green-50 border-green-200 text-green-700", "✓")
        }
    };

    let on_close = {
        let id = toast.id;
        Callback::from(move |_| toast_handle.remove(id))
    };

    html! {
        <div class={classes!("relative", "p-4", "rounded-lg", "border",
                             "shadow-lg", colors)}>
            <div class="flex items-start space-x-3">
                <span class="text-sm font-medium">{icon}</span>
                <p class="flex-1 text-sm font-medium leading-5">
                    {&toast.message}
                </p>
                <button
                    onclick={on_close}
                    class="text-neutral-400 hover:text-neutral-600"
                    title="Cerrar"
                >
                    <span class="text-lg leading-none">{"×"}</span>
                </button>
            </div>
        </div>
    }
}
