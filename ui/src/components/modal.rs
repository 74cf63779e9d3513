use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub children: Html,
    /// Called on backdrop clicks.
    pub on_close: Callback<()>,
    #[prop_or_else(|| AttrValue::from("max-w-md"))]
    pub max_width: AttrValue,
}

/// Centered dialog over a dimmed backdrop.
#[function_component]
pub fn Modal(props: &ModalProps) -> Html {
    let backdrop_ref = use_node_ref();

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        let backdrop_ref = backdrop_ref.clone();
        Callback::from(move |e: MouseEvent| {
            let backdrop = backdrop_ref.cast::<web_sys::Element>();
            let target = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok());
            // clicks inside the dialog bubble up with another target
            if backdrop.is_some() && backdrop == target {
                on_close.emit(());
            }
        })
    };

    html! {
        <div
            ref={backdrop_ref}
            onclick={on_backdrop_click}
            class="fixed inset-0 bg-black bg-opacity-50 z-50 flex
                   items-center justify-center p-4"
        >
            <div class={classes!("bg-white", "rounded-lg", "shadow-xl",
                                 "w-full", "p-6", props.max_width.to_string())}>
                {props.children.clone()}
            </div>
        </div>
    }
}
