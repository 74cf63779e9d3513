use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

const INPUT_CLASS: &str = "w-full px-3 py-2 text-sm border border-neutral-300 \
                           rounded-md focus:outline-none focus:ring-2 \
                           focus:ring-neutral-500";

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or_else(|| AttrValue::from("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    /// Render a textarea with this many rows instead of an input.
    #[prop_or_default]
    pub rows: Option<u32>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Labelled controlled input. Emits the whole value on every keystroke.
#[function_component]
pub fn TextField(props: &TextFieldProps) -> Html {
    let control = match props.rows {
        Some(rows) => {
            let on_change = props.on_change.clone();
            let oninput = Callback::from(move |e: InputEvent| {
                let area: HtmlTextAreaElement = e.target_unchecked_into();
                on_change.emit(area.value());
            });
            html! {
                <textarea
                    class={INPUT_CLASS}
                    rows={rows.to_string()}
                    value={props.value.clone()}
                    placeholder={props.placeholder.clone()}
                    disabled={props.disabled}
                    {oninput}
                />
            }
        }
        None => {
            let on_change = props.on_change.clone();
            let oninput = Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                on_change.emit(input.value());
            });
            html! {
                <input
                    class={INPUT_CLASS}
                    type={props.input_type.clone()}
                    step="any"
                    value={props.value.clone()}
                    placeholder={props.placeholder.clone()}
                    disabled={props.disabled}
                    {oninput}
                />
            }
        }
    };

    html! {
        <label class="block space-y-1">
            <span class="text-sm font-medium text-neutral-700">
                {&props.label}
            </span>
            {control}
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct SelectFieldProps {
    pub label: AttrValue,
    /// (value, label) pairs.
    pub options: Vec<(AttrValue, AttrValue)>,
    pub selected: AttrValue,
    pub on_change: Callback<String>,
}

#[function_component]
pub fn SelectField(props: &SelectFieldProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(select.value());
        })
    };

    html! {
        <label class="block space-y-1">
            <span class="text-sm font-medium text-neutral-700">
                {&props.label}
            </span>
            <select class={INPUT_CLASS} {onchange}>
                {for props.options.iter().map(|(value, label)| html! {
                    <option
                        value={value.clone()}
                        selected={*value == props.selected}
                    >
                        {label}
                    </option>
                })}
            </select>
        </label>
    }
}
