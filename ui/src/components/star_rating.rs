use payloads::requests::{RATING_MAX, RATING_MIN};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StarRatingProps {
    pub rating: u8,
}

#[function_component]
pub fn StarRating(props: &StarRatingProps) -> Html {
    html! {
        <span class="text-amber-500" title={format!("{} de 5", props.rating)}>
            {for (RATING_MIN..=RATING_MAX).map(|star| {
                if star <= props.rating { "★" } else { "☆" }
            })}
        </span>
    }
}

#[derive(Properties, PartialEq)]
pub struct StarRatingInputProps {
    pub rating: u8,
    pub on_change: Callback<u8>,
}

/// Clickable stars for the review form.
#[function_component]
pub fn StarRatingInput(props: &StarRatingInputProps) -> Html {
    html! {
        <div class="flex gap-1 text-2xl text-amber-500">
            {for (RATING_MIN..=RATING_MAX).map(|star| {
                let onclick = props.on_change.reform(move |_: MouseEvent| star);
                html! {
                    <button type="button" {onclick}
                        aria-label={format!("{star} estrellas")}>
                        {if star <= props.rating { "★" } else { "☆" }}
                    </button>
                }
            })}
        </div>
    }
}
