use yew::prelude::*;

const SITE_NAME: &str = "Puerto Sol y Valle Verde";

/// Set the document title to "<title> | <site>". No cleanup on unmount: the
/// next page sets its own.
#[hook]
pub fn use_title(title: &str) {
    let title = if title.is_empty() {
        SITE_NAME.to_string()
    } else {
        format!("{title} | {SITE_NAME}")
    };
    use_effect_with(title, |title| {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            doc.set_title(title);
        }
    });
}
