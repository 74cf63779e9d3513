use payloads::ForumPost;
use yew::prelude::*;

use super::StarRating;

#[derive(Properties, PartialEq)]
pub struct ReviewCardProps {
    pub post: ForumPost,
    /// Location name shown under the author, when known.
    #[prop_or_default]
    pub location_name: Option<AttrValue>,
    /// Show the moderation status badge.
    #[prop_or_default]
    pub show_status: bool,
    /// Extra controls (delete, moderation) rendered in the footer.
    #[prop_or_default]
    pub children: Html,
}

#[function_component]
pub fn ReviewCard(props: &ReviewCardProps) -> Html {
    let post = &props.post;
    let date = post.created_at.strftime("%d/%m/%Y").to_string();

    html! {
        <article class="p-4 bg-white border border-neutral-200 rounded-lg
                        shadow-sm space-y-2">
            <header class="flex items-center justify-between">
                <div>
                    <p class="font-semibold text-neutral-900">{&post.author}</p>
                    if let Some(name) = &props.location_name {
                        <p class="text-xs text-neutral-500">{name}</p>
                    }
                </div>
                <div class="text-right">
                    <StarRating rating={post.rating} />
                    <p class="text-xs text-neutral-500">{date}</p>
                </div>
            </header>
            <p class="text-sm text-neutral-700 whitespace-pre-line">
                {&post.body}
            </p>
            if !post.image_urls.is_empty() {
                <div class="flex flex-wrap gap-2">
                    {for post.image_urls.iter().map(|url| html! {
                        <img src={url.clone()} alt=""
                            class="h-20 w-20 object-cover rounded" />
                    })}
                </div>
            }
            if props.show_status {
                <span class="inline-block px-2 py-0.5 text-xs rounded-full
                             bg-neutral-100 text-neutral-700">
                    {post.status.label()}
                </span>
            }
            {props.children.clone()}
        </article>
    }
}
