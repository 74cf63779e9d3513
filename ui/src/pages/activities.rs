use futures::future::try_join_all;
use payloads::{Activity, Location, requests::LocationFilter};
use yew::prelude::*;

use crate::{
    get_api_client,
    hooks::{use_fetch, use_title},
};

#[derive(Properties, PartialEq)]
pub struct ActivityCardProps {
    pub activity: Activity,
}

#[function_component]
pub fn ActivityCard(props: &ActivityCardProps) -> Html {
    let activity = &props.activity;

    html! {
        <div class="bg-white border border-neutral-200 rounded-lg overflow-hidden
                    shadow-sm">
            if let Some(src) = activity.image_urls.first() {
                <img src={src.clone()} alt={activity.title.clone()}
                    class="h-40 w-full object-cover" />
            }
            <div class="p-4 space-y-2">
                <h3 class="font-semibold text-neutral-900">{&activity.title}</h3>
                <p class="text-sm text-neutral-600">{&activity.description}</p>
                <div class="flex justify-between text-sm text-neutral-700">
                    <span>
                        {activity.duration.clone().unwrap_or_default()}
                    </span>
                    <span class="font-semibold">
                        {match activity.price {
                            Some(price) => format!("${price:.2} MXN"),
                            None => "Gratis".to_string(),
                        }}
                    </span>
                </div>
            </div>
        </div>
    }
}

/// Every location's activities, grouped by location.
#[function_component]
pub fn ActivitiesPage() -> Html {
    use_title("Actividades");
    let listing = use_fetch((), |_| async move {
        let client = get_api_client();
        let locations = client.list_locations().await?;
        let activities = try_join_all(locations.iter().map(|location| {
            let client = &client;
            let filter = LocationFilter {
                location_id: Some(location.id),
            };
            async move { client.list_activities(&filter).await }
        }))
        .await?;
        Ok::<Vec<(Location, Vec<Activity>)>, _>(
            locations.into_iter().zip(activities).collect(),
        )
    });

    html! {
        <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8 space-y-10">
            <h1 class="text-4xl font-bold">{"Actividades"}</h1>
            {listing.render("las actividades", |groups, _, _| html! {
                <>
                    {for groups.iter().map(|(location, activities)| html! {
                        <section class="space-y-4">
                            <h2 class="text-2xl font-semibold">
                                {&location.name}
                            </h2>
                            if activities.is_empty() {
                                <p class="text-neutral-500">
                                    {"Pronto publicaremos actividades."}
                                </p>
                            }
                            <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                                {for activities.iter().map(|activity| html! {
                                    <ActivityCard activity={activity.clone()} />
                                })}
                            </div>
                        </section>
                    })}
                </>
            })}
        </div>
    }
}
