use content::{HomeCache, TimeSource, home::HOME_GALLERY_SAMPLE};
use jiff::{Timestamp, ToSpan};
use payloads::{ModerationStatus, requests::ModeratePost};
use rand::{SeedableRng, rngs::StdRng};
use test_helpers::{gallery_input, review, spawn_app};

#[tokio::test]
async fn home_data_is_cached_between_loads() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.create_admin().await?;
    for location in app.client.list_locations().await? {
        for i in 0..6 {
            admin
                .create_gallery_image(&gallery_input(
                    location.id,
                    &format!("/img/{}-{i}.jpg", location.slug),
                ))
                .await?;
        }
    }
    app.requests.clear();

    let time_source = TimeSource::new(Timestamp::now());
    let cache = HomeCache::new(time_source.clone());
    let mut rng = StdRng::seed_from_u64(7);

    let first = cache.load(&app.client, &mut rng).await;
    assert_eq!(first.error, None);
    assert_eq!(first.data.locations.len(), 2);
    assert_eq!(first.data.adventure_images.len(), HOME_GALLERY_SAMPLE);
    assert_eq!(app.request_count("GET", "/api/locations"), 1);
    assert_eq!(app.request_count("GET", "/api/forum"), 1);
    // one gallery request per location
    assert_eq!(app.request_count("GET", "/api/gallery"), 2);

    let total = app.requests.total();
    time_source.advance(4.minutes());
    let second = cache.load(&app.client, &mut rng).await;
    assert_eq!(second, first);
    assert_eq!(app.requests.total(), total);

    time_source.advance(2.minutes());
    cache.load(&app.client, &mut rng).await;
    assert_eq!(app.request_count("GET", "/api/locations"), 2);

    Ok(())
}

#[tokio::test]
async fn home_shows_recent_approved_reviews() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.create_admin().await?;
    let (visitor, _) = app.create_visitor("Ana", "ana@example.com").await?;
    let location = app.location("puerto-sol").await?;

    for body in ["uno", "dos", "tres", "cuatro"] {
        let post = visitor.create_post(&review(location.id, body)).await?;
        admin
            .moderate_post(
                &post.id,
                &ModeratePost {
                    status: ModerationStatus::Approved,
                },
            )
            .await?;
    }
    visitor.create_post(&review(location.id, "pendiente")).await?;

    let cache = HomeCache::new(TimeSource::new(Timestamp::now()));
    let state = cache.load(&app.client, &mut StdRng::seed_from_u64(1)).await;
    let bodies: Vec<_> =
        state.data.posts.iter().map(|p| p.body.as_str()).collect();
    assert_eq!(bodies, vec!["cuatro", "tres", "dos"]);
    assert!(state.data.adventure_images.is_empty());

    Ok(())
}

#[tokio::test]
async fn invalidation_forces_a_refetch() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let cache = HomeCache::new(TimeSource::new(Timestamp::now()));
    let mut rng = StdRng::seed_from_u64(3);

    cache.load(&app.client, &mut rng).await;
    cache.invalidate();
    assert!(cache.initial_state().loading);
    cache.load(&app.client, &mut rng).await;
    assert_eq!(app.request_count("GET", "/api/locations"), 2);

    Ok(())
}
