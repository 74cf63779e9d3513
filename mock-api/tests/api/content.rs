use payloads::{
    Attraction, StatusCode,
    requests::{ActivityInput, DetailPageInput, LocationFilter},
};
use rust_decimal::Decimal;
use test_helpers::{assert_status_code, attraction_input, gallery_input, spawn_app};

#[tokio::test]
async fn create_read_update_delete_attraction() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.create_admin().await?;
    let location = app.location("puerto-sol").await?;

    let created = admin
        .create_attraction(&attraction_input(location.id, "Faro del Muelle"))
        .await?;
    assert_eq!(created.location_id, location.id);

    let filter = LocationFilter {
        location_id: Some(location.id),
    };
    let listed = app.client.list_attractions(&filter).await?;
    assert_eq!(listed, vec![created.clone()]);

    let mut update = attraction_input(location.id, "Faro Viejo");
    update.position = None;
    let updated = admin.update_attraction(&created.id, &update).await?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Faro Viejo");
    assert_eq!(updated.position, None);

    admin.delete_attraction(&created.id).await?;
    assert!(app.client.list_attractions(&filter).await?.is_empty());
    assert_status_code(
        admin.delete_attraction(&created.id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn lists_are_scoped_by_location() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.create_admin().await?;
    let puerto = app.location("puerto-sol").await?;
    let valle = app.location("valle-verde").await?;

    admin
        .create_gallery_image(&gallery_input(puerto.id, "/img/a.jpg"))
        .await?;
    admin
        .create_gallery_image(&gallery_input(valle.id, "/img/b.jpg"))
        .await?;
    admin
        .create_gallery_image(&gallery_input(valle.id, "/img/c.jpg"))
        .await?;

    let valle_images = app
        .client
        .list_gallery(&LocationFilter {
            location_id: Some(valle.id),
        })
        .await?;
    assert_eq!(valle_images.len(), 2);
    assert!(valle_images.iter().all(|i| i.location_id == valle.id));

    let everything = app.client.list_gallery(&LocationFilter::default()).await?;
    assert_eq!(everything.len(), 3);

    Ok(())
}

#[tokio::test]
async fn writes_require_admin() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let location = app.location("valle-verde").await?;
    let input = attraction_input(location.id, "Cascada");

    assert_status_code(
        app.client.create_attraction(&input).await,
        StatusCode::UNAUTHORIZED,
    );
    let (visitor, _) = app.create_visitor("Ana", "ana@example.com").await?;
    assert_status_code(
        visitor.create_attraction(&input).await,
        StatusCode::FORBIDDEN,
    );

    let listed: Vec<Attraction> =
        app.client.list_attractions(&LocationFilter::default()).await?;
    assert!(listed.is_empty());

    Ok(())
}

#[tokio::test]
async fn activities_keep_prices() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.create_admin().await?;
    let location = app.location("valle-verde").await?;

    let activity = admin
        .create_activity(&ActivityInput {
            location_id: Some(location.id),
            title: "Rappel en la cascada".into(),
            description: String::new(),
            price: Some(Decimal::new(89950, 2)),
            duration: Some("5 horas".into()),
            image_urls: vec![],
        })
        .await?;
    assert_eq!(activity.price, Some(Decimal::new(89950, 2)));

    let negative = ActivityInput {
        location_id: Some(location.id),
        title: "Gratis".into(),
        price: Some(Decimal::new(-1, 0)),
        ..Default::default()
    };
    assert_status_code(
        admin.create_activity(&negative).await,
        StatusCode::BAD_REQUEST,
    );

    Ok(())
}

#[tokio::test]
async fn detail_pages_resolve_by_slugs() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.create_admin().await?;
    let location = app.location("puerto-sol").await?;

    let input = DetailPageInput {
        location_id: Some(location.id),
        slug: "gastronomia".into(),
        title: "Gastronomía".into(),
        html: "<p>Pescado zarandeado</p>".into(),
        hero_image: None,
    };
    let page = admin.create_detail_page(&input).await?;

    let fetched = app.client.get_detail_page("puerto-sol", "gastronomia").await?;
    assert_eq!(fetched, page);

    // the slug is taken within this location only
    assert_status_code(
        admin.create_detail_page(&input).await,
        StatusCode::BAD_REQUEST,
    );
    let valle = app.location("valle-verde").await?;
    admin
        .create_detail_page(&DetailPageInput {
            location_id: Some(valle.id),
            ..input.clone()
        })
        .await?;

    assert_status_code(
        app.client.get_detail_page("puerto-sol", "playas").await,
        StatusCode::NOT_FOUND,
    );
    assert_status_code(
        admin
            .create_detail_page(&DetailPageInput {
                slug: "Con Espacios".into(),
                ..input
            })
            .await,
        StatusCode::BAD_REQUEST,
    );

    Ok(())
}
