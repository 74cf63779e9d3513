use payloads::{AccentColor, Coordinates, StatusCode, requests::LocationUpdate};
use test_helpers::{assert_status_code, spawn_app};

fn update_from(location: &payloads::Location) -> LocationUpdate {
    LocationUpdate {
        name: location.name.clone(),
        accent: location.accent,
        hero: location.hero.clone(),
        center: location.center,
        zoom: location.zoom,
        tagline: location.tagline.clone(),
        description: location.description.clone(),
    }
}

#[tokio::test]
async fn both_locations_are_seeded() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let locations = app.client.list_locations().await?;
    let slugs: Vec<_> = locations.iter().map(|l| l.slug.as_str()).collect();
    assert_eq!(slugs, vec!["puerto-sol", "valle-verde"]);

    assert_status_code(
        app.client.get_location("atlantida").await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn admins_edit_locations() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.create_admin().await?;
    let location = app.location("puerto-sol").await?;

    let mut update = update_from(&location);
    update.accent = AccentColor::Cyan;
    update.tagline = "Sol todo el año".into();
    update.center = Coordinates {
        lat: 20.7,
        lng: -105.3,
    };
    let updated = admin.update_location(&location.id, &update).await?;
    assert_eq!(updated.accent, AccentColor::Cyan);
    assert_eq!(updated.slug, location.slug);
    assert_eq!(app.location("puerto-sol").await?, updated);

    let (visitor, _) = app.create_visitor("Ana", "ana@example.com").await?;
    assert_status_code(
        visitor.update_location(&location.id, &update).await,
        StatusCode::FORBIDDEN,
    );

    update.center.lat = 123.0;
    assert_status_code(
        admin.update_location(&location.id, &update).await,
        StatusCode::BAD_REQUEST,
    );

    Ok(())
}
