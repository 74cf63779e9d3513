use content::load_location_page;
use payloads::{AttractionCategory, StatusCode};
use test_helpers::{assert_status_code, attraction_input, spawn_app};

#[tokio::test]
async fn location_page_groups_places_by_category() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.create_admin().await?;
    let puerto = app.location("puerto-sol").await?;
    let valle = app.location("valle-verde").await?;

    admin
        .create_attraction(&attraction_input(puerto.id, "Malecón"))
        .await?;
    let mut hotel = attraction_input(puerto.id, "Hotel Bahía");
    hotel.category = AttractionCategory::Hotel;
    hotel.position = None;
    admin.create_attraction(&hotel).await?;
    let mut restaurant = attraction_input(puerto.id, "La Palapa");
    restaurant.category = AttractionCategory::Restaurant;
    admin.create_attraction(&restaurant).await?;
    admin
        .create_attraction(&attraction_input(valle.id, "Cascada"))
        .await?;

    let page = load_location_page(&app.client, "puerto-sol").await?;
    assert_eq!(page.location, puerto);
    assert_eq!(page.attractions.len(), 1);
    assert_eq!(page.hotels[0].title, "Hotel Bahía");
    assert_eq!(page.restaurants[0].title, "La Palapa");
    // the hotel has no coordinates
    assert_eq!(page.markers().len(), 2);

    Ok(())
}

#[tokio::test]
async fn unknown_location_fails_before_loading_content() -> anyhow::Result<()>
{
    let app = spawn_app().await;

    assert_status_code(
        load_location_page(&app.client, "atlantida").await,
        StatusCode::NOT_FOUND,
    );
    assert_eq!(app.request_count("GET", "/api/attractions"), 0);

    Ok(())
}
