mod auth;
mod content;
mod forum;
mod locations;
mod uploads;

use test_helpers::spawn_app;

#[tokio::test]
async fn health_check() -> anyhow::Result<()> {
    let app = spawn_app().await;

    app.client.health_check().await?;

    Ok(())
}

#[tokio::test]
async fn requests_are_counted_by_path() -> anyhow::Result<()> {
    let app = spawn_app().await;

    app.client.list_locations().await?;
    app.client.list_locations().await?;
    app.client.get_location("puerto-sol").await?;

    assert_eq!(app.request_count("GET", "/api/locations"), 2);
    assert_eq!(app.request_count("GET", "/api/locations/puerto-sol"), 1);
    assert_eq!(app.requests.total(), 3);

    Ok(())
}
