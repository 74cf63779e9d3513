use content::{CrudManager, manager::SAVE_ERROR_MESSAGE};
use payloads::{Attraction, DetailPage, GalleryImage, requests::UploadFile};
use test_helpers::{PNG_BYTES, attraction_input, spawn_app};

#[tokio::test]
async fn manager_creates_edits_and_deletes() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.create_admin().await?;
    let location = app.location("valle-verde").await?;

    let mut manager = CrudManager::<Attraction>::new(Some(location.id));
    manager.reload(&admin).await?;
    assert!(manager.items.is_empty());

    manager.start_create();
    manager.update_draft(|input| {
        *input = attraction_input(location.id, "Mirador del Águila");
    });
    let created = manager.submit(&admin).await?;
    assert_eq!(manager.editing, None);
    assert_eq!(manager.items, vec![created.clone()]);

    assert!(manager.start_edit(created.id));
    manager.update_draft(|input| input.title = "Mirador Norte".into());
    manager.submit(&admin).await?;
    assert_eq!(manager.items.len(), 1);
    assert_eq!(manager.items[0].title, "Mirador Norte");

    manager.delete(&admin, created.id).await?;
    assert!(manager.items.is_empty());

    Ok(())
}

#[tokio::test]
async fn failed_save_keeps_the_draft() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let location = app.location("puerto-sol").await?;
    let (visitor, _) = app.create_visitor("Ana", "ana@example.com").await?;

    let mut manager = CrudManager::<Attraction>::new(Some(location.id));
    manager.start_create();
    manager.update_draft(|input| input.title = "Faro".into());
    assert!(manager.submit(&visitor).await.is_err());

    assert_eq!(manager.error.as_deref(), Some(SAVE_ERROR_MESSAGE));
    let draft = manager.editing.as_ref().map(|d| d.input.title.as_str());
    assert_eq!(draft, Some("Faro"));

    Ok(())
}

#[tokio::test]
async fn uploads_fill_the_draft_before_saving() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.create_admin().await?;
    let location = app.location("puerto-sol").await?;

    let mut manager = CrudManager::<DetailPage>::new(Some(location.id));
    manager.start_create();
    manager.update_draft(|input| {
        input.slug = "playas".into();
        input.title = "Playas".into();
    });
    let uploaded = manager
        .upload_into_draft(
            &admin,
            vec![UploadFile {
                name: "portada.png".into(),
                data: PNG_BYTES.to_vec(),
            }],
        )
        .await?;
    assert_eq!(uploaded, 1);

    let page = manager.submit(&admin).await?;
    let hero = page.hero_image.expect("hero image set from upload");
    assert!(hero.contains("/api/uploads/"));

    Ok(())
}

#[tokio::test]
async fn bulk_gallery_creation() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.create_admin().await?;
    let location = app.location("valle-verde").await?;

    let mut manager = CrudManager::<GalleryImage>::new(Some(location.id));
    let inputs = (0..3)
        .map(|i| test_helpers::gallery_input(location.id, &format!("/g/{i}.jpg")))
        .collect();
    assert_eq!(manager.create_each(&admin, inputs).await?, 3);
    assert_eq!(manager.items.len(), 3);

    Ok(())
}
