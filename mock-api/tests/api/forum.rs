use payloads::{
    ModerationStatus, StatusCode,
    requests::{ForumQuery, ModeratePost},
};
use test_helpers::{assert_status_code, review, spawn_app};

fn approved() -> ForumQuery {
    ForumQuery {
        status: Some(ModerationStatus::Approved),
        ..Default::default()
    }
}

#[tokio::test]
async fn reviews_are_hidden_until_approved() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.create_admin().await?;
    let (visitor, user) = app.create_visitor("Ana", "ana@example.com").await?;
    let location = app.location("valle-verde").await?;

    let post = visitor
        .create_post(&review(location.id, "El mejor café de la sierra"))
        .await?;
    assert_eq!(post.status, ModerationStatus::Pending);
    assert_eq!(post.user_id, user.id);
    assert_eq!(post.author, "Ana");

    assert!(app.client.list_posts(&approved()).await?.is_empty());
    // without a status filter the public still only sees approved posts
    assert!(app.client.list_posts(&ForumQuery::default()).await?.is_empty());
    assert_eq!(visitor.my_posts().await?, vec![post.clone()]);

    let moderated = admin
        .moderate_post(
            &post.id,
            &ModeratePost {
                status: ModerationStatus::Approved,
            },
        )
        .await?;
    assert_eq!(moderated.status, ModerationStatus::Approved);

    let visible = app.client.list_posts(&approved()).await?;
    assert_eq!(visible, vec![moderated]);

    Ok(())
}

#[tokio::test]
async fn non_approved_listings_require_admin() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.create_admin().await?;
    let (visitor, _) = app.create_visitor("Ana", "ana@example.com").await?;
    let location = app.location("puerto-sol").await?;
    visitor
        .create_post(&review(location.id, "Pendiente de revisión"))
        .await?;

    let pending = ForumQuery {
        status: Some(ModerationStatus::Pending),
        ..Default::default()
    };
    assert_status_code(
        visitor.list_posts(&pending).await,
        StatusCode::FORBIDDEN,
    );
    assert_eq!(admin.list_posts(&pending).await?.len(), 1);
    // admins see every status when no filter is given
    assert_eq!(admin.list_posts(&ForumQuery::default()).await?.len(), 1);

    assert_status_code(
        visitor
            .moderate_post(
                &admin.list_posts(&pending).await?[0].id,
                &ModeratePost {
                    status: ModerationStatus::Approved,
                },
            )
            .await,
        StatusCode::FORBIDDEN,
    );

    Ok(())
}

#[tokio::test]
async fn listing_filters_and_limits() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.create_admin().await?;
    let (visitor, _) = app.create_visitor("Ana", "ana@example.com").await?;
    let puerto = app.location("puerto-sol").await?;
    let valle = app.location("valle-verde").await?;

    for (location, body) in [
        (&puerto, "primera"),
        (&valle, "segunda"),
        (&puerto, "tercera"),
    ] {
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

    let newest_first: Vec<_> = app
        .client
        .list_posts(&approved())
        .await?
        .into_iter()
        .map(|p| p.body)
        .collect();
    assert_eq!(newest_first, vec!["tercera", "segunda", "primera"]);

    let in_puerto = app
        .client
        .list_posts(&ForumQuery {
            location_id: Some(puerto.id),
            ..approved()
        })
        .await?;
    assert_eq!(in_puerto.len(), 2);

    let limited = app
        .client
        .list_posts(&ForumQuery {
            limit: Some(1),
            ..approved()
        })
        .await?;
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].body, "tercera");

    Ok(())
}

#[tokio::test]
async fn authors_and_admins_delete_reviews() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.create_admin().await?;
    let (ana, _) = app.create_visitor("Ana", "ana@example.com").await?;
    let (luis, _) = app.create_visitor("Luis", "luis@example.com").await?;
    let location = app.location("puerto-sol").await?;

    let first = ana.create_post(&review(location.id, "uno")).await?;
    let second = ana.create_post(&review(location.id, "dos")).await?;

    assert_status_code(luis.delete_post(&first.id).await, StatusCode::FORBIDDEN);
    ana.delete_post(&first.id).await?;
    admin.delete_post(&second.id).await?;
    assert!(ana.my_posts().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn invalid_reviews_are_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (visitor, _) = app.create_visitor("Ana", "ana@example.com").await?;
    let location = app.location("puerto-sol").await?;

    let mut post = review(location.id, "Bonito");
    post.rating = 6;
    assert_status_code(visitor.create_post(&post).await, StatusCode::BAD_REQUEST);

    let blank = review(location.id, "   ");
    assert_status_code(
        visitor.create_post(&blank).await,
        StatusCode::BAD_REQUEST,
    );

    assert_status_code(
        app.client.create_post(&review(location.id, "anónimo")).await,
        StatusCode::UNAUTHORIZED,
    );

    Ok(())
}
