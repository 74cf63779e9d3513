use payloads::{
    Role, StatusCode,
    requests::{LoginCredentials, Register},
};
use test_helpers::{
    ADMIN_EMAIL, PASSWORD, SUPERADMIN_EMAIL, assert_status_code, spawn_app,
};

#[tokio::test]
async fn register_signs_in_a_regular_user() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let (client, user) =
        app.create_visitor("Ana López", "ana@example.com").await?;
    assert_eq!(user.role, Role::User);
    assert_eq!(user.email, "ana@example.com");

    // the returned token authenticates later requests
    assert!(client.my_posts().await?.is_empty());

    let (_, again) = app.login("ana@example.com", PASSWORD).await?;
    assert_eq!(again, user);

    Ok(())
}

#[tokio::test]
async fn login_rejects_bad_credentials() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_visitor("Ana", "ana@example.com").await?;

    for (email, password) in [
        ("ana@example.com", "wrong-password"),
        ("nadie@example.com", PASSWORD),
    ] {
        let result = app
            .client
            .login(&LoginCredentials {
                email: email.into(),
                password: password.into(),
            })
            .await;
        assert_status_code(result, StatusCode::UNAUTHORIZED);
    }

    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_visitor("Ana", "ana@example.com").await?;

    let result = app
        .client
        .register(&Register {
            name: "Otra Ana".into(),
            email: "ANA@example.com".into(),
            password: PASSWORD.into(),
        })
        .await;
    assert_status_code(result, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn only_superadmin_creates_admins() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let details = Register {
        name: "Admin".into(),
        email: ADMIN_EMAIL.into(),
        password: PASSWORD.into(),
    };

    assert_status_code(
        app.client.register_admin(&details).await,
        StatusCode::UNAUTHORIZED,
    );

    let (visitor, _) = app.create_visitor("Ana", "ana@example.com").await?;
    assert_status_code(
        visitor.register_admin(&details).await,
        StatusCode::FORBIDDEN,
    );

    let admin = app.create_admin().await?;
    let other = Register {
        email: "otro-admin@example.com".into(),
        ..details
    };
    assert_status_code(
        admin.register_admin(&other).await,
        StatusCode::FORBIDDEN,
    );

    let superadmin = app.login_superadmin().await?;
    let created = superadmin.register_admin(&other).await?;
    assert_eq!(created.role, Role::Admin);

    Ok(())
}

#[tokio::test]
async fn user_list_requires_admin() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (visitor, _) = app.create_visitor("Ana", "ana@example.com").await?;
    assert_status_code(visitor.list_users().await, StatusCode::FORBIDDEN);

    let admin = app.create_admin().await?;
    let users = admin.list_users().await?;
    let emails: Vec<_> = users.iter().map(|u| u.email.as_str()).collect();
    assert!(emails.contains(&SUPERADMIN_EMAIL));
    assert!(emails.contains(&ADMIN_EMAIL));
    assert!(emails.contains(&"ana@example.com"));
    assert_eq!(
        users
            .iter()
            .find(|u| u.email == SUPERADMIN_EMAIL)
            .map(|u| u.role),
        Some(Role::SuperAdmin)
    );

    Ok(())
}

#[tokio::test]
async fn invalid_token_is_unauthorized() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let forged = app.client.with_token("not-a-session");
    assert_status_code(forged.my_posts().await, StatusCode::UNAUTHORIZED);
    Ok(())
}
