use payloads::{
    MAX_IMAGE_SIZE, MAX_UPLOAD_FILES, StatusCode,
    requests::{UploadFile, UploadImages},
};
use test_helpers::{PNG_BYTES, assert_status_code, spawn_app};

fn png(name: &str) -> UploadFile {
    UploadFile {
        name: name.into(),
        data: PNG_BYTES.to_vec(),
    }
}

#[tokio::test]
async fn uploaded_images_are_served_back() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (visitor, _) = app.create_visitor("Ana", "ana@example.com").await?;

    let uploaded = visitor
        .upload_images(&UploadImages {
            files: vec![png("a.png"), png("b.png")],
        })
        .await?;
    assert_eq!(uploaded.urls.len(), 2);
    assert_ne!(uploaded.urls[0], uploaded.urls[1]);

    let response = reqwest::get(&uploaded.urls[0]).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str()?,
        "image/png"
    );
    assert_eq!(response.bytes().await?.as_ref(), PNG_BYTES);

    Ok(())
}

#[tokio::test]
async fn uploads_require_a_session() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let result = app
        .client
        .upload_images(&UploadImages {
            files: vec![png("a.png")],
        })
        .await;
    assert_status_code(result, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn invalid_batches_are_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (visitor, _) = app.create_visitor("Ana", "ana@example.com").await?;

    let too_many = UploadImages {
        files: (0..=MAX_UPLOAD_FILES)
            .map(|i| png(&format!("{i}.png")))
            .collect(),
    };
    assert_status_code(
        visitor.upload_images(&too_many).await,
        StatusCode::BAD_REQUEST,
    );

    let not_an_image = UploadImages {
        files: vec![
            png("ok.png"),
            UploadFile {
                name: "notas.txt".into(),
                data: b"hola".to_vec(),
            },
        ],
    };
    assert_status_code(
        visitor.upload_images(&not_an_image).await,
        StatusCode::BAD_REQUEST,
    );

    let mut huge = PNG_BYTES.to_vec();
    huge.resize(MAX_IMAGE_SIZE + 1, 0);
    let too_large = UploadImages {
        files: vec![UploadFile {
            name: "enorme.png".into(),
            data: huge,
        }],
    };
    assert_status_code(
        visitor.upload_images(&too_large).await,
        StatusCode::BAD_REQUEST,
    );

    assert_status_code(
        visitor.upload_images(&UploadImages { files: vec![] }).await,
        StatusCode::BAD_REQUEST,
    );

    Ok(())
}
