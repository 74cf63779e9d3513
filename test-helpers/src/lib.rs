pub mod mock;

use actix_web::web;
use mock_api::{Config, RequestLog, SuperAdmin, store::Store, telemetry};
use payloads::{
    APIClient, AttractionCategory, Location, LocationId, StatusCode, User,
    requests::{self, LoginCredentials, Register},
};
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub const SUPERADMIN_EMAIL: &str = "superadmin@example.com";
pub const SUPERADMIN_PASSWORD: &str = "superadmin-password";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const VISITOR_EMAIL: &str = "visitante@example.com";
pub const PASSWORD: &str = "password123";

/// Smallest valid PNG, for upload tests.
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d,
    0x49, 0x48, 0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
    0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0x15, 0xc4, 0x89, 0x00, 0x00, 0x00,
    0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x60, 0x00, 0x02, 0x00,
    0x00, 0x05, 0x00, 0x01, 0x7a, 0x5e, 0xab, 0x3f, 0x00, 0x00, 0x00, 0x00,
    0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    /// Anonymous client. Authenticated copies come from the login helpers.
    pub client: APIClient,
    pub store: web::Data<Store>,
    pub requests: web::Data<RequestLog>,
}

impl TestApp {
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> anyhow::Result<(APIClient, User)> {
        let session = self
            .client
            .login(&LoginCredentials {
                email: email.into(),
                password: password.into(),
            })
            .await?;
        Ok((self.client.with_token(session.token), session.user))
    }

    pub async fn login_superadmin(&self) -> anyhow::Result<APIClient> {
        let (client, _) =
            self.login(SUPERADMIN_EMAIL, SUPERADMIN_PASSWORD).await?;
        Ok(client)
    }

    /// Create an admin through the superadmin and sign in as them.
    pub async fn create_admin(&self) -> anyhow::Result<APIClient> {
        let superadmin = self.login_superadmin().await?;
        superadmin
            .register_admin(&Register {
                name: "Administradora".into(),
                email: ADMIN_EMAIL.into(),
                password: PASSWORD.into(),
            })
            .await?;
        let (client, _) = self.login(ADMIN_EMAIL, PASSWORD).await?;
        Ok(client)
    }

    /// Register a regular account and return a client signed in as it.
    pub async fn create_visitor(
        &self,
        name: &str,
        email: &str,
    ) -> anyhow::Result<(APIClient, User)> {
        let session = self
            .client
            .register(&Register {
                name: name.into(),
                email: email.into(),
                password: PASSWORD.into(),
            })
            .await?;
        Ok((self.client.with_token(session.token), session.user))
    }

    pub async fn location(&self, slug: &str) -> anyhow::Result<Location> {
        Ok(self.client.get_location(slug).await?)
    }

    /// Requests the server received with this method and path.
    pub fn request_count(&self, method: &str, path: &str) -> usize {
        self.requests.count(method, path)
    }
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let store = web::Data::new(Store::new());
    mock_api::store::seed::locations(&store);
    let requests = web::Data::new(RequestLog::default());

    let mut config = Config {
        ip: "127.0.0.1".into(),
        port,
        allowed_origins: vec!["*".to_string()],
        superadmin: Some(SuperAdmin {
            email: SUPERADMIN_EMAIL.into(),
            password: secrecy::SecretBox::new(Box::new(
                SUPERADMIN_PASSWORD.to_string(),
            )),
        }),
        public_url: None,
    };

    let server = mock_api::build(&mut config, store.clone(), requests.clone())
        .await
        .unwrap();
    tokio::spawn(server);

    TestApp {
        port: config.port,
        client: APIClient::new(format!("http://127.0.0.1:{}", config.port)),
        store,
        requests,
    }
}

/// Use OS-assigned port for parallel testing.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}

pub fn attraction_input(
    location_id: LocationId,
    title: &str,
) -> requests::AttractionInput {
    requests::AttractionInput {
        location_id: Some(location_id),
        category: AttractionCategory::Attraction,
        title: title.into(),
        description: "Vista panorámica de la bahía".into(),
        image_urls: vec![],
        position: Some(payloads::Coordinates {
            lat: 20.6534,
            lng: -105.2253,
        }),
    }
}

pub fn review(location_id: LocationId, body: &str) -> requests::NewForumPost {
    requests::NewForumPost {
        location_id,
        rating: 5,
        body: body.into(),
        image_urls: vec![],
    }
}

pub fn gallery_input(
    location_id: LocationId,
    url: &str,
) -> requests::GalleryImageInput {
    requests::GalleryImageInput {
        location_id: Some(location_id),
        url: url.into(),
        caption: String::new(),
    }
}
