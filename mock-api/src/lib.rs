pub mod password;
pub mod routes;
pub mod store;
pub mod telemetry;

use std::collections::VecDeque;
use std::net::TcpListener;
use std::sync::{Mutex, PoisonError};

use actix_cors::Cors;
use actix_web::dev::{Server, Service};
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use payloads::{MAX_IMAGE_SIZE, MAX_UPLOAD_FILES, Role, requests::Register};
use secrecy::{ExposeSecret, SecretBox};

use crate::store::Store;

/// Largest JSON body accepted. Uploads carry file bytes as number arrays, so
/// each byte can take up to four characters.
const JSON_LIMIT: usize = MAX_UPLOAD_FILES * MAX_IMAGE_SIZE * 4 + 64 * 1024;

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
/// The store and request log are shared with the caller so tests can inspect
/// them while the server runs.
pub async fn build(
    config: &mut Config,
    store: web::Data<Store>,
    requests: web::Data<RequestLog>,
) -> anyhow::Result<Server> {
    if let Some(superadmin) = &config.superadmin {
        seed_superadmin(superadmin, &store).await?;
    }

    let allowed_origins = config.allowed_origins.clone();

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let public_url = web::Data::new(PublicUrl(
        config
            .public_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", config.ip, config.port)),
    ));

    let server = HttpServer::new(move || {
        let cors = if allowed_origins.iter().any(|origin| origin == "*") {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
        } else {
            let mut cors =
                Cors::default().allow_any_method().allow_any_header();
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            cors
        };

        let log = requests.clone();
        App::new()
            .wrap_fn(move |req, srv| {
                log.record(req.method().as_str(), req.path());
                srv.call(req)
            })
            .wrap(cors)
            .app_data(web::JsonConfig::default().limit(JSON_LIMIT))
            .service(routes::api_services())
            .app_data(store.clone())
            .app_data(requests.clone())
            .app_data(public_url.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

async fn seed_superadmin(
    superadmin: &SuperAdmin,
    store: &Store,
) -> anyhow::Result<()> {
    if store.credentials(&superadmin.email).is_some() {
        return Ok(());
    }
    password::create_user(
        Register {
            name: "Superadmin".into(),
            email: superadmin.email.clone(),
            password: superadmin.password.expose_secret().clone(),
        },
        Role::SuperAdmin,
        store,
    )
    .await
    .context("Failed to create superadmin account")?;
    tracing::info!(email = %superadmin.email, "superadmin account created");
    Ok(())
}

/// Base for the URLs handed out for uploaded files.
pub struct PublicUrl(pub String);

/// Requests kept by a default [`RequestLog`].
pub const MAX_LOGGED_REQUESTS: usize = 10_000;

/// The most recent requests the server has seen, in arrival order. Once
/// `limit` entries are held the oldest is dropped for each new one.
pub struct RequestLog {
    entries: Mutex<VecDeque<(String, String)>>,
    limit: usize,
}

impl Default for RequestLog {
    fn default() -> Self {
        Self::with_limit(MAX_LOGGED_REQUESTS)
    }
}

impl RequestLog {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            limit,
        }
    }

    pub fn record(&self, method: &str, path: &str) {
        if self.limit == 0 {
            return;
        }
        let mut entries =
            self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        while entries.len() >= self.limit {
            entries.pop_front();
        }
        entries.push_back((method.to_string(), path.to_string()));
    }

    /// Requests with exactly this method and path (query string excluded).
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(m, p)| m == method && p == path)
            .count()
    }

    pub fn total(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

pub struct SuperAdmin {
    pub email: String,
    pub password: SecretBox<String>,
}

pub struct Config {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
    /// List of allowed CORS origins. Use "*" to allow any origin
    pub allowed_origins: Vec<String>,
    /// Account created at startup if it does not exist yet.
    pub superadmin: Option<SuperAdmin>,
    /// Public base URL for uploaded files. Defaults to the bound address.
    pub public_url: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        use std::env::var;

        let allowed_origins = var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let superadmin = match (
            var("SUPERADMIN_EMAIL"),
            var("SUPERADMIN_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) => Some(SuperAdmin {
                email,
                password: SecretBox::new(Box::new(password)),
            }),
            _ => None,
        };

        Ok(Config {
            ip: var("IP_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a port number")?,
            allowed_origins,
            superadmin,
            public_url: var("PUBLIC_URL").ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_log_keeps_only_the_newest_entries() {
        let log = RequestLog::with_limit(3);
        for i in 0..5 {
            log.record("GET", &format!("/api/attractions/{i}"));
        }
        assert_eq!(log.total(), 3);
        assert_eq!(log.count("GET", "/api/attractions/0"), 0);
        assert_eq!(log.count("GET", "/api/attractions/1"), 0);
        assert_eq!(log.count("GET", "/api/attractions/4"), 1);
    }

    #[test]
    fn default_request_log_is_bounded() {
        let log = RequestLog::default();
        for _ in 0..MAX_LOGGED_REQUESTS + 5 {
            log.record("POST", "/api/login");
        }
        assert_eq!(log.total(), MAX_LOGGED_REQUESTS);
        assert_eq!(log.count("POST", "/api/login"), MAX_LOGGED_REQUESTS);

        log.clear();
        log.record("POST", "/api/login");
        assert_eq!(log.total(), 1);
    }
}
