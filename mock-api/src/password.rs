use anyhow::Context;
use argon2::password_hash::SaltString;
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier,
    Version,
};
use payloads::{Role, User, requests::Register};
use secrecy::{ExposeSecret, SecretBox};

use crate::store::{Store, StoreError};
use crate::telemetry::spawn_blocking_with_tracing;

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

pub struct Credentials {
    pub email: String,
    pub password: SecretBox<String>,
}

impl From<payloads::requests::LoginCredentials> for Credentials {
    fn from(details: payloads::requests::LoginCredentials) -> Self {
        Self {
            email: details.email,
            password: SecretBox::new(Box::new(details.password)),
        }
    }
}

#[tracing::instrument(name = "Validate credentials", skip(credentials, store))]
pub async fn validate_credentials(
    credentials: Credentials,
    store: &Store,
) -> Result<User, AuthError> {
    let mut user = None;
    // fallback password hash to prevent timing differences
    let mut expected_password_hash = SecretBox::new(Box::new(
        "$argon2id$v=19$m=15000,t=2,p=1$\
        gZiV/M1gPc22ElAH/Jh1Hw$\
        CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno"
            .to_string(),
    ));

    if let Some((stored_user, stored_password_hash)) =
        store.credentials(&credentials.email)
    {
        user = Some(stored_user);
        expected_password_hash = stored_password_hash;
    }

    spawn_blocking_with_tracing(move || {
        verify_password_hash(expected_password_hash, credentials.password)
    })
    .await
    .context("Failed to spawn blocking task.")??;

    user.ok_or_else(|| anyhow::anyhow!("Unknown email."))
        .map_err(AuthError::InvalidCredentials)
}

fn verify_password_hash(
    expected_password_hash: SecretBox<String>,
    password_candidate: SecretBox<String>,
) -> Result<(), AuthError> {
    let expected_password_hash =
        PasswordHash::new(expected_password_hash.expose_secret())
            .context("Failed to parse hash in PHC string format.")?;

    Argon2::default()
        .verify_password(
            password_candidate.expose_secret().as_bytes(),
            &expected_password_hash,
        )
        .context("Invalid password.")
        .map_err(AuthError::InvalidCredentials)
}

/// Validate and store a new account with the given role.
#[tracing::instrument(
    name = "Create user",
    skip(details, store),
    fields(email = %details.email, user_id = tracing::field::Empty)
)]
pub async fn create_user(
    details: Register,
    role: Role,
    store: &Store,
) -> Result<User, StoreError> {
    details.validate().map_err(StoreError::InvalidInput)?;
    let Register {
        name,
        email,
        password,
    } = details;
    let password = SecretBox::new(Box::new(password));
    let password_hash =
        spawn_blocking_with_tracing(move || compute_password_hash(password))
            .await
            .map_err(anyhow::Error::from)?
            .context("Failed to hash password")?;
    let user = store.insert_user(&name, &email, password_hash, role)?;
    tracing::Span::current()
        .record("user_id", tracing::field::display(&user.id));
    Ok(user)
}

fn compute_password_hash(
    password: SecretBox<String>,
) -> Result<SecretBox<String>, anyhow::Error> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    let params = Params::new(15000, 2, 1, None)
        .map_err(|e| anyhow::anyhow!("Invalid argon2 params: {e}"))?;
    let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?
        .to_string();
    Ok(SecretBox::new(Box::new(password_hash)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str) -> Register {
        Register {
            name: "Ana".into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[actix_web::test]
    async fn created_users_can_log_in() {
        let store = Store::new();
        let user = create_user(
            register("ana@example.com", "correcto-123"),
            Role::User,
            &store,
        )
        .await
        .unwrap();

        let logged_in = validate_credentials(
            Credentials {
                email: "ana@example.com".into(),
                password: SecretBox::new(Box::new("correcto-123".into())),
            },
            &store,
        )
        .await
        .unwrap();
        assert_eq!(logged_in, user);
    }

    #[actix_web::test]
    async fn wrong_password_and_unknown_email_are_rejected() {
        let store = Store::new();
        create_user(
            register("ana@example.com", "correcto-123"),
            Role::User,
            &store,
        )
        .await
        .unwrap();

        for (email, password) in [
            ("ana@example.com", "incorrecto-1"),
            ("nadie@example.com", "correcto-123"),
        ] {
            let err = validate_credentials(
                Credentials {
                    email: email.into(),
                    password: SecretBox::new(Box::new(password.into())),
                },
                &store,
            )
            .await
            .unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials(_)));
        }
    }

    #[actix_web::test]
    async fn short_passwords_are_refused() {
        let store = Store::new();
        let err = create_user(
            register("ana@example.com", "corta"),
            Role::User,
            &store,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
        assert!(store.users().is_empty());
    }
}
