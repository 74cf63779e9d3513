//! Development dataset built through the public API.
//!
//! The mock api already seeds the two locations. This adds accounts, extra
//! content and reviews in every moderation state, so the admin screens have
//! something to show:
//! - a superadmin, an admin and two visitors
//! - approved, pending and rejected reviews for both locations
//! - a priced activity and a positioned attraction per location

use anyhow::Result;
use payloads::{
    APIClient, AttractionCategory, Coordinates, Location, ModerationStatus,
    User,
    requests::{ActivityInput, AttractionInput, ModeratePost},
};
use rust_decimal::Decimal;

use crate::{
    ADMIN_EMAIL, PASSWORD, SUPERADMIN_EMAIL, SUPERADMIN_PASSWORD, TestApp,
    review,
};

pub struct DevDataset {
    pub locations: Vec<Location>,
    pub visitors: Vec<User>,
    pub pending_reviews: usize,
}

impl DevDataset {
    pub async fn create(app: &TestApp) -> Result<Self> {
        tracing::info!("👤 Creating admin and visitor accounts");
        let admin = app.create_admin().await?;
        let (ana, ana_user) =
            app.create_visitor("Ana López", "ana@example.com").await?;
        let (luis, luis_user) =
            app.create_visitor("Luis Pérez", "luis@example.com").await?;

        let locations = app.client.list_locations().await?;
        let mut pending_reviews = 0;
        for location in &locations {
            create_location_extras(&admin, location).await?;

            tracing::info!("💬 Writing reviews for {}", location.name);
            let approved = ana
                .create_post(&review(
                    location.id,
                    &format!("Un fin de semana increíble en {}", location.name),
                ))
                .await?;
            moderate(&admin, &approved, ModerationStatus::Approved).await?;

            let rejected = luis
                .create_post(&review(location.id, "Publicidad no deseada"))
                .await?;
            moderate(&admin, &rejected, ModerationStatus::Rejected).await?;

            luis.create_post(&review(
                location.id,
                "Buena comida, aunque el camino está en obras",
            ))
            .await?;
            pending_reviews += 1;
        }

        tracing::info!("✅ Development dataset created");
        Ok(DevDataset {
            locations,
            visitors: vec![ana_user, luis_user],
            pending_reviews,
        })
    }

    pub fn print_summary(&self) {
        tracing::info!("📋 Available test data:");
        for location in &self.locations {
            tracing::info!("   📍 {} (/{})", location.name, location.slug);
        }
        tracing::info!(
            "   🔑 Superadmin: {SUPERADMIN_EMAIL} / {SUPERADMIN_PASSWORD}"
        );
        tracing::info!("   🔑 Admin: {ADMIN_EMAIL} / {PASSWORD}");
        for visitor in &self.visitors {
            tracing::info!("   👤 Visitor: {} / {PASSWORD}", visitor.email);
        }
        tracing::info!(
            "   📝 {} reviews waiting for moderation",
            self.pending_reviews
        );
    }
}

async fn create_location_extras(
    admin: &APIClient,
    location: &Location,
) -> Result<()> {
    admin
        .create_activity(&ActivityInput {
            location_id: Some(location.id),
            title: format!("Tour gastronómico en {}", location.name),
            description: "Degustación en cinco cocinas locales.".into(),
            price: Some(Decimal::new(45000, 2)),
            duration: Some("4 horas".into()),
            image_urls: vec![],
        })
        .await?;
    admin
        .create_attraction(&AttractionInput {
            location_id: Some(location.id),
            category: AttractionCategory::Attraction,
            title: format!("Plaza principal de {}", location.name),
            description: "Kiosco, portales y nevería.".into(),
            image_urls: vec![],
            position: Some(Coordinates {
                lat: location.center.lat - 0.001,
                lng: location.center.lng + 0.001,
            }),
        })
        .await?;
    Ok(())
}

async fn moderate(
    admin: &APIClient,
    post: &payloads::ForumPost,
    status: ModerationStatus,
) -> Result<()> {
    admin.moderate_post(&post.id, &ModeratePost { status }).await?;
    Ok(())
}
