//! Starting content for the mock api.

use jiff::{Timestamp, ToSpan};
use payloads::{
    AccentColor, Activity, Attraction, AttractionCategory, Coordinates,
    DetailPage, ForumPost, GalleryImage, HeroImage, Location, LocationId,
    ModerationStatus, PostId, UserId,
    requests::{
        ActivityInput, AttractionInput, DetailPageInput, GalleryImageInput,
    },
};
use rust_decimal::dec;
use uuid::Uuid;

use super::{Record, Store};

/// The two promoted municipalities. Every deployment has exactly these; the
/// api only lets admins edit them.
pub fn locations(store: &Store) {
    store.insert_location(Location {
        id: LocationId(Uuid::new_v4()),
        name: "Puerto Sol".into(),
        slug: "puerto-sol".into(),
        accent: AccentColor::Orange,
        hero: HeroImage {
            url: "/static/img/puerto-sol/hero.jpg".into(),
            alt: "Bahía de Puerto Sol al atardecer".into(),
        },
        center: Coordinates {
            lat: 20.653407,
            lng: -105.225332,
        },
        zoom: 14,
        tagline: "Playas, malecón y puestas de sol".into(),
        description: "Pueblo costero con playas tranquilas y mariscos frescos."
            .into(),
    });
    store.insert_location(Location {
        id: LocationId(Uuid::new_v4()),
        name: "Valle Verde".into(),
        slug: "valle-verde".into(),
        accent: AccentColor::Green,
        hero: HeroImage {
            url: "/static/img/valle-verde/hero.jpg".into(),
            alt: "Cascada entre montañas".into(),
        },
        center: Coordinates {
            lat: 20.524145,
            lng: -104.793481,
        },
        zoom: 13,
        tagline: "Montaña, cascadas y café de altura".into(),
        description: "Valle serrano rodeado de bosque y senderos.".into(),
    });
}

/// Sample attractions, activities, galleries, pages and approved reviews
/// for the dev server.
pub fn demo_content(store: &Store) {
    for location in store.locations() {
        let id = Some(location.id);
        let Coordinates { lat, lng } = location.center;
        let slug = location.slug.as_str();

        let places = [
            (AttractionCategory::Attraction, "Mirador", 0.004, 0.002),
            (AttractionCategory::Hotel, "Hotel Central", -0.002, 0.001),
            (AttractionCategory::Restaurant, "Fonda La Abuela", 0.001, -0.003),
        ];
        for (category, title, dlat, dlng) in places {
            insert::<Attraction>(
                store,
                AttractionInput {
                    location_id: id,
                    category,
                    title: format!("{title} {}", location.name),
                    description: format!(
                        "{} en {}",
                        category.label(),
                        location.name
                    ),
                    image_urls: vec![format!(
                        "/static/img/{slug}/{}.jpg",
                        category.label().to_lowercase()
                    )],
                    position: Some(Coordinates {
                        lat: lat + dlat,
                        lng: lng + dlng,
                    }),
                },
            );
        }

        insert::<Activity>(
            store,
            ActivityInput {
                location_id: id,
                title: format!("Recorrido guiado por {}", location.name),
                description: "Caminata por los puntos principales.".into(),
                price: Some(dec!(250.00)),
                duration: Some("3 horas".into()),
                image_urls: vec![],
            },
        );

        for i in 1..=6 {
            insert::<GalleryImage>(
                store,
                GalleryImageInput {
                    location_id: id,
                    url: format!("/static/img/{slug}/galeria-{i}.jpg"),
                    caption: format!("{} {i}", location.name),
                },
            );
        }

        insert::<DetailPage>(
            store,
            DetailPageInput {
                location_id: id,
                slug: "historia".into(),
                title: format!("Historia de {}", location.name),
                html: "<p>Fundado a mediados del siglo XIX.</p>".into(),
                hero_image: None,
            },
        );

        let start: Timestamp =
            "2025-03-01T15:00:00Z".parse().unwrap_or_default();
        let bodies = ["Muy recomendable", "Volveremos pronto"];
        for (i, body) in bodies.iter().enumerate() {
            store.insert_post(ForumPost {
                id: PostId(Uuid::new_v4()),
                author: format!("Visitante {}", i + 1),
                rating: 5 - i as u8,
                body: format!("{body}. {}", location.name),
                image_urls: vec![],
                status: ModerationStatus::Approved,
                user_id: UserId(Uuid::new_v4()),
                location_id: location.id,
                created_at: start + (24 * i as i64).hours(),
            });
        }
    }
}

fn insert<R: Record>(store: &Store, input: R::Input) {
    if let Err(e) = store.create::<R>(input) {
        tracing::warn!("failed to seed record: {e}");
    }
}
