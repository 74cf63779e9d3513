//! Marker and command model behind the map widgets. The ui turns these into
//! Leaflet calls; nothing here touches the browser.

use payloads::{Attraction, AttractionCategory, AttractionId, Coordinates};

pub const DEFAULT_FLY_ZOOM: u8 = 16;
const COORDINATE_DECIMALS: f64 = 1_000_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub id: AttractionId,
    pub title: String,
    pub category: AttractionCategory,
    pub position: Coordinates,
}

impl MapMarker {
    /// Popup content. Leaflet renders popup strings as HTML, so the title is
    /// escaped.
    pub fn popup_html(&self) -> String {
        let mut html = String::with_capacity(self.title.len());
        for c in self.title.chars() {
            match c {
                '&' => html.push_str("&amp;"),
                '<' => html.push_str("&lt;"),
                '>' => html.push_str("&gt;"),
                '"' => html.push_str("&quot;"),
                '\'' => html.push_str("&#39;"),
                c => html.push(c),
            }
        }
        html
    }
}

/// Imperative requests a parent sends to a mounted map.
#[derive(Debug, Clone, PartialEq)]
pub enum MapCommand {
    FlyTo { position: Coordinates, zoom: u8 },
    OpenPopup(AttractionId),
}

impl MapCommand {
    /// Fly to a marker and open its popup, the usual response to clicking a
    /// card next to the map.
    pub fn focus(marker: &MapMarker) -> [MapCommand; 2] {
        [
            MapCommand::FlyTo {
                position: marker.position,
                zoom: DEFAULT_FLY_ZOOM,
            },
            MapCommand::OpenPopup(marker.id),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

pub fn markers_for(attractions: &[Attraction]) -> Vec<MapMarker> {
    attractions
        .iter()
        .filter_map(|attraction| {
            Some(MapMarker {
                id: attraction.id,
                title: attraction.title.clone(),
                category: attraction.category,
                position: attraction.position?,
            })
        })
        .collect()
}

/// Smallest box containing every marker.
pub fn bounds(markers: &[MapMarker]) -> Option<Bounds> {
    let first = markers.first()?.position;
    let mut bounds = Bounds {
        south_west: first,
        north_east: first,
    };
    for marker in &markers[1..] {
        let p = marker.position;
        bounds.south_west.lat = bounds.south_west.lat.min(p.lat);
        bounds.south_west.lng = bounds.south_west.lng.min(p.lng);
        bounds.north_east.lat = bounds.north_east.lat.max(p.lat);
        bounds.north_east.lng = bounds.north_east.lng.max(p.lng);
    }
    Some(bounds)
}

/// Normalize a map click into stored coordinates: latitude clamped to the
/// valid range, longitude wrapped into [-180, 180), both rounded to six
/// decimals.
pub fn pick_position(lat: f64, lng: f64) -> Coordinates {
    let lat = lat.clamp(-90.0, 90.0);
    let lng = (lng + 180.0).rem_euclid(360.0) - 180.0;
    Coordinates {
        lat: round(lat),
        lng: round(lng),
    }
}

fn round(value: f64) -> f64 {
    (value * COORDINATE_DECIMALS).round() / COORDINATE_DECIMALS
}
