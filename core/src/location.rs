//! Location descriptor → point on the map.
//!
//! Explicit coordinates win. Otherwise the place name (or modern name), then
//! the province, is looked up in a fixed gazetteer, first exactly and then by
//! substring in either direction. Anything left over lands on the country
//! centroid with a warning so the event is still shown.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::{LatLng, Location, non_empty};

/// Key of the fallback entry.
pub const CENTROID: &str = "Vietnam";

/// Width and height of the SVG canvas the map page draws on.
pub const CANVAS_VIEW_BOX: (f64, f64) = (600.0, 1200.0);

/// A gazetteer entry: a canvas point and real coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Place {
    pub key: &'static str,
    pub x: f64,
    pub y: f64,
    pub geo: LatLng,
}

const fn place(key: &'static str, x: f64, y: f64, lat: f64, lng: f64) -> Place {
    Place {
        key,
        x,
        y,
        geo: LatLng { lat, lng },
    }
}

/// Lookup order matters for substring matches: earlier entries win.
pub const PLACES: &[Place] = &[
    // North
    place("Hà Nội", 150.0, 150.0, 21.0285, 105.8542),
    place("Hanoi", 150.0, 150.0, 21.0285, 105.8542),
    place("Thăng Long", 150.0, 150.0, 21.0285, 105.8542),
    place("Phú Thọ", 140.0, 120.0, 21.40, 105.22),
    place("Phong Châu", 140.0, 120.0, 21.35, 105.30),
    place("Bạch Đằng", 165.0, 170.0, 20.93, 106.78),
    place("Điện Biên Phủ", 120.0, 90.0, 21.3856, 103.0169),
    place("Cao Bằng", 155.0, 60.0, 22.6657, 106.2570),
    // North-central
    place("Thanh Hóa", 145.0, 260.0, 19.8067, 105.7852),
    place("Nghệ An", 140.0, 320.0, 18.6796, 105.6813),
    place("Hà Tĩnh", 145.0, 360.0, 18.3428, 105.9057),
    // Central
    place("Huế", 155.0, 430.0, 16.4637, 107.5909),
    place("Thừa Thiên Huế", 155.0, 430.0, 16.4637, 107.5909),
    place("Đà Nẵng", 160.0, 460.0, 16.0544, 108.2022),
    place("Quảng Nam", 158.0, 490.0, 15.5394, 108.0191),
    place("Hội An", 158.0, 495.0, 15.8801, 108.3380),
    // South-central
    place("Quy Nhơn", 165.0, 580.0, 13.7830, 109.2197),
    place("Nha Trang", 168.0, 630.0, 12.2388, 109.1967),
    place("Đà Lạt", 155.0, 650.0, 11.9404, 108.4583),
    // South
    place("Sài Gòn", 145.0, 740.0, 10.8231, 106.6297),
    place("Saigon", 145.0, 740.0, 10.8231, 106.6297),
    place("Hồ Chí Minh", 145.0, 740.0, 10.8231, 106.6297),
    place("Cần Thơ", 135.0, 770.0, 10.0452, 105.7469),
    place("Cà Mau", 128.0, 785.0, 9.1769, 105.1524),
    // Fallback
    place(CENTROID, 150.0, 400.0, 14.0583, 108.2772),
    place("Việt Nam", 150.0, 400.0, 14.0583, 108.2772),
];

pub fn lookup(key: &str) -> Option<&'static Place> {
    PLACES.iter().find(|p| p.key == key)
}

fn centroid() -> &'static Place {
    // The table always carries the centroid entry.
    lookup(CENTROID).unwrap_or(&PLACES[PLACES.len() - 1])
}

/// Output coordinate system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    /// Points on the 600x1200 SVG canvas.
    #[default]
    Canvas,
    /// Raw latitude/longitude for a tiled map.
    Geographic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlotPoint {
    Canvas { x: f64, y: f64 },
    Geo { lat: f64, lng: f64 },
}

/// How a point was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resolution {
    Coordinates,
    Exact(&'static str),
    Province(&'static str),
    Partial(&'static str),
    Centroid,
}

/// Project lat/lng onto the SVG canvas.
pub fn to_canvas(coords: LatLng) -> (f64, f64) {
    let x = (coords.lng - 102.0) / 8.0 * 200.0 + 250.0;
    let y = (24.0 - coords.lat) / 16.0 * 1000.0 + 100.0;
    (x, y)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocationResolver {
    projection: Projection,
}

impl LocationResolver {
    pub fn new(projection: Projection) -> Self {
        LocationResolver { projection }
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Point for a location. `None` only when there is no descriptor at all.
    pub fn resolve(&self, location: Option<&Location>) -> Option<PlotPoint> {
        self.resolve_detailed(location).map(|(point, _)| point)
    }

    /// Like [`resolve`](Self::resolve), also reporting which rule matched.
    pub fn resolve_detailed(&self, location: Option<&Location>) -> Option<(PlotPoint, Resolution)> {
        let location = location?;

        if let Some(coords) = location.coordinates {
            let point = match self.projection {
                Projection::Canvas => {
                    let (x, y) = to_canvas(coords);
                    PlotPoint::Canvas { x, y }
                }
                Projection::Geographic => PlotPoint::Geo {
                    lat: coords.lat,
                    lng: coords.lng,
                },
            };
            return Some((point, Resolution::Coordinates));
        }

        let name = non_empty(location.name.as_deref())
            .or_else(|| non_empty(location.modern_name.as_deref()));
        let province = non_empty(location.province.as_deref());

        if let Some(place) = name.and_then(lookup) {
            return Some((self.project(place), Resolution::Exact(place.key)));
        }
        if let Some(place) = province.and_then(lookup) {
            return Some((self.project(place), Resolution::Province(place.key)));
        }
        if let Some(name) = name
            && let Some(place) = PLACES
                .iter()
                .find(|p| name.contains(p.key) || p.key.contains(name))
        {
            return Some((self.project(place), Resolution::Partial(place.key)));
        }

        warn!(
            name = name.unwrap_or_default(),
            province = province.unwrap_or_default(),
            "location not in gazetteer, using centroid"
        );
        Some((self.project(centroid()), Resolution::Centroid))
    }

    fn project(&self, place: &Place) -> PlotPoint {
        match self.projection {
            Projection::Canvas => PlotPoint::Canvas {
                x: place.x,
                y: place.y,
            },
            Projection::Geographic => PlotPoint::Geo {
                lat: place.geo.lat,
                lng: place.geo.lng,
            },
        }
    }
}

// ── Zoom ─────────────────────────────────────────────────────────────────

pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 2.5;
pub const ZOOM_STEP: f64 = 0.2;

/// Map zoom level and the SVG view box that goes with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapZoom {
    level: f64,
}

impl Default for MapZoom {
    fn default() -> Self {
        MapZoom { level: 1.0 }
    }
}

impl MapZoom {
    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn zoom_in(&mut self) {
        self.level = (self.level + ZOOM_STEP).min(ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.level = (self.level - ZOOM_STEP).max(ZOOM_MIN);
    }

    pub fn reset(&mut self) {
        self.level = 1.0;
    }

    /// `viewBox` attribute, centered on the canvas.
    pub fn view_box(&self) -> String {
        let (width, height) = CANVAS_VIEW_BOX;
        let w = width / self.level;
        let h = height / self.level;
        let x = (width - w) / 2.0;
        let y = (height - h) / 2.0;
        format!("{x} {y} {w} {h}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(point: Option<PlotPoint>) -> (f64, f64) {
        match point {
            Some(PlotPoint::Canvas { x, y }) => (x, y),
            other => panic!("expected canvas point, got {other:?}"),
        }
    }

    #[test]
    fn test_no_descriptor() {
        let r = LocationResolver::default();
        assert_eq!(r.resolve(None), None);
    }

    #[test]
    fn test_coordinates_projected_to_canvas() {
        let r = LocationResolver::new(Projection::Canvas);
        let loc = Location {
            coordinates: Some(LatLng { lat: 16.0, lng: 106.0 }),
            ..Default::default()
        };
        assert_eq!(canvas(r.resolve(Some(&loc))), (350.0, 600.0));
    }

    #[test]
    fn test_coordinates_pass_through_geographic() {
        let r = LocationResolver::new(Projection::Geographic);
        let loc = Location {
            coordinates: Some(LatLng { lat: 21.0, lng: 105.8 }),
            ..Default::default()
        };
        assert_eq!(
            r.resolve(Some(&loc)),
            Some(PlotPoint::Geo { lat: 21.0, lng: 105.8 })
        );
    }

    #[test]
    fn test_exact_name() {
        let r = LocationResolver::default();
        assert_eq!(canvas(r.resolve(Some(&Location::named("Hà Nội")))), (150.0, 150.0));
    }

    #[test]
    fn test_modern_name_used_when_name_missing() {
        let r = LocationResolver::default();
        let loc = Location {
            modern_name: Some("Đà Nẵng".into()),
            ..Default::default()
        };
        assert_eq!(canvas(r.resolve(Some(&loc))), (160.0, 460.0));
    }

    #[test]
    fn test_province_only_resolves_hue() {
        let r = LocationResolver::default();
        let loc = Location {
            province: Some("Huế".into()),
            ..Default::default()
        };
        let (point, how) = r.resolve_detailed(Some(&loc)).unwrap();
        assert_eq!(point, PlotPoint::Canvas { x: 155.0, y: 430.0 });
        assert_eq!(how, Resolution::Province("Huế"));
    }

    #[test]
    fn test_partial_match_both_directions() {
        let r = LocationResolver::default();
        let (_, how) = r
            .resolve_detailed(Some(&Location::named("Sông Bạch Đằng")))
            .unwrap();
        assert_eq!(how, Resolution::Partial("Bạch Đằng"));
        let (_, how) = r.resolve_detailed(Some(&Location::named("Cà"))).unwrap();
        assert_eq!(how, Resolution::Partial("Cà Mau"));
    }

    #[test]
    fn test_unknown_falls_back_to_centroid() {
        let r = LocationResolver::default();
        let (point, how) = r
            .resolve_detailed(Some(&Location::named("Atlantis")))
            .unwrap();
        assert_eq!(how, Resolution::Centroid);
        assert_eq!(point, PlotPoint::Canvas { x: 150.0, y: 400.0 });

        let empty = Location::default();
        assert_eq!(r.resolve_detailed(Some(&empty)).unwrap().1, Resolution::Centroid);
    }

    #[test]
    fn test_geographic_table_lookup() {
        let r = LocationResolver::new(Projection::Geographic);
        assert_eq!(
            r.resolve(Some(&Location::named("Saigon"))),
            Some(PlotPoint::Geo { lat: 10.8231, lng: 106.6297 })
        );
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut zoom = MapZoom::default();
        assert_eq!(zoom.view_box(), "0 0 600 1200");
        for _ in 0..20 {
            zoom.zoom_in();
        }
        assert_eq!(zoom.level(), ZOOM_MAX);
        for _ in 0..20 {
            zoom.zoom_out();
        }
        assert_eq!(zoom.level(), ZOOM_MIN);
        zoom.reset();
        assert_eq!(zoom.level(), 1.0);
    }
}
