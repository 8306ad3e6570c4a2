//! The API's filtered queries, evaluated locally over a loaded collection.

use crate::api::DEFAULT_NEAR_DISTANCE_M;
use crate::model::{Event, LatLng};

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Events whose year lies in `start..=end`, ordered by year. Undated events
/// never match.
pub fn in_year_range(events: &[Event], start: i32, end: i32) -> Vec<&Event> {
    let mut found: Vec<&Event> = events
        .iter()
        .filter(|e| {
            e.date
                .as_ref()
                .and_then(|d| d.year)
                .is_some_and(|y| (start..=end).contains(&y))
        })
        .collect();
    found.sort_by_key(|e| e.sort_year());
    found
}

/// Great-circle distance in metres.
pub fn haversine_m(a: LatLng, b: LatLng) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Events with explicit coordinates within `distance_m` of `center`, nearest
/// first. `None` uses the API's default radius.
pub fn near(events: &[Event], center: LatLng, distance_m: Option<f64>) -> Vec<(&Event, f64)> {
    let limit = distance_m.unwrap_or(f64::from(DEFAULT_NEAR_DISTANCE_M));
    let mut found: Vec<(&Event, f64)> = events
        .iter()
        .filter_map(|e| {
            let d = haversine_m(center, e.coordinates()?);
            (d <= limit).then_some((e, d))
        })
        .collect();
    found.sort_by(|a, b| a.1.total_cmp(&b.1));
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EventDate, Location};

    fn dated(id: &str, year: Option<i32>) -> Event {
        Event {
            id: Some(id.into()),
            date: year.map(EventDate::year),
            ..Default::default()
        }
    }

    fn placed(id: &str, lat: f64, lng: f64) -> Event {
        Event {
            id: Some(id.into()),
            location: Some(Location {
                coordinates: Some(LatLng { lat, lng }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_year_range_inclusive_and_sorted() {
        let events = vec![
            dated("c", Some(1010)),
            dated("a", Some(-111)),
            dated("x", None),
            dated("b", Some(938)),
            dated("late", Some(1500)),
        ];
        let ids: Vec<_> = in_year_range(&events, -111, 1010)
            .iter()
            .map(|e| e.id())
            .collect();
        assert_eq!(ids, [Some("a"), Some("b"), Some("c")]);
    }

    #[test]
    fn test_haversine_hanoi_to_hue() {
        let hanoi = LatLng { lat: 21.0285, lng: 105.8542 };
        let hue = LatLng { lat: 16.4637, lng: 107.5909 };
        let d = haversine_m(hanoi, hue);
        assert!((d - 540_000.0).abs() < 15_000.0, "got {d}");
        assert_eq!(haversine_m(hanoi, hanoi), 0.0);
    }

    #[test]
    fn test_near_default_radius_and_order() {
        let events = vec![
            placed("hue", 16.4637, 107.5909),
            placed("phu-tho", 21.40, 105.22),
            placed("thang-long", 21.03, 105.85),
            dated("nowhere", Some(1)),
        ];
        let center = LatLng { lat: 21.0285, lng: 105.8542 };
        let found = near(&events, center, None);
        let ids: Vec<_> = found.iter().map(|(e, _)| e.id()).collect();
        assert_eq!(ids, [Some("thang-long"), Some("phu-tho")]);
        assert_eq!(near(&events, center, Some(1_000_000.0)).len(), 3);
    }
}
