use rand::Rng;

use crate::pipeline::reference::{Coordinates, DEFAULT_REGION, REGION_COORDINATES};

/// Spread applied around a known region centre
const KNOWN_REGION_JITTER: f64 = 0.1;
/// Wider spread around the default region when the region is unknown
const FALLBACK_JITTER: f64 = 0.5;

/// Approximate coordinates for a cooperative from its region name.
///
/// Known regions resolve to the table centre with a small offset so that
/// cooperatives in one region do not stack on a single point. Unknown regions
/// fall back to the default region with a wider offset.
pub fn resolve_coordinates<R: Rng + ?Sized>(region: &str, rng: &mut R) -> Coordinates {
    let key = region.to_uppercase();
    let key = key.trim();

    let (centre, jitter) = match REGION_COORDINATES.get(key) {
        Some(centre) => (*centre, KNOWN_REGION_JITTER),
        None => (default_centre(), FALLBACK_JITTER),
    };

    Coordinates {
        lat: centre.lat + rng.gen_range(-jitter..=jitter),
        lon: centre.lon + rng.gen_range(-jitter..=jitter),
    }
}

fn default_centre() -> Coordinates {
    REGION_COORDINATES
        .get(DEFAULT_REGION)
        .copied()
        .unwrap_or(Coordinates::new(5.3600, -4.0083))
}
