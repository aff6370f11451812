//! Great-circle distance on a spherical Earth.

/// Equatorial radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6378.1;

/// Haversine distance between two `(latitude, longitude)` points in degrees,
/// in kilometres.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());

    let h = hav(lat2 - lat1) + lat1.cos() * lat2.cos() * hav(lon2 - lon1);
    // Rounding can push h a hair above 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.min(1.0).sqrt().asin()
}

fn hav(theta: f64) -> f64 {
    (theta / 2.0).sin().powi(2)
}

pub fn round_to_millis(km: f64) -> f64 {
    (km * 1000.0).round() / 1000.0
}
