use crate::{
    constants::{Weight, EARTH_RADIUS_KM},
    network::Station,
    records::Coordinate,
};

/// Rounds `value` to the given number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Great-circle distance in kilometers (haversine), rounded to two decimals.
///
/// Coordinates are not validated. Values outside the usual degree ranges
/// produce a number, never a panic.
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> Weight {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians() / 2.0;
    let d_lon = (b.lon - a.lon).to_radians() / 2.0;

    // Rounding can leave h just outside [0, 1] for antipodal points
    let h = (d_lat.sin().powi(2) + lat1.cos() * lat2.cos() * d_lon.sin().powi(2)).clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    round_to(EARTH_RADIUS_KM * c, 2)
}

/// Euclidean distance in raw coordinate units.
///
/// Only meant to guide A*. Returns 0 if either side has no position, which
/// makes the search behave like its uninformed counterpart for that pair.
pub fn planar_heuristic(a: Option<&Coordinate>, b: Option<&Coordinate>) -> Weight {
    match (a, b) {
        (Some(a), Some(b)) => ((b.lat - a.lat).powi(2) + (b.lon - a.lon).powi(2)).sqrt(),
        _ => 0.0,
    }
}

/// [`planar_heuristic`] between two stations, in the shape A* expects.
pub fn straight_line(src: &Station, dst: &Station) -> Weight {
    planar_heuristic(src.coordinate.as_ref(), dst.coordinate.as_ref())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn haversine_known_distance() {
        // Oxford Circus -> Green Park
        let a = Coordinate::new(51.5152, -0.1419);
        let b = Coordinate::new(51.5067, -0.1428);
        assert_abs_diff_eq!(distance_km(&a, &b), 0.95, epsilon = 1e-9);
        assert_eq!(distance_km(&a, &b), distance_km(&b, &a));
        assert_eq!(distance_km(&a, &a), 0.0);
    }

    #[test]
    fn haversine_is_rounded() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 1.0);
        let d = distance_km(&a, &b);
        assert_abs_diff_eq!(d, 111.19, epsilon = 1e-9);
        assert_eq!(d, round_to(d, 2));
    }

    #[test]
    fn out_of_range_does_not_panic() {
        let a = Coordinate::new(720.0, -1000.0);
        let b = Coordinate::new(-95.0, 400.0);
        assert!(distance_km(&a, &b).is_finite());
    }

    #[test]
    fn antipodal_points_are_finite() {
        let pairs = [
            (Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0)),
            (Coordinate::new(90.0, 0.0), Coordinate::new(-90.0, 0.0)),
            (Coordinate::new(51.5, -0.12), Coordinate::new(-51.5, 179.88)),
            (Coordinate::new(45.0, 10.0), Coordinate::new(-45.0, -170.0)),
        ];
        for (a, b) in pairs {
            let d = distance_km(&a, &b);
            assert!(d.is_finite(), "{:?} -> {:?} gave {}", a, b, d);
            assert_abs_diff_eq!(d, 20015.09, epsilon = 0.01);
        }
    }

    #[test]
    fn heuristic_without_position_is_zero() {
        let a = Coordinate::new(3.0, 4.0);
        let origin = Coordinate::new(0.0, 0.0);
        assert_eq!(planar_heuristic(Some(&a), None), 0.0);
        assert_eq!(planar_heuristic(None, Some(&a)), 0.0);
        assert_eq!(planar_heuristic(None, None), 0.0);
        assert_abs_diff_eq!(planar_heuristic(Some(&a), Some(&origin)), 5.0);
    }
}
