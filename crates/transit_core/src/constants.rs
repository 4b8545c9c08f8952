/// Edge weight type (kilometers for distance queries)
pub type Weight = f64;

/// Mean earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Weight of a segment whose endpoints are not both geolocated
pub const FALLBACK_SEGMENT_WEIGHT: Weight = 1.0;

/// Factor applied to the planar heuristic before it is combined with hop counts
pub const HOP_HEURISTIC_SCALE: f64 = 100.0;

/// Separates a line's group name from its branch, e.g. `"Northern - Bank Branch"`
pub const LINE_GROUP_SEPARATOR: &str = " - ";
