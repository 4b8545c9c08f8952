//! Parameters for network construction and search

use crate::constants::{
    Weight, FALLBACK_SEGMENT_WEIGHT, HOP_HEURISTIC_SCALE, LINE_GROUP_SEPARATOR,
};

/// Parameters for building a network from records
#[derive(Debug, Clone, PartialEq)]
pub struct BuildParams {
    // Weight of a segment if an endpoint has no coordinate
    pub(crate) fallback_weight: Weight,
    // Line names are cut at this separator to find their group
    pub(crate) line_group_separator: Option<String>,
    // Re-sort line members by the station list of their line record
    pub(crate) use_line_station_order: bool,
}

impl BuildParams {
    pub fn new() -> Self {
        Default::default()
    }

    /// **Panics** if `weight` is negative or not finite
    pub fn fallback_weight(mut self, weight: Weight) -> Self {
        assert!(
            weight.is_finite() && weight >= 0.0,
            "Fallback weight must be finite and non-negative, got {}",
            weight
        );
        self.fallback_weight = weight;
        self
    }

    /// Off by default: a line's running order is the station input order.
    /// When set, members are stably sorted by their position in the station
    /// list of the line record, unlisted members go last.
    pub fn use_line_station_order(mut self, enabled: bool) -> Self {
        self.use_line_station_order = enabled;
        self
    }

    /// `None` puts every line into a group of its own.
    pub fn line_group_separator(mut self, separator: Option<&str>) -> Self {
        self.line_group_separator = separator.map(str::to_string);
        self
    }

    /// Group name of `line_name`: the part in front of the separator.
    pub(crate) fn group_of<'a>(&self, line_name: &'a str) -> &'a str {
        match &self.line_group_separator {
            Some(sep) if !sep.is_empty() => line_name
                .split_once(sep.as_str())
                .map(|(group, _)| group)
                .unwrap_or(line_name),
            _ => line_name,
        }
    }
}

impl Default for BuildParams {
    fn default() -> Self {
        BuildParams {
            fallback_weight: FALLBACK_SEGMENT_WEIGHT,
            line_group_separator: Some(LINE_GROUP_SEPARATOR.to_string()),
            use_line_station_order: false,
        }
    }
}

/// Parameters for the searches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    // Multiplier turning the planar heuristic into hop units
    pub(crate) hop_heuristic_scale: f64,
}

impl SearchParams {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn hop_heuristic_scale(mut self, scale: f64) -> Self {
        self.hop_heuristic_scale = scale;
        self
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            hop_heuristic_scale: HOP_HEURISTIC_SCALE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_groups() {
        let params = BuildParams::default();
        assert_eq!(params.group_of("Northern - Bank Branch"), "Northern");
        assert_eq!(params.group_of("Victoria"), "Victoria");

        let params = BuildParams::new().line_group_separator(None);
        assert_eq!(params.group_of("Northern - Bank Branch"), "Northern - Bank Branch");

        let params = BuildParams::new().line_group_separator(Some("/"));
        assert_eq!(params.group_of("Circle/Hammersmith"), "Circle");
    }

    #[test]
    fn fallback_weight() {
        assert_eq!(BuildParams::default().fallback_weight, 1.0);
        assert_eq!(BuildParams::new().fallback_weight(0.0).fallback_weight, 0.0);
        assert!(!BuildParams::default().use_line_station_order);
    }

    #[test]
    #[should_panic(expected = "Fallback weight must be finite and non-negative")]
    fn negative_fallback_weight() {
        let _ = BuildParams::new().fallback_weight(-1.0);
    }

    #[test]
    #[should_panic(expected = "Fallback weight must be finite and non-negative")]
    fn nan_fallback_weight() {
        let _ = BuildParams::new().fallback_weight(f64::NAN);
    }
}
