//! Settings for a `ViewModel`.

use std::io::Read;

use serde::Deserialize;

str_enum! {
    /// How the configured place names are geocoded at startup.
    #[derive(Clone, Copy, Debug, PartialEq, Hash, Eq, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum GeocodeMode {
        /// One request at a time, in input order.
        Sequential = "sequential",
        /// Every request at once, joined before any place is created.
        Concurrent = "concurrent",
    }
}

impl std::default::Default for GeocodeMode {
    fn default() -> Self {
        GeocodeMode::Concurrent
    }
}

/// Which city to show and which places to put on it.
///
/// Every field has a default, so a configuration file only needs to name what
/// it changes:
///
/// ```rust
/// let config = date_spots::Config::from_json(r#"{
///     "place_names": ["Stow Lake", "Crissy Field"],
///     "geocode_mode": "sequential"
/// }"#).unwrap();
///
/// assert_eq!(config.place_names.len(), 2);
/// assert_eq!(config.city_center, "Twin Peaks");
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Geocoded first to centre the map.
    pub city_center: String,
    /// Appended to every geocoding query, e.g. `Saison, San Francisco, CA`.
    pub city_qualifier: String,
    /// The area venue searches are restricted to.
    pub metro_area: String,
    /// Places to show, in navigation order.
    pub place_names: Vec<String>,
    pub geocode_mode: GeocodeMode,
    /// Initial map zoom around the city centre.
    pub zoom: u8,
    /// How far from a place to look for a panorama, in metres.
    pub panorama_radius: f64,
    /// Camera pitch of the street view, in degrees.
    pub panorama_pitch: f64,
    /// At most this many public photos are kept per venue.
    pub max_photos: usize,
    /// Size token placed between a photo's prefix and suffix.
    pub photo_size: String,
}

impl Config {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn from_reader<R: Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }
}

impl Default for Config {
    fn default() -> Self {
        const PLACES: &[&str] = &[
            "Choux Bakery",
            "Top of the Mark",
            "Nob Hill Spa",
            "Telegraph Hill, Filbert Stairs",
            "B. Patisserie",
            "Mason Pacific",
            "Shakespeare Garden",
            "Golden Gate Bridge",
        ];

        Config {
            city_center: "Twin Peaks".to_owned(),
            city_qualifier: "San Francisco, CA".to_owned(),
            metro_area: "San Francisco, CA".to_owned(),
            place_names: PLACES.iter().map(|&s| s.to_owned()).collect(),
            geocode_mode: GeocodeMode::default(),
            zoom: 13,
            panorama_radius: 50.0,
            panorama_pitch: 30.0,
            max_photos: 5,
            photo_size: "300x300".to_owned(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn partial_document() {
        let config = Config::from_reader(
            &br#"{"max_photos": 3, "geocode_mode": "sequential", "zoom": 12}"#[..],
        )
        .unwrap();
        assert_eq!(config.max_photos, 3);
        assert_eq!(config.zoom, 12);
        assert_eq!(config.geocode_mode, GeocodeMode::Sequential);
        assert_eq!(config.photo_size, "300x300");
        assert_eq!(config.place_names[1], "Top of the Mark");
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Config::from_json(r#"{"geocode_mode": "parallel"}"#).is_err());
    }
}
