//! Common types used across the crate.

pub use http::Method as RequestMethod;
pub use http::StatusCode;
pub use http::Uri;

str_enum! {
    /// The pin a marker is drawn with, as a hex colour.
    #[derive(Clone, Copy, Debug, PartialEq, Hash, Eq)]
    pub enum MarkerIcon {
        Default = "0091ff",
        Highlighted = "FFFF24",
        Selected = "FF5722",
    }
}

impl MarkerIcon {
    /// The pin width and height in pixels.
    pub const SIZE: (u32, u32) = (21, 34);

    /// The pin's anchor point, at the tip of the pin.
    pub const ANCHOR: (u32, u32) = (10, 34);

    /// URL of a pin image in this icon's colour.
    pub fn url(self) -> String {
        format!(
            "https://chart.googleapis.com/chart?chst=d_map_spin&chld=1.15|0|{}|40|_|%E2%80%A2",
            self.as_ref()
        )
    }
}

impl std::default::Default for MarkerIcon {
    fn default() -> Self {
        MarkerIcon::Default
    }
}

impl std::fmt::Display for MarkerIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        AsRef::<str>::as_ref(self).fmt(f)
    }
}

str_enum! {
    /// Who may see a venue photo.
    #[derive(Clone, Copy, Debug, PartialEq, Hash, Eq)]
    pub enum Visibility {
        Public = "public",
        Private = "private",
    }
}
