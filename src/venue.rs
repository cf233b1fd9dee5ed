//! Display-ready venue records.

use crate::adapter::RawVenue;
use crate::types::Visibility;
use crate::util::Joined;

/// Shown in place of any field the venue record does not have.
pub const UNKNOWN: &str = "unknown";

/// How photo links are built from a venue record.
#[derive(Clone, Debug, PartialEq)]
pub struct PhotoOptions {
    /// At most this many photos are kept.
    pub max: usize,
    /// Size token placed between each photo's prefix and suffix, e.g. `300x300`.
    pub size: String,
}

/// A venue normalized for display.
///
/// Every text field is filled in, with [`UNKNOWN`] standing in for missing data.
/// Only the photo cursor changes after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Venue {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub rating: String,
    pub rating_color: String,
    pub url: String,
    photos: PhotoCursor,
}

/// An ordered list of photo links and a position within it.
///
/// The position is `None` exactly when there are no photos. Moving past either
/// end is a no-op rather than a wraparound.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhotoCursor {
    links: Vec<String>,
    index: Option<usize>,
}

impl Default for PhotoOptions {
    fn default() -> Self {
        PhotoOptions {
            max: 5,
            size: "300x300".to_owned(),
        }
    }
}

impl Venue {
    pub fn new(raw: RawVenue, options: &PhotoOptions) -> Self {
        let links = raw
            .photos
            .groups
            .iter()
            .flat_map(|group| &group.items)
            .filter(|photo| photo.visibility == Visibility::Public.as_ref())
            .take(options.max)
            .map(|photo| format!("{}{}{}", photo.prefix, options.size, photo.suffix))
            .collect::<Vec<_>>();
        tracing::debug!(
            venue = ?raw.name,
            photos = raw.photos.count,
            kept = links.len(),
            "normalized venue"
        );

        let address = if raw.location.formatted_address.is_empty() {
            UNKNOWN.to_owned()
        } else {
            Joined {
                items: &raw.location.formatted_address,
                sep: ", ",
            }
            .to_string()
        };

        Venue {
            name: or_unknown(raw.name),
            phone: or_unknown(raw.contact.formatted_phone),
            address,
            rating: or_unknown(raw.rating.map(|r| r.to_string())),
            rating_color: or_unknown(raw.rating_color),
            url: or_unknown(raw.url),
            photos: PhotoCursor::new(links),
        }
    }

    pub fn photos(&self) -> &PhotoCursor {
        &self.photos
    }

    pub fn photos_mut(&mut self) -> &mut PhotoCursor {
        &mut self.photos
    }
}

fn or_unknown(field: Option<String>) -> String {
    field
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_owned())
}

impl PhotoCursor {
    /// Starts at the first link, if any.
    pub fn new(links: Vec<String>) -> Self {
        let index = if links.is_empty() { None } else { Some(0) };
        PhotoCursor { links, index }
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The link under the cursor.
    pub fn current(&self) -> Option<&str> {
        self.index.map(|i| &*self.links[i])
    }

    pub fn has_next(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 < self.links.len())
    }

    pub fn has_previous(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    /// Advances the cursor unless it is on the last photo.
    ///
    /// Returns `true` if the cursor moved.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.index = self.index.map(|i| i + 1);
        true
    }

    /// Moves the cursor back unless it is on the first photo.
    ///
    /// Returns `true` if the cursor moved.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.index = self.index.map(|i| i - 1);
        true
    }

    /// Returns the cursor to the first photo.
    ///
    /// Returns `true` if the cursor moved.
    pub fn rewind(&mut self) -> bool {
        match self.index {
            Some(i) if i > 0 => {
                self.index = Some(0);
                true
            }
            _ => false,
        }
    }
}
