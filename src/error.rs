//! Error types

use std::error;
use std::fmt::{self, Display, Formatter};
use std::io;

use crate::geo::LatLng;
use crate::types::StatusCode;

/// A type-erased error carried as the cause of a `Failure`.
pub type BoxError = Box<dyn error::Error + Send + Sync>;

/// An error occurred while talking to one of the web APIs.
#[derive(Debug)]
pub enum Error<E> {
    /// An error occured while decoding a gzip response body.
    Gzip(io::Error),
    /// An HTTP error from the API.
    Http(StatusCode),
    /// The response body was not the expected JSON document.
    Json(serde_json::Error),
    /// The request could not be built.
    Request(http::Error),
    /// An error from the underlying HTTP client.
    Service(E),
    /// The API answered, but with a status other than `OK`.
    Status(String),
}

/// A recoverable, per-place failure reported to the user.
///
/// None of these abort the processing of other places.
#[derive(Debug)]
pub enum Failure {
    /// No position could be found for a place name.
    Geocode { name: String, source: BoxError },
    /// No street-level imagery exists within the search radius.
    PanoramaUnavailable { position: LatLng, source: BoxError },
    /// The venue search returned no candidates.
    NoVenueFound { name: String },
    /// The venue search or the detail fetch failed.
    VenueResolution { name: String, source: BoxError },
}

impl<E: error::Error + 'static> error::Error for Error<E> {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        use Error::*;

        match *self {
            Gzip(ref e) => Some(e),
            Http(_) | Status(_) => None,
            Json(ref e) => Some(e),
            Request(ref e) => Some(e),
            Service(ref e) => Some(e),
        }
    }
}

impl<E: Display> Display for Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use Error::*;

        match *self {
            Gzip(ref e) => Display::fmt(e, f),
            Http(ref code) => Display::fmt(code, f),
            Json(ref e) => Display::fmt(e, f),
            Request(ref e) => Display::fmt(e, f),
            Service(ref e) => Display::fmt(e, f),
            Status(ref status) => write!(f, "API returned status {}", status),
        }
    }
}

impl Failure {
    /// The place name or position the failure is about.
    pub fn subject(&self) -> String {
        use Failure::*;

        match *self {
            Geocode { ref name, .. }
            | NoVenueFound { ref name }
            | VenueResolution { ref name, .. } => name.clone(),
            PanoramaUnavailable { position, .. } => position.to_string(),
        }
    }
}

impl error::Error for Failure {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        use Failure::*;

        match *self {
            Geocode { ref source, .. }
            | PanoramaUnavailable { ref source, .. }
            | VenueResolution { ref source, .. } => Some(&**source),
            NoVenueFound { .. } => None,
        }
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use Failure::*;

        match *self {
            Geocode { ref name, .. } => write!(f, "failed to geocode {}", name),
            PanoramaUnavailable { position, .. } => {
                write!(f, "no street view available near {}", position)
            }
            NoVenueFound { ref name } => write!(f, "no venue found for {}", name),
            VenueResolution {
                ref name,
                ref source,
            } => write!(f, "failed to resolve venue for {}: {}", name, source),
        }
    }
}
