//! Geocoding and Street View through the Google Maps Platform web services.

use std::error;
use std::marker::PhantomData;

use futures_util::future::LocalBoxFuture;
use http::{Request, Response};
use http_body::Body;
use serde::Deserialize;
use tower_service::Service;

use crate::adapter::{Geocoded, Geocoder, Panorama, PanoramaService};
use crate::error::{Error, Failure};
use crate::geo::LatLng;
use crate::util::{get_json, Query};

const GEOCODE_URI: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const STREET_VIEW_METADATA_URI: &str = "https://maps.googleapis.com/maps/api/streetview/metadata";

/// The only status the Google web services report success with.
const OK: &str = "OK";
/// Reported for an `OK` answer that carries no result.
const ZERO_RESULTS: &str = "ZERO_RESULTS";

/// A client for the Geocoding and Street View metadata APIs.
///
/// `S` is an HTTP client sending requests with bodies of type `B`, like
/// `hyper::Client<_, hyper::Body>`; see [`crate::hyper::google`] for a ready-made one.
#[derive(Debug)]
pub struct GoogleMaps<S, B> {
    client: S,
    key: String,
    city_qualifier: String,
    marker: PhantomData<fn() -> B>,
}

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct MetadataResponse {
    status: String,
    pano_id: Option<String>,
    location: Option<LatLng>,
}

impl<S: Clone, B> Clone for GoogleMaps<S, B> {
    fn clone(&self) -> Self {
        GoogleMaps {
            client: self.client.clone(),
            key: self.key.clone(),
            city_qualifier: self.city_qualifier.clone(),
            marker: PhantomData,
        }
    }
}

impl<S, B> GoogleMaps<S, B> {
    /// Creates a client authenticating with `key` that geocodes names
    /// within `city_qualifier`, e.g. `"San Francisco, CA"`.
    pub fn new(client: S, key: impl Into<String>, city_qualifier: impl Into<String>) -> Self {
        GoogleMaps {
            client,
            key: key.into(),
            city_qualifier: city_qualifier.into(),
            marker: PhantomData,
        }
    }

    pub fn client(&self) -> &S {
        &self.client
    }
}

impl<S, B, R> GoogleMaps<S, B>
where
    S: Service<Request<B>, Response = Response<R>> + Clone,
    B: Default,
    R: Body<Error = S::Error>,
{
    async fn lookup(&self, name: &str) -> Result<LatLng, Error<S::Error>> {
        let address = format!("{}, {}", name, self.city_qualifier);
        tracing::debug!(%address, "geocoding");

        let uri = Query::new()
            .pair("address", &address)
            .pair("key", &self.key)
            .to_uri(GEOCODE_URI);
        let res: GeocodeResponse = get_json(&self.client, uri).await?;
        if res.status != OK {
            return Err(Error::Status(res.status));
        }

        res.results
            .into_iter()
            .next()
            .map(|r| r.geometry.location)
            .ok_or_else(|| Error::Status(ZERO_RESULTS.to_owned()))
    }

    async fn metadata(&self, position: LatLng, radius: f64) -> Result<Panorama, Error<S::Error>> {
        tracing::debug!(%position, radius, "looking up street view metadata");

        let uri = Query::new()
            .pair("location", position)
            .pair("radius", radius)
            .pair("key", &self.key)
            .to_uri(STREET_VIEW_METADATA_URI);
        let res: MetadataResponse = get_json(&self.client, uri).await?;
        if res.status != OK {
            return Err(Error::Status(res.status));
        }

        let location = res.location.ok_or(Error::Status(res.status))?;
        Ok(Panorama {
            id: res.pano_id,
            location,
        })
    }
}

impl<S, B, R> Geocoder for GoogleMaps<S, B>
where
    S: Service<Request<B>, Response = Response<R>> + Clone,
    S::Error: error::Error + Send + Sync + 'static,
    B: Default + 'static,
    R: Body<Error = S::Error> + 'static,
{
    fn geocode<'a>(&'a self, name: &'a str) -> LocalBoxFuture<'a, Result<Geocoded, Failure>> {
        Box::pin(async move {
            match self.lookup(name).await {
                Ok(position) => Ok(Geocoded {
                    name: name.to_owned(),
                    position,
                }),
                Err(e) => Err(Failure::Geocode {
                    name: name.to_owned(),
                    source: Box::new(e),
                }),
            }
        })
    }
}

impl<S, B, R> PanoramaService for GoogleMaps<S, B>
where
    S: Service<Request<B>, Response = Response<R>> + Clone,
    S::Error: error::Error + Send + Sync + 'static,
    B: Default + 'static,
    R: Body<Error = S::Error> + 'static,
{
    fn panorama_near(
        &self,
        position: LatLng,
        radius: f64,
    ) -> LocalBoxFuture<'_, Result<Panorama, Failure>> {
        Box::pin(async move {
            self.metadata(position, radius)
                .await
                .map_err(|e| Failure::PanoramaUnavailable {
                    position,
                    source: Box::new(e),
                })
        })
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::executor::block_on;
    use futures::future;
    use hyper_pkg::Body;
    use tower::service_fn;

    use super::*;

    type Log = Rc<RefCell<Vec<String>>>;

    /// An HTTP client answering every request with `json`, recording request URIs.
    fn canned(
        json: &'static str,
    ) -> (
        impl Service<Request<Body>, Response = Response<Body>, Error = hyper_pkg::Error> + Clone,
        Log,
    ) {
        let log = Log::default();
        let seen = log.clone();
        let client = service_fn(move |req: Request<Body>| {
            seen.borrow_mut().push(req.uri().to_string());
            future::ready(Ok::<_, hyper_pkg::Error>(Response::new(Body::from(json))))
        });
        (client, log)
    }

    #[test]
    fn geocode_takes_first_result() {
        let (client, log) = canned(
            r#"{
                "status": "OK",
                "results": [
                    {"geometry": {"location": {"lat": 37.7922, "lng": -122.4106}}},
                    {"geometry": {"location": {"lat": 0.0, "lng": 0.0}}}
                ]
            }"#,
        );
        let maps: GoogleMaps<_, Body> = GoogleMaps::new(client, "k3y", "San Francisco, CA");

        let hit = block_on(maps.geocode("Mason Pacific")).unwrap();
        assert_eq!(hit.name, "Mason Pacific");
        assert_eq!(hit.position, LatLng::new(37.7922, -122.4106));

        let log = log.borrow();
        assert_eq!(
            log[0],
            "https://maps.googleapis.com/maps/api/geocode/json\
             ?address=Mason%20Pacific%2C%20San%20Francisco%2C%20CA&key=k3y",
        );
    }

    #[test]
    fn geocode_status_failure_names_the_place() {
        let (client, _) = canned(r#"{"status": "ZERO_RESULTS", "results": []}"#);
        let maps: GoogleMaps<_, Body> = GoogleMaps::new(client, "k3y", "San Francisco, CA");

        match block_on(maps.geocode("Nowhere")) {
            Err(Failure::Geocode { name, source }) => {
                assert_eq!(name, "Nowhere");
                assert_eq!(source.to_string(), "API returned status ZERO_RESULTS");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn geocode_ok_without_results() {
        let (client, _) = canned(r#"{"status": "OK", "results": []}"#);
        let maps: GoogleMaps<_, Body> = GoogleMaps::new(client, "k3y", "San Francisco, CA");

        match block_on(maps.geocode("Nowhere")) {
            Err(Failure::Geocode { name, source }) => {
                assert_eq!(name, "Nowhere");
                assert_eq!(source.to_string(), "API returned status ZERO_RESULTS");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn clones_share_settings() {
        let (client, log) = canned(r#"{"status": "ZERO_RESULTS"}"#);
        let maps: GoogleMaps<_, Body> = GoogleMaps::new(client, "k3y", "Oakland, CA");
        let copy = maps.clone();

        block_on(copy.geocode("Lake Merritt")).unwrap_err();
        assert!(log.borrow()[0].contains("address=Lake%20Merritt%2C%20Oakland%2C%20CA&key=k3y"));
    }

    #[test]
    fn geocode_http_error() {
        let client = service_fn(|_: Request<Body>| {
            let mut res = Response::new(Body::empty());
            *res.status_mut() = http::StatusCode::FORBIDDEN;
            future::ready(Ok::<_, hyper_pkg::Error>(res))
        });
        let maps: GoogleMaps<_, Body> = GoogleMaps::new(client, "k3y", "San Francisco, CA");

        let failure = block_on(maps.geocode("Saison")).unwrap_err();
        assert_eq!(failure.to_string(), "failed to geocode Saison");
        assert_eq!(
            std::error::Error::source(&failure).unwrap().to_string(),
            "403 Forbidden",
        );
    }

    #[test]
    fn street_view_metadata() {
        let (client, log) = canned(
            r#"{
                "copyright": "© Google",
                "date": "2017-06",
                "location": {"lat": 37.80210, "lng": -122.40580},
                "pano_id": "F:-abc123",
                "status": "OK"
            }"#,
        );
        let maps: GoogleMaps<_, Body> = GoogleMaps::new(client, "k3y", "San Francisco, CA");

        let pano = block_on(maps.panorama_near(LatLng::new(37.8021, -122.4059), 50.0)).unwrap();
        assert_eq!(pano.id.as_deref(), Some("F:-abc123"));
        assert_eq!(pano.location, LatLng::new(37.8021, -122.4058));
        assert!(log.borrow()[0].contains("location=37.8021%2C-122.4059&radius=50&key=k3y"));
    }

    #[test]
    fn street_view_missing() {
        let (client, _) = canned(r#"{"status": "ZERO_RESULTS"}"#);
        let maps: GoogleMaps<_, Body> = GoogleMaps::new(client, "k3y", "San Francisco, CA");

        let position = LatLng::new(37.7694, -122.4862);
        match block_on(maps.panorama_near(position, 50.0)) {
            Err(Failure::PanoramaUnavailable { position: p, .. }) => assert_eq!(p, position),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
