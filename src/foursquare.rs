//! Venue lookups through the Foursquare Places API (v2).

use std::error;
use std::marker::PhantomData;

use futures_util::future::LocalBoxFuture;
use http::{Request, Response};
use http_body::Body;
use serde::Deserialize;
use tower_service::Service;

use crate::adapter::{RawVenue, VenueRef, VenueService};
use crate::error::{Error, Failure};
use crate::util::{escape, get_json, Query};

const VENUES_URI: &str = "https://api.foursquare.com/v2/venues";
const SEARCH_URI: &str = "https://api.foursquare.com/v2/venues/search";

/// The API version date sent with every request.
pub const API_VERSION: &str = "20180323";

/// A client for the venue search and venue detail endpoints.
#[derive(Debug)]
pub struct Foursquare<S, B> {
    client: S,
    client_id: String,
    client_secret: String,
    near: String,
    version: String,
    marker: PhantomData<fn() -> B>,
}

/// Every response is wrapped in `{"meta": ..., "response": ...}`.
#[derive(Deserialize)]
struct Envelope<T> {
    response: T,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    venues: Vec<VenueRef>,
}

#[derive(Deserialize)]
struct DetailResponse {
    venue: RawVenue,
}

impl<S: Clone, B> Clone for Foursquare<S, B> {
    fn clone(&self) -> Self {
        Foursquare {
            client: self.client.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            near: self.near.clone(),
            version: self.version.clone(),
            marker: PhantomData,
        }
    }
}

impl<S, B> Foursquare<S, B> {
    /// Creates a client that searches for venues near `near`, e.g. `"San Francisco, CA"`.
    pub fn new(
        client: S,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        near: impl Into<String>,
    ) -> Self {
        Foursquare {
            client,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            near: near.into(),
            version: API_VERSION.to_owned(),
            marker: PhantomData,
        }
    }

    /// Reset the `v` parameter sent with each request.
    pub fn version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = version.into();
        self
    }

    fn authorize(&self, query: Query) -> Query {
        query
            .pair("client_id", &self.client_id)
            .pair("client_secret", &self.client_secret)
            .pair("v", &self.version)
    }
}

impl<S, B, R> Foursquare<S, B>
where
    S: Service<Request<B>, Response = Response<R>> + Clone,
    B: Default,
    R: Body<Error = S::Error>,
{
    async fn search(&self, name: &str) -> Result<Vec<VenueRef>, Error<S::Error>> {
        tracing::debug!(name, near = %self.near, "searching venues");

        let query = Query::new()
            .pair("query", name)
            .pair("near", &self.near)
            .pair("limit", 1);
        let uri = self.authorize(query).to_uri(SEARCH_URI);
        let res: Envelope<SearchResponse> = get_json(&self.client, uri).await?;
        Ok(res.response.venues)
    }

    async fn detail(&self, venue: &VenueRef) -> Result<RawVenue, Error<S::Error>> {
        tracing::debug!(id = %venue.id, "fetching venue");

        let endpoint = format!("{}/{}", VENUES_URI, escape(&venue.id));
        let uri = self.authorize(Query::new()).to_uri(&endpoint);
        let res: Envelope<DetailResponse> = get_json(&self.client, uri).await?;
        Ok(res.response.venue)
    }
}

impl<S, B, R> VenueService for Foursquare<S, B>
where
    S: Service<Request<B>, Response = Response<R>> + Clone,
    S::Error: error::Error + Send + Sync + 'static,
    B: Default + 'static,
    R: Body<Error = S::Error> + 'static,
{
    fn search_venue<'a>(&'a self, name: &'a str) -> LocalBoxFuture<'a, Result<VenueRef, Failure>> {
        Box::pin(async move {
            let venues = self
                .search(name)
                .await
                .map_err(|e| Failure::VenueResolution {
                    name: name.to_owned(),
                    source: Box::new(e),
                })?;
            venues.into_iter().next().ok_or_else(|| Failure::NoVenueFound {
                name: name.to_owned(),
            })
        })
    }

    fn fetch_venue_detail<'a>(
        &'a self,
        venue: &'a VenueRef,
    ) -> LocalBoxFuture<'a, Result<RawVenue, Failure>> {
        Box::pin(async move {
            self.detail(venue)
                .await
                .map_err(|e| Failure::VenueResolution {
                    name: if venue.name.is_empty() {
                        venue.id.clone()
                    } else {
                        venue.name.clone()
                    },
                    source: Box::new(e),
                })
        })
    }
}
