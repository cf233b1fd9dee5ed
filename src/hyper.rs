//! Type aliases and constructors for use with `hyper` crate's HTTP client.

use hyper_pkg::client::{Client, HttpConnector};
use hyper_pkg::Body;
use hyper_tls::HttpsConnector;

use crate::config::Config;
use crate::surface::MapSurface;
use crate::token::Token;
use crate::view_model::Context;

pub type Error = crate::Error<hyper_pkg::Error>;
pub type HttpsClient = Client<HttpsConnector<HttpConnector>, Body>;
pub type GoogleMaps = crate::GoogleMaps<HttpsClient, Body>;
pub type Foursquare = crate::Foursquare<HttpsClient, Body>;
pub type ViewModel<M> = crate::ViewModel<M, GoogleMaps, GoogleMaps, Foursquare>;

/// An HTTPS client with `hyper`'s default settings.
pub fn client() -> HttpsClient {
    Client::builder().build::<_, Body>(HttpsConnector::new())
}

/// A Google Maps client with its own connection pool.
pub fn google(key: impl Into<String>, city_qualifier: impl Into<String>) -> GoogleMaps {
    crate::GoogleMaps::new(client(), key, city_qualifier)
}

/// A Foursquare client with its own connection pool.
pub fn foursquare(
    client_id: impl Into<String>,
    client_secret: impl Into<String>,
    near: impl Into<String>,
) -> Foursquare {
    crate::Foursquare::new(client(), client_id, client_secret, near)
}

/// Creates a `ViewModel` drawing on `surface` whose web services share one connection pool.
pub fn view_model<M: MapSurface>(surface: M, token: Token<&str>, config: Config) -> ViewModel<M> {
    let client = client();
    let maps = crate::GoogleMaps::new(client.clone(), token.google_key, &*config.city_qualifier);
    let venues = crate::Foursquare::new(
        client,
        token.foursquare_id,
        token.foursquare_secret,
        &*config.metro_area,
    );
    let context = Context {
        surface,
        geocoder: maps.clone(),
        panoramas: maps,
        venues,
    };
    crate::ViewModel::new(context, config)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::Recorder;

    #[test]
    fn view_model_shares_one_client() {
        let config = Config {
            city_qualifier: "Oakland, CA".to_owned(),
            ..Config::default()
        };
        let token = Token::new("k3y", "id", "secret");
        let view_model = view_model(Recorder::default(), token, config);

        let context = view_model.context();
        let _: GoogleMaps = context.geocoder.clone();
        let _: Foursquare = context.venues.clone();
        assert!(view_model.places().is_empty());
        assert!(view_model.current().is_none());
        assert_eq!(view_model.config().city_qualifier, "Oakland, CA");
    }
}
