use std::borrow::Borrow;
use std::env;

use serde::Deserialize;

/// API credentials for the Google Maps and Foursquare web services.
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct Token<K = String> {
    /// Google Maps Platform API key, used for geocoding and Street View.
    pub google_key: K,
    /// Foursquare client ID.
    pub foursquare_id: K,
    /// Foursquare client secret.
    pub foursquare_secret: K,
}

/// An environment variable required by `Token::from_env` was not set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingVar(pub &'static str);

impl<K: Borrow<str>> Token<K> {
    pub fn new(google_key: K, foursquare_id: K, foursquare_secret: K) -> Self {
        Token {
            google_key,
            foursquare_id,
            foursquare_secret,
        }
    }

    /// Borrow token strings from `self` and make a new `Token` with them.
    pub fn as_ref(&self) -> Token<&str> {
        Token::new(
            self.google_key.borrow(),
            self.foursquare_id.borrow(),
            self.foursquare_secret.borrow(),
        )
    }
}

impl Token {
    pub const GOOGLE_KEY_VAR: &'static str = "GOOGLE_MAPS_API_KEY";
    pub const FOURSQUARE_ID_VAR: &'static str = "FOURSQUARE_CLIENT_ID";
    pub const FOURSQUARE_SECRET_VAR: &'static str = "FOURSQUARE_CLIENT_SECRET";

    /// Reads the credentials from `GOOGLE_MAPS_API_KEY`, `FOURSQUARE_CLIENT_ID`
    /// and `FOURSQUARE_CLIENT_SECRET`.
    pub fn from_env() -> Result<Self, MissingVar> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(mut lookup: F) -> Result<Self, MissingVar>
    where
        F: FnMut(&'static str) -> Option<String>,
    {
        let mut var = |name| lookup(name).ok_or(MissingVar(name));
        Ok(Token::new(
            var(Self::GOOGLE_KEY_VAR)?,
            var(Self::FOURSQUARE_ID_VAR)?,
            var(Self::FOURSQUARE_SECRET_VAR)?,
        ))
    }
}

impl std::fmt::Display for MissingVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "environment variable `{}` is not set", self.0)
    }
}

impl std::error::Error for MissingVar {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lookup_reports_first_missing_variable() {
        let err = Token::from_lookup(|name| {
            if name == Token::GOOGLE_KEY_VAR {
                Some("key".to_owned())
            } else {
                None
            }
        })
        .unwrap_err();
        assert_eq!(err, MissingVar("FOURSQUARE_CLIENT_ID"));
    }

    #[test]
    fn deserialize_credential_file() {
        let json = r#"{
            "google_key": "g",
            "foursquare_id": "id",
            "foursquare_secret": "secret"
        }"#;
        let token: Token = serde_json::from_str(json).unwrap();
        let token = token.as_ref();
        assert_eq!(token.google_key, "g");
        assert_eq!(token.foursquare_secret, "secret");
    }
}
