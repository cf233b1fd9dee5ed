use std::fmt::{self, Display, Formatter};
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Buf, Bytes};
use futures_core::Stream;
use futures_util::future;
use futures_util::stream::TryStreamExt;
#[cfg(feature = "gzip")]
use http::header::{HeaderValue, ACCEPT_ENCODING, CONTENT_ENCODING};
use http::{Request, Response};
use http_body::Body;
use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode, NON_ALPHANUMERIC};
use pin_project_lite::pin_project;
use serde::de::DeserializeOwned;
use tower_service::Service;

use crate::error::Error;
#[cfg(feature = "gzip")]
use crate::gzip;

/// Creates an enum with `AsRef<str>` impl.
macro_rules! str_enum {
    (
        $(#[$attr:meta])*
        pub enum $E:ident {
            $(
                $(#[$v_attr:meta])*
                $V:ident = $by:expr
            ),*$(,)?
        }
    ) => {
        $(#[$attr])*
        pub enum $E {
            $(
                $(#[$v_attr])*
                $V,
            )*
        }

        impl std::convert::AsRef<str> for $E {
            fn as_ref(&self) -> &str {
                match *self {
                    $($E::$V => $by,)*
                }
            }
        }
    }
}

pin_project! {
    /// Wraps `http_body::Body` to make it a `Stream`.
    pub struct HttpBodyAsStream<B> {
        #[pin]
        pub inner: B,
    }
}

impl<B: Body> HttpBodyAsStream<B> {
    pub fn new(inner: B) -> Self {
        HttpBodyAsStream { inner }
    }
}

impl<B: Body> Stream for HttpBodyAsStream<B> {
    type Item = Result<Bytes, Error<B::Error>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().inner.poll_data(cx).map(|opt| {
            opt.map(|result| {
                result
                    .map(|mut buf| buf.copy_to_bytes(buf.remaining()))
                    .map_err(Error::Service)
            })
        })
    }
}

/// Characters escaped in query values: everything but the RFC 3986 unreserved set.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes a single path segment or query value.
pub fn escape(s: &str) -> PercentEncode<'_> {
    utf8_percent_encode(s, QUERY_VALUE)
}

/// A percent-encoded query string under construction.
#[derive(Clone, Debug, Default)]
pub struct Query {
    buf: String,
}

impl Query {
    pub fn new() -> Self {
        Query::default()
    }

    pub fn pair(mut self, key: &str, value: impl Display) -> Self {
        if !self.buf.is_empty() {
            self.buf.push('&');
        }
        self.buf.push_str(key);
        self.buf.push('=');
        let value = value.to_string();
        self.buf.extend(escape(&value));
        self
    }

    /// Appends the query to `endpoint`.
    pub fn to_uri(&self, endpoint: &str) -> String {
        if self.buf.is_empty() {
            endpoint.to_owned()
        } else {
            format!("{}?{}", endpoint, self.buf)
        }
    }
}

/// Sends a `GET` request for `uri` and parses the response body as JSON.
pub async fn get_json<S, B, R, T>(client: &S, uri: String) -> Result<T, Error<S::Error>>
where
    S: Service<Request<B>, Response = Response<R>> + Clone,
    B: Default,
    R: Body<Error = S::Error>,
    T: DeserializeOwned,
{
    let req = Request::get(uri);
    #[cfg(feature = "gzip")]
    let req = req.header(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
    let req = req.body(B::default()).map_err(Error::Request)?;

    let mut client = client.clone();
    future::poll_fn(|cx| client.poll_ready(cx))
        .await
        .map_err(Error::Service)?;
    let res = client.call(req).await.map_err(Error::Service)?;

    read_json(res).await
}

/// Reads a whole response body, decompressing it if needed, and parses it as JSON.
pub async fn read_json<T, B>(res: Response<B>) -> Result<T, Error<B::Error>>
where
    T: DeserializeOwned,
    B: Body,
{
    let (parts, body) = res.into_parts();
    if !parts.status.is_success() {
        return Err(Error::Http(parts.status));
    }

    let body = HttpBodyAsStream::new(body)
        .try_fold(Vec::new(), |mut vec, chunk| {
            vec.extend_from_slice(&chunk);
            future::ready(Ok(vec))
        })
        .await?;

    #[cfg(feature = "gzip")]
    let body = if parts
        .headers
        .get_all(CONTENT_ENCODING)
        .iter()
        .any(|e| e == "gzip")
    {
        gzip::gunzip(&body).await.map_err(Error::Gzip)?
    } else {
        body
    };

    serde_json::from_slice(&body).map_err(Error::Json)
}

pub fn fmt_join<T: Display>(t: &[T], sep: &str, f: &mut Formatter<'_>) -> fmt::Result {
    let mut iter = t.iter();
    if let Some(t) = iter.next() {
        Display::fmt(t, f)?;
        for t in iter {
            write!(f, "{}{}", sep, t)?;
        }
    }
    Ok(())
}

/// `Display` adapter over `fmt_join`.
pub struct Joined<'a, T> {
    pub items: &'a [T],
    pub sep: &'a str,
}

impl<'a, T: Display> Display for Joined<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_join(self.items, self.sep, f)
    }
}
