//! Decoding of `Content-Encoding: gzip` response bodies.

use std::io;

use async_compression::tokio::bufread::GzipDecoder;
use futures_util::future;
use futures_util::stream::TryStreamExt;
use tokio_util::io::ReaderStream;

/// Inflates a complete gzip-encoded body.
pub async fn gunzip(body: &[u8]) -> io::Result<Vec<u8>> {
    ReaderStream::new(GzipDecoder::new(body))
        .try_fold(Vec::with_capacity(body.len() * 4), |mut out, chunk| {
            out.extend_from_slice(&chunk);
            future::ready(Ok(out))
        })
        .await
}
