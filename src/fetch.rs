//! A thin typed wrapper around a caller-supplied HTTP transport.
//!
//! Option fragments are merged into a single options map (see
//! [`Config::build_options`]). Two options get special treatment before the
//! request is built:
//!
//! - `json` is encoded with `serde_json` into the request body;
//! - `query` is serialized with [`stringify`] and appended to the url.
//!
//! The remaining recognised options are `method`, `headers` and `body`.
//! Anything else is ignored.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::ser::{primitive_text, stringify};
use crate::value::{Map, Value};

/// The network primitive requests are delegated to.
///
/// Failures of the transport (connection errors, error statuses it chooses
/// to reject) are returned untouched. Errors raised while preparing the
/// request are converted into the transport's error type.
pub trait Transport {
    type Error: From<Error>;

    fn send(
        &self,
        request: http::Request<Vec<u8>>,
    ) -> impl Future<Output = Result<http::Response<Vec<u8>>, Self::Error>>;
}

impl<F, Fut, E> Transport for F
where
    F: Fn(http::Request<Vec<u8>>) -> Fut,
    Fut: Future<Output = Result<http::Response<Vec<u8>>, E>>,
    E: From<Error>,
{
    type Error = E;

    fn send(
        &self,
        request: http::Request<Vec<u8>>,
    ) -> impl Future<Output = Result<http::Response<Vec<u8>>, E>> {
        self(request)
    }
}

/// Fetches `url` through `transport` using the default [`Config`].
///
/// ```
/// use fetch_qs::{Error, FetchResponse, fetch_typed, map_from_json};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let transport = |request: http::Request<Vec<u8>>| async move {
///     assert_eq!(request.uri(), "https://example.com/items?page=2&tag=a&tag=b");
///     Ok::<_, Error>(http::Response::new(br#"{"total":2}"#.to_vec()))
/// };
/// let response: FetchResponse<serde_json::Value> = fetch_typed(
///     &transport,
///     "https://example.com/items",
///     [map_from_json(json!({ "query": { "page": 2, "tag": ["a", "b"] } }))],
/// )
/// .await?;
/// assert_eq!(response.json()?["total"], 2);
/// # Ok::<(), Error>(())
/// # })
/// # .unwrap();
/// ```
pub async fn fetch_typed<T, E, Tr, I>(
    transport: &Tr,
    url: &str,
    fragments: I,
) -> Result<FetchResponse<T, E>, Tr::Error>
where
    Tr: Transport + ?Sized,
    I: IntoIterator<Item = Map>,
{
    Config::default().fetch(transport, url, fragments).await
}

/// Turns a merged options map into a request.
pub(crate) fn prepare(url: &str, mut options: Map) -> Result<http::Request<Vec<u8>>> {
    let mut url = Cow::Borrowed(url);

    if let Some(json) = options.shift_remove("json") {
        if !json.is_null() {
            let body = serde_json::to_string(&json)?;
            options.insert("body".to_owned(), Value::String(body));
        }
    }

    match options.shift_remove("query") {
        Some(Value::Map(query)) => {
            if url.contains('?') {
                return Err(Error::QueryConflict {
                    url: url.into_owned(),
                });
            }
            url.to_mut().push_str(&stringify(&query));
        }
        Some(Value::Null) | None => {}
        Some(other) => {
            tracing::warn!(kind = ?other.kind(), "ignoring `query` option that is not a map");
        }
    }

    let mut builder = http::Request::builder().uri(&*url);

    match options.get("method") {
        Some(Value::String(method)) => builder = builder.method(method.as_str()),
        Some(Value::Null) | None => {}
        Some(other) => {
            return Err(Error::invalid_option(
                "method",
                format_args!("expected a string, got {other:?}"),
            ));
        }
    }

    match options.get("headers") {
        Some(Value::Map(headers)) => {
            for (name, value) in headers {
                if value.is_null() {
                    continue;
                }
                let Some(text) = primitive_text(value) else {
                    return Err(Error::invalid_option(
                        "headers",
                        format_args!("header `{name}` has no textual form"),
                    ));
                };
                builder = builder.header(name.as_str(), text);
            }
        }
        Some(Value::Null) | None => {}
        Some(other) => {
            return Err(Error::invalid_option(
                "headers",
                format_args!("expected a map, got {other:?}"),
            ));
        }
    }

    let body = match options.shift_remove("body") {
        Some(Value::String(body)) => body.into_bytes(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            return Err(Error::invalid_option(
                "body",
                format_args!("expected a string, got {other:?}"),
            ));
        }
    };

    let request = builder.body(body)?;
    tracing::debug!(method = %request.method(), uri = %request.uri(), "prepared request");
    Ok(request)
}

/// A response whose body can be read as `T` on success or `E` on failure.
pub struct FetchResponse<T, E = serde_json::Value> {
    inner: http::Response<Vec<u8>>,
    _payload: PhantomData<fn() -> (T, E)>,
}

impl<T, E> FetchResponse<T, E> {
    pub const fn new(inner: http::Response<Vec<u8>>) -> Self {
        Self {
            inner,
            _payload: PhantomData,
        }
    }

    pub fn status(&self) -> http::StatusCode {
        self.inner.status()
    }

    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    pub fn headers(&self) -> &http::HeaderMap {
        self.inner.headers()
    }

    pub fn body(&self) -> &[u8] {
        self.inner.body()
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.inner.body())
    }

    pub fn into_inner(self) -> http::Response<Vec<u8>> {
        self.inner
    }
}

impl<T: DeserializeOwned, E> FetchResponse<T, E> {
    /// Decodes the body as the success payload.
    pub fn json(&self) -> Result<T> {
        Ok(serde_json::from_slice(self.inner.body())?)
    }
}

impl<T, E: DeserializeOwned> FetchResponse<T, E> {
    /// Decodes the body as the error payload.
    pub fn error_json(&self) -> Result<E> {
        Ok(serde_json::from_slice(self.inner.body())?)
    }
}

impl<T: DeserializeOwned, E: DeserializeOwned> FetchResponse<T, E> {
    /// Decodes the body as `T` for a 2xx status and as `E` otherwise.
    pub fn into_result(self) -> Result<std::result::Result<T, E>> {
        if self.is_success() {
            self.json().map(Ok)
        } else {
            self.error_json().map(Err)
        }
    }
}

impl<T, E> fmt::Debug for FetchResponse<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchResponse")
            .field("status", &self.inner.status())
            .field("headers", self.inner.headers())
            .field("body_len", &self.inner.body().len())
            .finish()
    }
}
