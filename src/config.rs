use crate::defaults::defaults_deep;
use crate::error::Result;
use crate::fetch::{self, FetchResponse, Transport};
use crate::value::{Map, Value};

/// Configuration for building requests.
///
/// A `Config` carries the default options that sit beneath every request
/// it builds. Option fragments passed to [`Config::build_options`] are
/// merged with [`defaults_deep`]: earlier fragments win over later ones and
/// the configured defaults fill whatever is still missing.
///
/// Default value: `{ "method": "GET" }`
///
/// ```
/// use fetch_qs::{Config, map_from_json};
/// use serde_json::json;
///
/// let config = Config::new().default_option("headers", json!({ "accept": "application/json" }));
/// let options = config.build_options([map_from_json(json!({ "method": "POST" }))]);
/// assert_eq!(
///     options,
///     map_from_json(json!({
///         "method": "POST",
///         "headers": { "accept": "application/json" },
///     }))
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    defaults: Map,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        let mut defaults = Map::with_capacity(1);
        defaults.insert("method".to_owned(), Value::from("GET"));
        Self { defaults }
    }

    /// Replaces the default options entirely.
    #[must_use]
    pub fn with_defaults(mut self, defaults: Map) -> Self {
        self.defaults = defaults;
        self
    }

    /// Sets a single default option, replacing any previous value.
    #[must_use]
    pub fn default_option<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.defaults.insert(key.to_owned(), value.into());
        self
    }

    pub const fn defaults(&self) -> &Map {
        &self.defaults
    }

    /// Merges option fragments over the configured defaults.
    pub fn build_options<I>(&self, fragments: I) -> Map
    where
        I: IntoIterator<Item = Map>,
    {
        let mut options = Map::new();
        defaults_deep(
            &mut options,
            fragments.into_iter().chain([self.defaults.clone()]),
        );
        options
    }

    /// Builds the request described by `url` and the option fragments.
    pub fn prepare<I>(&self, url: &str, fragments: I) -> Result<http::Request<Vec<u8>>>
    where
        I: IntoIterator<Item = Map>,
    {
        fetch::prepare(url, self.build_options(fragments))
    }

    /// Builds a request and hands it to `transport`.
    ///
    /// The request is prepared before the transport is polled, so option
    /// errors surface without anything being sent.
    pub async fn fetch<T, E, Tr, I>(
        &self,
        transport: &Tr,
        url: &str,
        fragments: I,
    ) -> Result<FetchResponse<T, E>, Tr::Error>
    where
        Tr: Transport + ?Sized,
        I: IntoIterator<Item = Map>,
    {
        let request = self.prepare(url, fragments)?;
        tracing::debug!(method = %request.method(), uri = %request.uri(), "sending request");
        let response = transport.send(request).await?;
        Ok(FetchResponse::new(response))
    }
}
