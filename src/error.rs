use thiserror::Error as ThisError;

/// Errors raised while preparing a request.
///
/// The codec and the defaults merger never fail; only the fetch wrapper
/// has preconditions that can be violated. Transport failures are not
/// represented here, they stay the transport's own error type.
#[derive(ThisError, Debug)]
pub enum Error {
    /// Both a `query` option and a `?` in the url were supplied.
    #[error(
        "cannot fetch with both query options and a url that contains a '?' ({url}); \
         use the query option alone"
    )]
    QueryConflict { url: String },

    /// An option had a shape the request builder cannot use.
    #[error("invalid `{key}` option: {reason}")]
    InvalidOption { key: &'static str, reason: String },

    /// The `json` option could not be encoded.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The method, a header or the url was rejected by `http`.
    #[error(transparent)]
    Http(#[from] http::Error),
}

impl Error {
    /// Generate an error for an option with the wrong shape.
    pub fn invalid_option<T>(key: &'static str, reason: T) -> Self
    where
        T: std::fmt::Display,
    {
        Self::InvalidOption {
            key,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
