use reqwest::Method;
use thiserror::Error;

/// Failures raised by the HAL client.
///
/// HTTP error statuses are not represented here: a `404` is a successful
/// navigation that landed on an error document.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured API root is not a usable absolute URL.
    #[error("invalid API root URL '{url}': {reason}")]
    InvalidRoot { url: String, reason: String },

    /// A link or reference could not be resolved against the current document.
    #[error("could not resolve '{href}' against '{base}': {source}")]
    InvalidUrl {
        href: String,
        base: String,
        #[source]
        source: url::ParseError,
    },

    /// The current document does not advertise the requested relation.
    #[error("resource at {url} has no '{rel}' link")]
    MissingLink { rel: String, url: String },

    /// The request never produced a response.
    #[error("network error calling {method} {url}: {source}. Hint: check connection/proxy settings")]
    Network {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A non-`reqwest` transport failed to deliver the request.
    #[error("transport failure: {0}")]
    Transport(String),

    /// A success response carried a body that is not a JSON document.
    #[error("{url} answered {status} with a non-JSON body (content type: {content_type}): {source}. Body starts with: {preview}")]
    Decode {
        url: String,
        status: u16,
        content_type: String,
        preview: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not build the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
